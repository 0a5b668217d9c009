use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pdfc", about = "Printable card sheets from image decks", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build one PDF per deck directory
    Build {
        /// JSON config file; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory containing one subdirectory per deck
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory to write <deck>.pdf files into
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Cards per row
        #[arg(long)]
        columns: Option<usize>,

        /// Rows per page
        #[arg(long)]
        rows: Option<usize>,

        /// Output paper size
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// How images fill their card cell
        #[arg(long, value_enum)]
        scaling: Option<ScalingArg>,

        /// Don't draw cutting guides
        #[arg(long)]
        no_guides: bool,

        /// Decide guide extensions from fixed coordinates instead of grid position
        #[arg(long)]
        legacy_guides: bool,

        /// Show statistics only, don't generate PDFs
        #[arg(long)]
        stats_only: bool,
    },

    /// Write a <deck>.json count file for every deck, each card printed once
    Counts {
        /// Directory containing one subdirectory per deck
        #[arg(short, long, default_value = "input")]
        input: PathBuf,

        /// Overwrite existing count files without asking
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    Letter,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScalingArg {
    Fit,
    Stretch,
}

impl From<PaperArg> for pdf_cards::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::Letter => Self::Letter,
        }
    }
}

impl From<ScalingArg> for pdf_cards::ScalingMode {
    fn from(arg: ScalingArg) -> Self {
        match arg {
            ScalingArg::Fit => Self::Fit,
            ScalingArg::Stretch => Self::Stretch,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            config,
            input,
            output,
            columns,
            rows,
            paper,
            scaling,
            no_guides,
            legacy_guides,
            stats_only,
        } => {
            let mut options = match config {
                Some(path) => pdf_cards::BuildOptions::load(&path).await?,
                None => pdf_cards::BuildOptions::default(),
            };
            if let Some(input) = input {
                options.input_root = input;
            }
            if let Some(output) = output {
                options.output_root = output;
            }
            if let Some(columns) = columns {
                options.grid.columns = columns;
            }
            if let Some(rows) = rows {
                options.grid.rows = rows;
            }
            if let Some(paper) = paper {
                options.paper = paper.into();
            }
            if let Some(scaling) = scaling {
                options.scaling = scaling.into();
            }
            if no_guides {
                options.guides = false;
            }
            if legacy_guides {
                options.guide_policy = pdf_cards::GuidePolicy::LegacyThresholds;
            }
            options.validate()?;

            if stats_only {
                return print_statistics(&options).await;
            }

            let report = pdf_cards::build_all(&options).await?;
            for deck in &report.succeeded {
                println!(
                    "Built {} ({} pages) → {}",
                    deck.name,
                    deck.pages,
                    deck.output.display()
                );
            }
            for failure in &report.failed {
                eprintln!("Failed {}: {}", failure.name, failure.error);
            }
            if !report.is_success() {
                bail!(
                    "{} of {} deck(s) failed",
                    report.failed.len(),
                    report.total()
                );
            }
        }

        Commands::Counts { input, force } => {
            let outcomes =
                pdf_cards::write_all_default_counts(&input, |path| force || confirm_overwrite(path))
                    .await?;
            if outcomes.is_empty() {
                log::warn!("No deck directories in {}", input.display());
            }
            let mut failed = 0;
            for (deck_dir, outcome) in &outcomes {
                match outcome {
                    Ok(pdf_cards::CountsFileOutcome::Written { path, entries }) => {
                        println!("Wrote {} entries → {}", entries, path.display());
                    }
                    Ok(pdf_cards::CountsFileOutcome::Skipped { path }) => {
                        println!("Kept {}", path.display());
                    }
                    Err(err) => {
                        eprintln!("Failed {}: {}", deck_dir.display(), err);
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                bail!("{} of {} deck(s) failed", failed, outcomes.len());
            }
        }
    }

    Ok(())
}

async fn print_statistics(options: &pdf_cards::BuildOptions) -> Result<()> {
    for deck_dir in pdf_cards::find_decks(&options.input_root).await? {
        let deck = pdf_cards::Deck::load(&deck_dir).await;
        let stats = deck.and_then(|deck| {
            pdf_cards::calculate_statistics(&deck, options.grid).map(|stats| (deck.name, stats))
        });
        let (name, stats) = match stats {
            Ok(result) => result,
            Err(err) => {
                eprintln!("Failed {}: {}", deck_dir.display(), err);
                continue;
            }
        };
        println!("Deck {}:", name);
        println!("  Front images: {}", stats.front_images);
        println!("  Front cards: {}", stats.front_cards);
        println!("  Back images: {}", stats.back_images);
        println!("  Back cards: {}", stats.back_cards);
        println!("  Sheets: {}", stats.sheets);
        println!("  Output pages: {}", stats.output_pages);
        println!("  Empty slots: {}", stats.empty_slots);
    }
    Ok(())
}

/// Ask on the terminal; anything but "y" keeps the existing file.
fn confirm_overwrite(path: &Path) -> bool {
    print!(
        "{} already exists do you want to overwrite it? Y/n ",
        path.display()
    );
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    answer.trim().eq_ignore_ascii_case("y")
}
