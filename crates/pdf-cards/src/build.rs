//! Deck building - from image directories to PDF files
//!
//! This module orchestrates the whole process:
//! 1. Scan the deck directory and its count file
//! 2. Repeat fronts, pad backs, paginate and mirror the backs
//! 3. Render pages in duplex order with images and guides
//! 4. Save `<output_root>/<deck>.pdf`
//!
//! Every deck of a batch is built in isolation: one failing deck is
//! reported and the rest are still built.

use crate::deck::{Deck, find_decks};
use crate::layout::{align_backs, expand, flip_backs, interleave, paginate};
use crate::options::BuildOptions;
use crate::render::{RenderSettings, SheetDocument};
use crate::types::*;
use lopdf::Document;
use std::path::{Path, PathBuf};

/// Outcome of one successfully built deck
#[derive(Debug, Clone, PartialEq)]
pub struct DeckReport {
    pub name: String,
    pub output: PathBuf,
    pub pages: usize,
    /// Distinct image files embedded
    pub images: usize,
}

/// A deck that could not be built
#[derive(Debug)]
pub struct DeckFailure {
    pub name: String,
    pub error: CardsError,
}

/// Per-deck results of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<DeckReport>,
    pub failed: Vec<DeckFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Plan every page of a deck in print order.
///
/// Backs are padded against the already-expanded fronts, so repeated
/// fronts each get a matching back.
pub fn plan_deck(deck: &Deck, grid: GridSpec) -> Result<Vec<PlannedPage<PathBuf>>> {
    grid.validate()?;

    let fronts = expand(&deck.fronts, deck.counts.as_ref());
    if fronts.is_empty() {
        return Err(CardsError::EmptyDeck(deck.name.clone()));
    }
    let backs = align_backs(&fronts, deck.backs.clone());

    let front_pages = paginate(fronts, grid);
    let back_pages = flip_backs(paginate(backs, grid));

    Ok(interleave(front_pages, back_pages))
}

/// Render planned pages into a new document
pub fn render_pages(
    pages: &[PlannedPage<PathBuf>],
    geometry: PageGeometry,
    settings: RenderSettings,
) -> Result<SheetDocument> {
    let mut document = SheetDocument::new(geometry, settings);
    for page in pages {
        document.add_page(page)?;
    }
    Ok(document)
}

/// Build one deck directory into `<output_root>/<deck>.pdf`
pub async fn build_deck(deck_dir: impl AsRef<Path>, options: &BuildOptions) -> Result<DeckReport> {
    let deck = Deck::load(deck_dir).await?;
    let geometry = options.geometry()?;
    let pages = plan_deck(&deck, options.grid)?;

    let settings = RenderSettings {
        scaling: options.scaling,
        guides: options.guides,
        guide_policy: options.guide_policy,
    };

    // Image decoding and page assembly are CPU-bound, spawn blocking
    let (document, pages, images) = tokio::task::spawn_blocking(move || {
        let document = render_pages(&pages, geometry, settings)?;
        let pages = document.page_count();
        let images = document.image_count();
        Ok::<_, CardsError>((document.finish(), pages, images))
    })
    .await??;

    let output = options.output_path(&deck.name);
    save_pdf(document, &output).await?;

    log::info!(
        "Deck '{}': {} page(s) → {}",
        deck.name,
        pages,
        output.display()
    );

    Ok(DeckReport {
        name: deck.name,
        output,
        pages,
        images,
    })
}

/// Build every deck under `options.input_root`.
///
/// Fails only when the input root cannot be scanned or the output root
/// cannot be created; per-deck errors are collected in the report.
pub async fn build_all(options: &BuildOptions) -> Result<BatchReport> {
    options.validate()?;

    tokio::fs::create_dir_all(&options.output_root).await?;
    let decks = find_decks(&options.input_root).await?;
    log::info!(
        "Found {} deck(s) in {}",
        decks.len(),
        options.input_root.display()
    );

    let mut report = BatchReport::default();
    for deck_dir in decks {
        match build_deck(&deck_dir, options).await {
            Ok(deck) => report.succeeded.push(deck),
            Err(error) => {
                let name = crate::deck::deck_name(&deck_dir);
                log::error!("Deck '{}' failed: {}", name, error);
                report.failed.push(DeckFailure { name, error });
            }
        }
    }

    Ok(report)
}

/// Save a finished document
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, CardsError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}
