//! Repeat-count side-car files
//!
//! A deck may carry one JSON object mapping front image filenames to the
//! number of copies to print. Keys are matched case-insensitively.

use crate::constants::{COUNTS_EXTENSION, MAX_REPEAT_COUNT};
use crate::types::{CardsError, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Validated filename → copies mapping. Unlisted files print once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepeatCounts {
    counts: HashMap<String, usize>,
}

impl RepeatCounts {
    /// Build from raw entries, lowercasing keys and rejecting counts outside
    /// `1..=MAX_REPEAT_COUNT`.
    pub fn new<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<i64>,
    {
        let mut counts = HashMap::new();
        for (name, count) in entries {
            let name = name.into();
            let count = count.into();
            if !(1..=MAX_REPEAT_COUNT).contains(&count) {
                return Err(CardsError::InvalidCount { name, count });
            }
            counts.insert(name.to_lowercase(), count as usize);
        }
        Ok(Self { counts })
    }

    /// Parse a count file body
    pub fn from_json(json: &str, path: &Path) -> Result<Self> {
        let raw: BTreeMap<String, i64> =
            serde_json::from_str(json).map_err(|source| CardsError::Counts {
                path: path.to_owned(),
                source,
            })?;
        Self::new(raw)
    }

    /// Load a count file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json, path)
    }

    /// Copies to print for an image, by base filename
    pub fn count_for(&self, image: &Path) -> usize {
        image
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .and_then(|name| self.counts.get(&name).copied())
            .unwrap_or(1)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Find the count file of a deck: the first `*.json` directly inside it,
/// by name.
pub async fn find_counts_file(deck_dir: impl AsRef<Path>) -> Result<Option<PathBuf>> {
    let mut entries = tokio::fs::read_dir(deck_dir.as_ref()).await?;
    let mut candidates = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext == COUNTS_EXTENSION);
        if is_json && entry.file_type().await?.is_file() {
            candidates.push(path);
        }
    }
    candidates.sort();
    Ok(candidates.into_iter().next())
}

/// Load the deck's count file if it has one
pub async fn load_deck_counts(deck_dir: impl AsRef<Path>) -> Result<Option<RepeatCounts>> {
    match find_counts_file(deck_dir).await? {
        Some(path) => {
            let counts = RepeatCounts::load(&path).await?;
            log::info!(
                "Loaded {} repeat count(s) from {}",
                counts.len(),
                path.display()
            );
            Ok(Some(counts))
        }
        None => Ok(None),
    }
}

// =============================================================================
// Count File Generation
// =============================================================================

/// What `write_default_counts` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountsFileOutcome {
    Written { path: PathBuf, entries: usize },
    Skipped { path: PathBuf },
}

/// Render a count file listing every name with a count of 1
pub fn default_counts_json<S: AsRef<str>>(names: &[S]) -> Result<String> {
    let map: BTreeMap<&str, u32> = names.iter().map(|name| (name.as_ref(), 1)).collect();
    serde_json::to_string_pretty(&map)
        .map_err(|e| CardsError::Config(format!("Failed to serialize count file: {}", e)))
}

/// Path of the generated count file for a deck: `<deck>/<deck>.json`
pub fn default_counts_path(deck_dir: &Path) -> PathBuf {
    let name = deck_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "counts".to_string());
    deck_dir.join(format!("{name}.{COUNTS_EXTENSION}"))
}

/// Write `<deck>/<deck>.json` with every front image mapped to 1.
///
/// `confirm_overwrite` is asked when the file already exists; returning
/// `false` leaves it untouched.
pub async fn write_default_counts(
    deck_dir: impl AsRef<Path>,
    confirm_overwrite: impl FnOnce(&Path) -> bool,
) -> Result<CountsFileOutcome> {
    let deck_dir = deck_dir.as_ref();
    let fronts = crate::deck::front_images(deck_dir).await?;
    let names: Vec<String> = fronts
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect();

    let path = default_counts_path(deck_dir);
    if tokio::fs::try_exists(&path).await? && !confirm_overwrite(&path) {
        return Ok(CountsFileOutcome::Skipped { path });
    }

    tokio::fs::write(&path, default_counts_json(&names)?).await?;
    log::info!("Wrote {} count(s) to {}", names.len(), path.display());
    Ok(CountsFileOutcome::Written {
        path,
        entries: names.len(),
    })
}

/// Run `write_default_counts` for every deck under `input_root`.
///
/// A deck that fails is reported next to the others instead of stopping
/// the run. Fails only when `input_root` cannot be scanned.
pub async fn write_all_default_counts(
    input_root: impl AsRef<Path>,
    mut confirm_overwrite: impl FnMut(&Path) -> bool,
) -> Result<Vec<(PathBuf, Result<CountsFileOutcome>)>> {
    let decks = crate::deck::find_decks(input_root).await?;
    let mut outcomes = Vec::with_capacity(decks.len());
    for deck_dir in decks {
        let outcome = write_default_counts(&deck_dir, |path| confirm_overwrite(path)).await;
        if let Err(err) = &outcome {
            log::error!("Count file for {} failed: {}", deck_dir.display(), err);
        }
        outcomes.push((deck_dir, outcome));
    }
    Ok(outcomes)
}
