//! Deck discovery on disk
//!
//! Layout: `<input_root>/<deck>/front/*`, optional `<deck>/back/*` and an
//! optional count file directly inside `<deck>/`.

use crate::constants::{BACK_DIR, FRONT_DIR, IMAGE_EXTENSIONS};
use crate::counts::{RepeatCounts, load_deck_counts};
use crate::types::{CardsError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One card set, as found on disk
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub name: String,
    pub root: PathBuf,
    /// Front images, sorted, one entry per file
    pub fronts: Vec<PathBuf>,
    /// Back images, sorted; empty for single-sided decks
    pub backs: Vec<PathBuf>,
    pub counts: Option<RepeatCounts>,
}

impl Deck {
    /// Scan a deck directory
    pub async fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_owned();
        let name = deck_name(&root);

        let fronts = front_images(&root).await?;
        let backs = back_images(&root).await?;
        let counts = load_deck_counts(&root).await?;

        log::info!(
            "Deck '{}': {} front image(s), {} back image(s)",
            name,
            fronts.len(),
            backs.len()
        );

        Ok(Self {
            name,
            root,
            fronts,
            backs,
            counts,
        })
    }
}

/// Deck name: the directory's own name
pub fn deck_name(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}

/// A file counts as an image when its name contains one of the image
/// extensions anywhere, not only at the end.
pub fn is_image_name(name: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|ext| name.contains(ext))
}

/// List the image files directly inside `dir`, sorted by path.
pub async fn images_in_dir(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir.as_ref()).await?;
    let mut images = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        if !is_image_name(&name.to_string_lossy()) {
            continue;
        }
        let path = entry.path();
        if tokio::fs::metadata(&path).await?.is_file() {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// Front images of a deck; the `front/` directory is required.
pub async fn front_images(deck_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = deck_dir.as_ref().join(FRONT_DIR);
    match images_in_dir(&dir).await {
        Err(CardsError::Io(err)) if err.kind() == ErrorKind::NotFound => {
            Err(CardsError::MissingFrontDir(dir))
        }
        other => other,
    }
}

/// Back images of a deck; a missing `back/` directory means no backs.
pub async fn back_images(deck_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = deck_dir.as_ref().join(BACK_DIR);
    match images_in_dir(&dir).await {
        Err(CardsError::Io(err)) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        other => other,
    }
}

/// Every subdirectory of the input root is a deck, sorted by path.
pub async fn find_decks(input_root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(input_root.as_ref()).await?;
    let mut decks = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if tokio::fs::metadata(&path).await?.is_dir() {
            decks.push(path);
        }
    }
    decks.sort();
    Ok(decks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_name_substring_match() {
        assert!(is_image_name("card.png"));
        assert!(is_image_name("card.jpeg"));
        assert!(is_image_name("card.png.bak"));
        assert!(is_image_name("jpg-notes.txt"));
        assert!(!is_image_name("card.gif"));
        assert!(!is_image_name("card.PNG"));
    }
}
