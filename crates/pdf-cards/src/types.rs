use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::constants::{
    A4_DIMENSIONS_PT, HORIZONTAL_MARGIN_RATIO, LETTER_DIMENSIONS_PT, VERTICAL_MARGIN_RATIO,
};

#[derive(Error, Debug)]
pub enum CardsError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Front image directory not found: {}", .0.display())]
    MissingFrontDir(PathBuf),
    #[error("Deck '{0}' has no front images")]
    EmptyDeck(String),
    #[error("Failed to decode image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to parse count file {}: {source}", path.display())]
    Counts {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(
        "Invalid repeat count {count} for '{name}': counts must be between 1 and {}",
        crate::constants::MAX_REPEAT_COUNT
    )]
    InvalidCount { name: String, count: i64 },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, CardsError>;

/// Supported paper formats, in PDF points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
}

impl PaperSize {
    /// Portrait dimensions (width, height) in points
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => A4_DIMENSIONS_PT,
            PaperSize::Letter => LETTER_DIMENSIONS_PT,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::Letter => "Letter",
        }
    }
}

/// Card positions per page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub columns: usize,
    pub rows: usize,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            columns: 3,
            rows: 5,
        }
    }
}

impl GridSpec {
    pub fn new(columns: usize, rows: usize) -> Result<Self> {
        let grid = Self { columns, rows };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(CardsError::Config(format!(
                "Grid must have at least one column and one row (got {}x{})",
                self.columns, self.rows
            )));
        }
        Ok(())
    }

    pub fn cards_per_page(&self) -> usize {
        self.columns * self.rows
    }
}

/// Empty space reserved around the card grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Margins {
    /// Fixed-ratio margins for a page of the given size
    pub fn for_page(width: f32, height: f32) -> Self {
        Self {
            horizontal: width * HORIZONTAL_MARGIN_RATIO,
            vertical: height * VERTICAL_MARGIN_RATIO,
        }
    }
}

/// Everything the layout engine needs to know about one page.
///
/// Computed once per document: margins and card size never change
/// from card to card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub grid: GridSpec,
    pub margins: Margins,
    pub card_width: f32,
    pub card_height: f32,
}

impl PageGeometry {
    pub fn new(paper: PaperSize, grid: GridSpec) -> Result<Self> {
        let (width, height) = paper.dimensions_pt();
        Self::with_dimensions(width, height, grid)
    }

    pub fn with_dimensions(width: f32, height: f32, grid: GridSpec) -> Result<Self> {
        grid.validate()?;
        let margins = Margins::for_page(width, height);
        Ok(Self {
            width,
            height,
            grid,
            margins,
            card_width: (width - 2.0 * margins.horizontal) / grid.columns as f32,
            card_height: (height - 2.0 * margins.vertical) / grid.rows as f32,
        })
    }
}

/// Which physical side of the printed sheet a page is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSide {
    Front,
    Back,
}

/// One page of the output in print order
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPage<T> {
    pub side: SheetSide,
    /// Index of the physical sheet this page is printed on
    pub sheet: usize,
    pub slots: crate::layout::Page<T>,
}

impl<T> PlannedPage<T> {
    pub fn occupied_slots(&self) -> usize {
        self.slots.iter().flatten().filter(|slot| slot.is_some()).count()
    }
}

/// Statistics about a deck layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckStatistics {
    /// Front image files found on disk
    pub front_images: usize,
    /// Front cards after applying repeat counts
    pub front_cards: usize,
    /// Back image files found on disk
    pub back_images: usize,
    /// Back cards after padding to the front length
    pub back_cards: usize,
    /// Physical sheets (front pages)
    pub sheets: usize,
    /// Pages written to the PDF (fronts and backs)
    pub output_pages: usize,
    /// Unused card slots across all output pages
    pub empty_slots: usize,
}
