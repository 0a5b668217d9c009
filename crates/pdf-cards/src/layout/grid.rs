//! Grid placement calculation
//!
//! This module turns one page matrix into absolute card rectangles and
//! reports which page edges a cell touches.

use super::{CardRect, GridPosition, Page, PlacedImage};
use crate::types::{GridSpec, PageGeometry};

// =============================================================================
// Cell Calculations
// =============================================================================

/// Calculate the rectangle of the cell at the given grid position.
pub fn cell_rect(geometry: &PageGeometry, pos: GridPosition) -> CardRect {
    let x0 = pos.col as f32 * geometry.card_width + geometry.margins.horizontal;
    let y0 = pos.row as f32 * geometry.card_height + geometry.margins.vertical;
    CardRect::new(x0, y0, x0 + geometry.card_width, y0 + geometry.card_height)
}

/// Place every occupied slot of a page, in row-major order.
pub fn place<T: Clone>(page: &Page<T>, geometry: &PageGeometry) -> Vec<PlacedImage<T>> {
    let mut placed = Vec::new();
    for (row, cells) in page.iter().enumerate() {
        for (col, slot) in cells.iter().enumerate() {
            if let Some(image) = slot {
                let position = GridPosition::new(row, col);
                let rect = cell_rect(geometry, position);
                log::debug!(
                    "points ({}, {})\t({}, {})",
                    rect.x0,
                    rect.y0,
                    rect.x1,
                    rect.y1
                );
                placed.push(PlacedImage {
                    image: image.clone(),
                    position,
                    rect,
                });
            }
        }
    }
    placed
}

// =============================================================================
// Edge Information
// =============================================================================

/// Which outer edges of the printable area a cell touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GuideEdges {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl GuideEdges {
    /// Number of edges touched
    pub fn count(&self) -> usize {
        [self.top, self.bottom, self.left, self.right]
            .into_iter()
            .filter(|&edge| edge)
            .count()
    }
}

/// Get the outer edges of a cell from its grid position
pub fn cell_edges(grid: &GridSpec, pos: GridPosition) -> GuideEdges {
    GuideEdges {
        top: pos.row == 0,
        bottom: pos.row + 1 == grid.rows,
        left: pos.col == 0,
        right: pos.col + 1 == grid.columns,
    }
}

// =============================================================================
// Tests
// =============================================================================
