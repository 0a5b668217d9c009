//! Cutting guide geometry
//!
//! Every card gets a cross at each of its four corners. Cards on the outer
//! edge of the grid additionally get strokes running out to the paper edge,
//! so the first cuts can be lined up from outside the printed area.

use super::{CardRect, GridPosition, GuideEdges, LineSegment, cell_edges};
use crate::constants::{
    GUIDE_ARM_LENGTH, LEGACY_BOTTOM_THRESHOLD, LEGACY_LEFT_THRESHOLD, LEGACY_RIGHT_THRESHOLD,
    LEGACY_TOP_THRESHOLD,
};
use crate::types::GridSpec;
use serde::{Deserialize, Serialize};

/// How a card decides which edge extensions it gets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GuidePolicy {
    /// First/last row and column of the grid
    #[default]
    GridPosition,
    /// Fixed coordinate thresholds, only correct for A4 with a 3x5 grid
    LegacyThresholds,
}

impl GuidePolicy {
    pub fn edges(self, grid: &GridSpec, pos: GridPosition, rect: &CardRect) -> GuideEdges {
        match self {
            GuidePolicy::GridPosition => cell_edges(grid, pos),
            GuidePolicy::LegacyThresholds => legacy_edges(rect),
        }
    }
}

/// Derive edges from absolute coordinates, the way older sheets did.
pub fn legacy_edges(rect: &CardRect) -> GuideEdges {
    GuideEdges {
        top: rect.y0 < LEGACY_TOP_THRESHOLD,
        bottom: rect.y0 > LEGACY_BOTTOM_THRESHOLD,
        left: rect.x0 < LEGACY_LEFT_THRESHOLD,
        right: rect.x0 > LEGACY_RIGHT_THRESHOLD,
    }
}

/// Compute the guide strokes for one card.
///
/// Always yields the eight corner strokes, followed by two extension
/// strokes for each edge set in `edges`.
pub fn draw_guides(
    rect: &CardRect,
    edges: GuideEdges,
    page_width: f32,
    page_height: f32,
) -> Vec<LineSegment> {
    let CardRect { x0, y0, x1, y1 } = *rect;
    let size = GUIDE_ARM_LENGTH;

    let mut lines = Vec::with_capacity(8 + 2 * edges.count());
    for (x, y) in [(x0, y0), (x1, y1), (x0, y1), (x1, y0)] {
        lines.push(LineSegment::new(x, y - size, x, y + size));
        lines.push(LineSegment::new(x - size, y, x + size, y));
    }

    if edges.top {
        lines.push(LineSegment::new(x0, 0.0, x0, y0));
        lines.push(LineSegment::new(x1, 0.0, x1, y0));
    }
    if edges.bottom {
        lines.push(LineSegment::new(x0, page_height, x0, y1));
        lines.push(LineSegment::new(x1, page_height, x1, y1));
    }
    if edges.left {
        lines.push(LineSegment::new(0.0, y0, x0, y0));
        lines.push(LineSegment::new(0.0, y1, x0, y1));
    }
    if edges.right {
        lines.push(LineSegment::new(x1, y0, page_width, y0));
        lines.push(LineSegment::new(x1, y1, page_width, y1));
    }

    lines
}
