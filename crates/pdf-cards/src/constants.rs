//! Shared constants for card sheet layout
//!
//! Page formats, margin ratios and guide geometry are fixed policy,
//! not user options.

// =============================================================================
// Page Dimensions
// =============================================================================

/// A4 page dimensions in points (width, height)
pub const A4_DIMENSIONS_PT: (f32, f32) = (595.0, 842.0);

/// US Letter page dimensions in points (width, height)
pub const LETTER_DIMENSIONS_PT: (f32, f32) = (612.0, 792.0);

/// Left/right margin as a fraction of page width
pub const HORIZONTAL_MARGIN_RATIO: f32 = 1.0 / 17.0;

/// Top/bottom margin as a fraction of page height
pub const VERTICAL_MARGIN_RATIO: f32 = 1.0 / 44.0;

// =============================================================================
// Guide Marks
// =============================================================================

/// Reach of a corner guide stroke on each side of the corner (points)
pub const GUIDE_ARM_LENGTH: f32 = 20.0;

/// Stroke width for guide marks (points)
pub const GUIDE_LINE_WIDTH: f32 = 1.0;

// Legacy edge thresholds. Tuned for A4 with a 3x5 grid; they misplace
// extensions for other layouts, which is why `GuidePolicy::GridPosition`
// is the default.

/// Cards whose top edge is above this draw a top extension
pub const LEGACY_TOP_THRESHOLD: f32 = 20.0;

/// Cards whose top edge is below this draw a bottom extension
pub const LEGACY_BOTTOM_THRESHOLD: f32 = 500.0;

/// Cards whose left edge is left of this draw a left extension
pub const LEGACY_LEFT_THRESHOLD: f32 = 40.0;

/// Cards whose left edge is right of this draw a right extension
pub const LEGACY_RIGHT_THRESHOLD: f32 = 390.0;

// =============================================================================
// Input
// =============================================================================

/// Substrings that mark a file as a card image
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Subdirectory holding front images
pub const FRONT_DIR: &str = "front";

/// Subdirectory holding back images
pub const BACK_DIR: &str = "back";

/// Extension of the repeat-count side-car file
pub const COUNTS_EXTENSION: &str = "json";

/// Largest repeat count accepted for a single card
pub const MAX_REPEAT_COUNT: i64 = 10_000;
