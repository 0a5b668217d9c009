//! Layout data types for card sheets
//!
//! Page coordinates use a top-left origin with y growing downward, the
//! way the cards are read on paper. Conversion to PDF user space happens
//! only when the page is rendered.

/// One card position: an image or a hole left by uneven page filling
pub type Slot<T> = Option<T>;

/// Exactly `columns` slots
pub type Row<T> = Vec<Slot<T>>;

/// Exactly `rows` rows
pub type Page<T> = Vec<Row<T>>;

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Rectangle occupied by one card, in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardRect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl CardRect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// An occupied slot with its final rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedImage<T> {
    pub image: T,
    pub position: GridPosition,
    pub rect: CardRect,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A straight guide stroke in page coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            start: Point::new(x0, y0),
            end: Point::new(x1, y1),
        }
    }
}
