//! Layout calculation modules for card sheets
//!
//! This module handles all the pure calculations between the image lists
//! on disk and the PDF pages:
//! - Repeating fronts and padding backs (which image goes where)
//! - Pagination into rows and pages, with duplex mirroring of backs
//! - Grid placement (card rectangles) and guide-mark geometry

mod grid;
mod guides;
mod paginate;
mod repeat;
mod types;

pub use grid::*;
pub use guides::*;
pub use paginate::*;
pub use repeat::*;
pub use types::*;
