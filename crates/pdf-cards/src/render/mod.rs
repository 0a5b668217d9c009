//! PDF rendering modules for card sheets
//!
//! This module handles all PDF-specific operations:
//! - Embedding card images as XObjects
//! - Building output pages with images and guide strokes
//! - Assembling pages into a document

mod document;
mod xobject;
mod page;

pub use document::SheetDocument;
pub use xobject::{ImageCache, ImageXObject, embed_image};
pub use page::{RenderSettings, image_rect, render_card_page};
