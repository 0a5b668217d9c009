pub mod build;
pub mod constants;
pub mod counts;
pub mod deck;
pub mod layout;
mod options;
pub mod render;
mod stats;
mod types;

pub use build::{BatchReport, DeckFailure, DeckReport, build_all, build_deck, plan_deck, save_pdf};
pub use counts::{CountsFileOutcome, RepeatCounts, write_all_default_counts, write_default_counts};
pub use deck::{Deck, find_decks};
pub use layout::GuidePolicy;
pub use options::*;
pub use stats::calculate_statistics;
pub use types::*;
