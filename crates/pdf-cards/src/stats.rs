use crate::build::plan_deck;
use crate::deck::Deck;
use crate::layout::expand;
use crate::types::*;

/// Calculate statistics for a deck laid out on `grid`
pub fn calculate_statistics(deck: &Deck, grid: GridSpec) -> Result<DeckStatistics> {
    let pages = plan_deck(deck, grid)?;

    let front_cards = expand(&deck.fronts, deck.counts.as_ref()).len();
    // Backs are padded up to the front length, never truncated
    let back_cards = if deck.backs.is_empty() {
        0
    } else {
        deck.backs.len().max(front_cards)
    };

    let sheets = pages
        .iter()
        .filter(|page| page.side == SheetSide::Front)
        .count();
    let output_pages = pages.len();

    let occupied: usize = pages.iter().map(PlannedPage::occupied_slots).sum();
    let empty_slots = output_pages * grid.cards_per_page() - occupied;

    Ok(DeckStatistics {
        front_images: deck.fronts.len(),
        front_cards,
        back_images: deck.backs.len(),
        back_cards,
        sheets,
        output_pages,
        empty_slots,
    })
}
