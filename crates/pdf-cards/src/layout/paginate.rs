//! Pagination of card sequences
//!
//! A flat card list is chunked twice: into rows of `columns` slots, then
//! into pages of `rows` rows. Back pages are mirrored so that after the
//! sheet is flipped along its long edge each back lands behind its front.

use super::{Page, Row, Slot};
use crate::types::{GridSpec, PlannedPage, SheetSide};

/// Chunk a slot sequence into rows of exactly `columns` slots.
///
/// The last row is padded with empty slots.
pub fn chunk_rows<T>(slots: impl IntoIterator<Item = Slot<T>>, columns: usize) -> Vec<Row<T>> {
    assert!(columns > 0, "columns must be at least 1");

    let mut rows = Vec::new();
    let mut current: Row<T> = Vec::with_capacity(columns);
    for slot in slots {
        current.push(slot);
        if current.len() == columns {
            rows.push(std::mem::replace(&mut current, Vec::with_capacity(columns)));
        }
    }
    if !current.is_empty() {
        current.resize_with(columns, || None);
        rows.push(current);
    }
    rows
}

/// Chunk rows into pages of exactly `rows_per_page` rows.
///
/// The last page is padded with wholly empty rows as wide as the others.
pub fn chunk_pages<T>(rows: Vec<Row<T>>, rows_per_page: usize) -> Vec<Page<T>> {
    assert!(rows_per_page > 0, "rows_per_page must be at least 1");

    let columns = rows.first().map_or(0, Vec::len);
    let mut pages = Vec::new();
    let mut current: Page<T> = Vec::with_capacity(rows_per_page);
    for row in rows {
        current.push(row);
        if current.len() == rows_per_page {
            pages.push(std::mem::replace(
                &mut current,
                Vec::with_capacity(rows_per_page),
            ));
        }
    }
    if !current.is_empty() {
        current.resize_with(rows_per_page, || empty_row(columns));
        pages.push(current);
    }
    pages
}

fn empty_row<T>(columns: usize) -> Row<T> {
    std::iter::repeat_with(|| None).take(columns).collect()
}

/// Lay a flat card sequence out into full pages for `grid`.
pub fn paginate<T>(cards: impl IntoIterator<Item = T>, grid: GridSpec) -> Vec<Page<T>> {
    let rows = chunk_rows(cards.into_iter().map(Some), grid.columns);
    chunk_pages(rows, grid.rows)
}

/// Mirror every row of every back page horizontally.
///
/// Empty slots move with their row, so a short last row ends up
/// right-aligned, under the fronts it backs. Applying this twice is a no-op.
pub fn flip_backs<T>(pages: Vec<Page<T>>) -> Vec<Page<T>> {
    pages
        .into_iter()
        .map(|page| {
            page.into_iter()
                .map(|mut row| {
                    row.reverse();
                    row
                })
                .collect()
        })
        .collect()
}

/// Interleave front and back pages in duplex print order.
///
/// Produces front 0, back 0, front 1, back 1, and so on. Without back
/// pages the output is the fronts alone. Back pages beyond the last front
/// page have no sheet to print on and are dropped.
pub fn interleave<T>(front_pages: Vec<Page<T>>, back_pages: Vec<Page<T>>) -> Vec<PlannedPage<T>> {
    if back_pages.len() > front_pages.len() {
        log::warn!(
            "Dropping {} back page(s) with no matching front page",
            back_pages.len() - front_pages.len()
        );
    }

    let duplex = !back_pages.is_empty();
    let mut backs = back_pages.into_iter();
    let mut planned = Vec::new();

    for (sheet, front) in front_pages.into_iter().enumerate() {
        planned.push(PlannedPage {
            side: SheetSide::Front,
            sheet,
            slots: front,
        });
        if duplex {
            if let Some(back) = backs.next() {
                planned.push(PlannedPage {
                    side: SheetSide::Back,
                    sheet,
                    slots: back,
                });
            }
        }
    }
    planned
}
