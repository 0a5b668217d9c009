use pdf_cards::layout::*;
use pdf_cards::{GridSpec, SheetSide};

fn flatten<T: Clone>(rows: &[Row<T>]) -> Vec<T> {
    rows.iter().flatten().flatten().cloned().collect()
}

#[test]
fn test_chunk_rows_recovers_input() {
    for columns in 1..=6 {
        for len in 0..=25 {
            let input: Vec<usize> = (0..len).collect();
            let rows = chunk_rows(input.iter().copied().map(Some), columns);

            assert!(rows.iter().all(|row| row.len() == columns));
            assert_eq!(rows.len(), len.div_ceil(columns));
            assert_eq!(flatten(&rows), input, "columns={columns} len={len}");
        }
    }
}

#[test]
fn test_chunk_rows_keeps_existing_holes() {
    let rows = chunk_rows(vec![Some(1), None, Some(3)], 2);
    assert_eq!(rows, vec![vec![Some(1), None], vec![Some(3), None]]);
}

#[test]
fn test_chunk_pages_sizes_and_recovery() {
    for rows_per_page in 1..=5 {
        for len in 1..=40 {
            let input: Vec<usize> = (0..len).collect();
            let rows = chunk_rows(input.iter().copied().map(Some), 3);
            let pages = chunk_pages(rows.clone(), rows_per_page);

            assert!(pages.iter().all(|page| page.len() == rows_per_page));
            assert_eq!(pages.len(), rows.len().div_ceil(rows_per_page));

            let recovered: Vec<Row<usize>> = pages
                .into_iter()
                .flatten()
                .filter(|row| row.iter().any(Option::is_some))
                .collect();
            assert_eq!(recovered, rows);
        }
    }
}

#[test]
fn test_chunk_pages_padding_rows_match_width() {
    let rows = chunk_rows((0..4).map(Some), 4);
    let pages = chunk_pages(rows, 3);

    assert_eq!(pages[0][1], vec![None; 4]);
    assert_eq!(pages[0][2], vec![None; 4]);
}

#[test]
fn test_flip_backs_is_involution() {
    for len in 0..=20 {
        let pages = paginate(0..len, GridSpec { columns: 3, rows: 2 });
        assert_eq!(flip_backs(flip_backs(pages.clone())), pages);
    }
}

#[test]
fn test_flip_backs_leaves_empty_rows_empty() {
    let pages = paginate(0..2, GridSpec { columns: 2, rows: 3 });
    let flipped = flip_backs(pages);

    assert_eq!(flipped[0][0], vec![Some(1), Some(0)]);
    assert_eq!(flipped[0][1], vec![None, None]);
    assert_eq!(flipped[0][2], vec![None, None]);
}

#[test]
fn test_align_backs_property() {
    for fronts_len in 0..=12 {
        let fronts: Vec<usize> = (0..fronts_len).collect();
        for backs_len in 0..=12 {
            let backs: Vec<usize> = (100..100 + backs_len).collect();
            let aligned = align_backs(&fronts, backs.clone());

            if backs.is_empty() {
                assert!(aligned.is_empty());
                continue;
            }

            assert_eq!(aligned.len(), fronts_len.max(backs_len));
            assert_eq!(&aligned[..backs_len], &backs[..]);
            let last = *backs.last().unwrap();
            assert!(aligned[backs_len..].iter().all(|&b| b == last));
        }
    }
}

#[test]
fn test_interleave_pairs_pages_by_sheet() {
    let grid = GridSpec { columns: 2, rows: 1 };
    let fronts = paginate(0..4, grid);
    let backs = flip_backs(paginate(10..14, grid));

    let planned = interleave(fronts, backs);
    assert_eq!(planned.len(), 4);
    for pair in planned.chunks(2) {
        assert_eq!(pair[0].side, SheetSide::Front);
        assert_eq!(pair[1].side, SheetSide::Back);
        assert_eq!(pair[0].sheet, pair[1].sheet);
    }
}

#[test]
fn test_interleave_drops_unpaired_backs() {
    let grid = GridSpec { columns: 1, rows: 1 };
    let planned = interleave(paginate(0..1, grid), paginate(10..13, grid));

    assert_eq!(planned.len(), 2);
    assert_eq!(planned[1].slots, vec![vec![Some(10)]]);
}
