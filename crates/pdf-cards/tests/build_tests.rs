use image::{Rgb, RgbImage};
use lopdf::Document;
use pdf_cards::*;
use std::path::{Path, PathBuf};

fn write_png(path: &Path, shade: u8) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbImage::from_pixel(6, 8, Rgb([shade, 255 - shade, 128]))
        .save(path)
        .unwrap();
}

/// Create `<root>/<name>/front/NN.png` and `<root>/<name>/back/NN.png`
fn make_deck(root: &Path, name: &str, fronts: usize, backs: usize) -> PathBuf {
    let deck_dir = root.join(name);
    for i in 0..fronts {
        write_png(&deck_dir.join("front").join(format!("{i:02}.png")), i as u8);
    }
    for i in 0..backs {
        write_png(&deck_dir.join("back").join(format!("{i:02}.png")), 200 + i as u8);
    }
    deck_dir
}

fn options_for(root: &Path) -> BuildOptions {
    BuildOptions {
        input_root: root.join("input"),
        output_root: root.join("output"),
        ..Default::default()
    }
}

/// Decoded content stream of every page, in page order
fn page_contents(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .values()
        .map(|&id| String::from_utf8_lossy(&doc.get_page_content(id).unwrap()).into_owned())
        .collect()
}

fn count_images(content: &str) -> usize {
    content.matches(" Do").count()
}

fn count_strokes(content: &str) -> usize {
    content.matches(" l\n").count()
}

#[tokio::test]
async fn test_build_single_sided_deck() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_for(dir.path());
    let deck_dir = make_deck(&options.input_root, "goblins", 16, 0);
    tokio::fs::create_dir_all(&options.output_root).await.unwrap();

    let report = build_deck(&deck_dir, &options).await.unwrap();

    assert_eq!(report.name, "goblins");
    assert_eq!(report.pages, 2);
    assert_eq!(report.images, 16);
    assert_eq!(report.output, options.output_root.join("goblins.pdf"));

    let doc = Document::load(&report.output).unwrap();
    let contents = page_contents(&doc);
    assert_eq!(contents.len(), 2);
    assert_eq!(count_images(&contents[0]), 15);
    assert_eq!(count_images(&contents[1]), 1);

    // The lone card of page two sits in the top-left corner of the grid
    assert_eq!(count_strokes(&contents[1]), 8 + 2 + 2);
}

#[tokio::test]
async fn test_build_page_size() {
    let dir = tempfile::tempdir().unwrap();
    let options = BuildOptions {
        paper: PaperSize::Letter,
        ..options_for(dir.path())
    };
    let deck_dir = make_deck(&options.input_root, "letters", 1, 0);
    tokio::fs::create_dir_all(&options.output_root).await.unwrap();

    let report = build_deck(&deck_dir, &options).await.unwrap();
    let doc = Document::load(&report.output).unwrap();
    let page_id = *doc.get_pages().values().next().unwrap();
    let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
    let media_box: Vec<f32> = page
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_float().unwrap())
        .collect();

    assert_eq!(media_box, vec![0.0, 0.0, 612.0, 792.0]);
}

#[tokio::test]
async fn test_build_duplex_deck() {
    let dir = tempfile::tempdir().unwrap();
    let options = BuildOptions {
        grid: GridSpec::new(2, 2).unwrap(),
        ..options_for(dir.path())
    };
    let deck_dir = make_deck(&options.input_root, "spells", 4, 2);
    tokio::fs::create_dir_all(&options.output_root).await.unwrap();

    let report = build_deck(&deck_dir, &options).await.unwrap();

    assert_eq!(report.pages, 2);
    // Each distinct file is embedded once, however often it is drawn
    assert_eq!(report.images, 6);

    let doc = Document::load(&report.output).unwrap();
    let contents = page_contents(&doc);
    assert_eq!(count_images(&contents[0]), 4);
    assert_eq!(count_images(&contents[1]), 4);
}

#[tokio::test]
async fn test_build_without_guides() {
    let dir = tempfile::tempdir().unwrap();
    let options = BuildOptions {
        guides: false,
        ..options_for(dir.path())
    };
    let deck_dir = make_deck(&options.input_root, "plain", 3, 0);
    tokio::fs::create_dir_all(&options.output_root).await.unwrap();

    let report = build_deck(&deck_dir, &options).await.unwrap();
    let doc = Document::load(&report.output).unwrap();
    let contents = page_contents(&doc);

    assert_eq!(count_images(&contents[0]), 3);
    assert_eq!(count_strokes(&contents[0]), 0);
}

#[tokio::test]
async fn test_build_applies_repeat_counts() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_for(dir.path());
    let deck_dir = make_deck(&options.input_root, "tokens", 2, 0);
    tokio::fs::write(deck_dir.join("tokens.json"), r#"{ "01.PNG": 20 }"#)
        .await
        .unwrap();
    tokio::fs::create_dir_all(&options.output_root).await.unwrap();

    let report = build_deck(&deck_dir, &options).await.unwrap();

    assert_eq!(report.images, 2);
    assert_eq!(report.pages, 2);
    let doc = Document::load(&report.output).unwrap();
    let contents = page_contents(&doc);
    assert_eq!(count_images(&contents[0]), 15);
    assert_eq!(count_images(&contents[1]), 6);
}

#[tokio::test]
async fn test_build_jpeg_fronts() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_for(dir.path());
    let front = options.input_root.join("photos").join("front").join("cat.jpg");
    std::fs::create_dir_all(front.parent().unwrap()).unwrap();
    RgbImage::from_pixel(16, 16, Rgb([90, 90, 90])).save(&front).unwrap();
    tokio::fs::create_dir_all(&options.output_root).await.unwrap();

    let report = build_deck(options.input_root.join("photos"), &options)
        .await
        .unwrap();
    assert_eq!(report.pages, 1);
    assert_eq!(report.images, 1);
}

#[tokio::test]
async fn test_build_empty_deck() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_for(dir.path());
    let deck_dir = options.input_root.join("empty");
    tokio::fs::create_dir_all(deck_dir.join("front")).await.unwrap();

    let result = build_deck(&deck_dir, &options).await;
    assert!(matches!(result, Err(CardsError::EmptyDeck(name)) if name == "empty"));
}

#[tokio::test]
async fn test_build_all_isolates_failures() {
    let dir = tempfile::tempdir().unwrap();
    let options = BuildOptions {
        output_root: dir.path().join("nested").join("output"),
        ..options_for(dir.path())
    };

    make_deck(&options.input_root, "good", 3, 1);

    let corrupt = options.input_root.join("corrupt").join("front").join("00.png");
    std::fs::create_dir_all(corrupt.parent().unwrap()).unwrap();
    std::fs::write(&corrupt, b"definitely not an image").unwrap();

    make_deck(&options.input_root, "no-fronts", 0, 2);

    let report = build_all(&options).await.unwrap();

    assert_eq!(report.total(), 3);
    assert!(!report.is_success());

    assert_eq!(report.succeeded.len(), 1);
    assert_eq!(report.succeeded[0].name, "good");
    assert!(options.output_root.join("good.pdf").exists());

    let failed: Vec<&str> = report.failed.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(failed, vec!["corrupt", "no-fronts"]);
    assert!(matches!(report.failed[0].error, CardsError::Image { .. }));
    assert!(matches!(report.failed[1].error, CardsError::MissingFrontDir(_)));

    assert!(!options.output_root.join("corrupt.pdf").exists());
    assert!(!options.output_root.join("no-fronts.pdf").exists());
}

#[tokio::test]
async fn test_build_all_rejects_oversized_count_per_deck() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_for(dir.path());

    let huge = make_deck(&options.input_root, "huge", 1, 0);
    tokio::fs::write(huge.join("huge.json"), r#"{ "00.png": 1000000000000000000 }"#)
        .await
        .unwrap();
    make_deck(&options.input_root, "ok", 2, 0);

    let report = build_all(&options).await.unwrap();

    assert_eq!(report.total(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].name, "huge");
    assert!(matches!(report.failed[0].error, CardsError::InvalidCount { .. }));
    assert_eq!(report.succeeded.len(), 1);
    assert_eq!(report.succeeded[0].name, "ok");
    assert!(options.output_root.join("ok.pdf").exists());
}

#[tokio::test]
async fn test_build_all_missing_input_root() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_for(dir.path());

    let result = build_all(&options).await;
    assert!(matches!(result, Err(CardsError::Io(_))));
}

#[tokio::test]
async fn test_statistics_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_for(dir.path());
    let deck_dir = make_deck(&options.input_root, "stats", 5, 1);

    let deck = Deck::load(&deck_dir).await.unwrap();
    let stats = calculate_statistics(&deck, options.grid).unwrap();

    assert_eq!(stats.front_cards, 5);
    assert_eq!(stats.back_cards, 5);
    assert_eq!(stats.sheets, 1);
    assert_eq!(stats.output_pages, 2);
    assert_eq!(stats.empty_slots, 20);
}
