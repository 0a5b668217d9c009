//! Card sheet page rendering
//!
//! Layout works in top-left page coordinates; PDF user space has its origin
//! at the bottom-left, so every y value is flipped here.

use super::xobject::{ImageCache, ImageXObject};
use crate::constants::GUIDE_LINE_WIDTH;
use crate::layout::{CardRect, GuidePolicy, LineSegment, Page, draw_guides, place};
use crate::options::ScalingMode;
use crate::types::{PageGeometry, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::path::PathBuf;

/// Per-page rendering switches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub scaling: ScalingMode,
    pub guides: bool,
    pub guide_policy: GuidePolicy,
}

/// Render one page of cards and add it to `output`.
///
/// Each card's image is drawn first, then its guides as one stroke batch,
/// before the next card.
pub fn render_card_page(
    output: &mut Document,
    images: &mut ImageCache,
    slots: &Page<PathBuf>,
    geometry: &PageGeometry,
    settings: &RenderSettings,
    parent_pages_id: ObjectId,
) -> Result<ObjectId> {
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(geometry.width),
            Object::Real(geometry.height),
        ]),
    );

    let mut content_ops = Vec::new();
    let mut xobjects = Dictionary::new();

    for card in place(slots, geometry) {
        let image = images.get_or_embed(output, &card.image)?;
        xobjects.set(image.name.as_bytes(), Object::Reference(image.id));

        let target = image_rect(&card.rect, &image, settings.scaling);
        content_ops.push(generate_image_command(&image.name, &target, geometry.height));

        if settings.guides {
            let edges = settings
                .guide_policy
                .edges(&geometry.grid, card.position, &card.rect);
            let lines = draw_guides(&card.rect, edges, geometry.width, geometry.height);
            content_ops.push(generate_guide_strokes(&lines, geometry.height));
        }
    }

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = content_ops.join("");
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Where the image is drawn inside its card cell.
pub fn image_rect(cell: &CardRect, image: &ImageXObject, scaling: ScalingMode) -> CardRect {
    match scaling {
        ScalingMode::Stretch => *cell,
        ScalingMode::Fit => {
            if image.width == 0 || image.height == 0 {
                return *cell;
            }
            let scale = (cell.width() / image.width as f32).min(cell.height() / image.height as f32);
            let width = image.width as f32 * scale;
            let height = image.height as f32 * scale;
            let x0 = cell.x0 + (cell.width() - width) / 2.0;
            let y0 = cell.y0 + (cell.height() - height) / 2.0;
            CardRect::new(x0, y0, x0 + width, y0 + height)
        }
    }
}

/// Content stream command drawing an image XObject into `rect`.
fn generate_image_command(name: &str, rect: &CardRect, page_height: f32) -> String {
    format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        rect.width(),
        rect.height(),
        rect.x0,
        page_height - rect.y1,
        name
    )
}

/// One stroke batch for a card's guides.
fn generate_guide_strokes(lines: &[LineSegment], page_height: f32) -> String {
    let mut ops = String::new();

    ops.push_str("q\n");
    ops.push_str("0 0 0 RG\n");
    ops.push_str(&format!("{} w\n", GUIDE_LINE_WIDTH));
    ops.push_str("[] 0 d\n");

    for line in lines {
        ops.push_str(&format!(
            "{} {} m {} {} l\n",
            line.start.x,
            page_height - line.start.y,
            line.end.x,
            page_height - line.end.y
        ));
    }
    ops.push_str("S\n");

    ops.push_str("Q\n");
    ops
}
