//! Image XObject creation
//!
//! Card images are embedded once per document and referenced by every
//! slot that shows them. Baseline JPEGs in RGB or grey are copied through
//! untouched; everything else is decoded and re-encoded as Flate data with
//! an optional soft mask for transparency.

use crate::types::{CardsError, Result};
use image::codecs::jpeg::JpegDecoder;
use image::{ColorType, ImageDecoder, ImageFormat};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};

const DEFLATE_LEVEL: u8 = 6;

/// An image embedded in the output document
#[derive(Debug, Clone, PartialEq)]
pub struct ImageXObject {
    pub id: ObjectId,
    /// Resource name used in content streams
    pub name: String,
    pub width: u32,
    pub height: u32,
}

/// Embeds each distinct image file once
#[derive(Debug, Default)]
pub struct ImageCache {
    images: HashMap<PathBuf, ImageXObject>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the XObject for `path`, embedding the file on first use.
    pub fn get_or_embed(&mut self, output: &mut Document, path: &Path) -> Result<ImageXObject> {
        if let Some(image) = self.images.get(path) {
            return Ok(image.clone());
        }

        let bytes = std::fs::read(path)?;
        let name = format!("Im{}", self.images.len() + 1);
        let image = embed_image(output, &bytes, name).map_err(|source| CardsError::Image {
            path: path.to_owned(),
            source,
        })?;
        log::debug!(
            "Embedded {} ({}x{}) as /{}",
            path.display(),
            image.width,
            image.height,
            image.name
        );

        self.images.insert(path.to_owned(), image.clone());
        Ok(image)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Add an image XObject built from encoded image bytes.
pub fn embed_image(
    output: &mut Document,
    bytes: &[u8],
    name: String,
) -> image::ImageResult<ImageXObject> {
    if image::guess_format(bytes).ok() == Some(ImageFormat::Jpeg) {
        if let Some(image) = embed_jpeg(output, bytes, &name) {
            return Ok(image);
        }
    }

    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

    let rgb_data: Vec<u8> = rgba
        .pixels()
        .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
        .collect();

    let mut dict = image_dict(width, height, "DeviceRGB", "FlateDecode");
    if has_alpha {
        let alpha_data: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
        let mask = Stream::new(
            image_dict(width, height, "DeviceGray", "FlateDecode"),
            miniz_oxide::deflate::compress_to_vec_zlib(&alpha_data, DEFLATE_LEVEL),
        );
        dict.set("SMask", Object::Reference(output.add_object(mask)));
    }

    let stream = Stream::new(
        dict,
        miniz_oxide::deflate::compress_to_vec_zlib(&rgb_data, DEFLATE_LEVEL),
    );
    Ok(ImageXObject {
        id: output.add_object(stream),
        name,
        width,
        height,
    })
}

/// Copy a JPEG through as DCT data when its color model maps directly
/// onto a PDF device color space.
fn embed_jpeg(output: &mut Document, bytes: &[u8], name: &str) -> Option<ImageXObject> {
    let decoder = JpegDecoder::new(Cursor::new(bytes)).ok()?;
    let (width, height) = decoder.dimensions();
    let color_space = match decoder.color_type() {
        ColorType::Rgb8 => "DeviceRGB",
        ColorType::L8 => "DeviceGray",
        _ => return None,
    };

    let stream = Stream::new(
        image_dict(width, height, color_space, "DCTDecode"),
        bytes.to_vec(),
    );
    Some(ImageXObject {
        id: output.add_object(stream),
        name: name.to_string(),
        width,
        height,
    })
}

fn image_dict(width: u32, height: u32, color_space: &str, filter: &str) -> Dictionary {
    Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Image".to_vec())),
        ("Width", Object::Integer(width as i64)),
        ("Height", Object::Integer(height as i64)),
        ("ColorSpace", Object::Name(color_space.as_bytes().to_vec())),
        ("BitsPerComponent", Object::Integer(8)),
        ("Filter", Object::Name(filter.as_bytes().to_vec())),
    ])
}
