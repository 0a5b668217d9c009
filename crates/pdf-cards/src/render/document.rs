//! Output document assembly

use super::xobject::ImageCache;
use super::page::{RenderSettings, render_card_page};
use crate::types::{PageGeometry, PlannedPage, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::PathBuf;

/// An output document being built page by page.
///
/// Pages are appended strictly in the order they are added.
pub struct SheetDocument {
    output: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
    images: ImageCache,
    geometry: PageGeometry,
    settings: RenderSettings,
}

impl SheetDocument {
    pub fn new(geometry: PageGeometry, settings: RenderSettings) -> Self {
        let mut output = Document::with_version("1.7");
        let pages_tree_id = output.new_object_id();
        Self {
            output,
            pages_tree_id,
            page_refs: Vec::new(),
            images: ImageCache::new(),
            geometry,
            settings,
        }
    }

    /// Render a planned page and append it
    pub fn add_page(&mut self, page: &PlannedPage<PathBuf>) -> Result<ObjectId> {
        let page_id = render_card_page(
            &mut self.output,
            &mut self.images,
            &page.slots,
            &self.geometry,
            &self.settings,
            self.pages_tree_id,
        )?;
        self.page_refs.push(Object::Reference(page_id));
        Ok(page_id)
    }

    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    /// Distinct image files embedded so far
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Write the page tree and catalog
    pub fn finish(self) -> Document {
        let Self {
            mut output,
            pages_tree_id,
            page_refs,
            ..
        } = self;

        let count = page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        output
            .objects
            .insert(pages_tree_id, Object::Dictionary(pages_dict));

        let catalog_id = output.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_tree_id)),
        ]));

        output.trailer.set("Root", catalog_id);

        output
    }
}
