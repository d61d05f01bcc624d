//! Paged document output.
//!
//! `PageDocument` is the seam between pagination and the file format. The
//! `PdfDocument` implementation writes A4 portrait pages in point units with
//! `lopdf`; each image is embedded once and referenced from every page that
//! draws it.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use tracing::debug;

use super::error::ExportError;
use super::raster::RasterImage;

/// A4 portrait page size in points
pub const A4_WIDTH_PT: f32 = 595.28;
pub const A4_HEIGHT_PT: f32 = 841.89;

/// Handle to an image embedded in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRef(pub usize);

/// Where an image is drawn on the current page.
///
/// `y` is measured downward from the top edge of the page; a negative `y`
/// pulls the image up so a lower slice of it shows on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A document made of equally sized pages that images can be drawn on
pub trait PageDocument: Send {
    fn page_width(&self) -> f32;
    fn page_height(&self) -> f32;
    fn page_count(&self) -> usize;
    /// Store the image once; the returned handle may be drawn many times
    fn embed_image(&mut self, image: &RasterImage) -> Result<ImageRef, ExportError>;
    /// Draw an embedded image on the current (last) page
    fn add_image(&mut self, image: ImageRef, placement: Placement) -> Result<(), ExportError>;
    /// Start a new page; later draws land on it
    fn add_page(&mut self);
    fn save(&mut self, path: &Path) -> Result<(), ExportError>;
}

/// Creates empty documents for the export pipeline
pub trait DocumentFactory: Send + Sync {
    fn create(&self) -> Box<dyn PageDocument>;
}

/// Factory for A4 portrait PDFs
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfFactory;

impl DocumentFactory for PdfFactory {
    fn create(&self) -> Box<dyn PageDocument> {
        Box::new(PdfDocument::a4_portrait())
    }
}

/// PDF writer backed by lopdf
pub struct PdfDocument {
    doc: Document,
    pages_id: ObjectId,
    width: f32,
    height: f32,
    images: Vec<ObjectId>,
    // Content operations per page; the last entry is the current page
    pages: Vec<Vec<Operation>>,
}

impl PdfDocument {
    pub fn new(width: f32, height: f32) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            width,
            height,
            images: Vec::new(),
            pages: vec![Vec::new()],
        }
    }

    pub fn a4_portrait() -> Self {
        Self::new(A4_WIDTH_PT, A4_HEIGHT_PT)
    }

    fn image_name(index: usize) -> String {
        format!("Im{}", index)
    }

    /// Assemble page objects, catalog and trailer
    fn finish(&mut self) -> Result<(), ExportError> {
        let mut xobjects = Dictionary::new();
        for (i, id) in self.images.iter().enumerate() {
            xobjects.set(Self::image_name(i), *id);
        }

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for operations in std::mem::take(&mut self.pages) {
            let content = Content { operations }.encode()?;
            let content_id = self.doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = self.doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(self.width),
                    Object::Real(self.height),
                ],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "XObject" => xobjects.clone(),
                },
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.compress();
        Ok(())
    }
}

impl PageDocument for PdfDocument {
    fn page_width(&self) -> f32 {
        self.width
    }

    fn page_height(&self) -> f32 {
        self.height
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn embed_image(&mut self, image: &RasterImage) -> Result<ImageRef, ExportError> {
        let width = image.width as i64;
        let height = image.height as i64;
        let mut info = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width,
            "Height" => height,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        };

        if image.has_transparency() {
            let mask = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => width,
                    "Height" => height,
                    "ColorSpace" => "DeviceGray",
                    "BitsPerComponent" => 8,
                },
                image.alpha_bytes(),
            );
            let mask_id = self.doc.add_object(mask);
            info.set("SMask", mask_id);
        }

        let id = self.doc.add_object(Stream::new(info, image.rgb_bytes()));
        self.images.push(id);
        debug!(width, height, "embedded image");
        Ok(ImageRef(self.images.len() - 1))
    }

    fn add_image(&mut self, image: ImageRef, placement: Placement) -> Result<(), ExportError> {
        if image.0 >= self.images.len() {
            return Err(ExportError::UnknownImage(image.0));
        }
        // PDF space grows upward from the bottom-left corner
        let bottom = self.height - placement.y - placement.height;
        let page = self
            .pages
            .last_mut()
            .ok_or_else(|| ExportError::Capture("document has no pages".to_string()))?;
        page.push(Operation::new("q", vec![]));
        page.push(Operation::new(
            "cm",
            vec![
                Object::Real(placement.width),
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(placement.height),
                Object::Real(placement.x),
                Object::Real(bottom),
            ],
        ));
        page.push(Operation::new(
            "Do",
            vec![Object::Name(Self::image_name(image.0).into_bytes())],
        ));
        page.push(Operation::new("Q", vec![]));
        Ok(())
    }

    fn add_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn save(&mut self, path: &Path) -> Result<(), ExportError> {
        self.finish()?;
        self.doc.save(path)?;
        Ok(())
    }
}
