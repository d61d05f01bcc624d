//! Export pipeline: render surface → raster capture → paginated PDF.
//!
//! The captured image is scaled to the page width and treated as one tall
//! strip. Page `k` draws the whole image again, shifted up by `k` page
//! heights, so each page shows the next vertical slice.
//!
//! - `raster`: surface capture into RGBA pixels
//! - `pdf`: paged document seam and the lopdf writer
//! - `error`: export error types

mod error;
mod pdf;
mod raster;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::ui::RenderSurface;

pub use error::ExportError;
pub use pdf::{
    DocumentFactory, ImageRef, PageDocument, PdfDocument, PdfFactory, Placement, A4_HEIGHT_PT,
    A4_WIDTH_PT,
};
pub use raster::{
    rasterize, to_rgb, BufferRasterizer, CaptureOptions, RasterCapture, RasterImage, CELL_HEIGHT,
    CELL_WIDTH,
};

/// File name used when none is configured
pub const DEFAULT_FILENAME: &str = "AI-PM-Plan.pdf";

/// What an export call did
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// Document written
    Saved { path: PathBuf, pages: usize },
    /// No render surface was mounted; nothing captured, nothing written
    Skipped,
    /// Another export was still running
    Busy,
}

/// Vertical offsets of the image on each page, first page first.
///
/// One offset per page: `0`, then one page height further up for every
/// page while image height remains unshown.
pub fn paginate(image_height: f32, page_height: f32) -> Vec<f32> {
    let mut offsets = vec![0.0];
    if page_height <= 0.0 {
        return offsets;
    }

    let mut position = 0.0;
    let mut height_left = image_height - page_height;
    while height_left > 0.0 {
        position -= page_height;
        offsets.push(position);
        height_left -= page_height;
    }
    offsets
}

/// Lay `image` out across pages of `doc` and save it to `path`.
///
/// Returns the number of pages written.
pub fn write_document(
    doc: &mut dyn PageDocument,
    image: &RasterImage,
    path: &Path,
) -> Result<usize, ExportError> {
    if image.width == 0 || image.height == 0 {
        return Err(ExportError::Capture("captured image is empty".to_string()));
    }

    let page_width = doc.page_width();
    let page_height = doc.page_height();
    let image_width = page_width;
    let image_height = image.height as f32 * (image_width / image.width as f32);

    let handle = doc.embed_image(image)?;
    let offsets = paginate(image_height, page_height);

    for (i, offset) in offsets.iter().enumerate() {
        if i > 0 {
            doc.add_page();
        }
        doc.add_image(
            handle,
            Placement {
                x: 0.0,
                y: *offset,
                width: image_width,
                height: image_height,
            },
        )?;
    }

    let pages = doc.page_count();
    doc.save(path)?;
    Ok(pages)
}

/// Held while an export runs; clears the in-flight flag when dropped
struct ExportPermit {
    flag: Arc<AtomicBool>,
}

impl ExportPermit {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for ExportPermit {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Capture-then-save pipeline with at most one run in flight
#[derive(Clone)]
pub struct ExportPipeline {
    capture: Arc<dyn RasterCapture>,
    documents: Arc<dyn DocumentFactory>,
    options: CaptureOptions,
    output_dir: PathBuf,
    in_flight: Arc<AtomicBool>,
}

impl ExportPipeline {
    pub fn new(
        capture: Arc<dyn RasterCapture>,
        documents: Arc<dyn DocumentFactory>,
        options: CaptureOptions,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            capture,
            documents,
            options,
            output_dir,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Pipeline writing A4 PDFs from the buffer rasterizer
    pub fn pdf(options: CaptureOptions, output_dir: PathBuf) -> Self {
        Self::new(
            Arc::new(BufferRasterizer),
            Arc::new(PdfFactory),
            options,
            output_dir,
        )
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Capture `surface` and write it as `filename` inside the output dir.
    ///
    /// A missing surface is a no-op. The in-flight guard is released on
    /// every exit path.
    pub async fn export(
        &self,
        surface: Option<RenderSurface>,
        filename: &str,
    ) -> Result<ExportOutcome, ExportError> {
        let Some(surface) = surface else {
            debug!("export skipped: no render surface mounted");
            return Ok(ExportOutcome::Skipped);
        };
        let Some(_permit) = ExportPermit::acquire(&self.in_flight) else {
            debug!("export ignored: another export is in flight");
            return Ok(ExportOutcome::Busy);
        };

        let capture = Arc::clone(&self.capture);
        let options = self.options;
        let image = tokio::task::spawn_blocking(move || capture.capture(&surface, options))
            .await
            .map_err(|e| ExportError::Task(e.to_string()))??;
        debug!(width = image.width, height = image.height, "surface captured");

        let path = self.output_dir.join(filename);
        let documents = Arc::clone(&self.documents);
        let target = path.clone();
        let pages = tokio::task::spawn_blocking(move || {
            let mut doc = documents.create();
            write_document(doc.as_mut(), &image, &target)
        })
        .await
        .map_err(|e| ExportError::Task(e.to_string()))??;

        info!(path = %path.display(), pages, "export saved");
        Ok(ExportOutcome::Saved { path, pages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_paginate_exact_single_page() {
        assert_eq!(paginate(A4_HEIGHT_PT, A4_HEIGHT_PT), vec![0.0]);
    }

    #[test]
    fn test_paginate_short_image() {
        assert_eq!(paginate(100.0, A4_HEIGHT_PT), vec![0.0]);
    }

    #[test]
    fn test_paginate_two_point_three_pages() {
        let offsets = paginate(2.3 * A4_HEIGHT_PT, A4_HEIGHT_PT);
        assert_eq!(offsets.len(), 3);
        assert_eq!(offsets[0], 0.0);
        assert!((offsets[1] + A4_HEIGHT_PT).abs() < 0.01);
        assert!((offsets[2] + 2.0 * A4_HEIGHT_PT).abs() < 0.01);
    }

    #[test]
    fn test_paginate_exact_two_pages() {
        assert_eq!(paginate(400.0, 200.0), vec![0.0, -200.0]);
    }

    #[test]
    fn test_paginate_degenerate_page() {
        assert_eq!(paginate(500.0, 0.0), vec![0.0]);
    }

    #[test]
    fn test_permit_released_on_drop() {
        let flag = Arc::new(AtomicBool::new(false));
        let permit = ExportPermit::acquire(&flag).unwrap();
        assert!(ExportPermit::acquire(&flag).is_none());
        drop(permit);
        assert!(ExportPermit::acquire(&flag).is_some());
    }

    #[tokio::test]
    async fn test_export_without_surface_writes_nothing() {
        let dir = tempdir().unwrap();
        let pipeline = ExportPipeline::pdf(CaptureOptions::default(), dir.path().to_path_buf());
        let outcome = pipeline.export(None, DEFAULT_FILENAME).await.unwrap();
        assert_eq!(outcome, ExportOutcome::Skipped);
        assert!(!dir.path().join(DEFAULT_FILENAME).exists());
    }

    #[tokio::test]
    async fn test_export_pre_generation_surface() {
        let dir = tempdir().unwrap();
        let pipeline = ExportPipeline::pdf(CaptureOptions::default(), dir.path().to_path_buf());
        let surface = crate::ui::surface::build(None, 60);
        let outcome = pipeline
            .export(Some(surface), DEFAULT_FILENAME)
            .await
            .unwrap();
        let path = dir.path().join(DEFAULT_FILENAME);
        assert_eq!(outcome, ExportOutcome::Saved { path: path.clone(), pages: 1 });
        assert!(path.exists());
        assert!(!pipeline.is_busy());
    }

    #[tokio::test]
    async fn test_concurrent_export_reports_busy() {
        let dir = tempdir().unwrap();
        let pipeline = ExportPipeline::pdf(CaptureOptions::default(), dir.path().to_path_buf());
        let running = ExportPermit::acquire(&pipeline.in_flight).unwrap();

        let surface = crate::ui::surface::build(None, 40);
        let outcome = pipeline
            .export(Some(surface.clone()), DEFAULT_FILENAME)
            .await
            .unwrap();
        assert_eq!(outcome, ExportOutcome::Busy);
        assert!(!dir.path().join(DEFAULT_FILENAME).exists());
        // The refused call must not clear the running export's flag
        assert!(pipeline.is_busy());

        drop(running);
        let outcome = pipeline.export(Some(surface), DEFAULT_FILENAME).await.unwrap();
        assert!(matches!(outcome, ExportOutcome::Saved { pages: 1, .. }));
    }

    #[tokio::test]
    async fn test_failed_export_releases_guard() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let pipeline = ExportPipeline::pdf(CaptureOptions::default(), missing);
        let surface = crate::ui::surface::build(None, 40);
        let result = pipeline.export(Some(surface), DEFAULT_FILENAME).await;
        assert!(result.is_err());
        assert!(!pipeline.is_busy());
    }
}
