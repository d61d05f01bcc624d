//! End-to-end flow: form edits through the reducer, export effect through the
//! pipeline, pagination observed on a recording document.

use std::path::Path;
use std::sync::{Arc, Mutex};

use pm_assistant::app::{Action, App, Effect};
use pm_assistant::export::{
    write_document, CaptureOptions, DocumentFactory, ExportError, ExportOutcome, ExportPipeline,
    ImageRef, PageDocument, Placement, RasterCapture, RasterImage, DEFAULT_FILENAME,
};
use pm_assistant::models::{ExportState, FormField, FormState};
use pm_assistant::ui::{surface, RenderSurface};
use tempfile::tempdir;

/// What a recording document saw
#[derive(Debug, Default)]
struct Recorded {
    embedded: usize,
    // (page index, placement) for every draw
    draws: Vec<(usize, Placement)>,
    saved: bool,
}

struct RecordingDocument {
    width: f32,
    height: f32,
    pages: usize,
    log: Arc<Mutex<Recorded>>,
}

impl PageDocument for RecordingDocument {
    fn page_width(&self) -> f32 {
        self.width
    }

    fn page_height(&self) -> f32 {
        self.height
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn embed_image(&mut self, _image: &RasterImage) -> Result<ImageRef, ExportError> {
        let mut log = self.log.lock().unwrap();
        log.embedded += 1;
        Ok(ImageRef(log.embedded - 1))
    }

    fn add_image(&mut self, _image: ImageRef, placement: Placement) -> Result<(), ExportError> {
        self.log.lock().unwrap().draws.push((self.pages - 1, placement));
        Ok(())
    }

    fn add_page(&mut self) {
        self.pages += 1;
    }

    fn save(&mut self, _path: &Path) -> Result<(), ExportError> {
        self.log.lock().unwrap().saved = true;
        Ok(())
    }
}

struct RecordingFactory {
    log: Arc<Mutex<Recorded>>,
}

impl DocumentFactory for RecordingFactory {
    fn create(&self) -> Box<dyn PageDocument> {
        Box::new(RecordingDocument {
            width: 100.0,
            height: 200.0,
            pages: 1,
            log: Arc::clone(&self.log),
        })
    }
}

/// Capture that ignores the surface and returns an image of a fixed size
struct FixedCapture {
    width: u32,
    height: u32,
}

impl RasterCapture for FixedCapture {
    fn capture(
        &self,
        _surface: &RenderSurface,
        _options: CaptureOptions,
    ) -> Result<RasterImage, ExportError> {
        Ok(RasterImage::filled(self.width, self.height, [255, 255, 255, 255]))
    }
}

fn recording_document(log: &Arc<Mutex<Recorded>>) -> RecordingDocument {
    RecordingDocument {
        width: 100.0,
        height: 200.0,
        pages: 1,
        log: Arc::clone(log),
    }
}

#[test]
fn test_tall_image_spans_three_pages_with_distinct_offsets() {
    let log = Arc::new(Mutex::new(Recorded::default()));
    let mut doc = recording_document(&log);
    let image = RasterImage::filled(100, 460, [0, 0, 0, 255]);

    let pages = write_document(&mut doc, &image, Path::new("unused.pdf")).unwrap();
    assert_eq!(pages, 3);

    let log = log.lock().unwrap();
    assert_eq!(log.embedded, 1);
    assert!(log.saved);
    let placements: Vec<(usize, f32)> = log.draws.iter().map(|(p, pl)| (*p, pl.y)).collect();
    assert_eq!(placements, vec![(0, 0.0), (1, -200.0), (2, -400.0)]);
    for (_, placement) in &log.draws {
        assert_eq!(placement.width, 100.0);
        assert_eq!(placement.height, 460.0);
    }
}

#[test]
fn test_image_exactly_one_page_tall() {
    let log = Arc::new(Mutex::new(Recorded::default()));
    let mut doc = recording_document(&log);
    let image = RasterImage::filled(50, 100, [0, 0, 0, 255]);

    // Scaled to the page width of 100, the image is 200 tall
    let pages = write_document(&mut doc, &image, Path::new("unused.pdf")).unwrap();
    assert_eq!(pages, 1);
    assert_eq!(log.lock().unwrap().draws.len(), 1);
}

#[tokio::test]
async fn test_export_effect_runs_through_pipeline() {
    let log = Arc::new(Mutex::new(Recorded::default()));
    let pipeline = ExportPipeline::new(
        Arc::new(FixedCapture {
            width: 100,
            height: 300,
        }),
        Arc::new(RecordingFactory {
            log: Arc::clone(&log),
        }),
        CaptureOptions::default(),
        tempdir().unwrap().path().to_path_buf(),
    );

    let mut app = App::new(FormState::example(), DEFAULT_FILENAME);
    app.update(Action::Generate);
    let plan = app.plan.clone();
    app.mount_surface(surface::build(plan.as_ref(), 80));

    let Some(Effect::Export { surface, filename }) = app.update(Action::Export) else {
        panic!("export effect expected");
    };
    assert_eq!(app.export_state, ExportState::InFlight);
    // A second trigger while in flight does nothing
    assert!(app.update(Action::Export).is_none());

    let result = pipeline
        .export(surface, &filename)
        .await
        .map_err(|e| e.to_string());
    assert!(matches!(result, Ok(ExportOutcome::Saved { pages: 2, .. })));

    app.update(Action::ExportFinished(result));
    assert_eq!(app.export_state, ExportState::Idle);
    assert!(app.status.as_ref().unwrap().text.contains("2 pages"));
    assert!(log.lock().unwrap().saved);
}

#[tokio::test]
async fn test_export_before_first_draw_is_a_silent_no_op() {
    let log = Arc::new(Mutex::new(Recorded::default()));
    let pipeline = ExportPipeline::new(
        Arc::new(FixedCapture {
            width: 10,
            height: 10,
        }),
        Arc::new(RecordingFactory {
            log: Arc::clone(&log),
        }),
        CaptureOptions::default(),
        tempdir().unwrap().path().to_path_buf(),
    );

    let mut app = App::new(FormState::default(), DEFAULT_FILENAME);
    let Some(Effect::Export { surface, filename }) = app.update(Action::Export) else {
        panic!("export effect expected");
    };
    assert!(surface.is_none());

    let result = pipeline.export(surface, &filename).await.map_err(|e| e.to_string());
    assert_eq!(result, Ok(ExportOutcome::Skipped));
    app.update(Action::ExportFinished(result));

    assert_eq!(app.export_state, ExportState::Idle);
    assert!(app.status.is_none());
    let log = log.lock().unwrap();
    assert_eq!(log.embedded, 0);
    assert!(!log.saved);
}

#[test]
fn test_plan_is_a_snapshot_of_the_form() {
    let mut app = App::new(FormState::default(), DEFAULT_FILENAME);
    app.focus = FormField::ProjectName;
    for c in "Ledger".chars() {
        app.update(Action::InsertChar(c));
    }
    app.update(Action::Generate);
    app.update(Action::InsertChar('X'));

    let plan = app.plan.as_ref().unwrap();
    assert_eq!(plan.overview.project_name, "Ledger");
    assert_eq!(app.form.project_name, "LedgerX");
    assert_eq!(plan.timeline.len(), 4);
    assert_eq!(plan.sections.len(), 5);
}
