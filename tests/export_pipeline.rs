//! Integration tests for the export state machine and notification sequences

use posterforge::{
    Bitmap, CaptureOptions, Color, Error, ExportConfig, ExportKind, NotificationKind, PosterData,
    RenderSurface, Result, Studio, SurfaceSize, TemplateVariant,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Records the notification kinds in the order they were emitted
fn recording(studio: &Studio) -> Arc<Mutex<Vec<NotificationKind>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    studio.on_notify(move |n| sink.lock().unwrap().push(n.kind));
    seen
}

/// Surface that counts render invocations
struct CountingSurface {
    size: SurfaceSize,
    renders: Arc<AtomicUsize>,
}

impl RenderSurface for CountingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn render_to_bitmap(&self, opts: &CaptureOptions) -> Result<Bitmap> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        Ok(Bitmap::filled(
            self.size.width * opts.scale,
            self.size.height * opts.scale,
            opts.background,
        ))
    }
}

/// Surface whose render always fails mid-capture
struct FailingSurface;

impl RenderSurface for FailingSurface {
    fn size(&self) -> SurfaceSize {
        SurfaceSize {
            width: 600,
            height: 800,
        }
    }

    fn render_to_bitmap(&self, _opts: &CaptureOptions) -> Result<Bitmap> {
        Err(Error::CaptureFailed("unsupported content".into()))
    }
}

fn studio_config(dir: &tempfile::TempDir) -> ExportConfig {
    ExportConfig {
        output_dir: dir.path().to_path_buf(),
        ..Default::default()
    }
}

#[tokio::test]
async fn png_export_delivers_and_notifies() {
    let dir = tempfile::tempdir().unwrap();
    let studio = Studio::new(studio_config(&dir)).await.unwrap();
    let seen = recording(&studio);

    studio
        .mount(posterforge::new_poster_surface(
            TemplateVariant::Classic,
            PosterData::default(),
        ))
        .await
        .unwrap();

    let outcome = studio.export(ExportKind::Png).await;
    let file = match outcome {
        posterforge::ExportOutcome::Succeeded { file } => file,
        other => panic!("expected success, got {:?}", other),
    };

    let name = file.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("poster-") && name.ends_with(".png"));

    // 600x800 at raster scale 2 -> 1200x1600 PNG
    let bytes = std::fs::read(&file).unwrap();
    let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    let reader = decoder.read_info().unwrap();
    assert_eq!(reader.info().width, 1200);
    assert_eq!(reader.info().height, 1600);

    assert_eq!(
        *seen.lock().unwrap(),
        vec![NotificationKind::InProgress, NotificationKind::Success]
    );
    studio.close().await.unwrap();
}

#[tokio::test]
async fn unmounted_export_fails_without_capturing() {
    let dir = tempfile::tempdir().unwrap();
    let studio = Studio::new(studio_config(&dir)).await.unwrap();
    let seen = recording(&studio);

    let renders = Arc::new(AtomicUsize::new(0));
    // A surface exists but is never mounted
    let _unused = CountingSurface {
        size: SurfaceSize {
            width: 600,
            height: 800,
        },
        renders: renders.clone(),
    };

    let outcome = studio.export(ExportKind::Png).await;
    assert!(matches!(
        outcome,
        posterforge::ExportOutcome::Failed {
            reason: Error::SurfaceNotFound
        }
    ));
    assert_eq!(renders.load(Ordering::SeqCst), 0, "capture never invoked");
    // No in-progress message is ever emitted on this path
    assert_eq!(*seen.lock().unwrap(), vec![NotificationKind::Error]);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    studio.close().await.unwrap();
}

#[tokio::test]
async fn capture_failure_notifies_after_in_progress() {
    let dir = tempfile::tempdir().unwrap();
    let studio = Studio::new(studio_config(&dir)).await.unwrap();
    let seen = recording(&studio);

    studio.mount(Box::new(FailingSurface)).await.unwrap();
    let outcome = studio.export(ExportKind::Pdf).await;

    assert!(matches!(
        outcome,
        posterforge::ExportOutcome::Failed {
            reason: Error::CaptureFailed(_)
        }
    ));
    assert_eq!(
        *seen.lock().unwrap(),
        vec![NotificationKind::InProgress, NotificationKind::Error]
    );
    // No artifact is delivered on failure
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    studio.close().await.unwrap();
}

#[tokio::test]
async fn delivery_failure_is_reported() {
    let config = ExportConfig {
        output_dir: std::path::PathBuf::from("/nonexistent/posterforge-out"),
        ..Default::default()
    };
    let studio = Studio::new(config).await.unwrap();
    let seen = recording(&studio);

    studio
        .mount(posterforge::new_poster_surface(
            TemplateVariant::Classic,
            PosterData::default(),
        ))
        .await
        .unwrap();

    let outcome = studio.export(ExportKind::Png).await;
    assert!(matches!(
        outcome,
        posterforge::ExportOutcome::Failed {
            reason: Error::DeliveryFailed(_)
        }
    ));
    assert_eq!(
        *seen.lock().unwrap(),
        vec![NotificationKind::InProgress, NotificationKind::Error]
    );
    studio.close().await.unwrap();
}

#[tokio::test]
async fn concurrent_png_and_pdf_exports_both_complete() {
    let dir = tempfile::tempdir().unwrap();
    let studio = Studio::new(studio_config(&dir)).await.unwrap();

    studio
        .mount(posterforge::new_poster_surface(
            TemplateVariant::Classic,
            PosterData::default(),
        ))
        .await
        .unwrap();

    let (png, pdf) = studio.export_all().await;
    let png_file = match png {
        posterforge::ExportOutcome::Succeeded { file } => file,
        other => panic!("png export failed: {:?}", other),
    };
    let pdf_file = match pdf {
        posterforge::ExportOutcome::Succeeded { file } => file,
        other => panic!("pdf export failed: {:?}", other),
    };

    // Same-millisecond timestamps cannot collide across kinds
    assert_ne!(png_file, pdf_file);
    assert_eq!(png_file.extension().unwrap(), "png");
    assert_eq!(pdf_file.extension().unwrap(), "pdf");
    studio.close().await.unwrap();
}

#[tokio::test]
async fn rapid_exports_have_non_decreasing_timestamps() {
    let dir = tempfile::tempdir().unwrap();
    let studio = Studio::new(studio_config(&dir)).await.unwrap();

    studio
        .mount(posterforge::new_poster_surface(
            TemplateVariant::Classic,
            PosterData::default(),
        ))
        .await
        .unwrap();

    let ts_of = |outcome: posterforge::ExportOutcome| -> u128 {
        match outcome {
            posterforge::ExportOutcome::Succeeded { file } => file
                .file_stem()
                .unwrap()
                .to_str()
                .unwrap()
                .trim_start_matches("poster-")
                .parse()
                .unwrap(),
            other => panic!("export failed: {:?}", other),
        }
    };

    let a = ts_of(studio.export(ExportKind::Png).await);
    let b = ts_of(studio.export(ExportKind::Png).await);
    assert!(b >= a);
    studio.close().await.unwrap();
}

#[tokio::test]
async fn export_after_remount_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let studio = Studio::new(studio_config(&dir)).await.unwrap();

    studio
        .mount(posterforge::new_poster_surface(
            TemplateVariant::Classic,
            PosterData::default(),
        ))
        .await
        .unwrap();
    studio.unmount().await.unwrap();
    assert!(!studio.export(ExportKind::Png).await.is_success());

    // Retrying once the preview mounts again is the recovery path
    studio
        .mount(posterforge::new_poster_surface(
            TemplateVariant::Classic,
            PosterData::default(),
        ))
        .await
        .unwrap();
    assert!(studio.export(ExportKind::Png).await.is_success());
    studio.close().await.unwrap();
}

#[tokio::test]
async fn counting_surface_renders_once_per_export() {
    let dir = tempfile::tempdir().unwrap();
    let studio = Studio::new(studio_config(&dir)).await.unwrap();

    let renders = Arc::new(AtomicUsize::new(0));
    studio
        .mount(Box::new(CountingSurface {
            size: SurfaceSize {
                width: 600,
                height: 800,
            },
            renders: renders.clone(),
        }))
        .await
        .unwrap();

    assert!(studio.export(ExportKind::Png).await.is_success());
    assert!(studio.export(ExportKind::Pdf).await.is_success());
    assert_eq!(renders.load(Ordering::SeqCst), 2);
    studio.close().await.unwrap();
}

#[tokio::test]
async fn render_failure_message_stays_out_of_notifications() {
    let dir = tempfile::tempdir().unwrap();
    let studio = Studio::new(studio_config(&dir)).await.unwrap();

    let texts = Arc::new(Mutex::new(Vec::new()));
    let sink = texts.clone();
    studio.on_notify(move |n| sink.lock().unwrap().push(n.description.clone()));

    studio.mount(Box::new(FailingSurface)).await.unwrap();
    let _ = studio.export(ExportKind::Png).await;

    // Diagnostic detail is logged for operators, not shown verbatim
    for text in texts.lock().unwrap().iter() {
        assert!(!text.contains("unsupported content"));
    }
    studio.close().await.unwrap();
}

#[test]
fn background_color_matches_config_default() {
    assert_eq!(ExportConfig::default().background, Color::rgb(255, 255, 255));
}
