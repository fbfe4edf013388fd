//! Async-friendly export facade backed by a dedicated worker thread.
//!
//! The worker thread owns the mounted surface slot and executes capture
//! commands sent from async tasks, so callers get an async interface without
//! requiring surfaces to live on the async runtime. Each `export` call is an
//! independent state machine — Validating, Capturing, Packaging, Delivering —
//! with no queuing, cancellation or in-flight suppression: triggering a PNG
//! and a PDF export concurrently is legal and each completes on its own with
//! its own notifications.

use crate::capture::{self, Bitmap};
use crate::export::{artifact_filename, deliver, ExportOutcome, Notification, NotifyHandler};
use crate::{artifact, CaptureOptions, Error, ExportConfig, ExportKind, RenderSurface, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use tokio::sync::oneshot;

enum Command {
    Mount(Box<dyn RenderSurface>, oneshot::Sender<Result<()>>),
    Unmount(oneshot::Sender<Result<()>>),
    Snapshot(CaptureOptions, oneshot::Sender<Result<Bitmap>>),
    Close(oneshot::Sender<Result<()>>),
}

/// An export studio: the user-facing handle for mounting a poster surface and
/// triggering exports.
///
/// Cheap to clone; all clones share the same worker thread, surface slot and
/// notification handler.
#[derive(Clone)]
pub struct Studio {
    cmd_tx: Sender<Command>,
    mounted: Arc<AtomicBool>,
    notifier: Arc<Mutex<Option<NotifyHandler>>>,
    config: Arc<ExportConfig>,
}

impl Studio {
    /// Create a new studio (spawns a background thread that owns the surface slot)
    pub async fn new(config: ExportConfig) -> Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx): (oneshot::Sender<Result<()>>, oneshot::Receiver<Result<()>>) =
            oneshot::channel();

        thread::spawn(move || {
            let mut slot: Option<Box<dyn RenderSurface>> = None;

            let _ = init_tx.send(Ok(()));

            // Command loop
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Mount(surface, resp) => {
                        slot = Some(surface);
                        let _ = resp.send(Ok(()));
                    }
                    Command::Unmount(resp) => {
                        slot = None;
                        let _ = resp.send(Ok(()));
                    }
                    Command::Snapshot(opts, resp) => {
                        let res = capture::capture(slot.as_deref(), &opts);
                        let _ = resp.send(res);
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(Ok(()));
                        break;
                    }
                }
            }
        });

        // Wait for the worker to report startup
        init_rx
            .await
            .map_err(|e| Error::Other(format!("Worker init canceled: {}", e)))??;

        Ok(Self {
            cmd_tx,
            mounted: Arc::new(AtomicBool::new(false)),
            notifier: Arc::new(Mutex::new(None)),
            config: Arc::new(config),
        })
    }

    /// Studio configuration
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Register a callback for user-facing notifications
    pub fn on_notify<F>(&self, cb: F)
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        if let Ok(mut guard) = self.notifier.lock() {
            *guard = Some(Arc::new(cb));
        }
    }

    /// Remove a previously registered notification callback if any
    pub fn clear_on_notify(&self) {
        if let Ok(mut guard) = self.notifier.lock() {
            *guard = None;
        }
    }

    fn notify(&self, notification: &Notification) {
        let handler = self.notifier.lock().ok().and_then(|g| g.clone());
        if let Some(cb) = handler {
            cb(notification);
        }
    }

    /// Mount a surface into the studio's slot (the preview became visible)
    pub async fn mount(&self, surface: Box<dyn RenderSurface>) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Mount(surface, tx));
        rx.await
            .map_err(|e| Error::Other(format!("Mount canceled: {}", e)))??;
        self.mounted.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Unmount the current surface (the preview went away)
    pub async fn unmount(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Unmount(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Unmount canceled: {}", e)))??;
        self.mounted.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Whether a surface is currently mounted
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Take a capture snapshot with explicit options
    pub async fn snapshot(&self, opts: CaptureOptions) -> Result<Bitmap> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Snapshot(opts, tx));
        rx.await
            .map_err(|e| Error::Other(format!("Snapshot canceled: {}", e)))?
    }

    /// Run one export of the given artifact kind to completion.
    ///
    /// Never panics and never propagates an error: every failure is caught
    /// here, logged with full detail, surfaced as a generic error
    /// notification and returned as `ExportOutcome::Failed`.
    pub async fn export(&self, kind: ExportKind) -> ExportOutcome {
        // Validating: checked synchronously before any async work so an
        // unmounted preview fails without ever invoking capture.
        if !self.is_mounted() {
            let reason = Error::SurfaceNotFound;
            log::warn!("{} export rejected: {}", kind.label(), reason);
            self.notify(&Notification::error(kind, &reason));
            return ExportOutcome::Failed { reason };
        }

        // Capturing: feedback first, since capture may take noticeable time
        self.notify(&Notification::in_progress(kind));
        let bitmap = match self.snapshot(self.config.capture_options(kind)).await {
            Ok(bitmap) => bitmap,
            Err(reason) => {
                log::error!("{} export capture failed: {}", kind.label(), reason);
                self.notify(&Notification::error(kind, &reason));
                return ExportOutcome::Failed { reason };
            }
        };

        // Packaging: synchronous and total for valid bitmaps
        let bytes = match artifact::encode(kind, &bitmap) {
            Ok(bytes) => bytes,
            Err(reason) => {
                log::error!("{} export packaging failed: {}", kind.label(), reason);
                self.notify(&Notification::error(kind, &reason));
                return ExportOutcome::Failed { reason };
            }
        };

        // Delivering: success is only reported once the file is handed off
        let filename = artifact_filename(kind);
        match deliver(&self.config.output_dir, &filename, &bytes) {
            Ok(file) => {
                log::debug!("{} export delivered to {}", kind.label(), file.display());
                self.notify(&Notification::success(kind));
                ExportOutcome::Succeeded { file }
            }
            Err(reason) => {
                log::error!("{} export delivery failed: {}", kind.label(), reason);
                self.notify(&Notification::error(kind, &reason));
                ExportOutcome::Failed { reason }
            }
        }
    }

    /// Convenience: export a PNG artifact
    pub async fn export_png(&self) -> ExportOutcome {
        self.export(ExportKind::Png).await
    }

    /// Convenience: export a PDF artifact
    pub async fn export_pdf(&self) -> ExportOutcome {
        self.export(ExportKind::Pdf).await
    }

    /// Trigger the raster and document exports concurrently.
    ///
    /// Each runs its own state machine with its own notifications; neither
    /// waits for or suppresses the other.
    pub async fn export_all(&self) -> (ExportOutcome, ExportOutcome) {
        futures::join!(self.export(ExportKind::Png), self.export(ExportKind::Pdf))
    }

    /// Shut down the background worker
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {}", e)))?
    }
}
