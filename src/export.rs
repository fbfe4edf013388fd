//! Export orchestration plumbing: notifications, timestamped filenames and
//! artifact delivery.
//!
//! The notification channel is the sole user-visible feedback mechanism of
//! the pipeline. Every export emits an in-progress message before capture
//! begins and exactly one success or error message when it finishes; full
//! diagnostic detail goes to the log, never verbatim to the user.

use crate::{Error, ExportKind, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Kind of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    InProgress,
    Success,
    Error,
}

/// A short user-facing message with a title and description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub(crate) fn in_progress(kind: ExportKind) -> Self {
        let what = match kind {
            ExportKind::Png => "PNG image",
            ExportKind::Pdf => "PDF document",
        };
        Self {
            kind: NotificationKind::InProgress,
            title: "Generating...".to_string(),
            description: format!("Creating {}, please wait...", what),
        }
    }

    pub(crate) fn success(kind: ExportKind) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Success!".to_string(),
            description: format!("{} downloaded successfully", kind.label()),
        }
    }

    pub(crate) fn error(kind: ExportKind, err: &Error) -> Self {
        // Generic, actionable message; diagnostics stay in the log
        let description = match err {
            Error::SurfaceNotFound => "Poster preview not found".to_string(),
            _ => format!("Failed to generate {}. Please try again.", kind.label()),
        };
        Self {
            kind: NotificationKind::Error,
            title: "Error".to_string(),
            description,
        }
    }
}

/// Notification callback handler
pub type NotifyHandler = Arc<dyn Fn(&Notification) + Send + Sync>;

/// Tagged result of one export invocation, never silently dropped
#[derive(Debug)]
pub enum ExportOutcome {
    /// Artifact delivered to this path
    Succeeded { file: PathBuf },
    /// Export failed; the reason was already notified and logged
    Failed { reason: Error },
}

impl ExportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExportOutcome::Succeeded { .. })
    }
}

/// Current Unix time in milliseconds
fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Timestamped artifact filename: `poster-<epochMillis>.<ext>`.
///
/// Millisecond resolution keeps names unique across rapid repeated exports
/// within one process lifetime, and the two artifact kinds can never collide
/// because their extensions differ.
pub fn artifact_filename(kind: ExportKind) -> String {
    format!("poster-{}.{}", epoch_millis(), kind.extension())
}

/// Write artifact bytes into the download directory and return the full path
pub fn deliver(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = dir.join(filename);
    std::fs::write(&path, bytes)
        .map_err(|e| Error::DeliveryFailed(format!("write {}: {}", path.display(), e)))?;
    Ok(path)
}
