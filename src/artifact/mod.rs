//! Artifact packaging: encode a captured bitmap as a standalone raster file
//! or as a single-page document sized exactly to the bitmap.

pub mod pdf;
pub mod png;

use crate::{Bitmap, Result};

/// The two artifact kinds an export can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Raster PNG at the captured pixel dimensions
    Png,
    /// Single-page PDF whose page box equals the bitmap's pixel dimensions
    Pdf,
}

impl ExportKind {
    /// File extension for delivered artifacts
    pub fn extension(self) -> &'static str {
        match self {
            ExportKind::Png => "png",
            ExportKind::Pdf => "pdf",
        }
    }

    /// MIME type of the artifact byte stream
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportKind::Png => "image/png",
            ExportKind::Pdf => "application/pdf",
        }
    }

    /// Human-readable label used in notifications
    pub fn label(self) -> &'static str {
        match self {
            ExportKind::Png => "PNG",
            ExportKind::Pdf => "PDF",
        }
    }
}

/// Encode a bitmap as the requested artifact kind
pub fn encode(kind: ExportKind, bitmap: &Bitmap) -> Result<Vec<u8>> {
    match kind {
        ExportKind::Png => png::encode(bitmap),
        ExportKind::Pdf => pdf::encode(bitmap),
    }
}
