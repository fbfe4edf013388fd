//! Posterforge
//!
//! A poster export pipeline for Rust: capture a live poster-preview surface
//! into a bitmap at a chosen resolution scale, then package it as a PNG or as
//! a single-page PDF whose page box matches the bitmap's pixel dimensions
//! exactly.
//!
//! # Features
//!
//! - **Pixel-exact artifacts**: the PDF page is sized to the captured bitmap,
//!   never to a fixed paper size
//! - **Swappable surfaces**: any rendering backend can plug in behind the
//!   [`RenderSurface`] trait; a poster template backend ships by default
//! - **Async facade**: exports run on a dedicated worker thread with
//!   in-progress/success/error notifications
//!
//! # Example
//!
//! ```no_run
//! use posterforge::{ExportConfig, ExportKind, PosterData, Studio, TemplateVariant};
//!
//! # async fn run() -> posterforge::Result<()> {
//! let studio = Studio::new(ExportConfig::default()).await?;
//! let data = PosterData {
//!     title: Some("From AI Agents to Agentic AI".to_string()),
//!     venue: Some("A 423".to_string()),
//!     ..Default::default()
//! };
//! studio.mount(posterforge::new_poster_surface(TemplateVariant::Classic, data)).await?;
//! let outcome = studio.export(ExportKind::Png).await;
//! println!("export finished: {:?}", outcome);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod capture;
pub use capture::Bitmap;

// Poster template backend (the default RenderSurface implementation)
pub mod template;
pub use template::{PosterSurface, TemplateVariant};

// Artifact packaging (PNG and single-page PDF)
pub mod artifact;
pub use artifact::ExportKind;

// Orchestration plumbing: notifications, filenames, delivery
pub mod export;
pub use export::{ExportOutcome, Notification, NotificationKind, NotifyHandler};

// Async-friendly export facade (worker-backed)
pub mod session;
pub use session::Studio;

/// An RGB color used for background fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Logical surface dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

/// Options applied to a single surface capture
///
/// `scale` multiplies both logical dimensions for the output resolution and
/// must be at least 1. `logging` only raises diagnostic verbosity and has no
/// functional effect on the captured bitmap.
///
/// # Examples
///
/// ```
/// let opts = posterforge::CaptureOptions::default();
/// assert_eq!(opts.scale, 2);
/// assert!(opts.allow_cross_origin);
/// ```
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    /// Fallback fill for regions without an explicit opaque background
    pub background: Color,
    /// Integer resolution multiplier applied to both dimensions
    pub scale: u32,
    /// Whether externally-hosted photos may be fetched during capture
    pub allow_cross_origin: bool,
    /// Emit per-capture debug diagnostics
    pub logging: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            scale: 2,
            allow_cross_origin: true,
            logging: false,
        }
    }
}

/// Configuration for a [`Studio`]
///
/// Per-kind capture options derive from this: raster exports use
/// `raster_scale` (lower, balancing fidelity and file size) and document
/// exports use `document_scale` (higher, since print fidelity matters more).
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Background fill for captured bitmaps
    pub background: Color,
    /// Capture scale for PNG artifacts
    pub raster_scale: u32,
    /// Capture scale for PDF artifacts
    pub document_scale: u32,
    /// Whether remote photos may be fetched during capture
    pub allow_cross_origin: bool,
    /// Emit per-capture debug diagnostics
    pub logging: bool,
    /// Directory artifacts are delivered into
    pub output_dir: std::path::PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            raster_scale: 2,
            document_scale: 3,
            allow_cross_origin: true,
            logging: false,
            output_dir: std::path::PathBuf::from("."),
        }
    }
}

impl ExportConfig {
    /// Capture options for one artifact kind
    pub fn capture_options(&self, kind: ExportKind) -> CaptureOptions {
        CaptureOptions {
            background: self.background,
            scale: match kind {
                ExportKind::Png => self.raster_scale,
                ExportKind::Pdf => self.document_scale,
            },
            allow_cross_origin: self.allow_cross_origin,
            logging: self.logging,
        }
    }
}

/// The document state driving a poster's visual content
///
/// Owned by the form collaborator; the export pipeline only ever reads it.
/// `image` holds the resource person's photo as a `data:` URI or, with the
/// `remote-images` feature, an http(s) URL.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct PosterData {
    pub title: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub venue: Option<String>,
    pub resource_person_name: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
    pub specialization: Option<String>,
    pub image: Option<String>,
}

impl PosterData {
    /// Parse document state handed over by the form collaborator as JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::ConfigError(format!("invalid poster data: {}", e)))
    }
}

/// Core trait for capturable surfaces
///
/// A surface is an opaque visual node with fixed logical dimensions. The one
/// capability the pipeline needs from it is rendering its current visual
/// state into a bitmap at an integer scale over a background fill. Backends
/// are handed to a worker thread, hence `Send`.
pub trait RenderSurface: Send {
    /// Logical dimensions of the surface
    fn size(&self) -> SurfaceSize;

    /// Render the surface's current visual state into a bitmap of exactly
    /// `size * opts.scale` pixels
    fn render_to_bitmap(&self, opts: &CaptureOptions) -> Result<Bitmap>;
}

/// Create a poster surface for the given template variant and document state
pub fn new_poster_surface(variant: TemplateVariant, data: PosterData) -> Box<dyn RenderSurface> {
    Box::new(PosterSurface::new(variant, data))
}
