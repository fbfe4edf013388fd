//! Error types for the export pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the export pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Export was triggered while no surface is mounted
    #[error("Poster surface not found (preview not mounted)")]
    SurfaceNotFound,

    /// The render backend failed to produce a bitmap
    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    /// Artifact packaging failed. Packaging is total for valid bitmaps,
    /// so any occurrence of this is a defect rather than a user error.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// The artifact could not be written to the download directory
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Remote photo fetch failed
    #[cfg(feature = "remote-images")]
    #[error("Photo fetch failed: {0}")]
    FetchError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
