//! Photo resolution for the poster template.
//!
//! The primary input is a locally-loaded `data:` URI. Remote http(s) photos
//! are supported behind the `remote-images` feature and only fetched when the
//! capture allows cross-origin content. Every failure here degrades to "no
//! photo" (the template paints its placeholder disc) rather than aborting the
//! capture.

use crate::{Error, Result};
use base64::Engine as _;

/// Resolve an optional photo source into decoded RGBA pixels.
///
/// Returns `None` both for an absent source and for any degraded failure
/// path; failures are logged so operators can diagnose them.
pub(crate) fn resolve(source: Option<&str>, allow_cross_origin: bool) -> Option<image::RgbaImage> {
    let source = source?;

    if source.starts_with("data:") {
        return match decode_data_uri(source) {
            Ok(img) => Some(img),
            Err(e) => {
                log::warn!("photo data URI could not be decoded, region renders blank: {}", e);
                None
            }
        };
    }

    if !allow_cross_origin {
        log::warn!("cross-origin photo skipped (allow_cross_origin is off)");
        return None;
    }

    #[cfg(feature = "remote-images")]
    {
        match fetch_remote(source) {
            Ok(img) => Some(img),
            Err(e) => {
                log::warn!("remote photo could not be fetched, region renders blank: {}", e);
                None
            }
        }
    }

    #[cfg(not(feature = "remote-images"))]
    {
        log::warn!("remote photo sources require the remote-images feature, region renders blank");
        None
    }
}

/// Decode a `data:<mime>;base64,<payload>` URI into RGBA pixels
pub(crate) fn decode_data_uri(uri: &str) -> Result<image::RgbaImage> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| Error::CaptureFailed("not a data URI".into()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::CaptureFailed("data URI has no payload".into()))?;
    if !meta.ends_with(";base64") {
        return Err(Error::CaptureFailed(
            "only base64 data URIs are supported".into(),
        ));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| Error::CaptureFailed(format!("base64 decode failed: {}", e)))?;

    let img = image::load_from_memory(&bytes)
        .map_err(|e| Error::CaptureFailed(format!("image decode failed: {}", e)))?;
    Ok(img.to_rgba8())
}

/// Fetch and decode a remote photo over http(s)
#[cfg(feature = "remote-images")]
pub(crate) fn fetch_remote(source: &str) -> Result<image::RgbaImage> {
    let parsed = url::Url::parse(source)
        .map_err(|e| Error::FetchError(format!("invalid photo URL: {}", e)))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::FetchError(format!(
            "unsupported photo URL scheme: {}",
            parsed.scheme()
        )));
    }

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_millis(10_000))
        .build()
        .map_err(|e| Error::FetchError(format!("failed to build HTTP client: {}", e)))?;

    let res = client
        .get(parsed)
        .send()
        .map_err(|e| Error::FetchError(format!("HTTP GET failed: {}", e)))?;
    if !res.status().is_success() {
        return Err(Error::FetchError(format!(
            "HTTP status {} for photo",
            res.status()
        )));
    }

    let bytes = res
        .bytes()
        .map_err(|e| Error::FetchError(format!("failed to read photo body: {}", e)))?;
    let img = image::load_from_memory(&bytes)
        .map_err(|e| Error::FetchError(format!("photo decode failed: {}", e)))?;
    Ok(img.to_rgba8())
}
