//! PNG encoding of captured bitmaps.

use crate::{Bitmap, Error, Result};

/// Encode a bitmap as a PNG byte stream preserving exact pixel dimensions.
///
/// Total for valid bitmaps; zero-dimension input is a capture-stage
/// precondition violation and is reported as [`Error::EncodingFailed`].
pub fn encode(bitmap: &Bitmap) -> Result<Vec<u8>> {
    if bitmap.width == 0 || bitmap.height == 0 {
        return Err(Error::EncodingFailed("empty bitmap".into()));
    }

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, bitmap.width, bitmap.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| Error::EncodingFailed(format!("PNG header: {}", e)))?;
        writer
            .write_image_data(&bitmap.pixels)
            .map_err(|e| Error::EncodingFailed(format!("PNG data: {}", e)))?;
    }
    Ok(out)
}
