//! Single-page PDF packaging.
//!
//! The page box is set to the bitmap's pixel dimensions exactly (one PDF
//! point per pixel) and the bitmap is drawn as one full-bleed image XObject
//! at the origin. There is deliberately no default paper size and no margin:
//! the exported document reproduces the poster at 1:1 scale.

use crate::{Bitmap, Error, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write as _;

/// Encode a bitmap as a single-page PDF byte stream.
///
/// Total for valid bitmaps; zero-dimension input is a precondition violation
/// reported as [`Error::EncodingFailed`].
pub fn encode(bitmap: &Bitmap) -> Result<Vec<u8>> {
    if bitmap.width == 0 || bitmap.height == 0 {
        return Err(Error::EncodingFailed("empty bitmap".into()));
    }

    // The bitmap is already composited over the capture background, so alpha
    // is uniformly opaque and DeviceRGB suffices.
    let mut rgb = Vec::with_capacity((bitmap.width as usize) * (bitmap.height as usize) * 3);
    for px in bitmap.pixels.chunks_exact(4) {
        rgb.extend_from_slice(&px[0..3]);
    }

    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(&rgb)
        .and_then(|_| enc.finish())
        .map(|compressed| assemble(bitmap.width, bitmap.height, &compressed))
        .map_err(|e| Error::EncodingFailed(format!("image stream deflate: {}", e)))
}

/// Assemble the PDF object graph around the compressed image stream
fn assemble(width: u32, height: u32, image_stream: &[u8]) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = Vec::new();

    out.extend_from_slice(b"%PDF-1.7\n");
    // Binary-content marker comment, as writers conventionally emit
    out.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

    offsets.push(out.len());
    out.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    offsets.push(out.len());
    out.extend_from_slice(b"2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n");

    offsets.push(out.len());
    out.extend_from_slice(
        format!(
            "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /XObject << /Im0 4 0 R >> /ProcSet [/PDF /ImageC] >> \
             /Contents 5 0 R >>\nendobj\n",
            width, height
        )
        .as_bytes(),
    );

    offsets.push(out.len());
    out.extend_from_slice(
        format!(
            "4 0 obj\n<< /Type /XObject /Subtype /Image /Width {} /Height {} \
             /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /FlateDecode \
             /Length {} >>\nstream\n",
            width,
            height,
            image_stream.len()
        )
        .as_bytes(),
    );
    out.extend_from_slice(image_stream);
    out.extend_from_slice(b"\nendstream\nendobj\n");

    // Content stream: scale the unit image square to the full page
    let content = format!("q\n{} 0 0 {} 0 0 cm\n/Im0 Do\nQ\n", width, height);
    offsets.push(out.len());
    out.extend_from_slice(
        format!("5 0 obj\n<< /Length {} >>\nstream\n", content.len()).as_bytes(),
    );
    out.extend_from_slice(content.as_bytes());
    out.extend_from_slice(b"endstream\nendobj\n");

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", offsets.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for off in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", off).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            offsets.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    out
}
