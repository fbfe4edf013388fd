//! Surface capture: snapshot a mounted surface into a pixel buffer.
//!
//! The precondition (a surface must be present) is checked synchronously at
//! entry so an unmounted preview fails fast, before any rendering work. The
//! asynchronous boundary lives in the session facade; this module is the
//! synchronous core executed on the worker thread.

use crate::{CaptureOptions, Error, RenderSurface, Result};

/// An immutable RGBA8 pixel buffer with explicit dimensions
///
/// Produced by capture, consumed by packaging. Pixels are row-major,
/// 4 bytes per pixel.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Create a bitmap filled with an opaque color
    pub fn filled(width: u32, height: u32, color: crate::Color) -> Self {
        let mut pixels = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for _ in 0..(width as usize) * (height as usize) {
            pixels.extend_from_slice(&[color.r, color.g, color.b, 255]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Fill a rectangle with an opaque color, clipped to the bitmap bounds
    pub(crate) fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: crate::Color) {
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = ((x + w as i64).max(0) as u64).min(self.width as u64) as u32;
        let y1 = ((y + h as i64).max(0) as u64).min(self.height as u64) as u32;
        for py in y0..y1 {
            for px in x0..x1 {
                let i = ((py * self.width + px) * 4) as usize;
                self.pixels[i] = color.r;
                self.pixels[i + 1] = color.g;
                self.pixels[i + 2] = color.b;
                self.pixels[i + 3] = 255;
            }
        }
    }

    /// Source-over blend of a single RGBA pixel, clipped to bounds
    pub(crate) fn blend_pixel(&mut self, x: i64, y: i64, rgba: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = ((y as u32 * self.width + x as u32) * 4) as usize;
        let a = rgba[3] as u32;
        if a == 0 {
            return;
        }
        let inv = 255 - a;
        for c in 0..3 {
            let src = rgba[c] as u32;
            let dst = self.pixels[i + c] as u32;
            self.pixels[i + c] = ((src * a + dst * inv) / 255) as u8;
        }
        self.pixels[i + 3] = 255;
    }
}

/// Capture the surface's current visual state into a bitmap of exactly
/// `surface.size * opts.scale` pixels.
///
/// Fails with [`Error::SurfaceNotFound`] when no surface is mounted, with
/// [`Error::ConfigError`] for a zero scale, and with [`Error::CaptureFailed`]
/// when the backend errors or produces a bitmap of the wrong dimensions. No
/// partial bitmap is ever returned on failure.
pub fn capture(surface: Option<&dyn RenderSurface>, opts: &CaptureOptions) -> Result<Bitmap> {
    let surface = surface.ok_or(Error::SurfaceNotFound)?;

    if opts.scale == 0 {
        return Err(Error::ConfigError("capture scale must be at least 1".into()));
    }

    let size = surface.size();
    if opts.logging {
        log::debug!(
            "capturing {}x{} surface at scale {}",
            size.width,
            size.height,
            opts.scale
        );
    }

    let bitmap = surface.render_to_bitmap(opts)?;

    let (want_w, want_h) = (size.width * opts.scale, size.height * opts.scale);
    if bitmap.width != want_w || bitmap.height != want_h {
        return Err(Error::CaptureFailed(format!(
            "backend produced {}x{} bitmap, expected {}x{}",
            bitmap.width, bitmap.height, want_w, want_h
        )));
    }

    Ok(bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, SurfaceSize};

    struct FixedSurface {
        size: SurfaceSize,
    }

    impl RenderSurface for FixedSurface {
        fn size(&self) -> SurfaceSize {
            self.size
        }

        fn render_to_bitmap(&self, opts: &CaptureOptions) -> Result<Bitmap> {
            Ok(Bitmap::filled(
                self.size.width * opts.scale,
                self.size.height * opts.scale,
                opts.background,
            ))
        }
    }

    struct WrongSizeSurface;

    impl RenderSurface for WrongSizeSurface {
        fn size(&self) -> SurfaceSize {
            SurfaceSize {
                width: 600,
                height: 800,
            }
        }

        fn render_to_bitmap(&self, _opts: &CaptureOptions) -> Result<Bitmap> {
            Ok(Bitmap::filled(10, 10, Color::WHITE))
        }
    }

    #[test]
    fn capture_scales_both_dimensions() {
        let surface = FixedSurface {
            size: SurfaceSize {
                width: 600,
                height: 800,
            },
        };
        let opts = CaptureOptions {
            scale: 2,
            ..Default::default()
        };
        let bitmap = capture(Some(&surface), &opts).unwrap();
        assert_eq!(bitmap.width, 1200);
        assert_eq!(bitmap.height, 1600);
    }

    #[test]
    fn capture_without_surface_fails_fast() {
        let err = capture(None, &CaptureOptions::default()).unwrap_err();
        assert!(matches!(err, Error::SurfaceNotFound));
    }

    #[test]
    fn capture_rejects_zero_scale() {
        let surface = FixedSurface {
            size: SurfaceSize {
                width: 600,
                height: 800,
            },
        };
        let opts = CaptureOptions {
            scale: 0,
            ..Default::default()
        };
        let err = capture(Some(&surface), &opts).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn capture_rejects_dimension_mismatch() {
        let err = capture(Some(&WrongSizeSurface), &CaptureOptions::default()).unwrap_err();
        assert!(matches!(err, Error::CaptureFailed(_)));
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut bitmap = Bitmap::filled(4, 4, Color::WHITE);
        bitmap.fill_rect(-2, -2, 4, 4, Color::rgb(0, 0, 0));
        // Top-left 2x2 painted, rest untouched
        assert_eq!(&bitmap.pixels[0..3], &[0, 0, 0]);
        let last = ((3 * 4 + 3) * 4) as usize;
        assert_eq!(&bitmap.pixels[last..last + 3], &[255, 255, 255]);
    }

    #[test]
    fn blend_pixel_is_source_over() {
        let mut bitmap = Bitmap::filled(1, 1, Color::rgb(0, 0, 0));
        bitmap.blend_pixel(0, 0, [255, 255, 255, 255]);
        assert_eq!(&bitmap.pixels[0..3], &[255, 255, 255]);
        bitmap.blend_pixel(0, 0, [0, 0, 0, 0]);
        assert_eq!(&bitmap.pixels[0..3], &[255, 255, 255]);
    }
}
