//! Paint command set and rasterizer for the poster template.
//!
//! Layout produces commands in logical coordinates; the rasterizer multiplies
//! every coordinate by the capture scale so the output resolution grows
//! without re-running layout.

use crate::{Bitmap, Color, SurfaceSize};

/// A single paint operation in logical coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Opaque rectangle fill
    SolidRect {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
        color: Color,
    },
    /// Greeked text line (shaded bar standing in for a run of glyphs)
    Greek {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
        color: Color,
    },
    /// Circular disc with a border ring. When `shows_photo` is set and a
    /// resolved photo is available it is painted inside the ring, otherwise
    /// the disc fills with its placeholder color.
    PhotoDisc {
        cx: i64,
        cy: i64,
        radius: u32,
        border: u32,
        border_color: Color,
        placeholder: Color,
        shows_photo: bool,
    },
}

/// Rasterize paint commands into a bitmap of `size * scale` pixels
pub fn rasterize(
    size: SurfaceSize,
    scale: u32,
    background: Color,
    commands: &[PaintCommand],
    photo: Option<&image::RgbaImage>,
) -> Bitmap {
    let mut bitmap = Bitmap::filled(size.width * scale, size.height * scale, background);
    let s = scale as i64;

    for cmd in commands {
        match cmd {
            PaintCommand::SolidRect {
                x,
                y,
                width,
                height,
                color,
            }
            | PaintCommand::Greek {
                x,
                y,
                width,
                height,
                color,
            } => {
                bitmap.fill_rect(x * s, y * s, width * scale, height * scale, *color);
            }
            PaintCommand::PhotoDisc {
                cx,
                cy,
                radius,
                border,
                border_color,
                placeholder,
                shows_photo,
            } => {
                paint_disc(
                    &mut bitmap,
                    cx * s,
                    cy * s,
                    radius * scale,
                    border * scale,
                    *border_color,
                    *placeholder,
                    if *shows_photo { photo } else { None },
                );
            }
        }
    }

    bitmap
}

/// Paint a bordered disc, sampling from a resized photo when present
#[allow(clippy::too_many_arguments)]
fn paint_disc(
    bitmap: &mut Bitmap,
    cx: i64,
    cy: i64,
    radius: u32,
    border: u32,
    border_color: Color,
    placeholder: Color,
    photo: Option<&image::RgbaImage>,
) {
    let inner = radius.saturating_sub(border) as i64;
    let r = radius as i64;
    let d = (inner * 2).max(1) as u32;

    // Photo is resized once to the inner diameter, then sampled per pixel.
    let resized = photo.map(|p| image::imageops::resize(p, d, d, image::imageops::FilterType::Triangle));

    for dy in -r..=r {
        for dx in -r..=r {
            let dist2 = dx * dx + dy * dy;
            if dist2 > r * r {
                continue;
            }
            let px = cx + dx;
            let py = cy + dy;
            if dist2 > inner * inner {
                bitmap.blend_pixel(px, py, [border_color.r, border_color.g, border_color.b, 255]);
            } else if let Some(img) = &resized {
                let sx = ((dx + inner).clamp(0, d as i64 - 1)) as u32;
                let sy = ((dy + inner).clamp(0, d as i64 - 1)) as u32;
                bitmap.blend_pixel(px, py, img.get_pixel(sx, sy).0);
            } else {
                bitmap.blend_pixel(px, py, [placeholder.r, placeholder.g, placeholder.b, 255]);
            }
        }
    }
}
