//! Poster template backend.
//!
//! The default [`RenderSurface`] implementation: a deterministic block layout
//! of the workshop poster (institution header, department block, quoted
//! title, photo-and-schedule body, footer band) painted through a small
//! command set. Text runs are greeked — final glyph rendering is display
//! logic owned by the form collaborator, and the export pipeline only needs a
//! faithful visual stand-in with exact geometry.

pub mod paint;
pub mod photo;

use crate::{Bitmap, CaptureOptions, Color, PosterData, RenderSurface, Result, SurfaceSize};
use paint::PaintCommand;

// Palette lifted from the poster's stylesheet
const CANVAS: Color = Color::rgb(239, 246, 255);
const HEADER_BG: Color = Color::WHITE;
const ACCENT: Color = Color::rgb(37, 99, 235);
const ACCENT_DARK: Color = Color::rgb(30, 64, 175);
const INK: Color = Color::rgb(31, 41, 55);
const INK_SOFT: Color = Color::rgb(75, 85, 99);
const HIGHLIGHT: Color = Color::rgb(239, 68, 68);

/// Template variants and their fixed logical dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateVariant {
    /// 600x800 one-page workshop poster
    Classic,
    /// 600x1175 poster with session abstract and coordinator blocks
    Extended,
}

impl TemplateVariant {
    pub fn size(self) -> SurfaceSize {
        match self {
            TemplateVariant::Classic => SurfaceSize {
                width: 600,
                height: 800,
            },
            TemplateVariant::Extended => SurfaceSize {
                width: 600,
                height: 1175,
            },
        }
    }
}

/// The poster preview surface
///
/// Holds the template variant and the current document state. `render_to_bitmap`
/// reflects whatever the state is at the instant it runs, matching a live
/// preview that may change between export trigger and capture.
pub struct PosterSurface {
    variant: TemplateVariant,
    data: PosterData,
}

impl PosterSurface {
    pub fn new(variant: TemplateVariant, data: PosterData) -> Self {
        Self { variant, data }
    }

    pub fn variant(&self) -> TemplateVariant {
        self.variant
    }

    pub fn data(&self) -> &PosterData {
        &self.data
    }

    /// Replace the document state (live form binding)
    pub fn set_data(&mut self, data: PosterData) {
        self.data = data;
    }
}

impl RenderSurface for PosterSurface {
    fn size(&self) -> SurfaceSize {
        self.variant.size()
    }

    fn render_to_bitmap(&self, opts: &CaptureOptions) -> Result<Bitmap> {
        let photo = photo::resolve(self.data.image.as_deref(), opts.allow_cross_origin);
        let commands = layout(self.variant, &self.data);
        if opts.logging {
            log::debug!(
                "poster layout produced {} paint commands ({:?}, photo: {})",
                commands.len(),
                self.variant,
                photo.is_some()
            );
        }
        Ok(paint::rasterize(
            self.size(),
            opts.scale,
            opts.background,
            &commands,
            photo.as_ref(),
        ))
    }
}

/// Greek bar width for a text run, proportional to its length
fn greek_width(text: Option<&str>, fallback: u32, max: u32) -> u32 {
    match text {
        Some(t) if !t.trim().is_empty() => ((t.trim().len() as u32) * 7).clamp(40, max),
        _ => fallback.min(max),
    }
}

/// Centered greek line at the given y cursor
fn centered_greek(width: u32, y: i64, height: u32, color: Color) -> PaintCommand {
    PaintCommand::Greek {
        x: (600 - width as i64) / 2,
        y,
        width,
        height,
        color,
    }
}

/// Compute the poster's block layout as paint commands in logical coordinates
pub fn layout(variant: TemplateVariant, data: &PosterData) -> Vec<PaintCommand> {
    let size = variant.size();
    let mut commands = Vec::new();

    // Canvas wash over the capture background
    commands.push(PaintCommand::SolidRect {
        x: 0,
        y: 0,
        width: size.width,
        height: size.height,
        color: CANVAS,
    });

    // Institution header band with accent rule
    commands.push(PaintCommand::SolidRect {
        x: 0,
        y: 0,
        width: 600,
        height: 150,
        color: HEADER_BG,
    });
    commands.push(PaintCommand::SolidRect {
        x: 0,
        y: 146,
        width: 600,
        height: 4,
        color: ACCENT,
    });
    commands.push(PaintCommand::PhotoDisc {
        cx: 72,
        cy: 52,
        radius: 28,
        border: 2,
        border_color: ACCENT,
        placeholder: CANVAS,
        shows_photo: false,
    });
    commands.push(PaintCommand::Greek {
        x: 116,
        y: 30,
        width: 380,
        height: 14,
        color: ACCENT_DARK,
    });
    commands.push(PaintCommand::Greek {
        x: 116,
        y: 52,
        width: 320,
        height: 8,
        color: INK_SOFT,
    });
    for (i, w) in [260u32, 330, 240].into_iter().enumerate() {
        commands.push(centered_greek(w, 96 + (i as i64) * 16, 8, INK_SOFT));
    }

    // Department block
    let mut y: i64 = 164;
    commands.push(centered_greek(
        greek_width(data.department.as_deref(), 420, 520),
        y,
        16,
        INK,
    ));
    y += 26;
    commands.push(centered_greek(
        greek_width(data.specialization.as_deref(), 340, 460),
        y,
        12,
        INK,
    ));
    y += 22;
    commands.push(centered_greek(90, y, 12, INK));
    y += 20;
    commands.push(centered_greek(200, y, 10, INK_SOFT));
    y += 26;

    // Quoted workshop title
    let title_w = greek_width(data.title.as_deref(), 480, 520);
    let title_lines = if title_w >= 520 { 3 } else { 2 };
    for _ in 0..title_lines {
        commands.push(centered_greek(title_w.min(520), y, 18, ACCENT_DARK));
        y += 26;
    }
    y += 14;

    // Two-column body: resource person on the left, schedule on the right
    let body_top = y;
    commands.push(PaintCommand::PhotoDisc {
        cx: 170,
        cy: body_top + 80,
        radius: 80,
        border: 4,
        border_color: ACCENT,
        placeholder: ACCENT_DARK,
        shows_photo: true,
    });
    let mut left_y = body_top + 176;
    commands.push(PaintCommand::Greek {
        x: 110,
        y: left_y,
        width: 120,
        height: 12,
        color: HIGHLIGHT,
    });
    left_y += 20;
    commands.push(PaintCommand::Greek {
        x: 80,
        y: left_y,
        width: greek_width(data.resource_person_name.as_deref(), 180, 200),
        height: 14,
        color: INK,
    });
    left_y += 22;
    commands.push(PaintCommand::Greek {
        x: 80,
        y: left_y,
        width: greek_width(data.designation.as_deref(), 180, 200),
        height: 10,
        color: INK_SOFT,
    });

    // Schedule rows: date, start-end time, venue
    let schedule = [
        data.date.as_deref(),
        data.start_time.as_deref().or(data.end_time.as_deref()),
        data.venue.as_deref(),
    ];
    for (i, entry) in schedule.into_iter().enumerate() {
        let row_y = body_top + 24 + (i as i64) * 52;
        commands.push(PaintCommand::SolidRect {
            x: 330,
            y: row_y,
            width: 18,
            height: 18,
            color: ACCENT,
        });
        commands.push(PaintCommand::Greek {
            x: 358,
            y: row_y + 4,
            width: greek_width(entry, 150, 190),
            height: 12,
            color: INK,
        });
    }
    y = body_top + 230;

    // Extended poster carries a session abstract and coordinator lines
    if variant == TemplateVariant::Extended {
        for i in 0..5 {
            let w = if i == 4 { 320 } else { 520 };
            commands.push(centered_greek(w, y, 10, INK_SOFT));
            y += 18;
        }
        y += 24;
        commands.push(centered_greek(180, y, 12, ACCENT_DARK));
        y += 22;
        for _ in 0..3 {
            commands.push(centered_greek(260, y, 10, INK));
            y += 18;
        }
    }

    // Footer band
    commands.push(PaintCommand::SolidRect {
        x: 0,
        y: size.height as i64 - 44,
        width: size.width,
        height: 44,
        color: ACCENT_DARK,
    });
    commands.push(centered_greek(280, size.height as i64 - 30, 10, HEADER_BG));

    commands
}
