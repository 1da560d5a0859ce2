//! Rendering: draws strokes onto the widget's raster surface.
//!
//! This module is the only place that touches [`tiny_skia::Pixmap`]. It reads
//! strokes and produces pixels; it never mutates the stroke model. Every mark
//! uses the same ink style: fixed line width, round caps and joins, one solid
//! colour. Drawing is deterministic, so replaying the same strokes over the
//! same background always yields byte-identical pixels.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke as SkiaStroke, Transform};

use crate::color::Rgba;
use crate::consts::DEFAULT_LINE_WIDTH;
use crate::error::SignatureError;
use crate::stroke::{Point, Stroke};

/// How ink is laid down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkStyle {
    /// Stroke width in pixels; dots use half of it as radius.
    pub line_width: f32,
    /// Ink colour.
    pub color: Rgba,
    /// Smooth edges like a browser canvas does.
    pub anti_alias: bool,
}

impl Default for InkStyle {
    fn default() -> Self {
        Self { line_width: DEFAULT_LINE_WIDTH, color: Rgba::BLACK, anti_alias: true }
    }
}

/// A fixed-size pixel buffer owned by one widget.
#[derive(Clone)]
pub struct Surface {
    pixmap: Pixmap,
    style: InkStyle,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("style", &self.style)
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Allocate a surface filled with `background`.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError::SurfaceUnavailable`] for zero or oversized
    /// dimensions and [`SignatureError::InvalidLineWidth`] for a non-positive
    /// line width.
    pub fn new(width: u32, height: u32, background: Rgba, style: InkStyle) -> Result<Self, SignatureError> {
        if !style.line_width.is_finite() || style.line_width <= 0.0 {
            return Err(SignatureError::InvalidLineWidth(style.line_width));
        }
        let pixmap = Pixmap::new(width, height).ok_or(SignatureError::SurfaceUnavailable { width, height })?;
        let mut surface = Self { pixmap, style };
        surface.clear(background);
        Ok(surface)
    }

    /// Fill the whole surface with `background`, discarding prior content.
    pub fn clear(&mut self, background: Rgba) {
        self.pixmap.fill(background.to_skia());
    }

    /// Draw only the newest segment of `stroke` on top of existing pixels.
    ///
    /// Returns `false` when there was nothing to draw (single point, or the
    /// last move did not change position).
    pub fn render_incremental(&mut self, stroke: &Stroke) -> bool {
        let Some((from, to)) = stroke.latest_segment() else {
            return false;
        };
        if from == to {
            return false;
        }
        self.stroke_polyline(&[from, to]);
        true
    }

    /// Clear to `background` and replay every stroke in order.
    pub fn redraw_all(&mut self, strokes: &[Stroke], background: Rgba) {
        self.clear(background);
        for stroke in strokes {
            self.draw_stroke(stroke);
        }
    }

    /// Draw one complete stroke as a poly-line, or as a dot if the pen never
    /// moved.
    pub fn draw_stroke(&mut self, stroke: &Stroke) {
        if stroke.is_dot() {
            self.draw_dot(stroke.start());
        } else {
            self.stroke_polyline(stroke.points());
        }
    }

    /// Fill a circle of radius `line_width / 2` centred on `center`.
    pub fn draw_dot(&mut self, center: Point) {
        let radius = self.style.line_width / 2.0;
        let Some(path) = PathBuilder::from_circle(to_f32(center.x), to_f32(center.y), radius) else {
            return;
        };
        let paint = self.paint();
        self.pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn stroke_polyline(&mut self, points: &[Point]) {
        let mut builder = PathBuilder::new();
        let mut previous: Option<Point> = None;
        for &p in points {
            match previous {
                None => builder.move_to(to_f32(p.x), to_f32(p.y)),
                Some(prev) if prev == p => continue,
                Some(_) => builder.line_to(to_f32(p.x), to_f32(p.y)),
            }
            previous = Some(p);
        }
        let Some(path) = builder.finish() else {
            return;
        };

        let stroke = SkiaStroke {
            width: self.style.line_width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..SkiaStroke::default()
        };
        let paint = self.paint();
        self.pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(self.style.color.to_skia());
        paint.anti_alias = self.style.anti_alias;
        paint
    }

    // --- Read-back ---

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    #[must_use]
    pub fn style(&self) -> InkStyle {
        self.style
    }

    /// Straight-alpha colour of one pixel, or `None` outside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Rgba { r: c.red(), g: c.green(), b: c.blue(), a: c.alpha() }
        })
    }

    /// Row-major straight-alpha RGBA8 bytes, ready for PNG encoding or
    /// `ImageData`.
    #[must_use]
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// Raw premultiplied pixel bytes, for exact comparisons.
    #[must_use]
    pub fn raw_data(&self) -> &[u8] {
        self.pixmap.data()
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_f32(v: f64) -> f32 {
    v as f32
}
