//! Accumulate-then-render line rasterization over tiny-skia.
//!
//! The rasterizer collects stroked line segments in device coordinates and
//! composites them onto a target pixmap in a single color per render pass.
//! Rendering does not consume the accumulated geometry; `reset` clears it
//! so the next pass can start fresh.

use tiny_skia::{Color, Paint, PathBuilder, Pixmap, Stroke, Transform};

#[derive(Debug, Clone, Copy)]
struct Segment {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    width: f32,
}

/// A line rasterizer accumulating stroked segments in device space.
#[derive(Debug, Default)]
pub struct Rasterizer {
    segments: Vec<Segment>,
    pen_x: f32,
    pen_y: f32,
}

impl Rasterizer {
    /// A fresh rasterizer with no accumulated geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accumulated segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when no segment has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Moves the pen without drawing.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.pen_x = x;
        self.pen_y = y;
    }

    /// Draws a segment of the given stroke width from the pen to (x, y)
    /// and advances the pen.
    pub fn line_to(&mut self, x: f32, y: f32, width: f32) {
        self.line(self.pen_x, self.pen_y, x, y, width);
    }

    /// Draws a segment of the given stroke width between two explicit
    /// endpoints, leaving the pen at the second one.
    pub fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32) {
        self.segments.push(Segment { x0, y0, x1, y1, width });
        self.pen_x = x1;
        self.pen_y = y1;
    }

    /// Strokes the accumulated segments onto `target` in `color`, shifted
    /// by the given device-space offset. Anti-aliased.
    pub fn render(&self, target: &mut Pixmap, offset_x: f32, offset_y: f32, color: Color) {
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        let transform = Transform::from_translate(offset_x, offset_y);

        for seg in &self.segments {
            let mut pb = PathBuilder::new();
            pb.move_to(seg.x0, seg.y0);
            pb.line_to(seg.x1, seg.y1);
            let Some(path) = pb.finish() else {
                continue;
            };
            let stroke = Stroke {
                width: seg.width,
                ..Default::default()
            };
            target.stroke_path(&path, &paint, &stroke, transform, None);
        }
    }

    /// Clears the accumulated geometry. The pen position is kept.
    pub fn reset(&mut self) {
        self.segments.clear();
    }
}
