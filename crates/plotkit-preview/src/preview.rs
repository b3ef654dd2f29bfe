//! Two-pass measure-then-render preview pipeline.
//!
//! The first pass replays the image through a [`Bound`] consumer to measure
//! its extent; the second replays it through a [`PreviewPlotter`] that maps
//! every position through a similarity transform into raster space and
//! strokes the path. Two X markers are overlaid afterwards: the plotter's
//! final accumulated origin and the untransformed coordinate origin.

use image::{Rgb, RgbImage};
use tiny_skia::{Color, Pixmap};
use tracing::debug;

use plotkit_core::{Bound, BoundingBox, Command, Image, PlotError, Plotter};

use crate::error::PreviewError;
use crate::raster::Rasterizer;
use crate::transform::Similarity;

/// Margin, in path distance units, added on every side of the measured
/// extent before fitting it to the target raster.
pub const PREVIEW_MARGIN: f64 = 4.0;

/// Half-width of the origin markers, in device units. Each marker is an X
/// formed by two 8-unit-wide crossing segments.
const MARKER_RADIUS: f32 = 4.0;

fn path_color() -> Color {
    Color::from_rgba8(0xff, 0x00, 0xff, 0xff)
}
fn end_origin_color() -> Color {
    Color::from_rgba8(0xff, 0x00, 0x00, 0xff)
}
fn start_origin_color() -> Color {
    Color::from_rgba8(0x00, 0x00, 0x00, 0xff)
}

/// The uniform scale fitting an extent into a `width` x `height` raster
/// without overflowing either axis: the smaller of the per-axis ratios.
pub fn fit_scale(extent: &BoundingBox, width: u32, height: u32) -> f64 {
    let scale = f64::from(width) / extent.width();
    let alt = f64::from(height) / extent.height();
    scale.min(alt)
}

/// A [`Plotter`] that strokes the replayed path into a [`Rasterizer`]
/// through a similarity transform.
///
/// The plotter keeps its own pen and origin accumulator; an origin reset
/// folds the current pen position into the accumulated offset. The vertical
/// axis is flipped so that device row 0 is the top of the raster.
#[derive(Debug)]
pub struct PreviewPlotter {
    flip_y: f64,
    sim: Similarity,
    raster: Rasterizer,
    origin_x: f64,
    origin_y: f64,
    pen_x: f64,
    pen_y: f64,
    pen_z: f64,
}

impl PreviewPlotter {
    /// A fresh plotter rendering through `sim` into a raster of the given
    /// pixel height.
    pub fn new(sim: Similarity, height: u32) -> Self {
        Self {
            flip_y: f64::from(height),
            sim,
            raster: Rasterizer::new(),
            origin_x: 0.0,
            origin_y: 0.0,
            pen_x: 0.0,
            pen_y: 0.0,
            pen_z: 0.0,
        }
    }

    /// The accumulated origin offset.
    pub fn origin(&self) -> (f64, f64) {
        (self.origin_x, self.origin_y)
    }

    /// The accumulated path geometry.
    pub fn rasterizer_mut(&mut self) -> &mut Rasterizer {
        &mut self.raster
    }

    /// Maps a path-space point (pre-offset by the accumulated origin)
    /// into flipped device coordinates.
    fn device(&self, x: f64, y: f64) -> (f32, f32) {
        let (px, py) = self.sim.apply(self.origin_x + x, self.origin_y + y);
        (px as f32, (self.flip_y - py) as f32)
    }
}

impl Plotter for PreviewPlotter {
    fn command(&mut self, cmd: Command) -> Result<(), PlotError> {
        match cmd {
            Command::SetOrigin => {
                self.origin_x += self.pen_x;
                self.origin_y += self.pen_y;
                self.pen_x = 0.0;
                self.pen_y = 0.0;
                self.pen_z = 0.0;
                Ok(())
            }
            _ => Err(PlotError::UnsupportedCommand { command: cmd }),
        }
    }

    fn move_to(&mut self, x: f64, y: f64, z: f64) -> Result<(), PlotError> {
        let (px, py) = self.device(x, y);
        self.raster.move_to(px, py);
        self.pen_x = x;
        self.pen_y = y;
        self.pen_z = z;
        Ok(())
    }

    fn line_to(&mut self, x: f64, y: f64, z: f64) -> Result<(), PlotError> {
        let (from_x, from_y) = self.device(self.pen_x, self.pen_y);
        let (to_x, to_y) = self.device(x, y);
        self.raster.line(from_x, from_y, to_x, to_y, 1.0);
        self.pen_x = x;
        self.pen_y = y;
        self.pen_z = z;
        Ok(())
    }
}

/// A rendered preview raster together with the measured extent (margin
/// included) it was fitted from.
#[derive(Debug)]
pub struct Preview {
    /// The composited raster: white background, path in magenta, the final
    /// origin marker in red and the start origin marker in black.
    pub image: RgbImage,
    /// The measured bounding box expanded by [`PREVIEW_MARGIN`].
    pub bounds: BoundingBox,
}

/// An X marker of two crossing segments centered on a device point.
fn draw_marker(raster: &mut Rasterizer, x: f32, y: f32) {
    let r = MARKER_RADIUS;
    raster.line(x - r, y - r, x + r, y + r, 1.0);
    raster.line(x - r, y + r, x + r, y - r, 1.0);
}

/// Renders a `width` x `height` preview of the image.
///
/// Measures the extent with a bounding pass, expands it by
/// [`PREVIEW_MARGIN`] on each side, fits it to the target with an
/// aspect-preserving scale, and replays the image through a
/// [`PreviewPlotter`] centered on the raster. Both replay passes see the
/// same unmutated image.
pub fn render_preview(image: &Image, width: u32, height: u32) -> Result<Preview, PreviewError> {
    let mut bound = Bound::new();
    image.plot(&mut bound)?;
    let extent = bound.bounds().expand(PREVIEW_MARGIN);
    let scale = fit_scale(&extent, width, height);
    debug!(
        points = bound.points(),
        width = extent.width(),
        height = extent.height(),
        scale,
        "fitted preview extent"
    );

    let (center_x, center_y) = extent.center();
    let sim = Similarity::new(
        center_x,
        center_y,
        f64::from(width) / 2.0,
        f64::from(height) / 2.0,
        scale,
        0.0,
    );

    let mut pixmap =
        Pixmap::new(width, height).ok_or(PreviewError::InvalidSize { width, height })?;
    pixmap.fill(Color::WHITE);

    let mut plotter = PreviewPlotter::new(sim, height);
    image.plot(&mut plotter)?;
    plotter
        .rasterizer_mut()
        .render(&mut pixmap, 0.0, 0.0, path_color());
    plotter.rasterizer_mut().reset();

    // Where the accumulated origin ended up after the whole log.
    let (origin_x, origin_y) = plotter.origin();
    let (end_x, end_y) = sim.apply(origin_x, origin_y);
    let end_y = f64::from(height) - end_y;
    draw_marker(plotter.rasterizer_mut(), end_x as f32, end_y as f32);
    plotter
        .rasterizer_mut()
        .render(&mut pixmap, 0.0, 0.0, end_origin_color());
    plotter.rasterizer_mut().reset();

    // Where the log started: the untransformed coordinate origin.
    let (start_x, start_y) = sim.apply(0.0, 0.0);
    let start_y = f64::from(height) - start_y;
    draw_marker(plotter.rasterizer_mut(), start_x as f32, start_y as f32);
    plotter
        .rasterizer_mut()
        .render(&mut pixmap, 0.0, 0.0, start_origin_color());

    let data = pixmap.data();
    let image = RgbImage::from_fn(width, height, |x, y| {
        let idx = ((y * width + x) * 4) as usize;
        Rgb([data[idx], data[idx + 1], data[idx + 2]])
    });

    Ok(Preview {
        image,
        bounds: extent,
    })
}
