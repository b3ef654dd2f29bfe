//! Bounding-box consumer for a replayed step log.

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, Result};
use crate::image::Command;
use crate::plot::Plotter;

/// An axis-aligned rectangle `[min_x, max_x] x [min_y, max_y]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Smallest X reached.
    pub min_x: f64,
    /// Smallest Y reached.
    pub min_y: f64,
    /// Largest X reached.
    pub max_x: f64,
    /// Largest Y reached.
    pub max_y: f64,
}

impl BoundingBox {
    /// Extent along X.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along Y.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center point of the box.
    pub fn center(&self) -> (f64, f64) {
        (
            0.5 * (self.min_x + self.max_x),
            0.5 * (self.min_y + self.max_y),
        )
    }

    /// Returns the box grown by `margin` on every side.
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}

/// A [`Plotter`] that accumulates the bounding box of the replayed path.
///
/// Travel counts toward the box: `move_to` and `line_to` have identical
/// effect. The consumer keeps its own origin offset, advanced by the
/// `SetOrigin` command, so absolute coordinates after an origin reset are
/// measured relative to the pen position at the moment of the reset.
#[derive(Debug, Default)]
pub struct Bound {
    pts: usize,
    origin_x: f64,
    origin_y: f64,
    last_x: f64,
    last_y: f64,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl Bound {
    /// A fresh consumer with no recorded point.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points recorded so far.
    pub fn points(&self) -> usize {
        self.pts
    }

    /// The accumulated box. The zero box when no point was recorded.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x,
            min_y: self.min_y,
            max_x: self.max_x,
            max_y: self.max_y,
        }
    }

    fn record(&mut self, x: f64, y: f64) {
        self.last_x = self.origin_x + x;
        self.last_y = self.origin_y + y;
        if self.pts == 0 || self.last_x < self.min_x {
            self.min_x = self.last_x;
        }
        if self.pts == 0 || self.last_x > self.max_x {
            self.max_x = self.last_x;
        }
        if self.pts == 0 || self.last_y < self.min_y {
            self.min_y = self.last_y;
        }
        if self.pts == 0 || self.last_y > self.max_y {
            self.max_y = self.last_y;
        }
        self.pts += 1;
    }
}

impl Plotter for Bound {
    fn command(&mut self, cmd: Command) -> Result<()> {
        if cmd != Command::SetOrigin {
            return Err(PlotError::UnsupportedCommand { command: cmd });
        }
        self.origin_x = self.last_x;
        self.origin_y = self.last_y;
        self.last_x = 0.0;
        self.last_y = 0.0;
        Ok(())
    }

    fn move_to(&mut self, x: f64, y: f64, _z: f64) -> Result<()> {
        self.record(x, y);
        Ok(())
    }

    fn line_to(&mut self, x: f64, y: f64, z: f64) -> Result<()> {
        self.move_to(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Image;

    #[test]
    fn test_origin_reset_shifts_subsequent_absolutes() {
        let mut im = Image::new();
        im.move_to(5.0, 5.0);
        im.set_origin();
        im.move_to(2.0, 2.0);

        let mut bound = Bound::new();
        im.plot(&mut bound).unwrap();
        let b = bound.bounds();
        assert_eq!((b.min_x, b.min_y), (5.0, 5.0));
        assert_eq!((b.max_x, b.max_y), (7.0, 7.0));
    }

    #[test]
    fn test_comment_steps_record_no_point() {
        let mut im = Image::new();
        im.note("x");
        im.move_to(1.0, 1.0);
        im.note("y");

        let mut bound = Bound::new();
        im.plot(&mut bound).unwrap();
        assert_eq!(bound.points(), 1);
        let b = bound.bounds();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_travel_counts_toward_the_box() {
        let mut im = Image::new();
        im.move_to(-3.0, 10.0);
        im.line_to(4.0, -2.0, 50.0).unwrap();

        let mut bound = Bound::new();
        im.plot(&mut bound).unwrap();
        let b = bound.bounds();
        assert_eq!((b.min_x, b.min_y), (-3.0, -2.0));
        assert_eq!((b.max_x, b.max_y), (4.0, 10.0));
        assert_eq!(b.width(), 7.0);
        assert_eq!(b.height(), 12.0);
    }

    #[test]
    fn test_bounding_pass_is_idempotent() {
        let mut im = Image::new();
        im.move_to(1.0, 2.0);
        im.set_origin();
        im.line_to(-4.0, 3.0, 10.0).unwrap();

        let mut first = Bound::new();
        let mut second = Bound::new();
        im.plot(&mut first).unwrap();
        im.plot(&mut second).unwrap();
        assert_eq!(first.bounds(), second.bounds());
        assert_eq!(first.points(), second.points());
    }

    #[test]
    fn test_empty_image_reports_zero_box() {
        let im = Image::new();
        let mut bound = Bound::new();
        im.plot(&mut bound).unwrap();
        assert_eq!(bound.points(), 0);
        assert_eq!(bound.bounds(), BoundingBox::default());
    }

    #[test]
    fn test_expand_grows_every_side() {
        let b = BoundingBox {
            min_x: 1.0,
            min_y: 2.0,
            max_x: 3.0,
            max_y: 4.0,
        };
        let e = b.expand(4.0);
        assert_eq!((e.min_x, e.min_y, e.max_x, e.max_y), (-3.0, -2.0, 7.0, 8.0));
        assert_eq!(e.center(), b.center());
    }
}
