//! Similarity transform between path space and raster space.

/// A similarity transform: uniform scale plus rotation plus translation,
/// expressed as mapping one anchor point onto another.
///
/// The preview pipeline always passes a rotation of zero, keeping the
/// mapping a pure scale-and-translate, but the rotation term is part of
/// what makes this a similarity and is supported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Similarity {
    from_x: f64,
    from_y: f64,
    to_x: f64,
    to_y: f64,
    scale: f64,
    cos: f64,
    sin: f64,
}

impl Similarity {
    /// Builds the transform mapping `(from_x, from_y)` onto
    /// `(to_x, to_y)`, scaling by `scale` and rotating by `rotation`
    /// radians around the anchor.
    pub fn new(from_x: f64, from_y: f64, to_x: f64, to_y: f64, scale: f64, rotation: f64) -> Self {
        Self {
            from_x,
            from_y,
            to_x,
            to_y,
            scale,
            cos: rotation.cos(),
            sin: rotation.sin(),
        }
    }

    /// The uniform scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Maps a path-space point into raster space.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let dx = x - self.from_x;
        let dy = y - self.from_y;
        (
            self.to_x + self.scale * (self.cos * dx - self.sin * dy),
            self.to_y + self.scale * (self.sin * dx + self.cos * dy),
        )
    }
}
