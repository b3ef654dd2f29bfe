//! # plotkit-preview
//!
//! Raster preview rendering for plotkit step logs: a similarity transform
//! from path space into raster space, a line rasterizer over tiny-skia,
//! and the two-pass measure-then-render pipeline producing a preview
//! image with origin markers.

pub mod error;
pub mod preview;
pub mod raster;
pub mod transform;

pub use error::PreviewError;
pub use preview::{fit_scale, render_preview, Preview, PreviewPlotter, PREVIEW_MARGIN};
pub use raster::Rasterizer;
pub use transform::Similarity;
