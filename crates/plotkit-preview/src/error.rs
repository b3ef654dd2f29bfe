//! Error types for preview rendering.

use plotkit_core::PlotError;
use thiserror::Error;

/// Errors that can occur while rendering a preview raster.
#[derive(Error, Debug)]
pub enum PreviewError {
    /// The target raster dimensions could not be allocated.
    #[error("Cannot allocate a {width}x{height} preview raster")]
    InvalidSize {
        /// Requested raster width in pixels.
        width: u32,
        /// Requested raster height in pixels.
        height: u32,
    },

    /// A replay pass failed.
    #[error(transparent)]
    Plot(#[from] PlotError),
}
