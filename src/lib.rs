//! # plotkit
//!
//! A step-log intermediate representation and replay engine for
//! machine-motion programs, with a raster preview renderer and a
//! Snapmaker A350 laser program emitter.
//!
//! ## Architecture
//!
//! plotkit is organized as a workspace with multiple crates:
//!
//! 1. **plotkit-core** - Step log, builder API, replay engine, bounds
//! 2. **plotkit-preview** - Similarity transform, rasterizer, preview
//! 3. **plotkit-emitter** - Tool table and laser program emission
//! 4. **plotkit** - The stripes test-pattern binary
//!
//! The core records, replays and measures an already-decided sequence of
//! moves; geometry construction and controller communication live outside
//! this workspace.

pub use plotkit_core::{Bound, BoundingBox, Command, Image, PlotError, Plotter, Result, Step};

pub use plotkit_emitter::{
    laser_program, write_laser_program, EmitterError, LaserTool, ToolTable,
};

pub use plotkit_preview::{
    fit_scale, render_preview, Preview, PreviewError, PreviewPlotter, Rasterizer, Similarity,
    PREVIEW_MARGIN,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
