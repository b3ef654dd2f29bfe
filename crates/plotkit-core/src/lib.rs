//! # plotkit-core
//!
//! Core intermediate representation and replay engine for machine-motion
//! programs: an append-only step log ([`Image`]) built through a small
//! validating API, a consumer capability trait ([`Plotter`]), a
//! deterministic replay engine ([`Image::plot`]), and a bounding-box
//! consumer ([`Bound`]).
//!
//! The core records, replays, and measures an already-decided sequence of
//! moves. It does no geometry construction, no kinematic validation, and no
//! motion scheduling.

pub mod bounds;
pub mod error;
pub mod image;
pub mod plot;

pub use bounds::{Bound, BoundingBox};
pub use error::{PlotError, Result};
pub use image::{Command, Image, Step};
pub use plot::Plotter;
