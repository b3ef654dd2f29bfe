//! # plotkit-emitter
//!
//! Hardware code emission for plotkit step logs: the Snapmaker A350 laser
//! tool table and a Marlin-flavor program writer that embeds the rendered
//! preview as a header thumbnail.

pub mod error;
pub mod laser;
pub mod tools;

pub use error::EmitterError;
pub use laser::{laser_program, write_laser_program};
pub use tools::{LaserTool, ToolTable};
