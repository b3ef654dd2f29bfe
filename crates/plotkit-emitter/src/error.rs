//! Error types for machine-program emission.

use std::io;
use thiserror::Error;

/// Errors that can occur while emitting a machine program.
#[derive(Error, Debug)]
pub enum EmitterError {
    /// The requested tool head name is not in the configured tool table.
    #[error("\"{tool}\" is not a recognized laser tool head")]
    UnknownTool {
        /// The unrecognized tool head name.
        tool: String,
    },

    /// I/O error while writing the program.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
