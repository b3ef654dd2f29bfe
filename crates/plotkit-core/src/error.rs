//! Error handling for the plotkit core.
//!
//! Builder methods validate locally and return an error without touching the
//! step log; the replay engine performs no validation of its own and only
//! forwards errors raised by the active [`Plotter`](crate::Plotter).
//!
//! All error types use `thiserror`.

use crate::image::Command;
use thiserror::Error;

/// Core plotting error type.
///
/// Every failure is terminal for the current operation: there is no retry
/// and no partial rollback of plotter calls already dispatched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    /// Tool power outside the supported percentage range on a cutting step.
    #[error("Invalid tool power {power} (expected 0..=100)")]
    InvalidPower {
        /// The rejected power value.
        power: f64,
    },

    /// A plotter received a control command it does not implement.
    #[error("Unsupported plotter command: {command:?}")]
    UnsupportedCommand {
        /// The command the plotter could not handle.
        command: Command,
    },
}

/// Result type using [`PlotError`].
pub type Result<T> = std::result::Result<T, PlotError>;
