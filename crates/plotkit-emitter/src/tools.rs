//! Laser tool head configuration.
//!
//! The power-to-beam-width mapping is an explicit configuration value
//! passed to the caller and the emitter, not global state. The stock table
//! covers the Snapmaker A350 tool heads; callers can register their own.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::EmitterError;

/// One laser tool head option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaserTool {
    /// Rated output power in watts.
    pub watts: f64,
    /// Focused beam width in mm. Fill rasters are typically spaced at half
    /// of this so adjacent passes overlap.
    pub beam_width: f64,
}

/// Tool table keyed by tool head name (the wattage string on the box,
/// e.g. "1.6" or "10").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolTable {
    tools: HashMap<String, LaserTool>,
}

impl ToolTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The laser tool heads available for the Snapmaker A350.
    pub fn a350_defaults() -> Self {
        let mut table = Self::new();
        table.insert(
            "1.6",
            LaserTool {
                watts: 1.6,
                beam_width: 0.2,
            },
        );
        table.insert(
            "10",
            LaserTool {
                watts: 10.0,
                beam_width: 0.1,
            },
        );
        table
    }

    /// Registers or replaces a tool head.
    pub fn insert(&mut self, name: impl Into<String>, tool: LaserTool) {
        self.tools.insert(name.into(), tool);
    }

    /// Looks up a tool head by name.
    pub fn lookup(&self, name: &str) -> Result<LaserTool, EmitterError> {
        self.tools
            .get(name)
            .copied()
            .ok_or_else(|| EmitterError::UnknownTool {
                tool: name.to_string(),
            })
    }

    /// The registered tool head names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
