//! The step log and its builder API.
//!
//! An [`Image`] is an ordered, append-only sequence of [`Step`] values:
//! insertion order is execution order and is never reordered. Builder calls
//! validate locally, append at most one step, and never inspect prior steps,
//! so the log can be replayed any number of times with identical results.

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, Result};

/// Control operations carried by a step instead of a coordinate payload.
///
/// Steps without a control operation carry `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Command {
    /// Make the current tool position the new (0,0,0) for subsequent
    /// absolute coordinates. The effect is entirely consumer-side: each
    /// [`Plotter`](crate::Plotter) tracks its own origin offset.
    SetOrigin,
}

/// One atom of recorded machine work.
///
/// The meaning of `x`, `y`, `z` depends on `rel`: deltas applied to the
/// running pen position when true, an absolute (x, y) destination when false.
/// An absolute step never changes z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// X coordinate or delta.
    pub x: f64,
    /// Y coordinate or delta.
    pub y: f64,
    /// Z delta; only meaningful on relative steps.
    pub z: f64,
    /// Relative motion flag.
    pub rel: bool,
    /// Tool engaged (cutting/drilling) while moving.
    pub active: bool,
    /// Tool power in percent [0, 100]; meaningful only when `active`.
    pub power: f64,
    /// Feed rate (mm/min); meaningful only on speed-setting steps.
    pub speed: u32,
    /// When non-empty the step carries no geometry and every consumer
    /// skips it.
    pub comment: String,
    /// Control operation, dispatched separately from motion.
    pub command: Option<Command>,
}

impl Default for Step {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            rel: false,
            active: false,
            power: 0.0,
            speed: 0,
            comment: String::new(),
            command: None,
        }
    }
}

impl Step {
    /// An absolute travel step to (x, y).
    fn move_xy(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }
}

/// An ordered series of [`Step`] values plus a whole-program copy count.
///
/// The log is append-only: builder methods grow it monotonically and replay
/// never mutates it, so the bounding-box pass and the render pass see the
/// same input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    steps: Vec<Step>,
    copies: u32,
}

impl Default for Image {
    fn default() -> Self {
        Self::new()
    }
}

impl Image {
    /// Starts a new, empty image with a copy count of 1.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            copies: 1,
        }
    }

    /// The recorded steps, in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when no step has been recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of times the whole sequence should be run by the emitter.
    pub fn copies(&self) -> u32 {
        self.copies
    }

    /// Sets the copy count. Values below 1 are clamped to 1.
    pub fn set_copies(&mut self, copies: u32) {
        self.copies = copies.max(1);
    }

    /// Adds a comment to the step stream. Comment steps carry no geometry
    /// and are skipped by every consumer.
    pub fn note(&mut self, note: impl Into<String>) {
        self.steps.push(Step {
            comment: note.into(),
            ..Step::default()
        });
    }

    /// Sets the feed rate (mm/min) used for subsequent active or inactive
    /// moves, depending on `active`.
    pub fn set_speed(&mut self, active: bool, speed: u32) {
        self.steps.push(Step {
            speed,
            rel: true,
            active,
            ..Step::default()
        });
    }

    /// Relocates the tool head to (x, y) without the tool being active.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.steps.push(Step::move_xy(x, y));
    }

    /// Cuts a line from the current location to (x, y) with a power level
    /// in [0, 100]. Fails with [`PlotError::InvalidPower`] without touching
    /// the log when the power is out of range.
    pub fn line_to(&mut self, x: f64, y: f64, power: f64) -> Result<()> {
        if !(0.0..=100.0).contains(&power) {
            return Err(PlotError::InvalidPower { power });
        }
        let mut step = Step::move_xy(x, y);
        step.active = true;
        step.power = power;
        self.steps.push(step);
        Ok(())
    }

    /// Changes the relative Z value without any line drawn. A zero delta is
    /// a successful no-op: nothing is appended.
    pub fn raise(&mut self, dz: f64) {
        if dz == 0.0 {
            return;
        }
        self.steps.push(Step {
            z: dz,
            rel: true,
            ..Step::default()
        });
    }

    /// Changes the relative Z value while the tool is engaged. Lower while
    /// drilling by providing a negative `dz`. A zero delta is a successful
    /// no-op. Power is not range-checked here.
    pub fn drill(&mut self, dz: f64, power: f64) {
        if dz == 0.0 {
            return;
        }
        self.steps.push(Step {
            z: dz,
            power,
            active: true,
            rel: true,
            ..Step::default()
        });
    }

    /// Records an origin reset: the current location becomes the new
    /// (0,0,0) for subsequent absolute coordinates, as interpreted by each
    /// consumer.
    pub fn set_origin(&mut self) {
        self.steps.push(Step {
            command: Some(Command::SetOrigin),
            ..Step::default()
        });
    }
}
