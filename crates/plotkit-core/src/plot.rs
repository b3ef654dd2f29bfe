//! Replay of a step log through a [`Plotter`].
//!
//! The replay engine is a single-pass state machine: it walks the steps in
//! log order, maintains the running pen position, and dispatches to the
//! given plotter. It performs no validation of its own and aborts on the
//! first plotter error. Origin-reset semantics live entirely inside each
//! plotter; the engine is oblivious to them.

use tracing::debug;

use crate::error::Result;
use crate::image::{Command, Image};

/// Consumer capability for a replayed step log.
///
/// The bounding-box and preview consumers in this workspace implement it,
/// and so can any externally defined consumer such as a hardware code
/// emitter. Implementations must reject control commands they do not
/// support with [`PlotError::UnsupportedCommand`](crate::PlotError::UnsupportedCommand).
pub trait Plotter {
    /// Dispatch a control operation.
    fn command(&mut self, cmd: Command) -> Result<()>;

    /// Travel to an absolute device-independent position.
    fn move_to(&mut self, x: f64, y: f64, z: f64) -> Result<()>;

    /// Cut/draw to an absolute device-independent position.
    fn line_to(&mut self, x: f64, y: f64, z: f64) -> Result<()>;
}

impl Image {
    /// Executes the image once using the provided plotter.
    ///
    /// Steps are processed strictly in log order with no batching or
    /// coalescing. Comment steps are skipped outright. Command steps are
    /// dispatched without updating pen state. Relative steps advance the
    /// pen and always dispatch `move_to`, even when active: a z-only drill
    /// has no 2D line to draw. Absolute steps set the (x, y) pen position,
    /// leave z unchanged, and dispatch `line_to` when active, `move_to`
    /// otherwise.
    ///
    /// The first plotter error aborts the pass; calls already dispatched
    /// are not undone. The image itself is never mutated, so the same image
    /// can be replayed repeatedly with identical results.
    pub fn plot<P: Plotter>(&self, plotter: &mut P) -> Result<()> {
        let (mut pen_x, mut pen_y, mut pen_z) = (0.0f64, 0.0f64, 0.0f64);
        debug!(steps = self.len(), "replaying step log");
        for step in self.steps() {
            if !step.comment.is_empty() {
                continue;
            }
            if let Some(cmd) = step.command {
                plotter.command(cmd)?;
                continue;
            }
            if step.rel {
                pen_x += step.x;
                pen_y += step.y;
                // z only ever changes through relative motion.
                pen_z += step.z;
                plotter.move_to(pen_x, pen_y, pen_z)?;
                continue;
            }
            pen_x = step.x;
            pen_y = step.y;
            if step.active {
                plotter.line_to(pen_x, pen_y, pen_z)?;
            } else {
                plotter.move_to(pen_x, pen_y, pen_z)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlotError;

    /// Records every dispatched operation for snapshot-style assertions.
    #[derive(Debug, Default, PartialEq)]
    struct Recorder {
        ops: Vec<String>,
    }

    impl Plotter for Recorder {
        fn command(&mut self, cmd: Command) -> Result<()> {
            self.ops.push(format!("command({cmd:?})"));
            Ok(())
        }

        fn move_to(&mut self, x: f64, y: f64, z: f64) -> Result<()> {
            self.ops.push(format!("move_to({x}, {y}, {z})"));
            Ok(())
        }

        fn line_to(&mut self, x: f64, y: f64, z: f64) -> Result<()> {
            self.ops.push(format!("line_to({x}, {y}, {z})"));
            Ok(())
        }
    }

    /// Fails every call after the first `ok_for` successes.
    struct FailAfter {
        ok_for: usize,
        calls: usize,
    }

    impl Plotter for FailAfter {
        fn command(&mut self, cmd: Command) -> Result<()> {
            self.calls += 1;
            if self.calls > self.ok_for {
                return Err(PlotError::UnsupportedCommand { command: cmd });
            }
            Ok(())
        }

        fn move_to(&mut self, _x: f64, _y: f64, _z: f64) -> Result<()> {
            self.calls += 1;
            if self.calls > self.ok_for {
                return Err(PlotError::InvalidPower { power: -1.0 });
            }
            Ok(())
        }

        fn line_to(&mut self, x: f64, y: f64, z: f64) -> Result<()> {
            self.move_to(x, y, z)
        }
    }

    #[test]
    fn test_comments_are_skipped() {
        let mut im = Image::new();
        im.note("x");
        im.move_to(1.0, 1.0);
        im.note("y");

        let mut rec = Recorder::default();
        im.plot(&mut rec).unwrap();
        assert_eq!(rec.ops, vec!["move_to(1, 1, 0)"]);
    }

    #[test]
    fn test_relative_active_step_dispatches_move_only() {
        let mut im = Image::new();
        im.drill(-2.0, 50.0);

        let mut rec = Recorder::default();
        im.plot(&mut rec).unwrap();
        // A drill is active but relative: one move_to, no line_to.
        assert_eq!(rec.ops, vec!["move_to(0, 0, -2)"]);
    }

    #[test]
    fn test_relative_deltas_accumulate_and_absolute_keeps_z() {
        let mut im = Image::new();
        im.raise(2.0);
        im.raise(3.0);
        im.move_to(10.0, 20.0);
        im.line_to(11.0, 21.0, 60.0).unwrap();

        let mut rec = Recorder::default();
        im.plot(&mut rec).unwrap();
        assert_eq!(
            rec.ops,
            vec![
                "move_to(0, 0, 2)",
                "move_to(0, 0, 5)",
                "move_to(10, 20, 5)",
                "line_to(11, 21, 5)",
            ]
        );
    }

    #[test]
    fn test_replay_is_deterministic_and_leaves_image_unchanged() {
        let mut im = Image::new();
        im.set_speed(true, 3000);
        im.move_to(1.0, 2.0);
        im.line_to(3.0, 4.0, 80.0).unwrap();
        im.set_origin();
        im.move_to(0.5, 0.5);
        let snapshot = im.clone();

        let mut first = Recorder::default();
        let mut second = Recorder::default();
        im.plot(&mut first).unwrap();
        im.plot(&mut second).unwrap();

        assert_eq!(first, second);
        assert_eq!(im, snapshot);
    }

    #[test]
    fn test_first_error_aborts_the_pass() {
        let mut im = Image::new();
        im.move_to(1.0, 1.0);
        im.move_to(2.0, 2.0);
        im.move_to(3.0, 3.0);

        let mut plotter = FailAfter { ok_for: 2, calls: 0 };
        assert!(im.plot(&mut plotter).is_err());
        // Two dispatches succeeded, the third failed, nothing followed.
        assert_eq!(plotter.calls, 3);
    }

    #[test]
    fn test_command_error_propagates() {
        let mut im = Image::new();
        im.set_origin();

        let mut plotter = FailAfter { ok_for: 0, calls: 0 };
        assert_eq!(
            im.plot(&mut plotter),
            Err(PlotError::UnsupportedCommand {
                command: Command::SetOrigin
            })
        );
    }
}
