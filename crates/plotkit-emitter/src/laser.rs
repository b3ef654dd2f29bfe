//! Snapmaker A350 laser program emission.
//!
//! The emitter is its own consumer of the step log: it walks
//! [`Image::steps`] directly rather than going through the replay engine,
//! because comments, feed-rate changes and the copy count never reach a
//! [`Plotter`](plotkit_core::Plotter). Origin resets become `G92`, so the
//! controller applies the same consumer-side origin interpretation the
//! other consumers keep in their own accumulators.

use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::debug;

use plotkit_core::{Command, Image, Step};

use crate::error::EmitterError;
use crate::tools::LaserTool;

/// Marlin laser power range for the `S` parameter.
const POWER_SCALE: f64 = 255.0;

fn power_s(power: f64) -> u32 {
    (power / 100.0 * POWER_SCALE).round() as u32
}

/// Writes the full Snapmaker-flavor Marlin program for an image.
///
/// `preview_png` is the encoded preview raster, embedded base64 in the
/// header so the touchscreen can show a thumbnail. The body is repeated
/// `image.copies()` times.
pub fn write_laser_program<W: Write>(
    image: &Image,
    tool: LaserTool,
    preview_png: &[u8],
    out: &mut W,
) -> Result<(), EmitterError> {
    debug!(
        steps = image.len(),
        copies = image.copies(),
        watts = tool.watts,
        "emitting laser program"
    );
    write_header(image, tool, preview_png, out)?;

    for pass in 1..=image.copies() {
        if image.copies() > 1 {
            writeln!(out, ";pass {} of {}", pass, image.copies())?;
        }
        write_body(image, out)?;
    }

    writeln!(out, "M5 ;laser off")?;
    Ok(())
}

fn write_header<W: Write>(
    image: &Image,
    tool: LaserTool,
    preview_png: &[u8],
    out: &mut W,
) -> Result<(), EmitterError> {
    let max_power = image
        .steps()
        .iter()
        .filter(|s| s.active)
        .map(|s| s.power)
        .fold(0.0f64, f64::max);

    writeln!(out, ";Header Start")?;
    writeln!(out, ";header_type: laser")?;
    writeln!(out, ";machine: A350")?;
    writeln!(out, ";tool_head: {}W laser", tool.watts)?;
    writeln!(out, ";gcode_flavor: marlin")?;
    writeln!(out, ";renderMethod: line")?;
    writeln!(out, ";max_power: {:.1}", max_power)?;
    writeln!(
        out,
        ";generated_at: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(
        out,
        ";thumbnail: data:image/png;base64,{}",
        STANDARD.encode(preview_png)
    )?;
    writeln!(out, ";Header End")?;
    writeln!(out, "G90 ;absolute positioning")?;
    writeln!(out, "G21 ;millimeter units")?;
    writeln!(out, "M3 S0 ;laser on, zero power")?;
    Ok(())
}

/// One traversal of the step log, translating each step.
fn write_body<W: Write>(image: &Image, out: &mut W) -> Result<(), EmitterError> {
    // Feed rates arrive as speed-setting steps and attach to the moves
    // that follow. Zero means no feed has been set yet.
    let mut cut_feed: u32 = 0;
    let mut travel_feed: u32 = 0;

    for step in image.steps() {
        if !step.comment.is_empty() {
            writeln!(out, ";{}", step.comment)?;
            continue;
        }
        if let Some(cmd) = step.command {
            match cmd {
                Command::SetOrigin => writeln!(out, "G92 X0 Y0 Z0 ;origin reset")?,
                _ => debug!(?cmd, "skipping control command with no G-code mapping"),
            }
            continue;
        }
        if step.speed > 0 && step.rel && step.x == 0.0 && step.y == 0.0 && step.z == 0.0 {
            if step.active {
                cut_feed = step.speed;
            } else {
                travel_feed = step.speed;
            }
            continue;
        }
        if step.rel {
            write_relative(step, cut_feed, travel_feed, out)?;
            continue;
        }
        if step.active {
            write!(out, "G1 X{:.3} Y{:.3}", step.x, step.y)?;
            if cut_feed > 0 {
                write!(out, " F{}", cut_feed)?;
            }
            writeln!(out, " S{}", power_s(step.power))?;
        } else {
            write!(out, "G0 X{:.3} Y{:.3}", step.x, step.y)?;
            if travel_feed > 0 {
                write!(out, " F{}", travel_feed)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

/// A relative step becomes a `G91`-wrapped move so the running absolute
/// mode is untouched. The builder only produces Z deltas here, but any
/// nonzero axis is carried.
fn write_relative<W: Write>(
    step: &Step,
    cut_feed: u32,
    travel_feed: u32,
    out: &mut W,
) -> Result<(), EmitterError> {
    writeln!(out, "G91")?;
    let code = if step.active { "G1" } else { "G0" };
    write!(out, "{}", code)?;
    if step.x != 0.0 {
        write!(out, " X{:.3}", step.x)?;
    }
    if step.y != 0.0 {
        write!(out, " Y{:.3}", step.y)?;
    }
    if step.z != 0.0 {
        write!(out, " Z{:.3}", step.z)?;
    }
    if step.active {
        if cut_feed > 0 {
            write!(out, " F{}", cut_feed)?;
        }
        write!(out, " S{}", power_s(step.power))?;
    } else if travel_feed > 0 {
        write!(out, " F{}", travel_feed)?;
    }
    writeln!(out)?;
    writeln!(out, "G90")?;
    Ok(())
}

/// Emits the program into a `String`.
pub fn laser_program(
    image: &Image,
    tool: LaserTool,
    preview_png: &[u8],
) -> Result<String, EmitterError> {
    let mut buf = Vec::new();
    write_laser_program(image, tool, preview_png, &mut buf)?;
    // The emitter only ever writes UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolTable;

    fn tool() -> LaserTool {
        ToolTable::a350_defaults().lookup("1.6").unwrap()
    }

    fn stripes_like_image() -> Image {
        let mut im = Image::new();
        im.set_speed(false, 3000);
        im.set_speed(true, 1200);
        im.note("first stripe");
        im.move_to(0.0, 0.0);
        im.line_to(10.0, 0.0, 80.0).unwrap();
        im
    }

    #[test]
    fn test_header_and_footer_frame_the_program() {
        let program = laser_program(&stripes_like_image(), tool(), b"png-bytes").unwrap();
        assert!(program.starts_with(";Header Start\n"));
        assert!(program.contains(";machine: A350\n"));
        assert!(program.contains(";tool_head: 1.6W laser\n"));
        assert!(program.contains(";max_power: 80.0\n"));
        assert!(program.contains(&format!(
            ";thumbnail: data:image/png;base64,{}\n",
            STANDARD.encode(b"png-bytes")
        )));
        assert!(program.ends_with("M5 ;laser off\n"));
    }

    #[test]
    fn test_speed_steps_set_feed_for_following_moves() {
        let program = laser_program(&stripes_like_image(), tool(), b"").unwrap();
        assert!(program.contains("G0 X0.000 Y0.000 F3000\n"));
        // 80% of 255 rounds to 204.
        assert!(program.contains("G1 X10.000 Y0.000 F1200 S204\n"));
    }

    #[test]
    fn test_comments_become_semicolon_lines() {
        let program = laser_program(&stripes_like_image(), tool(), b"").unwrap();
        assert!(program.contains(";first stripe\n"));
    }

    #[test]
    fn test_origin_reset_becomes_g92() {
        let mut im = Image::new();
        im.move_to(5.0, 5.0);
        im.set_origin();
        let program = laser_program(&im, tool(), b"").unwrap();
        assert!(program.contains("G92 X0 Y0 Z0 ;origin reset\n"));
    }

    #[test]
    fn test_relative_steps_are_g91_wrapped() {
        let mut im = Image::new();
        im.raise(2.0);
        im.drill(-2.0, 100.0);
        let program = laser_program(&im, tool(), b"").unwrap();
        assert!(program.contains("G91\nG0 Z2.000\nG90\n"));
        assert!(program.contains("G91\nG1 Z-2.000 S255\nG90\n"));
    }

    #[test]
    fn test_copies_repeat_the_body() {
        let mut im = stripes_like_image();
        im.set_copies(3);
        let program = laser_program(&im, tool(), b"").unwrap();
        assert_eq!(program.matches("G1 X10.000").count(), 3);
        assert!(program.contains(";pass 1 of 3\n"));
        assert!(program.contains(";pass 3 of 3\n"));
        // The header and footer appear once.
        assert_eq!(program.matches(";Header Start").count(), 1);
        assert_eq!(program.matches("M5 ;laser off").count(), 1);
    }

    #[test]
    fn test_moves_before_any_speed_step_omit_feed() {
        let mut im = Image::new();
        im.move_to(1.0, 1.0);
        im.line_to(2.0, 2.0, 50.0).unwrap();
        let program = laser_program(&im, tool(), b"").unwrap();
        assert!(program.contains("G0 X1.000 Y1.000\n"));
        assert!(program.contains("G1 X2.000 Y2.000 S128\n"));
    }
}
