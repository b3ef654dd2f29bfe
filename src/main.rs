//! Generates laser code for stripes of different widths. The resulting
//! pattern can be used to investigate laser focus, speed and intensity.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use plotkit::{render_preview, write_laser_program, Image, LaserTool, ToolTable};

#[derive(Parser, Debug)]
#[command(
    name = "plotkit",
    version,
    about = "Generate a stripes test pattern for a laser tool head"
)]
struct Args {
    /// Destination laser file
    #[arg(long, default_value = "stripes.nc")]
    dest: PathBuf,

    /// Motion speed with laser (mm/min)
    #[arg(long, default_value_t = 3000)]
    speed: u32,

    /// Motion speed without laser (mm/min)
    #[arg(long, default_value_t = 3000)]
    fly: u32,

    /// Laser %power [0..100]
    #[arg(long, default_value_t = 80.0)]
    power: f64,

    /// Raster inside the stripes
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    fill: bool,

    /// Number of times to run over the pattern
    #[arg(long, default_value_t = 1)]
    copies: u32,

    /// Width of the PNG image embedded in the NC file
    #[arg(long, default_value_t = 720)]
    width: u32,

    /// Height of the PNG image embedded in the NC file
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Wattage of the laser tool head
    #[arg(long, default_value = "1.6")]
    laser: String,
}

/// Builds the stripe pattern: one outlined rectangle per line width from
/// 0.1 mm to 2.0 mm, optionally rastered inside with passes spaced half a
/// beam width apart.
fn build_stripes(args: &Args, tool: LaserTool) -> anyhow::Result<Image> {
    const STRIPE_LENGTH: f64 = 50.0;
    const STRIPE_GAP: f64 = 1.0;

    let beam = tool.beam_width / 2.0;
    let mut g = Image::new();
    g.set_copies(args.copies);
    g.set_speed(false, args.fly);
    g.set_speed(true, args.speed);

    let mut from = 0.0;
    let mut w = 0.1;
    while w <= 2.0 + 1e-9 {
        g.note(format!("line width {:.2}mm", w));
        g.move_to(0.0, from);
        g.line_to(STRIPE_LENGTH, from, args.power)?;
        g.line_to(STRIPE_LENGTH, from + w, args.power)?;
        g.line_to(0.0, from + w, args.power)?;
        g.line_to(0.0, from, args.power)?;

        if args.fill {
            let mut y = from + beam;
            while y < from + w - beam / 2.0 {
                g.move_to(0.0, y);
                g.line_to(STRIPE_LENGTH, y, args.power)?;
                y += beam;
            }
        }

        from += w + STRIPE_GAP;
        w += 0.1;
    }

    g.move_to(0.0, 0.0);
    Ok(g)
}

fn main() -> anyhow::Result<()> {
    plotkit::init_logging()?;
    let args = Args::parse();

    let tool = ToolTable::a350_defaults().lookup(&args.laser)?;
    let g = build_stripes(&args, tool)?;
    info!(steps = g.len(), "built stripe pattern");

    let preview = render_preview(&g, args.width, args.height)?;
    let mut png = Vec::new();
    preview
        .image
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .context("failed to encode preview PNG")?;

    let png_path = args.dest.with_extension("nc.png");
    fs::write(&png_path, &png)
        .with_context(|| format!("failed to write preview to {}", png_path.display()))?;

    let mut out = fs::File::create(&args.dest)
        .with_context(|| format!("failed to create {}", args.dest.display()))?;
    write_laser_program(&g, tool, &png, &mut out)?;

    info!(
        "generated {} and {}",
        args.dest.display(),
        png_path.display()
    );
    Ok(())
}
