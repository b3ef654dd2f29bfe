//! End-to-end pipeline test: build a step log, measure and render it,
//! then emit the laser program to disk the way the stripes binary does.

use std::fs;
use std::io::Cursor;

use plotkit::{render_preview, write_laser_program, Bound, Image, ToolTable};

fn sample_image() -> Image {
    let mut g = Image::new();
    g.set_speed(false, 3000);
    g.set_speed(true, 1500);
    g.note("outline");
    g.move_to(0.0, 0.0);
    g.line_to(20.0, 0.0, 75.0).unwrap();
    g.line_to(20.0, 10.0, 75.0).unwrap();
    g.line_to(0.0, 10.0, 75.0).unwrap();
    g.line_to(0.0, 0.0, 75.0).unwrap();
    g.set_origin();
    g.move_to(0.0, 0.0);
    g
}

#[test]
fn measure_render_emit_roundtrip() {
    let g = sample_image();

    // The bounding pass and the render pass replay the same image.
    let mut bound = Bound::new();
    g.plot(&mut bound).unwrap();
    let box_before = bound.bounds();

    let preview = render_preview(&g, 360, 240).unwrap();
    assert_eq!(preview.bounds, box_before.expand(4.0));

    let mut png = Vec::new();
    preview
        .image
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    assert!(!png.is_empty());

    let dir = tempfile::tempdir().unwrap();
    let nc_path = dir.path().join("sample.nc");
    let tool = ToolTable::a350_defaults().lookup("1.6").unwrap();
    let mut out = fs::File::create(&nc_path).unwrap();
    write_laser_program(&g, tool, &png, &mut out).unwrap();
    drop(out);

    let program = fs::read_to_string(&nc_path).unwrap();
    assert!(program.starts_with(";Header Start\n"));
    assert!(program.contains(";thumbnail: data:image/png;base64,"));
    assert!(program.contains("G92 X0 Y0 Z0 ;origin reset\n"));
    assert!(program.contains("G1 X20.000 Y0.000 F1500 S191\n"));
    assert!(program.ends_with("M5 ;laser off\n"));

    // Neither pass mutated the log.
    let mut again = Bound::new();
    g.plot(&mut again).unwrap();
    assert_eq!(again.bounds(), box_before);
}
