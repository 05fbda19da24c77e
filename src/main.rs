#![warn(clippy::all, rust_2018_idioms)]

use std::path::PathBuf;
use std::process::ExitCode;

use simple_draw::ImageFormat;
use simple_draw::save::{self, FsSink, SaveRequest};

const USAGE: &str = "usage: simple-draw <input.svg> [output.svg]";

fn main() -> ExitCode {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let Some(input) = args.next() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };
    let output = args.next();

    let drawing = match save::open_drawing(&input) {
        Ok(drawing) => drawing,
        Err(err) => {
            log::error!("{}: {}", input.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let bounds = drawing.bounds();
    println!(
        "{}: {}x{} canvas, {} strokes, {} points",
        input.display(),
        drawing.width(),
        drawing.height(),
        drawing.len(),
        drawing.point_count()
    );
    if drawing.is_empty() {
        println!("  (empty drawing)");
    } else {
        println!(
            "  strokes cover ({}, {}) - ({}, {})",
            bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y
        );
    }

    let Some(output) = output else {
        return ExitCode::SUCCESS;
    };

    // Re-save in the normalized form produced by the exporter
    let folder = output.parent().map(PathBuf::from).unwrap_or_default();
    let filename = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let request = SaveRequest::new(folder, filename, ImageFormat::Svg);

    match save::save_drawing(&drawing, &request, &mut FsSink, None) {
        Ok(path) => {
            println!("wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{}: {}", output.display(), err);
            ExitCode::FAILURE
        }
    }
}
