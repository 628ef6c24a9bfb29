//! Restore command implementation.
//!
//! Turns a JSON capture back into a PNG.

use std::path::PathBuf;

use clap::Args;

use crate::canvas::{Canvas, CanvasCapture};
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::render::{write_png, NullPresenter};

use super::read_file;

/// Render a JSON capture back to a PNG image
#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Capture file produced by `capture` or `draw --capture`
    pub capture: PathBuf,

    /// Output PNG (default: the capture path with a .png extension)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Image pixels per cell (default: the captured pixel size)
    #[arg(long)]
    pub scale: Option<u32>,
}

pub fn run(args: RestoreArgs, printer: &Printer) -> Result<()> {
    let capture = CanvasCapture::from_json(&read_file(&args.capture)?)?;
    let dims = capture.dimensions;

    let mut canvas = Canvas::new(dims.width, dims.height)?.with_presenter(NullPresenter);
    canvas.restore_state(&capture)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.capture.with_extension("png"));
    let scale = args.scale.unwrap_or(canvas.pixel_size());
    write_png(canvas.grid(), &output, scale)?;

    printer.success(
        "Restored",
        &format!(
            "{} ({}, {}x{})",
            display_path(&output),
            plural(capture.pixels.len(), "pixel", "pixels"),
            dims.width,
            dims.height
        ),
    );
    Ok(())
}
