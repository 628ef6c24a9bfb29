//! Capture command implementation.

use std::path::PathBuf;

use clap::Args;

use crate::canvas::Canvas;
use crate::error::Result;
use crate::output::{display_path, Printer};
use crate::render::NullPresenter;

use super::{read_file, CanvasArgs};

/// Run a script and print the canvas state as JSON
#[derive(Args, Debug)]
pub struct CaptureArgs {
    /// Script to run
    pub script: PathBuf,

    #[command(flatten)]
    pub canvas: CanvasArgs,
}

/// Run the script and return the capture JSON. Failures are printed as warnings.
pub fn capture(args: &CaptureArgs, printer: &Printer) -> Result<String> {
    let manifest = args.canvas.manifest()?;
    let text = read_file(&args.script)?;

    let mut canvas = Canvas::from_manifest(&manifest)?.with_presenter(NullPresenter);
    let report = canvas.process_commands(&text);
    for failure in &report.failures {
        printer.failure(&args.script, failure);
    }

    canvas.capture_state().to_json()
}

pub fn run(args: CaptureArgs, printer: &Printer) -> Result<()> {
    let json = capture(&args, printer)?;
    println!("{}", json);
    printer.success("Captured", &display_path(&args.script));
    Ok(())
}
