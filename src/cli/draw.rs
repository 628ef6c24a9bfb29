//! Draw command implementation.
//!
//! Runs each script on a fresh canvas and writes a PNG per script.

use std::path::PathBuf;

use clap::Args;

use crate::canvas::Canvas;
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::render::{write_png, NullPresenter};

use super::{ensure_dir, read_file, stem, write_file, CanvasArgs};

/// Run command scripts and write PNG images
#[derive(Args, Debug)]
pub struct DrawArgs {
    /// Scripts to run
    #[arg(required = true)]
    pub scripts: Vec<PathBuf>,

    /// Output directory (default: `output` from canvas.yaml)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub canvas: CanvasArgs,

    /// Print the pixels each script changed
    #[arg(long)]
    pub changes: bool,

    /// Also write the canvas state as `<name>.json`
    #[arg(long)]
    pub capture: bool,
}

/// Totals over every script drawn.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DrawSummary {
    pub scripts: usize,
    pub commands: usize,
    pub failures: usize,
}

pub fn run(args: DrawArgs, printer: &Printer) -> Result<DrawSummary> {
    let manifest = args.canvas.manifest()?;
    let output = args.output.clone().unwrap_or_else(|| manifest.output.clone());
    ensure_dir(&output)?;

    let mut summary = DrawSummary::default();

    for path in &args.scripts {
        printer.status("Drawing", &display_path(path));
        let text = read_file(path)?;

        let mut canvas = Canvas::from_manifest(&manifest)?.with_presenter(NullPresenter);
        if args.changes {
            canvas.start_tracking();
        }
        let report = canvas.process_commands(&text);
        canvas.stop_tracking();

        for failure in &report.failures {
            printer.failure(path, failure);
        }

        let name = stem(path);
        let png_path = output.join(format!("{}.png", name));
        write_png(canvas.grid(), &png_path, canvas.pixel_size())?;

        if args.capture {
            let json_path = output.join(format!("{}.json", name));
            write_file(&json_path, &canvas.capture_state().to_json()?)?;
        }

        if args.changes && !canvas.changes().is_empty() {
            println!("{}", canvas.change_summary());
        }

        printer.info(
            "Wrote",
            &format!(
                "{} ({})",
                display_path(&png_path),
                plural(report.pixels, "pixel", "pixels")
            ),
        );

        summary.scripts += 1;
        summary.commands += report.executed;
        summary.failures += report.failures.len();
    }

    let mut message = format!(
        "{} to {}",
        plural(summary.scripts, "script", "scripts"),
        display_path(&output)
    );
    if summary.failures > 0 {
        message.push_str(&format!(
            " ({})",
            plural(summary.failures, "failed line", "failed lines")
        ));
    }
    printer.success("Finished", &message);

    Ok(summary)
}
