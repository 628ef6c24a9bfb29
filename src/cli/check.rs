//! Check command implementation.
//!
//! Validates scripts against the configured canvas size without drawing.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::command::{check_script, CommandRegistry};
use crate::discovery::{discover, discover_paths};
use crate::error::{CanvasError, Result};
use crate::grid::check_dimensions;
use crate::output::{display_path, plural, Printer};

use super::{read_file, CanvasArgs};

/// Validate command scripts without drawing
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Scripts or directories to check (default: discover from canvas.yaml)
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub canvas: CanvasArgs,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let (manifest, scripts) = if args.paths.is_empty() {
        let discovery = discover(Path::new("."))?;
        let manifest = args.canvas.apply(discovery.manifest);
        (manifest, discovery.scan.scripts)
    } else {
        let manifest = args.canvas.manifest()?;
        let scan = discover_paths(&args.paths, &manifest);
        (manifest, scan.scripts)
    };
    check_dimensions(manifest.width, manifest.height)?;

    let registry = CommandRegistry::builtin();
    let mut failed_lines = 0;
    let mut failed_scripts = 0;

    for path in &scripts {
        let text = read_file(path)?;
        let report = check_script(&registry, &text, manifest.width, manifest.height);

        if report.is_clean() {
            printer.status(
                "Checked",
                &format!(
                    "{} ({})",
                    display_path(path),
                    plural(report.executed, "command", "commands")
                ),
            );
        } else {
            for failure in &report.failures {
                printer.failure(path, failure);
            }
            failed_lines += report.failures.len();
            failed_scripts += 1;
        }
    }

    if failed_lines > 0 {
        return Err(CanvasError::Script {
            message: format!(
                "{} in {}",
                plural(failed_lines, "failed line", "failed lines"),
                plural(failed_scripts, "script", "scripts")
            ),
            help: Some(format!(
                "Run `promptcanvas reference --width {} --height {}` for command syntax",
                manifest.width, manifest.height
            )),
        });
    }

    printer.success(
        "Finished",
        &format!(
            "{} checked for {}x{}",
            plural(scripts.len(), "script", "scripts"),
            manifest.width,
            manifest.height
        ),
    );
    Ok(())
}
