//! Reference command implementation.

use clap::Args;

use crate::command::CommandRegistry;
use crate::error::Result;
use crate::grid::check_dimensions;

use super::CanvasArgs;

/// Print the command reference for a canvas size
#[derive(Args, Debug)]
pub struct ReferenceArgs {
    #[command(flatten)]
    pub canvas: CanvasArgs,
}

pub fn run(args: ReferenceArgs) -> Result<()> {
    let manifest = args.canvas.manifest()?;
    check_dimensions(manifest.width, manifest.height)?;
    println!(
        "{}",
        CommandRegistry::builtin().reference(manifest.width, manifest.height)
    );
    Ok(())
}
