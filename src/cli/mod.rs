pub mod capture;
pub mod check;
pub mod completions;
pub mod draw;
pub mod init;
pub mod reference;
pub mod restore;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::discovery::Manifest;
use crate::error::{CanvasError, Result};

/// promptcanvas - pixel canvas driven by a line-oriented drawing language
#[derive(Parser, Debug)]
#[command(name = "promptcanvas")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run command scripts and write PNG images
    Draw(draw::DrawArgs),

    /// Validate command scripts without drawing
    Check(check::CheckArgs),

    /// Run a script and print the canvas state as JSON
    Capture(capture::CaptureArgs),

    /// Render a JSON capture back to a PNG image
    Restore(restore::RestoreArgs),

    /// Print the command reference for a canvas size
    Reference(reference::ReferenceArgs),

    /// Initialize a project (generates canvas.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Canvas settings shared by subcommands. Flags override canvas.yaml.
#[derive(Args, Debug, Clone, Default)]
pub struct CanvasArgs {
    /// Manifest to read defaults from (default: ./canvas.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Canvas width in cells
    #[arg(long)]
    pub width: Option<usize>,

    /// Canvas height in cells
    #[arg(long)]
    pub height: Option<usize>,

    /// Image pixels per cell
    #[arg(long)]
    pub scale: Option<u32>,
}

impl CanvasArgs {
    /// Load the manifest and apply any overrides given on the command line.
    pub fn manifest(&self) -> Result<Manifest> {
        let manifest = match &self.config {
            Some(path) => Manifest::load(path)?,
            None => Manifest::load_or_default(Path::new("."))?,
        };
        Ok(self.apply(manifest))
    }

    pub fn apply(&self, mut manifest: Manifest) -> Manifest {
        if let Some(width) = self.width {
            manifest.width = width;
        }
        if let Some(height) = self.height {
            manifest.height = height;
        }
        if let Some(scale) = self.scale {
            manifest.pixel_size = scale;
        }
        manifest
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| CanvasError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })
}

pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| CanvasError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write file: {}", e),
    })
}

pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| CanvasError::Io {
        path: dir.to_path_buf(),
        message: format!("Failed to create output directory: {}", e),
    })
}

/// File stem of a script, used to name its outputs.
pub(crate) fn stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("canvas")
        .to_string()
}
