//! Locating a project's `canvas.yaml` and the `.canvas` scripts it covers.
//!
//! With no manifest present, the whole project directory is scanned and the
//! canvas falls back to [`Manifest::default`].

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use manifest::{Manifest, DEFAULT_PIXEL_SIZE};
pub use scanner::{is_script, scan_directory, scan_sources, ScanResult, SCRIPT_EXTENSION};

pub const MANIFEST_FILENAME: &str = "canvas.yaml";

/// A project root together with its settings and scripts.
#[derive(Debug)]
pub struct DiscoveryResult {
    pub root: PathBuf,
    pub manifest: Manifest,
    /// False when the defaults were used.
    pub has_manifest: bool,
    pub scan: ScanResult,
}

/// Load `root/canvas.yaml` if present and scan its sources for scripts.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();
    let manifest_file = root.join(MANIFEST_FILENAME);

    let has_manifest = manifest_file.is_file();
    let manifest = match has_manifest {
        true => Manifest::load(&manifest_file)?,
        false => Manifest::default(),
    };
    let scan = scan_sources(&manifest.effective_sources(), &root, &manifest);

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        scan,
    })
}

/// Scripts named on the command line. Directories are scanned; files are
/// taken whatever their extension.
pub fn discover_paths(paths: &[PathBuf], manifest: &Manifest) -> ScanResult {
    let (dirs, files): (Vec<&PathBuf>, Vec<&PathBuf>) = paths.iter().partition(|p| p.is_dir());

    let mut scan = ScanResult::new();
    scan.merge(ScanResult {
        scripts: files.into_iter().cloned().collect(),
    });
    for dir in dirs {
        scan.merge(scan_directory(dir, manifest));
    }
    scan
}
