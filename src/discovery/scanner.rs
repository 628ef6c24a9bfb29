//! Finds `.canvas` command scripts on disk.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::manifest::Manifest;

/// File extension of command scripts.
pub const SCRIPT_EXTENSION: &str = "canvas";

/// Scripts found by a scan, in sorted order.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub scripts: Vec<PathBuf>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Absorb `other`, keeping the list sorted and free of repeats.
    pub fn merge(&mut self, other: ScanResult) {
        self.scripts.extend(other.scripts);
        self.scripts.sort();
        self.scripts.dedup();
    }
}

/// Walk `root` for scripts the manifest does not exclude.
///
/// A missing root yields an empty result rather than an error.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> ScanResult {
    if !root.exists() {
        return ScanResult::new();
    }

    let scripts = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .flatten()
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| is_script(path) && !manifest.is_excluded(path))
        .collect();

    ScanResult { scripts }
}

/// Scan each manifest source, resolving relative entries against `base`.
pub fn scan_sources(sources: &[String], base: &Path, manifest: &Manifest) -> ScanResult {
    sources
        .iter()
        .map(|source| base.join(source))
        .fold(ScanResult::new(), |mut acc, dir| {
            acc.merge(scan_directory(&dir, manifest));
            acc
        })
}

/// Check whether a path names a command script.
pub fn is_script(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(SCRIPT_EXTENSION)
}
