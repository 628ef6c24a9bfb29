//! `canvas.yaml`: canvas defaults plus where scripts live and where output goes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, Result};
use crate::grid::DEFAULT_DIMENSION;

/// Display scale used when nothing else is configured.
pub const DEFAULT_PIXEL_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub width: usize,
    pub height: usize,

    /// Image pixels per cell when rendering.
    pub pixel_size: u32,

    /// Where PNGs and captures are written.
    pub output: PathBuf,

    /// Cap on stored undo snapshots. Unbounded if absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,

    /// Script directories, relative to the manifest. Empty means the
    /// manifest's own directory.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,

    /// Glob-ish patterns for paths discovery should skip.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            width: DEFAULT_DIMENSION,
            height: DEFAULT_DIMENSION,
            pixel_size: DEFAULT_PIXEL_SIZE,
            output: PathBuf::from("dist"),
            history_limit: None,
            sources: Vec::new(),
            excludes: Vec::new(),
        }
    }
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        std::fs::read_to_string(path)
            .map_err(|e| CanvasError::Io {
                path: path.to_path_buf(),
                message: format!("Cannot read manifest: {}", e),
            })
            .and_then(|yaml| Self::parse(&yaml))
    }

    /// `dir/canvas.yaml` when it exists, defaults otherwise.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join(super::MANIFEST_FILENAME);
        match path.is_file() {
            true => Self::load(&path),
            false => Ok(Self::default()),
        }
    }

    /// Blank text yields the defaults.
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| CanvasError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check canvas.yaml syntax".to_string()),
        })
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| CanvasError::Parse {
            message: format!("Cannot serialize manifest: {}", e),
            help: None,
        })
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.excludes.iter().any(|p| Exclude::from(p.as_str()).matches(&path))
    }

    pub fn effective_sources(&self) -> Vec<String> {
        match self.sources.is_empty() {
            true => vec![".".to_string()],
            false => self.sources.clone(),
        }
    }
}

/// The pattern shapes `excludes` understands.
enum Exclude<'a> {
    /// `*.bak`
    Suffix(&'a str),
    /// `drafts/*` or `**/drafts/*`: a directory at any depth.
    Directory(&'a str),
    /// `**/name`
    Anywhere(&'a str),
    Substring(&'a str),
}

impl<'a> From<&'a str> for Exclude<'a> {
    fn from(pattern: &'a str) -> Self {
        let rest = pattern.strip_prefix("**/");
        if let Some(dir) = rest.unwrap_or(pattern).strip_suffix("/*") {
            return Exclude::Directory(dir);
        }
        if let Some(name) = rest {
            return Exclude::Anywhere(name);
        }
        match pattern.strip_prefix('*') {
            Some(suffix) if !pattern.contains('/') => Exclude::Suffix(suffix),
            _ => Exclude::Substring(pattern),
        }
    }
}

impl Exclude<'_> {
    fn matches(&self, path: &str) -> bool {
        match *self {
            Exclude::Suffix(suffix) => path.ends_with(suffix),
            Exclude::Directory(dir) => {
                path.starts_with(&format!("{dir}/")) || path.contains(&format!("/{dir}/"))
            }
            Exclude::Anywhere(name) | Exclude::Substring(name) => path.contains(name),
        }
    }
}
