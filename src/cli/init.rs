//! Init command implementation.
//!
//! Generates a `canvas.yaml` manifest, listing the directories that already
//! hold scripts.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{scan_directory, Manifest, MANIFEST_FILENAME};
use crate::error::{CanvasError, Result};
use crate::output::{display_path, plural, Printer};

use super::{write_file, CanvasArgs};

/// Initialize a project by generating a canvas.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing canvas.yaml
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub canvas: CanvasArgs,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(CanvasError::Io {
            path: manifest_path,
            message: format!("{} already exists", MANIFEST_FILENAME),
        });
    }

    printer.status("Scanning", &display_path(&args.path));
    let scripts = scan_directory(&args.path, &Manifest::default()).scripts;

    let mut manifest = args.canvas.apply(Manifest::default());
    manifest.sources = source_dirs(&args.path, &scripts);

    write_file(&manifest_path, &manifest.to_yaml()?)?;

    if !manifest.sources.is_empty() {
        printer.info("Discovered", &manifest.sources.join(", "));
    }
    printer.success(
        "Created",
        &format!(
            "{} ({} found)",
            MANIFEST_FILENAME,
            plural(scripts.len(), "script", "scripts")
        ),
    );

    Ok(())
}

/// Directories holding `scripts`, relative to `root` with a trailing `/`.
/// Empty when everything sits in the root, since that is the default source.
fn source_dirs(root: &Path, scripts: &[PathBuf]) -> Vec<String> {
    let dirs: BTreeSet<&Path> = scripts
        .iter()
        .filter_map(|script| script.parent())
        .map(|parent| parent.strip_prefix(root).unwrap_or(parent))
        .collect();

    if dirs.iter().all(|dir| dir.as_os_str().is_empty()) {
        return Vec::new();
    }
    dirs.into_iter()
        .map(|dir| match dir.as_os_str().is_empty() {
            true => ".".to_string(),
            false => format!("{}/", dir.display()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn init(path: &Path, force: bool) -> Result<()> {
        let args = InitArgs {
            path: path.to_path_buf(),
            force,
            canvas: CanvasArgs::default(),
        };
        run(args, &Printer::plain())
    }

    #[test]
    fn test_init_creates_loadable_manifest() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("dot.canvas"), "COLOR: (1,1) (0,0,0)").unwrap();

        init(dir.path(), false).unwrap();

        let manifest = Manifest::load(&dir.path().join("canvas.yaml")).unwrap();
        assert_eq!(manifest.width, 100);
        assert_eq!(manifest.output, PathBuf::from("dist"));
        assert!(manifest.sources.is_empty());
    }

    #[test]
    fn test_init_errors_if_manifest_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("canvas.yaml"), "width: 5").unwrap();

        assert!(init(dir.path(), false).is_err());
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("canvas.yaml"), "width: [").unwrap();

        init(dir.path(), true).unwrap();

        let content = fs::read_to_string(dir.path().join("canvas.yaml")).unwrap();
        assert!(content.contains("width: 100"));
    }

    #[test]
    fn test_init_lists_source_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("scenes")).unwrap();
        fs::create_dir_all(dir.path().join("icons")).unwrap();
        fs::write(dir.path().join("scenes/sky.canvas"), "").unwrap();
        fs::write(dir.path().join("icons/star.canvas"), "").unwrap();

        init(dir.path(), false).unwrap();

        let manifest = Manifest::load(&dir.path().join("canvas.yaml")).unwrap();
        assert_eq!(manifest.sources, vec!["icons/", "scenes/"]);
    }

    #[test]
    fn test_source_dirs_root_only() {
        let root = Path::new("/p");
        assert!(source_dirs(root, &[root.join("a.canvas")]).is_empty());
        assert_eq!(
            source_dirs(root, &[root.join("a.canvas"), root.join("s/b.canvas")]),
            vec![".", "s/"]
        );
    }

    #[test]
    fn test_init_applies_overrides() {
        let dir = tempdir().unwrap();
        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
            canvas: CanvasArgs {
                width: Some(64),
                scale: Some(4),
                ..Default::default()
            },
        };
        run(args, &Printer::plain()).unwrap();

        let manifest = Manifest::load(&dir.path().join("canvas.yaml")).unwrap();
        assert_eq!((manifest.width, manifest.pixel_size), (64, 4));
    }
}
