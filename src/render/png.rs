//! Grid to PNG export.

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::{CanvasError, Result};
use crate::grid::Grid;

/// Blow the grid up into an image where each cell is a `scale x scale` block.
/// A scale of zero behaves like one.
pub fn to_image(grid: &Grid, scale: u32) -> RgbaImage {
    let scale = scale.max(1);
    let (width, height) = (grid.width() as u32, grid.height() as u32);

    RgbaImage::from_fn(width * scale, height * scale, |px, py| {
        let colour = grid
            .get(i64::from(px / scale), i64::from(py / scale))
            .unwrap_or_default();
        Rgba(colour.to_rgba())
    })
}

pub fn write_png(grid: &Grid, path: &Path, scale: u32) -> Result<()> {
    to_image(grid, scale)
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| CanvasError::Render {
            message: format!("Failed to write {}: {}", path.display(), e),
            help: Some("Check that the output directory exists and is writable".to_string()),
        })
}
