//! Serializable canvas state.
//!
//! A capture lists only the non-white cells, which keeps it small enough to
//! hand to a remote agent along with the canvas size.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, Result};
use crate::grid::check_dimensions;
use crate::raster::Surface;
use crate::types::Pixel;

use super::{Canvas, Tracked};

/// Canvas width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

/// A snapshot of a canvas suitable for JSON transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasCapture {
    pub dimensions: Dimensions,
    pub pixel_size: u32,
    /// Non-white cells in row-major order.
    pub pixels: Vec<Pixel>,
}

impl CanvasCapture {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CanvasError::Parse {
            message: format!("Failed to serialize capture: {}", e),
            help: None,
        })
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| CanvasError::Parse {
            message: format!("Invalid capture: {}", e),
            help: Some("Expected {\"dimensions\", \"pixelSize\", \"pixels\"}".to_string()),
        })
    }
}

impl Canvas {
    /// Describe the canvas: its size, display scale and every non-white cell.
    pub fn capture_state(&self) -> CanvasCapture {
        CanvasCapture {
            dimensions: Dimensions {
                width: self.width(),
                height: self.height(),
            },
            pixel_size: self.pixel_size,
            pixels: self
                .grid
                .painted()
                .map(|(x, y, colour)| Pixel::new(x, y, colour))
                .collect(),
        }
    }

    /// Replace the canvas contents with a capture, as one undoable step.
    ///
    /// A capture of a different size resizes the canvas first, which resets
    /// history. Pixels outside the captured dimensions are skipped.
    pub fn restore_state(&mut self, capture: &CanvasCapture) -> Result<()> {
        let Dimensions { width, height } = capture.dimensions;
        check_dimensions(width, height)?;

        if self.grid.size() != (width, height) {
            self.resize(width, height)?;
        }

        let mut surface = Tracked {
            grid: &mut self.grid,
            tracker: &mut self.tracker,
        };
        surface.blank();
        let mut skipped = 0;
        for pixel in &capture.pixels {
            let written = match (i64::try_from(pixel.x), i64::try_from(pixel.y)) {
                (Ok(x), Ok(y)) => surface.set_pixel(x, y, pixel.colour),
                _ => false,
            };
            if !written {
                skipped += 1;
            }
        }
        if skipped > 0 {
            debug!("restore skipped {} out-of-bounds pixel(s)", skipped);
        }

        self.pixel_size = capture.pixel_size.max(1);
        self.checkpoint();
        self.presenter.redraw(&self.grid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::recorded_canvas;
    use super::*;
    use crate::grid::Grid;
    use crate::types::Colour;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_capture_lists_painted_cells() {
        let mut canvas = Canvas::new(4, 3).unwrap();
        canvas.set_pixel(2, 1, Colour::rgb(1, 2, 3));
        canvas.set_pixel(0, 2, Colour::BLACK);
        canvas.set_pixel(3, 0, Colour::WHITE);

        let capture = canvas.capture_state();

        assert_eq!(capture.dimensions, Dimensions { width: 4, height: 3 });
        assert_eq!(capture.pixel_size, 10);
        assert_eq!(
            capture.pixels,
            vec![
                Pixel::new(2, 1, Colour::rgb(1, 2, 3)),
                Pixel::new(0, 2, Colour::BLACK),
            ]
        );
    }

    #[test]
    fn test_capture_json_shape() {
        let mut canvas = Canvas::new(2, 2).unwrap();
        canvas.set_pixel(1, 0, Colour::rgb(10, 20, 30));

        let json = serde_json::to_string(&canvas.capture_state()).unwrap();
        assert_snapshot!(
            json,
            @r#"{"dimensions":{"width":2,"height":2},"pixelSize":10,"pixels":[{"x":1,"y":0,"color":[10,20,30]}]}"#
        );
    }

    #[test]
    fn test_restore_same_size() {
        let mut source = Canvas::new(10, 10).unwrap();
        source.process_commands("TRIANGLE: (0,0) (9,0) (0,9) (200,0,0)");
        let capture = source.capture_state();

        let mut target = Canvas::new(10, 10).unwrap();
        target.process_commands("BACKGROUND: (0,0,255)");
        target.restore_state(&capture).unwrap();

        assert_eq!(target.capture_state(), capture);
        assert_eq!(target.history().len(), 3);
        assert!(target.undo());
        assert_eq!(target.grid().get(9, 9), Some(Colour::rgb(0, 0, 255)));
    }

    #[test]
    fn test_restore_same_size_tracks_blanked_cells() {
        let mut source = Canvas::new(4, 4).unwrap();
        source.set_pixel(0, 0, Colour::BLACK);
        let capture = source.capture_state();

        let mut target = Canvas::new(4, 4).unwrap();
        target.start_tracking();
        target.set_pixel(3, 3, Colour::BLACK);
        target.restore_state(&capture).unwrap();
        target.stop_tracking();

        assert_eq!(
            target.changes(),
            vec![
                Pixel::new(0, 0, Colour::BLACK),
                Pixel::new(3, 3, Colour::WHITE),
            ]
        );
    }

    #[test]
    fn test_restore_resizes_and_notifies() {
        let (mut canvas, recorded) = recorded_canvas(100, 100);
        canvas.process_commands("COLOR: (0,0) (0,0,0)");

        let capture = CanvasCapture {
            dimensions: Dimensions { width: 3, height: 2 },
            pixel_size: 4,
            pixels: vec![
                Pixel::new(2, 1, Colour::BLACK),
                Pixel::new(7, 7, Colour::BLACK),
            ],
        };
        canvas.restore_state(&capture).unwrap();

        assert_eq!(canvas.grid().size(), (3, 2));
        assert_eq!(canvas.pixel_size(), 4);
        assert_eq!(canvas.grid().touched_count(), 1);
        assert_eq!(canvas.grid().get(2, 1), Some(Colour::BLACK));

        // resize reset history, then restore checkpointed once
        assert_eq!(canvas.history().len(), 2);
        assert!(canvas.undo());
        assert_eq!(canvas.grid(), &Grid::new(3, 2).unwrap());

        assert_eq!(
            recorded.borrow().reports,
            vec!["Dimensions changed from (0-99) to (0-2) and (0-99) to (0-1)"]
        );
    }

    #[test]
    fn test_restore_rejects_bad_dimensions() {
        let mut canvas = Canvas::new(5, 5).unwrap();
        canvas.set_pixel(1, 1, Colour::BLACK);

        let capture = CanvasCapture {
            dimensions: Dimensions { width: 0, height: 5 },
            pixel_size: 10,
            pixels: vec![],
        };
        assert!(matches!(
            canvas.restore_state(&capture),
            Err(CanvasError::Dimension { width: 0, height: 5 })
        ));
        assert_eq!(canvas.grid().get(1, 1), Some(Colour::BLACK));
        assert_eq!(canvas.width(), 5);
    }

    #[test]
    fn test_capture_from_json() {
        let capture = CanvasCapture::from_json(
            r#"{"dimensions":{"width":8,"height":8},"pixelSize":2,"pixels":[{"x":0,"y":7,"color":[9,9,9]}]}"#,
        )
        .unwrap();
        assert_eq!(capture.pixels[0], Pixel::new(0, 7, Colour::rgb(9, 9, 9)));

        assert!(CanvasCapture::from_json("{\"pixels\": 3}").is_err());
    }

    #[test]
    fn test_capture_round_trip_through_json() {
        let mut canvas = Canvas::new(16, 16).unwrap();
        canvas.process_commands("CIRCLE: (8,8) 5 (30,60,90)");
        let json = canvas.capture_state().to_json().unwrap();

        let mut other = Canvas::new(16, 16).unwrap();
        other.restore_state(&CanvasCapture::from_json(&json).unwrap()).unwrap();
        assert_eq!(other.grid().painted().count(), canvas.grid().painted().count());
        assert_eq!(other.grid().get(8, 8), canvas.grid().get(8, 8));
    }
}
