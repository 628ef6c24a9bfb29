//! Pointer-driven editing.
//!
//! A stroke starts at `begin_stroke`, follows the pointer through
//! `extend_stroke` and ends with `end_stroke`, which takes the single
//! checkpoint for the whole gesture. Pointer positions are pinned to the
//! nearest edge cell, so dragging off the canvas keeps drawing along the
//! border.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, Result};
use crate::raster;
use crate::types::{Colour, Point};

use super::Canvas;

/// The active pointer tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Paints the current colour.
    #[default]
    Pencil,
    /// Paints white.
    Eraser,
    /// Flood fills from the pressed cell with the current colour.
    Fill,
}

impl Tool {
    /// Whether dragging draws a line behind the pointer.
    pub fn is_freehand(self) -> bool {
        matches!(self, Tool::Pencil | Tool::Eraser)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tool::Pencil => "pencil",
            Tool::Eraser => "eraser",
            Tool::Fill => "fill",
        })
    }
}

impl FromStr for Tool {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pencil" => Ok(Tool::Pencil),
            "eraser" => Ok(Tool::Eraser),
            "fill" => Ok(Tool::Fill),
            _ => Err(CanvasError::Parse {
                message: format!("Unknown tool '{}'", s),
                help: Some("Expected one of: pencil, eraser, fill".to_string()),
            }),
        }
    }
}

impl Canvas {
    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// The colour used by the pencil and fill tools.
    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn set_colour(&mut self, colour: Colour) {
        self.colour = colour;
    }

    /// Set the current colour from `#RGB` or `#RRGGBB`.
    pub fn set_colour_hex(&mut self, hex: &str) -> Result<()> {
        self.colour = Colour::from_hex(hex)?;
        Ok(())
    }

    /// Whether a stroke is in progress.
    pub fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }

    /// Press the pointer at a position. Returns the number of cells written.
    pub fn begin_stroke(&mut self, x: i64, y: i64) -> usize {
        let at = self.grid.clamp(x, y);
        self.stroke = Some(at);
        match self.tool {
            Tool::Pencil => self.draw_point(at, self.colour),
            Tool::Eraser => self.draw_point(at, Colour::WHITE),
            Tool::Fill => self.flood_fill(at, self.colour),
        }
    }

    /// Drag the pointer to a new position, drawing a line from the last one.
    ///
    /// Does nothing for the fill tool or when no stroke is in progress.
    pub fn extend_stroke(&mut self, x: i64, y: i64) -> usize {
        let Some(last) = self.stroke else {
            return 0;
        };
        if !self.tool.is_freehand() {
            return 0;
        }
        let at = self.grid.clamp(x, y);
        let colour = match self.tool {
            Tool::Eraser => Colour::WHITE,
            _ => self.colour,
        };
        self.stroke = Some(at);
        self.paint(|s| raster::line(s, last, at, colour))
    }

    /// Release the pointer. Checkpoints if a stroke was in progress.
    pub fn end_stroke(&mut self) -> bool {
        if self.stroke.take().is_none() {
            return false;
        }
        self.checkpoint();
        true
    }
}
