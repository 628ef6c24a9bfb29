//! The line-oriented drawing command language.
//!
//! Each line of a script is independent. Blank lines and lines starting with
//! `#` are comments; lines that do not start with a registered `KEYWORD:` are
//! ignored. A recognised line is either a drawing command or an error for
//! that line alone; errors never stop the rest of the script.
//!
//! ```text
//! BACKGROUND: (r,g,b)
//! BOX_FILL: (x1,y1) (x2,y2) (r,g,b)
//! CIRCLE: (x,y) radius (r,g,b)
//! LINE: (x1,y1) (x2,y2) (r,g,b)
//! COLOR: (x,y) (r,g,b)
//! TRIANGLE: (x1,y1) (x2,y2) (x3,y3) (r,g,b)
//! ```

mod registry;
mod scanner;
mod script;

pub use registry::{Args, CommandDef, CommandRegistry, Field};
pub use scanner::Scanner;
pub use script::{check_script, parse_script, run_script, CommandFailure, ScriptReport};

use crate::error::CommandError;
use crate::raster::{self, Surface};
use crate::types::{Colour, Point};

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Background {
        colour: Colour,
    },
    BoxFill {
        from: Point,
        to: Point,
        colour: Colour,
    },
    Circle {
        centre: Point,
        radius: i64,
        colour: Colour,
    },
    Line {
        from: Point,
        to: Point,
        colour: Colour,
    },
    Color {
        at: Point,
        colour: Colour,
    },
    Triangle {
        vertices: [Point; 3],
        colour: Colour,
    },
    /// A recognised keyword whose line failed validation.
    Error {
        name: &'static str,
        error: CommandError,
    },
}

impl Command {
    /// The keyword this command was parsed from.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Background { .. } => "BACKGROUND",
            Command::BoxFill { .. } => "BOX_FILL",
            Command::Circle { .. } => "CIRCLE",
            Command::Line { .. } => "LINE",
            Command::Color { .. } => "COLOR",
            Command::Triangle { .. } => "TRIANGLE",
            Command::Error { name, .. } => *name,
        }
    }

    /// Paint the command onto a surface. Returns the number of cells written.
    ///
    /// `Error` paints nothing.
    pub fn execute<S: Surface + ?Sized>(&self, surface: &mut S) -> usize {
        match *self {
            Command::Background { colour } => raster::background(surface, colour),
            Command::BoxFill { from, to, colour } => raster::box_fill(surface, from, to, colour),
            Command::Circle {
                centre,
                radius,
                colour,
            } => raster::circle(surface, centre, radius, colour),
            Command::Line { from, to, colour } => raster::line(surface, from, to, colour),
            Command::Color { at, colour } => raster::point(surface, at, colour),
            Command::Triangle { vertices, colour } => raster::triangle(surface, vertices, colour),
            Command::Error { .. } => 0,
        }
    }
}
