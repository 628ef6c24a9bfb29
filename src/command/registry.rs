//! Command registry.
//!
//! Each keyword maps to a `CommandDef` describing its field pattern and a
//! builder that turns validated fields into a `Command`. Pattern matching,
//! bounds checks and colour checks are shared; only command-specific
//! constraints live in the builder. New primitives are added by registering
//! another definition.

use crate::error::CommandError;
use crate::types::{Colour, Point};

use super::scanner::Scanner;
use super::Command;

/// One field in a command pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `(x,y)`, checked against the canvas bounds.
    Point,
    /// A bare integer.
    Scalar,
    /// `(r,g,b)`, each channel checked against 0-255.
    Rgb,
}

/// Validated field values, grouped by kind in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    pub points: Vec<Point>,
    pub scalars: Vec<i64>,
    pub colours: Vec<Colour>,
}

/// Definition of a command keyword.
#[derive(Debug, Clone, Copy)]
pub struct CommandDef {
    /// Keyword, without the trailing colon.
    pub name: &'static str,
    /// Fields expected after the keyword, in order.
    pub pattern: &'static [Field],
    /// Human-readable pattern, e.g. `(x,y) (r,g,b)`.
    pub usage: &'static str,
    /// One-line description for the command reference.
    pub description: &'static str,
    /// What the points are called in bounds errors.
    pub bounds_subject: &'static str,
    /// Apply command-specific checks and build the command.
    pub build: fn(&Args) -> Result<Command, CommandError>,
}

impl CommandDef {
    /// Full syntax line, e.g. `COLOR: (x,y) (r,g,b)`.
    pub fn syntax(&self) -> String {
        format!("{}: {}", self.name, self.usage)
    }

    /// Parse and validate the text following `NAME:`.
    ///
    /// Checks run in order: pattern, coordinate bounds, colour range, then
    /// the builder's own constraints. The first failure wins.
    pub fn parse(&self, rest: &str, width: usize, height: usize) -> Result<Command, CommandError> {
        let format_error = || CommandError::Format {
            usage: self.syntax(),
        };

        let mut scanner = Scanner::new(rest);
        let mut raw_points = Vec::new();
        let mut raw_colours = Vec::new();
        let mut args = Args::default();

        for field in self.pattern {
            scanner.skip_whitespace();
            match field {
                Field::Point => raw_points.push(scanner.point().ok_or_else(format_error)?),
                Field::Scalar => args.scalars.push(scanner.integer().ok_or_else(format_error)?),
                Field::Rgb => raw_colours.push(scanner.triple().ok_or_else(format_error)?),
            }
        }

        let in_bounds = |&(x, y): &(i64, i64)| {
            (0..width as i64).contains(&x) && (0..height as i64).contains(&y)
        };
        if !raw_points.iter().all(in_bounds) {
            return Err(CommandError::Bounds {
                subject: self.bounds_subject,
                width,
                height,
            });
        }
        args.points = raw_points.into_iter().map(Point::from).collect();

        args.colours = raw_colours
            .into_iter()
            .map(|(r, g, b)| Colour::from_channels(r, g, b))
            .collect::<Option<_>>()
            .ok_or(CommandError::ColorRange)?;

        (self.build)(&args)
    }
}

/// Keyword table used to recognise and parse command lines.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    defs: Vec<CommandDef>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the six drawing commands.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for def in BUILTINS {
            registry.register(*def);
        }
        registry
    }

    /// Add a definition, replacing any existing one with the same name.
    pub fn register(&mut self, def: CommandDef) {
        match self.defs.iter_mut().find(|d| d.name == def.name) {
            Some(existing) => *existing = def,
            None => self.defs.push(def),
        }
    }

    /// Look up a definition by keyword.
    pub fn get(&self, name: &str) -> Option<&CommandDef> {
        self.defs.iter().find(|d| d.name == name)
    }

    /// Iterate over definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Find the definition whose `NAME:` prefix starts the line, returning it
    /// with the text after the colon.
    pub fn match_line<'l>(&self, line: &'l str) -> Option<(&CommandDef, &'l str)> {
        self.defs.iter().find_map(|def| {
            let rest = line.strip_prefix(def.name)?.strip_prefix(':')?;
            Some((def, rest))
        })
    }

    /// Parse one line against a canvas of the given size.
    ///
    /// Returns None for lines that are not commands at all. A recognised
    /// keyword that fails validation yields `Command::Error`.
    pub fn parse_line(&self, line: &str, width: usize, height: usize) -> Option<Command> {
        let (def, rest) = self.match_line(line)?;
        Some(def.parse(rest, width, height).unwrap_or_else(|error| Command::Error {
            name: def.name,
            error,
        }))
    }

    /// Describe every registered command and the limits of a canvas this size.
    pub fn reference(&self, width: usize, height: usize) -> String {
        let mut out = String::new();
        for def in &self.defs {
            out.push_str(&format!("{} - {}\n", def.syntax(), def.description));
        }
        out.push('\n');
        out.push_str(&format!(
            "- Coordinates must be 0-{} for x, 0-{} for y\n",
            width.saturating_sub(1),
            height.saturating_sub(1)
        ));
        out.push_str("- Colors (r,g,b) must be 0-255\n");
        out.push_str("- One command per line; lines starting with # are comments\n");
        out.push_str(&format!("\nCanvas size: {}x{}", width, height));
        out
    }
}

const BUILTINS: &[CommandDef] = &[
    CommandDef {
        name: "BACKGROUND",
        pattern: &[Field::Rgb],
        usage: "(r,g,b)",
        description: "Set background color",
        bounds_subject: "coordinates",
        build: |a| Ok(Command::Background { colour: a.colours[0] }),
    },
    CommandDef {
        name: "BOX_FILL",
        pattern: &[Field::Point, Field::Point, Field::Rgb],
        usage: "(x1,y1) (x2,y2) (r,g,b)",
        description: "Fill a box from (x1,y1) to (x2,y2)",
        bounds_subject: "coordinates",
        build: |a| {
            Ok(Command::BoxFill {
                from: a.points[0],
                to: a.points[1],
                colour: a.colours[0],
            })
        },
    },
    CommandDef {
        name: "CIRCLE",
        pattern: &[Field::Point, Field::Scalar, Field::Rgb],
        usage: "(x,y) radius (r,g,b)",
        description: "Draw a filled circle at (x,y)",
        bounds_subject: "center coordinates",
        build: build_circle,
    },
    CommandDef {
        name: "LINE",
        pattern: &[Field::Point, Field::Point, Field::Rgb],
        usage: "(x1,y1) (x2,y2) (r,g,b)",
        description: "Draw a line from (x1,y1) to (x2,y2)",
        bounds_subject: "coordinates",
        build: |a| {
            Ok(Command::Line {
                from: a.points[0],
                to: a.points[1],
                colour: a.colours[0],
            })
        },
    },
    CommandDef {
        name: "COLOR",
        pattern: &[Field::Point, Field::Rgb],
        usage: "(x,y) (r,g,b)",
        description: "Draw a single point",
        bounds_subject: "coordinates",
        build: |a| {
            Ok(Command::Color {
                at: a.points[0],
                colour: a.colours[0],
            })
        },
    },
    CommandDef {
        name: "TRIANGLE",
        pattern: &[Field::Point, Field::Point, Field::Point, Field::Rgb],
        usage: "(x1,y1) (x2,y2) (x3,y3) (r,g,b)",
        description: "Draw a filled triangle",
        bounds_subject: "coordinates",
        build: |a| {
            Ok(Command::Triangle {
                vertices: [a.points[0], a.points[1], a.points[2]],
                colour: a.colours[0],
            })
        },
    },
];

fn build_circle(args: &Args) -> Result<Command, CommandError> {
    let radius = args.scalars[0];
    if radius <= 0 {
        return Err(CommandError::Parameter {
            message: "Invalid radius. Must be greater than 0".to_string(),
        });
    }
    Ok(Command::Circle {
        centre: args.points[0],
        radius,
        colour: args.colours[0],
    })
}
