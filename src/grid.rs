//! The pixel grid.
//!
//! A `Grid` owns a row-major array of colours and a parallel "touched"
//! bitmap recording which cells have ever been explicitly written.
//! `set_pixel` is the single mutation primitive; everything that paints
//! goes through it so bounds checks and touched tracking live in one place.

use crate::error::{CanvasError, Result};
use crate::types::{Colour, Point};

/// Largest allowed width or height.
pub const MAX_DIMENSION: usize = 1000;

/// Width and height of a freshly created canvas.
pub const DEFAULT_DIMENSION: usize = 100;

/// A rectangular grid of colours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Colour>,
    touched: Vec<bool>,
}

impl Grid {
    /// Create a blank (all white, untouched) grid.
    ///
    /// Both dimensions must lie in `1..=MAX_DIMENSION`.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_dimensions(width, height)?;
        let len = width * height;
        Ok(Self {
            width,
            height,
            cells: vec![Colour::WHITE; len],
            touched: vec![false; len],
        })
    }

    /// Get the width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Check whether `(x, y)` lies within `[0, width) x [0, height)`.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.index(x, y).is_some()
    }

    /// Get the colour at a position. Returns None if out of bounds.
    pub fn get(&self, x: i64, y: i64) -> Option<Colour> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Whether the cell at a position has ever been set.
    pub fn is_touched(&self, x: i64, y: i64) -> bool {
        self.index(x, y).is_some_and(|i| self.touched[i])
    }

    /// Write a colour and mark the cell touched.
    ///
    /// Returns `false` without mutating anything if the position is out of bounds.
    pub fn set_pixel(&mut self, x: i64, y: i64, colour: Colour) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = colour;
                self.touched[i] = true;
                true
            }
            None => false,
        }
    }

    /// Reset every cell to white and untouched, keeping the dimensions.
    pub fn clear(&mut self) {
        self.cells.fill(Colour::WHITE);
        self.touched.fill(false);
    }

    /// Pin a position to the nearest cell inside the grid.
    pub fn clamp(&self, x: i64, y: i64) -> Point {
        Point::new(
            x.clamp(0, self.width as i64 - 1),
            y.clamp(0, self.height as i64 - 1),
        )
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Colour]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Iterate over all cells with their positions, in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Colour)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &colour)| (i % self.width, i / self.width, colour))
    }

    /// Iterate over every cell that is not white, in row-major order.
    pub fn painted(&self) -> impl Iterator<Item = (usize, usize, Colour)> + '_ {
        self.iter_cells().filter(|(_, _, colour)| !colour.is_white())
    }

    /// Count cells that have been explicitly set.
    pub fn touched_count(&self) -> usize {
        self.touched.iter().filter(|&&t| t).count()
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        let len = DEFAULT_DIMENSION * DEFAULT_DIMENSION;
        Self {
            width: DEFAULT_DIMENSION,
            height: DEFAULT_DIMENSION,
            cells: vec![Colour::WHITE; len],
            touched: vec![false; len],
        }
    }
}

/// Validate a requested width and height.
pub fn check_dimensions(width: usize, height: usize) -> Result<()> {
    let valid = |n: usize| (1..=MAX_DIMENSION).contains(&n);
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(CanvasError::Dimension { width, height })
    }
}
