//! Rasterization algorithms.
//!
//! Every primitive is expressed purely in terms of `Surface::set_pixel`, so
//! the same code paints a bare `Grid` in tests and a tracked canvas in the
//! editor. All functions return the number of cells actually written.

mod circle;
mod flood;
mod line;
mod triangle;

pub use circle::circle;
pub use flood::flood_fill;
pub use line::{line, line_points};
pub use triangle::triangle;

use crate::grid::Grid;
use crate::types::{Colour, Point};

/// Something that can be painted one cell at a time.
pub trait Surface {
    /// Get the width in cells.
    fn width(&self) -> usize;

    /// Get the height in cells.
    fn height(&self) -> usize;

    /// Read a cell. Returns None if out of bounds.
    fn get(&self, x: i64, y: i64) -> Option<Colour>;

    /// Write a cell. Returns `false` if out of bounds.
    fn set_pixel(&mut self, x: i64, y: i64, colour: Colour) -> bool;
}

impl Surface for Grid {
    fn width(&self) -> usize {
        Grid::width(self)
    }

    fn height(&self) -> usize {
        Grid::height(self)
    }

    fn get(&self, x: i64, y: i64) -> Option<Colour> {
        Grid::get(self, x, y)
    }

    fn set_pixel(&mut self, x: i64, y: i64, colour: Colour) -> bool {
        Grid::set_pixel(self, x, y, colour)
    }
}

/// Paint a single cell.
pub fn point<S: Surface + ?Sized>(surface: &mut S, at: Point, colour: Colour) -> usize {
    usize::from(surface.set_pixel(at.x, at.y, colour))
}

/// Paint every cell on the surface, whatever its current dimensions.
pub fn background<S: Surface + ?Sized>(surface: &mut S, colour: Colour) -> usize {
    let (width, height) = (surface.width() as i64, surface.height() as i64);
    let mut count = 0;
    for y in 0..height {
        for x in 0..width {
            count += usize::from(surface.set_pixel(x, y, colour));
        }
    }
    count
}

/// Fill the rectangle spanned by two corners, inclusive on both axes.
///
/// Corners may be given in any order.
pub fn box_fill<S: Surface + ?Sized>(surface: &mut S, a: Point, b: Point, colour: Colour) -> usize {
    let Some((x0, x1)) = clip_span(a.x.min(b.x), a.x.max(b.x), surface.width()) else {
        return 0;
    };
    let Some((y0, y1)) = clip_span(a.y.min(b.y), a.y.max(b.y), surface.height()) else {
        return 0;
    };

    let mut count = 0;
    for y in y0..=y1 {
        for x in x0..=x1 {
            count += usize::from(surface.set_pixel(x, y, colour));
        }
    }
    count
}

/// Intersect the inclusive span `lo..=hi` with `0..len`.
///
/// Cells outside the surface would be rejected by `set_pixel` anyway; clipping
/// just avoids walking them.
pub(crate) fn clip_span(lo: i64, hi: i64, len: usize) -> Option<(i64, i64)> {
    let lo = lo.max(0);
    let hi = hi.min(len as i64 - 1);
    (lo <= hi).then_some((lo, hi))
}


#[cfg(test)]
mod tests {
    use super::test_support::ascii;
    use super::*;

    #[test]
    fn test_point() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert_eq!(point(&mut grid, Point::new(1, 1), Colour::BLACK), 1);
        assert_eq!(point(&mut grid, Point::new(3, 1), Colour::BLACK), 0);
        assert_eq!(ascii(&grid), "...\n.#.\n...");
    }

    #[test]
    fn test_background_covers_every_cell() {
        let mut grid = Grid::new(100, 100).unwrap();
        let grey = Colour::rgb(10, 10, 10);

        assert_eq!(background(&mut grid, grey), 10_000);
        assert!(grid.iter_cells().all(|(_, _, c)| c == grey));
        assert_eq!(grid.touched_count(), 10_000);
    }

    #[test]
    fn test_box_fill_normalizes_corners() {
        let mut a = Grid::new(5, 4).unwrap();
        let mut b = Grid::new(5, 4).unwrap();

        box_fill(&mut a, Point::new(1, 1), Point::new(3, 2), Colour::BLACK);
        box_fill(&mut b, Point::new(3, 2), Point::new(1, 1), Colour::BLACK);

        assert_eq!(a, b);
        assert_eq!(ascii(&a), ".....\n.###.\n.###.\n.....");
    }

    #[test]
    fn test_box_fill_overwrites() {
        let mut grid = Grid::new(3, 1).unwrap();
        let red = Colour::rgb(255, 0, 0);
        box_fill(&mut grid, Point::new(0, 0), Point::new(2, 0), Colour::BLACK);
        box_fill(&mut grid, Point::new(1, 0), Point::new(1, 0), red);
        assert_eq!(grid.get(1, 0), Some(red));
        assert_eq!(grid.get(0, 0), Some(Colour::BLACK));
    }

    #[test]
    fn test_box_fill_clips_to_surface() {
        let mut grid = Grid::new(4, 4).unwrap();
        let count = box_fill(&mut grid, Point::new(-10, 2), Point::new(1, 50), Colour::BLACK);
        assert_eq!(count, 4);
        assert_eq!(ascii(&grid), "....\n....\n##..\n##..");

        let count = box_fill(&mut grid, Point::new(10, 10), Point::new(20, 20), Colour::BLACK);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_clip_span() {
        assert_eq!(clip_span(-3, 2, 10), Some((0, 2)));
        assert_eq!(clip_span(5, 50, 10), Some((5, 9)));
        assert_eq!(clip_span(10, 12, 10), None);
        assert_eq!(clip_span(-5, -1, 10), None);
    }
}
