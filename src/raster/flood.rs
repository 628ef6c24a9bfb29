//! 4-connected flood fill.

use crate::types::{Colour, Point};

use super::Surface;

/// Replace the region of cells sharing the seed's colour, moving only
/// up, down, left and right.
///
/// Uses an explicit work stack, so region size is bounded by memory rather
/// than call depth. A seed outside the surface, or one already holding
/// `colour`, paints nothing.
pub fn flood_fill<S: Surface + ?Sized>(surface: &mut S, seed: Point, colour: Colour) -> usize {
    let Some(target) = surface.get(seed.x, seed.y) else {
        return 0;
    };
    if target == colour {
        return 0;
    }

    let mut count = 0;
    let mut stack = vec![seed];
    while let Some(Point { x, y }) = stack.pop() {
        if surface.get(x, y) != Some(target) {
            continue;
        }
        if surface.set_pixel(x, y, colour) {
            count += 1;
        }
        stack.extend([
            Point::new(x + 1, y),
            Point::new(x - 1, y),
            Point::new(x, y + 1),
            Point::new(x, y - 1),
        ]);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::raster::test_support::ascii;
    use crate::raster::{box_fill, line};

    #[test]
    fn test_fill_blank_grid() {
        let mut grid = Grid::new(30, 20).unwrap();
        let red = Colour::rgb(255, 0, 0);

        assert_eq!(flood_fill(&mut grid, Point::new(17, 3), red), 600);
        assert!(grid.iter_cells().all(|(_, _, c)| c == red));
    }

    #[test]
    fn test_fill_same_colour_is_noop() {
        let mut grid = Grid::new(5, 5).unwrap();
        assert_eq!(flood_fill(&mut grid, Point::new(2, 2), Colour::WHITE), 0);
        assert_eq!(grid.touched_count(), 0);
    }

    #[test]
    fn test_fill_stops_at_boundary() {
        let mut grid = Grid::new(5, 5).unwrap();
        line(&mut grid, Point::new(2, 0), Point::new(2, 4), Colour::BLACK);

        let count = flood_fill(&mut grid, Point::new(0, 0), Colour::rgb(0, 0, 255));
        assert_eq!(count, 10);
        assert_eq!(grid.get(3, 0), Some(Colour::WHITE));
    }

    #[test]
    fn test_fill_is_four_connected() {
        let mut grid = Grid::new(3, 3).unwrap();
        box_fill(&mut grid, Point::new(0, 0), Point::new(2, 2), Colour::BLACK);
        grid.set_pixel(0, 0, Colour::WHITE);
        grid.set_pixel(1, 1, Colour::WHITE);

        flood_fill(&mut grid, Point::new(0, 0), Colour::rgb(0, 255, 0));
        // The diagonal neighbour is not reached.
        assert_eq!(grid.get(1, 1), Some(Colour::WHITE));
        assert_eq!(ascii(&grid), "###\n#.#\n###");
    }

    #[test]
    fn test_fill_seed_out_of_bounds() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert_eq!(flood_fill(&mut grid, Point::new(-1, 0), Colour::BLACK), 0);
    }

    #[test]
    fn test_fill_large_grid_without_recursion() {
        let mut grid = Grid::new(1000, 1000).unwrap();
        assert_eq!(flood_fill(&mut grid, Point::new(0, 0), Colour::BLACK), 1_000_000);
    }
}
