//! Bresenham line rasterization.

use crate::types::{Colour, Point};

use super::Surface;

/// Draw a line between two points, endpoints inclusive.
///
/// The endpoints are put in a canonical order first, so `a -> b` and
/// `b -> a` always cover the same cells. Only the steps whose major-axis
/// coordinate lies on the surface are walked.
pub fn line<S: Surface + ?Sized>(surface: &mut S, a: Point, b: Point, colour: Colour) -> usize {
    let mut count = 0;
    for p in line_points(a, b).clipped(surface.width(), surface.height()) {
        count += usize::from(surface.set_pixel(p.x, p.y, colour));
    }
    count
}

/// The cells visited by a line from `a` to `b`, in canonical order.
pub fn line_points(a: Point, b: Point) -> LinePoints {
    let (from, to) = if b < a { (b, a) } else { (a, b) };
    let dx = from.x.abs_diff(to.x);
    let dy = from.y.abs_diff(to.y);
    let x_major = dx >= dy;
    let (major, minor) = if x_major { (dx, dy) } else { (dy, dx) };

    LinePoints {
        from,
        sx: if from.x < to.x { 1 } else { -1 },
        sy: if from.y < to.y { 1 } else { -1 },
        x_major,
        major: u128::from(major),
        minor: u128::from(minor),
        next: 0,
        last: u128::from(major),
    }
}

/// Iterator over Bresenham line cells.
///
/// Step `k` advances the major axis by `k` and the minor axis by
/// `ceil((2k * minor - major) / (2 * major))`, which is where the classic
/// error-accumulating walk lands. Computing it directly lets a line skip
/// the steps that fall outside a surface.
#[derive(Debug, Clone)]
pub struct LinePoints {
    from: Point,
    sx: i64,
    sy: i64,
    x_major: bool,
    major: u128,
    minor: u128,
    next: u128,
    last: u128,
}

impl LinePoints {
    /// Restrict the walk to steps whose major-axis coordinate lies inside a
    /// `width x height` surface. At most `max(width, height)` steps remain.
    pub fn clipped(mut self, width: usize, height: usize) -> Self {
        let (start, sign, extent) = if self.x_major {
            (self.from.x, self.sx, width)
        } else {
            (self.from.y, self.sy, height)
        };
        let (start, extent) = (i128::from(start), extent as i128);

        let (lo, hi) = if sign > 0 {
            (-start, extent - 1 - start)
        } else {
            (start - (extent - 1), start)
        };
        let lo = lo.max(0);
        let hi = hi.min(self.last as i128);

        if lo > hi {
            self.next = 1;
            self.last = 0;
        } else {
            self.next = lo as u128;
            self.last = hi as u128;
        }
        self
    }

    fn at(&self, k: u128) -> Point {
        let minor_steps = if self.major == 0 {
            0
        } else {
            // floor((2km + major - 1) / 2major), split to stay within u128
            let km = k * self.minor;
            let (q, r) = (km / self.major, km % self.major);
            q + (2 * r + self.major - 1) / (2 * self.major)
        };
        let (dx, dy) = if self.x_major {
            (k, minor_steps)
        } else {
            (minor_steps, k)
        };
        Point::new(
            offset(self.from.x, self.sx, dx),
            offset(self.from.y, self.sy, dy),
        )
    }
}

/// `start + sign * steps`, where the result is known to lie between the endpoints.
fn offset(start: i64, sign: i64, steps: u128) -> i64 {
    (i128::from(start) + i128::from(sign) * steps as i128) as i64
}

impl Iterator for LinePoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next > self.last {
            return None;
        }
        let here = self.at(self.next);
        self.next += 1;
        Some(here)
    }
}
