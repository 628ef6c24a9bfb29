//! Filled triangle rasterization.
//!
//! A cell is inside when the three sub-triangles it forms with each pair of
//! vertices exactly cover the triangle's own area. Edges are inclusive, and a
//! degenerate (collinear) triangle collapses to the lattice cells on its
//! segment.
//!
//! The signed sub-areas always sum to the signed area, so their absolute
//! values cover it exactly when none of them disagree in sign. That is the
//! test used here, computed without overflow for any `i64` vertices.

use std::cmp::Ordering;

use crate::types::{Colour, Point};

use super::{clip_span, Surface};

/// Fill the triangle with the given vertices.
pub fn triangle<S: Surface + ?Sized>(surface: &mut S, vertices: [Point; 3], colour: Colour) -> usize {
    let [a, b, c] = vertices;

    let Some((x0, x1)) = clip_span(
        a.x.min(b.x).min(c.x),
        a.x.max(b.x).max(c.x),
        surface.width(),
    ) else {
        return 0;
    };
    let Some((y0, y1)) = clip_span(
        a.y.min(b.y).min(c.y),
        a.y.max(b.y).max(c.y),
        surface.height(),
    ) else {
        return 0;
    };

    let mut count = 0;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = Point::new(x, y);
            let sides = [orientation(a, b, p), orientation(b, c, p), orientation(c, a, p)];
            let covered = !(sides.contains(&Ordering::Less) && sides.contains(&Ordering::Greater));
            if covered {
                count += usize::from(surface.set_pixel(x, y, colour));
            }
        }
    }
    count
}

/// Which side of the directed edge `a -> b` the point `p` lies on: the sign
/// of the doubled area of `a, b, p`.
fn orientation(a: Point, b: Point, p: Point) -> Ordering {
    let lhs = Wide::product(diff(b.x, a.x), diff(p.y, a.y));
    let rhs = Wide::product(diff(b.y, a.y), diff(p.x, a.x));
    lhs.cmp(&rhs)
}

/// A signed product of two `i64` differences, kept exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Wide {
    negative: bool,
    magnitude: u128,
}

impl Wide {
    fn product(u: Diff, v: Diff) -> Self {
        let magnitude = u.magnitude * v.magnitude;
        Self {
            negative: magnitude != 0 && (u.negative != v.negative),
            magnitude,
        }
    }
}

impl Ord for Wide {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.magnitude.cmp(&other.magnitude),
            (true, true) => other.magnitude.cmp(&self.magnitude),
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
        }
    }
}

impl PartialOrd for Wide {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// `lhs - rhs` as a sign and a magnitude; the magnitude always fits a `u64`.
#[derive(Debug, Clone, Copy)]
struct Diff {
    negative: bool,
    magnitude: u128,
}

fn diff(lhs: i64, rhs: i64) -> Diff {
    Diff {
        negative: lhs < rhs,
        magnitude: u128::from(lhs.abs_diff(rhs)),
    }
}
