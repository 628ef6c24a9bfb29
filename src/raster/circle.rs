//! Filled disk rasterization.

use crate::types::{Colour, Point};

use super::{clip_span, Surface};

/// Fill every cell whose offset from `centre` satisfies `dx² + dy² <= r²`.
///
/// Radius validation is the caller's job; a radius below zero paints nothing.
pub fn circle<S: Surface + ?Sized>(
    surface: &mut S,
    centre: Point,
    radius: i64,
    colour: Colour,
) -> usize {
    if radius < 0 {
        return 0;
    }

    let Some((x0, x1)) = clip_span(
        centre.x.saturating_sub(radius),
        centre.x.saturating_add(radius),
        surface.width(),
    ) else {
        return 0;
    };
    let Some((y0, y1)) = clip_span(
        centre.y.saturating_sub(radius),
        centre.y.saturating_add(radius),
        surface.height(),
    ) else {
        return 0;
    };

    let r2 = i128::from(radius) * i128::from(radius);
    let mut count = 0;
    for y in y0..=y1 {
        let dy = i128::from(y) - i128::from(centre.y);
        for x in x0..=x1 {
            let dx = i128::from(x) - i128::from(centre.x);
            if within(dx, dy, r2) {
                count += usize::from(surface.set_pixel(x, y, colour));
            }
        }
    }
    count
}

/// `dx² + dy² <= r2`, where a sum too large for `i128` is outside.
fn within(dx: i128, dy: i128, r2: i128) -> bool {
    dx.checked_mul(dx)
        .zip(dy.checked_mul(dy))
        .and_then(|(x2, y2)| x2.checked_add(y2))
        .is_some_and(|d2| d2 <= r2)
}
