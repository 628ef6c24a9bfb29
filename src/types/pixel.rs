//! A coloured cell at a known position.

use serde::{Deserialize, Serialize};

use super::Colour;

/// A cell position with its colour, as reported in change summaries and
/// state captures. Serialized as `{"x":..,"y":..,"color":[r,g,b]}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pixel {
    pub x: usize,
    pub y: usize,
    #[serde(rename = "color")]
    pub colour: Colour,
}

impl Pixel {
    pub const fn new(x: usize, y: usize, colour: Colour) -> Self {
        Self { x, y, colour }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let pixel = Pixel::new(1, 2, Colour::rgb(3, 4, 5));
        let json = serde_json::to_string(&pixel).unwrap();
        assert_eq!(json, r#"{"x":1,"y":2,"color":[3,4,5]}"#);

        let back: Pixel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pixel);
    }
}
