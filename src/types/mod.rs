//! Core value types.
//!
//! - `Colour` - RGB colour values
//! - `Point` - integer grid coordinates
//! - `Pixel` - a positioned colour

mod colour;
mod pixel;
mod point;

pub use colour::Colour;
pub use pixel::Pixel;
pub use point::Point;
