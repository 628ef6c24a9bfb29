//! The RGB colour held by every grid cell.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, Result};

/// An RGB colour value.
///
/// Serialized as an `[r, g, b]` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// White. Cells that have never been painted hold this colour.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Build a colour from wide channel values, rejecting anything outside 0-255.
    pub fn from_channels(r: i64, g: i64, b: i64) -> Option<Self> {
        let r = u8::try_from(r).ok()?;
        let g = u8::try_from(g).ok()?;
        let b = u8::try_from(b).ok()?;
        Some(Self::rgb(r, g, b))
    }

    /// Parse `#RGB` or `#RRGGBB`, with or without the `#`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits: Vec<u8> = trimmed
            .strip_prefix('#')
            .unwrap_or(trimmed)
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()
            .ok_or_else(|| invalid_hex(trimmed))?;

        match digits[..] {
            [r, g, b] => Ok(Self::rgb(r * 17, g * 17, b * 17)),
            [r1, r0, g1, g0, b1, b0] => Ok(Self::rgb(r1 << 4 | r0, g1 << 4 | g0, b1 << 4 | b0)),
            _ => Err(invalid_hex(trimmed)),
        }
    }

    /// Convert to an `[r, g, b]` array.
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Convert to an opaque RGBA array (for image output).
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// Check if this is the unset colour.
    pub fn is_white(self) -> bool {
        self == Self::WHITE
    }

    /// Human-readable `RGB(r,g,b)` label used in change summaries.
    pub fn rgb_label(self) -> String {
        format!("RGB({},{},{})", self.r, self.g, self.b)
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[u8; 3]> for Colour {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<Colour> for [u8; 3] {
    fn from(colour: Colour) -> Self {
        colour.to_array()
    }
}

impl FromStr for Colour {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

fn invalid_hex(s: &str) -> CanvasError {
    CanvasError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB or #RRGGBB format".to_string()),
    }
}
