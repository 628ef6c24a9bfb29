//! Change tracking sessions.
//!
//! While a session is active, every write that actually changes a cell's
//! colour is recorded. Later writes to the same cell overwrite earlier ones,
//! and output is ordered by row, then column.

use std::collections::BTreeMap;

use crate::types::{Colour, Pixel};

/// Records distinct pixel writes between `start` and `stop`.
#[derive(Debug, Clone, Default)]
pub struct ChangeTracker {
    active: bool,
    /// Keyed by (y, x) so iteration yields output order directly.
    changes: BTreeMap<(usize, usize), Colour>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the record and begin tracking.
    pub fn start(&mut self) {
        self.changes.clear();
        self.active = true;
    }

    /// Stop tracking. The record is kept.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Stop tracking and discard the record.
    pub fn reset(&mut self) {
        self.active = false;
        self.changes.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Note a successful write. Ignored when inactive or when the colour is unchanged.
    pub fn record(&mut self, x: usize, y: usize, before: Colour, after: Colour) {
        if self.active && before != after {
            self.changes.insert((y, x), after);
        }
    }

    /// The recorded changes, sorted by `(y, x)`.
    pub fn snapshot(&self) -> Vec<Pixel> {
        self.changes
            .iter()
            .map(|(&(y, x), &colour)| Pixel::new(x, y, colour))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// One `Pixel (x,y) set to RGB(r,g,b)` line per change.
    pub fn summary(&self) -> String {
        self.snapshot()
            .iter()
            .map(|c| format!("Pixel ({},{}) set to {}", c.x, c.y, c.colour.rgb_label()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
