//! Linear undo/redo history of grid snapshots.
//!
//! Taking a checkpoint after an undo discards everything past the cursor;
//! the redo branch is dropped, never merged.

use log::trace;

use crate::grid::Grid;

/// An immutable copy of the grid (colours and touched map) at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    grid: Grid,
}

impl Snapshot {
    fn capture(grid: &Grid) -> Self {
        Self { grid: grid.clone() }
    }

    /// The grid as it was when the snapshot was taken.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

/// Snapshot log with a cursor.
///
/// Never empty: it is created holding one snapshot, and `0 <= cursor < len`
/// holds at all times.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    cursor: usize,
    limit: Option<usize>,
}

impl History {
    /// Create a history whose only entry is the given grid.
    pub fn new(initial: &Grid) -> Self {
        Self {
            snapshots: vec![Snapshot::capture(initial)],
            cursor: 0,
            limit: None,
        }
    }

    /// Cap the number of stored snapshots; the oldest are dropped first.
    ///
    /// A limit of zero is treated as one.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit.max(1));
        self.enforce_limit();
        self
    }

    /// Record the current grid, discarding any redo states.
    pub fn checkpoint(&mut self, grid: &Grid) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(Snapshot::capture(grid));
        self.cursor = self.snapshots.len() - 1;
        self.enforce_limit();
        trace!("checkpoint {} of {}", self.cursor + 1, self.snapshots.len());
    }

    /// Step back one snapshot. Returns the grid to restore, or None at the start.
    pub fn undo(&mut self) -> Option<&Grid> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.snapshots[self.cursor].grid())
    }

    /// Step forward one snapshot. Returns the grid to restore, or None at the end.
    pub fn redo(&mut self) -> Option<&Grid> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.snapshots[self.cursor].grid())
    }

    /// Drop every snapshot and start over from the given grid.
    pub fn reset(&mut self, grid: &Grid) {
        self.snapshots.clear();
        self.snapshots.push(Snapshot::capture(grid));
        self.cursor = 0;
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.cursor]
    }

    /// Index of the current snapshot.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether no snapshots are stored. Never true after construction.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        if self.snapshots.len() > limit {
            let excess = self.snapshots.len() - limit;
            self.snapshots.drain(..excess);
            self.cursor = self.cursor.saturating_sub(excess);
        }
    }
}
