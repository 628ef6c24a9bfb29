//! Presentation of the canvas.
//!
//! The editor core never owns a display. After each mutation it hands the
//! grid to a `Presenter`, and sends human-readable notices (script failure
//! reports, dimension changes) to the same collaborator.

mod png;

pub use png::{to_image, write_png};

use log::info;

use crate::grid::Grid;

/// Receives redraw requests and report text from a canvas.
pub trait Presenter {
    /// Called after any operation that may have changed the grid.
    fn redraw(&mut self, _grid: &Grid) {}

    /// Called with aggregated failure reports and other notices.
    fn report(&mut self, _text: &str) {}
}

/// Ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

/// Forwards reports to the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn report(&mut self, text: &str) {
        for line in text.lines() {
            info!("{}", line);
        }
    }
}
