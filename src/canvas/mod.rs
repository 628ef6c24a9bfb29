//! The editing session.
//!
//! A `Canvas` ties the grid to its history, change tracker, command
//! registry and presenter. Every mutation goes through a tracked surface so
//! change recording happens in one place, and every public mutating call
//! asks the presenter to redraw.
//!
//! Checkpoints are taken per logical batch: one per script, one per pointer
//! stroke, one per `clear`. Individual draw calls leave that to the caller.

mod capture;
mod tool;

pub use capture::{CanvasCapture, Dimensions};
pub use tool::Tool;

use log::{debug, warn};

use crate::command::{run_script, CommandRegistry, ScriptReport};
use crate::discovery::{Manifest, DEFAULT_PIXEL_SIZE};
use crate::error::{CommandError, Result};
use crate::grid::{check_dimensions, Grid};
use crate::history::History;
use crate::raster::{self, Surface};
use crate::render::{LogPresenter, Presenter};
use crate::tracker::ChangeTracker;
use crate::types::{Colour, Pixel, Point};

/// One editing session over a single grid.
pub struct Canvas {
    grid: Grid,
    history: History,
    tracker: ChangeTracker,
    registry: CommandRegistry,
    presenter: Box<dyn Presenter>,
    pixel_size: u32,
    tool: Tool,
    colour: Colour,
    stroke: Option<Point>,
}

impl Canvas {
    /// Create a blank canvas with the built-in commands and a logging presenter.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let grid = Grid::new(width, height)?;
        let history = History::new(&grid);
        Ok(Self {
            grid,
            history,
            tracker: ChangeTracker::new(),
            registry: CommandRegistry::builtin(),
            presenter: Box::new(LogPresenter),
            pixel_size: DEFAULT_PIXEL_SIZE,
            tool: Tool::default(),
            colour: Colour::BLACK,
            stroke: None,
        })
    }

    /// Create a canvas using the dimensions, pixel size and history limit of a manifest.
    pub fn from_manifest(manifest: &Manifest) -> Result<Self> {
        let mut canvas = Self::new(manifest.width, manifest.height)?;
        canvas.pixel_size = manifest.pixel_size;
        if let Some(limit) = manifest.history_limit {
            canvas = canvas.with_history_limit(limit);
        }
        Ok(canvas)
    }

    pub fn with_presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenter = Box::new(presenter);
        self
    }

    pub fn with_registry(mut self, registry: CommandRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Cap the number of undo snapshots kept.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history = self.history.with_limit(limit);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Display scale, in screen pixels per cell.
    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    pub fn set_pixel_size(&mut self, pixel_size: u32) {
        self.pixel_size = pixel_size.max(1);
        self.presenter.redraw(&self.grid);
    }

    /// Write one cell. Returns `false` and changes nothing when out of bounds.
    pub fn set_pixel(&mut self, x: i64, y: i64, colour: Colour) -> bool {
        self.paint(|s| s.set_pixel(x, y, colour) as usize) > 0
    }

    /// Replace the grid with a blank one of a new size.
    ///
    /// History is reset to a single snapshot of the blank grid and any
    /// tracking session is discarded. Dimensions outside `1..=1000` are
    /// rejected and leave everything untouched.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        if let Err(err) = check_dimensions(width, height) {
            warn!("rejected resize to {}x{}", width, height);
            return Err(err);
        }

        let (old_width, old_height) = self.grid.size();
        self.grid = Grid::new(width, height)?;
        self.history.reset(&self.grid);
        self.tracker.reset();
        self.stroke = None;

        self.presenter.report(&format!(
            "Dimensions changed from (0-{}) to (0-{}) and (0-{}) to (0-{})",
            old_width - 1,
            width - 1,
            old_height - 1,
            height - 1
        ));
        self.presenter.redraw(&self.grid);
        Ok(())
    }

    pub fn draw_point(&mut self, at: Point, colour: Colour) -> usize {
        self.paint(|s| raster::point(s, at, colour))
    }

    pub fn draw_line(&mut self, from: Point, to: Point, colour: Colour) -> usize {
        self.paint(|s| raster::line(s, from, to, colour))
    }

    pub fn draw_box(&mut self, from: Point, to: Point, colour: Colour) -> usize {
        self.paint(|s| raster::box_fill(s, from, to, colour))
    }

    /// Paint a filled disk. A radius of zero or less is rejected.
    pub fn draw_circle(
        &mut self,
        centre: Point,
        radius: i64,
        colour: Colour,
    ) -> std::result::Result<usize, CommandError> {
        if radius <= 0 {
            return Err(CommandError::Parameter {
                message: "Invalid radius. Must be greater than 0".to_string(),
            });
        }
        Ok(self.paint(|s| raster::circle(s, centre, radius, colour)))
    }

    pub fn draw_triangle(&mut self, vertices: [Point; 3], colour: Colour) -> usize {
        self.paint(|s| raster::triangle(s, vertices, colour))
    }

    pub fn fill_background(&mut self, colour: Colour) -> usize {
        self.paint(|s| raster::background(s, colour))
    }

    pub fn flood_fill(&mut self, seed: Point, colour: Colour) -> usize {
        self.paint(|s| raster::flood_fill(s, seed, colour))
    }

    /// Record the current grid as a new history step.
    pub fn checkpoint(&mut self) {
        self.history.checkpoint(&self.grid);
    }

    /// Restore the previous checkpoint. Returns `false` at the oldest one.
    pub fn undo(&mut self) -> bool {
        let Some(grid) = self.history.undo() else {
            return false;
        };
        self.grid = grid.clone();
        self.presenter.redraw(&self.grid);
        true
    }

    /// Restore the next checkpoint. Returns `false` at the newest one.
    pub fn redo(&mut self) -> bool {
        let Some(grid) = self.history.redo() else {
            return false;
        };
        self.grid = grid.clone();
        self.presenter.redraw(&self.grid);
        true
    }

    /// Blank every cell at the current size and checkpoint.
    ///
    /// Cells that were painted show up as white in an active tracking session.
    pub fn clear(&mut self) {
        Tracked {
            grid: &mut self.grid,
            tracker: &mut self.tracker,
        }
        .blank();
        self.checkpoint();
        self.presenter.redraw(&self.grid);
    }

    /// Run a command script as one undoable batch.
    ///
    /// Failing lines are skipped and reported together through the
    /// presenter. Empty text does nothing at all.
    pub fn process_commands(&mut self, text: &str) -> ScriptReport {
        if text.trim().is_empty() {
            return ScriptReport::default();
        }

        let mut surface = Tracked {
            grid: &mut self.grid,
            tracker: &mut self.tracker,
        };
        let report = run_script(&self.registry, &mut surface, text);

        self.checkpoint();
        self.presenter.redraw(&self.grid);
        if let Some(failures) = report.failure_report() {
            self.presenter.report(&failures);
        }
        report
    }

    /// Begin a change tracking session, discarding any previous record.
    pub fn start_tracking(&mut self) {
        debug!("change tracking started");
        self.tracker.start();
    }

    /// End the tracking session. Changes stay readable until the next start.
    pub fn stop_tracking(&mut self) {
        debug!("change tracking stopped with {} change(s)", self.tracker.len());
        self.tracker.stop();
    }

    pub fn is_tracking(&self) -> bool {
        self.tracker.is_active()
    }

    /// Cells changed in the current or last tracking session, by row then column.
    pub fn changes(&self) -> Vec<Pixel> {
        self.tracker.snapshot()
    }

    pub fn change_summary(&self) -> String {
        self.tracker.summary()
    }

    /// The command reference for this canvas's size.
    pub fn reference(&self) -> String {
        self.registry.reference(self.width(), self.height())
    }

    fn paint(&mut self, draw: impl FnOnce(&mut Tracked<'_>) -> usize) -> usize {
        let mut surface = Tracked {
            grid: &mut self.grid,
            tracker: &mut self.tracker,
        };
        let written = draw(&mut surface);
        self.presenter.redraw(&self.grid);
        written
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("pixel_size", &self.pixel_size)
            .field("history", &self.history.len())
            .field("tool", &self.tool)
            .field("colour", &self.colour)
            .finish_non_exhaustive()
    }
}

/// The grid seen through the change tracker.
struct Tracked<'a> {
    grid: &'a mut Grid,
    tracker: &'a mut ChangeTracker,
}

impl Tracked<'_> {
    /// Reset the grid to white and untouched, recording each painted cell.
    fn blank(&mut self) {
        for (x, y, colour) in self.grid.painted() {
            self.tracker.record(x, y, colour, Colour::WHITE);
        }
        self.grid.clear();
    }
}

impl Surface for Tracked<'_> {
    fn width(&self) -> usize {
        self.grid.width()
    }

    fn height(&self) -> usize {
        self.grid.height()
    }

    fn get(&self, x: i64, y: i64) -> Option<Colour> {
        self.grid.get(x, y)
    }

    fn set_pixel(&mut self, x: i64, y: i64, colour: Colour) -> bool {
        let Some(before) = self.grid.get(x, y) else {
            return false;
        };
        self.grid.set_pixel(x, y, colour);
        self.tracker.record(x as usize, y as usize, before, colour);
        true
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::recorded_canvas;
    use super::*;
    use pretty_assertions::assert_eq;

    const GREY: Colour = Colour::rgb(10, 10, 10);

    #[test]
    fn test_new_canvas_is_blank() {
        let canvas = Canvas::new(100, 100).unwrap();
        assert_eq!(canvas.grid().touched_count(), 0);
        assert_eq!(canvas.history().len(), 1);
        assert!(!canvas.is_tracking());
        assert_eq!(canvas.pixel_size(), DEFAULT_PIXEL_SIZE);
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        assert!(Canvas::new(0, 10).is_err());
        assert!(Canvas::new(10, 1001).is_err());
        assert!(Canvas::new(1000, 1000).is_ok());
    }

    #[test]
    fn test_from_manifest() {
        let manifest = Manifest {
            width: 20,
            height: 30,
            pixel_size: 3,
            history_limit: Some(2),
            ..Default::default()
        };
        let mut canvas = Canvas::from_manifest(&manifest).unwrap();
        assert_eq!(canvas.grid().size(), (20, 30));
        assert_eq!(canvas.pixel_size(), 3);

        for i in 0..5 {
            canvas.set_pixel(i, 0, Colour::BLACK);
            canvas.checkpoint();
        }
        assert_eq!(canvas.history().len(), 2);
    }

    #[test]
    fn test_set_pixel_reads_back() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        assert!(canvas.set_pixel(3, 4, GREY));
        assert_eq!(canvas.grid().get(3, 4), Some(GREY));
        assert!(canvas.grid().is_touched(3, 4));
    }

    #[test]
    fn test_set_pixel_out_of_bounds_changes_nothing() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        let before = canvas.grid().clone();
        for (x, y) in [(-1, 0), (0, -1), (10, 0), (0, 10), (i64::MAX, 3)] {
            assert!(!canvas.set_pixel(x, y, GREY));
        }
        assert_eq!(canvas.grid(), &before);
    }

    #[test]
    fn test_undo_redo_exact() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.draw_line(Point::new(0, 0), Point::new(9, 9), GREY);
        canvas.checkpoint();
        let after_line = canvas.grid().clone();

        canvas.draw_box(Point::new(2, 2), Point::new(4, 4), Colour::BLACK);
        canvas.checkpoint();
        let after_box = canvas.grid().clone();

        assert!(canvas.undo());
        assert_eq!(canvas.grid(), &after_line);
        assert!(canvas.undo());
        assert_eq!(canvas.grid(), &Grid::new(10, 10).unwrap());
        assert!(!canvas.undo());

        assert!(canvas.redo());
        assert!(canvas.redo());
        assert_eq!(canvas.grid(), &after_box);
        assert!(!canvas.redo());
    }

    #[test]
    fn test_checkpoint_after_undo_drops_redo() {
        let mut canvas = Canvas::new(5, 5).unwrap();
        canvas.set_pixel(0, 0, GREY);
        canvas.checkpoint();
        canvas.set_pixel(1, 1, GREY);
        canvas.checkpoint();

        canvas.undo();
        canvas.set_pixel(4, 4, Colour::BLACK);
        canvas.checkpoint();

        assert!(!canvas.redo());
        assert_eq!(canvas.grid().get(1, 1), Some(Colour::WHITE));
        assert_eq!(canvas.grid().get(4, 4), Some(Colour::BLACK));
    }

    #[test]
    fn test_resize_resets_history_and_tracking() {
        let (mut canvas, recorded) = recorded_canvas(100, 100);
        canvas.start_tracking();
        canvas.fill_background(GREY);
        canvas.checkpoint();
        assert_eq!(canvas.history().len(), 2);

        canvas.resize(50, 50).unwrap();

        assert_eq!(canvas.grid(), &Grid::new(50, 50).unwrap());
        assert_eq!(canvas.history().len(), 1);
        assert!(!canvas.undo());
        assert!(!canvas.is_tracking());
        assert!(canvas.changes().is_empty());
        assert_eq!(
            recorded.borrow().reports,
            vec!["Dimensions changed from (0-99) to (0-49) and (0-99) to (0-49)"]
        );
    }

    #[test]
    fn test_resize_rejects_out_of_range() {
        let (mut canvas, recorded) = recorded_canvas(10, 10);
        canvas.set_pixel(1, 1, GREY);
        canvas.checkpoint();

        assert!(canvas.resize(0, 10).is_err());
        assert!(canvas.resize(10, 1001).is_err());

        assert_eq!(canvas.grid().size(), (10, 10));
        assert_eq!(canvas.grid().get(1, 1), Some(GREY));
        assert_eq!(canvas.history().len(), 2);
        assert!(recorded.borrow().reports.is_empty());
    }

    #[test]
    fn test_draw_circle_rejects_non_positive_radius() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        let err = canvas.draw_circle(Point::new(5, 5), 0, GREY).unwrap_err();
        assert_eq!(err.to_string(), "Invalid radius. Must be greater than 0");
        assert!(canvas.draw_circle(Point::new(5, 5), -3, GREY).is_err());
        assert_eq!(canvas.grid().touched_count(), 0);

        assert_eq!(canvas.draw_circle(Point::new(5, 5), 1, GREY), Ok(5));
    }

    #[test]
    fn test_process_commands_isolates_failures() {
        let (mut canvas, recorded) = recorded_canvas(100, 100);

        let report = canvas.process_commands("COLOR: (1,1) (10,20,30)\nCIRCLE: (5,5) -1 (0,0,0)");

        assert_eq!(canvas.grid().get(1, 1), Some(Colour::rgb(10, 20, 30)));
        assert_eq!(canvas.grid().touched_count(), 1);
        assert_eq!(report.executed, 1);
        assert_eq!(report.failures.len(), 1);

        let reports = &recorded.borrow().reports;
        assert_eq!(reports.len(), 1);
        assert!(reports[0].contains("CIRCLE failed: Invalid radius. Must be greater than 0"));
    }

    #[test]
    fn test_process_commands_checkpoints_once() {
        let mut canvas = Canvas::new(20, 20).unwrap();
        canvas.process_commands("BACKGROUND: (0,0,0)\nCOLOR: (1,1) (255,0,0)\nLINE: (0,0) (5,5) (1,2,3)");
        assert_eq!(canvas.history().len(), 2);

        assert!(canvas.undo());
        assert_eq!(canvas.grid(), &Grid::new(20, 20).unwrap());
    }

    #[test]
    fn test_process_commands_empty_is_noop() {
        let (mut canvas, recorded) = recorded_canvas(10, 10);
        let report = canvas.process_commands("  \n");
        assert!(report.is_clean());
        assert_eq!(canvas.history().len(), 1);
        assert_eq!(recorded.borrow().redraws, 0);
    }

    #[test]
    fn test_process_commands_clean_script_reports_nothing() {
        let (mut canvas, recorded) = recorded_canvas(10, 10);
        canvas.process_commands("BACKGROUND: (1,1,1)\nnot a command");
        assert!(recorded.borrow().reports.is_empty());
        assert!(recorded.borrow().redraws > 0);
    }

    #[test]
    fn test_background_covers_grid() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        canvas.process_commands("BACKGROUND: (10,10,10)");
        assert!(canvas.grid().iter_cells().all(|(_, _, c)| c == GREY));
        assert_eq!(canvas.grid().touched_count(), 10_000);
    }

    #[test]
    fn test_flood_fill_blank_grid() {
        let mut canvas = Canvas::new(30, 20).unwrap();
        assert_eq!(canvas.flood_fill(Point::new(7, 3), GREY), 600);
        assert_eq!(canvas.flood_fill(Point::new(0, 0), GREY), 0);
    }

    #[test]
    fn test_tracking_records_distinct_changes() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.set_pixel(0, 0, GREY);

        canvas.start_tracking();
        canvas.set_pixel(0, 0, GREY);
        canvas.set_pixel(2, 1, Colour::BLACK);
        canvas.set_pixel(2, 1, Colour::rgb(1, 2, 3));
        canvas.set_pixel(5, 0, Colour::BLACK);
        canvas.set_pixel(50, 0, Colour::BLACK);
        canvas.stop_tracking();
        canvas.set_pixel(9, 9, Colour::BLACK);

        assert_eq!(
            canvas.changes(),
            vec![
                Pixel::new(5, 0, Colour::BLACK),
                Pixel::new(2, 1, Colour::rgb(1, 2, 3)),
            ]
        );
        assert_eq!(
            canvas.change_summary(),
            "Pixel (5,0) set to RGB(0,0,0)\nPixel (2,1) set to RGB(1,2,3)"
        );
    }

    #[test]
    fn test_tracking_sees_script_writes() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.start_tracking();
        canvas.process_commands("BOX_FILL: (1,1) (2,2) (0,0,0)");
        canvas.stop_tracking();
        assert_eq!(canvas.changes().len(), 4);
    }

    #[test]
    fn test_clear_is_undoable() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.process_commands("BACKGROUND: (0,0,0)");
        let painted = canvas.grid().clone();

        canvas.clear();
        assert_eq!(canvas.grid().touched_count(), 0);
        assert_eq!(canvas.grid().size(), (10, 10));

        assert!(canvas.undo());
        assert_eq!(canvas.grid(), &painted);
    }

    #[test]
    fn test_clear_shows_in_tracking() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.set_pixel(4, 4, Colour::BLACK);

        canvas.start_tracking();
        canvas.set_pixel(1, 1, GREY);
        canvas.clear();
        canvas.set_pixel(2, 2, GREY);
        canvas.stop_tracking();

        assert_eq!(
            canvas.changes(),
            vec![
                Pixel::new(1, 1, Colour::WHITE),
                Pixel::new(2, 2, GREY),
                Pixel::new(4, 4, Colour::WHITE),
            ]
        );
    }

    #[test]
    fn test_set_pixel_size_floors_at_one_and_redraws() {
        let (mut canvas, recorded) = recorded_canvas(10, 10);
        canvas.set_pixel_size(4);
        assert_eq!(canvas.pixel_size(), 4);
        canvas.set_pixel_size(0);
        assert_eq!(canvas.pixel_size(), 1);
        assert_eq!(recorded.borrow().redraws, 2);
    }

    #[test]
    fn test_custom_registry_drives_process_commands() {
        use crate::command::{Command, CommandDef, Field};

        let mut registry = CommandRegistry::builtin();
        registry.register(CommandDef {
            name: "DOT",
            pattern: &[Field::Point],
            usage: "(x,y)",
            description: "Draw a grey point",
            bounds_subject: "coordinates",
            build: |a| {
                Ok(Command::Color {
                    at: a.points[0],
                    colour: GREY,
                })
            },
        });
        let mut canvas = Canvas::new(10, 10).unwrap().with_registry(registry);

        let report = canvas.process_commands("DOT: (3,4)\nDOT: (30,4)");

        assert_eq!(report.executed, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].name, "DOT");
        assert_eq!(canvas.grid().get(3, 4), Some(GREY));
        assert_eq!(canvas.registry().len(), 7);
        assert!(canvas.reference().contains("DOT: (x,y) - Draw a grey point"));

        let mut plain = Canvas::new(10, 10).unwrap();
        assert_eq!(plain.process_commands("DOT: (3,4)").executed, 0);
        assert_eq!(plain.grid().touched_count(), 0);
    }

    #[test]
    fn test_redraw_after_mutation() {
        let (mut canvas, recorded) = recorded_canvas(10, 10);
        canvas.set_pixel(1, 1, GREY);
        canvas.checkpoint();
        canvas.undo();
        assert_eq!(recorded.borrow().redraws, 2);
    }

    #[test]
    fn test_reference_uses_canvas_size() {
        let canvas = Canvas::new(64, 32).unwrap();
        let reference = canvas.reference();
        assert!(reference.contains("0-63 for x, 0-31 for y"));
        assert!(reference.ends_with("Canvas size: 64x32"));
    }
}
