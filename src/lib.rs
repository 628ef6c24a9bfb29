//! promptcanvas - pixel canvas engine driven by a drawing command language
//!
//! A mutable grid of RGB cells with rasterizers for lines, disks, boxes,
//! triangles and flood fills, a linear undo/redo history, change tracking,
//! and a line-oriented command protocol meant to be written by an external
//! agent. Each script line succeeds or fails on its own.
//!
//! # Example
//!
//! ```
//! use promptcanvas::{Canvas, Colour};
//!
//! let mut canvas = Canvas::new(100, 100).unwrap();
//! let report = canvas.process_commands("COLOR: (1,1) (10,20,30)\nCIRCLE: (5,5) -1 (0,0,0)");
//!
//! assert_eq!(canvas.grid().get(1, 1), Some(Colour::rgb(10, 20, 30)));
//! assert_eq!(report.failures.len(), 1);
//! ```

pub mod canvas;
pub mod cli;
pub mod command;
pub mod discovery;
pub mod error;
pub mod grid;
pub mod history;
pub mod output;
pub mod raster;
pub mod render;
pub mod tracker;
pub mod types;

pub use canvas::{Canvas, CanvasCapture, Dimensions, Tool};
pub use command::{
    check_script, run_script, Command, CommandDef, CommandFailure, CommandRegistry, ScriptReport,
};
pub use discovery::{discover, discover_paths, DiscoveryResult, Manifest, ScanResult};
pub use error::{CanvasError, CommandError, Result};
pub use grid::{Grid, MAX_DIMENSION};
pub use history::{History, Snapshot};
pub use raster::Surface;
pub use render::{write_png, LogPresenter, NullPresenter, Presenter};
pub use tracker::ChangeTracker;
pub use types::{Colour, Pixel, Point};
