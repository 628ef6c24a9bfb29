use miette::Diagnostic;
use thiserror::Error;

/// Main error type for canvas operations
#[derive(Error, Diagnostic, Debug)]
pub enum CanvasError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(canvas::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(canvas::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid dimensions {width}x{height}")]
    #[diagnostic(
        code(canvas::dimension),
        help("Please enter valid dimensions (1-1000)")
    )]
    Dimension { width: usize, height: usize },

    #[error("Script error: {message}")]
    #[diagnostic(code(canvas::script))]
    Script {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Render error: {message}")]
    #[diagnostic(code(canvas::render))]
    Render {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, CanvasError>;

/// A single command line that failed validation.
///
/// These never abort a script; they are collected and reported per line.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid format. Use: {usage}")]
    #[diagnostic(code(canvas::command::format))]
    Format { usage: String },

    #[error(
        "Invalid {subject}. Must be within canvas bounds (0-{}, 0-{})",
        .width.saturating_sub(1),
        .height.saturating_sub(1)
    )]
    #[diagnostic(code(canvas::command::bounds))]
    Bounds {
        subject: &'static str,
        width: usize,
        height: usize,
    },

    #[error("Invalid color values. Each value must be between 0-255")]
    #[diagnostic(code(canvas::command::color))]
    ColorRange,

    #[error("{message}")]
    #[diagnostic(code(canvas::command::parameter))]
    Parameter { message: String },
}
