//! Terminal output for the promptcanvas CLI.
//!
//! Status lines look like Cargo's: a bold, right-aligned verb followed by a
//! message. They go to stderr, leaving stdout for captures, references and
//! change summaries that other tools may consume.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::command::CommandFailure;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Column the verbs are right-aligned to.
const VERB_WIDTH: usize = 12;

/// Colour family of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Progress,
    Info,
    Warning,
}

impl Tone {
    fn ansi(self) -> &'static str {
        match self {
            Tone::Progress => "\x1b[32m",
            Tone::Info => "\x1b[36m",
            Tone::Warning => "\x1b[33m",
        }
    }
}

/// Writes status lines to stderr, coloured only when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// A printer that never emits escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// e.g. "     Drawing scenes/house.canvas"
    pub fn status(&self, verb: &str, message: &str) {
        self.emit(Tone::Progress, verb, message);
    }

    pub fn success(&self, verb: &str, message: &str) {
        self.emit(Tone::Progress, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.emit(Tone::Info, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.emit(Tone::Warning, verb, message);
    }

    /// Report one failed script line as `path:line KEYWORD failed: message`.
    pub fn failure(&self, path: &Path, failure: &CommandFailure) {
        let location = self.dim(&format!("{}:{}", display_path(path), failure.line));
        self.warning("Failed", &format!("{} {}", location, failure));
    }

    pub fn dim(&self, text: &str) -> String {
        self.wrap(DIM, text)
    }

    /// Format a status line without printing it.
    pub fn render(&self, tone: Tone, verb: &str, message: &str) -> String {
        let verb = format!("{verb:>VERB_WIDTH$}");
        if self.color {
            format!("{BOLD}{}{verb}{RESET} {message}", tone.ansi())
        } else {
            format!("{verb} {message}")
        }
    }

    fn wrap(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn emit(&self, tone: Tone, verb: &str, message: &str) {
        let line = self.render(tone, verb, message);
        let _ = writeln!(io::stderr().lock(), "{}", line);
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// `plural(1, "script", "scripts")` gives "1 script".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    let word = if n == 1 { singular } else { pluralized };
    format!("{} {}", n, word)
}

/// The path relative to the working directory when it lies inside it.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));

    match relative {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}
