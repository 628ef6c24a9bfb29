//! Multi-line script execution.

use std::fmt;

use log::{debug, trace};

use crate::error::CommandError;
use crate::raster::Surface;

use super::{Command, CommandRegistry};

/// A command line that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFailure {
    /// 1-indexed line number within the script.
    pub line: usize,
    /// Keyword of the failed command.
    pub name: &'static str,
    pub error: CommandError,
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.name, self.error)
    }
}

/// Outcome of running (or checking) a script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptReport {
    /// Commands that passed validation.
    pub executed: usize,
    /// Cells written by those commands (zero when only checking).
    pub pixels: usize,
    /// Failed lines, in script order.
    pub failures: Vec<CommandFailure>,
}

impl ScriptReport {
    /// True when no line failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// The aggregated failure report, one `<KEYWORD> failed: <message>` line
    /// per failure, or None if everything succeeded.
    pub fn failure_report(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let lines: Vec<String> = self.failures.iter().map(ToString::to_string).collect();
        Some(format!("Commands failed:\n{}", lines.join("\n")))
    }
}

/// Parse every command line in a script, skipping comments, blank lines and
/// unrecognised text. Yields `(line_number, command)` pairs.
pub fn parse_script<'a>(
    registry: &'a CommandRegistry,
    text: &'a str,
    width: usize,
    height: usize,
) -> impl Iterator<Item = (usize, Command)> + 'a {
    text.lines().enumerate().filter_map(move |(i, line)| {
        if line.trim().is_empty() || line.starts_with('#') {
            return None;
        }
        registry.parse_line(line, width, height).map(|cmd| (i + 1, cmd))
    })
}

/// Run a script against a surface.
///
/// Lines are applied in order. A failing line is recorded and skipped; it
/// never stops later lines. Checkpointing is left to the caller.
pub fn run_script<S: Surface + ?Sized>(
    registry: &CommandRegistry,
    surface: &mut S,
    text: &str,
) -> ScriptReport {
    let (width, height) = (surface.width(), surface.height());
    let mut report = ScriptReport::default();

    for (line, command) in parse_script(registry, text, width, height) {
        match command {
            Command::Error { name, error } => {
                debug!("line {}: {} rejected: {}", line, name, error);
                report.failures.push(CommandFailure { line, name, error });
            }
            command => {
                let written = command.execute(surface);
                trace!("line {}: {} wrote {} pixel(s)", line, command.name(), written);
                report.executed += 1;
                report.pixels += written;
            }
        }
    }

    debug!(
        "script done: {} executed, {} failed",
        report.executed,
        report.failures.len()
    );
    report
}

/// Validate a script against a canvas size without painting anything.
pub fn check_script(
    registry: &CommandRegistry,
    text: &str,
    width: usize,
    height: usize,
) -> ScriptReport {
    let mut report = ScriptReport::default();
    for (line, command) in parse_script(registry, text, width, height) {
        match command {
            Command::Error { name, error } => {
                report.failures.push(CommandFailure { line, name, error })
            }
            _ => report.executed += 1,
        }
    }
    report
}
