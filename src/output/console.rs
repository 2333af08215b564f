//! Console renderer for human-readable display
//!
//! Sections are always shown; errors go to stderr in red.

use crate::domain::{Action, DependencyResult};
use crate::output::Output;
use colored::Colorize;
use std::io::{self, Stderr, Stdout, Write};

/// Console output writing the transcript to `out` and errors to `err`
pub struct ConsoleOutput<W: Write, E: Write> {
    out: W,
    err: E,
    /// Whether to use colors
    color: bool,
}

impl ConsoleOutput<Stdout, Stderr> {
    /// Console output on the process stdout/stderr
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<W: Write, E: Write> ConsoleOutput<W, E> {
    /// Create a console renderer with colors enabled
    pub fn new(out: W, err: E) -> Self {
        Self {
            out,
            err,
            color: true,
        }
    }

    /// Create a console renderer with color option
    pub fn with_color(out: W, err: E, color: bool) -> Self {
        Self { out, err, color }
    }

    /// Consume the renderer and return its writers
    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    fn action_label(&self, action: Action) -> String {
        let label = match action {
            Action::Upgraded => "update",
            Action::Kept => "keep",
            Action::Excluded => "excluded",
            Action::Failed => "err",
        };
        if !self.color {
            return label.to_string();
        }
        match action {
            Action::Upgraded => label.green().to_string(),
            Action::Kept => label.dimmed().to_string(),
            Action::Excluded => label.yellow().to_string(),
            Action::Failed => label.red().to_string(),
        }
    }
}

impl<W: Write, E: Write> Output for ConsoleOutput<W, E> {
    fn begin(&mut self) {}

    fn end(&mut self) {
        let _ = self.out.flush();
    }

    fn header(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let text = if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        };
        let _ = writeln!(self.out, "{}", text);
    }

    fn begin_section(&mut self, title: &str) {
        let title = if self.color {
            title.cyan().to_string()
        } else {
            title.to_string()
        };
        let _ = writeln!(self.out, "{}", title);
    }

    fn end_section(&mut self, _render: bool) {}

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
    }

    fn error(&mut self, text: &str) {
        let text = if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        };
        let _ = writeln!(self.err, "{}", text);
    }

    fn raw(&mut self, text: &str) {
        let _ = self.out.write_all(text.as_bytes());
    }

    fn summary(&mut self, results: &[DependencyResult]) {
        self.header("summary:");
        for result in results {
            let action = self.action_label(result.action());
            let line = match result.version_after.as_deref() {
                Some(after) if after != result.version_before => format!(
                    "{} {} {} -> {}",
                    result.module_path, action, result.version_before, after
                ),
                _ => format!("{} {}", result.module_path, action),
            };
            let _ = writeln!(self.out, "{}", line);
        }
    }
}
