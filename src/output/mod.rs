//! Run transcript and summary rendering
//!
//! This module provides:
//! - Console output for interactive use
//! - Markdown output for CI comments
//! - JSON output for machine processing
//! - A silent renderer

mod console;
mod json;
mod markdown;
mod none;

pub use console::ConsoleOutput;
pub use json::JsonOutput;
pub use markdown::MarkdownOutput;
pub use none::NoneOutput;

use crate::domain::DependencyResult;
use clap::ValueEnum;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output
    #[default]
    Console,
    /// Markdown suitable for pull request comments
    Markdown,
    /// JSON summary for machine processing
    Json,
    /// No output at all
    None,
}

/// Destination for the run transcript
///
/// Every attempted command is reported as a section. Renderers decide
/// whether a section is shown based on the flag passed to `end_section`.
pub trait Output {
    /// Start of the run
    fn begin(&mut self);

    /// End of the run
    fn end(&mut self);

    /// A heading line
    fn header(&mut self, text: &str);

    /// Open a section for an attempted command
    fn begin_section(&mut self, title: &str);

    /// Close the current section; `render` marks it as worth showing
    fn end_section(&mut self, render: bool);

    /// A plain transcript line
    fn line(&mut self, text: &str);

    /// An error line
    fn error(&mut self, text: &str);

    /// Raw output forwarded from an external process
    fn raw(&mut self, text: &str);

    /// Final per-dependency summary
    fn summary(&mut self, results: &[DependencyResult]);
}

/// Short identifier of the build, set through `GOBUMP_BUILD_COMMIT` at compile time
pub fn build_id() -> &'static str {
    option_env!("GOBUMP_BUILD_COMMIT").unwrap_or("HEAD")
}

/// Create the renderer for a format, writing to stdout
pub fn create_output(format: OutputFormat, dry_run: bool) -> Box<dyn Output> {
    match format {
        OutputFormat::Console => Box::new(ConsoleOutput::stdio()),
        OutputFormat::Markdown => Box::new(MarkdownOutput::new(std::io::stdout())),
        OutputFormat::Json => Box::new(JsonOutput::new(std::io::stdout(), dry_run)),
        OutputFormat::None => Box::new(NoneOutput),
    }
}

/// "-" for empty values in tables
pub(crate) fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Console);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(
            OutputFormat::from_str("markdown", true).unwrap(),
            OutputFormat::Markdown
        );
        assert_eq!(OutputFormat::from_str("none", true).unwrap(), OutputFormat::None);
        assert!(OutputFormat::from_str("html", true).is_err());
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(Some("1.21")), "1.21");
    }
}
