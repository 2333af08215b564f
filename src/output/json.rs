//! JSON renderer for machine processing
//!
//! Nothing is written until the summary; transcript errors are collected
//! and emitted alongside the results as a single JSON document.

use crate::domain::{Action, DependencyResult};
use crate::output::Output;
use serde::Serialize;
use std::io::Write;

/// JSON output
pub struct JsonOutput<W: Write> {
    dest: W,
    /// Whether this was a dry-run
    dry_run: bool,
    /// Errors reported during the run
    errors: Vec<String>,
}

/// JSON representation of the full run
#[derive(Serialize)]
struct JsonReport<'a> {
    /// Whether this was a dry-run
    dry_run: bool,
    /// Per-dependency results
    results: Vec<JsonResult<'a>>,
    /// Errors encountered
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

/// JSON representation of a dependency result
#[derive(Serialize)]
struct JsonResult<'a> {
    #[serde(flatten)]
    result: &'a DependencyResult,
    /// Summary action
    action: &'static str,
}

impl<W: Write> JsonOutput<W> {
    /// Create a JSON renderer
    pub fn new(dest: W, dry_run: bool) -> Self {
        Self {
            dest,
            dry_run,
            errors: Vec::new(),
        }
    }

    /// Consume the renderer and return its writer
    pub fn into_inner(self) -> W {
        self.dest
    }

    fn action_name(action: Action) -> &'static str {
        match action {
            Action::Upgraded => "upgraded",
            Action::Kept => "kept",
            Action::Excluded => "excluded",
            Action::Failed => "failed",
        }
    }
}

impl<W: Write> Output for JsonOutput<W> {
    fn begin(&mut self) {}

    fn end(&mut self) {
        let _ = self.dest.flush();
    }

    fn header(&mut self, _text: &str) {}

    fn begin_section(&mut self, _title: &str) {}

    fn end_section(&mut self, _render: bool) {}

    fn line(&mut self, _text: &str) {}

    fn error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }

    fn raw(&mut self, _text: &str) {}

    fn summary(&mut self, results: &[DependencyResult]) {
        let report = JsonReport {
            dry_run: self.dry_run,
            results: results
                .iter()
                .map(|result| JsonResult {
                    result,
                    action: Self::action_name(result.action()),
                })
                .collect(),
            errors: self.errors.clone(),
        };

        match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                let _ = writeln!(self.dest, "{}", json);
            }
            Err(e) => tracing::error!(error = %e, "failed to serialize summary"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_document() {
        let mut output = JsonOutput::new(Vec::new(), true);
        output.begin_section("go get example.com/a");
        output.line("ignored");
        output.error("upgrade unsuccessful, reverting go.mod");
        output.end_section(true);

        let mut upgraded = DependencyResult::unchanged("example.com/a", "v1.0.0");
        upgraded.version_after = Some("v1.1.0".to_string());
        output.summary(&[upgraded, DependencyResult::unresolved("example.com/b", "v1.0.0")]);

        let raw = String::from_utf8(output.into_inner()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(json["dry_run"], true);
        assert_eq!(json["results"][0]["module_path"], "example.com/a");
        assert_eq!(json["results"][0]["action"], "upgraded");
        assert_eq!(json["results"][0]["version_after"], "v1.1.0");
        assert_eq!(json["results"][1]["action"], "failed");
        assert!(json["results"][1].get("version_after").is_none());
        assert_eq!(
            json["errors"][0],
            "upgrade unsuccessful, reverting go.mod"
        );
    }

    #[test]
    fn test_no_errors_field_when_clean() {
        let mut output = JsonOutput::new(Vec::new(), false);
        output.summary(&[]);
        let raw = String::from_utf8(output.into_inner()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(json.get("errors").is_none());
        assert_eq!(json["results"], serde_json::json!([]));
    }
}
