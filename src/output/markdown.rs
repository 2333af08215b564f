//! Markdown renderer for CI pull request comments
//!
//! Section content is buffered and only rendered as a collapsible
//! `<details>` block when the section is closed with `render = true`.

use crate::domain::{Action, DependencyResult};
use crate::output::{build_id, or_dash, Output};
use std::io::Write;

/// Markdown output
pub struct MarkdownOutput<W: Write> {
    dest: W,
    /// Open section title and buffered content
    section: Option<(String, String)>,
}

impl<W: Write> MarkdownOutput<W> {
    /// Create a markdown renderer
    pub fn new(dest: W) -> Self {
        Self {
            dest,
            section: None,
        }
    }

    /// Consume the renderer and return its writer
    pub fn into_inner(self) -> W {
        self.dest
    }

    fn write(&mut self, text: &str) {
        match self.section.as_mut() {
            Some((_, buffer)) => buffer.push_str(text),
            None => {
                let _ = self.dest.write_all(text.as_bytes());
            }
        }
    }

    fn action_label(action: Action) -> &'static str {
        match action {
            Action::Upgraded => "upgraded",
            Action::Kept => "no action",
            Action::Excluded => "excluded",
            Action::Failed => "skipped",
        }
    }
}

impl<W: Write> Output for MarkdownOutput<W> {
    fn begin(&mut self) {
        self.write("## Pinned Go version dependency update\n");
    }

    fn end(&mut self) {
        if self.section.is_some() {
            self.end_section(false);
        }
        let footer = format!("\n*Created with gobump ({})*\n", build_id());
        self.write(&footer);
        let _ = self.dest.flush();
    }

    fn header(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.write(&format!("\n### {}\n", text));
    }

    fn begin_section(&mut self, title: &str) {
        if self.section.is_some() {
            self.end_section(false);
        }
        self.section = Some((title.to_string(), String::new()));
    }

    fn end_section(&mut self, render: bool) {
        let Some((title, buffer)) = self.section.take() else {
            return;
        };
        if !render {
            return;
        }
        let mut block = format!("\n<details><summary>{}</summary>\n\n```\n", title);
        block.push_str(&buffer);
        if !buffer.is_empty() && !buffer.ends_with('\n') {
            block.push('\n');
        }
        block.push_str("```\n</details>\n");
        self.write(&block);
    }

    fn line(&mut self, text: &str) {
        self.write(&format!("{}\n", text));
    }

    fn error(&mut self, text: &str) {
        self.write(&format!("{}\n", text));
    }

    fn raw(&mut self, text: &str) {
        self.write(text);
    }

    fn summary(&mut self, results: &[DependencyResult]) {
        let mut table = String::from("\n## Summary\n\n|Module|Action|Min Go|Before|After|\n|---|---|---|---|---|\n");
        for result in results {
            table.push_str(&format!(
                "|{}|{}|{}|{}|{}|\n",
                result.module_path,
                Self::action_label(result.action()),
                or_dash(result.toolchain_after.as_deref()),
                or_dash(Some(&result.version_before)),
                or_dash(result.version_after.as_deref()),
            ));
        }
        self.write(&table);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut MarkdownOutput<Vec<u8>>)) -> String {
        let mut output = MarkdownOutput::new(Vec::new());
        f(&mut output);
        String::from_utf8(output.into_inner()).unwrap()
    }

    #[test]
    fn test_only_rendered_sections_are_shown() {
        let out = render(|o| {
            o.begin();
            o.header("Test Header");
            o.begin_section("go get example.com/a");
            o.line("Text");
            o.end_section(true);
            o.begin_section("go get example.com/b");
            o.line("Hidden");
            o.end_section(false);
            o.end();
        });

        let expected = format!(
            "## Pinned Go version dependency update\n\
             \n### Test Header\n\
             \n<details><summary>go get example.com/a</summary>\n\n```\nText\n```\n</details>\n\
             \n*Created with gobump ({})*\n",
            build_id()
        );
        assert_eq!(out, expected);
        assert!(!out.contains("Hidden"));
    }

    #[test]
    fn test_raw_output_without_newline_is_closed() {
        let out = render(|o| {
            o.begin_section("make test");
            o.raw("FAIL");
            o.end_section(true);
        });
        assert!(out.contains("```\nFAIL\n```\n"));
    }

    #[test]
    fn test_unclosed_section_is_dropped_at_end() {
        let out = render(|o| {
            o.begin_section("go get example.com/a");
            o.line("pending");
            o.end();
        });
        assert!(!out.contains("pending"));
        assert!(out.contains("Created with gobump"));
    }

    #[test]
    fn test_summary_table() {
        let mut upgraded = DependencyResult::unchanged("example.com/a", "v1.0.0");
        upgraded.version_after = Some("v1.1.0".to_string());
        upgraded.toolchain_after = Some("1.21".to_string());
        let results = vec![
            upgraded,
            DependencyResult::unchanged("example.com/b", "v1.0.0"),
            DependencyResult::excluded("example.com/c", "v2.0.0"),
            DependencyResult::unresolved("example.com/d", "v0.1.0"),
        ];

        let out = render(|o| o.summary(&results));
        assert_eq!(
            out,
            "\n## Summary\n\n\
             |Module|Action|Min Go|Before|After|\n\
             |---|---|---|---|---|\n\
             |example.com/a|upgraded|1.21|v1.0.0|v1.1.0|\n\
             |example.com/b|no action|-|v1.0.0|v1.0.0|\n\
             |example.com/c|excluded|-|v2.0.0|v2.0.0|\n\
             |example.com/d|skipped|-|v0.1.0|-|\n"
        );
    }
}
