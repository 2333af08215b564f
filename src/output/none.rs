//! Silent renderer

use crate::domain::DependencyResult;
use crate::output::Output;

/// Discards everything
#[derive(Debug, Default)]
pub struct NoneOutput;

impl Output for NoneOutput {
    fn begin(&mut self) {}
    fn end(&mut self) {}
    fn header(&mut self, _text: &str) {}
    fn begin_section(&mut self, _title: &str) {}
    fn end_section(&mut self, _render: bool) {}
    fn line(&mut self, _text: &str) {}
    fn error(&mut self, _text: &str) {}
    fn raw(&mut self, _text: &str) {}
    fn summary(&mut self, _results: &[DependencyResult]) {}
}
