//! Dependency selection filter
//!
//! Narrows the direct requirements to an explicit allow-list and marks
//! deny-listed modules as excluded.

/// How a dependency should be treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Run the upgrade loop
    Process,
    /// Record an excluded result without attempting anything
    Excluded,
    /// Not in the allow-list; no result at all
    Skipped,
}

/// Filter configuration for dependency selection
#[derive(Debug, Clone, Default)]
pub struct SelectionFilter {
    /// If non-empty, only these modules are considered
    pub only: Vec<String>,
    /// Modules to exclude from updates
    pub exclude: Vec<String>,
}

impl SelectionFilter {
    /// Create a new filter that selects everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Set modules to consider (allow-list)
    pub fn with_only(mut self, only: Vec<String>) -> Self {
        self.only = only;
        self
    }

    /// Set modules to exclude
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Decide how a module is treated
    ///
    /// The allow-list is applied first; exclusion only matters for modules
    /// that would otherwise be processed.
    pub fn classify(&self, module: &str) -> Selection {
        if !self.only.is_empty() && !self.only.iter().any(|m| m == module) {
            return Selection::Skipped;
        }
        if self.exclude.iter().any(|m| m == module) {
            return Selection::Excluded;
        }
        Selection::Process
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_filter_processes_everything() {
        let filter = SelectionFilter::new();
        assert!(filter.only.is_empty());
        assert!(filter.exclude.is_empty());
        assert_eq!(filter.classify("github.com/any/module"), Selection::Process);
    }

    #[test]
    fn test_exclude() {
        let filter = SelectionFilter::new().with_exclude(list(&["github.com/a/a"]));
        assert_eq!(filter.classify("github.com/a/a"), Selection::Excluded);
        assert_eq!(filter.classify("github.com/b/b"), Selection::Process);
    }

    #[test]
    fn test_only() {
        let filter = SelectionFilter::new().with_only(list(&["github.com/a/a"]));
        assert_eq!(filter.classify("github.com/a/a"), Selection::Process);
        assert_eq!(filter.classify("github.com/b/b"), Selection::Skipped);
    }

    #[test]
    fn test_exclude_wins_over_only() {
        let filter = SelectionFilter::new()
            .with_only(list(&["github.com/a/a"]))
            .with_exclude(list(&["github.com/a/a"]));
        assert_eq!(filter.classify("github.com/a/a"), Selection::Excluded);
    }

    #[test]
    fn test_only_evaluated_before_exclude() {
        let filter = SelectionFilter::new()
            .with_only(list(&["github.com/a/a"]))
            .with_exclude(list(&["github.com/b/b"]));
        assert_eq!(filter.classify("github.com/b/b"), Selection::Skipped);
    }

    #[test]
    fn test_match_is_exact() {
        let filter = SelectionFilter::new().with_exclude(list(&["github.com/a"]));
        assert_eq!(filter.classify("github.com/a/v2"), Selection::Process);
    }
}
