//! Result aggregation

use crate::domain::DependencyResult;

/// Sort results by module path for stable reporting
///
/// The sort is stable and leaves every field untouched.
pub fn aggregate(mut results: Vec<DependencyResult>) -> Vec<DependencyResult> {
    results.sort_by(|a, b| a.module_path.cmp(&b.module_path));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts_by_module_path() {
        let results = vec![
            DependencyResult::unchanged("github.com/z/z", "v1.0.0"),
            DependencyResult::excluded("github.com/a/a", "v1.0.0"),
            DependencyResult::unresolved("golang.org/x/text", "v0.1.0"),
            DependencyResult::unchanged("github.com/m/m", "v2.0.0"),
        ];

        let sorted = aggregate(results.clone());
        let paths: Vec<&str> = sorted.iter().map(|r| r.module_path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "github.com/a/a",
                "github.com/m/m",
                "github.com/z/z",
                "golang.org/x/text"
            ]
        );
        assert_eq!(sorted.len(), results.len());
        assert!(sorted.iter().all(|r| results.contains(r)));
    }

    #[test]
    fn test_empty() {
        assert!(aggregate(Vec::new()).is_empty());
    }
}
