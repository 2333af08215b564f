//! Upgrade candidate resolution
//!
//! Candidates are the published versions strictly newer than the current
//! one, newest first. Pre-releases are only eligible when the current
//! version is itself a pre-release.

use crate::domain::ModuleVersion;
use crate::error::RegistryError;
use crate::registry::VersionSource;

/// Resolves upgrade candidates from a version source
pub struct CandidateResolver<'a> {
    source: &'a dyn VersionSource,
}

impl<'a> CandidateResolver<'a> {
    /// Create a resolver over a version source
    pub fn new(source: &'a dyn VersionSource) -> Self {
        Self { source }
    }

    /// Fetch versions for `module` and select the candidates newer than `current`
    pub async fn resolve(&self, module: &str, current: &str) -> Result<Vec<String>, RegistryError> {
        let current_version =
            ModuleVersion::parse(current).ok_or_else(|| RegistryError::InvalidVersion {
                package: module.to_string(),
                version: current.to_string(),
            })?;

        let published = self.source.list_versions(module).await?;
        Ok(select_candidates(&current_version, &published)
            .into_iter()
            .map(|v| v.as_str().to_string())
            .collect())
    }
}

/// Order the eligible candidates from a published version list
///
/// Invalid entries are ignored. The sort is stable, so versions with equal
/// precedence keep their registry order.
pub fn select_candidates(current: &ModuleVersion, published: &[String]) -> Vec<ModuleVersion> {
    let allow_prerelease = current.is_prerelease();

    let mut candidates: Vec<ModuleVersion> = published
        .iter()
        .filter_map(|raw| {
            let parsed = ModuleVersion::parse(raw);
            if parsed.is_none() {
                tracing::debug!(version = raw.as_str(), "skipping invalid version");
            }
            parsed
        })
        .filter(|v| allow_prerelease || !v.is_prerelease())
        .filter(|v| v.cmp_precedence(current).is_gt())
        .collect();

    candidates.sort_by(|a, b| b.cmp_precedence(a));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::cmp::Ordering;

    struct StaticSource(Result<Vec<String>, ()>);

    #[async_trait]
    impl VersionSource for StaticSource {
        fn registry_name(&self) -> &'static str {
            "static"
        }

        async fn list_versions(&self, module: &str) -> Result<Vec<String>, RegistryError> {
            self.0
                .clone()
                .map_err(|_| RegistryError::package_not_found(module, "static"))
        }
    }

    fn published(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn select(current: &str, list: &[&str]) -> Vec<String> {
        let current = ModuleVersion::parse(current).unwrap();
        select_candidates(&current, &published(list))
            .into_iter()
            .map(|v| v.as_str().to_string())
            .collect()
    }

    const REGISTRY: &[&str] = &[
        "v2.0.0",
        "v2.0.0-alpha2",
        "v2.0.0-alpha1",
        "v1.0.0",
        "v1.1.0",
        "v0.0.0-20170915032832-14c0d48ead0c",
    ];

    #[test]
    fn test_stable_current_excludes_prereleases() {
        assert_eq!(select("v1.0.0", REGISTRY), vec!["v2.0.0", "v1.1.0"]);
    }

    #[test]
    fn test_prerelease_current_allows_prereleases() {
        assert_eq!(
            select("v0.0.0-20100915032832-14c0d48ead0c", REGISTRY),
            vec![
                "v2.0.0",
                "v2.0.0-alpha2",
                "v2.0.0-alpha1",
                "v1.1.0",
                "v1.0.0",
                "v0.0.0-20170915032832-14c0d48ead0c",
            ]
        );
    }

    #[test]
    fn test_already_newest_is_empty() {
        assert!(select("v2.0.0", REGISTRY).is_empty());
        assert!(select("v3.0.0", REGISTRY).is_empty());
    }

    #[test]
    fn test_empty_registry() {
        assert!(select("v1.0.0", &[]).is_empty());
    }

    #[test]
    fn test_invalid_entries_are_ignored() {
        assert_eq!(
            select("v1.0.0", &["garbage", "v1.2.0", "1.3.0", "v1.1.0"]),
            vec!["v1.2.0", "v1.1.0"]
        );
    }

    #[test]
    fn test_build_metadata_does_not_count_as_newer() {
        assert!(select("v2.0.0", &["v2.0.0+incompatible"]).is_empty());
        assert_eq!(
            select("v1.0.0", &["v2.0.0+incompatible"]),
            vec!["v2.0.0+incompatible"]
        );
    }

    #[test]
    fn test_output_is_descending_and_strictly_newer() {
        let list = &[
            "v0.9.0", "v1.4.2", "v1.10.0", "v1.2.0", "v1.4.10", "v1.3.0", "v1.2.0",
        ];
        let current = ModuleVersion::parse("v1.2.0").unwrap();
        let result = select_candidates(&current, &published(list));
        assert!(result
            .windows(2)
            .all(|w| w[0].cmp_precedence(&w[1]) != Ordering::Less));
        assert!(result
            .iter()
            .all(|v| v.cmp_precedence(&current) == Ordering::Greater));
        assert_eq!(result.len(), 4);
    }

    #[tokio::test]
    async fn test_resolve_uses_source() {
        let source = StaticSource(Ok(published(REGISTRY)));
        let resolver = CandidateResolver::new(&source);
        let candidates = resolver.resolve("example.com/m", "v1.0.0").await.unwrap();
        assert_eq!(candidates, vec!["v2.0.0", "v1.1.0"]);
    }

    #[tokio::test]
    async fn test_resolve_propagates_fetch_error() {
        let source = StaticSource(Err(()));
        let resolver = CandidateResolver::new(&source);
        let err = resolver.resolve("example.com/m", "v1.0.0").await.unwrap_err();
        assert!(matches!(err, RegistryError::PackageNotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_rejects_invalid_current() {
        let source = StaticSource(Ok(published(REGISTRY)));
        let resolver = CandidateResolver::new(&source);
        let err = resolver.resolve("example.com/m", "latest").await.unwrap_err();
        assert!(matches!(err, RegistryError::InvalidVersion { .. }));
    }
}
