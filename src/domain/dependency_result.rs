//! Per-dependency upgrade outcome

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of processing a single direct dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyResult {
    /// Module path
    pub module_path: String,
    /// Version required before the run
    pub version_before: String,
    /// Version found in the last manifest produced by an upgrade attempt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_after: Option<String>,
    /// Whether the dependency ended in an accepted state
    pub success: bool,
    /// Whether the dependency was excluded from processing
    pub excluded: bool,
    /// Go version declared by the last manifest produced by an upgrade attempt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toolchain_after: Option<String>,
}

/// Summary action derived from a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Upgraded to a newer version
    Upgraded,
    /// Nothing newer was available
    Kept,
    /// Excluded by the user
    Excluded,
    /// Every attempt failed
    Failed,
}

impl DependencyResult {
    /// Result for a dependency that was excluded before any attempt
    pub fn excluded(module_path: impl Into<String>, version: impl Into<String>) -> Self {
        let version = version.into();
        Self {
            module_path: module_path.into(),
            version_before: version.clone(),
            version_after: Some(version),
            success: false,
            excluded: true,
            toolchain_after: None,
        }
    }

    /// Result for a dependency with no eligible candidates
    pub fn unchanged(module_path: impl Into<String>, version: impl Into<String>) -> Self {
        let version = version.into();
        Self {
            module_path: module_path.into(),
            version_before: version.clone(),
            version_after: Some(version),
            success: true,
            excluded: false,
            toolchain_after: None,
        }
    }

    /// Result for a dependency whose candidates could not be resolved
    pub fn unresolved(module_path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            module_path: module_path.into(),
            version_before: version.into(),
            version_after: None,
            success: false,
            excluded: false,
            toolchain_after: None,
        }
    }

    /// Returns true if the version changed
    pub fn is_changed(&self) -> bool {
        self.version_after
            .as_deref()
            .is_some_and(|after| after != self.version_before)
    }

    /// The summary action for this result
    pub fn action(&self) -> Action {
        if self.excluded {
            Action::Excluded
        } else if !self.success {
            Action::Failed
        } else if self.is_changed() {
            Action::Upgraded
        } else {
            Action::Kept
        }
    }
}

impl fmt::Display for DependencyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.action(), self.version_after.as_deref()) {
            (Action::Upgraded, Some(after)) => {
                write!(f, "{}: {} → {}", self.module_path, self.version_before, after)
            }
            (Action::Kept, _) => write!(f, "{}: {} (kept)", self.module_path, self.version_before),
            (Action::Excluded, _) => write!(f, "{}: excluded", self.module_path),
            _ => write!(f, "{}: failed", self.module_path),
        }
    }
}
