//! Post-upgrade manifest validation

use crate::manifest::ManifestSnapshot;
use std::fmt;

/// Why an upgraded manifest was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The upgraded manifest has no go directive
    MissingToolchain,
    /// The upgrade changed the required go version
    ToolchainChanged { before: String, after: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingToolchain => write!(f, "go.mod has no go directive"),
            ValidationError::ToolchainChanged { before, after } => {
                write!(f, "upgrade changes required Go version {} => {}", before, after)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check an upgraded manifest against the last accepted one
pub fn validate_upgrade(
    last_known_good: &ManifestSnapshot,
    upgraded: &ManifestSnapshot,
) -> Result<(), ValidationError> {
    let Some(after) = upgraded.toolchain_version.as_deref() else {
        return Err(ValidationError::MissingToolchain);
    };

    if !last_known_good.same_toolchain(upgraded) {
        return Err(ValidationError::ToolchainChanged {
            before: last_known_good
                .toolchain_version
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            after: after.to_string(),
        });
    }

    Ok(())
}
