//! File-backed manifest store

use crate::error::ManifestError;
use crate::manifest::{parse_go_mod, ManifestSnapshot, ManifestStore};
use std::fs;
use std::path::{Path, PathBuf};

/// go.mod read from one path and written to another
///
/// Every re-read after `go get` comes from `src` and the final state is
/// written to `dst`. Rollbacks restore both, since `go get` edits `src`.
#[derive(Debug, Clone)]
pub struct GoModFile {
    src: PathBuf,
    dst: PathBuf,
}

impl GoModFile {
    /// Create a store reading `src` and writing `dst`
    pub fn new(src: impl Into<PathBuf>, dst: impl Into<PathBuf>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
        }
    }

    /// Source path
    pub fn src(&self) -> &Path {
        &self.src
    }

    /// Destination path
    pub fn dst(&self) -> &Path {
        &self.dst
    }
}

impl ManifestStore for GoModFile {
    fn read(&self) -> Result<ManifestSnapshot, ManifestError> {
        let content =
            fs::read_to_string(&self.src).map_err(|e| ManifestError::read_error(&self.src, e))?;
        let snapshot = parse_go_mod(&self.src, &content)?;
        tracing::debug!(
            path = %self.src.display(),
            go = snapshot.toolchain_version.as_deref().unwrap_or("-"),
            requirements = snapshot.requirements.len(),
            "parsed go.mod"
        );
        Ok(snapshot)
    }

    fn write(&self, snapshot: &ManifestSnapshot) -> Result<(), ManifestError> {
        fs::write(&self.dst, &snapshot.content)
            .map_err(|e| ManifestError::write_error(&self.dst, e))?;
        tracing::debug!(path = %self.dst.display(), "wrote go.mod");
        Ok(())
    }

    fn restore(&self, snapshot: &ManifestSnapshot) -> Result<(), ManifestError> {
        fs::write(&self.src, &snapshot.content)
            .map_err(|e| ManifestError::write_error(&self.src, e))?;
        tracing::debug!(path = %self.src.display(), "restored go.mod");
        if self.dst != self.src {
            self.write(snapshot)?;
        }
        Ok(())
    }
}
