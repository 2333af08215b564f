//! go.mod snapshots, parsing and persistence
//!
//! This module provides:
//! - ManifestSnapshot, the immutable view of go.mod the engine works with
//! - A go.mod parser
//! - The ManifestStore trait and its file-backed implementation

mod go_mod;
mod store;

pub use go_mod::parse_go_mod;
pub use store::GoModFile;

use crate::error::ManifestError;

/// A single `require` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Module path
    pub path: String,
    /// Required version
    pub version: String,
    /// Marked `// indirect`
    pub indirect: bool,
}

/// go.mod as it was at one point in time
///
/// Snapshots are never edited; every change to the file is observed by
/// reading a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSnapshot {
    /// Module path declared by the `module` directive
    pub module: Option<String>,
    /// Version declared by the `go` directive
    pub toolchain_version: Option<String>,
    /// Requirements in declaration order
    pub requirements: Vec<Requirement>,
    /// Raw file content, written back verbatim on save
    pub content: String,
}

impl ManifestSnapshot {
    /// Requirements not marked indirect, in declaration order
    pub fn direct_requirements(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements.iter().filter(|r| !r.indirect)
    }

    /// Look up the requirement for a module path
    pub fn requirement(&self, path: &str) -> Option<&Requirement> {
        self.requirements.iter().find(|r| r.path == path)
    }

    /// Whether both snapshots declare the same go version
    ///
    /// A single trailing ".0" is ignored, so "1.21" and "1.21.0" match. Two
    /// snapshots without a go directive match each other.
    pub fn same_toolchain(&self, other: &ManifestSnapshot) -> bool {
        let normalize = |v: &str| v.strip_suffix(".0").unwrap_or(v).to_string();
        self.toolchain_version.as_deref().map(normalize)
            == other.toolchain_version.as_deref().map(normalize)
    }
}

/// Reads and writes the project manifest
pub trait ManifestStore {
    /// Read the current manifest
    fn read(&self) -> Result<ManifestSnapshot, ManifestError>;

    /// Persist a snapshot
    fn write(&self, snapshot: &ManifestSnapshot) -> Result<(), ManifestError>;

    /// Put a snapshot back everywhere the apply step may have changed it
    ///
    /// Stores that read and write the same location only need `write`.
    fn restore(&self, snapshot: &ManifestSnapshot) -> Result<(), ManifestError> {
        self.write(snapshot)
    }
}
