//! Core domain models for gobump
//!
//! - Module versions with semantic version precedence
//! - Per-dependency upgrade results

mod dependency_result;
mod version;

pub use dependency_result::{Action, DependencyResult};
pub use version::ModuleVersion;
