//! Version registry access
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - Go Module Proxy adapter

mod client;
mod go_proxy;

pub use client::HttpClient;
pub use go_proxy::{escape_module_path, GoProxyAdapter, GO_PROXY_URL};

use crate::error::RegistryError;
use async_trait::async_trait;

/// Source of published module versions
#[async_trait]
pub trait VersionSource: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch every published version of a module, in registry order
    async fn list_versions(&self, module: &str) -> Result<Vec<String>, RegistryError>;
}
