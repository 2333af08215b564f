//! Go Module Proxy adapter
//!
//! Fetches the published versions of a module from a Go module proxy:
//! - List versions: {base}/{escaped module}/@v/list

use crate::error::RegistryError;
use crate::registry::{HttpClient, VersionSource};
use async_trait::async_trait;

/// Default Go Module Proxy base URL
pub const GO_PROXY_URL: &str = "https://proxy.golang.org";

/// Go Module Proxy adapter
#[derive(Debug)]
pub struct GoProxyAdapter {
    client: HttpClient,
    base_url: String,
}

impl GoProxyAdapter {
    /// Create a new adapter for the public proxy
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, GO_PROXY_URL)
    }

    /// Create a new adapter for a custom proxy base URL
    pub fn with_base_url(client: HttpClient, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        let base_url = if base_url.is_empty() {
            GO_PROXY_URL
        } else {
            base_url
        };
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    /// Create an adapter from a GOPROXY-style value
    ///
    /// GOPROXY is a comma or pipe separated list tried in order. The first
    /// HTTP(S) entry is used. Versions can only be listed from a proxy, so
    /// `direct` is passed over in favour of the next proxy. Nothing after
    /// `off` is ever consulted, and reaching `off` before any proxy is an
    /// error. Unset or empty means the public proxy.
    pub fn from_goproxy(client: HttpClient, goproxy: Option<&str>) -> Result<Self, RegistryError> {
        let value = goproxy.unwrap_or_default();
        for entry in value.split([',', '|']).map(str::trim) {
            if entry == "off" {
                return Err(RegistryError::ProxyDisabled {
                    goproxy: value.to_string(),
                });
            }
            if entry.starts_with("https://") || entry.starts_with("http://") {
                return Ok(Self::with_base_url(client, entry));
            }
        }
        Ok(Self::new(client))
    }

    /// Base URL in use
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the URL for listing versions
    fn build_list_url(&self, module: &str) -> String {
        format!("{}/{}/@v/list", self.base_url, escape_module_path(module))
    }
}

/// Escape a module path for use in proxy URLs
///
/// Uppercase letters become `!` followed by the lowercase letter, so that
/// paths stay unambiguous on case-insensitive file systems.
pub fn escape_module_path(module: &str) -> String {
    let mut escaped = String::with_capacity(module.len() + 4);
    for ch in module.chars() {
        if ch.is_ascii_uppercase() {
            escaped.push('!');
            escaped.push(ch.to_ascii_lowercase());
        } else {
            escaped.push(ch);
        }
    }
    escaped
}

#[async_trait]
impl VersionSource for GoProxyAdapter {
    fn registry_name(&self) -> &'static str {
        "Go Proxy"
    }

    async fn list_versions(&self, module: &str) -> Result<Vec<String>, RegistryError> {
        let list_url = self.build_list_url(module);
        let body = self
            .client
            .get_text(&list_url, module, self.registry_name())
            .await?;

        let versions: Vec<String> = body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        tracing::debug!(module, count = versions.len(), "fetched version list");
        Ok(versions)
    }
}
