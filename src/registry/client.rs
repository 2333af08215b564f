//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Exponential backoff retry on transport errors and HTTP 429
//! - Status code mapping onto RegistryError

use crate::error::RegistryError;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("gobump/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// HTTP client wrapper with retry logic
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                RegistryError::network_error(
                    "",
                    "HTTP client",
                    format!("failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Perform a GET request with retry logic and error context
    pub async fn get_with_context(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<Response, RegistryError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            tracing::debug!(url, attempt, "GET");
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(RegistryError::RateLimitExceeded {
                            registry: registry.to_string(),
                        });
                    } else if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
                        return Err(RegistryError::package_not_found(package, registry));
                    } else if status != StatusCode::OK {
                        return Err(RegistryError::network_error(
                            package,
                            registry,
                            format!("HTTP {}", status),
                        ));
                    } else {
                        return Ok(response);
                    }
                }
                Err(e) if e.is_timeout() => {
                    last_error = Some(RegistryError::timeout(package, registry));
                }
                Err(e) => {
                    last_error = Some(RegistryError::network_error(
                        package,
                        registry,
                        e.to_string(),
                    ));
                }
            }

            if attempt < self.max_retries {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                delay *= 2;
            }
        }

        Err(last_error
            .unwrap_or_else(|| RegistryError::network_error(package, registry, "unknown error")))
    }

    /// Perform a GET request and read the body as text
    pub async fn get_text(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<String, RegistryError> {
        let response = self.get_with_context(url, package, registry).await?;
        response
            .text()
            .await
            .map_err(|e| RegistryError::InvalidResponse {
                package: package.to_string(),
                registry: registry.to_string(),
                message: format!("failed to read response: {}", e),
            })
    }

    /// Perform a GET request and parse the JSON body
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        let response = self.get_with_context(url, package, registry).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| RegistryError::InvalidResponse {
                package: package.to_string(),
                registry: registry.to_string(),
                message: format!("failed to parse JSON: {}", e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_http_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_http_client_with_max_retries() {
        let client = HttpClient::new().unwrap().with_max_retries(5);
        assert_eq!(client.max_retries, 5);
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(30));
        assert!(DEFAULT_USER_AGENT.starts_with("gobump/"));
        assert_eq!(MAX_RETRIES, 3);
        assert_eq!(BASE_DELAY_MS, 100);
    }

    #[tokio::test]
    async fn test_get_text_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/list"))
            .respond_with(ResponseTemplate::new(200).set_body_string("v1.0.0\n"))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let body = client
            .get_text(&format!("{}/list", server.uri()), "m", "test")
            .await
            .unwrap();
        assert_eq!(body, "v1.0.0\n");
    }

    #[tokio::test]
    async fn test_not_found_maps_to_package_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let err = client
            .get_text(&format!("{}/missing", server.uri()), "m", "test")
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::PackageNotFound { .. }));
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let err = client
            .get_text(&format!("{}/boom", server.uri()), "m", "test")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_non_200_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let err = client
            .get_text(&format!("{}/empty", server.uri()), "m", "test")
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::NetworkError { .. }));
        assert!(err.to_string().contains("HTTP 204"));
    }

    #[tokio::test]
    async fn test_rate_limit_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .expect(2)
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap().with_max_retries(1);
        let err = client
            .get_text(&format!("{}/busy", server.uri()), "m", "test")
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::RateLimitExceeded { .. }));
    }
}
