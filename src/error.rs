//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues reading, parsing or writing go.mod
//! - RegistryError: Issues with the module proxy or the GitHub API
//! - CommandError: External process failures (go get, verification hooks)
//! - ChangelogError: Changelog generation and publishing
//!
//! Only `AppError` ever reaches `main`; everything else is recovered inside
//! the orchestrator and reported per dependency.

use std::path::PathBuf;
use thiserror::Error;

/// Exit code when the source manifest cannot be read
pub const EXIT_READ: u8 = 2;
/// Exit code when the destination manifest cannot be written
pub const EXIT_WRITE: u8 = 3;
/// Exit code when the source manifest cannot be parsed
pub const EXIT_PARSE: u8 = 4;

/// Fatal application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

impl AppError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Manifest(ManifestError::ReadError { .. }) => EXIT_READ,
            AppError::Manifest(ManifestError::WriteError { .. }) => EXIT_WRITE,
            AppError::Manifest(ManifestError::ParseError { .. }) => EXIT_PARSE,
        }
    }
}

/// Errors related to go.mod operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("error reading {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("error writing {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// go.mod syntax error
    #[error("error parsing {path}:{line}: {message}")]
    ParseError {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

/// Errors related to version registry and GitHub API communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Module not found in registry
    #[error("module '{package}' not found in {registry}")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry}")]
    RateLimitExceeded { registry: String },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },

    /// The version a module is currently required at is not a valid version
    #[error("invalid current version '{version}' for '{package}'")]
    InvalidVersion { package: String, version: String },

    /// GOPROXY reaches `off` before naming a proxy
    #[error("GOPROXY={goproxy} disables module proxy lookups")]
    ProxyDisabled { goproxy: String },
}

/// Errors raised while running external commands
#[derive(Error, Debug)]
pub enum CommandError {
    /// Command string contained nothing to run
    #[error("command error: no command")]
    Empty,

    /// Process could not be started
    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process ran and exited unsuccessfully
    #[error("'{command}' exited with {status}")]
    Failed { command: String, status: String },
}

/// Errors raised while generating or publishing a changelog
#[derive(Error, Debug)]
pub enum ChangelogError {
    /// GitHub API request failed
    #[error(transparent)]
    Api(#[from] RegistryError),

    /// Publishing a gist needs GITHUB_TOKEN
    #[error("GITHUB_TOKEN is required to create a gist")]
    MissingToken,

    /// Gist creation was rejected
    #[error("gist creation failed: {0}")]
    Gist(String),

    /// Changelog file could not be written
    #[error("error writing changelog to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new ParseError
    pub fn parse_error(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        ManifestError::ParseError {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }
}
