//! Typed errors for the extraction library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching a seed URL.
///
/// Fetch failures are recovered locally: the failing URL contributes no
/// links and the scrape pass continues with the next one.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// HTTP request failed at the transport level
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

/// Errors that can occur while reading or writing the listing file.
///
/// These are fatal to a scrape pass: the whitelist/blacklist invariant
/// cannot be trusted without valid prior state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Listing file could not be read
    #[error("failed to read listing file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Listing file contents are not valid listing JSON
    #[error("malformed listing file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Listing store could not be encoded for writing
    #[error("failed to encode listing file {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Listing file could not be written
    #[error("failed to write listing file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while loading source configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Source configuration file could not be read
    #[error("failed to read source configuration {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source configuration file is not valid JSON
    #[error("malformed source configuration {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A single source entry is unusable
    #[error("source {name}: {reason}")]
    InvalidSource { name: String, reason: String },
}

/// Top-level error for a scrape pass.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Listing store could not be loaded or persisted
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Source configuration could not be loaded
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for scrape passes.
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for listing file operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
