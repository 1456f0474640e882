//! Snapcrawl: a bounded web page and image archiver
//!
//! This crate implements a crawler that walks a seed page and a bounded
//! neighborhood of linked pages, saving page text and embedded images into a
//! dated on-disk archive. Traversal is breadth-first and bounded by both a
//! page count and a link depth; image downloads run on a concurrent worker
//! pool that deduplicates against a shared registry.

pub mod config;
pub mod crawler;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for snapcrawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
///
/// These are fatal: an invalid configuration aborts the run before any
/// crawling begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid seed URL '{url}': {reason}")]
    InvalidSeedUrl { url: String, reason: String },

    #[error("Invalid value for {name}: must be at least {minimum}")]
    InvalidLimit { name: &'static str, minimum: u64 },

    #[error("Invalid timeout: must be greater than zero")]
    InvalidTimeout,
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("Malformed URL: {0}")]
    Malformed(String),
}

/// Result type alias for snapcrawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{crawl, Coordinator};
pub use state::{CrawlReport, CrawlStats, Deduplicator};
pub use url::{extract_host, normalize_url, same_site};
