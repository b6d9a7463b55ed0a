//! Pagesift: a bounded, polite website crawler
//!
//! This crate implements a breadth-first website crawler that fetches pages
//! starting from a seed URL, converts them to markdown, extracts metadata and
//! links, and produces a structured JSON report. Page budgets, depth limits,
//! domain containment, and a politeness delay keep the crawl bounded.

pub mod config;
pub mod crawler;
pub mod enrich;
pub mod report;
pub mod url;

use thiserror::Error;

/// Main error type for pagesift operations
///
/// A crawl can only fail before it starts: once the loop is running, every
/// per-page failure is captured in the page's result and the run completes.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid seed URL '{url}': {source}")]
    InvalidSeed {
        url: String,
        source: ::url::ParseError,
    },

    #[error("unsupported seed scheme '{0}': only http and https can be crawled")]
    UnsupportedScheme(String),

    #[error("seed URL has no host: {0}")]
    MissingHost(String),

    #[error("max_pages must be at least 1")]
    ZeroPageBudget,

    #[error("delay_seconds must be between 0 and 3600, got {0}")]
    InvalidDelay(f64),

    #[error("invalid filter pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Fetch failures, tagged by kind so callers can branch on category
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("transport error: {0}")]
    Transport(reqwest::Error),
}

impl FetchError {
    /// Returns true if another attempt at the same request could succeed.
    ///
    /// Retryable statuses are 429, 500, 502, 503, and 504; connection-level
    /// failures (DNS, timeout, refused) are always retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Status { status, .. } => {
                matches!(*status, 429 | 500 | 502 | 503 | 504)
            }
            FetchError::Timeout | FetchError::Connect(_) | FetchError::Transport(_) => true,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connect(err.to_string())
        } else {
            FetchError::Transport(err)
        }
    }
}

/// Errors from the content analysis service
///
/// These never surface past the enrichment boundary; they are converted to
/// degraded enrichment records so the crawl can proceed.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("analysis service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("analysis service returned no choices")]
    EmptyResponse,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Result type alias for pagesift operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for enrichment operations
pub type EnrichResult<T> = std::result::Result<T, EnrichError>;

// Re-export commonly used types
pub use config::CrawlOptions;
pub use crawler::{crawl, Crawler, RetryPolicy};
pub use enrich::Enricher;
pub use report::{CrawlReport, PageResult, PageStatus};
pub use crate::url::{extract_authority, normalize_url, LinkFilter};
