//! Crawl report types
//!
//! The report is the crawler's one output: a JSON document listing every
//! processed page in the order it was processed, successes and failures
//! alike. Optional fields are omitted from the JSON rather than written
//! as null, so error entries stay compact.

use serde::Serialize;
use url::Url;

use crate::crawler::PageMetadata;
use crate::FetchError;

/// Outcome of one page visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Success,
    Error,
}

impl PageStatus {
    /// Lowercase form, matching the serialized report.
    pub fn as_str(&self) -> &'static str {
        match self {
            PageStatus::Success => "success",
            PageStatus::Error => "error",
        }
    }
}

/// AI analysis of one page's content.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichmentRecord {
    /// Parsed analysis when the service returned JSON, or a plain string
    /// otherwise (including the degraded placeholder).
    pub summary: serde_json::Value,
    /// Model that produced the summary; "N/A" for degraded records.
    pub model_used: String,
}

impl EnrichmentRecord {
    /// Placeholder record used when analysis cannot run.
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            summary: serde_json::Value::String(reason.into()),
            model_used: "N/A".to_string(),
        }
    }
}

/// One processed page.
#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
    pub url: String,
    pub status: PageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PageMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<EnrichmentRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageResult {
    pub fn success(
        url: &Url,
        content: String,
        metadata: PageMetadata,
        enrichment: Option<EnrichmentRecord>,
    ) -> Self {
        Self {
            url: url.to_string(),
            status: PageStatus::Success,
            content: Some(content),
            metadata: Some(metadata),
            enrichment,
            error: None,
        }
    }

    pub fn error(url: &Url, error: &FetchError) -> Self {
        Self {
            url: url.to_string(),
            status: PageStatus::Error,
            content: None,
            metadata: None,
            enrichment: None,
            error: Some(error.to_string()),
        }
    }
}

/// Overall report status.
///
/// Configuration problems abort the process before any report exists, so
/// a report that was written at all describes a completed run.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Completed,
}

/// Full crawl report.
#[derive(Debug, Serialize)]
pub struct CrawlReport {
    pub status: ReportStatus,
    pub start_url: String,
    pub total_pages_crawled: usize,
    pub results: Vec<PageResult>,
}

impl CrawlReport {
    pub fn new(start_url: &Url, results: Vec<PageResult>) -> Self {
        Self {
            status: ReportStatus::Completed,
            start_url: start_url.to_string(),
            total_pages_crawled: results.len(),
            results,
        }
    }
}
