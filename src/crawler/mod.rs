//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - Content and metadata extraction
//! - Link extraction
//! - The frontier queue and overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{crawl, CrawlState, Crawler};
pub use extractor::{extract_markdown, extract_metadata, PageMetadata};
pub use fetcher::{Fetcher, RetryPolicy, BROWSER_USER_AGENT};
pub use frontier::{Frontier, FrontierEntry};
pub use parser::extract_links;
