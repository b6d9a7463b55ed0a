//! AI content enrichment
//!
//! Optional per-page analysis of extracted markdown. The enricher is
//! constructed once per crawl; pages receive a degraded record instead of
//! an error whenever analysis cannot run.

mod openai;

pub use openai::{Enricher, DEFAULT_ANALYSIS_PROMPT};
