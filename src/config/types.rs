/// Exclude patterns applied when none are given on the command line
///
/// The `#` entry is kept for compatibility with pre-normalization URL lists;
/// candidate URLs have their fragment stripped before filtering, so it only
/// matters for patterns supplied by the operator.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["/login", "/admin", "/cart", "#"];

/// Options governing a single crawl run
///
/// The options are immutable for the lifetime of the run; the crawler clones
/// what it needs at construction and never re-reads them.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Maximum number of pages to process; error results count too
    pub max_pages: usize,

    /// Inclusive link-depth limit; the seed is at depth 0
    pub max_depth: usize,

    /// Pause after each processed page, in seconds; at most one hour
    pub delay_seconds: f64,

    /// Restrict traversal to the seed's host (exact match, no subdomains)
    pub same_domain_only: bool,

    /// Regex patterns a candidate URL must match; `None` means no restriction
    pub include_patterns: Option<Vec<String>>,

    /// Regex patterns that reject a candidate URL; exclude wins over include
    pub exclude_patterns: Vec<String>,

    /// Accepted for interface compatibility; robots.txt is not enforced
    pub respect_robots: bool,
}

impl CrawlOptions {
    /// Returns the built-in exclude pattern list as owned strings.
    pub fn default_exclude_patterns() -> Vec<String> {
        DEFAULT_EXCLUDE_PATTERNS
            .iter()
            .map(|p| p.to_string())
            .collect()
    }
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_pages: 20,
            max_depth: 3,
            delay_seconds: 1.0,
            same_domain_only: true,
            include_patterns: None,
            exclude_patterns: Self::default_exclude_patterns(),
            respect_robots: false,
        }
    }
}
