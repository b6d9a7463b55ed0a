use crate::config::CrawlOptions;
use crate::url::extract_authority;
use crate::ConfigError;
use regex::{Regex, RegexBuilder};
use url::Url;

/// Decides whether a discovered link is eligible for traversal
///
/// The filter is built once per crawl run from the seed URL and the crawl
/// options; all patterns are compiled at construction. A candidate is
/// accepted only if every check passes, in this order:
///
/// 1. the scheme is `http` or `https`;
/// 2. with `same_domain_only`, the candidate's authority equals the seed's;
/// 3. no exclude pattern matches the URL;
/// 4. if include patterns were given, at least one matches.
///
/// Exclude always wins over include. Pattern matching is case-insensitive
/// and runs against the full URL string.
///
/// # Examples
///
/// ```
/// use pagesift::config::CrawlOptions;
/// use pagesift::url::LinkFilter;
/// use url::Url;
///
/// let seed = Url::parse("https://example.com/").unwrap();
/// let filter = LinkFilter::new(&seed, &CrawlOptions::default()).unwrap();
///
/// let blog = Url::parse("https://example.com/blog").unwrap();
/// assert!(filter.is_valid(&blog));
///
/// let admin = Url::parse("https://example.com/admin/users").unwrap();
/// assert!(!filter.is_valid(&admin));
/// ```
#[derive(Debug)]
pub struct LinkFilter {
    same_domain_only: bool,
    seed_authority: Option<String>,
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl LinkFilter {
    /// Builds the filter, compiling every pattern exactly once.
    ///
    /// A pattern that fails to compile is a configuration error; the crawl
    /// must not start with a partially working filter.
    pub fn new(seed: &Url, options: &CrawlOptions) -> Result<Self, ConfigError> {
        let include = match &options.include_patterns {
            Some(patterns) => compile_patterns(patterns)?,
            None => Vec::new(),
        };
        let exclude = compile_patterns(&options.exclude_patterns)?;

        Ok(Self {
            same_domain_only: options.same_domain_only,
            seed_authority: extract_authority(seed),
            include,
            exclude,
        })
    }

    /// Returns true if the candidate URL may be enqueued.
    pub fn is_valid(&self, url: &Url) -> bool {
        if url.scheme() != "http" && url.scheme() != "https" {
            return false;
        }

        if self.same_domain_only {
            let candidate = extract_authority(url);
            match (&self.seed_authority, candidate) {
                (Some(seed), Some(candidate)) if *seed == candidate => {}
                _ => return false,
            }
        }

        let url_str = url.as_str();

        if self.exclude.iter().any(|pattern| pattern.is_match(url_str)) {
            return false;
        }

        if !self.include.is_empty() && !self.include.iter().any(|pattern| pattern.is_match(url_str))
        {
            return false;
        }

        true
    }
}

/// Compiles patterns case-insensitively, surfacing the first bad one.
fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
        })
        .collect()
}
