//! Crawl coordination - main crawl loop
//!
//! This module contains the loop that drives a crawl from seed to report:
//! dequeue the oldest frontier entry, fetch it once, extract content and
//! links, queue the survivors of the link filter, and pause for the
//! politeness delay. The loop ends when the page budget is spent or the
//! frontier runs dry.

use std::time::Duration;

use tracing::{debug, info, trace, warn};
use url::Url;

use crate::config::{self, CrawlOptions};
use crate::crawler::extractor::{extract_markdown, extract_metadata};
use crate::crawler::fetcher::{Fetcher, RetryPolicy};
use crate::crawler::frontier::{Frontier, FrontierEntry};
use crate::crawler::parser::extract_links;
use crate::enrich::Enricher;
use crate::report::{CrawlReport, PageResult};
use crate::url::LinkFilter;

/// Lifecycle of a crawler instance.
///
/// A crawler starts in `Ready` and moves through `Running` to `Done`
/// inside [`Crawler::run`]. Since `run` consumes the crawler, a finished
/// instance cannot be restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    Ready,
    Running,
    Done,
}

/// Single-site crawler
///
/// Construction validates the options, compiles the link filter, builds
/// the HTTP client, and seeds the frontier; nothing touches the network
/// until [`Crawler::run`]. Every processed page lands in the report, a
/// failed fetch as an error entry that still consumes page budget.
pub struct Crawler {
    seed: Url,
    options: CrawlOptions,
    fetcher: Fetcher,
    filter: LinkFilter,
    frontier: Frontier,
    enricher: Option<Enricher>,
    state: CrawlState,
}

impl Crawler {
    /// Creates a crawler for the given seed.
    ///
    /// Fails on invalid options, unbuildable filter patterns, or an HTTP
    /// client that cannot be constructed. An `enricher` of `None` turns
    /// AI analysis off entirely.
    pub fn new(
        seed: Url,
        options: CrawlOptions,
        enricher: Option<Enricher>,
        retry: RetryPolicy,
    ) -> crate::Result<Self> {
        config::validate(&options)?;
        let filter = LinkFilter::new(&seed, &options)?;
        let fetcher = Fetcher::new(retry)?;

        if options.respect_robots {
            // Accepted for interface stability; enforcement is not implemented.
            warn!("robots.txt support is not implemented; the flag has no effect");
        }

        let mut frontier = Frontier::new();
        frontier.enqueue(&seed, 0);

        Ok(Self {
            seed,
            options,
            fetcher,
            filter,
            frontier,
            enricher,
            state: CrawlState::Ready,
        })
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Runs the crawl to completion and returns the report.
    ///
    /// The crawl stops when `max_pages` results have been recorded or the
    /// frontier is empty, whichever comes first. Entries beyond the depth
    /// limit are discarded without counting. The politeness delay runs
    /// after every processed page, including the last one.
    pub async fn run(mut self) -> CrawlReport {
        self.state = CrawlState::Running;
        info!(
            "Starting crawl of {} (max {} pages, max depth {})",
            self.seed, self.options.max_pages, self.options.max_depth
        );

        let mut results: Vec<PageResult> = Vec::new();

        while results.len() < self.options.max_pages {
            let entry = match self.frontier.dequeue() {
                Some(entry) => entry,
                None => break,
            };

            if entry.depth > self.options.max_depth {
                debug!("Discarding {} beyond depth limit", entry.url);
                continue;
            }

            debug!("Processing {} (depth {})", entry.url, entry.depth);
            let result = self.process_page(&entry).await;
            info!(
                "[{}/{}] {} - {}",
                results.len() + 1,
                self.options.max_pages,
                entry.url,
                result.status.as_str()
            );
            results.push(result);

            tokio::time::sleep(Duration::from_secs_f64(self.options.delay_seconds)).await;
        }

        self.state = CrawlState::Done;
        info!("Crawl finished: {} pages processed", results.len());
        CrawlReport::new(&self.seed, results)
    }

    /// Fetches one page and builds its report entry.
    ///
    /// On success the page's outlinks are queued (when the next depth is
    /// still within the limit) and its content extracted; on failure the
    /// entry records the error and nothing is queued.
    async fn process_page(&mut self, entry: &FrontierEntry) -> PageResult {
        let body = match self.fetcher.fetch(&entry.url).await {
            Ok(body) => body,
            Err(err) => {
                warn!("Failed to fetch {}: {}", entry.url, err);
                return PageResult::error(&entry.url, &err);
            }
        };

        if entry.depth < self.options.max_depth {
            self.enqueue_links(&body, &entry.url, entry.depth + 1);
        }

        let markdown = extract_markdown(&body);
        let metadata = extract_metadata(&body);

        let enrichment = match &self.enricher {
            Some(enricher) => Some(enricher.analyze(&markdown).await),
            None => None,
        };

        PageResult::success(&entry.url, markdown, metadata, enrichment)
    }

    /// Runs discovered links through the filter and frontier.
    fn enqueue_links(&mut self, body: &str, page_url: &Url, depth: usize) {
        let links = extract_links(body, page_url);
        let found = links.len();
        let mut queued = 0;
        for link in links {
            if !self.filter.is_valid(&link) {
                trace!("Filtered out {}", link);
                continue;
            }
            if self.frontier.enqueue(&link, depth) {
                queued += 1;
            }
        }
        debug!(
            "{}: {} links found, {} queued at depth {}",
            page_url, found, queued, depth
        );
    }
}

/// Crawls a site with the default retry policy and returns the report.
///
/// # Example
///
/// ```no_run
/// use pagesift::config::{validate_seed, CrawlOptions};
/// use pagesift::crawler::crawl;
///
/// # async fn example() -> pagesift::Result<()> {
/// let seed = validate_seed("https://example.com/")?;
/// let report = crawl(seed, CrawlOptions::default(), None).await?;
/// println!("{} pages crawled", report.total_pages_crawled);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(
    seed: Url,
    options: CrawlOptions,
    enricher: Option<Enricher>,
) -> crate::Result<CrawlReport> {
    let crawler = Crawler::new(seed, options, enricher, RetryPolicy::default())?;
    Ok(crawler.run().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigError, CrawlError};

    fn seed() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    #[test]
    fn test_new_crawler_is_ready() {
        let crawler =
            Crawler::new(seed(), CrawlOptions::default(), None, RetryPolicy::default()).unwrap();
        assert_eq!(crawler.state(), CrawlState::Ready);
    }

    #[test]
    fn test_zero_page_budget_is_rejected() {
        let options = CrawlOptions {
            max_pages: 0,
            ..CrawlOptions::default()
        };
        let err = Crawler::new(seed(), options, None, RetryPolicy::default())
            .err()
            .expect("expected a config error");
        assert!(matches!(
            err,
            CrawlError::Config(ConfigError::ZeroPageBudget)
        ));
    }

    #[test]
    fn test_bad_filter_pattern_is_rejected() {
        let options = CrawlOptions {
            exclude_patterns: vec!["(oops".to_string()],
            ..CrawlOptions::default()
        };
        let err = Crawler::new(seed(), options, None, RetryPolicy::default())
            .err()
            .expect("expected a config error");
        assert!(matches!(
            err,
            CrawlError::Config(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_excessive_delay_is_rejected() {
        // A finite delay this large would overflow the politeness sleep's
        // Duration; it must be refused before any fetching can start.
        let options = CrawlOptions {
            delay_seconds: 1.0e20,
            ..CrawlOptions::default()
        };
        let err = Crawler::new(seed(), options, None, RetryPolicy::default())
            .err()
            .expect("expected a config error");
        assert!(matches!(
            err,
            CrawlError::Config(ConfigError::InvalidDelay(_))
        ));
    }
}
