use crate::config::CrawlOptions;
use crate::ConfigError;
use url::Url;

/// Longest accepted politeness delay, in seconds.
///
/// Also keeps the delay well inside the range `Duration::from_secs_f64`
/// accepts, so the politeness sleep can never panic mid-crawl.
pub const MAX_DELAY_SECONDS: f64 = 3600.0;

/// Parses and validates a seed URL
///
/// The seed must parse as an absolute URL, use the `http` or `https` scheme,
/// and carry a host. Anything else is a configuration error, fatal before any
/// crawling begins.
///
/// # Examples
///
/// ```
/// use pagesift::config::validate_seed;
///
/// let seed = validate_seed("https://example.com/docs").unwrap();
/// assert_eq!(seed.host_str(), Some("example.com"));
///
/// assert!(validate_seed("ftp://example.com/").is_err());
/// assert!(validate_seed("not a url").is_err());
/// ```
pub fn validate_seed(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidSeed {
        url: raw.to_string(),
        source,
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::MissingHost(raw.to_string()));
    }

    Ok(url)
}

/// Validates crawl options before the run constructs anything
///
/// The politeness delay must be finite and between zero and
/// [`MAX_DELAY_SECONDS`]. Filter patterns are not checked here; they are
/// compiled (and thereby validated) once when the link filter is built.
pub fn validate(options: &CrawlOptions) -> Result<(), ConfigError> {
    if options.max_pages == 0 {
        return Err(ConfigError::ZeroPageBudget);
    }

    if !options.delay_seconds.is_finite()
        || options.delay_seconds < 0.0
        || options.delay_seconds > MAX_DELAY_SECONDS
    {
        return Err(ConfigError::InvalidDelay(options.delay_seconds));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https_seeds() {
        assert!(validate_seed("http://example.com/").is_ok());
        assert!(validate_seed("https://example.com/start?page=1").is_ok());
    }

    #[test]
    fn test_rejects_malformed_seed() {
        let err = validate_seed("://nope").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSeed { .. }));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = validate_seed("ftp://example.com/files").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(scheme) if scheme == "ftp"));
    }

    #[test]
    fn test_rejects_relative_seed() {
        assert!(validate_seed("/just/a/path").is_err());
    }

    #[test]
    fn test_rejects_zero_page_budget() {
        let options = CrawlOptions {
            max_pages: 0,
            ..CrawlOptions::default()
        };
        assert!(matches!(
            validate(&options),
            Err(ConfigError::ZeroPageBudget)
        ));
    }

    #[test]
    fn test_rejects_negative_delay() {
        let options = CrawlOptions {
            delay_seconds: -0.5,
            ..CrawlOptions::default()
        };
        assert!(matches!(
            validate(&options),
            Err(ConfigError::InvalidDelay(_))
        ));
    }

    #[test]
    fn test_accepts_default_options() {
        assert!(validate(&CrawlOptions::default()).is_ok());
    }

    #[test]
    fn test_accepts_zero_delay() {
        let options = CrawlOptions {
            delay_seconds: 0.0,
            ..CrawlOptions::default()
        };
        assert!(validate(&options).is_ok());
    }

    #[test]
    fn test_accepts_the_maximum_delay() {
        let options = CrawlOptions {
            delay_seconds: MAX_DELAY_SECONDS,
            ..CrawlOptions::default()
        };
        assert!(validate(&options).is_ok());
    }

    #[test]
    fn test_rejects_excessive_delay() {
        // 1e20 is finite but overflows Duration::from_secs_f64.
        let options = CrawlOptions {
            delay_seconds: 1.0e20,
            ..CrawlOptions::default()
        };
        assert!(matches!(
            validate(&options),
            Err(ConfigError::InvalidDelay(_))
        ));
    }
}
