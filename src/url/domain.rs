use url::Url;

/// Extracts the authority (host, plus port when explicit) from a URL
///
/// Same-domain containment compares this value exactly: `blog.example.com`
/// never equals `example.com`, and two servers on the same host but different
/// ports are different sites. `Url::port()` reports `None` for a scheme's
/// default port, so `https://example.com` and `https://example.com:443`
/// produce the same authority.
///
/// # Examples
///
/// ```
/// use pagesift::url::extract_authority;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(extract_authority(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:7001/").unwrap();
/// assert_eq!(extract_authority(&url), Some("127.0.0.1:7001".to_string()));
/// ```
pub fn extract_authority(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authority(s: &str) -> Option<String> {
        extract_authority(&Url::parse(s).unwrap())
    }

    #[test]
    fn test_plain_host() {
        assert_eq!(authority("https://example.com/"), Some("example.com".into()));
    }

    #[test]
    fn test_subdomain_is_distinct() {
        assert_ne!(authority("https://blog.example.com/"), authority("https://example.com/"));
    }

    #[test]
    fn test_explicit_port_is_kept() {
        assert_eq!(
            authority("http://127.0.0.1:7001/page"),
            Some("127.0.0.1:7001".into())
        );
    }

    #[test]
    fn test_different_ports_differ() {
        assert_ne!(authority("http://127.0.0.1:7001/"), authority("http://127.0.0.1:7002/"));
    }

    #[test]
    fn test_default_port_matches_absent_port() {
        assert_eq!(authority("https://example.com:443/"), authority("https://example.com/"));
        assert_eq!(authority("http://example.com:80/"), authority("http://example.com/"));
    }

    #[test]
    fn test_uppercase_host_is_lowered() {
        assert_eq!(authority("https://EXAMPLE.COM/"), Some("example.com".into()));
    }

    #[test]
    fn test_no_host_yields_none() {
        let url = Url::parse("mailto:user@example.com").unwrap();
        assert_eq!(extract_authority(&url), None);
    }
}
