use url::Url;

/// Normalizes a URL for frontier and visited-set bookkeeping
///
/// The only normalization is stripping the fragment: two URLs that differ
/// only in their fragment address the same resource, so they must map to the
/// same frontier key. Nothing else is touched. Trailing slashes, query
/// parameter order, and path case are all preserved, so `.../page` and
/// `.../page/` are tracked as distinct pages.
///
/// # Examples
///
/// ```
/// use pagesift::url::normalize_url;
/// use url::Url;
///
/// let a = Url::parse("https://example.com/x#intro").unwrap();
/// let b = Url::parse("https://example.com/x#usage").unwrap();
/// assert_eq!(normalize_url(&a), normalize_url(&b));
/// ```
pub fn normalize_url(url: &Url) -> Url {
    let mut normalized = url.clone();
    normalized.set_fragment(None);
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_strips_fragment() {
        let url = normalize_url(&parse("https://example.com/page#section"));
        assert_eq!(url.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_fragment_variants_collapse() {
        let a = normalize_url(&parse("https://a.com/x#frag1"));
        let b = normalize_url(&parse("https://a.com/x#frag2"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_url(&parse("https://example.com/page#x"));
        let twice = normalize_url(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_keeps_query() {
        let url = normalize_url(&parse("https://example.com/page?b=2&a=1#top"));
        assert_eq!(url.as_str(), "https://example.com/page?b=2&a=1");
    }

    #[test]
    fn test_keeps_trailing_slash() {
        let with = normalize_url(&parse("https://example.com/page/"));
        let without = normalize_url(&parse("https://example.com/page"));
        assert_ne!(with, without);
    }

    #[test]
    fn test_keeps_path_case() {
        let url = normalize_url(&parse("https://example.com/Docs/Intro"));
        assert_eq!(url.path(), "/Docs/Intro");
    }

    #[test]
    fn test_untouched_without_fragment() {
        let original = parse("http://example.com:8080/a?x=1");
        assert_eq!(normalize_url(&original), original);
    }
}
