use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes an absolute URL string into its canonical crawl form
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Require an `http` or `https` scheme
/// 3. Require a host
/// 4. Remove fragment (everything after #)
///
/// Scheme and host case, default ports and an empty path are canonicalized by
/// the parser itself. Nothing else is rewritten, so two URLs that name
/// different resources never collapse into one.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse or the URL cannot be crawled
///
/// # Examples
///
/// ```
/// use haze_search::url::normalize_url;
///
/// let url = normalize_url("HTTP://Example.COM/page#section").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/page");
/// ```
pub fn normalize_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim())?;
    canonicalize(url)
}

/// Resolves a possibly-relative href against a base URL and normalizes it
///
/// Resolution follows the standard rules: relative paths, dot segments,
/// absolute paths and protocol-relative (`//host/path`) links all resolve the
/// way a browser would resolve them.
///
/// # Arguments
///
/// * `href` - The raw link target as found in markup
/// * `base` - The URL of the page the link was found on
///
/// # Examples
///
/// ```
/// use haze_search::url::resolve_url;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/intro").unwrap();
/// let url = resolve_url("../about#team", &base).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/about");
/// ```
pub fn resolve_url(href: &str, base: &Url) -> UrlResult<Url> {
    let url = base.join(href.trim())?;
    canonicalize(url)
}

fn canonicalize(mut url: Url) -> UrlResult<Url> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::UnsupportedScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url)
}
