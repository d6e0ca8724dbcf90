use url::Url;

/// Checks if a host matches an allow-list pattern
///
/// A pattern admits the host itself and every subdomain of it:
/// - "example.com" matches "example.com"
/// - "example.com" matches "blog.example.com" and "api.v2.example.com"
/// - "example.com" does NOT match "myexample.com"
///
/// Both sides compare case-insensitively. A leading `*.` on the pattern is
/// accepted and means the same thing as the bare pattern.
///
/// # Examples
///
/// ```
/// use haze_search::url::host_matches;
///
/// assert!(host_matches("example.com", "example.com"));
/// assert!(host_matches("example.com", "blog.example.com"));
/// assert!(!host_matches("example.com", "evilexample.com"));
/// ```
pub fn host_matches(pattern: &str, host: &str) -> bool {
    let pattern = pattern.strip_prefix("*.").unwrap_or(pattern);
    if pattern.is_empty() || host.is_empty() {
        return false;
    }

    let pattern = pattern.to_ascii_lowercase();
    let host = host.to_ascii_lowercase();

    host == pattern
        || host
            .strip_suffix(pattern.as_str())
            .is_some_and(|rest| rest.ends_with('.'))
}

/// Decides whether a URL falls inside the allow-list
///
/// An empty allow-list admits every URL. A URL without a host is rejected.
pub fn host_allowed(url: &Url, allow_hosts: &[String]) -> bool {
    if allow_hosts.is_empty() {
        return true;
    }

    match url.host_str() {
        Some(host) => allow_hosts.iter().any(|pattern| host_matches(pattern, host)),
        None => false,
    }
}

/// String form of [`host_allowed`]; a URL that fails to parse is rejected
///
/// # Examples
///
/// ```
/// use haze_search::url::is_host_allowed;
///
/// let allow = vec!["b.c".to_string()];
/// assert!(is_host_allowed("https://a.b.c/", &allow));
/// assert!(!is_host_allowed("https://evilb.c/", &allow));
/// assert!(is_host_allowed("https://anything.org/", &[]));
/// ```
pub fn is_host_allowed(url: &str, allow_hosts: &[String]) -> bool {
    if allow_hosts.is_empty() {
        return true;
    }

    match Url::parse(url) {
        Ok(parsed) => host_allowed(&parsed, allow_hosts),
        Err(_) => false,
    }
}
