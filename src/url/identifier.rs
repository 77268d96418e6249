use url::Url;

/// Derives the storage key for a detail URL: its last non-empty path segment
///
/// Query strings and fragments are never part of the key. The result is a
/// single path segment, so it can be used directly as a file name.
///
/// # Returns
///
/// * `Some(String)` - The identifier
/// * `None` - The URL has no usable path segment
///
/// A bare host such as `https://example.com/` is rejected rather than keyed by
/// its host name: it is not a detail page, and every such row would collide
/// on the same file. Callers count it as a failed item without fetching.
///
/// # Examples
///
/// ```
/// use home_harvest::url::extract_id;
///
/// let id = extract_id("https://www.redfin.com/CA/San-Jose/123-Main-St-95112/home/1234567");
/// assert_eq!(id.as_deref(), Some("1234567"));
/// ```
pub fn extract_id(url: &str) -> Option<String> {
    let segment = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string),
        // Listing rows occasionally carry site-relative paths
        Err(_) => {
            let path = url.split(['?', '#']).next().unwrap_or_default();
            path.split('/')
                .filter(|s| !s.is_empty())
                .last()
                .map(str::to_string)
        }
    }?;

    if is_safe_file_name(&segment) {
        Some(segment)
    } else {
        None
    }
}

fn is_safe_file_name(segment: &str) -> bool {
    segment != "." && segment != ".." && !segment.contains(['\\', '\0'])
}
