//! Link normalization shared by every extractor.

/// Turn an `href` found on the site into an absolute url.
///
/// * `/path` is appended to `origin` (which carries no trailing slash)
/// * `//host/path` inherits the scheme of `origin`
/// * anything else is taken verbatim
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     absolutize("https://www.index.hr", "/sport/nogomet"),
///     "https://www.index.hr/sport/nogomet"
/// );
/// ```
pub fn absolutize(origin: &str, href: &str) -> String {
    let origin = origin.trim_end_matches('/');
    if href.starts_with("//") {
        let scheme = origin.split_once("://").map_or("https", |(scheme, _)| scheme);
        format!("{scheme}:{href}")
    } else if href.starts_with('/') {
        format!("{origin}{href}")
    } else {
        href.to_string()
    }
}
