use url::Url;

/// Path suffixes that mark a link as a downloadable document.
pub const FILE_EXTENSIONS: [&str; 8] = [
    ".pdf", ".xls", ".xlsx", ".csv", ".zip", ".doc", ".docx", ".txt",
];

/// True when the URL's path ends in one of the known document extensions.
///
/// Only the path is examined, so query strings and fragments do not
/// disturb the classification.
pub fn is_file_link(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    FILE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Resolve a raw href against the page it appeared on.
///
/// Empty, fragment-only, and `javascript:` hrefs never resolve; they are
/// page chrome, and a relative empty href would otherwise resolve back to
/// the base page itself.
pub fn resolve_href(raw: &str, base: &Url) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    if trimmed.to_ascii_lowercase().starts_with("javascript:") {
        return None;
    }
    base.join(trimmed).ok()
}
