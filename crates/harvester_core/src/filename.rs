use url::Url;

/// Derive a destination filename from a document URL.
///
/// Uses the last non-empty path segment when the URL has one; otherwise
/// falls back to the whole URL so the name stays unambiguous. Either way
/// the result is sanitized for the filesystem.
pub fn filename_from_url(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()));
    match segment {
        Some(name) => sanitize(name),
        None => sanitize(url.as_str()),
    }
}

fn sanitize(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    if cleaned.trim_matches('_').is_empty() {
        "download".to_string()
    } else {
        cleaned
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
