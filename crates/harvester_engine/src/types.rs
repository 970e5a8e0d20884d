use std::fmt;
use std::path::{Path, PathBuf};

/// Links harvested from one listing page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageLinks {
    /// Absolute document URLs, in document order, first occurrence only.
    pub files: Vec<String>,
    /// Absolute URL of the following listing page, when one is advertised.
    pub next_page: Option<String>,
}

/// Raw bytes of a fetched listing page plus its declared content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
    Sink,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Sink => write!(f, "write error while receiving body"),
        }
    }
}

/// How one document URL was settled on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The body was new content, written to this path.
    Saved(PathBuf),
    /// The body matched already-indexed content; nothing new was written.
    Duplicate(PathBuf),
}

impl DownloadOutcome {
    pub fn path(&self) -> &Path {
        match self {
            DownloadOutcome::Saved(path) | DownloadOutcome::Duplicate(path) => path,
        }
    }

    pub fn into_path(self) -> PathBuf {
        match self {
            DownloadOutcome::Saved(path) | DownloadOutcome::Duplicate(path) => path,
        }
    }
}

/// Result of one complete harvest run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HarvestReport {
    /// Paths written or matched this run, in download order.
    pub saved: Vec<PathBuf>,
    /// Listing pages actually processed (capped by `max_pages`).
    pub pages_visited: usize,
    /// Unique document URLs discovered across all pages.
    pub files_discovered: usize,
    /// Downloads resolved to an already-saved file by content hash.
    pub duplicates_skipped: usize,
    /// Listing pages that failed to fetch or parse.
    pub failed_pages: usize,
    /// Document URLs that failed to download.
    pub failed_downloads: usize,
}
