use std::collections::{BTreeSet, HashSet, VecDeque};

use harvest_logging::{harvest_debug, harvest_error, harvest_info};
use url::Url;

use crate::decode::{decode_page, DecodeError};
use crate::extract::extract_page_links;
use crate::fetch::Fetcher;
use crate::types::{FetchError, PageLinks};

/// Why one listing page contributed nothing to the walk.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("page url did not parse: {0}")]
    InvalidUrl(String),
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Fetch one listing page and return its document links and next pointer.
pub async fn fetch_page_links(
    fetcher: &dyn Fetcher,
    url: &str,
) -> Result<PageLinks, PageError> {
    let base = Url::parse(url).map_err(|err| PageError::InvalidUrl(err.to_string()))?;
    let page = fetcher.fetch_page(url).await?;
    let decoded = decode_page(&page.bytes, page.content_type.as_deref())?;
    Ok(extract_page_links(&decoded.html, &base))
}

/// What a completed walk over the pagination chain produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WalkOutcome {
    /// Every unique document URL discovered, ordered lexicographically.
    pub file_urls: BTreeSet<String>,
    pub pages_visited: usize,
    pub failed_pages: usize,
}

/// Walks "next" links from a start page, pooling every document URL seen.
///
/// Pages are processed first-in-first-out in discovery order; a visited
/// set keeps cyclic pagination finite and `max_pages` caps the walk even
/// when the chain never cycles.
pub struct FrontierWalker<'a> {
    fetcher: &'a dyn Fetcher,
    follow_pagination: bool,
    max_pages: usize,
}

impl<'a> FrontierWalker<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, follow_pagination: bool, max_pages: usize) -> Self {
        Self {
            fetcher,
            follow_pagination,
            max_pages,
        }
    }

    /// A page that fails to fetch or parse is logged and skipped; it
    /// contributes no links and no next pointer.
    pub async fn walk(&self, start_url: &str) -> WalkOutcome {
        let mut queue = VecDeque::from([start_url.to_string()]);
        let mut visited: HashSet<String> = HashSet::new();
        let mut outcome = WalkOutcome::default();

        while outcome.pages_visited < self.max_pages {
            let Some(url) = queue.pop_front() else {
                break;
            };
            if !visited.insert(url.clone()) {
                continue;
            }
            outcome.pages_visited += 1;

            harvest_debug!("fetching listing page {url}");
            match fetch_page_links(self.fetcher, &url).await {
                Ok(links) => {
                    harvest_info!(
                        "found {} file links on {url}, next page: {:?}",
                        links.files.len(),
                        links.next_page
                    );
                    outcome.file_urls.extend(links.files);
                    if self.follow_pagination {
                        if let Some(next) = links.next_page {
                            if !visited.contains(&next) {
                                queue.push_back(next);
                            }
                        }
                    }
                }
                Err(err) => {
                    outcome.failed_pages += 1;
                    harvest_error!("failed to fetch page {url}: {err}");
                }
            }
        }

        outcome
    }
}
