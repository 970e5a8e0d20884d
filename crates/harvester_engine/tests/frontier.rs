use std::collections::HashMap;

use harvester_engine::{
    ChunkSink, FailureKind, FetchError, FetchedPage, Fetcher, FrontierWalker,
};

/// Serves canned HTML per URL; any other URL 404s.
#[derive(Default)]
struct PageFetcher {
    pages: HashMap<String, String>,
}

impl PageFetcher {
    fn with(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

#[async_trait::async_trait]
impl Fetcher for PageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.pages
            .get(url)
            .map(|html| FetchedPage {
                bytes: html.clone().into_bytes(),
                content_type: Some("text/html; charset=utf-8".to_string()),
            })
            .ok_or_else(|| FetchError::new(FailureKind::HttpStatus(404), "not found"))
    }

    async fn fetch_file(
        &self,
        _url: &str,
        _sink: &mut dyn ChunkSink,
    ) -> Result<u64, FetchError> {
        Err(FetchError::new(FailureKind::Network, "stub serves pages only"))
    }
}

const PAGE_1: &str = "https://host.example.org/documents/listing";
const PAGE_2: &str = "https://host.example.org/documents/listing?page=2";

fn two_page_site() -> PageFetcher {
    PageFetcher::default()
        .with(
            PAGE_1,
            r#"<html><body>
                <a href="/documents/files/fileA.pdf">file A</a>
                <a href="?page=2">Next</a>
            </body></html>"#,
        )
        .with(
            PAGE_2,
            r#"<html><body>
                <a href="/documents/files/fileA.pdf">file A</a>
                <a href="/documents/files/fileB.xlsx">file B</a>
            </body></html>"#,
        )
}

#[tokio::test]
async fn walk_unions_file_links_across_the_pagination_chain() {
    let fetcher = two_page_site();
    let walker = FrontierWalker::new(&fetcher, true, 50);

    let outcome = walker.walk(PAGE_1).await;

    assert_eq!(outcome.pages_visited, 2);
    assert_eq!(outcome.failed_pages, 0);
    let urls: Vec<&str> = outcome.file_urls.iter().map(String::as_str).collect();
    assert_eq!(
        urls,
        vec![
            "https://host.example.org/documents/files/fileA.pdf",
            "https://host.example.org/documents/files/fileB.xlsx",
        ]
    );
}

#[tokio::test]
async fn cyclic_pagination_terminates() {
    let fetcher = PageFetcher::default()
        .with(
            PAGE_1,
            r#"<html><body>
                <a href="/documents/files/fileA.pdf">file A</a>
                <a href="?page=2">Next</a>
            </body></html>"#,
        )
        .with(
            PAGE_2,
            // Points back at the start page.
            r#"<html><body><a href="/documents/listing">Next</a></body></html>"#,
        );
    let walker = FrontierWalker::new(&fetcher, true, 50);

    let outcome = walker.walk(PAGE_1).await;

    assert_eq!(outcome.pages_visited, 2);
}

#[tokio::test]
async fn max_pages_one_stops_after_the_start_page() {
    let fetcher = two_page_site();
    let walker = FrontierWalker::new(&fetcher, true, 1);

    let outcome = walker.walk(PAGE_1).await;

    assert_eq!(outcome.pages_visited, 1);
    assert_eq!(outcome.file_urls.len(), 1);
}

#[tokio::test]
async fn pagination_following_can_be_disabled() {
    let fetcher = two_page_site();
    let walker = FrontierWalker::new(&fetcher, false, 50);

    let outcome = walker.walk(PAGE_1).await;

    assert_eq!(outcome.pages_visited, 1);
    assert_eq!(outcome.file_urls.len(), 1);
}

#[tokio::test]
async fn failing_page_is_skipped_and_the_walk_continues() {
    // Page 2 is advertised but missing from the stub, so it 404s.
    let fetcher = PageFetcher::default().with(
        PAGE_1,
        r#"<html><body>
            <a href="/documents/files/fileA.pdf">file A</a>
            <a href="?page=2">Next</a>
        </body></html>"#,
    );
    let walker = FrontierWalker::new(&fetcher, true, 50);

    let outcome = walker.walk(PAGE_1).await;

    assert_eq!(outcome.pages_visited, 2);
    assert_eq!(outcome.failed_pages, 1);
    assert_eq!(outcome.file_urls.len(), 1);
}

#[tokio::test]
async fn unparseable_start_url_counts_as_a_failed_page() {
    let fetcher = PageFetcher::default();
    let walker = FrontierWalker::new(&fetcher, true, 50);

    let outcome = walker.walk("not a url").await;

    assert_eq!(outcome.pages_visited, 1);
    assert_eq!(outcome.failed_pages, 1);
    assert!(outcome.file_urls.is_empty());
}
