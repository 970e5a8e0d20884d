use harvester_engine::extract_page_links;
use pretty_assertions::assert_eq;
use url::Url;

const PAGE_URL: &str = "https://www.viwanda.go.tz/documents/product-prices-domestic";

fn extract(html: &str) -> harvester_engine::PageLinks {
    extract_page_links(html, &Url::parse(PAGE_URL).unwrap())
}

#[test]
fn collects_file_anchors_and_ignores_the_rest() {
    let html = r#"
        <html><body>
          <a href="/documents/files/prices-jan.pdf">January</a>
          <a href="/documents/about">About</a>
          <a href="/documents/files/prices-feb.xlsx">February</a>
          <a href="https://elsewhere.example.org/">elsewhere</a>
          <a href="archive/prices-2024.zip">Archive</a>
        </body></html>
    "#;

    let links = extract(html);
    assert_eq!(
        links.files,
        vec![
            "https://www.viwanda.go.tz/documents/files/prices-jan.pdf",
            "https://www.viwanda.go.tz/documents/files/prices-feb.xlsx",
            "https://www.viwanda.go.tz/documents/archive/prices-2024.zip",
        ]
    );
}

#[test]
fn chrome_hrefs_never_classify_even_with_file_like_text() {
    let html = r##"
        <html><body>
          <a href="">report.pdf</a>
          <a href="#">prices.xlsx</a>
          <a href="javascript:void(0)">data.csv</a>
          <a>orphan.pdf</a>
          <a href="/documents/files/test.pdf">file</a>
        </body></html>
    "##;

    let links = extract(html);
    assert_eq!(
        links.files,
        vec!["https://www.viwanda.go.tz/documents/files/test.pdf"]
    );
}

#[test]
fn repeated_urls_are_kept_once_in_document_order() {
    let html = r#"
        <html><body>
          <a href="/files/b.pdf">b</a>
          <a href="/files/a.pdf">a</a>
          <a href="/files/b.pdf">b again</a>
        </body></html>
    "#;

    let links = extract(html);
    assert_eq!(
        links.files,
        vec![
            "https://www.viwanda.go.tz/files/b.pdf",
            "https://www.viwanda.go.tz/files/a.pdf",
        ]
    );
}

#[test]
fn rel_next_link_element_wins() {
    let html = r#"
        <html><head>
          <link rel="next" href="?page=2">
        </head><body>
          <a href="?page=9">next chapter</a>
        </body></html>
    "#;

    let links = extract(html);
    assert_eq!(links.next_page, Some(format!("{PAGE_URL}?page=2")));
}

#[test]
fn rel_next_anchor_is_found_among_other_rel_values() {
    let html = r#"
        <html><body>
          <a rel="nofollow external" href="/out">out</a>
          <a rel="NEXT" href="?page=2">more</a>
        </body></html>
    "#;

    let links = extract(html);
    assert_eq!(links.next_page, Some(format!("{PAGE_URL}?page=2")));
}

#[test]
fn anchor_text_containing_next_is_the_second_choice() {
    let html = r#"
        <html><body>
          <a href="/files/a.pdf">a</a>
          <a href="?page=2">Next page</a>
        </body></html>
    "#;

    let links = extract(html);
    assert_eq!(links.next_page, Some(format!("{PAGE_URL}?page=2")));
}

#[test]
fn class_token_containing_next_is_the_last_choice() {
    let html = r#"
        <html><body>
          <a href="/files/a.pdf">a</a>
          <a class="pagination-next" href="?page=2">&raquo;</a>
        </body></html>
    "#;

    let links = extract(html);
    assert_eq!(links.next_page, Some(format!("{PAGE_URL}?page=2")));
}

#[test]
fn multi_token_class_lists_and_absent_classes_are_handled() {
    let html = r#"
        <html><body>
          <a href="/documents/files/test1.pdf">file1</a>
          <a>no attributes at all</a>
          <a href="?page=2" class="page next">&#187;</a>
        </body></html>
    "#;

    let links = extract(html);
    assert_eq!(
        links.files,
        vec!["https://www.viwanda.go.tz/documents/files/test1.pdf"]
    );
    assert_eq!(links.next_page, Some(format!("{PAGE_URL}?page=2")));
}

#[test]
fn matched_candidate_without_href_yields_no_next_page() {
    // The text heuristic matches the first anchor; there is no falling
    // through to the class heuristic once an element has matched.
    let html = r#"
        <html><body>
          <a>Next</a>
          <a class="next" href="?page=2">&#187;</a>
        </body></html>
    "#;

    let links = extract(html);
    assert_eq!(links.next_page, None);
}

#[test]
fn javascript_next_href_yields_no_next_page() {
    let html = r#"<html><body><a href="javascript:page(2)">next</a></body></html>"#;

    let links = extract(html);
    assert_eq!(links.next_page, None);
}

#[test]
fn page_without_next_markers_has_no_next_page() {
    let html = r#"<html><body><a href="/files/a.pdf">a</a></body></html>"#;

    let links = extract(html);
    assert_eq!(links.next_page, None);
}
