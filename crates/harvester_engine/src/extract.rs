use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use harvester_core::{attr_has_token, attr_has_token_containing, is_file_link, resolve_href};

use crate::types::PageLinks;

/// Pull the document links and the advertised "next page" out of one
/// listing page's markup.
///
/// File links come back absolute, in document order, first occurrence
/// only. The next-page candidate is tried in a fixed order matching the
/// site's observed markup: an explicit `rel="next"`, then anchor text
/// containing "next", then an anchor class containing "next".
pub fn extract_page_links(html: &str, page_url: &Url) -> PageLinks {
    let doc = Html::parse_document(html);

    let mut files = Vec::new();
    let mut seen = HashSet::new();
    if let Ok(anchors) = Selector::parse("a") {
        for anchor in doc.select(&anchors) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let Some(resolved) = resolve_href(href, page_url) else {
                continue;
            };
            if is_file_link(&resolved) {
                let url = String::from(resolved);
                if seen.insert(url.clone()) {
                    files.push(url);
                }
            }
        }
    }

    PageLinks {
        files,
        next_page: find_next_page(&doc, page_url),
    }
}

/// First matching heuristic wins; a match without a usable href means no
/// next page rather than falling through to the weaker heuristics.
fn find_next_page(doc: &Html, page_url: &Url) -> Option<String> {
    let element = find_rel_next(doc)
        .or_else(|| find_text_next(doc))
        .or_else(|| find_class_next(doc))?;
    let href = element.value().attr("href")?;
    resolve_href(href, page_url).map(String::from)
}

fn find_rel_next(doc: &Html) -> Option<ElementRef<'_>> {
    let links = Selector::parse("link").ok()?;
    let anchors = Selector::parse("a").ok()?;
    doc.select(&links)
        .chain(doc.select(&anchors))
        .find(|el| attr_has_token(el.value().attr("rel"), "next"))
}

fn find_text_next(doc: &Html) -> Option<ElementRef<'_>> {
    let anchors = Selector::parse("a").ok()?;
    doc.select(&anchors).find(|el| {
        let text: String = el.text().collect();
        text.to_lowercase().contains("next")
    })
}

fn find_class_next(doc: &Html) -> Option<ElementRef<'_>> {
    let anchors = Selector::parse("a").ok()?;
    doc.select(&anchors)
        .find(|el| attr_has_token_containing(el.value().attr("class"), "next"))
}
