//! Page inspection
//!
//! Reads the SEO metadata of a rendered page and reports, per synchronizer
//! key, what the page carries and whether any key is duplicated or missing.

use scraper::{Html, Selector};
use serde::Serialize;

use crate::head::MetaKey;
use crate::synchronizer::open_graph_keys;

/// Contents found for one meta key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagReport {
    pub key: MetaKey,
    pub contents: Vec<String>,
}

impl TagReport {
    pub fn is_missing(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn is_duplicated(&self) -> bool {
        self.contents.len() > 1
    }
}

/// SEO metadata found on a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageReport {
    /// Text of each `<title>`
    pub titles: Vec<String>,
    /// Target of each `<link rel="canonical">`
    pub canonical: Vec<String>,
    /// One report per synchronizer key, in write order
    pub tags: Vec<TagReport>,
}

impl PageReport {
    /// The first title, trimmed
    pub fn title(&self) -> Option<&str> {
        self.titles.first().map(|s| s.as_str())
    }

    /// True when every key, the title and the canonical link occur exactly once
    pub fn is_consistent(&self) -> bool {
        self.titles.len() == 1
            && self.canonical.len() == 1
            && self.tags.iter().all(|tag| tag.contents.len() == 1)
    }

    pub fn duplicated(&self) -> impl Iterator<Item = &TagReport> {
        self.tags.iter().filter(|tag| tag.is_duplicated())
    }

    pub fn missing(&self) -> impl Iterator<Item = &TagReport> {
        self.tags.iter().filter(|tag| tag.is_missing())
    }
}

/// Inspect an HTML page
pub fn inspect_html(html: &str) -> PageReport {
    let document = Html::parse_document(html);

    let titles = select_all(&document, "head title", |el| {
        Some(el.text().collect::<String>().trim().to_string())
    });
    let canonical = select_all(&document, r#"head link[rel="canonical"]"#, |el| {
        el.value().attr("href").map(|s| s.to_string())
    });

    let tags = open_graph_keys()
        .into_iter()
        .map(|key| {
            let selector = format!(r#"head meta[{}="{}"]"#, key.attribute(), key.value());
            let contents = select_all(&document, &selector, |el| {
                Some(el.value().attr("content").unwrap_or_default().to_string())
            });
            TagReport { key, contents }
        })
        .collect();

    PageReport {
        titles,
        canonical,
        tags,
    }
}

fn select_all<F>(document: &Html, selector: &str, extract: F) -> Vec<String>
where
    F: Fn(scraper::ElementRef<'_>) -> Option<String>,
{
    match Selector::parse(selector) {
        Ok(selector) => document.select(&selector).filter_map(extract).collect(),
        Err(_) => Vec::new(),
    }
}
