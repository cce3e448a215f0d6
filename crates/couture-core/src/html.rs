//! HTML documents
//!
//! Loads an HTML file, exposes its `<head>` children through
//! [`DocumentHead`], and writes the document back with only the head
//! rewritten. Everything outside the head is kept byte for byte.
//!
//! The head ends where the HTML parser ends it: at `</head>`, or earlier
//! when the parser closes it implicitly (a body-only element or stray text
//! inside the head, or a document that leaves out `</head>`). Source from
//! that point on is never rewritten.

use scraper::{ElementRef, Html, Selector};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{SeoError, SeoResult};
use crate::head::{DocumentHead, HeadElement, HeadKey, MemoryHead};

/// Indentation used for rewritten head children
const INDENT: &str = "    ";

/// Elements whose content the scanner skips without looking for tags
const OPAQUE_ELEMENTS: &[&str] = &[
    "script", "style", "title", "textarea", "xmp", "iframe", "noembed", "noframes", "noscript",
    "template",
];

/// An HTML document whose head can be synchronized
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    source: String,
    /// Byte offset just past the `<head ...>` open tag
    head_start: usize,
    /// Byte offset where the parsed head ends in the source
    head_end: usize,
    head: MemoryHead,
}

impl HtmlDocument {
    /// Parse a document from source
    ///
    /// Fails with `EnvironmentUnavailable` if there is no `<head>` element.
    pub fn parse(source: impl Into<String>) -> SeoResult<Self> {
        let source = source.into();
        // ASCII lowercasing keeps byte offsets identical
        let lower = source.to_ascii_lowercase();
        let head_start = locate_head_start(&lower)?;

        let document = Html::parse_document(&source);
        let mut elements = parse_head(&document);
        let (head_end, matched) = head_extent(&lower, head_start, &head_tag_sequence(&document));

        // The parser also moves head-only tags found after `</head>` into the
        // head; those stay where they are in the source.
        if matched < elements.len() {
            warn!(
                moved = elements.len() - matched,
                "Ignoring head elements that appear after </head>"
            );
            elements.truncate(matched);
        }
        let head = MemoryHead::from_elements(elements);

        debug!(elements = head.len(), head_start, head_end, "Parsed document head");

        Ok(Self {
            source,
            head_start,
            head_end,
            head,
        })
    }

    /// Read and parse a document from disk
    pub fn from_path(path: &Path) -> SeoResult<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| SeoError::from_read(e, path.to_path_buf()))?;
        Self::parse(source)
    }

    /// The parsed head
    pub fn head(&self) -> &MemoryHead {
        &self.head
    }

    /// Render the full document with the current head
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.source.len() + 512);
        out.push_str(&self.source[..self.head_start]);
        out.push('\n');
        out.push_str(&self.head.to_html(INDENT));
        out.push_str(&self.source[self.head_end..]);
        out
    }

    /// Write the rendered document to disk
    pub fn write_to(&self, path: &Path) -> SeoResult<()> {
        std::fs::write(path, self.render())
            .map_err(|e| SeoError::from_write(e, path.to_path_buf()))?;
        debug!(path = %path.display(), "Document written");
        Ok(())
    }
}

impl DocumentHead for HtmlDocument {
    fn find_by_key(&self, key: &HeadKey) -> Vec<usize> {
        self.head.find_by_key(key)
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut HeadElement> {
        self.head.element_mut(index)
    }

    fn append(&mut self, element: HeadElement) {
        self.head.append(element);
    }

    fn remove(&mut self, index: usize) -> Option<HeadElement> {
        self.head.remove(index)
    }
}

/// Byte offset just past the `<head ...>` open tag
fn locate_head_start(lower: &str) -> SeoResult<usize> {
    let open = find_open_tag(lower, "head").ok_or_else(|| SeoError::EnvironmentUnavailable {
        details: "no <head> element".to_string(),
    })?;
    lower[open..]
        .find('>')
        .map(|i| open + i + 1)
        .ok_or_else(|| SeoError::EnvironmentUnavailable {
            details: "unterminated <head> tag".to_string(),
        })
}

/// Position of `<tag` followed by whitespace or `>`, skipping e.g. `<header`
fn find_open_tag(lower: &str, tag: &str) -> Option<usize> {
    let needle = format!("<{}", tag);
    let mut from = 0;
    while let Some(i) = lower[from..].find(&needle) {
        let at = from + i;
        let next = lower[at + needle.len()..].chars().next();
        if matches!(next, Some(c) if c == '>' || c == '/' || c.is_ascii_whitespace()) {
            return Some(at);
        }
        from = at + needle.len();
    }
    None
}

/// Where the parsed head ends in the source
///
/// Walks the start tags after `<head>` alongside the tags the parser kept in
/// the head. The head ends at `</head>`, at the first start tag or text the
/// parser did not keep, or at the end of the document. Also returns how many
/// of the expected tags were found before that point.
fn head_extent(lower: &str, head_start: usize, expected: &[String]) -> (usize, usize) {
    let bytes = lower.as_bytes();
    let mut i = head_start;
    let mut next = 0;

    while i < bytes.len() {
        let rest = &lower[i..];
        if rest.starts_with("</head") {
            return (i, next);
        }
        if rest.starts_with("<!--") {
            i = rest.find("-->").map(|e| i + e + 3).unwrap_or(bytes.len());
            continue;
        }

        match (bytes[i], bytes.get(i + 1)) {
            (b'<', Some(c)) if c.is_ascii_alphabetic() => {
                let name = tag_name(&rest[1..]);
                if expected.get(next).map(String::as_str) != Some(name) {
                    warn!(tag = name, "Head closed early by the parser; later content is left as is");
                    return (i, next);
                }
                next += 1;
                i = skip_tag(lower, i);
                if OPAQUE_ELEMENTS.contains(&name) {
                    let close = format!("</{}", name);
                    i = lower[i..].find(&close).map(|e| i + e).unwrap_or(bytes.len());
                }
            }
            (b'<', Some(b'/' | b'!' | b'?')) => i = skip_tag(lower, i),
            (c, _) if c.is_ascii_whitespace() => i += 1,
            _ => {
                warn!("Text inside the head closes it; later content is left as is");
                return (i, next);
            }
        }
    }

    (bytes.len(), next)
}

/// Tag name at the start of `s` (just after the `<`)
fn tag_name(s: &str) -> &str {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == ':'))
        .unwrap_or(s.len());
    &s[..end]
}

/// Offset just past the `>` closing the tag that starts at `from`
fn skip_tag(lower: &str, from: usize) -> usize {
    let mut quote: Option<u8> = None;
    for (offset, &b) in lower.as_bytes()[from + 1..].iter().enumerate() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return from + 1 + offset + 1,
            None => {}
        }
    }
    lower.len()
}

/// Names of the elements the parser placed in the head, in document order
///
/// Content of opaque elements is skipped by the scanner, so it is left out
/// here too.
fn head_tag_sequence(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("head *") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|el| !inside_opaque(el))
        .map(|el| el.value().name().to_string())
        .collect()
}

fn inside_opaque(el: &ElementRef<'_>) -> bool {
    el.ancestors()
        .filter_map(|node| node.value().as_element())
        .take_while(|ancestor| ancestor.name() != "head")
        .any(|ancestor| OPAQUE_ELEMENTS.contains(&ancestor.name()))
}

/// Extract the head's child elements
fn parse_head(document: &Html) -> Vec<HeadElement> {
    let mut elements = Vec::new();

    if let Ok(selector) = Selector::parse("head > *") {
        for el in document.select(&selector) {
            let value = el.value();
            let mut element = HeadElement::new(value.name());
            element.attributes = value
                .attrs()
                .map(|(name, val)| (name.to_string(), val.to_string()))
                .collect();
            let inner = el.inner_html();
            if !inner.is_empty() {
                element.inner = Some(inner);
            }
            elements.push(element);
        }
    }

    elements
}
