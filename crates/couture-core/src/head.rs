//! Document head model
//!
//! The synchronizer never touches a DOM directly. It goes through the
//! [`DocumentHead`] capability trait, which any head representation can
//! implement: the in-memory [`MemoryHead`] here, or the head of a parsed
//! HTML file (see [`crate::html`]).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Elements rendered without a closing tag
const VOID_ELEMENTS: &[&str] = &["base", "link", "meta"];

/// Elements whose content is raw text and never escaped
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// The identifying attribute of a meta tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaKey {
    /// `<meta name="...">`, e.g. `description`
    Name(String),
    /// `<meta property="...">`, e.g. `og:title`
    Property(String),
}

impl MetaKey {
    pub fn name(key: impl Into<String>) -> Self {
        MetaKey::Name(key.into())
    }

    pub fn property(key: impl Into<String>) -> Self {
        MetaKey::Property(key.into())
    }

    /// Attribute that carries the key
    pub fn attribute(&self) -> &'static str {
        match self {
            MetaKey::Name(_) => "name",
            MetaKey::Property(_) => "property",
        }
    }

    /// The key value itself
    pub fn value(&self) -> &str {
        match self {
            MetaKey::Name(v) | MetaKey::Property(v) => v,
        }
    }
}

impl fmt::Display for MetaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=\"{}\"", self.attribute(), self.value())
    }
}

/// What a head lookup matches
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HeadKey {
    /// The `<title>` element
    Title,
    /// `<link rel="canonical">`
    Canonical,
    /// Any element carrying the given `name`/`property` attribute
    Meta(MetaKey),
    /// `<script src="...">`
    Script(String),
}

/// A meta tag to be written: identifying key plus content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTag {
    pub key: MetaKey,
    pub content: String,
}

impl MetaTag {
    pub fn new(key: MetaKey, content: impl Into<String>) -> Self {
        Self {
            key,
            content: content.into(),
        }
    }
}

/// One child element of a document head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadElement {
    /// Lowercase tag name
    pub tag: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Inner HTML, as it appears in the document
    pub inner: Option<String>,
}

impl HeadElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            inner: None,
        }
    }

    /// `<title>text</title>`
    pub fn title(text: &str) -> Self {
        let mut element = Self::new("title");
        element.set_text(text);
        element
    }

    /// `<link rel="canonical" href="...">`
    pub fn canonical(href: &str) -> Self {
        let mut element = Self::new("link");
        element.set_attr("rel", "canonical");
        element.set_attr("href", href);
        element
    }

    /// `<meta name|property="..." content="...">`
    pub fn meta(tag: &MetaTag) -> Self {
        let mut element = Self::new("meta");
        element.set_attr(tag.key.attribute(), tag.key.value());
        element.set_attr("content", &tag.content);
        element
    }

    /// `<script src="..."></script>`
    pub fn script(src: &str) -> Self {
        let mut element = Self::new("script");
        element.set_attr("src", src);
        element
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, overwriting an existing value in place
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    /// Replace the text content
    pub fn set_text(&mut self, text: &str) {
        self.inner = if self.is_raw_text() {
            Some(text.to_string())
        } else {
            Some(escape_text(text))
        };
    }

    /// Text content, with entities decoded
    pub fn text(&self) -> String {
        match &self.inner {
            Some(inner) if self.is_raw_text() => inner.clone(),
            Some(inner) => unescape(inner),
            None => String::new(),
        }
    }

    /// Whether this element is identified by the given key
    pub fn matches(&self, key: &HeadKey) -> bool {
        match key {
            HeadKey::Title => self.tag == "title",
            HeadKey::Canonical => self.tag == "link" && self.attr("rel") == Some("canonical"),
            HeadKey::Meta(meta) => self.attr(meta.attribute()) == Some(meta.value()),
            HeadKey::Script(src) => self.tag == "script" && self.attr("src") == Some(src.as_str()),
        }
    }

    /// Render the element as HTML
    pub fn to_html(&self) -> String {
        let mut out = format!("<{}", self.tag);
        for (name, value) in &self.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return out;
        }

        if let Some(ref inner) = self.inner {
            out.push_str(inner);
        }
        out.push_str(&format!("</{}>", self.tag));
        out
    }

    fn is_raw_text(&self) -> bool {
        RAW_TEXT_ELEMENTS.contains(&self.tag.as_str())
    }
}

/// Narrow capability interface over a document head
///
/// Implementors only need lookup, mutable access, append and remove; the
/// higher-level writes are provided on top of those.
pub trait DocumentHead {
    /// Positions of all elements matching `key`, in document order
    fn find_by_key(&self, key: &HeadKey) -> Vec<usize>;

    /// Mutable access to the element at `index`
    fn element_mut(&mut self, index: usize) -> Option<&mut HeadElement>;

    /// Append an element at the end of the head
    fn append(&mut self, element: HeadElement);

    /// Remove and return the element at `index`
    fn remove(&mut self, index: usize) -> Option<HeadElement>;

    /// Remove every element matching `key`, returning how many were removed
    fn remove_by_key(&mut self, key: &HeadKey) -> usize {
        let mut removed = 0;
        // Back to front so earlier positions stay valid
        for index in self.find_by_key(key).into_iter().rev() {
            if self.remove(index).is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Remove all elements with the tag's key, then append a fresh one
    fn replace_meta(&mut self, tag: &MetaTag) {
        self.remove_by_key(&HeadKey::Meta(tag.key.clone()));
        self.append(HeadElement::meta(tag));
    }

    /// Number of elements matching `key`
    fn count_by_key(&self, key: &HeadKey) -> usize {
        self.find_by_key(key).len()
    }
}

/// In-memory document head
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHead {
    elements: Vec<HeadElement>,
}

impl MemoryHead {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_elements(elements: Vec<HeadElement>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[HeadElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// First element matching `key`
    pub fn first(&self, key: &HeadKey) -> Option<&HeadElement> {
        self.elements.iter().find(|el| el.matches(key))
    }

    /// Render the head's children, one element per line
    pub fn to_html(&self, indent: &str) -> String {
        self.elements
            .iter()
            .map(|el| format!("{}{}\n", indent, el.to_html()))
            .collect()
    }
}

impl DocumentHead for MemoryHead {
    fn find_by_key(&self, key: &HeadKey) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.matches(key))
            .map(|(i, _)| i)
            .collect()
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut HeadElement> {
        self.elements.get_mut(index)
    }

    fn append(&mut self, element: HeadElement) {
        self.elements.push(element);
    }

    fn remove(&mut self, index: usize) -> Option<HeadElement> {
        if index < self.elements.len() {
            Some(self.elements.remove(index))
        } else {
            None
        }
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}

fn unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_key_attribute() {
        assert_eq!(MetaKey::name("description").attribute(), "name");
        assert_eq!(MetaKey::property("og:title").attribute(), "property");
        assert_eq!(MetaKey::property("og:title").value(), "og:title");
        assert_eq!(
            MetaKey::property("og:url").to_string(),
            "property=\"og:url\""
        );
    }

    #[test]
    fn test_element_rendering() {
        assert_eq!(HeadElement::title("Home").to_html(), "<title>Home</title>");
        assert_eq!(
            HeadElement::canonical("https://example.com").to_html(),
            "<link rel=\"canonical\" href=\"https://example.com\">"
        );
        let tag = MetaTag::new(MetaKey::property("og:title"), "A \"quoted\" & title");
        assert_eq!(
            HeadElement::meta(&tag).to_html(),
            "<meta property=\"og:title\" content=\"A &quot;quoted&quot; &amp; title\">"
        );
        assert_eq!(
            HeadElement::script("/assets/analytics/ganal.js").to_html(),
            "<script src=\"/assets/analytics/ganal.js\"></script>"
        );
    }

    #[test]
    fn test_title_text_escaping() {
        let title = HeadElement::title("Tom & Jerry <3");
        assert_eq!(title.to_html(), "<title>Tom &amp; Jerry &lt;3</title>");
        assert_eq!(title.text(), "Tom & Jerry <3");
    }

    #[test]
    fn test_set_attr_overwrites_in_place() {
        let mut link = HeadElement::canonical("https://old.example.com");
        link.set_attr("href", "https://new.example.com");
        assert_eq!(link.attributes.len(), 2);
        assert_eq!(link.attr("href"), Some("https://new.example.com"));
    }

    #[test]
    fn test_meta_matching_uses_present_key_only() {
        let description = HeadElement::meta(&MetaTag::new(MetaKey::name("description"), "d"));
        let og_title = HeadElement::meta(&MetaTag::new(MetaKey::property("og:title"), "t"));

        assert!(description.matches(&HeadKey::Meta(MetaKey::name("description"))));
        assert!(!description.matches(&HeadKey::Meta(MetaKey::property("description"))));
        assert!(!og_title.matches(&HeadKey::Meta(MetaKey::name("og:title"))));
        assert!(!og_title.matches(&HeadKey::Meta(MetaKey::name("undefined"))));
    }

    #[test]
    fn test_canonical_matching() {
        let mut stylesheet = HeadElement::new("link");
        stylesheet.set_attr("rel", "stylesheet");
        assert!(!stylesheet.matches(&HeadKey::Canonical));
        assert!(HeadElement::canonical("https://x").matches(&HeadKey::Canonical));
    }

    #[test]
    fn test_remove_by_key() {
        let tag = MetaTag::new(MetaKey::property("og:image"), "a.jpg");
        let mut head = MemoryHead::from_elements(vec![
            HeadElement::meta(&tag),
            HeadElement::title("T"),
            HeadElement::meta(&tag),
        ]);

        assert_eq!(head.remove_by_key(&HeadKey::Meta(tag.key.clone())), 2);
        assert_eq!(head.len(), 1);
        assert_eq!(head.elements()[0].tag, "title");
    }

    #[test]
    fn test_replace_meta_appends_single_element() {
        let mut head = MemoryHead::new();
        head.replace_meta(&MetaTag::new(MetaKey::name("description"), "first"));
        head.replace_meta(&MetaTag::new(MetaKey::name("description"), "second"));

        let key = HeadKey::Meta(MetaKey::name("description"));
        assert_eq!(head.count_by_key(&key), 1);
        assert_eq!(head.first(&key).and_then(|el| el.attr("content")), Some("second"));
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut head = MemoryHead::new();
        assert!(head.remove(3).is_none());
    }
}
