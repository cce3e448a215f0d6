//! Page metadata synchronization
//!
//! Brings a document head in line with a logical page identity: one
//! `<title>`, one canonical link, and one meta element per Open Graph /
//! Twitter card key. Every pass removes stale elements before writing, so
//! running it again with the same input leaves the head unchanged.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::head::{DocumentHead, HeadElement, HeadKey, MetaKey, MetaTag};

/// Root URL of the storefront
pub const SITE_ROOT: &str = "https://couture-metaverse.vercel.app";

/// Default `og:type`
pub const OG_TYPE: &str = "website";

/// Default `twitter:card`
pub const TWITTER_CARD: &str = "summary_large_image";

/// Fixed site-wide values written on every page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteIdentity {
    /// Target of `<link rel="canonical">`
    #[serde(default = "default_site_root")]
    pub canonical_url: String,

    /// `og:site_name` content
    #[serde(default = "default_site_root")]
    pub site_name: String,

    /// `og:type` content
    #[serde(default = "default_og_type")]
    pub og_type: String,

    /// `twitter:card` content
    #[serde(default = "default_twitter_card")]
    pub twitter_card: String,
}

impl Default for SiteIdentity {
    fn default() -> Self {
        Self {
            canonical_url: default_site_root(),
            site_name: default_site_root(),
            og_type: default_og_type(),
            twitter_card: default_twitter_card(),
        }
    }
}

fn default_site_root() -> String {
    SITE_ROOT.to_string()
}

fn default_og_type() -> String {
    OG_TYPE.to_string()
}

fn default_twitter_card() -> String {
    TWITTER_CARD.to_string()
}

/// The per-page values of a synchronization pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub meta_description: String,
    pub description: String,
    pub image_url: String,
    pub url: String,
}

/// Where each tag's content comes from
#[derive(Debug, Clone, Copy)]
enum Slot {
    MetaDescription,
    Title,
    Description,
    Image,
    Url,
    OgType,
    SiteName,
    TwitterCard,
}

#[derive(Debug, Clone, Copy)]
enum KeyKind {
    Name,
    Property,
}

/// The eleven tags, in write order
const TAG_LAYOUT: [(KeyKind, &str, Slot); 11] = [
    (KeyKind::Name, "description", Slot::MetaDescription),
    (KeyKind::Property, "og:title", Slot::Title),
    (KeyKind::Property, "twitter:title", Slot::Title),
    (KeyKind::Property, "og:description", Slot::Description),
    (KeyKind::Property, "twitter:description", Slot::Description),
    (KeyKind::Property, "og:image", Slot::Image),
    (KeyKind::Property, "twitter:image", Slot::Image),
    (KeyKind::Property, "og:url", Slot::Url),
    (KeyKind::Property, "og:type", Slot::OgType),
    (KeyKind::Property, "og:site_name", Slot::SiteName),
    (KeyKind::Property, "twitter:card", Slot::TwitterCard),
];

/// Keys written by [`PageMetadataSynchronizer::set_open_graph_tags`], in order
pub fn open_graph_keys() -> Vec<MetaKey> {
    TAG_LAYOUT
        .iter()
        .map(|(kind, key, _)| match kind {
            KeyKind::Name => MetaKey::name(*key),
            KeyKind::Property => MetaKey::property(*key),
        })
        .collect()
}

/// Synchronizes a document head with a page identity
#[derive(Debug, Clone, Default)]
pub struct PageMetadataSynchronizer {
    site: SiteIdentity,
}

impl PageMetadataSynchronizer {
    pub fn new(site: SiteIdentity) -> Self {
        Self { site }
    }

    pub fn site(&self) -> &SiteIdentity {
        &self.site
    }

    /// Set the page title and pin the canonical link to the site root
    ///
    /// The first existing `<title>` is updated in place (any further ones are
    /// dropped); otherwise a new one is appended. The canonical link is
    /// handled the same way, whatever the title is.
    pub fn set_page_title<H: DocumentHead + ?Sized>(&self, head: &mut H, title: &str) {
        match keep_first(head, &HeadKey::Title) {
            Some(index) => {
                if let Some(element) = head.element_mut(index) {
                    element.set_text(title);
                }
            }
            None => head.append(HeadElement::title(title)),
        }

        let canonical = self.site.canonical_url.as_str();
        match keep_first(head, &HeadKey::Canonical) {
            Some(index) => {
                if let Some(element) = head.element_mut(index) {
                    element.set_attr("href", canonical);
                }
            }
            None => head.append(HeadElement::canonical(canonical)),
        }

        debug!(title, canonical, "Page title synchronized");
    }

    /// Write the description, Open Graph and Twitter card tags
    ///
    /// For each of the eleven tags, every element with the same key is
    /// removed and a fresh one appended. Input is written through as-is.
    pub fn set_open_graph_tags<H: DocumentHead + ?Sized>(
        &self,
        head: &mut H,
        meta_description: &str,
        title: &str,
        description: &str,
        image_url: &str,
        url: &str,
    ) {
        let page = PageMetadata {
            title: title.to_string(),
            meta_description: meta_description.to_string(),
            description: description.to_string(),
            image_url: image_url.to_string(),
            url: url.to_string(),
        };

        for tag in self.meta_tags(&page) {
            head.replace_meta(&tag);
        }

        debug!(url, "Open Graph tags synchronized");
    }

    /// Run both passes for one page
    pub fn sync_page<H: DocumentHead + ?Sized>(&self, head: &mut H, page: &PageMetadata) {
        self.set_page_title(head, &page.title);
        self.set_open_graph_tags(
            head,
            &page.meta_description,
            &page.title,
            &page.description,
            &page.image_url,
            &page.url,
        );
    }

    /// The eleven tags a page would receive, in write order
    pub fn meta_tags(&self, page: &PageMetadata) -> Vec<MetaTag> {
        open_graph_keys()
            .into_iter()
            .zip(TAG_LAYOUT.iter())
            .map(|(key, (_, _, slot))| {
                let content = match slot {
                    Slot::MetaDescription => &page.meta_description,
                    Slot::Title => &page.title,
                    Slot::Description => &page.description,
                    Slot::Image => &page.image_url,
                    Slot::Url => &page.url,
                    Slot::OgType => &self.site.og_type,
                    Slot::SiteName => &self.site.site_name,
                    Slot::TwitterCard => &self.site.twitter_card,
                };
                MetaTag::new(key, content.clone())
            })
            .collect()
    }
}

/// Drop all but the first element matching `key`, returning its position
fn keep_first<H: DocumentHead + ?Sized>(head: &mut H, key: &HeadKey) -> Option<usize> {
    let positions = head.find_by_key(key);
    let first = *positions.first()?;
    for index in positions.into_iter().skip(1).rev() {
        head.remove(index);
    }
    Some(first)
}
