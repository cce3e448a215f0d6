//! Build-time tag injection
//!
//! Adds the site-wide meta tags and analytics scripts to the bundled
//! `index.html`. Metas follow the same remove-then-append rule as the
//! synchronizer and scripts are skipped when already present, so injecting
//! twice is harmless.
//!
//! Meta contents may reference the site identity with `{site_url}`,
//! `{site_name}`, `{og_type}` and `{twitter_card}`. The defaults use these
//! placeholders, so a changed `[site]` section also changes the injected
//! `og:url`, `og:site_name` and image URLs.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::head::{DocumentHead, HeadElement, HeadKey, MetaKey, MetaTag};
use crate::synchronizer::SiteIdentity;

/// A meta entry as written in the config file
///
/// `property` wins when both attributes are given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    pub content: String,
}

impl MetaEntry {
    fn name(name: &str, content: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            property: None,
            content: content.to_string(),
        }
    }

    fn property(property: &str, content: &str) -> Self {
        Self {
            name: None,
            property: Some(property.to_string()),
            content: content.to_string(),
        }
    }

    /// The tag to write, or `None` if the entry has no key
    pub fn to_meta_tag(&self, site: &SiteIdentity) -> Option<MetaTag> {
        let key = match (&self.property, &self.name) {
            (Some(property), _) => MetaKey::property(property.as_str()),
            (None, Some(name)) => MetaKey::name(name.as_str()),
            (None, None) => return None,
        };
        Some(MetaTag::new(key, expand_site(&self.content, site)))
    }
}

/// Substitute the site placeholders in a meta content
pub fn expand_site(content: &str, site: &SiteIdentity) -> String {
    if !content.contains('{') {
        return content.to_string();
    }
    content
        .replace("{site_url}", site.canonical_url.trim_end_matches('/'))
        .replace("{site_name}", &site.site_name)
        .replace("{og_type}", &site.og_type)
        .replace("{twitter_card}", &site.twitter_card)
}

/// Tags added to the bundled page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectConfig {
    #[serde(default = "default_scripts")]
    pub scripts: Vec<String>,

    #[serde(default = "default_metas")]
    pub metas: Vec<MetaEntry>,
}

impl Default for InjectConfig {
    fn default() -> Self {
        Self {
            scripts: default_scripts(),
            metas: default_metas(),
        }
    }
}

fn default_scripts() -> Vec<String> {
    vec![
        "https://www.googletagmanager.com/gtag/js?id=G-R9BM79JPHS".to_string(),
        "/assets/analytics/ganal.js".to_string(),
    ]
}

fn default_metas() -> Vec<MetaEntry> {
    let title = "Couture Metaverse 3D";
    let image = "{site_url}/assets/ogimage/bmp/image_all.jpg";

    vec![
        MetaEntry::name(
            "google-site-verification",
            "Gq9vrXtN91P1JteGFo-xrlLKT0PR8u-4P4xs21oUr8Y",
        ),
        MetaEntry::name("description", title),
        MetaEntry::property("og:title", title),
        MetaEntry::property("twitter:title", title),
        MetaEntry::property(
            "og:description",
            "A unique platform for creating and customizing 3D models!",
        ),
        MetaEntry::property("twitter:description", title),
        MetaEntry::property("og:image", image),
        MetaEntry::property("twitter:image", image),
        MetaEntry::property("og:url", "{site_url}"),
        MetaEntry::property("og:type", "{og_type}"),
        MetaEntry::property("og:site_name", "{site_name}"),
        MetaEntry::property("twitter:card", "{twitter_card}"),
    ]
}

/// What an injection pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InjectReport {
    /// Meta tags written
    pub metas: usize,
    /// Scripts appended
    pub scripts_added: usize,
    /// Scripts already in the head
    pub scripts_present: usize,
}

/// Inject the configured metas and scripts into a head
pub fn inject_tags<H: DocumentHead + ?Sized>(
    head: &mut H,
    config: &InjectConfig,
    site: &SiteIdentity,
) -> InjectReport {
    let mut report = InjectReport::default();

    for entry in &config.metas {
        match entry.to_meta_tag(site) {
            Some(tag) => {
                head.replace_meta(&tag);
                report.metas += 1;
            }
            None => warn!(content = %entry.content, "Skipping meta entry without name or property"),
        }
    }

    for src in &config.scripts {
        if head.count_by_key(&HeadKey::Script(src.clone())) > 0 {
            report.scripts_present += 1;
            continue;
        }
        head.append(HeadElement::script(src));
        report.scripts_added += 1;
    }

    debug!(?report, "Tags injected");
    report
}
