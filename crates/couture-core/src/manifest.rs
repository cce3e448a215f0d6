//! Library manifest
//!
//! The fixed list of third-party components credited on the about screen.

use serde::Serialize;

/// One credited component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LibraryManifestEntry {
    /// Position in the list, unique
    pub id: u32,
    /// Display name
    pub title: &'static str,
    /// Version string, empty when the entry has none
    pub version: &'static str,
    /// Reference link
    pub url: &'static str,
}

impl LibraryManifestEntry {
    const fn new(id: u32, title: &'static str, version: &'static str, url: &'static str) -> Self {
        Self {
            id,
            title,
            version,
            url,
        }
    }

    /// True for standards and services that carry no version
    pub fn is_versionless(&self) -> bool {
        self.version.is_empty()
    }
}

const ENTRIES: [LibraryManifestEntry; 19] = [
    LibraryManifestEntry::new(1, "Three.js", "171", "https://github.com/mrdoob/three.js/releases"),
    LibraryManifestEntry::new(
        2,
        "Orbit controls",
        "82.1.0",
        "https://threejs.org/docs/#examples/en/controls/OrbitControls",
    ),
    LibraryManifestEntry::new(3, "Vue.js", "3.4.38", "https://v3.ru.vuejs.org"),
    LibraryManifestEntry::new(4, "Vue Router", "4.5.0", "https://router.vuejs.org"),
    LibraryManifestEntry::new(5, "VueX", "4.1.0", "https://vuex.vuejs.org"),
    LibraryManifestEntry::new(6, "Webpack", "5.98.0", "https://webpack.js.org"),
    LibraryManifestEntry::new(7, "Vue I18n", "11.1.1", "https://vue-i18n.intlify.dev"),
    LibraryManifestEntry::new(8, "jsPDF", "3.0.0", "https://www.npmjs.com/package/jspdf"),
    LibraryManifestEntry::new(
        9,
        "HTML5",
        "",
        "https://developer.mozilla.org/ru/docs/Learn/HTML/Introduction_to_HTML",
    ),
    LibraryManifestEntry::new(
        10,
        "CSS3",
        "",
        "https://developer.mozilla.org/ru/docs/Learn/CSS/First_steps",
    ),
    LibraryManifestEntry::new(
        11,
        "FlexBox CSS",
        "",
        "https://developer.mozilla.org/ru/docs/Learn/CSS/CSS_layout/Flexbox",
    ),
    LibraryManifestEntry::new(
        12,
        "JavaScript",
        "",
        "https://developer.mozilla.org/ru/docs/Learn/JavaScript",
    ),
    LibraryManifestEntry::new(13, "Markdown", "", "https://www.markdownguide.org"),
    LibraryManifestEntry::new(
        14,
        "Google Search Console",
        "",
        "https://search.google.com/search-console",
    ),
    LibraryManifestEntry::new(15, "Google Analytics", "4.0", "https://analytics.google.com"),
    LibraryManifestEntry::new(16, "Open Graph protocol", "", "https://ogp.me"),
    LibraryManifestEntry::new(
        17,
        "Favicon",
        "",
        "https://developer.mozilla.org/en-US/docs/Glossary/Favicon",
    ),
    LibraryManifestEntry::new(18, "Sitemap", "", "https://www.sitemaps.org"),
    LibraryManifestEntry::new(
        19,
        "Robots.txt",
        "",
        "https://developers.google.com/search/docs/crawling-indexing/robots/intro",
    ),
];

/// Read-only access to the credits list
#[derive(Debug, Clone, Copy, Default)]
pub struct LibraryManifest;

impl LibraryManifest {
    /// All entries, in presentation order
    pub fn get_all() -> &'static [LibraryManifestEntry] {
        &ENTRIES
    }

    /// Look up an entry by id
    pub fn get(id: u32) -> Option<&'static LibraryManifestEntry> {
        ENTRIES.iter().find(|entry| entry.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_manifest_length() {
        assert_eq!(LibraryManifest::get_all().len(), 19);
    }

    #[test]
    fn test_first_entry_is_three_js() {
        let first = &LibraryManifest::get_all()[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.title, "Three.js");
        assert_eq!(first.version, "171");
    }

    #[test]
    fn test_ids_unique_and_positive() {
        let ids: HashSet<u32> = LibraryManifest::get_all().iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 19);
        assert!(!ids.contains(&0));
    }

    #[test]
    fn test_get_by_id() {
        assert_eq!(LibraryManifest::get(19).map(|e| e.title), Some("Robots.txt"));
        assert!(LibraryManifest::get(20).is_none());
    }

    #[test]
    fn test_versionless_entries() {
        assert!(LibraryManifest::get(16).unwrap().is_versionless());
        assert!(!LibraryManifest::get(15).unwrap().is_versionless());
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(LibraryManifest::get(5).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 5,
                "title": "VueX",
                "version": "4.1.0",
                "url": "https://vuex.vuejs.org"
            })
        );
    }
}
