//! Sitemap generation
//!
//! Renders `sitemap.xml` in the sitemaps.org 0.9 format from a base URL and
//! a list of route entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

use crate::error::{SeoError, SeoResult};
use crate::synchronizer::SITE_ROOT;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// How often a page is expected to change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeFrequency {
    type Err = SeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "always" => Ok(ChangeFrequency::Always),
            "hourly" => Ok(ChangeFrequency::Hourly),
            "daily" => Ok(ChangeFrequency::Daily),
            "weekly" => Ok(ChangeFrequency::Weekly),
            "monthly" => Ok(ChangeFrequency::Monthly),
            "yearly" => Ok(ChangeFrequency::Yearly),
            "never" => Ok(ChangeFrequency::Never),
            _ => Err(SeoError::InvalidChangeFrequency(s.to_string())),
        }
    }
}

/// One route in the sitemap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapEntry {
    pub path: String,
    #[serde(default = "default_priority")]
    pub priority: f32,
    #[serde(default = "default_changefreq")]
    pub changefreq: ChangeFrequency,
}

impl SitemapEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            priority: default_priority(),
            changefreq: default_changefreq(),
        }
    }
}

fn default_priority() -> f32 {
    1.0
}

fn default_changefreq() -> ChangeFrequency {
    ChangeFrequency::Always
}

/// Sitemap settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapConfig {
    /// Base URL every path is joined onto
    #[serde(default = "default_base")]
    pub base: String,

    /// Whether to stamp entries with today's date
    #[serde(default)]
    pub lastmod: bool,

    #[serde(default = "default_paths")]
    pub paths: Vec<SitemapEntry>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            lastmod: false,
            paths: default_paths(),
        }
    }
}

fn default_base() -> String {
    SITE_ROOT.to_string()
}

fn default_paths() -> Vec<SitemapEntry> {
    ["/", "/project2", "/project3", "/about"]
        .into_iter()
        .map(SitemapEntry::new)
        .collect()
}

/// Join a base URL and a route without doubling or dropping the slash
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        format!("{}/", base)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Render the sitemap document
pub fn generate_sitemap(config: &SitemapConfig, lastmod: Option<NaiveDate>) -> SeoResult<String> {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NS));

    for entry in &config.paths {
        if !(0.0..=1.0).contains(&entry.priority) {
            return Err(SeoError::InvalidSitemap {
                path: entry.path.clone(),
                details: format!("priority {} is outside 0.0..=1.0", entry.priority),
            });
        }

        xml.push_str("  <url>\n");
        xml.push_str(&format!(
            "    <loc>{}</loc>\n",
            escape_xml(&join_url(&config.base, &entry.path))
        ));
        if let Some(date) = lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", date.format("%Y-%m-%d")));
        }
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.changefreq));
        xml.push_str(&format!(
            "    <priority>{}</priority>\n",
            format_priority(entry.priority)
        ));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");

    info!(urls = config.paths.len(), "Sitemap generated");
    Ok(xml)
}

/// Shortest form that reads back as the same value, never fewer than one decimal
fn format_priority(priority: f32) -> String {
    let text = priority.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("https://a.com", "/"), "https://a.com/");
        assert_eq!(join_url("https://a.com/", "/about"), "https://a.com/about");
        assert_eq!(join_url("https://a.com", "about"), "https://a.com/about");
    }

    #[test]
    fn test_default_sitemap() {
        let xml = generate_sitemap(&SitemapConfig::default(), None).unwrap();

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(SITEMAP_NS));
        assert_eq!(xml.matches("<url>").count(), 4);
        assert!(xml.contains("<loc>https://couture-metaverse.vercel.app/</loc>"));
        assert!(xml.contains("<loc>https://couture-metaverse.vercel.app/project2</loc>"));
        assert!(xml.contains("<loc>https://couture-metaverse.vercel.app/about</loc>"));
        assert!(xml.contains("<changefreq>always</changefreq>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(!xml.contains("<lastmod>"));
    }

    #[test]
    fn test_lastmod() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let xml = generate_sitemap(&SitemapConfig::default(), Some(date)).unwrap();
        assert_eq!(xml.matches("<lastmod>2025-03-14</lastmod>").count(), 4);
    }

    #[test]
    fn test_invalid_priority() {
        let config = SitemapConfig {
            paths: vec![SitemapEntry {
                path: "/broken".to_string(),
                priority: 1.5,
                changefreq: ChangeFrequency::Daily,
            }],
            ..SitemapConfig::default()
        };

        let err = generate_sitemap(&config, None).unwrap_err();
        assert!(matches!(err, SeoError::InvalidSitemap { .. }));
    }

    #[test]
    fn test_priority_is_not_rounded() {
        let config = SitemapConfig {
            paths: vec![
                SitemapEntry {
                    priority: 0.25,
                    ..SitemapEntry::new("/catalog")
                },
                SitemapEntry {
                    priority: 0.85,
                    ..SitemapEntry::new("/about")
                },
                SitemapEntry {
                    priority: 0.0,
                    ..SitemapEntry::new("/legal")
                },
            ],
            ..SitemapConfig::default()
        };
        let xml = generate_sitemap(&config, None).unwrap();

        assert!(xml.contains("<priority>0.25</priority>"));
        assert!(xml.contains("<priority>0.85</priority>"));
        assert!(xml.contains("<priority>0.0</priority>"));
    }

    #[test]
    fn test_loc_is_escaped() {
        let config = SitemapConfig {
            paths: vec![SitemapEntry::new("/search?q=a&b")],
            ..SitemapConfig::default()
        };
        let xml = generate_sitemap(&config, None).unwrap();
        assert!(xml.contains("/search?q=a&amp;b</loc>"));
    }

    #[test]
    fn test_change_frequency_parse() {
        assert_eq!("Weekly".parse::<ChangeFrequency>().unwrap(), ChangeFrequency::Weekly);
        assert!("sometimes".parse::<ChangeFrequency>().is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let config: SitemapConfig = toml::from_str(
            r#"
            base = "https://shop.example.com"
            [[paths]]
            path = "/catalog"
            priority = 0.5
            changefreq = "weekly"
            [[paths]]
            path = "/"
            "#,
        )
        .unwrap();

        assert_eq!(config.paths.len(), 2);
        assert_eq!(config.paths[0].changefreq, ChangeFrequency::Weekly);
        assert_eq!(config.paths[1].priority, 1.0);
        assert!(!config.lastmod);
    }
}
