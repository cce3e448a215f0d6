//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values (the storefront's own site settings)
//! 2. Config file (~/.config/couture/config.toml)
//! 3. Environment variables (COUTURE_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::inject::InjectConfig;
use crate::sitemap::SitemapConfig;
use crate::synchronizer::SiteIdentity;

/// Environment variable prefix
const ENV_PREFIX: &str = "COUTURE";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Log level for couture crates (error, warn, info, debug, trace)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Canonical URL and fixed Open Graph values
    #[serde(default)]
    pub site: SiteIdentity,

    /// Sitemap routes
    #[serde(default)]
    pub sitemap: SitemapConfig,

    /// Build-time metas and scripts
    #[serde(default)]
    pub inject: InjectConfig,
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (COUTURE_BASE_URL, COUTURE_SITE_NAME, COUTURE_LOG_LEVEL)
    /// 2. Config file (~/.config/couture/config.toml or COUTURE_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_path(p),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // COUTURE_BASE_URL moves the canonical link and the sitemap together
        if let Ok(val) = std::env::var(format!("{}_BASE_URL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.site.canonical_url = val.clone();
                self.sitemap.base = val;
            }
        }

        // COUTURE_SITE_NAME
        if let Ok(val) = std::env::var(format!("{}_SITE_NAME", ENV_PREFIX)) {
            if !val.is_empty() {
                self.site.site_name = val;
            }
        }

        // COUTURE_LOG_LEVEL
        if let Ok(val) = std::env::var(format!("{}_LOG_LEVEL", ENV_PREFIX)) {
            self.log_level = if val.is_empty() { None } else { Some(val) };
        }
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with COUTURE_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("couture")
            .join("config.toml")
    }

    /// Effective log level, defaulting to warn
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("warn")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synchronizer::SITE_ROOT;
    use std::env;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            // Clear all the vars
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "COUTURE_BASE_URL",
        "COUTURE_SITE_NAME",
        "COUTURE_LOG_LEVEL",
        "COUTURE_CONFIG",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.site.canonical_url, SITE_ROOT);
        assert_eq!(config.site.og_type, "website");
        assert_eq!(config.sitemap.paths.len(), 4);
        assert_eq!(config.inject.scripts.len(), 2);
        assert_eq!(config.log_level(), "warn");
    }

    #[test]
    fn test_env_override_base_url() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("COUTURE_BASE_URL", "http://localhost:8080");
        config.apply_env_overrides();

        assert_eq!(config.site.canonical_url, "http://localhost:8080");
        assert_eq!(config.sitemap.base, "http://localhost:8080");
        // Site name is independent
        assert_eq!(config.site.site_name, SITE_ROOT);
    }

    #[test]
    fn test_env_override_log_level() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("COUTURE_LOG_LEVEL", "debug");
        config.apply_env_overrides();
        assert_eq!(config.log_level(), "debug");

        // Empty string clears it
        env::set_var("COUTURE_LOG_LEVEL", "");
        config.apply_env_overrides();
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            log_level = "info"

            [site]
            canonical_url = "https://shop.example.com"

            [sitemap]
            base = "https://shop.example.com"
            lastmod = true
            paths = [{ path = "/" }]
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.site.canonical_url, "https://shop.example.com");
        // Unset site fields keep their defaults
        assert_eq!(config.site.twitter_card, "summary_large_image");
        assert!(config.sitemap.lastmod);
        assert_eq!(config.sitemap.paths.len(), 1);
        assert_eq!(config.inject, InjectConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.site.site_name = "Couture".to_string();
        config.save_to_path(&path).unwrap();

        let reloaded = Config::load_from_path(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_file_path_override() {
        let _guard = EnvGuard::new(ENV_VARS);

        env::set_var("COUTURE_CONFIG", "/tmp/couture-test.toml");
        assert_eq!(
            Config::config_file_path(),
            PathBuf::from("/tmp/couture-test.toml")
        );
    }
}
