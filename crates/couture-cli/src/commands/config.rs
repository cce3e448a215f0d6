//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use couture_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Quiet => {
            println!("{}", config.site.canonical_url);
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  log_level:       {}", config.log_level());
            println!("  canonical_url:   {}", config.site.canonical_url);
            println!("  site_name:       {}", config.site.site_name);
            println!("  og_type:         {}", config.site.og_type);
            println!("  twitter_card:    {}", config.site.twitter_card);
            println!("  sitemap_base:    {}", config.sitemap.base);
            println!("  sitemap_lastmod: {}", config.sitemap.lastmod);
            println!(
                "  sitemap paths:   {}",
                config
                    .sitemap
                    .paths
                    .iter()
                    .map(|p| p.path.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!("  inject metas:    {}", config.inject.metas.len());
            println!("  inject scripts:  {}", config.inject.scripts.len());
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "log_level" => {
            config.log_level = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.to_string())
            };
        }
        "canonical_url" => config.site.canonical_url = value.to_string(),
        "site_name" => config.site.site_name = value.to_string(),
        "og_type" => config.site.og_type = value.to_string(),
        "twitter_card" => config.site.twitter_card = value.to_string(),
        "sitemap_base" => config.sitemap.base = value.to_string(),
        "sitemap_lastmod" => {
            config.sitemap.lastmod = value
                .parse()
                .context("Invalid value for sitemap_lastmod. Use 'true' or 'false'.")?;
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: log_level, canonical_url, site_name, og_type, twitter_card, sitemap_base, sitemap_lastmod",
                key
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();
        apply(&mut config, "site_name", "Couture").unwrap();
        apply(&mut config, "sitemap_lastmod", "true").unwrap();
        apply(&mut config, "log_level", "none").unwrap();

        assert_eq!(config.site.site_name, "Couture");
        assert!(config.sitemap.lastmod);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_apply_rejects_unknown_key() {
        let mut config = Config::default();
        let err = apply(&mut config, "favicon", "x").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
    }

    #[test]
    fn test_apply_rejects_bad_bool() {
        let mut config = Config::default();
        assert!(apply(&mut config, "sitemap_lastmod", "sometimes").is_err());
    }

    #[test]
    fn test_set_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        set(
            "og_type".to_string(),
            "product".to_string(),
            Some(&path),
            &Output::new(OutputFormat::Quiet),
        )
        .unwrap();

        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.contains("og_type = \"product\""));
    }
}
