//! Sitemap command handler

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use couture_core::{generate_sitemap, Config};

use crate::output::Output;

/// Generate sitemap.xml, to a file or stdout
pub fn generate(config: &Config, out: Option<&Path>, output: &Output) -> Result<()> {
    let lastmod = config.sitemap.lastmod.then(|| Utc::now().date_naive());
    let xml = generate_sitemap(&config.sitemap, lastmod)?;

    match out {
        Some(path) => {
            std::fs::write(path, &xml)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            output.success(&format!(
                "Sitemap with {} URL(s) written to {}",
                config.sitemap.paths.len(),
                path.display()
            ));
        }
        None => print!("{}", xml),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use tempfile::TempDir;

    #[test]
    fn test_generate_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sitemap.xml");

        let mut config = Config::default();
        config.sitemap.lastmod = true;
        generate(&config, Some(&path), &Output::new(OutputFormat::Quiet)).unwrap();

        let xml = std::fs::read_to_string(&path).unwrap();
        assert_eq!(xml.matches("<url>").count(), 4);
        assert_eq!(xml.matches("<lastmod>").count(), 4);
    }
}
