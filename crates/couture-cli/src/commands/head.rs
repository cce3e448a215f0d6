//! Head synchronization command handlers

use std::path::Path;

use anyhow::{Context, Result};

use couture_core::{Config, HtmlDocument, PageMetadata, PageMetadataSynchronizer};

use crate::output::Output;

/// Set the page title and canonical link
pub fn title(
    config: &Config,
    file: &Path,
    title: &str,
    out: Option<&Path>,
    output: &Output,
) -> Result<()> {
    let mut doc = open(file)?;
    synchronizer(config).set_page_title(&mut doc, title);

    let target = save(&doc, file, out)?;
    output.success(&format!("Title set to \"{}\" in {}", title, target.display()));
    Ok(())
}

/// Write the description, Open Graph and Twitter card tags
pub fn open_graph(
    config: &Config,
    file: &Path,
    page: &PageMetadata,
    out: Option<&Path>,
    output: &Output,
) -> Result<()> {
    let mut doc = open(file)?;
    synchronizer(config).set_open_graph_tags(
        &mut doc,
        &page.meta_description,
        &page.title,
        &page.description,
        &page.image_url,
        &page.url,
    );

    let target = save(&doc, file, out)?;
    output.success(&format!("Open Graph tags written to {}", target.display()));
    Ok(())
}

/// Set the title and all Open Graph tags
pub fn page(
    config: &Config,
    file: &Path,
    page: &PageMetadata,
    out: Option<&Path>,
    output: &Output,
) -> Result<()> {
    let mut doc = open(file)?;
    synchronizer(config).sync_page(&mut doc, page);

    let target = save(&doc, file, out)?;
    output.success(&format!("Page metadata synchronized in {}", target.display()));
    Ok(())
}

fn synchronizer(config: &Config) -> PageMetadataSynchronizer {
    PageMetadataSynchronizer::new(config.site.clone())
}

pub(crate) fn open(file: &Path) -> Result<HtmlDocument> {
    HtmlDocument::from_path(file).with_context(|| format!("Failed to load {}", file.display()))
}

/// Write the document, in place unless `out` is given
pub(crate) fn save<'a>(doc: &HtmlDocument, file: &'a Path, out: Option<&'a Path>) -> Result<&'a Path> {
    let target = out.unwrap_or(file);
    doc.write_to(target)
        .with_context(|| format!("Failed to save {}", target.display()))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use tempfile::TempDir;

    const INDEX: &str = "<!DOCTYPE html>\n<html>\n<head>\n<title>Old</title>\n</head>\n<body><div id=\"app\"></div></body>\n</html>\n";

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    fn sample_page() -> PageMetadata {
        PageMetadata {
            title: "About".to_string(),
            meta_description: "About Couture".to_string(),
            description: "Who we are".to_string(),
            image_url: "https://couture-metaverse.vercel.app/assets/ogimage/bmp/image_all.jpg"
                .to_string(),
            url: "https://couture-metaverse.vercel.app/about".to_string(),
        }
    }

    #[test]
    fn test_title_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, INDEX).unwrap();

        title(&Config::default(), &path, "Home", None, &quiet()).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("<title>Home</title>"));
        assert!(!html.contains("Old"));
        assert_eq!(html.matches("rel=\"canonical\"").count(), 1);
    }

    #[test]
    fn test_page_to_separate_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        let out = dir.path().join("about.html");
        std::fs::write(&path, INDEX).unwrap();

        page(&Config::default(), &path, &sample_page(), Some(&out), &quiet()).unwrap();

        // Source untouched
        assert_eq!(std::fs::read_to_string(&path).unwrap(), INDEX);

        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains("<title>About</title>"));
        assert_eq!(html.matches("<meta ").count(), 11);
        assert!(html.contains("content=\"https://couture-metaverse.vercel.app/about\""));
    }

    #[test]
    fn test_open_graph_twice_no_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, INDEX).unwrap();

        let config = Config::default();
        open_graph(&config, &path, &sample_page(), None, &quiet()).unwrap();
        open_graph(&config, &path, &sample_page(), None, &quiet()).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert_eq!(html.matches("<meta ").count(), 11);
        assert_eq!(html.matches("property=\"og:title\"").count(), 1);
    }

    #[test]
    fn test_missing_head_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fragment.html");
        std::fs::write(&path, "<div>no head here</div>").unwrap();

        let err = title(&Config::default(), &path, "Home", None, &quiet()).unwrap_err();
        assert!(err.downcast_ref::<couture_core::SeoError>().is_some());
    }
}
