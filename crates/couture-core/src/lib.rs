//! Couture Core Library
//!
//! This crate provides the page metadata and SEO tooling behind the Couture
//! Metaverse storefront.
//!
//! # Architecture
//!
//! - **Document heads**: the synchronizer works against the [`DocumentHead`]
//!   trait, so the same code drives an in-memory head in tests and the head
//!   of a real HTML file at build time.
//!
//! # Quick Start
//!
//! ```text
//! let mut doc = HtmlDocument::from_path(Path::new("dist/index.html"))?;
//!
//! let sync = PageMetadataSynchronizer::default();
//! sync.set_page_title(&mut doc, "Home");
//! sync.set_open_graph_tags(&mut doc, "d", "t", "desc", "img.jpg", "https://site/x");
//!
//! doc.write_to(Path::new("dist/index.html"))?;
//! ```
//!
//! # Modules
//!
//! - `head`: head elements, keys and the `DocumentHead` trait
//! - `synchronizer`: title, canonical and Open Graph synchronization
//! - `html`: HTML files as document heads
//! - `manifest`: the credits list
//! - `inject`: build-time meta and script injection
//! - `sitemap`: sitemap.xml generation
//! - `inspect`: metadata reports for rendered pages
//! - `config`: Application configuration

pub mod config;
pub mod error;
pub mod head;
pub mod html;
pub mod inject;
pub mod inspect;
pub mod manifest;
pub mod sitemap;
pub mod synchronizer;

pub use config::Config;
pub use error::{SeoError, SeoResult};
pub use head::{DocumentHead, HeadElement, HeadKey, MemoryHead, MetaKey, MetaTag};
pub use html::HtmlDocument;
pub use inject::{inject_tags, InjectConfig, InjectReport, MetaEntry};
pub use inspect::{inspect_html, PageReport, TagReport};
pub use manifest::{LibraryManifest, LibraryManifestEntry};
pub use sitemap::{generate_sitemap, ChangeFrequency, SitemapConfig, SitemapEntry};
pub use synchronizer::{open_graph_keys, PageMetadata, PageMetadataSynchronizer, SiteIdentity};
