//! Couture CLI
//!
//! Command-line interface for Couture - page metadata and SEO tooling.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use couture_core::{Config, PageMetadata, SeoError};

mod commands;
mod metadata;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "couture")]
#[command(about = "Couture - page metadata and SEO tooling for the Couture Metaverse storefront")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set the page title and canonical link of an HTML file
    Title {
        /// HTML file to update
        file: PathBuf,
        /// New page title
        title: String,
        /// Write to this file instead of updating in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the description, Open Graph and Twitter card tags
    Og {
        /// HTML file to update
        file: PathBuf,
        #[command(flatten)]
        page: PageArgs,
        /// Write to this file instead of updating in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Set the title and all Open Graph tags in one pass
    Page {
        /// HTML file to update
        file: PathBuf,
        #[command(flatten)]
        page: PageArgs,
        /// Write to this file instead of updating in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Inject the configured site-wide metas and scripts
    Inject {
        /// HTML file to update (usually the bundled index.html)
        file: PathBuf,
        /// Write to this file instead of updating in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate sitemap.xml
    Sitemap {
        /// Output file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the credited libraries
    Credits,
    /// Report the SEO metadata of a page
    Inspect {
        /// HTML file or http(s) URL
        target: String,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Args, Clone)]
struct PageArgs {
    /// Content of <meta name="description">
    #[arg(long)]
    meta_description: String,
    /// Page title (og:title, twitter:title)
    #[arg(short = 'T', long)]
    title: String,
    /// Social description (og:description, twitter:description)
    #[arg(short, long)]
    description: String,
    /// Preview image URL (og:image, twitter:image)
    #[arg(short, long)]
    image: String,
    /// Page URL (og:url)
    #[arg(short, long)]
    url: String,
}

impl From<PageArgs> for PageMetadata {
    fn from(args: PageArgs) -> Self {
        PageMetadata {
            title: args.title,
            meta_description: args.meta_description,
            description: args.description,
            image_url: args.image,
            url: args.url,
        }
    }
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (log_level, canonical_url, site_name, og_type, twitter_card, sitemap_base, sitemap_lastmod)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands manage the file themselves
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())?;
    init_logging(&config);

    let result = run(cli.command, &config, &output).await;

    if let Err(ref e) = result {
        if let Some(hint) = e
            .downcast_ref::<SeoError>()
            .and_then(|seo| seo.recovery_suggestion())
        {
            if !output.is_quiet() {
                eprintln!("hint: {}", hint);
            }
        }
    }

    result
}

async fn run(command: Commands, config: &Config, output: &Output) -> Result<()> {
    debug!(canonical = %config.site.canonical_url, "Configuration loaded");

    match command {
        Commands::Title {
            file,
            title,
            output: out,
        } => commands::head::title(config, &file, &title, out.as_deref(), output),
        Commands::Og {
            file,
            page,
            output: out,
        } => commands::head::open_graph(config, &file, &page.into(), out.as_deref(), output),
        Commands::Page {
            file,
            page,
            output: out,
        } => commands::head::page(config, &file, &page.into(), out.as_deref(), output),
        Commands::Inject { file, output: out } => {
            commands::inject::inject(config, &file, out.as_deref(), output)
        }
        Commands::Sitemap { output: out } => {
            commands::sitemap::generate(config, out.as_deref(), output)
        }
        Commands::Credits => commands::credits::list(output),
        Commands::Inspect { target } => commands::inspect::inspect(&target, output).await,
        Commands::Config { .. } => unreachable!(), // Handled in main
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Initialize stderr logging
///
/// RUST_LOG wins over the configured level.
fn init_logging(config: &Config) {
    let log_level = config.log_level();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "couture_core={},couture_cli={}",
            log_level, log_level
        ))
    });

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
