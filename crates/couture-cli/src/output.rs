//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use couture_core::{InjectReport, LibraryManifestEntry, PageReport};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print the credits list
    pub fn print_credits(&self, entries: &[LibraryManifestEntry]) {
        match self.format {
            OutputFormat::Human => {
                for entry in entries {
                    let version = if entry.is_versionless() {
                        "-"
                    } else {
                        entry.version
                    };
                    println!(
                        "{:>2} | {:<22} | {:<7} | {}",
                        entry.id,
                        truncate(entry.title, 22),
                        version,
                        entry.url
                    );
                }
                println!("\n{} librar{}", entries.len(), plural_y(entries.len()));
            }
            OutputFormat::Json => print_json(&entries),
            OutputFormat::Quiet => {
                for entry in entries {
                    println!("{}", entry.title);
                }
            }
        }
    }

    /// Print a page metadata report
    pub fn print_report(&self, target: &str, report: &PageReport) {
        match self.format {
            OutputFormat::Human => {
                println!("Page:      {}", target);
                println!("Title:     {}", report.title().unwrap_or("(missing)"));
                println!(
                    "Canonical: {}",
                    report
                        .canonical
                        .first()
                        .map(|s| s.as_str())
                        .unwrap_or("(missing)")
                );
                println!();
                for tag in &report.tags {
                    let content = match tag.contents.as_slice() {
                        [] => "(missing)".to_string(),
                        [single] => truncate(single, 60),
                        many => format!("{} duplicates", many.len()),
                    };
                    println!("{:<22} {}", tag.key.value(), content);
                }
                println!();
                if report.is_consistent() {
                    println!("✓ Metadata is consistent");
                } else {
                    println!(
                        "⚠ {} missing, {} duplicated",
                        report.missing().count(),
                        report.duplicated().count()
                    );
                }
            }
            OutputFormat::Json => print_json(report),
            OutputFormat::Quiet => {
                println!("{}", if report.is_consistent() { "ok" } else { "inconsistent" });
            }
        }
    }

    /// Print the result of a tag injection
    pub fn print_inject(&self, target: &str, report: &InjectReport) {
        match self.format {
            OutputFormat::Human => {
                println!(
                    "✓ Injected {} meta tag(s) and {} script(s) into {}",
                    report.metas,
                    report.scripts_added,
                    target
                );
                if report.scripts_present > 0 {
                    println!("  {} script(s) already present", report.scripts_present);
                }
            }
            OutputFormat::Json => print_json(report),
            OutputFormat::Quiet => {}
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize output: {}", e),
    }
}

fn plural_y(count: usize) -> &'static str {
    if count == 1 {
        "y"
    } else {
        "ies"
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        // Counts characters, not bytes
        assert_eq!(truncate("Метавселенная", 8), "Метав...");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural_y(1), "y");
        assert_eq!(plural_y(19), "ies");
    }
}
