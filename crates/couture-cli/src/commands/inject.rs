//! Inject command handler

use std::path::Path;

use anyhow::Result;

use couture_core::{inject_tags, Config};

use crate::commands::head::{open, save};
use crate::output::Output;

/// Inject the configured site-wide metas and scripts into a page
pub fn inject(config: &Config, file: &Path, out: Option<&Path>, output: &Output) -> Result<()> {
    let mut doc = open(file)?;
    let report = inject_tags(&mut doc, &config.inject, &config.site);

    let target = save(&doc, file, out)?;
    output.print_inject(&target.display().to_string(), &report);
    Ok(())
}
