//! Inspect command handler

use anyhow::Result;

use couture_core::inspect_html;

use crate::metadata::load_page;
use crate::output::Output;

/// Report the SEO metadata of a page
pub async fn inspect(target: &str, output: &Output) -> Result<()> {
    let html = load_page(target).await?;
    let report = inspect_html(&html);

    output.print_report(target, &report);
    Ok(())
}
