//! Credits command handler

use anyhow::Result;

use couture_core::LibraryManifest;

use crate::output::Output;

/// List the credited libraries
pub fn list(output: &Output) -> Result<()> {
    output.print_credits(LibraryManifest::get_all());
    Ok(())
}
