use anyhow::Result;
use std::path::Path;

use crate::service::Codebase;

/// Print one symbol. Exits with an error when the symbol is not indexed.
pub fn run(codebase: &Codebase, file: &Path, name: &str, full: bool, json: bool) -> Result<()> {
    let content = codebase.require_symbol_content(file, name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&content)?);
    } else if full {
        println!("{}", content.full);
    } else {
        println!("{}", content.minimal);
    }

    Ok(())
}
