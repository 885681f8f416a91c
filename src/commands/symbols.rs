use anyhow::{Context, Result};
use std::path::Path;

use crate::service::{Codebase, FileSymbols};

/// Print the function-like symbols of every source file, or of one file.
pub fn run(codebase: &Codebase, file: Option<&Path>, json: bool) -> Result<()> {
    let files = codebase
        .list_symbols(file)
        .context("Failed to extract symbols")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&files)?);
        return Ok(());
    }

    if files.iter().all(|f| f.symbols.is_empty()) {
        println!("No functions found.");
        return Ok(());
    }

    for entry in files.iter().filter(|f| !f.symbols.is_empty()) {
        println!("{}", format_file(entry));
    }

    Ok(())
}

fn format_file(entry: &FileSymbols) -> String {
    let mut out = entry.file_name.clone();
    for symbol in &entry.symbols {
        let name = match &symbol.parent {
            Some(parent) => format!("{}.{}", parent, symbol.name),
            None => symbol.name.clone(),
        };
        out.push_str(&format!(
            "\n  {:<32} {:<8} {}..{}",
            name, symbol.kind, symbol.start_offset, symbol.end_offset
        ));
    }
    out
}
