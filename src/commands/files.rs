use anyhow::{Context, Result};
use std::path::Path;

use crate::service::Codebase;

/// Print the files that survive the exclusion rules, root-relative.
pub fn run(codebase: &Codebase, sub_path: Option<&Path>, json: bool) -> Result<()> {
    let files = codebase
        .list_files(sub_path)
        .with_context(|| format!("Failed to list files in {}", codebase.root().display()))?;

    let names: Vec<String> = files.iter().map(|f| codebase.display_path(f)).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        for name in &names {
            println!("{}", name);
        }
    }

    Ok(())
}
