use anyhow::{bail, Result};
use std::path::Path;
use tracing::info;

use crate::Config;

/// Write a default configuration under `root`.
pub fn run(root: &Path, force: bool) -> Result<()> {
    if Config::is_initialized(root) && !force {
        bail!(
            "codefetch is already configured in {:?} (use --force to overwrite)",
            Config::config_dir(root)
        );
    }

    let config = Config::default();
    config.save(root)?;

    info!("Wrote default configuration to {:?}", Config::config_dir(root));
    println!(
        "✓ Created {} with default configuration",
        Config::config_dir(root).join("config.toml").display()
    );
    println!("\nNext steps:");
    println!("  1. Edit .codefetch/config.toml to adjust ignore patterns and extensions");
    println!("  2. Run 'codefetch symbols' to list functions");
    println!("  3. Run 'codefetch serve' to start the MCP server");

    Ok(())
}
