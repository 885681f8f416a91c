use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use codefetch::cli::{Cli, Commands};
use codefetch::config::Config;
use codefetch::logging::{init_early_logging, init_logging};
use codefetch::service::Codebase;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    let config = match Config::load(&root) {
        Ok(config) => config,
        Err(e) => {
            init_early_logging();
            tracing::error!("Could not load configuration: {:#}", e);
            return Err(e);
        }
    };

    // Held until exit so buffered log lines are flushed
    let _logging_guard = init_logging(&config.logging, &root)?;
    tracing::debug!("Using project root {}", root.display());

    let codebase = Codebase::new(root.clone(), config.indexer);

    match cli.command {
        Commands::Init { force } => {
            codefetch::commands::init::run(&root, force)?;
        }
        Commands::Files { path, json } => {
            codefetch::commands::files::run(&codebase, path.as_deref(), json)?;
        }
        Commands::Symbols { file, json } => {
            codefetch::commands::symbols::run(&codebase, file.as_deref(), json)?;
        }
        Commands::Show {
            file,
            name,
            full,
            json,
        } => {
            codefetch::commands::show::run(&codebase, &file, &name, full, json)
                .with_context(|| format!("Failed to show '{}'", name))?;
        }
        Commands::Serve => {
            codefetch::commands::serve::run(codebase).await?;
        }
    }

    Ok(())
}
