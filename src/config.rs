use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".codefetch";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub indexer: IndexerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// Name of the per-directory exclusion-rule file
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,

    /// Patterns appended after the root rule file (gitignore syntax)
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,

    /// File extensions treated as source files when listing symbols
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Skip files with syntax errors when listing symbols across the tree
    #[serde(default)]
    pub skip_unparsable: bool,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            ignore_file: default_ignore_file(),
            ignore_patterns: default_ignore_patterns(),
            extensions: default_extensions(),
            skip_unparsable: false,
        }
    }
}

impl IndexerConfig {
    /// Whether `path` has one of the configured source extensions.
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }
}

fn default_ignore_file() -> String {
    ".gitignore".to_string()
}

/// Keeps the tool's own config and log files out of listings
fn default_ignore_patterns() -> Vec<String> {
    vec![format!("{}/", CONFIG_DIR)]
}

fn default_extensions() -> Vec<String> {
    vec![
        "ts".to_string(),
        "tsx".to_string(),
        "mts".to_string(),
        "cts".to_string(),
        "js".to_string(),
        "jsx".to_string(),
        "mjs".to_string(),
        "cjs".to_string(),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write logs to rolling files under `directory`
    #[serde(default)]
    pub enabled: bool,

    /// Write logs to stderr
    #[serde(default = "default_true")]
    pub stderr: bool,

    /// Level for the file log
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log directory, relative to the project root unless absolute
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,

    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// hourly, daily, minutely or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stderr: default_true(),
            level: default_log_level(),
            directory: default_log_directory(),
            file_prefix: default_file_prefix(),
            rotation: default_rotation(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "debug".to_string()
}

fn default_log_directory() -> PathBuf {
    PathBuf::from(".codefetch/logs")
}

fn default_file_prefix() -> String {
    "codefetch.log".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Config {
    /// Load configuration from the .codefetch directory
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;

            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {:?}", config_path))
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to the .codefetch directory
    pub fn save(&self, root: &Path) -> Result<()> {
        let config_dir = root.join(CONFIG_DIR);
        let config_path = config_dir.join(CONFIG_FILE);

        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;

        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the .codefetch directory
    pub fn config_dir(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR)
    }

    /// Check if a configuration file exists under the given root
    pub fn is_initialized(root: &Path) -> bool {
        Self::config_dir(root).join(CONFIG_FILE).exists()
    }
}
