use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use codefetch::config::IndexerConfig;
use codefetch::Codebase;

pub struct TestHarness {
    pub temp_dir: TempDir,
    pub config: IndexerConfig,
}

impl TestHarness {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
            config: IndexerConfig::default(),
        })
    }

    pub fn create_test_file(&self, path: &str, content: &str) -> Result<PathBuf> {
        let file_path = self.temp_dir.path().join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&file_path, content)?;
        Ok(file_path)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn codebase(&self) -> Codebase {
        Codebase::new(self.path(), self.config.clone())
    }

    /// Root-relative names of every listed file
    pub fn listed_files(&self) -> Result<Vec<String>> {
        let codebase = self.codebase();
        Ok(codebase
            .list_files(None)?
            .iter()
            .map(|f| codebase.display_path(f))
            .collect())
    }
}
