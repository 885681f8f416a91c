//! The three operations exposed to callers: list files, list symbols, and
//! fetch one symbol's content.
//!
//! Every call re-reads the tree and re-parses files. Nothing is cached.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::IndexerConfig;
use crate::error::{Error, Result};
use crate::extractor::{
    extract_function_by_name, extract_symbols, parse_source, FunctionContent, ParsedSource,
    SymbolRecord,
};
use crate::indexer::Walker;

/// Symbols found in one file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSymbols {
    /// Root-relative, `/`-separated
    pub file_name: String,
    pub symbols: Vec<SymbolRecord>,
}

/// One symbol's text with its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolContent {
    pub file_name: String,
    pub name: String,
    pub minimal: String,
    pub full: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// A source tree rooted at a directory, with the rules used to index it.
#[derive(Debug, Clone)]
pub struct Codebase {
    root: PathBuf,
    config: IndexerConfig,
}

impl Codebase {
    pub fn new(root: impl Into<PathBuf>, config: IndexerConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Root-joined paths of every non-excluded file, optionally restricted
    /// to `sub_path`.
    pub fn list_files(&self, sub_path: Option<&Path>) -> Result<Vec<PathBuf>> {
        let walker = Walker::new(&self.root, &self.config);
        match sub_path {
            Some(sub_path) => walker.collect_files_under(sub_path),
            None => walker.collect_files(),
        }
    }

    /// Symbols of every eligible source file, or of exactly `file_filter`.
    ///
    /// The filter must name a file; a directory is [`Error::InvalidPath`].
    /// An excluded file yields an empty list. A syntax error fails the whole
    /// call unless `skip_unparsable` is set and no filter is given.
    pub fn list_symbols(&self, file_filter: Option<&Path>) -> Result<Vec<FileSymbols>> {
        if let Some(file) = file_filter {
            self.ensure_file(file)?;
        }
        let files = self.list_files(file_filter)?;
        let skip_unparsable = self.config.skip_unparsable && file_filter.is_none();
        let mut results = Vec::new();

        for path in files
            .into_iter()
            .filter(|path| self.config.is_source_file(path))
        {
            let parsed = match read_and_parse(&path) {
                Ok(parsed) => parsed,
                Err(err @ Error::Syntax { .. }) if skip_unparsable => {
                    warn!("Skipping unparsable file: {}", err);
                    continue;
                }
                Err(err) => return Err(err),
            };

            results.push(FileSymbols {
                file_name: self.display_path(&path),
                symbols: extract_symbols(&parsed),
            });
        }

        debug!(
            "Extracted {} symbol(s) from {} file(s)",
            results.iter().map(|f| f.symbols.len()).sum::<usize>(),
            results.len()
        );
        Ok(results)
    }

    /// Content of the first top-level symbol called `name` in `file`.
    ///
    /// `file` is resolved against the root unless absolute. Returns
    /// `Ok(None)` when the file parses but has no such symbol.
    pub fn get_symbol_content(&self, file: &Path, name: &str) -> Result<Option<SymbolContent>> {
        let path = self.resolve(file);
        let Some(mut content) = get_symbol_content(&path, name)? else {
            return Ok(None);
        };
        content.file_name = self.display_path(&path);
        Ok(Some(content))
    }

    /// Like [`Codebase::get_symbol_content`], but absence is an
    /// [`Error::NotIndexed`].
    pub fn require_symbol_content(&self, file: &Path, name: &str) -> Result<SymbolContent> {
        self.get_symbol_content(file, name)?
            .ok_or_else(|| Error::NotIndexed {
                file: file.to_path_buf(),
                name: name.to_string(),
            })
    }

    /// Root-relative, `/`-separated form of `path` for presentation.
    pub fn display_path(&self, path: &Path) -> String {
        normalize_path(path.strip_prefix(&self.root).unwrap_or(path))
    }

    fn ensure_file(&self, file: &Path) -> Result<()> {
        let path = self.resolve(file);
        // Paths leaving the root are rejected by the walk itself
        if !path.starts_with(&self.root) || file.components().any(|c| c == Component::ParentDir) {
            return Ok(());
        }
        let metadata = fs::symlink_metadata(&path).map_err(|e| Error::from_io(&path, e))?;
        if metadata.is_dir() {
            return Err(Error::InvalidPath {
                path: file.to_path_buf(),
                reason: "not a file".to_string(),
            });
        }
        Ok(())
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.root.join(file)
        }
    }
}

/// Content of the first top-level symbol called `name` in the file at
/// `path`. `file_name` in the result is the path as given.
pub fn get_symbol_content(path: &Path, name: &str) -> Result<Option<SymbolContent>> {
    let parsed = read_and_parse(path)?;
    let Some(range) = extract_function_by_name(&parsed, name) else {
        debug!("No symbol '{}' in {}", name, path.display());
        return Ok(None);
    };

    let Some(content) = FunctionContent::from_source(parsed.source(), range.clone()) else {
        return Ok(None);
    };

    Ok(Some(SymbolContent {
        file_name: normalize_path(path),
        name: name.to_string(),
        minimal: content.minimal,
        full: content.full,
        start_offset: range.start,
        end_offset: range.end,
    }))
}

fn read_and_parse(path: &Path) -> Result<ParsedSource> {
    let source = fs::read(path).map_err(|e| Error::from_io(path, e))?;
    parse_source(path, source)
}

/// Normalize a path to use '/' as separator
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
