use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, trace};

use super::rules::RuleSet;
use crate::config::IndexerConfig;
use crate::error::{Error, Result};

/// Walks a directory tree, honouring layered exclusion rules.
///
/// Entries are visited in file-name order and excluded directories are
/// pruned without being read. Errors are propagated, never skipped.
pub struct Walker {
    root: PathBuf,
    rule_file: String,
    extra_patterns: Vec<String>,
}

impl Walker {
    /// Create a new Walker with the given root directory and configuration
    pub fn new(root: impl Into<PathBuf>, config: &IndexerConfig) -> Self {
        Self {
            root: root.into(),
            rule_file: config.ignore_file.clone(),
            extra_patterns: config.ignore_patterns.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect every eligible file under the root, root-joined.
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        self.walk(None)
    }

    /// Collect eligible files reachable under `sub_path`.
    ///
    /// `sub_path` is relative to the root (or absolute inside it). Rule
    /// files at the root and along the way still apply. An excluded sub
    /// path yields an empty list.
    pub fn collect_files_under(&self, sub_path: &Path) -> Result<Vec<PathBuf>> {
        let target = self.resolve_inside_root(sub_path)?;
        fs::symlink_metadata(&target).map_err(|e| Error::from_io(&target, e))?;
        self.walk(Some(&target))
    }

    fn walk(&self, target: Option<&Path>) -> Result<Vec<PathBuf>> {
        let metadata = fs::metadata(&self.root).map_err(|e| Error::from_io(&self.root, e))?;
        if !metadata.is_dir() {
            return Err(Error::InvalidPath {
                path: self.root.clone(),
                reason: "not a directory".to_string(),
            });
        }

        let rules = RuleSet::for_root(&self.root, &self.rule_file, &self.extra_patterns)?;
        let mut files = Vec::new();
        self.walk_dir(&self.root, &rules, target, &mut files)?;

        debug!(
            "Collected {} file(s) under {}",
            files.len(),
            target.unwrap_or(&self.root).display()
        );
        Ok(files)
    }

    fn walk_dir(
        &self,
        dir: &Path,
        rules: &RuleSet,
        target: Option<&Path>,
        files: &mut Vec<PathBuf>,
    ) -> Result<()> {
        for entry in sorted_entries(dir, fs::read_dir(dir))? {
            let path = entry.path();

            // Only follow the branch leading to (or inside) the target
            if let Some(target) = target {
                if !(target.starts_with(&path) || path.starts_with(target)) {
                    continue;
                }
            }

            let Some(kind) = entry_kind(&entry, &path)? else {
                continue;
            };
            let is_dir = kind == EntryKind::Dir;

            if rules.is_excluded(&path, is_dir) {
                trace!("Excluded {}", self.relative(&path).display());
                continue;
            }

            match kind {
                EntryKind::Dir => {
                    let nested = rules.enter(&path)?;
                    self.walk_dir(&path, &nested, target, files)?;
                }
                EntryKind::File => files.push(path),
            }
        }

        Ok(())
    }

    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    fn resolve_inside_root(&self, sub_path: &Path) -> Result<PathBuf> {
        let relative = if sub_path.is_absolute() {
            sub_path
                .strip_prefix(&self.root)
                .map_err(|_| Error::InvalidPath {
                    path: sub_path.to_path_buf(),
                    reason: "outside the root directory".to_string(),
                })?
        } else {
            sub_path
        };

        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
        {
            return Err(Error::InvalidPath {
                path: sub_path.to_path_buf(),
                reason: "must not leave the root directory".to_string(),
            });
        }

        Ok(self.root.join(relative))
    }
}

/// Drain a directory listing in file-name order, attributing any failure
/// to `dir`.
fn sorted_entries(dir: &Path, listing: io::Result<fs::ReadDir>) -> Result<Vec<fs::DirEntry>> {
    let mut entries = listing
        .and_then(|iter| iter.collect::<io::Result<Vec<_>>>())
        .map_err(|e| Error::from_io(dir, e))?;
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File,
    Dir,
}

/// Classify a directory entry. Symlinks are resolved to decide whether
/// they point at a file; linked directories are not followed and dangling
/// links are skipped.
fn entry_kind(entry: &fs::DirEntry, path: &Path) -> Result<Option<EntryKind>> {
    let file_type = entry.file_type().map_err(|e| Error::from_io(path, e))?;

    if file_type.is_dir() {
        return Ok(Some(EntryKind::Dir));
    }
    if file_type.is_file() {
        return Ok(Some(EntryKind::File));
    }
    if file_type.is_symlink() {
        return match fs::metadata(path) {
            Ok(meta) if meta.is_file() => Ok(Some(EntryKind::File)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Skipping dangling symlink {}", path.display());
                Ok(None)
            }
            Err(e) => Err(Error::from_io(path, e)),
        };
    }
    Ok(None)
}
