//! Layered gitignore-style exclusion rules.
//!
//! A [`RuleSet`] is an immutable value. Entering a directory that carries
//! its own rule file yields a new set with one more layer; the parent set
//! is untouched, so rules found in one subtree never reach its siblings.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::Match;
use tracing::debug;

use crate::error::{Error, Result};

/// Directories excluded at any depth regardless of rule files.
pub const PERMANENT_EXCLUDES: &[&str] = &[".git", "node_modules"];

/// Exclusion rules in effect for one directory during a traversal.
#[derive(Clone)]
pub struct RuleSet {
    permanent: Arc<Gitignore>,
    /// Outermost first. Each layer is rooted at the directory holding its
    /// rule file.
    layers: Vec<Arc<Gitignore>>,
    rule_file: String,
}

impl RuleSet {
    /// Build the rule set for a traversal root.
    ///
    /// Reads `rule_file` at the root if present, then appends
    /// `extra_patterns` to the same layer so they take precedence over it.
    pub fn for_root(root: &Path, rule_file: &str, extra_patterns: &[String]) -> Result<Self> {
        let mut permanent = GitignoreBuilder::new(root);
        for name in PERMANENT_EXCLUDES {
            add_pattern(&mut permanent, root, name)?;
        }
        let permanent = build(&permanent, root)?;

        let rule_path = root.join(rule_file);
        let mut builder = GitignoreBuilder::new(root);
        let mut has_rules = false;

        if rule_path.is_file() {
            for pattern in read_patterns(&rule_path)? {
                add_pattern(&mut builder, &rule_path, &pattern)?;
                has_rules = true;
            }
        }
        for pattern in extra_patterns {
            if let Some(pattern) = normalize_line(pattern) {
                add_pattern(&mut builder, root, pattern)?;
                has_rules = true;
            }
        }

        let layers = if has_rules {
            vec![Arc::new(build(&builder, &rule_path)?)]
        } else {
            Vec::new()
        };

        Ok(Self {
            permanent: Arc::new(permanent),
            layers,
            rule_file: rule_file.to_string(),
        })
    }

    /// Rules in effect inside `dir`.
    ///
    /// Returns `self` unchanged (cheaply cloned) when `dir` has no rule file.
    pub fn enter(&self, dir: &Path) -> Result<Self> {
        let rule_path = dir.join(&self.rule_file);
        if !rule_path.is_file() {
            return Ok(self.clone());
        }

        let mut builder = GitignoreBuilder::new(dir);
        for pattern in read_patterns(&rule_path)? {
            add_pattern(&mut builder, &rule_path, &pattern)?;
        }
        let layer = build(&builder, &rule_path)?;
        debug!(
            "Loaded {} rule(s) from {}",
            layer.num_ignores() + layer.num_whitelists(),
            rule_path.display()
        );

        let mut next = self.clone();
        next.layers.push(Arc::new(layer));
        Ok(next)
    }

    /// Whether `path` is excluded. `is_dir` enables directory-only
    /// patterns (those ending in `/`).
    ///
    /// Permanent excludes win outright. Otherwise the innermost layer with
    /// an opinion decides, and within a layer the last matching pattern
    /// wins, so a later `!pattern` re-includes.
    pub fn is_excluded(&self, path: &Path, is_dir: bool) -> bool {
        if self.permanent.matched(path, is_dir).is_ignore() {
            return true;
        }

        for layer in self.layers.iter().rev() {
            match layer.matched(path, is_dir) {
                Match::Ignore(_) => return true,
                Match::Whitelist(_) => return false,
                Match::None => {}
            }
        }
        false
    }

    /// Number of rule-file layers currently in effect.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }
}

/// Read the patterns from a rule file, in file order.
fn read_patterns(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| Error::from_io(path, e))?;
    Ok(content
        .lines()
        .filter_map(normalize_line)
        .map(str::to_string)
        .collect())
}

/// Drop blank and comment lines; strip one leading `/`.
fn normalize_line(line: &str) -> Option<&str> {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() || line.starts_with('#') {
        return None;
    }
    Some(line.strip_prefix('/').unwrap_or(line))
}

fn add_pattern(builder: &mut GitignoreBuilder, origin: &Path, pattern: &str) -> Result<()> {
    builder
        .add_line(Some(origin.to_path_buf()), pattern)
        .map_err(|source| Error::InvalidRule {
            path: origin.to_path_buf(),
            source,
        })?;
    Ok(())
}

fn build(builder: &GitignoreBuilder, origin: &Path) -> Result<Gitignore> {
    builder.build().map_err(|source| Error::InvalidRule {
        path: PathBuf::from(origin),
        source,
    })
}
