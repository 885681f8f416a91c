//! Source parsing with tree-sitter's TypeScript grammar.
//!
//! Plain JavaScript is parsed with the same grammar. `.tsx` and `.jsx`
//! use the grammar's TSX dialect.

use std::path::{Path, PathBuf};

use tracing::debug;
use tree_sitter::{Language, Node, Parser, Tree};

use crate::error::{Error, Result};

/// Grammar dialect used for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    TypeScript,
    Tsx,
}

impl Dialect {
    /// Pick the dialect from a file extension. Unknown extensions get the
    /// plain TypeScript dialect.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("tsx") | Some("jsx") => Dialect::Tsx,
            _ => Dialect::TypeScript,
        }
    }

    fn language(&self) -> Language {
        match self {
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// A file's raw source buffer together with its syntax tree.
///
/// The buffer is kept as read from disk, so it need not be valid UTF-8.
/// Byte offsets reported by the extractor index into [`ParsedSource::source`].
#[derive(Debug)]
pub struct ParsedSource {
    path: PathBuf,
    source: Vec<u8>,
    tree: Tree,
}

impl ParsedSource {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &[u8] {
        &self.source
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }
}

/// Parse `source`, failing with [`Error::Syntax`] if the grammar rejects
/// any part of it.
///
/// `path` selects the dialect and is carried into error messages; it is not
/// read from disk.
pub fn parse_source(path: impl Into<PathBuf>, source: impl Into<Vec<u8>>) -> Result<ParsedSource> {
    let path = path.into();
    let source = source.into();
    let dialect = Dialect::for_path(&path);

    let mut parser = Parser::new();
    parser
        .set_language(&dialect.language())
        .map_err(|e| Error::Parser(e.to_string()))?;

    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| Error::Parser(format!("no tree produced for {}", path.display())))?;

    if let Some(node) = first_error(tree.root_node()) {
        let position = node.start_position();
        debug!(
            "Rejecting {}: {} node at {}:{}",
            path.display(),
            if node.is_missing() { "missing" } else { "error" },
            position.row + 1,
            position.column + 1
        );
        return Err(Error::Syntax {
            path,
            line: position.row + 1,
            column: position.column + 1,
        });
    }

    Ok(ParsedSource { path, source, tree })
}

/// First error or missing node in document order.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    found
}
