//! Syntax-aware extraction of function-like symbols.
//!
//! Sources are parsed with tree-sitter and only top-level declarations are
//! inspected. Each symbol carries the exact byte span of its declaration so
//! callers can slice it out of the file without line arithmetic.

pub mod minimize;
pub mod parser;
pub mod typescript;

use std::ops::Range;

use serde::Serialize;

pub use minimize::{minimize, ELISION_MARKER};
pub use parser::{parse_source, Dialect, ParsedSource};

/// Name given to function declarations without an identifier.
pub const ANONYMOUS: &str = "anonymous";

/// The declaration shape a symbol was recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    /// A standalone function declaration
    Function,
    /// A variable initialised with a function or arrow expression
    Variable,
    /// A method inside a class declaration
    Method,
    /// An exported function declaration
    Export,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Function => "function",
            SymbolKind::Variable => "variable",
            SymbolKind::Method => "method",
            SymbolKind::Export => "export",
        }
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A function-like declaration and its half-open byte span in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolRecord {
    pub name: String,
    pub kind: SymbolKind,
    pub start_offset: usize,
    pub end_offset: usize,
    /// Enclosing class, for methods
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl SymbolRecord {
    pub fn range(&self) -> Range<usize> {
        self.start_offset..self.end_offset
    }
}

/// Verbatim and minimized text of one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionContent {
    pub minimal: String,
    pub full: String,
}

impl FunctionContent {
    /// Slice `range` out of the raw `source` buffer. `None` if the range is
    /// out of bounds. Bytes that are not valid UTF-8 are replaced.
    pub fn from_source(source: &[u8], range: Range<usize>) -> Option<Self> {
        let full = String::from_utf8_lossy(source.get(range)?).into_owned();
        Some(Self {
            minimal: minimize(&full),
            full,
        })
    }
}

/// All function-like top-level symbols, in source order.
pub fn extract_symbols(parsed: &ParsedSource) -> Vec<SymbolRecord> {
    typescript::extract(parsed.tree(), parsed.source())
}

/// Byte range of the first top-level symbol called `name`.
pub fn extract_function_by_name(parsed: &ParsedSource, name: &str) -> Option<Range<usize>> {
    extract_symbols(parsed)
        .into_iter()
        .find(|symbol| symbol.name == name)
        .map(|symbol| symbol.range())
}
