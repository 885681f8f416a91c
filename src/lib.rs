pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod extractor;
pub mod indexer;
pub mod logging;
pub mod mcp;
pub mod service;

pub use config::Config;
pub use error::{Error, Result};
pub use extractor::{FunctionContent, SymbolKind, SymbolRecord};
pub use service::{get_symbol_content, Codebase, FileSymbols, SymbolContent};
