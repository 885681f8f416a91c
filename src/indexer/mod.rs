//! Ignore-aware file indexing.

pub mod rules;
pub mod walker;

pub use rules::{RuleSet, PERMANENT_EXCLUDES};
pub use walker::Walker;
