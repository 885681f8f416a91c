//! Subcommand implementations for the `codefetch` binary.

pub mod files;
pub mod init;
pub mod serve;
pub mod show;
pub mod symbols;
