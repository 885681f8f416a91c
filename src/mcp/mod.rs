//! MCP (Model Context Protocol) server exposing the file and symbol
//! operations to LLM clients over stdio.

mod server;

pub use server::CodefetchServer;
