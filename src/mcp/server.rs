//! MCP server implementation for codefetch.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::Error;
use crate::service::Codebase;

/// Request parameters for listing files
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListFilesRequest {
    /// Optional sub path to restrict the listing
    #[schemars(description = "Optional directory or file, relative to the project root, to restrict the listing to")]
    path: Option<String>,
}

/// Request parameters for listing symbols
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListSymbolsRequest {
    /// Optional file to restrict the listing
    #[schemars(description = "Optional file, relative to the project root, to list symbols for")]
    file: Option<String>,
}

/// Request parameters for fetching one symbol
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetSymbolRequest {
    #[schemars(description = "File containing the symbol, relative to the project root")]
    file: String,

    #[schemars(description = "Name of the function, method or function-valued variable")]
    name: String,

    /// Return only the first and last line (default: false)
    #[schemars(description = "Return only the first and last line of the symbol (default: false)")]
    minimal: Option<bool>,
}

/// MCP server over one codebase. Every tool call re-reads the tree.
#[derive(Clone)]
pub struct CodefetchServer {
    codebase: Codebase,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CodefetchServer {
    pub fn new(codebase: Codebase) -> Self {
        Self {
            codebase,
            tool_router: Self::tool_router(),
        }
    }

    /// List files that survive the exclusion rules
    #[tool(
        name = "list_files",
        description = "List the project's files, honouring .gitignore rules. Optionally restrict to a sub path."
    )]
    async fn list_files(
        &self,
        Parameters(req): Parameters<ListFilesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let sub_path = req.path.clone().map(PathBuf::from);
        let files = self
            .blocking(move |codebase| {
                let files = codebase.list_files(sub_path.as_deref())?;
                Ok(files
                    .iter()
                    .map(|f| codebase.display_path(f))
                    .collect::<Vec<_>>())
            })
            .await?;

        let output = if files.is_empty() {
            match &req.path {
                Some(p) => format!("No files under: {}", p),
                None => "No files found.".to_string(),
            }
        } else {
            let header = match &req.path {
                Some(p) => format!("Files under '{}' ({} files):\n", p, files.len()),
                None => format!("All files ({} files):\n", files.len()),
            };
            format!("{}{}", header, files.join("\n"))
        };

        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    /// List function-like symbols with their byte ranges
    #[tool(
        name = "list_symbols",
        description = "List top-level functions, function-valued variables, class methods and exported functions in the project's source files, with byte offsets. Optionally restrict to one file."
    )]
    async fn list_symbols(
        &self,
        Parameters(req): Parameters<ListSymbolsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let file = req.file.map(PathBuf::from);
        let symbols = self
            .blocking(move |codebase| codebase.list_symbols(file.as_deref()))
            .await?;

        let output = serde_json::to_string_pretty(&symbols).map_err(|e| {
            McpError::internal_error(format!("Failed to serialize symbols: {}", e), None)
        })?;

        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    /// Fetch the source of one symbol
    #[tool(
        name = "get_symbol",
        description = "Get the source of one top-level function, function-valued variable, class method or exported function by file and name."
    )]
    async fn get_symbol(
        &self,
        Parameters(req): Parameters<GetSymbolRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.ensure_within_root(&req.file)?;

        let file = PathBuf::from(&req.file);
        let name = req.name.clone();
        let content = self
            .blocking(move |codebase| codebase.require_symbol_content(&file, &name))
            .await?;

        let body = if req.minimal.unwrap_or(false) {
            &content.minimal
        } else {
            &content.full
        };
        let output = format!(
            "# {} ({}, bytes {}..{})\n\n```\n{}\n```",
            content.name, content.file_name, content.start_offset, content.end_offset, body
        );

        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    /// Run the MCP server using stdio transport
    pub async fn run(self) -> anyhow::Result<()> {
        let service = self.serve(stdio()).await?;
        service.waiting().await?;
        Ok(())
    }

    pub fn codebase(&self) -> &Codebase {
        &self.codebase
    }
}

impl CodefetchServer {
    /// Run a core operation off the async runtime.
    async fn blocking<T, F>(&self, op: F) -> Result<T, McpError>
    where
        F: FnOnce(Codebase) -> crate::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let codebase = self.codebase.clone();
        tokio::task::spawn_blocking(move || op(codebase))
            .await
            .map_err(|e| McpError::internal_error(format!("Worker task failed: {}", e), None))?
            .map_err(to_mcp_error)
    }

    /// Reject paths that resolve outside the project root.
    fn ensure_within_root(&self, path: &str) -> Result<(), McpError> {
        let root = self.codebase.root();
        let canonical = root.join(path).canonicalize().map_err(|e| {
            McpError::invalid_params(format!("Invalid path '{}': {}", path, e), None)
        })?;
        let root_canonical = root.canonicalize().map_err(|e| {
            McpError::internal_error(format!("Failed to resolve root path: {}", e), None)
        })?;

        if !canonical.starts_with(&root_canonical) {
            return Err(McpError::invalid_params(
                format!("Path '{}' is outside the project root. Access denied.", path),
                None,
            ));
        }
        Ok(())
    }
}

fn to_mcp_error(err: Error) -> McpError {
    match err {
        Error::NotFound { .. }
        | Error::NotIndexed { .. }
        | Error::InvalidPath { .. }
        | Error::Syntax { .. } => McpError::invalid_params(err.to_string(), None),
        _ => McpError::internal_error(err.to_string(), None),
    }
}

#[tool_handler]
impl ServerHandler for CodefetchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "codefetch".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: Some("codefetch".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "codefetch MCP Server - browse and fetch functions without reading whole files.\n\n\
                 Available tools:\n\
                 - list_files: Files in the project, honouring .gitignore\n\
                 - list_symbols: Functions and methods per file with byte offsets\n\
                 - get_symbol: Source of one function by file and name\n\n\
                 Use 'list_symbols' to find a function, then 'get_symbol' to read it. \
                 Pass minimal=true to see only its first and last line."
                    .into(),
            ),
        }
    }
}
