// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Model Context Protocol (MCP) server.
//!
//! Exposes the [`ToolRegistry`](crate::tools::ToolRegistry) to an orchestrator over
//! newline-delimited JSON-RPC 2.0 on stdin/stdout.
//!
//! ```text
//!   orchestrator ──stdin──▶ McpServer ──▶ ToolRegistry ──▶ CalendlyClient ──▶ api.calendly.com
//!                ◀─stdout──            ◀── CallToolResult
//! ```
//!
//! Supported methods: `initialize`, `ping`, `tools/list`, `tools/call`.
//!
//! # Example
//!
//! ```rust,ignore
//! use calendly_mcp::mcp::{serve_stdio, McpServer};
//!
//! let server = McpServer::new(Arc::new(registry));
//! serve_stdio(&server).await?;
//! ```

pub mod error;
pub mod server;
pub mod types;

pub use error::McpError;
pub use server::{serve_stdio, McpServer};
pub use types::*;
