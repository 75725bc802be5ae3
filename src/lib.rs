// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! calendly-mcp - Calendly scheduling tools over the Model Context Protocol.
//!
//! An orchestrator (usually an LLM host) lists the tools this server exposes and
//! invokes them by name with JSON arguments. Each call is validated, translated into
//! a Calendly REST request and answered with a text result envelope.
//!
//! # Architecture
//!
//! - [`types`] - Tool definitions, input schemas, pagination pages
//! - [`error`] - Error types and result aliases
//! - [`config`] - Credential and server configuration from the environment
//! - [`client`] - Calendly HTTP client: addressing, rate limiting, error normalization
//! - [`tools`] - Tool registry, argument validation and the Calendly tool handlers
//! - [`mcp`] - JSON-RPC transport on stdin/stdout
//! - [`telemetry`] - Tracing and metrics infrastructure
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use calendly_mcp::{CalendlyClient, McpServer, ServerConfig, ToolRegistry};
//!
//! let config = ServerConfig::from_env()?;
//! let client = Arc::new(CalendlyClient::new(&config)?);
//! let registry = ToolRegistry::with_client(client)?;
//!
//! let server = McpServer::new(Arc::new(registry));
//! calendly_mcp::mcp::serve_stdio(&server).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod mcp;
pub mod telemetry;
pub mod tools;
pub mod types;

// Re-export commonly used types at crate root
pub use client::{ApiRequest, CalendlyClient, RateBudget, RateLimiter, ResourceAddressing};
pub use config::{Credential, ServerConfig};
pub use error::{ApiError, ConfigError, Result, ToolError};
pub use mcp::{CallToolResult, McpServer};
pub use tools::{DispatchResult, ToolHandler, ToolOutput, ToolRegistry, ToolRegistryBuilder};
pub use types::{InputSchema, Page, Pagination, ToolDefinition};

/// Server version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_public_exports() {
        let def = ToolDefinition::new("get_current_user", "Get the authenticated user");
        assert_eq!(def.input_schema.schema_type, "object");
        let _ = CallToolResult::text("ok");
    }
}
