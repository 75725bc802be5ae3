// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Tool system for the Calendly MCP server.
//!
//! Every Calendly capability is exposed as a named tool with a JSON input schema.
//! Tools are thin adapters: they reshape their arguments, call the
//! [`CalendlyClient`](crate::client::CalendlyClient) once (occasionally twice) and
//! hand back the payload.
//!
//! # Architecture
//!
//! - [`ToolHandler`] trait - Core abstraction for tool implementations
//! - [`ToolRegistry`] - Maps tool names to handlers, validates and dispatches calls
//! - Individual handlers in the [`handlers`] module, one file per resource family
//!
//! # Example
//!
//! ```rust,ignore
//! use calendly_mcp::tools::ToolRegistry;
//!
//! let registry = ToolRegistry::with_client(client)?;
//! let result = registry.dispatch("get_current_user", None).await;
//! println!("{}", result.output.render());
//! ```

pub mod handlers;
pub mod registry;
pub mod schema;

pub use registry::{DispatchResult, ToolHandler, ToolOutput, ToolRegistry, ToolRegistryBuilder};

use serde::Deserialize;
use crate::error::ToolError;

/// Telemetry preview limit for log output.
pub const TELEMETRY_PREVIEW_MAX_BYTES: usize = 2 * 1024; // 2 KiB

/// Parse JSON arguments into a typed struct.
///
/// This is a helper function for tool handlers to deserialize their input.
pub fn parse_arguments<T>(arguments: &serde_json::Value) -> Result<T, ToolError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_value(arguments.clone())
        .map_err(|err| ToolError::InvalidInput(format!("Failed to parse arguments: {err}")))
}

/// Truncate text to a maximum byte length, respecting UTF-8 boundaries.
pub fn truncate_text(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }

    // Find the last valid char boundary within max_bytes
    let mut end = max_bytes;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }

    if end == 0 {
        return String::new();
    }

    format!("{}... [truncated]", &text[..end])
}
