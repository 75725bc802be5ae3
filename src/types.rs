// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Core types for the Calendly MCP server.
//!
//! This module defines the data structures shared between the API client, the tool
//! registry and the protocol adapter: tool descriptors, their input schemas, and the
//! paginated envelope returned by every Calendly list endpoint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Tool Definitions
// ============================================================================

/// JSON Schema for tool input parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: String, // Always "object"
    pub properties: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl InputSchema {
    /// Create a new input schema with object type.
    pub fn new() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    /// Add a property to the schema.
    pub fn with_property(mut self, name: impl Into<String>, schema: serde_json::Value) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Mark properties as required.
    pub fn with_required(mut self, required: &[&str]) -> Self {
        self.required = required.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Check whether a property is required.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Render the schema as a JSON value.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({ "type": "object" }))
    }
}

impl Default for InputSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Public descriptor of a tool: what `tools/list` hands to the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: InputSchema,
}

impl ToolDefinition {
    /// Create a new tool definition.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: InputSchema::new(),
        }
    }

    /// Set the input schema for this tool.
    pub fn with_schema(mut self, schema: InputSchema) -> Self {
        self.input_schema = schema;
        self
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// Pagination block attached to every Calendly collection response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_page_token: Option<String>,
}

/// One page of a Calendly collection.
///
/// Items are kept as raw JSON: the service owns the resource shapes, and
/// identifiers inside them must reach the caller untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page<T = serde_json::Value> {
    pub collection: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Token for the following page, if there is one.
    pub fn next_page_token(&self) -> Option<&str> {
        self.pagination.next_page_token.as_deref()
    }

    /// Check if this is the last page.
    pub fn is_last(&self) -> bool {
        self.pagination.next_page_token.is_none()
    }
}
