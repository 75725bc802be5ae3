// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Error types for the Calendly MCP server.
//!
//! This module provides strongly-typed errors for the different layers of the server,
//! using `thiserror` for ergonomic error definitions and `anyhow` for error propagation
//! in the binary.

use thiserror::Error;

/// A failure talking to the Calendly API, normalized into one shape.
///
/// Whatever went wrong (DNS, timeout, 4xx/5xx, a malformed body), callers above
/// the client only ever see this type. Its `Display` output is the operator-facing
/// message and is rendered verbatim into error envelopes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response reached us (connect, DNS, timeout, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("{message}")]
    Response { status: u16, message: String },

    /// A success response whose body was not the JSON shape we expected.
    #[error("Response parsing error: {0}")]
    Decode(String),

    /// The request itself could not be encoded.
    #[error("Request encoding error: {0}")]
    Encode(String),
}

impl ApiError {
    /// HTTP status of the rejection, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the service itself throttled us.
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }
}

/// Errors that can occur during tool lookup, validation and execution.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

/// Errors that can occur while assembling the server configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("CALENDLY_API_KEY or CALENDLY_ACCESS_TOKEN environment variable must be set")]
    MissingCredential,

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl ConfigError {
    /// Create an invalid value error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type alias using anyhow for flexible error handling.
pub type Result<T> = anyhow::Result<T>;
