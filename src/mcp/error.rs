// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! MCP error types.

use thiserror::Error;

use super::types::error_codes;

/// Errors that can occur while serving the protocol.
#[derive(Debug, Error)]
pub enum McpError {
    /// Protocol error (JSON-RPC), reported back to the peer.
    #[error("Protocol error: code={code}, message={message}")]
    Protocol { code: i64, message: String },

    /// IO error on the transport streams.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// Create a protocol error.
    pub fn protocol(code: i64, message: impl Into<String>) -> Self {
        Self::Protocol {
            code,
            message: message.into(),
        }
    }

    /// The method is not part of the supported surface.
    pub fn method_not_found(method: &str) -> Self {
        Self::protocol(error_codes::METHOD_NOT_FOUND, format!("Method not found: {method}"))
    }

    /// Request parameters have the wrong shape.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::protocol(error_codes::INVALID_PARAMS, message)
    }

    /// JSON-RPC code to report for this error.
    pub fn code(&self) -> i64 {
        match self {
            Self::Protocol { code, .. } => *code,
            Self::Json(_) => error_codes::PARSE_ERROR,
            Self::Io(_) => error_codes::INVALID_REQUEST,
        }
    }

    /// Message to report to the peer.
    pub fn peer_message(&self) -> String {
        match self {
            Self::Protocol { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = McpError::method_not_found("resources/list");
        assert_eq!(err.code(), -32601);
        assert_eq!(err.peer_message(), "Method not found: resources/list");
        assert!(err.to_string().contains("-32601"));
    }

    #[test]
    fn test_json_error_maps_to_parse_error() {
        let err: McpError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert_eq!(err.code(), -32700);
    }

    #[test]
    fn test_invalid_params() {
        let err = McpError::invalid_params("missing tool name");
        assert_eq!(err.code(), -32602);
    }
}
