// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Argument validation against a tool's input schema.
//!
//! Schemas are compiled once when the registry is built; every call is checked
//! before its handler runs, so handlers only ever see arguments of the declared
//! shape.

use serde_json::{json, Value};

use crate::error::ToolError;
use crate::types::InputSchema;

/// Compiled validator for one tool.
pub struct ArgumentValidator {
    validator: jsonschema::Validator,
}

impl ArgumentValidator {
    /// Compile an input schema.
    pub fn compile(schema: &InputSchema) -> Result<Self, ToolError> {
        let value = schema.to_value();
        let validator = jsonschema::validator_for(&value)
            .map_err(|e| ToolError::ExecutionFailed(format!("invalid input schema: {e}")))?;
        Ok(Self { validator })
    }

    /// Check `arguments`, collecting every violation into one message.
    pub fn validate(&self, arguments: &Value) -> Result<(), ToolError> {
        let violations: Vec<String> = self
            .validator
            .iter_errors(arguments)
            .map(|e| {
                let path = e.instance_path().to_string();
                if path.is_empty() {
                    e.to_string()
                } else {
                    format!("{path}: {e}")
                }
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ToolError::InvalidInput(violations.join("; ")))
        }
    }
}

// ----------------------------------------------------------------------------
// Property builders shared by the handlers
// ----------------------------------------------------------------------------

pub fn string_property(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

pub fn integer_property(description: &str) -> Value {
    json!({ "type": "integer", "description": description })
}

pub fn boolean_property(description: &str) -> Value {
    json!({ "type": "boolean", "description": description })
}

/// String restricted to a fixed value set.
pub fn enum_property(description: &str, values: &[&str]) -> Value {
    json!({ "type": "string", "description": description, "enum": values })
}

/// Page size; Calendly accepts 1 to 100.
pub fn count_property() -> Value {
    json!({
        "type": "integer",
        "description": "Number of results per page (max 100)",
        "minimum": 1,
        "maximum": 100
    })
}

pub fn page_token_property() -> Value {
    string_property("Token for the next or previous page, from a previous response")
}

pub fn sort_property(example: &str) -> Value {
    string_property(&format!("Sort field and direction (e.g., {example})"))
}
