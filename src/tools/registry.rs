// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Tool registry and handler trait.
//!
//! This module defines the core abstractions for the tool system:
//! - [`ToolHandler`] trait that all tools must implement
//! - [`ToolRegistry`] for looking up and dispatching tool calls
//! - [`ToolOutput`] for returning results from tool execution
//!
//! Dispatch never fails. Unknown names, invalid arguments, API errors and even
//! handler panics all come back as an error envelope, and the registry stays
//! usable for the next call.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "telemetry")]
use tracing::{debug, info, info_span, warn, Instrument};

use super::schema::ArgumentValidator;
use crate::client::CalendlyClient;
use crate::error::ToolError;
use crate::mcp::types::CallToolResult;
#[cfg(feature = "telemetry")]
use crate::telemetry::metrics::GLOBAL_METRICS;
use crate::types::{Page, ToolDefinition};

/// Output from executing a tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// A short sentence, e.g. a deletion confirmation.
    Text(String),
    /// Structured payload, rendered as pretty-printed JSON.
    Json(Value),
}

impl ToolOutput {
    /// Create a text output.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Create a structured output.
    pub fn json(value: Value) -> Self {
        Self::Json(value)
    }

    /// Render the text that goes into the envelope.
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }

    /// Get a preview suitable for logging (truncated).
    pub fn log_preview(&self, max_bytes: usize) -> String {
        super::truncate_text(&self.render(), max_bytes)
    }
}

impl From<Page> for ToolOutput {
    fn from(page: Page) -> Self {
        Self::Json(serde_json::to_value(&page).unwrap_or_default())
    }
}

/// Trait that all tool handlers must implement.
///
/// Each tool is a struct holding whatever it needs (usually a shared
/// [`CalendlyClient`]) and adapting its arguments to one or two client calls.
///
/// # Example
///
/// ```rust,ignore
/// use calendly_mcp::tools::{ToolHandler, ToolOutput};
/// use calendly_mcp::types::ToolDefinition;
///
/// struct Echo;
///
/// #[async_trait]
/// impl ToolHandler for Echo {
///     fn definition(&self) -> ToolDefinition {
///         ToolDefinition::new("echo", "Return the arguments unchanged")
///     }
///
///     async fn execute(&self, input: serde_json::Value) -> Result<ToolOutput, ToolError> {
///         Ok(ToolOutput::json(input))
///     }
/// }
/// ```
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Get the tool definition (name, description, input schema).
    fn definition(&self) -> ToolDefinition;

    /// Returns true if this tool creates, changes or deletes remote state.
    fn is_mutating(&self) -> bool {
        false
    }

    /// Execute the tool with already-validated arguments.
    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError>;
}

struct RegisteredTool {
    definition: ToolDefinition,
    validator: ArgumentValidator,
    handler: Arc<dyn ToolHandler>,
}

/// Registry of available tools, maps names to handlers.
///
/// Built once at startup and immutable afterwards.
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Create a registry with every Calendly tool bound to `client`.
    pub fn with_client(client: Arc<CalendlyClient>) -> Result<Self, ToolError> {
        let mut builder = ToolRegistryBuilder::new();
        super::handlers::register_all(&mut builder, &client);
        builder.build()
    }

    /// Check if a tool exists.
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All tool definitions, in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|t| t.definition.clone())
            .collect()
    }

    /// All tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Dispatch a tool call.
    ///
    /// Missing arguments are treated as `{}`. The handler runs in its own task so
    /// that a panic is reported instead of tearing down the caller.
    pub async fn dispatch(&self, tool_name: &str, arguments: Option<Value>) -> DispatchResult {
        let start = Instant::now();
        let input = arguments.unwrap_or_else(|| Value::Object(Default::default()));
        let mutating = self
            .tools
            .get(tool_name)
            .is_some_and(|t| t.handler.is_mutating());

        #[cfg(feature = "telemetry")]
        {
            if mutating {
                info!(tool = %tool_name, "Executing tool that changes Calendly state");
            } else {
                debug!(tool = %tool_name, "Executing tool");
            }
        }

        let result = self.run(tool_name, input).await;
        let duration = start.elapsed();

        #[cfg(feature = "telemetry")]
        GLOBAL_METRICS.record_tool(tool_name, duration, result.is_ok());

        match result {
            Ok(output) => {
                #[cfg(feature = "telemetry")]
                debug!(
                    tool = %tool_name,
                    duration_ms = duration.as_secs_f64() * 1000.0,
                    preview = %output.log_preview(super::TELEMETRY_PREVIEW_MAX_BYTES),
                    "Tool execution succeeded"
                );
                DispatchResult {
                    tool_name: tool_name.to_string(),
                    output,
                    duration,
                    is_error: false,
                    mutating,
                }
            }
            Err(err) => {
                #[cfg(feature = "telemetry")]
                debug!(
                    tool = %tool_name,
                    duration_ms = duration.as_secs_f64() * 1000.0,
                    error = %err,
                    "Tool execution failed"
                );
                DispatchResult {
                    tool_name: tool_name.to_string(),
                    output: ToolOutput::Text(err.to_string()),
                    duration,
                    is_error: true,
                    mutating,
                }
            }
        }
    }

    async fn run(&self, tool_name: &str, input: Value) -> Result<ToolOutput, ToolError> {
        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| ToolError::NotFound(tool_name.to_string()))?;

        tool.validator.validate(&input)?;

        let handler = Arc::clone(&tool.handler);
        let task = async move { handler.execute(input).await };

        #[cfg(feature = "telemetry")]
        let task = task.instrument(info_span!("tool_execute", tool = %tool_name));

        match tokio::spawn(task).await {
            Ok(result) => result,
            Err(join_err) => {
                let reason = if join_err.is_panic() {
                    panic_message(join_err.into_panic())
                } else {
                    "task was cancelled".to_string()
                };
                #[cfg(feature = "telemetry")]
                warn!(tool = %tool_name, reason = %reason, "Tool handler aborted");
                Err(ToolError::ExecutionFailed(reason))
            }
        }
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of dispatching a tool call.
#[derive(Debug)]
pub struct DispatchResult {
    /// Name of the tool that was called
    pub tool_name: String,
    /// Output from the tool, or the error message
    pub output: ToolOutput,
    /// Duration of execution
    pub duration: Duration,
    /// Whether the execution resulted in an error
    pub is_error: bool,
    /// Whether the tool creates, changes or deletes remote state
    pub mutating: bool,
}

impl DispatchResult {
    /// Convert into the wire envelope.
    pub fn into_call_result(self) -> CallToolResult {
        let text = self.output.render();
        if self.is_error {
            CallToolResult::error(text)
        } else {
            CallToolResult::text(text)
        }
    }
}

/// Builder for constructing a ToolRegistry.
pub struct ToolRegistryBuilder {
    handlers: Vec<Arc<dyn ToolHandler>>,
}

impl ToolRegistryBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register a tool handler.
    pub fn register<T: ToolHandler + 'static>(&mut self, handler: T) -> &mut Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Build the final registry, compiling every input schema.
    ///
    /// Fails on a duplicate name or a schema that does not compile.
    pub fn build(self) -> Result<ToolRegistry, ToolError> {
        let mut registry = ToolRegistry::new();
        for handler in self.handlers {
            let definition = handler.definition();
            if registry.tools.contains_key(&definition.name) {
                return Err(ToolError::ExecutionFailed(format!(
                    "duplicate tool name: {}",
                    definition.name
                )));
            }
            let validator = ArgumentValidator::compile(&definition.input_schema)?;
            registry.order.push(definition.name.clone());
            registry.tools.insert(
                definition.name.clone(),
                RegisteredTool {
                    definition,
                    validator,
                    handler,
                },
            );
        }
        Ok(registry)
    }
}

impl Default for ToolRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
