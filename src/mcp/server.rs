// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Line-delimited JSON-RPC server exposing the tool registry.
//!
//! One message per line in, one response per line out. Requests are handled one at
//! a time in arrival order; notifications get no response.

use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

#[cfg(feature = "telemetry")]
use tracing::{debug, info, warn};

use super::error::McpError;
use super::types::{
    error_codes, CallToolParams, JsonRpcRequest, JsonRpcResponse, ServerInfo,
    DEFAULT_PROTOCOL_VERSION,
};
use crate::tools::ToolRegistry;

/// MCP server over an arbitrary byte stream.
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    info: ServerInfo,
}

impl McpServer {
    /// Create a server for `registry`.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            info: ServerInfo::default(),
        }
    }

    /// The registry this server dispatches to.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Serve until `reader` reaches EOF.
    pub async fn run<R, W>(&self, mut reader: R, mut writer: W) -> Result<(), McpError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        #[cfg(feature = "telemetry")]
        info!(tools = self.registry.len(), "MCP server ready");

        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_line(line).await,
                Err(err) => {
                    #[cfg(feature = "telemetry")]
                    warn!(error = %err, "Message is not valid UTF-8");
                    Some(JsonRpcResponse::failure(
                        Value::Null,
                        error_codes::PARSE_ERROR,
                        format!("Parse error: {err}"),
                    ))
                }
            };

            if let Some(response) = response {
                let mut encoded = serde_json::to_string(&response)?;
                encoded.push('\n');
                writer.write_all(encoded.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        #[cfg(feature = "telemetry")]
        info!("Input closed, shutting down");

        Ok(())
    }

    /// Handle one raw line. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line.trim()) {
            Ok(request) => request,
            Err(err) => {
                #[cfg(feature = "telemetry")]
                warn!(error = %err, "Unparseable message");
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Parse error: {err}"),
                ));
            }
        };
        self.handle_request(request).await
    }

    /// Handle one decoded request.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        #[cfg(feature = "telemetry")]
        debug!(method = %request.method, "Request received");

        // notifications
        let id = request.id?;

        let response = match self.route(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(err) => JsonRpcResponse::failure(id, err.code(), err.peer_message()),
        };
        Some(response)
    }

    async fn route(&self, method: &str, params: Option<Value>) -> Result<Value, McpError> {
        match method {
            "initialize" => Ok(self.initialize(params.as_ref())),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.registry.definitions() })),
            "tools/call" => self.call_tool(params).await,
            other => Err(McpError::method_not_found(other)),
        }
    }

    fn initialize(&self, params: Option<&Value>) -> Value {
        let protocol_version = params
            .and_then(|p| p.get("protocolVersion"))
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_PROTOCOL_VERSION);

        json!({
            "protocolVersion": protocol_version,
            "capabilities": { "tools": {} },
            "serverInfo": self.info,
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params: CallToolParams = params
            .ok_or_else(|| McpError::invalid_params("missing params"))
            .and_then(|p| {
                serde_json::from_value(p).map_err(|e| McpError::invalid_params(e.to_string()))
            })?;

        let result = self
            .registry
            .dispatch(&params.name, params.arguments)
            .await
            .into_call_result();

        Ok(serde_json::to_value(result)?)
    }
}

/// Serve on the process's stdin/stdout.
pub async fn serve_stdio(server: &McpServer) -> Result<(), McpError> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    server.run(stdin, stdout).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;
    use crate::tools::{ToolHandler, ToolOutput, ToolRegistryBuilder};
    use crate::types::ToolDefinition;
    use async_trait::async_trait;

    struct Echo;

    #[async_trait]
    impl ToolHandler for Echo {
        fn definition(&self) -> ToolDefinition {
            ToolDefinition::new("echo", "Return the arguments")
        }

        async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
            Ok(ToolOutput::json(input))
        }
    }

    fn server() -> McpServer {
        let mut builder = ToolRegistryBuilder::new();
        builder.register(Echo);
        McpServer::new(Arc::new(builder.build().unwrap()))
    }

    async fn call(line: &str) -> Value {
        let response = server().handle_line(line).await.unwrap();
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_echoes_protocol_version() {
        let resp = call(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26"}}"#).await;
        assert_eq!(resp["result"]["protocolVersion"], "2025-03-26");
        assert_eq!(resp["result"]["serverInfo"]["name"], "calendly-mcp");
        assert!(resp["result"]["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_initialize_default_protocol_version() {
        let resp = call(r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#).await;
        assert_eq!(resp["result"]["protocolVersion"], DEFAULT_PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn test_tools_list() {
        let resp = call(r#"{"jsonrpc":"2.0","id":"a","method":"tools/list"}"#).await;
        assert_eq!(resp["id"], "a");
        assert_eq!(resp["result"]["tools"][0]["name"], "echo");
        assert_eq!(resp["result"]["tools"][0]["inputSchema"]["type"], "object");
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool_is_envelope_not_rpc_error() {
        let resp = call(r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"nope"}}"#).await;
        assert!(resp.get("error").is_none());
        assert_eq!(resp["result"]["isError"], true);
        assert_eq!(resp["result"]["content"][0]["text"], "Unknown tool: nope");
    }

    #[tokio::test]
    async fn test_tools_call_without_name() {
        let resp = call(r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{}}"#).await;
        assert_eq!(resp["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let resp = call(r#"{"jsonrpc":"2.0","id":4,"method":"resources/list"}"#).await;
        assert_eq!(resp["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_parse_error_has_null_id() {
        let resp = call("{not json").await;
        assert_eq!(resp["error"]["code"], -32700);
        assert!(resp["id"].is_null());
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let response = server()
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_run_over_buffers() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"echo","arguments":{"x":1}}}"#,
            "\n"
        );
        let mut output = Vec::new();

        server().run(input.as_bytes(), &mut output).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1]["id"], 2);
        let text = lines[1]["result"]["content"][0]["text"].as_str().unwrap();
        assert_eq!(serde_json::from_str::<Value>(text).unwrap(), json!({"x": 1}));
    }

    #[tokio::test]
    async fn test_run_survives_invalid_utf8() {
        let mut input = Vec::new();
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#);
        input.extend_from_slice(b"\n\xff\xfe\n");
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#);
        input.extend_from_slice(b"\n");
        let mut output = Vec::new();

        server().run(input.as_slice(), &mut output).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1]["error"]["code"], -32700);
        assert!(lines[1]["id"].is_null());
        assert_eq!(lines[2]["id"], 2);
        assert_eq!(lines[2]["result"], json!({}));
    }
}
