// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! User tools.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::client::CalendlyClient;
use crate::error::ToolError;
use crate::tools::parse_arguments;
use crate::tools::registry::{ToolHandler, ToolOutput};
use crate::tools::schema::string_property;
use crate::types::{InputSchema, ToolDefinition};

/// Handler for the `get_current_user` tool.
pub struct GetCurrentUserHandler {
    client: Arc<CalendlyClient>,
}

impl GetCurrentUserHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for GetCurrentUserHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "get_current_user",
            "Get information about the currently authenticated Calendly user",
        )
    }

    #[cfg_attr(feature = "telemetry", instrument(skip_all))]
    async fn execute(&self, _input: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let user = self.client.get_current_user().await?;
        Ok(ToolOutput::json(user))
    }
}

/// Handler for the `get_user` tool.
pub struct GetUserHandler {
    client: Arc<CalendlyClient>,
}

impl GetUserHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct GetUserArgs {
    user_uri: String,
}

#[async_trait]
impl ToolHandler for GetUserHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("get_user", "Get information about a specific user by URI").with_schema(
            InputSchema::new()
                .with_property("user_uri", string_property("The URI of the user to retrieve"))
                .with_required(&["user_uri"]),
        )
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let args: GetUserArgs = parse_arguments(&input)?;
        let user = self.client.get_user(&args.user_uri).await?;
        Ok(ToolOutput::json(user))
    }
}

/// URI of the user the credential belongs to.
///
/// Used by list tools that default their scope to "me".
pub(crate) async fn current_user_uri(client: &CalendlyClient) -> Result<String, ToolError> {
    let user = client.get_current_user().await?;
    user.get("uri")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            crate::error::ApiError::Decode("current user has no `uri`".to_string()).into()
        })
}
