// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Invitee and no-show tools.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

#[cfg(feature = "telemetry")]
use tracing::info;

use super::events::EVENT_STATUSES;
use crate::client::{CalendlyClient, InviteeFilters};
use crate::error::ToolError;
use crate::tools::parse_arguments;
use crate::tools::registry::{ToolHandler, ToolOutput};
use crate::tools::schema::{count_property, enum_property, page_token_property, sort_property, string_property};
use crate::types::{InputSchema, ToolDefinition};

/// Handler for the `list_event_invitees` tool.
pub struct ListEventInviteesHandler {
    client: Arc<CalendlyClient>,
}

impl ListEventInviteesHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ListInviteesArgs {
    event_uri: String,
    #[serde(flatten)]
    filters: InviteeFilters,
}

#[async_trait]
impl ToolHandler for ListEventInviteesHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("list_event_invitees", "List all invitees for a specific event")
            .with_schema(
                InputSchema::new()
                    .with_property("event_uri", string_property("The URI of the event"))
                    .with_property("count", count_property())
                    .with_property("email", string_property("Filter by invitee email"))
                    .with_property("page_token", page_token_property())
                    .with_property("sort", sort_property("created_at:asc"))
                    .with_property("status", enum_property("Filter by status", EVENT_STATUSES))
                    .with_required(&["event_uri"]),
            )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: ListInviteesArgs = parse_arguments(&input)?;
        let page = self
            .client
            .list_event_invitees(&args.event_uri, &args.filters)
            .await?;
        Ok(page.into())
    }
}

#[derive(Debug, Deserialize)]
struct InviteeArgs {
    invitee_uri: String,
}

/// Handler for the `get_invitee` tool.
pub struct GetInviteeHandler {
    client: Arc<CalendlyClient>,
}

impl GetInviteeHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for GetInviteeHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("get_invitee", "Get details of a specific invitee").with_schema(
            InputSchema::new()
                .with_property("invitee_uri", string_property("The URI of the invitee"))
                .with_required(&["invitee_uri"]),
        )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: InviteeArgs = parse_arguments(&input)?;
        let invitee = self.client.get_invitee(&args.invitee_uri).await?;
        Ok(ToolOutput::json(invitee))
    }
}

/// Handler for the `create_no_show` tool.
pub struct CreateNoShowHandler {
    client: Arc<CalendlyClient>,
}

impl CreateNoShowHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for CreateNoShowHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("create_no_show", "Mark an invitee as a no-show").with_schema(
            InputSchema::new()
                .with_property(
                    "invitee_uri",
                    string_property("The URI of the invitee to mark as no-show"),
                )
                .with_required(&["invitee_uri"]),
        )
    }

    fn is_mutating(&self) -> bool {
        true
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: InviteeArgs = parse_arguments(&input)?;
        let no_show = self.client.create_no_show(&args.invitee_uri).await?;
        Ok(ToolOutput::json(no_show))
    }
}

#[derive(Debug, Deserialize)]
struct NoShowArgs {
    no_show_uri: String,
}

/// Handler for the `get_no_show` tool.
pub struct GetNoShowHandler {
    client: Arc<CalendlyClient>,
}

impl GetNoShowHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for GetNoShowHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("get_no_show", "Get details of a no-show record").with_schema(
            InputSchema::new()
                .with_property("no_show_uri", string_property("The URI of the no-show record"))
                .with_required(&["no_show_uri"]),
        )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: NoShowArgs = parse_arguments(&input)?;
        let no_show = self.client.get_no_show(&args.no_show_uri).await?;
        Ok(ToolOutput::json(no_show))
    }
}

/// Handler for the `delete_no_show` tool.
pub struct DeleteNoShowHandler {
    client: Arc<CalendlyClient>,
}

impl DeleteNoShowHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for DeleteNoShowHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("delete_no_show", "Remove a no-show marking from an invitee")
            .with_schema(
                InputSchema::new()
                    .with_property(
                        "no_show_uri",
                        string_property("The URI of the no-show record to delete"),
                    )
                    .with_required(&["no_show_uri"]),
            )
    }

    fn is_mutating(&self) -> bool {
        true
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: NoShowArgs = parse_arguments(&input)?;
        self.client.delete_no_show(&args.no_show_uri).await?;

        #[cfg(feature = "telemetry")]
        info!(no_show = %args.no_show_uri, "No-show record deleted");

        Ok(ToolOutput::text("No-show record deleted successfully"))
    }
}
