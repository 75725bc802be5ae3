// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Scheduled event tools.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

#[cfg(feature = "telemetry")]
use tracing::{debug, info, instrument};

use super::users::current_user_uri;
use crate::client::{CalendlyClient, EventFilters};
use crate::error::ToolError;
use crate::tools::parse_arguments;
use crate::tools::registry::{ToolHandler, ToolOutput};
use crate::tools::schema::{count_property, enum_property, page_token_property, sort_property, string_property};
use crate::types::{InputSchema, ToolDefinition};

pub(crate) const EVENT_STATUSES: &[&str] = &["active", "canceled"];

/// Handler for the `list_events` tool.
pub struct ListEventsHandler {
    client: Arc<CalendlyClient>,
}

impl ListEventsHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for ListEventsHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "list_events",
            "List scheduled events with various filters (defaults to the current user)",
        )
        .with_schema(
            InputSchema::new()
                .with_property("user", string_property("Filter by user URI"))
                .with_property("organization", string_property("Filter by organization URI"))
                .with_property("invitee_email", string_property("Filter by invitee email"))
                .with_property("status", enum_property("Filter by status", EVENT_STATUSES))
                .with_property(
                    "min_start_time",
                    string_property("Minimum start time (ISO 8601 format)"),
                )
                .with_property(
                    "max_start_time",
                    string_property("Maximum start time (ISO 8601 format)"),
                )
                .with_property("count", count_property())
                .with_property("page_token", page_token_property())
                .with_property("sort", sort_property("start_time:asc")),
        )
    }

    #[cfg_attr(feature = "telemetry", instrument(skip_all))]
    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let mut filters: EventFilters = parse_arguments(&input)?;
        if filters.user.is_none() && filters.organization.is_none() {
            let me = current_user_uri(&self.client).await?;
            #[cfg(feature = "telemetry")]
            debug!(user = %me, "Scoping events to the current user");
            filters.user = Some(me);
        }
        let page = self.client.list_events(&filters).await?;
        Ok(page.into())
    }
}

#[derive(Debug, Deserialize)]
struct EventArgs {
    event_uri: String,
}

/// Handler for the `get_event` tool.
pub struct GetEventHandler {
    client: Arc<CalendlyClient>,
}

impl GetEventHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for GetEventHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("get_event", "Get details of a specific scheduled event").with_schema(
            InputSchema::new()
                .with_property("event_uri", string_property("The URI of the scheduled event"))
                .with_required(&["event_uri"]),
        )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: EventArgs = parse_arguments(&input)?;
        let event = self.client.get_event(&args.event_uri).await?;
        Ok(ToolOutput::json(event))
    }
}

/// Handler for the `cancel_event` tool.
pub struct CancelEventHandler {
    client: Arc<CalendlyClient>,
}

impl CancelEventHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct CancelEventArgs {
    event_uri: String,
    reason: Option<String>,
}

#[async_trait]
impl ToolHandler for CancelEventHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("cancel_event", "Cancel a scheduled event").with_schema(
            InputSchema::new()
                .with_property("event_uri", string_property("The URI of the event to cancel"))
                .with_property("reason", string_property("Reason for cancellation"))
                .with_required(&["event_uri"]),
        )
    }

    fn is_mutating(&self) -> bool {
        true
    }

    #[cfg_attr(feature = "telemetry", instrument(skip_all, fields(event = tracing::field::Empty)))]
    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: CancelEventArgs = parse_arguments(&input)?;

        #[cfg(feature = "telemetry")]
        tracing::Span::current().record("event", args.event_uri.as_str());

        let cancellation = self
            .client
            .cancel_event(&args.event_uri, args.reason.as_deref())
            .await?;

        #[cfg(feature = "telemetry")]
        info!("Event canceled");

        Ok(ToolOutput::json(cancellation))
    }
}
