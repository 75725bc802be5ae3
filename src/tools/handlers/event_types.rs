// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Event type tools.
//!
//! `list_event_types` falls back to the current user when neither `user` nor
//! `organization` is given, since Calendly rejects an unscoped listing.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[cfg(feature = "telemetry")]
use tracing::{debug, info, instrument};

use super::users::current_user_uri;
use crate::client::{CalendlyClient, EventTypeFilters, EventTypeProfile, EventTypeUpdate, NewEventType};
use crate::error::ToolError;
use crate::tools::parse_arguments;
use crate::tools::registry::{ToolHandler, ToolOutput};
use crate::tools::schema::{
    boolean_property, count_property, enum_property, integer_property, page_token_property,
    sort_property, string_property,
};
use crate::types::{InputSchema, ToolDefinition};

const EVENT_KINDS: &[&str] = &["solo", "group", "collective", "round_robin"];

fn event_type_uri_property(purpose: &str) -> Value {
    string_property(&format!("The URI of the event type{purpose}"))
}

fn custom_questions_property(description: &str) -> Value {
    json!({
        "type": "array",
        "description": description,
        "items": {
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "type": {
                    "type": "string",
                    "enum": ["string", "text", "phone_number", "multiple_choice", "radio_buttons", "checkboxes"]
                },
                "position": { "type": "number" },
                "enabled": { "type": "boolean" },
                "required": { "type": "boolean" },
                "answer_choices": { "type": "array", "items": { "type": "string" } },
                "include_other": { "type": "boolean" }
            },
            "required": ["name", "type", "position", "enabled", "required"]
        }
    })
}

#[derive(Debug, Deserialize)]
struct EventTypeArgs {
    event_type_uri: String,
}

/// Handler for the `list_event_types` tool.
pub struct ListEventTypesHandler {
    client: Arc<CalendlyClient>,
}

impl ListEventTypesHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for ListEventTypesHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "list_event_types",
            "List all event types for a user or organization (defaults to the current user)",
        )
        .with_schema(
            InputSchema::new()
                .with_property("user", string_property("Filter by user URI"))
                .with_property("organization", string_property("Filter by organization URI"))
                .with_property("count", count_property())
                .with_property("page_token", page_token_property())
                .with_property("sort", sort_property("name:asc"))
                .with_property("active", boolean_property("Filter by active status")),
        )
    }

    #[cfg_attr(feature = "telemetry", instrument(skip_all))]
    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let mut filters: EventTypeFilters = parse_arguments(&input)?;
        if filters.user.is_none() && filters.organization.is_none() {
            let me = current_user_uri(&self.client).await?;
            #[cfg(feature = "telemetry")]
            debug!(user = %me, "Scoping event types to the current user");
            filters.user = Some(me);
        }
        let page = self.client.list_event_types(&filters).await?;
        Ok(page.into())
    }
}

/// Handler for the `get_event_type` tool.
pub struct GetEventTypeHandler {
    client: Arc<CalendlyClient>,
}

impl GetEventTypeHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for GetEventTypeHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("get_event_type", "Get details of a specific event type").with_schema(
            InputSchema::new()
                .with_property("event_type_uri", event_type_uri_property(""))
                .with_required(&["event_type_uri"]),
        )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: EventTypeArgs = parse_arguments(&input)?;
        let event_type = self.client.get_event_type(&args.event_type_uri).await?;
        Ok(ToolOutput::json(event_type))
    }
}

/// Handler for the `create_event_type` tool.
pub struct CreateEventTypeHandler {
    client: Arc<CalendlyClient>,
}

impl CreateEventTypeHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct CreateEventTypeArgs {
    name: String,
    duration: u32,
    owner: String,
    #[serde(rename = "type")]
    event_type: Option<String>,
    kind: Option<String>,
    description_plain: Option<String>,
    description_html: Option<String>,
    color: Option<String>,
    internal_note: Option<String>,
    secret: Option<bool>,
    custom_questions: Option<Vec<Value>>,
}

impl From<CreateEventTypeArgs> for NewEventType {
    fn from(args: CreateEventTypeArgs) -> Self {
        Self {
            name: args.name,
            duration: args.duration,
            profile: EventTypeProfile::user(args.owner),
            event_type: args.event_type,
            kind: args.kind,
            description_plain: args.description_plain,
            description_html: args.description_html,
            color: args.color,
            internal_note: args.internal_note,
            secret: args.secret,
            custom_questions: args.custom_questions,
        }
    }
}

#[async_trait]
impl ToolHandler for CreateEventTypeHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("create_event_type", "Create a new event type").with_schema(
            InputSchema::new()
                .with_property("name", string_property("Name of the event type"))
                .with_property("duration", integer_property("Duration in minutes"))
                .with_property("owner", string_property("User URI of the event type owner"))
                .with_property(
                    "type",
                    string_property("Type of event (default: StandardEventType)"),
                )
                .with_property("kind", enum_property("Kind of event", EVENT_KINDS))
                .with_property("description_plain", string_property("Plain text description"))
                .with_property("description_html", string_property("HTML description"))
                .with_property("color", string_property("Color hex code (e.g., #0000ff)"))
                .with_property("internal_note", string_property("Internal note for team members"))
                .with_property("secret", boolean_property("Whether the event type is secret"))
                .with_property(
                    "custom_questions",
                    custom_questions_property("Custom questions to ask invitees"),
                )
                .with_required(&["name", "duration", "owner"]),
        )
    }

    fn is_mutating(&self) -> bool {
        true
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: CreateEventTypeArgs = parse_arguments(&input)?;
        let event_type = self.client.create_event_type(&args.into()).await?;
        Ok(ToolOutput::json(event_type))
    }
}

/// Handler for the `update_event_type` tool.
pub struct UpdateEventTypeHandler {
    client: Arc<CalendlyClient>,
}

impl UpdateEventTypeHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct UpdateEventTypeArgs {
    event_type_uri: String,
    #[serde(flatten)]
    update: EventTypeUpdate,
}

#[async_trait]
impl ToolHandler for UpdateEventTypeHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("update_event_type", "Update an existing event type").with_schema(
            InputSchema::new()
                .with_property("event_type_uri", event_type_uri_property(" to update"))
                .with_property("name", string_property("New name"))
                .with_property("duration", integer_property("New duration in minutes"))
                .with_property("description_plain", string_property("New plain text description"))
                .with_property("description_html", string_property("New HTML description"))
                .with_property("color", string_property("New color hex code"))
                .with_property("internal_note", string_property("New internal note"))
                .with_property("secret", boolean_property("New secret status"))
                .with_property("active", boolean_property("New active status"))
                .with_property("custom_questions", custom_questions_property("New custom questions"))
                .with_required(&["event_type_uri"]),
        )
    }

    fn is_mutating(&self) -> bool {
        true
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: UpdateEventTypeArgs = parse_arguments(&input)?;
        let event_type = self
            .client
            .update_event_type(&args.event_type_uri, &args.update)
            .await?;
        Ok(ToolOutput::json(event_type))
    }
}

/// Handler for the `delete_event_type` tool.
pub struct DeleteEventTypeHandler {
    client: Arc<CalendlyClient>,
}

impl DeleteEventTypeHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for DeleteEventTypeHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("delete_event_type", "Delete an event type").with_schema(
            InputSchema::new()
                .with_property("event_type_uri", event_type_uri_property(" to delete"))
                .with_required(&["event_type_uri"]),
        )
    }

    fn is_mutating(&self) -> bool {
        true
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: EventTypeArgs = parse_arguments(&input)?;
        self.client.delete_event_type(&args.event_type_uri).await?;

        #[cfg(feature = "telemetry")]
        info!(event_type = %args.event_type_uri, "Event type deleted");

        Ok(ToolOutput::text("Event type deleted successfully"))
    }
}

/// Handler for the `list_event_type_available_times` tool.
pub struct ListEventTypeAvailableTimesHandler {
    client: Arc<CalendlyClient>,
}

impl ListEventTypeAvailableTimesHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct AvailableTimesArgs {
    event_type_uri: String,
    start_time: String,
    end_time: String,
}

#[async_trait]
impl ToolHandler for ListEventTypeAvailableTimesHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "list_event_type_available_times",
            "List bookable start times for an event type within a window of at most 7 days",
        )
        .with_schema(
            InputSchema::new()
                .with_property("event_type_uri", event_type_uri_property(""))
                .with_property(
                    "start_time",
                    string_property("Window start (ISO 8601, must be in the future)"),
                )
                .with_property("end_time", string_property("Window end (ISO 8601)"))
                .with_required(&["event_type_uri", "start_time", "end_time"]),
        )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: AvailableTimesArgs = parse_arguments(&input)?;
        let page = self
            .client
            .list_event_type_available_times(&args.event_type_uri, &args.start_time, &args.end_time)
            .await?;
        Ok(page.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_args_wrap_owner() {
        let args: CreateEventTypeArgs = parse_arguments(&json!({
            "name": "Intro",
            "duration": 15,
            "owner": "https://api.calendly.com/users/U1",
            "type": "StandardEventType"
        }))
        .unwrap();

        let body = serde_json::to_value(NewEventType::from(args)).unwrap();

        assert_eq!(body["profile"], json!({"type": "User", "owner": "https://api.calendly.com/users/U1"}));
        assert_eq!(body["type"], "StandardEventType");
        assert!(body.get("owner").is_none());
    }

    #[test]
    fn test_update_args_keep_uri_out_of_body() {
        let args: UpdateEventTypeArgs = parse_arguments(&json!({
            "event_type_uri": "https://api.calendly.com/event_types/ET1",
            "name": "Renamed",
            "active": true
        }))
        .unwrap();

        assert_eq!(
            serde_json::to_value(&args.update).unwrap(),
            json!({"name": "Renamed", "active": true})
        );
    }
}
