// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Webhook subscription tools.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[cfg(feature = "telemetry")]
use tracing::info;

use crate::client::{CalendlyClient, NewWebhook, WebhookFilters};
use crate::error::ToolError;
use crate::tools::parse_arguments;
use crate::tools::registry::{ToolHandler, ToolOutput};
use crate::tools::schema::{count_property, enum_property, page_token_property, string_property};
use crate::types::{InputSchema, ToolDefinition};

const WEBHOOK_SCOPES: &[&str] = &["organization", "user"];

/// Events a subscription can listen for.
pub const WEBHOOK_EVENTS: &[&str] = &[
    "invitee.created",
    "invitee.canceled",
    "routing_form_submission.created",
    "invitee_no_show.created",
    "invitee_no_show.deleted",
];

/// Handler for the `list_webhooks` tool.
pub struct ListWebhooksHandler {
    client: Arc<CalendlyClient>,
}

impl ListWebhooksHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for ListWebhooksHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "list_webhooks",
            "List all webhook subscriptions for an organization",
        )
        .with_schema(
            InputSchema::new()
                .with_property("organization", string_property("The URI of the organization"))
                .with_property("scope", enum_property("Scope of webhooks to list", WEBHOOK_SCOPES))
                .with_property(
                    "user",
                    string_property("User URI (required if scope is user)"),
                )
                .with_property("count", count_property())
                .with_property("page_token", page_token_property())
                .with_required(&["organization", "scope"]),
        )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let filters: WebhookFilters = parse_arguments(&input)?;
        let page = self.client.list_webhooks(&filters).await?;
        Ok(page.into())
    }
}

#[derive(Debug, Deserialize)]
struct WebhookArgs {
    webhook_uri: String,
}

/// Handler for the `get_webhook` tool.
pub struct GetWebhookHandler {
    client: Arc<CalendlyClient>,
}

impl GetWebhookHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for GetWebhookHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("get_webhook", "Get details of a specific webhook subscription")
            .with_schema(
                InputSchema::new()
                    .with_property(
                        "webhook_uri",
                        string_property("The URI of the webhook subscription"),
                    )
                    .with_required(&["webhook_uri"]),
            )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: WebhookArgs = parse_arguments(&input)?;
        let webhook = self.client.get_webhook(&args.webhook_uri).await?;
        Ok(ToolOutput::json(webhook))
    }
}

/// Handler for the `create_webhook` tool.
pub struct CreateWebhookHandler {
    client: Arc<CalendlyClient>,
}

impl CreateWebhookHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for CreateWebhookHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("create_webhook", "Create a new webhook subscription").with_schema(
            InputSchema::new()
                .with_property(
                    "url",
                    json!({
                        "type": "string",
                        "format": "uri",
                        "description": "The callback URL for webhook events"
                    }),
                )
                .with_property(
                    "events",
                    json!({
                        "type": "array",
                        "description": "Array of event types to subscribe to",
                        "items": { "type": "string", "enum": WEBHOOK_EVENTS },
                        "minItems": 1
                    }),
                )
                .with_property("organization", string_property("The URI of the organization"))
                .with_property("scope", enum_property("Scope of the webhook", WEBHOOK_SCOPES))
                .with_property(
                    "signing_key",
                    string_property("Signing key for webhook verification"),
                )
                .with_property("user", string_property("User URI (required if scope is user)"))
                .with_required(&["url", "events", "organization", "scope"]),
        )
    }

    fn is_mutating(&self) -> bool {
        true
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let webhook: NewWebhook = parse_arguments(&input)?;
        let created = self.client.create_webhook(&webhook).await?;
        Ok(ToolOutput::json(created))
    }
}

/// Handler for the `delete_webhook` tool.
pub struct DeleteWebhookHandler {
    client: Arc<CalendlyClient>,
}

impl DeleteWebhookHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for DeleteWebhookHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("delete_webhook", "Delete a webhook subscription").with_schema(
            InputSchema::new()
                .with_property(
                    "webhook_uri",
                    string_property("The URI of the webhook subscription to delete"),
                )
                .with_required(&["webhook_uri"]),
        )
    }

    fn is_mutating(&self) -> bool {
        true
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: WebhookArgs = parse_arguments(&input)?;
        self.client.delete_webhook(&args.webhook_uri).await?;

        #[cfg(feature = "telemetry")]
        info!(webhook = %args.webhook_uri, "Webhook subscription deleted");

        Ok(ToolOutput::text("Webhook subscription deleted successfully"))
    }
}
