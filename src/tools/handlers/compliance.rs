// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Activity log and data compliance tools.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[cfg(feature = "telemetry")]
use tracing::{info, instrument};

use crate::client::{ActivityLogFilters, CalendlyClient};
use crate::error::ToolError;
use crate::tools::parse_arguments;
use crate::tools::registry::{ToolHandler, ToolOutput};
use crate::tools::schema::{count_property, page_token_property, sort_property, string_property};
use crate::types::{InputSchema, ToolDefinition};

/// Handler for the `get_activity_log` tool.
pub struct GetActivityLogHandler {
    client: Arc<CalendlyClient>,
}

impl GetActivityLogHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ActivityLogArgs {
    organization_uri: String,
    #[serde(flatten)]
    filters: ActivityLogFilters,
}

#[async_trait]
impl ToolHandler for GetActivityLogHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("get_activity_log", "Get activity log entries for an organization")
            .with_schema(
                InputSchema::new()
                    .with_property(
                        "organization_uri",
                        string_property("The URI of the organization"),
                    )
                    .with_property("action", string_property("Filter by action type"))
                    .with_property("actor", string_property("Filter by actor URI"))
                    .with_property(
                        "max_occurred_at",
                        string_property("Maximum occurrence time (ISO 8601)"),
                    )
                    .with_property(
                        "min_occurred_at",
                        string_property("Minimum occurrence time (ISO 8601)"),
                    )
                    .with_property("namespace", string_property("Filter by namespace"))
                    .with_property("search_term", string_property("Search term to filter entries"))
                    .with_property("sort", sort_property("occurred_at:desc"))
                    .with_property("count", count_property())
                    .with_property("page_token", page_token_property())
                    .with_required(&["organization_uri"]),
            )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: ActivityLogArgs = parse_arguments(&input)?;
        let page = self
            .client
            .get_activity_log(&args.organization_uri, &args.filters)
            .await?;
        Ok(page.into())
    }
}

/// Handler for the `create_data_compliance_deletion` tool.
pub struct CreateDataComplianceDeletionHandler {
    client: Arc<CalendlyClient>,
}

impl CreateDataComplianceDeletionHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct DeletionArgs {
    emails: Vec<String>,
}

#[async_trait]
impl ToolHandler for CreateDataComplianceDeletionHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "create_data_compliance_deletion",
            "Create a GDPR data deletion request for invitees",
        )
        .with_schema(
            InputSchema::new()
                .with_property(
                    "emails",
                    json!({
                        "type": "array",
                        "description": "Array of invitee email addresses to delete",
                        "items": { "type": "string", "format": "email" },
                        "minItems": 1
                    }),
                )
                .with_required(&["emails"]),
        )
    }

    fn is_mutating(&self) -> bool {
        true
    }

    #[cfg_attr(feature = "telemetry", instrument(skip_all))]
    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: DeletionArgs = parse_arguments(&input)?;
        let request = self
            .client
            .create_data_compliance_deletion(&args.emails)
            .await?;

        #[cfg(feature = "telemetry")]
        info!(emails = args.emails.len(), "Data deletion requested");

        // The service answers 202 with no body.
        if request.is_null() {
            return Ok(ToolOutput::text(format!(
                "Deletion request accepted for {} email address(es)",
                args.emails.len()
            )));
        }
        Ok(ToolOutput::json(request))
    }
}

/// Handler for the `get_data_compliance_deletion` tool.
pub struct GetDataComplianceDeletionHandler {
    client: Arc<CalendlyClient>,
}

impl GetDataComplianceDeletionHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct RequestArgs {
    request_uri: String,
}

#[async_trait]
impl ToolHandler for GetDataComplianceDeletionHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "get_data_compliance_deletion",
            "Get status of a data compliance deletion request",
        )
        .with_schema(
            InputSchema::new()
                .with_property("request_uri", string_property("The URI of the deletion request"))
                .with_required(&["request_uri"]),
        )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: RequestArgs = parse_arguments(&input)?;
        let request = self
            .client
            .get_data_compliance_deletion(&args.request_uri)
            .await?;
        Ok(ToolOutput::json(request))
    }
}
