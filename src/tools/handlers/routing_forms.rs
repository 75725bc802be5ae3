// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Routing form tools.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::client::{CalendlyClient, ListOptions};
use crate::error::ToolError;
use crate::tools::parse_arguments;
use crate::tools::registry::{ToolHandler, ToolOutput};
use crate::tools::schema::{count_property, page_token_property, sort_property, string_property};
use crate::types::{InputSchema, ToolDefinition};

fn with_list_options(schema: InputSchema) -> InputSchema {
    schema
        .with_property("count", count_property())
        .with_property("page_token", page_token_property())
        .with_property("sort", sort_property("created_at:desc"))
}

/// Handler for the `list_routing_forms` tool.
pub struct ListRoutingFormsHandler {
    client: Arc<CalendlyClient>,
}

impl ListRoutingFormsHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ListRoutingFormsArgs {
    organization_uri: String,
    #[serde(flatten)]
    options: ListOptions,
}

#[async_trait]
impl ToolHandler for ListRoutingFormsHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("list_routing_forms", "List all routing forms for an organization")
            .with_schema(with_list_options(
                InputSchema::new()
                    .with_property(
                        "organization_uri",
                        string_property("The URI of the organization"),
                    )
                    .with_required(&["organization_uri"]),
            ))
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: ListRoutingFormsArgs = parse_arguments(&input)?;
        let page = self
            .client
            .list_routing_forms(&args.organization_uri, &args.options)
            .await?;
        Ok(page.into())
    }
}

#[derive(Debug, Deserialize)]
struct RoutingFormArgs {
    routing_form_uri: String,
}

/// Handler for the `get_routing_form` tool.
pub struct GetRoutingFormHandler {
    client: Arc<CalendlyClient>,
}

impl GetRoutingFormHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for GetRoutingFormHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("get_routing_form", "Get details of a specific routing form")
            .with_schema(
                InputSchema::new()
                    .with_property(
                        "routing_form_uri",
                        string_property("The URI of the routing form"),
                    )
                    .with_required(&["routing_form_uri"]),
            )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: RoutingFormArgs = parse_arguments(&input)?;
        let form = self.client.get_routing_form(&args.routing_form_uri).await?;
        Ok(ToolOutput::json(form))
    }
}

/// Handler for the `list_routing_form_submissions` tool.
pub struct ListRoutingFormSubmissionsHandler {
    client: Arc<CalendlyClient>,
}

impl ListRoutingFormSubmissionsHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ListSubmissionsArgs {
    routing_form_uri: String,
    #[serde(flatten)]
    options: ListOptions,
}

#[async_trait]
impl ToolHandler for ListRoutingFormSubmissionsHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "list_routing_form_submissions",
            "List all submissions for a routing form",
        )
        .with_schema(with_list_options(
            InputSchema::new()
                .with_property(
                    "routing_form_uri",
                    string_property("The URI of the routing form"),
                )
                .with_required(&["routing_form_uri"]),
        ))
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: ListSubmissionsArgs = parse_arguments(&input)?;
        let page = self
            .client
            .list_routing_form_submissions(&args.routing_form_uri, &args.options)
            .await?;
        Ok(page.into())
    }
}

/// Handler for the `get_routing_form_submission` tool.
pub struct GetRoutingFormSubmissionHandler {
    client: Arc<CalendlyClient>,
}

impl GetRoutingFormSubmissionHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct SubmissionArgs {
    submission_uri: String,
}

#[async_trait]
impl ToolHandler for GetRoutingFormSubmissionHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "get_routing_form_submission",
            "Get details of a specific routing form submission",
        )
        .with_schema(
            InputSchema::new()
                .with_property(
                    "submission_uri",
                    string_property("The URI of the routing form submission"),
                )
                .with_required(&["submission_uri"]),
        )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: SubmissionArgs = parse_arguments(&input)?;
        let submission = self
            .client
            .get_routing_form_submission(&args.submission_uri)
            .await?;
        Ok(ToolOutput::json(submission))
    }
}
