// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Scheduling link tool.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::client::{CalendlyClient, NewSchedulingLink};
use crate::error::ToolError;
use crate::tools::parse_arguments;
use crate::tools::registry::{ToolHandler, ToolOutput};
use crate::tools::schema::{enum_property, string_property};
use crate::types::{InputSchema, ToolDefinition};

/// Handler for the `create_scheduling_link` tool.
pub struct CreateSchedulingLinkHandler {
    client: Arc<CalendlyClient>,
}

impl CreateSchedulingLinkHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for CreateSchedulingLinkHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "create_scheduling_link",
            "Create a single-use scheduling link for an event type or user",
        )
        .with_schema(
            InputSchema::new()
                .with_property(
                    "max_event_count",
                    json!({
                        "type": "integer",
                        "minimum": 1,
                        "description": "Maximum number of events that can be scheduled"
                    }),
                )
                .with_property("owner", string_property("URI of the event type or user"))
                .with_property("owner_type", enum_property("Type of owner", &["EventType", "User"]))
                .with_required(&["max_event_count", "owner", "owner_type"]),
        )
    }

    fn is_mutating(&self) -> bool {
        true
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let link: NewSchedulingLink = parse_arguments(&input)?;
        let created = self.client.create_scheduling_link(&link).await?;
        Ok(ToolOutput::json(created))
    }
}
