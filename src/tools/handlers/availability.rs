// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! User availability schedule tools.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::client::CalendlyClient;
use crate::error::ToolError;
use crate::tools::parse_arguments;
use crate::tools::registry::{ToolHandler, ToolOutput};
use crate::tools::schema::string_property;
use crate::types::{InputSchema, ToolDefinition};

/// Handler for the `list_user_availability_schedules` tool.
pub struct ListUserAvailabilitySchedulesHandler {
    client: Arc<CalendlyClient>,
}

impl ListUserAvailabilitySchedulesHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct UserArgs {
    user_uri: String,
}

#[async_trait]
impl ToolHandler for ListUserAvailabilitySchedulesHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "list_user_availability_schedules",
            "List all availability schedules for a user",
        )
        .with_schema(
            InputSchema::new()
                .with_property("user_uri", string_property("The URI of the user"))
                .with_required(&["user_uri"]),
        )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: UserArgs = parse_arguments(&input)?;
        let page = self
            .client
            .list_user_availability_schedules(&args.user_uri)
            .await?;
        Ok(page.into())
    }
}

/// Handler for the `get_user_availability_schedule` tool.
pub struct GetUserAvailabilityScheduleHandler {
    client: Arc<CalendlyClient>,
}

impl GetUserAvailabilityScheduleHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ScheduleArgs {
    schedule_uri: String,
}

#[async_trait]
impl ToolHandler for GetUserAvailabilityScheduleHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "get_user_availability_schedule",
            "Get details of a specific availability schedule",
        )
        .with_schema(
            InputSchema::new()
                .with_property(
                    "schedule_uri",
                    string_property("The URI of the availability schedule"),
                )
                .with_required(&["schedule_uri"]),
        )
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let args: ScheduleArgs = parse_arguments(&input)?;
        let schedule = self
            .client
            .get_user_availability_schedule(&args.schedule_uri)
            .await?;
        Ok(ToolOutput::json(schedule))
    }
}
