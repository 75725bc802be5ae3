// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Organization, invitation and membership tools.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

#[cfg(feature = "telemetry")]
use tracing::{info, instrument};

use crate::client::{CalendlyClient, InvitationFilters, MembershipFilters};
use crate::error::ToolError;
use crate::tools::parse_arguments;
use crate::tools::registry::{ToolHandler, ToolOutput};
use crate::tools::schema::{count_property, enum_property, page_token_property, sort_property, string_property};
use crate::types::{InputSchema, ToolDefinition};

const INVITATION_STATUSES: &[&str] = &["pending", "accepted", "declined", "revoked"];
const MEMBERSHIP_ROLES: &[&str] = &["owner", "admin", "user"];

fn organization_uri_property() -> serde_json::Value {
    string_property("The URI of the organization")
}

// ============================================================================
// Organizations
// ============================================================================

/// Handler for the `get_organization` tool.
pub struct GetOrganizationHandler {
    client: Arc<CalendlyClient>,
}

impl GetOrganizationHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct OrganizationArgs {
    organization_uri: String,
}

#[async_trait]
impl ToolHandler for GetOrganizationHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "get_organization",
            "Get information about a specific organization by URI",
        )
        .with_schema(
            InputSchema::new()
                .with_property("organization_uri", organization_uri_property())
                .with_required(&["organization_uri"]),
        )
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let args: OrganizationArgs = parse_arguments(&input)?;
        let organization = self.client.get_organization(&args.organization_uri).await?;
        Ok(ToolOutput::json(organization))
    }
}

// ============================================================================
// Invitations
// ============================================================================

/// Handler for the `list_organization_invitations` tool.
pub struct ListOrganizationInvitationsHandler {
    client: Arc<CalendlyClient>,
}

impl ListOrganizationInvitationsHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ListInvitationsArgs {
    organization_uri: String,
    #[serde(flatten)]
    filters: InvitationFilters,
}

#[async_trait]
impl ToolHandler for ListOrganizationInvitationsHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "list_organization_invitations",
            "List all invitations for an organization",
        )
        .with_schema(
            InputSchema::new()
                .with_property("organization_uri", organization_uri_property())
                .with_property("count", count_property())
                .with_property("email", string_property("Filter by invitee email"))
                .with_property("page_token", page_token_property())
                .with_property("sort", sort_property("created_at:asc"))
                .with_property(
                    "status",
                    enum_property("Filter by invitation status", INVITATION_STATUSES),
                )
                .with_required(&["organization_uri"]),
        )
    }

    #[cfg_attr(feature = "telemetry", instrument(skip_all))]
    async fn execute(&self, input: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let args: ListInvitationsArgs = parse_arguments(&input)?;
        let page = self
            .client
            .list_organization_invitations(&args.organization_uri, &args.filters)
            .await?;
        Ok(page.into())
    }
}

/// Handler for the `get_organization_invitation` tool.
pub struct GetOrganizationInvitationHandler {
    client: Arc<CalendlyClient>,
}

impl GetOrganizationInvitationHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct InvitationArgs {
    invitation_uri: String,
}

#[async_trait]
impl ToolHandler for GetOrganizationInvitationHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "get_organization_invitation",
            "Get details of a specific organization invitation",
        )
        .with_schema(
            InputSchema::new()
                .with_property("invitation_uri", string_property("The URI of the invitation"))
                .with_required(&["invitation_uri"]),
        )
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let args: InvitationArgs = parse_arguments(&input)?;
        let invitation = self
            .client
            .get_organization_invitation(&args.invitation_uri)
            .await?;
        Ok(ToolOutput::json(invitation))
    }
}

/// Handler for the `create_organization_invitation` tool.
pub struct CreateOrganizationInvitationHandler {
    client: Arc<CalendlyClient>,
}

impl CreateOrganizationInvitationHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct CreateInvitationArgs {
    organization_uri: String,
    email: String,
}

#[async_trait]
impl ToolHandler for CreateOrganizationInvitationHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "create_organization_invitation",
            "Invite a user to join an organization",
        )
        .with_schema(
            InputSchema::new()
                .with_property("organization_uri", organization_uri_property())
                .with_property("email", string_property("Email address of the person to invite"))
                .with_required(&["organization_uri", "email"]),
        )
    }

    fn is_mutating(&self) -> bool {
        true
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let args: CreateInvitationArgs = parse_arguments(&input)?;
        let invitation = self
            .client
            .create_organization_invitation(&args.organization_uri, &args.email)
            .await?;
        Ok(ToolOutput::json(invitation))
    }
}

/// Handler for the `revoke_organization_invitation` tool.
pub struct RevokeOrganizationInvitationHandler {
    client: Arc<CalendlyClient>,
}

impl RevokeOrganizationInvitationHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for RevokeOrganizationInvitationHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "revoke_organization_invitation",
            "Revoke a pending organization invitation",
        )
        .with_schema(
            InputSchema::new()
                .with_property(
                    "invitation_uri",
                    string_property("The URI of the invitation to revoke"),
                )
                .with_required(&["invitation_uri"]),
        )
    }

    fn is_mutating(&self) -> bool {
        true
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let args: InvitationArgs = parse_arguments(&input)?;
        self.client
            .revoke_organization_invitation(&args.invitation_uri)
            .await?;

        #[cfg(feature = "telemetry")]
        info!(invitation = %args.invitation_uri, "Invitation revoked");

        Ok(ToolOutput::text("Invitation revoked successfully"))
    }
}

// ============================================================================
// Memberships
// ============================================================================

/// Handler for the `list_organization_memberships` tool.
pub struct ListOrganizationMembershipsHandler {
    client: Arc<CalendlyClient>,
}

impl ListOrganizationMembershipsHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct ListMembershipsArgs {
    organization_uri: String,
    #[serde(flatten)]
    filters: MembershipFilters,
}

#[async_trait]
impl ToolHandler for ListOrganizationMembershipsHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "list_organization_memberships",
            "List all memberships for an organization",
        )
        .with_schema(
            InputSchema::new()
                .with_property("organization_uri", organization_uri_property())
                .with_property("count", count_property())
                .with_property("email", string_property("Filter by member email"))
                .with_property("page_token", page_token_property())
                .with_property("role", enum_property("Filter by role", MEMBERSHIP_ROLES))
                .with_required(&["organization_uri"]),
        )
    }

    #[cfg_attr(feature = "telemetry", instrument(skip_all))]
    async fn execute(&self, input: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let args: ListMembershipsArgs = parse_arguments(&input)?;
        let page = self
            .client
            .list_organization_memberships(&args.organization_uri, &args.filters)
            .await?;
        Ok(page.into())
    }
}

/// Handler for the `get_organization_membership` tool.
pub struct GetOrganizationMembershipHandler {
    client: Arc<CalendlyClient>,
}

impl GetOrganizationMembershipHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct MembershipArgs {
    membership_uri: String,
}

#[async_trait]
impl ToolHandler for GetOrganizationMembershipHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "get_organization_membership",
            "Get details of a specific organization membership",
        )
        .with_schema(
            InputSchema::new()
                .with_property("membership_uri", string_property("The URI of the membership"))
                .with_required(&["membership_uri"]),
        )
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let args: MembershipArgs = parse_arguments(&input)?;
        let membership = self
            .client
            .get_organization_membership(&args.membership_uri)
            .await?;
        Ok(ToolOutput::json(membership))
    }
}

/// Handler for the `remove_organization_membership` tool.
pub struct RemoveOrganizationMembershipHandler {
    client: Arc<CalendlyClient>,
}

impl RemoveOrganizationMembershipHandler {
    pub fn new(client: Arc<CalendlyClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for RemoveOrganizationMembershipHandler {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "remove_organization_membership",
            "Remove a user from an organization",
        )
        .with_schema(
            InputSchema::new()
                .with_property(
                    "membership_uri",
                    string_property("The URI of the membership to remove"),
                )
                .with_required(&["membership_uri"]),
        )
    }

    fn is_mutating(&self) -> bool {
        true
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let args: MembershipArgs = parse_arguments(&input)?;
        self.client
            .remove_organization_membership(&args.membership_uri)
            .await?;

        #[cfg(feature = "telemetry")]
        info!(membership = %args.membership_uri, "Membership removed");

        Ok(ToolOutput::text("Membership removed successfully"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_invitations_args_split_scope_from_filters() {
        let args: ListInvitationsArgs = parse_arguments(&json!({
            "organization_uri": "https://api.calendly.com/organizations/O",
            "status": "pending",
            "count": 20
        }))
        .unwrap();

        assert_eq!(args.organization_uri, "https://api.calendly.com/organizations/O");
        assert_eq!(args.filters.status.as_deref(), Some("pending"));
        assert_eq!(args.filters.count, Some(20));
        assert!(args.filters.email.is_none());
    }

    #[test]
    fn test_membership_role_enum() {
        let schema = ListOrganizationMembershipsHandler::new(test_client())
            .definition()
            .input_schema;
        assert_eq!(
            schema.properties["role"]["enum"],
            json!(["owner", "admin", "user"])
        );
        assert!(schema.is_required("organization_uri"));
    }

    fn test_client() -> Arc<CalendlyClient> {
        let config = crate::config::ServerConfig::new(crate::config::Credential::ApiKey(
            "k".to_string(),
        ));
        Arc::new(CalendlyClient::new(&config).unwrap())
    }
}
