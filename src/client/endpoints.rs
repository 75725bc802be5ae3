// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! One method per Calendly capability.
//!
//! Filter and body structs double as the argument shapes of the matching tools, so
//! field names here are the wire names and must not be renamed.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{query_pairs, scoped_query, CalendlyClient};
use crate::error::ApiError;
use crate::types::Page;

// ============================================================================
// Filters
// ============================================================================

/// Plain pagination and ordering options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

/// Filters for organization invitations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvitationFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Filters for organization memberships.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MembershipFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Filters for event types. One of `user` or `organization` scopes the list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventTypeFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Filters for scheduled events. One of `user` or `organization` scopes the list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invitee_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

/// Filters for the invitees of one event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InviteeFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Filters for webhook subscriptions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookFilters {
    pub organization: String,
    pub scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

/// Filters for activity log entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_occurred_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_occurred_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

// ============================================================================
// Bodies
// ============================================================================

/// Owner block of a new event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTypeProfile {
    #[serde(rename = "type")]
    pub profile_type: String,
    pub owner: String,
}

impl EventTypeProfile {
    /// Profile owned by a single user.
    pub fn user(owner: impl Into<String>) -> Self {
        Self {
            profile_type: "User".to_string(),
            owner: owner.into(),
        }
    }
}

/// Body of `POST /event_types`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEventType {
    pub name: String,
    pub duration: u32,
    pub profile: EventTypeProfile,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_plain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_questions: Option<Vec<Value>>,
}

/// Body of `PATCH <event type>`. Only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventTypeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_plain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_questions: Option<Vec<Value>>,
}

/// Body of `POST /webhook_subscriptions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWebhook {
    pub url: String,
    pub events: Vec<String>,
    pub organization: String,
    pub scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Body of `POST /scheduling_links`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSchedulingLink {
    pub max_event_count: u32,
    pub owner: String,
    pub owner_type: String,
}

#[derive(Serialize)]
struct Cancellation<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

// ============================================================================
// Operations
// ============================================================================

impl CalendlyClient {
    // ---- users ----

    /// The user the credential belongs to.
    pub async fn get_current_user(&self) -> Result<Value, ApiError> {
        self.get_resource("/users/me").await
    }

    pub async fn get_user(&self, user_uri: &str) -> Result<Value, ApiError> {
        self.get_by_uri(user_uri).await
    }

    // ---- organizations ----

    pub async fn get_organization(&self, organization_uri: &str) -> Result<Value, ApiError> {
        self.get_by_uri(organization_uri).await
    }

    pub async fn list_organization_invitations(
        &self,
        organization_uri: &str,
        filters: &InvitationFilters,
    ) -> Result<Page, ApiError> {
        self.get_page(
            "/organization_invitations",
            scoped_query("organization", organization_uri, filters),
        )
        .await
    }

    pub async fn get_organization_invitation(&self, invitation_uri: &str) -> Result<Value, ApiError> {
        self.get_by_uri(invitation_uri).await
    }

    /// Invite `email` to the organization.
    pub async fn create_organization_invitation(
        &self,
        organization_uri: &str,
        email: &str,
    ) -> Result<Value, ApiError> {
        let body = serde_json::json!({ "organization": organization_uri, "email": email });
        self.write_resource(Method::POST, "/organization_invitations", &body)
            .await
    }

    pub async fn revoke_organization_invitation(&self, invitation_uri: &str) -> Result<(), ApiError> {
        self.delete_resource(self.addressing().to_path(invitation_uri))
            .await
    }

    pub async fn list_organization_memberships(
        &self,
        organization_uri: &str,
        filters: &MembershipFilters,
    ) -> Result<Page, ApiError> {
        self.get_page(
            "/organization_memberships",
            scoped_query("organization", organization_uri, filters),
        )
        .await
    }

    pub async fn get_organization_membership(&self, membership_uri: &str) -> Result<Value, ApiError> {
        self.get_by_uri(membership_uri).await
    }

    pub async fn remove_organization_membership(&self, membership_uri: &str) -> Result<(), ApiError> {
        self.delete_resource(self.addressing().to_path(membership_uri))
            .await
    }

    // ---- event types ----

    pub async fn list_event_types(&self, filters: &EventTypeFilters) -> Result<Page, ApiError> {
        self.get_page("/event_types", query_pairs(filters)).await
    }

    pub async fn get_event_type(&self, event_type_uri: &str) -> Result<Value, ApiError> {
        self.get_by_uri(event_type_uri).await
    }

    pub async fn create_event_type(&self, event_type: &NewEventType) -> Result<Value, ApiError> {
        self.write_resource(Method::POST, "/event_types", event_type)
            .await
    }

    pub async fn update_event_type(
        &self,
        event_type_uri: &str,
        update: &EventTypeUpdate,
    ) -> Result<Value, ApiError> {
        self.write_resource(Method::PATCH, self.addressing().to_path(event_type_uri), update)
            .await
    }

    pub async fn delete_event_type(&self, event_type_uri: &str) -> Result<(), ApiError> {
        self.delete_resource(self.addressing().to_path(event_type_uri))
            .await
    }

    /// Bookable start times of an event type between two instants.
    ///
    /// The service caps the window at seven days; that limit is enforced remotely.
    pub async fn list_event_type_available_times(
        &self,
        event_type_uri: &str,
        start_time: &str,
        end_time: &str,
    ) -> Result<Page, ApiError> {
        let query = vec![
            ("event_type".to_string(), event_type_uri.to_string()),
            ("start_time".to_string(), start_time.to_string()),
            ("end_time".to_string(), end_time.to_string()),
        ];
        self.get_page("/event_type_available_times", query).await
    }

    // ---- scheduled events ----

    pub async fn list_events(&self, filters: &EventFilters) -> Result<Page, ApiError> {
        self.get_page("/scheduled_events", query_pairs(filters))
            .await
    }

    pub async fn get_event(&self, event_uri: &str) -> Result<Value, ApiError> {
        self.get_by_uri(event_uri).await
    }

    /// Cancel a scheduled event, optionally telling invitees why.
    pub async fn cancel_event(&self, event_uri: &str, reason: Option<&str>) -> Result<Value, ApiError> {
        let path = self.addressing().child_path(event_uri, "cancellation");
        self.write_resource(Method::POST, &path, &Cancellation { reason })
            .await
    }

    // ---- invitees ----

    pub async fn list_event_invitees(
        &self,
        event_uri: &str,
        filters: &InviteeFilters,
    ) -> Result<Page, ApiError> {
        let path = self.addressing().child_path(event_uri, "invitees");
        self.get_page(&path, query_pairs(filters)).await
    }

    pub async fn get_invitee(&self, invitee_uri: &str) -> Result<Value, ApiError> {
        self.get_by_uri(invitee_uri).await
    }

    /// Mark an invitee as a no-show.
    pub async fn create_no_show(&self, invitee_uri: &str) -> Result<Value, ApiError> {
        let body = serde_json::json!({ "invitee": invitee_uri });
        self.write_resource(Method::POST, "/invitee_no_shows", &body)
            .await
    }

    pub async fn get_no_show(&self, no_show_uri: &str) -> Result<Value, ApiError> {
        self.get_by_uri(no_show_uri).await
    }

    pub async fn delete_no_show(&self, no_show_uri: &str) -> Result<(), ApiError> {
        self.delete_resource(self.addressing().to_path(no_show_uri))
            .await
    }

    // ---- webhooks ----

    pub async fn list_webhooks(&self, filters: &WebhookFilters) -> Result<Page, ApiError> {
        self.get_page("/webhook_subscriptions", query_pairs(filters))
            .await
    }

    pub async fn get_webhook(&self, webhook_uri: &str) -> Result<Value, ApiError> {
        self.get_by_uri(webhook_uri).await
    }

    pub async fn create_webhook(&self, webhook: &NewWebhook) -> Result<Value, ApiError> {
        self.write_resource(Method::POST, "/webhook_subscriptions", webhook)
            .await
    }

    pub async fn delete_webhook(&self, webhook_uri: &str) -> Result<(), ApiError> {
        self.delete_resource(self.addressing().to_path(webhook_uri))
            .await
    }

    // ---- scheduling links ----

    /// Create a single-use (or `max_event_count`-use) booking link.
    pub async fn create_scheduling_link(&self, link: &NewSchedulingLink) -> Result<Value, ApiError> {
        self.write_resource(Method::POST, "/scheduling_links", link)
            .await
    }

    // ---- routing forms ----

    pub async fn list_routing_forms(
        &self,
        organization_uri: &str,
        options: &ListOptions,
    ) -> Result<Page, ApiError> {
        self.get_page(
            "/routing_forms",
            scoped_query("organization", organization_uri, options),
        )
        .await
    }

    pub async fn get_routing_form(&self, routing_form_uri: &str) -> Result<Value, ApiError> {
        self.get_by_uri(routing_form_uri).await
    }

    pub async fn list_routing_form_submissions(
        &self,
        routing_form_uri: &str,
        options: &ListOptions,
    ) -> Result<Page, ApiError> {
        let path = self.addressing().child_path(routing_form_uri, "submissions");
        self.get_page(&path, query_pairs(options)).await
    }

    pub async fn get_routing_form_submission(&self, submission_uri: &str) -> Result<Value, ApiError> {
        self.get_by_uri(submission_uri).await
    }

    // ---- availability ----

    pub async fn list_user_availability_schedules(&self, user_uri: &str) -> Result<Page, ApiError> {
        self.get_page(
            "/user_availability_schedules",
            vec![("user".to_string(), user_uri.to_string())],
        )
        .await
    }

    pub async fn get_user_availability_schedule(&self, schedule_uri: &str) -> Result<Value, ApiError> {
        self.get_by_uri(schedule_uri).await
    }

    // ---- activity log / data compliance ----

    pub async fn get_activity_log(
        &self,
        organization_uri: &str,
        filters: &ActivityLogFilters,
    ) -> Result<Page, ApiError> {
        self.get_page(
            "/activity_log_entries",
            scoped_query("organization", organization_uri, filters),
        )
        .await
    }

    /// Request deletion of all invitee data for the given emails.
    pub async fn create_data_compliance_deletion(&self, emails: &[String]) -> Result<Value, ApiError> {
        let body = serde_json::json!({ "emails": emails });
        self.write_resource(Method::POST, "/data_compliance/deletion/invitees", &body)
            .await
    }

    pub async fn get_data_compliance_deletion(&self, request_uri: &str) -> Result<Value, ApiError> {
        self.get_by_uri(request_uri).await
    }
}
