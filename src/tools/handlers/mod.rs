// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Tool handler implementations.
//!
//! One module per Calendly resource family. Every handler holds a shared
//! [`CalendlyClient`]; [`register_all`] wires the full catalog into a builder.

mod availability;
mod compliance;
mod event_types;
mod events;
mod invitees;
mod organizations;
mod routing_forms;
mod scheduling;
mod users;
mod webhooks;

use std::sync::Arc;

use super::registry::ToolRegistryBuilder;
use crate::client::CalendlyClient;

pub use availability::{GetUserAvailabilityScheduleHandler, ListUserAvailabilitySchedulesHandler};
pub use compliance::{
    CreateDataComplianceDeletionHandler, GetActivityLogHandler, GetDataComplianceDeletionHandler,
};
pub use event_types::{
    CreateEventTypeHandler, DeleteEventTypeHandler, GetEventTypeHandler,
    ListEventTypeAvailableTimesHandler, ListEventTypesHandler, UpdateEventTypeHandler,
};
pub use events::{CancelEventHandler, GetEventHandler, ListEventsHandler};
pub use invitees::{
    CreateNoShowHandler, DeleteNoShowHandler, GetInviteeHandler, GetNoShowHandler,
    ListEventInviteesHandler,
};
pub use organizations::{
    CreateOrganizationInvitationHandler, GetOrganizationHandler, GetOrganizationInvitationHandler,
    GetOrganizationMembershipHandler, ListOrganizationInvitationsHandler,
    ListOrganizationMembershipsHandler, RemoveOrganizationMembershipHandler,
    RevokeOrganizationInvitationHandler,
};
pub use routing_forms::{
    GetRoutingFormHandler, GetRoutingFormSubmissionHandler, ListRoutingFormSubmissionsHandler,
    ListRoutingFormsHandler,
};
pub use scheduling::CreateSchedulingLinkHandler;
pub use users::{GetCurrentUserHandler, GetUserHandler};
pub use webhooks::{
    CreateWebhookHandler, DeleteWebhookHandler, GetWebhookHandler, ListWebhooksHandler,
    WEBHOOK_EVENTS,
};

/// Register every Calendly tool, grouped by resource family.
pub fn register_all(builder: &mut ToolRegistryBuilder, client: &Arc<CalendlyClient>) {
    let c = || Arc::clone(client);

    // users
    builder.register(GetCurrentUserHandler::new(c()));
    builder.register(GetUserHandler::new(c()));

    // organizations
    builder.register(GetOrganizationHandler::new(c()));
    builder.register(ListOrganizationInvitationsHandler::new(c()));
    builder.register(GetOrganizationInvitationHandler::new(c()));
    builder.register(CreateOrganizationInvitationHandler::new(c()));
    builder.register(RevokeOrganizationInvitationHandler::new(c()));
    builder.register(ListOrganizationMembershipsHandler::new(c()));
    builder.register(GetOrganizationMembershipHandler::new(c()));
    builder.register(RemoveOrganizationMembershipHandler::new(c()));

    // event types
    builder.register(ListEventTypesHandler::new(c()));
    builder.register(GetEventTypeHandler::new(c()));
    builder.register(CreateEventTypeHandler::new(c()));
    builder.register(UpdateEventTypeHandler::new(c()));
    builder.register(DeleteEventTypeHandler::new(c()));
    builder.register(ListEventTypeAvailableTimesHandler::new(c()));

    // scheduled events
    builder.register(ListEventsHandler::new(c()));
    builder.register(GetEventHandler::new(c()));
    builder.register(CancelEventHandler::new(c()));

    // invitees
    builder.register(ListEventInviteesHandler::new(c()));
    builder.register(GetInviteeHandler::new(c()));
    builder.register(CreateNoShowHandler::new(c()));
    builder.register(GetNoShowHandler::new(c()));
    builder.register(DeleteNoShowHandler::new(c()));

    // webhooks
    builder.register(ListWebhooksHandler::new(c()));
    builder.register(GetWebhookHandler::new(c()));
    builder.register(CreateWebhookHandler::new(c()));
    builder.register(DeleteWebhookHandler::new(c()));

    // scheduling links
    builder.register(CreateSchedulingLinkHandler::new(c()));

    // routing forms
    builder.register(ListRoutingFormsHandler::new(c()));
    builder.register(GetRoutingFormHandler::new(c()));
    builder.register(ListRoutingFormSubmissionsHandler::new(c()));
    builder.register(GetRoutingFormSubmissionHandler::new(c()));

    // availability
    builder.register(ListUserAvailabilitySchedulesHandler::new(c()));
    builder.register(GetUserAvailabilityScheduleHandler::new(c()));

    // activity log / compliance
    builder.register(GetActivityLogHandler::new(c()));
    builder.register(CreateDataComplianceDeletionHandler::new(c()));
    builder.register(GetDataComplianceDeletionHandler::new(c()));
}
