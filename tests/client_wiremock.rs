// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! CalendlyClient against a mock Calendly API.

use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use calendly_mcp::client::rate_limit::now_ms;
use calendly_mcp::client::{EventFilters, EventTypeFilters, NewWebhook};
use calendly_mcp::config::{Credential, ServerConfig};
use calendly_mcp::{ApiError, CalendlyClient};

async fn client_for(server: &MockServer) -> CalendlyClient {
    let config =
        ServerConfig::new(Credential::ApiKey("test-token".to_string())).with_base_url(server.uri());
    CalendlyClient::new(&config).unwrap()
}

// ============================================================================
// Requests
// ============================================================================

#[tokio::test]
async fn test_get_current_user_sends_bearer_and_unwraps_resource() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource": {
                "uri": "https://api.calendly.com/users/ABC",
                "name": "Ada",
                "current_organization": "https://api.calendly.com/organizations/ORG"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = client_for(&server).await.get_current_user().await.unwrap();

    assert_eq!(user["uri"], "https://api.calendly.com/users/ABC");
    assert_eq!(user["name"], "Ada");
}

#[tokio::test]
async fn test_identifier_is_dereferenced_against_base_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/event_types/ET1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"resource": {"name": "Intro"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let event_type = client_for(&server)
        .await
        .get_event_type("https://api.calendly.com/event_types/ET1")
        .await
        .unwrap();

    assert_eq!(event_type["name"], "Intro");
}

#[tokio::test]
async fn test_list_filters_become_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scheduled_events"))
        .and(query_param("user", "https://api.calendly.com/users/ABC"))
        .and(query_param("status", "active"))
        .and(query_param("count", "25"))
        .and(query_param("page_token", "tok1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": [{"uri": "https://api.calendly.com/scheduled_events/E1"}],
            "pagination": {"count": 1, "next_page_token": "tok2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filters = EventFilters {
        user: Some("https://api.calendly.com/users/ABC".to_string()),
        status: Some("active".to_string()),
        count: Some(25),
        page_token: Some("tok1".to_string()),
        ..Default::default()
    };
    let page = client_for(&server).await.list_events(&filters).await.unwrap();

    assert_eq!(page.collection.len(), 1);
    assert_eq!(page.next_page_token(), Some("tok2"));
    assert!(!page.is_last());
}

#[tokio::test]
async fn test_boolean_filter_is_sent_as_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/event_types"))
        .and(query_param("organization", "https://api.calendly.com/organizations/ORG"))
        .and(query_param("active", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": [],
            "pagination": {"count": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filters = EventTypeFilters {
        organization: Some("https://api.calendly.com/organizations/ORG".to_string()),
        active: Some(true),
        ..Default::default()
    };
    let page = client_for(&server)
        .await
        .list_event_types(&filters)
        .await
        .unwrap();

    assert!(page.collection.is_empty());
    assert!(page.is_last());
}

#[tokio::test]
async fn test_cancel_event_posts_reason_to_cancellation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scheduled_events/E1/cancellation"))
        .and(body_json(json!({"reason": "conflict"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "resource": {"canceled_by": "Ada", "reason": "conflict"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cancellation = client_for(&server)
        .await
        .cancel_event("https://api.calendly.com/scheduled_events/E1", Some("conflict"))
        .await
        .unwrap();

    assert_eq!(cancellation["reason"], "conflict");
}

#[tokio::test]
async fn test_create_webhook_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook_subscriptions"))
        .and(body_json(json!({
            "url": "https://hooks.example.com/calendly",
            "events": ["invitee.created"],
            "organization": "https://api.calendly.com/organizations/ORG",
            "scope": "organization"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "resource": {"uri": "https://api.calendly.com/webhook_subscriptions/W1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let webhook = NewWebhook {
        url: "https://hooks.example.com/calendly".to_string(),
        events: vec!["invitee.created".to_string()],
        organization: "https://api.calendly.com/organizations/ORG".to_string(),
        scope: "organization".to_string(),
        signing_key: None,
        user: None,
    };
    let created = client_for(&server)
        .await
        .create_webhook(&webhook)
        .await
        .unwrap();

    assert_eq!(created["uri"], "https://api.calendly.com/webhook_subscriptions/W1");
}

#[tokio::test]
async fn test_delete_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/webhook_subscriptions/W1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .await
        .delete_webhook("https://api.calendly.com/webhook_subscriptions/W1")
        .await
        .unwrap();
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_error_body_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scheduled_events/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "title": "Resource Not Found",
            "message": "The server could not find the requested resource."
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .get_event("https://api.calendly.com/scheduled_events/missing")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(
        err.to_string(),
        "Calendly API error (404): Resource Not Found - The server could not find the requested resource."
    );
}

#[tokio::test]
async fn test_non_json_error_body_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .get_current_user()
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Calendly API error (502): Request failed with status code 502"
    );
}

#[tokio::test]
async fn test_rate_limited_response_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({"title": "Too Many Requests"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .get_current_user()
        .await
        .unwrap_err();

    assert!(err.is_rate_limited());
    assert!(matches!(err, ApiError::Response { status: 429, .. }));
}

#[tokio::test]
async fn test_single_resource_without_resource_field_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uri": "x"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .get_current_user()
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

// ============================================================================
// Rate budget
// ============================================================================

#[tokio::test]
async fn test_rate_headers_update_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ratelimit-remaining", "42")
                .insert_header("x-ratelimit-reset", "1700000000")
                .set_body_json(json!({"resource": {"uri": "u"}})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.get_current_user().await.unwrap();

    let budget = client.rate_limiter().budget();
    assert_eq!(budget.remaining, 42);
    assert_eq!(budget.reset_at_ms, 1_700_000_000_000);
}

#[tokio::test]
async fn test_rate_headers_are_recorded_on_errors_too() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("x-ratelimit-remaining", "0")
                .set_body_json(json!({"title": "Too Many Requests"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let _ = client.get_current_user().await;

    assert_eq!(client.rate_limiter().budget().remaining, 0);
}

#[tokio::test]
async fn test_exhausted_budget_delays_next_request_until_reset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resource": {"uri": "u"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.rate_limiter().record(Some(0), Some(now_ms() + 300));

    let start = Instant::now();
    client.get_current_user().await.unwrap();

    assert!(
        start.elapsed() >= Duration::from_millis(250),
        "request went out after {:?}",
        start.elapsed()
    );
}
