// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! End-to-end tool dispatch: registry, handlers and client against a mock API.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{any, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use calendly_mcp::config::{Credential, ServerConfig};
use calendly_mcp::{CalendlyClient, McpServer, ToolRegistry};

async fn registry_for(server: &MockServer) -> ToolRegistry {
    let config =
        ServerConfig::new(Credential::AccessToken("oauth".to_string())).with_base_url(server.uri());
    let client = Arc::new(CalendlyClient::new(&config).unwrap());
    ToolRegistry::with_client(client).unwrap()
}

fn envelope_json(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

/// Smallest argument value the schema accepts.
fn sample_value(schema: &Value) -> Value {
    if let Some(first) = schema["enum"].as_array().and_then(|values| values.first()) {
        return first.clone();
    }
    match schema["type"].as_str() {
        Some("integer" | "number") => json!(1),
        Some("boolean") => json!(true),
        Some("array") => {
            let items = &schema["items"];
            match items["enum"].as_array().and_then(|values| values.first()) {
                Some(first) => json!([first]),
                None => json!(["a@example.com"]),
            }
        }
        _ => json!("https://api.calendly.com/x/1"),
    }
}

async fn mount_current_user(server: &MockServer, uri: &str) {
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource": {"uri": uri, "name": "Ada"}
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_tool_names_are_unique_and_listed_in_order() {
    let server = MockServer::start().await;
    let registry = registry_for(&server).await;

    let names = registry.tool_names();
    let unique: HashSet<&str> = names.iter().copied().collect();
    assert_eq!(unique.len(), names.len());

    insta::assert_snapshot!(names[..6].join("\n"), @r"
    get_current_user
    get_user
    get_organization
    list_organization_invitations
    get_organization_invitation
    create_organization_invitation
    ");
}

// ============================================================================
// Success paths
// ============================================================================

#[tokio::test]
async fn test_get_current_user_envelope() {
    let server = MockServer::start().await;
    mount_current_user(&server, "https://api.example.com/users/ABC").await;

    let dispatched = registry_for(&server)
        .await
        .dispatch("get_current_user", None)
        .await;
    assert!(!dispatched.mutating);
    let result = dispatched.into_call_result();

    assert!(!result.is_error());
    let user = envelope_json(&result.as_text());
    assert_eq!(user["uri"], "https://api.example.com/users/ABC");
}

#[tokio::test]
async fn test_list_events_defaults_to_current_user() {
    let server = MockServer::start().await;
    mount_current_user(&server, "https://api.calendly.com/users/ME").await;
    Mock::given(method("GET"))
        .and(path("/scheduled_events"))
        .and(query_param("user", "https://api.calendly.com/users/ME"))
        .and(query_param("status", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": [{"uri": "https://api.calendly.com/scheduled_events/E1"}],
            "pagination": {"count": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .await
        .dispatch("list_events", Some(json!({"status": "active"})))
        .await
        .into_call_result();

    assert!(!result.is_error(), "{}", result.as_text());
    let page = envelope_json(&result.as_text());
    assert_eq!(
        page["collection"][0]["uri"],
        "https://api.calendly.com/scheduled_events/E1"
    );
    assert_eq!(page["pagination"]["count"], 1);
}

#[tokio::test]
async fn test_list_events_with_organization_skips_user_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/scheduled_events"))
        .and(query_param(
            "organization",
            "https://api.calendly.com/organizations/ORG",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": [],
            "pagination": {"count": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .await
        .dispatch(
            "list_events",
            Some(json!({"organization": "https://api.calendly.com/organizations/ORG"})),
        )
        .await;

    assert!(!result.is_error);
}

#[tokio::test]
async fn test_cancel_event_tool() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/scheduled_events/E1/cancellation"))
        .and(body_json(json!({"reason": "conflict"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "resource": {"reason": "conflict"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dispatched = registry_for(&server)
        .await
        .dispatch(
            "cancel_event",
            Some(json!({
                "event_uri": "https://api.calendly.com/scheduled_events/E1",
                "reason": "conflict"
            })),
        )
        .await;
    assert!(dispatched.mutating);
    let result = dispatched.into_call_result();

    assert!(!result.is_error());
    assert_eq!(envelope_json(&result.as_text())["reason"], "conflict");
}

#[tokio::test]
async fn test_delete_tool_confirms_in_text() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/webhook_subscriptions/W1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .await
        .dispatch(
            "delete_webhook",
            Some(json!({"webhook_uri": "https://api.calendly.com/webhook_subscriptions/W1"})),
        )
        .await
        .into_call_result();

    assert!(!result.is_error());
    assert_eq!(result.as_text(), "Webhook subscription deleted successfully");
}

#[tokio::test]
async fn test_every_tool_answers_with_one_text_item() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resource": {
                "uri": "https://api.calendly.com/users/ME",
                "current_organization": "https://api.calendly.com/organizations/ORG"
            },
            "collection": [],
            "pagination": {"count": 0}
        })))
        .mount(&server)
        .await;
    let registry = registry_for(&server).await;

    let definitions = registry.definitions();
    assert_eq!(definitions.len(), 38);
    for definition in definitions {
        let schema = &definition.input_schema;
        let arguments: serde_json::Map<String, Value> = schema
            .required
            .iter()
            .map(|name| (name.clone(), sample_value(&schema.properties[name])))
            .collect();

        let result = registry
            .dispatch(&definition.name, Some(Value::Object(arguments)))
            .await
            .into_call_result();

        assert_eq!(result.content.len(), 1, "{}", definition.name);
        assert!(
            !result.is_error(),
            "{}: {}",
            definition.name,
            result.as_text()
        );
        assert!(!result.as_text().is_empty(), "{}", definition.name);
    }
}

// ============================================================================
// Failure paths
// ============================================================================

#[tokio::test]
async fn test_unknown_tool_names_the_tool() {
    let server = MockServer::start().await;
    let result = registry_for(&server)
        .await
        .dispatch("book_meeting", Some(json!({})))
        .await
        .into_call_result();

    assert!(result.is_error());
    assert_eq!(result.as_text(), "Unknown tool: book_meeting");
}

#[tokio::test]
async fn test_missing_required_argument_never_reaches_the_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .await
        .dispatch("get_event", Some(json!({})))
        .await
        .into_call_result();

    assert!(result.is_error());
    let text = result.as_text();
    assert!(text.starts_with("Invalid input:"), "{text}");
    assert!(text.contains("event_uri"), "{text}");
}

#[tokio::test]
async fn test_api_error_text_is_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scheduled_events/E404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "title": "Resource Not Found",
            "message": "The server could not find the requested resource."
        })))
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .await
        .dispatch(
            "get_event",
            Some(json!({"event_uri": "https://api.calendly.com/scheduled_events/E404"})),
        )
        .await
        .into_call_result();

    assert!(result.is_error());
    assert_eq!(
        result.as_text(),
        "Calendly API error (404): Resource Not Found - The server could not find the requested resource."
    );
}

#[tokio::test]
async fn test_failed_user_lookup_fails_list_events() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "title": "Unauthenticated",
            "message": "The access token is invalid"
        })))
        .mount(&server)
        .await;

    let result = registry_for(&server)
        .await
        .dispatch("list_events", None)
        .await
        .into_call_result();

    assert!(result.is_error());
    assert_eq!(
        result.as_text(),
        "Calendly API error (401): Unauthenticated - The access token is invalid"
    );
}

// ============================================================================
// Protocol round trip
// ============================================================================

#[tokio::test]
async fn test_json_rpc_round_trip() {
    let server = MockServer::start().await;
    mount_current_user(&server, "https://api.calendly.com/users/ABC").await;

    let mcp = McpServer::new(Arc::new(registry_for(&server).await));
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05"}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"get_current_user","arguments":{}}}"#,
        "\n"
    );
    let mut output = Vec::new();

    mcp.run(input.as_bytes(), &mut output).await.unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 3);

    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "calendly-mcp");

    let tools = responses[1]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), mcp.registry().len());
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));

    let call = &responses[2]["result"];
    assert!(call.get("isError").is_none());
    let user = envelope_json(call["content"][0]["text"].as_str().unwrap());
    assert_eq!(user["uri"], "https://api.calendly.com/users/ABC");
}
