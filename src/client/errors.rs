// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Normalization of transport and HTTP failures into [`ApiError`].

use serde_json::Value;

use crate::error::ApiError;

/// Service name used as the message prefix.
pub const SERVICE_NAME: &str = "Calendly";

/// Build the error for a non-success response.
///
/// The message reads `Calendly API error (<status>): <title>`, followed by
/// ` - <message>` and ` | Details: <param: message, ...>` when the body has them.
/// Fields are read one at a time: a missing or mistyped field is skipped without
/// losing the others. A body that is not JSON falls back to a generic title.
pub fn normalize_response(status: u16, body: &str) -> ApiError {
    let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);

    let title = text_field(&parsed, "title")
        .unwrap_or_else(|| format!("Request failed with status code {status}"));

    let mut message = format!("{SERVICE_NAME} API error ({status}): {title}");

    if let Some(secondary) = text_field(&parsed, "message") {
        message.push_str(" - ");
        message.push_str(&secondary);
    }

    let details: Vec<String> = parsed
        .get("details")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter(|d| d.is_object())
                .map(|d| {
                    format!(
                        "{}: {}",
                        text_field(d, "parameter").unwrap_or_default(),
                        text_field(d, "message").unwrap_or_default()
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    if !details.is_empty() {
        message.push_str(" | Details: ");
        message.push_str(&details.join(", "));
    }

    ApiError::Response { status, message }
}

/// Non-empty string form of `value[key]`; numbers and booleans are stringified.
fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Build the error for a request that never got a response.
pub fn normalize_transport(err: &reqwest::Error) -> ApiError {
    let mut cause = err.to_string();
    if let Some(source) = std::error::Error::source(err) {
        let source = source.to_string();
        if !cause.contains(&source) {
            cause.push_str(": ");
            cause.push_str(&source);
        }
    }
    ApiError::Network(cause)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_error_body() {
        let body = json!({
            "title": "Invalid Argument",
            "message": "The supplied parameters are invalid.",
            "details": [
                {"parameter": "email", "message": "is invalid"},
                {"parameter": "organization", "message": "is required"}
            ]
        })
        .to_string();

        let err = normalize_response(400, &body);

        assert_eq!(err.status(), Some(400));
        insta::assert_snapshot!(err.to_string(), @"Calendly API error (400): Invalid Argument - The supplied parameters are invalid. | Details: email: is invalid, organization: is required");
    }

    #[test]
    fn test_title_only() {
        let err = normalize_response(404, r#"{"title": "Resource Not Found"}"#);
        assert_eq!(err.to_string(), "Calendly API error (404): Resource Not Found");
    }

    #[test]
    fn test_title_and_message() {
        let err = normalize_response(
            403,
            r#"{"title": "Permission Denied", "message": "You do not have permission"}"#,
        );
        assert_eq!(
            err.to_string(),
            "Calendly API error (403): Permission Denied - You do not have permission"
        );
    }

    #[test]
    fn test_non_json_body_uses_fallback() {
        let err = normalize_response(502, "<html>Bad Gateway</html>");
        assert_eq!(
            err.to_string(),
            "Calendly API error (502): Request failed with status code 502"
        );
    }

    #[test]
    fn test_empty_details_are_omitted() {
        let err = normalize_response(429, r#"{"title": "Too Many Requests", "details": []}"#);
        assert!(!err.to_string().contains("Details"));
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_null_details_keep_title_and_message() {
        let err = normalize_response(
            400,
            r#"{"title": "Invalid Argument", "message": "bad", "details": null}"#,
        );
        assert_eq!(err.to_string(), "Calendly API error (400): Invalid Argument - bad");
    }

    #[test]
    fn test_mistyped_detail_fields_are_tolerated() {
        let body = json!({
            "title": "Invalid Argument",
            "details": [
                {"parameter": "count", "message": 5},
                "not an object",
                {"parameter": "email"}
            ]
        })
        .to_string();

        let err = normalize_response(400, &body);

        assert_eq!(
            err.to_string(),
            "Calendly API error (400): Invalid Argument | Details: count: 5, email: "
        );
    }

    #[test]
    fn test_non_string_title_falls_back() {
        let err = normalize_response(500, r#"{"title": {"nested": true}, "message": "boom"}"#);
        assert_eq!(
            err.to_string(),
            "Calendly API error (500): Request failed with status code 500 - boom"
        );
    }
}
