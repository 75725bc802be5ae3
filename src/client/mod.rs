// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Calendly REST API client.
//!
//! Every operation goes through the same pipeline:
//!
//! 1. wait for the [`RateLimiter`] gate
//! 2. build the request (identifier → path, flat query map, JSON body)
//! 3. send it with the bearer credential and a fixed timeout
//! 4. record the rate-limit headers of whatever came back
//! 5. return the `resource` (or the whole page for list calls), or an [`ApiError`]
//!
//! Nothing is retried. A failure reaches the caller as a normalized error and the
//! caller decides whether to issue the call again.
//!
//! # API Reference
//!
//! See [Calendly API v2](https://developer.calendly.com/api-docs) for details.

pub mod addressing;
mod endpoints;
pub mod errors;
pub mod rate_limit;

pub use addressing::ResourceAddressing;
pub use endpoints::*;
pub use rate_limit::{RateBudget, RateLimiter};

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;

#[cfg(feature = "telemetry")]
use std::time::Instant;
#[cfg(feature = "telemetry")]
use tracing::{debug, instrument};

#[cfg(feature = "telemetry")]
use crate::telemetry::metrics::GLOBAL_METRICS;

use crate::config::ServerConfig;
use crate::error::{ApiError, ConfigError};
use crate::types::Page;

/// Flat query string parameters, sent in order.
pub type QueryParams = Vec<(String, String)>;

/// One outgoing call.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: QueryParams,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Create a request without query or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Append query parameters.
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query.extend(query);
        self
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Client for the Calendly API.
///
/// Cheap to share behind an `Arc`; the rate budget lives inside and is updated by
/// every call made through this instance.
pub struct CalendlyClient {
    http: Client,
    base_url: String,
    addressing: ResourceAddressing,
    rate_limiter: Arc<RateLimiter>,
}

impl CalendlyClient {
    /// Create a client from a resolved configuration.
    pub fn new(config: &ServerConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.credential.token()))
            .map_err(|_| ConfigError::invalid(config.credential.source(), "not a valid header value"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .user_agent(concat!("calendly-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            addressing: ResourceAddressing::new(config.resource_origin.clone()),
            rate_limiter: Arc::new(RateLimiter::new(config.rate_limit)),
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Identifier → path conversion used by this client.
    pub fn addressing(&self) -> &ResourceAddressing {
        &self.addressing
    }

    /// Shared rate-limit state.
    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.rate_limiter
    }

    /// Issue a request and return the decoded body (`None` for empty bodies).
    #[cfg_attr(
        feature = "telemetry",
        instrument(skip(self, request), fields(method = %request.method, path = %request.path))
    )]
    pub async fn execute(&self, request: ApiRequest) -> Result<Option<Value>, ApiError> {
        self.rate_limiter.acquire().await;

        #[cfg(feature = "telemetry")]
        let start = Instant::now();
        #[cfg(feature = "telemetry")]
        let operation = format!("calendly.{}", request.method.as_str().to_lowercase());

        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.http.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                #[cfg(feature = "telemetry")]
                GLOBAL_METRICS.record_request(&operation, start.elapsed(), false);
                return Err(errors::normalize_transport(&e));
            }
        };

        self.rate_limiter.update_from_headers(response.headers());

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| errors::normalize_transport(&e))?;

        #[cfg(feature = "telemetry")]
        {
            GLOBAL_METRICS.record_request(&operation, start.elapsed(), status.is_success());
            debug!(
                status = status.as_u16(),
                remaining = self.rate_limiter.budget().remaining,
                "Calendly response"
            );
        }

        if !status.is_success() {
            return Err(errors::normalize_response(status.as_u16(), &text));
        }

        if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// GET a single resource and unwrap its `resource` field.
    pub async fn get_resource(&self, path: &str) -> Result<Value, ApiError> {
        let body = self.execute(ApiRequest::new(Method::GET, path)).await?;
        take_resource(body)
    }

    /// GET one page of a collection.
    pub async fn get_page(&self, path: &str, query: QueryParams) -> Result<Page, ApiError> {
        let body = self
            .execute(ApiRequest::new(Method::GET, path).with_query(query))
            .await?
            .ok_or_else(|| ApiError::Decode("empty body for collection".to_string()))?;
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send a write and return the `resource` it produced, if any.
    pub async fn write_resource<B>(&self, method: Method, path: &str, body: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        let response = self
            .execute(ApiRequest::new(method, path).with_body(body))
            .await?;
        Ok(match response {
            Some(Value::Object(mut map)) => map.remove("resource").unwrap_or(Value::Object(map)),
            Some(other) => other,
            None => Value::Null,
        })
    }

    /// DELETE a resource.
    pub async fn delete_resource(&self, path: &str) -> Result<(), ApiError> {
        self.execute(ApiRequest::new(Method::DELETE, path)).await?;
        Ok(())
    }

    /// Dereference any identifier the service handed out.
    pub async fn get_by_uri(&self, uri: &str) -> Result<Value, ApiError> {
        self.get_resource(self.addressing.to_path(uri)).await
    }
}

/// Unwrap the `resource` field of a single-resource response.
fn take_resource(body: Option<Value>) -> Result<Value, ApiError> {
    match body {
        Some(Value::Object(mut map)) => map
            .remove("resource")
            .ok_or_else(|| ApiError::Decode("response has no `resource` field".to_string())),
        Some(_) => Err(ApiError::Decode("response is not a JSON object".to_string())),
        None => Err(ApiError::Decode("empty response body".to_string())),
    }
}

/// Flatten a serializable parameter struct into query pairs.
///
/// Nulls (unset options) are dropped; scalars are sent as their JSON text
/// (`true`, `25`) and strings verbatim.
pub fn query_pairs<P>(params: &P) -> QueryParams
where
    P: Serialize + ?Sized,
{
    match serde_json::to_value(params) {
        Ok(Value::Object(map)) => map
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(s) => Some((key, s)),
                other => Some((key, other.to_string())),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Build query pairs from a scoping parameter followed by optional filters.
pub fn scoped_query<P>(scope: &str, value: &str, params: &P) -> QueryParams
where
    P: Serialize + ?Sized,
{
    let mut query = vec![(scope.to_string(), value.to_string())];
    query.extend(query_pairs(params));
    query
}
