// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration types.

use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

/// Canonical origin of every Calendly resource identifier.
pub const CALENDLY_API_ORIGIN: &str = "https://api.calendly.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Below this many remaining calls the client waits for the window to reset.
pub const DEFAULT_RATE_LIMIT_THRESHOLD: u64 = 10;

/// Optimistic budget assumed until the first response reports the real one.
pub const DEFAULT_INITIAL_REMAINING: u64 = 1000;

/// Bearer credential for the Calendly API.
///
/// Both variants are sent the same way; the distinction only records where the
/// value came from. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// OAuth access token (`CALENDLY_ACCESS_TOKEN`).
    AccessToken(String),
    /// Personal access token (`CALENDLY_API_KEY`).
    ApiKey(String),
}

impl Credential {
    /// The raw bearer value.
    pub fn token(&self) -> &str {
        match self {
            Self::AccessToken(t) | Self::ApiKey(t) => t,
        }
    }

    /// Name of the environment variable this credential came from.
    pub fn source(&self) -> &'static str {
        match self {
            Self::AccessToken(_) => "CALENDLY_ACCESS_TOKEN",
            Self::ApiKey(_) => "CALENDLY_API_KEY",
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({}, <redacted>)", self.source())
    }
}

/// Rate-limit policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Wait for the reset once `remaining` drops below this.
    pub threshold: u64,
    /// Budget assumed at startup.
    pub initial_remaining: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_RATE_LIMIT_THRESHOLD,
            initial_remaining: DEFAULT_INITIAL_REMAINING,
        }
    }
}

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bearer credential.
    pub credential: Credential,
    /// Where requests are sent. Usually the same as [`CALENDLY_API_ORIGIN`].
    pub base_url: String,
    /// Origin stripped from resource identifiers before dereferencing them.
    pub resource_origin: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Rate-limit policy.
    pub rate_limit: RateLimitConfig,
}

impl ServerConfig {
    /// Create a config with defaults for everything but the credential.
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            base_url: CALENDLY_API_ORIGIN.to_string(),
            resource_origin: CALENDLY_API_ORIGIN.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            rate_limit: RateLimitConfig::default(),
        }
    }

    /// Send requests somewhere else (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the rate-limit policy.
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Reject values the client cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::invalid("base_url", "must be an http(s) URL"));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::invalid("timeout", "must be greater than zero"));
        }
        Ok(())
    }
}
