// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration module for the Calendly MCP server.
//!
//! The only required input is a bearer credential from the environment:
//! - `CALENDLY_ACCESS_TOKEN` (OAuth), preferred when set
//! - `CALENDLY_API_KEY` (personal access token)
//!
//! Everything else (base URL, timeout, rate-limit policy) has a default and can be
//! overridden from the command line.

mod loader;
mod types;

pub use loader::{load_config_with, resolve_credential, ACCESS_TOKEN_ENV, API_KEY_ENV};

pub use types::{
    Credential, RateLimitConfig, ServerConfig, CALENDLY_API_ORIGIN, DEFAULT_INITIAL_REMAINING,
    DEFAULT_RATE_LIMIT_THRESHOLD, DEFAULT_TIMEOUT_SECS,
};
