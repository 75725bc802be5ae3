// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Tracing and metrics infrastructure.
//!
//! - **Tracing**: structured logs on stderr, one `tool` span per dispatched call
//! - **Metrics**: per-tool and per-method Calendly request counts, failures and latency
//!
//! # Usage
//!
//! ```rust,ignore
//! use calendly_mcp::telemetry::{init_telemetry, TelemetryConfig, GLOBAL_METRICS};
//!
//! init_telemetry(&TelemetryConfig::default())?;
//! // ... serve ...
//! tracing::debug!("{}", GLOBAL_METRICS.snapshot().format_report());
//! ```
//!
//! Fields recorded on spans and events carry tool names, methods, paths and status
//! codes. Credentials and request bodies are never logged.

mod init;
pub mod metrics;

pub use init::{init_telemetry, TelemetryConfig};
pub use metrics::{CallStats, Metrics, MetricsSnapshot, GLOBAL_METRICS};
