// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! In-process call counters.
//!
//! Two tables, both keyed by name:
//!
//! - **tools**: one entry per dispatched tool (`list_events`, `cancel_event`, ...)
//! - **requests**: one entry per HTTP method sent to Calendly (`calendly.get`, ...)
//!
//! Nothing is exported; [`MetricsSnapshot::format_report`] is logged when the
//! server shuts down.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;

/// Process-wide counters.
pub static GLOBAL_METRICS: Lazy<Metrics> = Lazy::new(Metrics::new);

/// Counters for one tool or request kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallStats {
    pub calls: u64,
    pub failures: u64,
    pub total: Duration,
    pub max: Duration,
}

impl CallStats {
    fn record(&mut self, duration: Duration, success: bool) {
        self.calls += 1;
        if !success {
            self.failures += 1;
        }
        self.total += duration;
        self.max = self.max.max(duration);
    }

    /// Mean duration, zero before the first call.
    pub fn avg(&self) -> Duration {
        match u32::try_from(self.calls) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.total / n,
            Err(_) => Duration::from_secs_f64(self.total.as_secs_f64() / self.calls as f64),
        }
    }
}

/// Tool and request counters since startup.
#[derive(Debug)]
pub struct Metrics {
    tools: RwLock<BTreeMap<String, CallStats>>,
    requests: RwLock<BTreeMap<String, CallStats>>,
    started: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            tools: RwLock::new(BTreeMap::new()),
            requests: RwLock::new(BTreeMap::new()),
            started: Instant::now(),
        }
    }

    /// Count one dispatched tool call.
    pub fn record_tool(&self, name: &str, duration: Duration, success: bool) {
        record(&self.tools, name, duration, success);
    }

    /// Count one request sent to Calendly. `success` is false for transport
    /// failures and non-2xx answers.
    pub fn record_request(&self, name: &str, duration: Duration, success: bool) {
        record(&self.requests, name, duration, success);
    }

    /// Copy of every counter.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let read = |lock: &RwLock<BTreeMap<String, CallStats>>| {
            lock.read().unwrap_or_else(|e| e.into_inner()).clone()
        };
        MetricsSnapshot {
            tools: read(&self.tools),
            requests: read(&self.requests),
            uptime: self.started.elapsed(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

fn record(table: &RwLock<BTreeMap<String, CallStats>>, name: &str, duration: Duration, success: bool) {
    // A poisoned lock still holds consistent counters.
    let mut table = table.write().unwrap_or_else(|e| e.into_inner());
    table
        .entry(name.to_string())
        .or_default()
        .record(duration, success);
}

/// Counters at one point in time, sorted by name.
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub tools: BTreeMap<String, CallStats>,
    pub requests: BTreeMap<String, CallStats>,
    pub uptime: Duration,
}

impl MetricsSnapshot {
    /// Human-readable report, one line per entry.
    pub fn format_report(&self) -> String {
        let mut report = format!("calendly-mcp metrics (uptime {:.2?})\n", self.uptime);
        for (heading, table) in [("tools", &self.tools), ("requests", &self.requests)] {
            if table.is_empty() {
                continue;
            }
            report.push_str(heading);
            report.push_str(":\n");
            for (name, stats) in table {
                report.push_str(&format!(
                    "  {name}: {} calls, {} failed, avg {:.2?}, max {:.2?}\n",
                    stats.calls,
                    stats.failures,
                    stats.avg(),
                    stats.max
                ));
            }
        }
        report
    }
}
