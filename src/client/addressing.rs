// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Resource addressing.
//!
//! Calendly hands out absolute URIs (`https://api.calendly.com/users/ABC`) as resource
//! identifiers. To dereference one we strip the origin and request the remaining path
//! against whatever base URL the client is configured with. Identifiers are otherwise
//! opaque: no case folding, no slash handling, nothing is ever invented.

/// Converts resource identifiers into request paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAddressing {
    origin: String,
}

impl ResourceAddressing {
    /// Create an addressing scheme for the given origin.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    /// The origin stripped from identifiers.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Strip the origin from `identifier`.
    ///
    /// Identifiers without the origin (already-relative paths) pass through unchanged.
    pub fn to_path<'a>(&self, identifier: &'a str) -> &'a str {
        identifier
            .strip_prefix(self.origin.as_str())
            .unwrap_or(identifier)
    }

    /// Path of a sub-resource, e.g. `/scheduled_events/E1/cancellation`.
    pub fn child_path(&self, identifier: &str, segment: &str) -> String {
        format!("{}/{}", self.to_path(identifier), segment)
    }
}
