// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration loading from the process environment.

use crate::error::ConfigError;

use super::types::{Credential, ServerConfig};

/// Environment variable holding an OAuth access token.
pub const ACCESS_TOKEN_ENV: &str = "CALENDLY_ACCESS_TOKEN";

/// Environment variable holding a personal access token.
pub const API_KEY_ENV: &str = "CALENDLY_API_KEY";

/// Resolve the bearer credential through an arbitrary variable lookup.
///
/// The access token wins when both are set. Blank values count as unset.
pub fn resolve_credential<F>(lookup: F) -> Result<Credential, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(token) = non_empty(ACCESS_TOKEN_ENV) {
        return Ok(Credential::AccessToken(token));
    }
    if let Some(key) = non_empty(API_KEY_ENV) {
        return Ok(Credential::ApiKey(key));
    }
    Err(ConfigError::MissingCredential)
}

/// Build a [`ServerConfig`] with defaults from an arbitrary variable lookup.
pub fn load_config_with<F>(lookup: F) -> Result<ServerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    resolve_credential(lookup).map(ServerConfig::new)
}

impl ServerConfig {
    /// Build a config with defaults from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_config_with(|name| std::env::var(name).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_credential() {
        let result = resolve_credential(lookup(&[]));
        assert!(matches!(result, Err(ConfigError::MissingCredential)));
    }

    #[test]
    fn test_api_key_only() {
        let cred = resolve_credential(lookup(&[(API_KEY_ENV, "pat")])).unwrap();
        assert_eq!(cred, Credential::ApiKey("pat".to_string()));
    }

    #[test]
    fn test_access_token_preferred() {
        let cred = resolve_credential(lookup(&[
            (API_KEY_ENV, "pat"),
            (ACCESS_TOKEN_ENV, "oauth"),
        ]))
        .unwrap();
        assert_eq!(cred, Credential::AccessToken("oauth".to_string()));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let cred = resolve_credential(lookup(&[(ACCESS_TOKEN_ENV, "  "), (API_KEY_ENV, "pat")]))
            .unwrap();
        assert_eq!(cred.token(), "pat");

        let result = resolve_credential(lookup(&[(API_KEY_ENV, "")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_defaults() {
        let config = load_config_with(lookup(&[(API_KEY_ENV, "pat")])).unwrap();
        assert_eq!(config.credential.token(), "pat");
        assert_eq!(config.base_url, "https://api.calendly.com");
    }
}
