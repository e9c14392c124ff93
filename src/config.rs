// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory configuration.
//!
//! The host hands each accessory a JSON block from its configuration file:
//!
//! ```json
//! {
//!     "accessory": "rpi-thermostat",
//!     "name": "Hallway",
//!     "thermostat_api": "http://192.168.1.20:5000/thermostat",
//!     "api_key": "s3cret",
//!     "timeout_ms": 5000
//! }
//! ```
//!
//! `thermostat_api` and `api_key` are required; `name` defaults to
//! `"Thermostat"` and `timeout_ms` to ten seconds.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Identifier under which the host registers this accessory type.
pub const ACCESSORY_IDENTIFIER: &str = "rpi-thermostat";

/// Immutable configuration of a thermostat bridge.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use thermobridge::BridgeConfig;
///
/// let config = BridgeConfig::new("http://192.168.1.20:5000/thermostat", "s3cret")
///     .with_name("Hallway")
///     .with_timeout(Duration::from_secs(5));
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.name(), "Hallway");
/// ```
#[derive(Clone, Deserialize)]
pub struct BridgeConfig {
    #[serde(default = "default_name")]
    name: String,
    #[serde(default)]
    thermostat_api: String,
    #[serde(default)]
    api_key: String,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
}

fn default_name() -> String {
    BridgeConfig::DEFAULT_NAME.to_string()
}

fn default_timeout_ms() -> u64 {
    duration_to_millis(BridgeConfig::DEFAULT_TIMEOUT)
}

/// Whole milliseconds in `timeout`, rounding a non-zero sub-millisecond
/// duration up to 1 and saturating at `u64::MAX`.
fn duration_to_millis(timeout: Duration) -> u64 {
    if timeout.is_zero() {
        return 0;
    }
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX).max(1)
}

impl BridgeConfig {
    /// Display name used when the host configuration omits one.
    pub const DEFAULT_NAME: &'static str = "Thermostat";
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Longest per-request timeout accepted by [`validate`](Self::validate).
    pub const MAX_TIMEOUT: Duration = Duration::from_secs(300);

    /// Creates a configuration for the given endpoint and token.
    #[must_use]
    pub fn new(thermostat_api: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            name: default_name(),
            thermostat_api: thermostat_api.into(),
            api_key: api_key.into(),
            timeout_ms: default_timeout_ms(),
        }
    }

    /// Decodes and validates a host accessory block.
    ///
    /// Missing `thermostat_api` or `api_key` keys are reported as
    /// [`ConfigError::MissingField`] rather than a decoding error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the block cannot be decoded or fails
    /// [`validate`](Self::validate).
    pub fn from_json(value: serde_json::Value) -> Result<Self, ConfigError> {
        if let Some(block) = value.as_object() {
            for field in ["thermostat_api", "api_key"] {
                if !block.contains_key(field) {
                    return Err(ConfigError::MissingField(field));
                }
            }
        }
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the per-request timeout.
    ///
    /// The timeout is kept in whole milliseconds; a non-zero duration below
    /// one millisecond becomes 1 ms.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = duration_to_millis(timeout);
        self
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the remote endpoint URL.
    #[must_use]
    pub fn thermostat_api(&self) -> &str {
        &self.thermostat_api
    }

    /// Returns the authorization token sent with every write.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Checks that the configuration can be used to build an accessory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the endpoint is empty or not an HTTP(S) URL,
    /// the token is empty, or the timeout is zero or longer than
    /// [`MAX_TIMEOUT`](Self::MAX_TIMEOUT).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.thermostat_api.trim();
        if url.is_empty() {
            return Err(ConfigError::EmptyField("thermostat_api"));
        }
        let has_host = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_host {
            return Err(ConfigError::InvalidUrl(self.thermostat_api.clone()));
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::EmptyField("api_key"));
        }
        if self.timeout_ms == 0 || self.timeout_ms > duration_to_millis(Self::MAX_TIMEOUT) {
            return Err(ConfigError::InvalidTimeout(self.timeout_ms));
        }
        Ok(())
    }
}

impl fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("name", &self.name)
            .field("thermostat_api", &self.thermostat_api)
            .field("api_key", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let config = BridgeConfig::new("http://thermostat.local/api", "key");
        assert_eq!(config.name(), "Thermostat");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_host_block() {
        let config = BridgeConfig::from_json(json!({
            "accessory": "rpi-thermostat",
            "name": "Hallway",
            "thermostat_api": "http://192.168.1.20:5000/thermostat",
            "api_key": "s3cret",
            "timeout_ms": 2500
        }))
        .unwrap();
        assert_eq!(config.name(), "Hallway");
        assert_eq!(config.thermostat_api(), "http://192.168.1.20:5000/thermostat");
        assert_eq!(config.api_key(), "s3cret");
        assert_eq!(config.timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn missing_endpoint_is_reported_by_name() {
        let err = BridgeConfig::from_json(json!({ "name": "x", "api_key": "k" })).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("thermostat_api")));
    }

    #[test]
    fn missing_key_is_reported_by_name() {
        let err =
            BridgeConfig::from_json(json!({ "thermostat_api": "http://t.local" })).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("api_key")));
    }

    #[test]
    fn wrong_type_is_a_decode_error() {
        let err = BridgeConfig::from_json(json!({
            "thermostat_api": 42,
            "api_key": "k"
        }))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Deserialize(_)));
    }

    #[test]
    fn empty_fields_rejected() {
        let err = BridgeConfig::new("  ", "key").validate().unwrap_err();
        assert!(matches!(err, ConfigError::EmptyField("thermostat_api")));

        let err = BridgeConfig::new("http://t.local", "").validate().unwrap_err();
        assert!(matches!(err, ConfigError::EmptyField("api_key")));
    }

    #[test]
    fn endpoint_must_be_http() {
        for url in ["thermostat.local/api", "ftp://t.local", "http://"] {
            let err = BridgeConfig::new(url, "key").validate().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidUrl(_)), "{url}");
        }
        assert!(BridgeConfig::new("https://t.local", "key").validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = BridgeConfig::new("http://t.local", "key")
            .with_timeout(Duration::ZERO)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(0)));
    }

    #[test]
    fn sub_millisecond_timeout_rounds_up() {
        let config = BridgeConfig::new("http://t.local", "key")
            .with_timeout(Duration::from_micros(500));
        assert_eq!(config.timeout(), Duration::from_millis(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn timeout_upper_bound() {
        let at_limit = BridgeConfig::new("http://t.local", "key")
            .with_timeout(BridgeConfig::MAX_TIMEOUT);
        assert!(at_limit.validate().is_ok());

        let err = BridgeConfig::new("http://t.local", "key")
            .with_timeout(Duration::MAX)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(u64::MAX)));

        let err = BridgeConfig::from_json(json!({
            "thermostat_api": "http://t.local",
            "api_key": "key",
            "timeout_ms": u64::MAX
        }))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = BridgeConfig::new("http://t.local", "s3cret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("<redacted>"));
    }
}
