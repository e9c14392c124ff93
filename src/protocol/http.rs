// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the remote thermostat.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, Response};

use crate::command::UpdateCommand;
use crate::config::BridgeConfig;
use crate::error::{self, ProtocolError};
use crate::protocol::{RemoteThermostat, StateResponse};

/// HTTP client for a remote thermostat endpoint.
///
/// Cloning is cheap: clones share the same connection pool. Every request
/// is bounded by the configured timeout.
///
/// # Examples
///
/// ```no_run
/// use thermobridge::BridgeConfig;
/// use thermobridge::protocol::{HttpClient, RemoteThermostat};
///
/// # async fn example() -> thermobridge::Result<()> {
/// let config = BridgeConfig::new("http://192.168.1.20:5000/thermostat", "s3cret");
/// let client = HttpClient::from_config(&config)?;
/// let state = client.fetch_state().await?.parse()?;
/// println!("{}", state.current_temperature()?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HttpClient {
    endpoint: String,
    api_key: String,
    timeout: Duration,
    client: Client,
}

impl HttpClient {
    /// Creates a client from a bridge configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration fails
    /// [`BridgeConfig::validate`] and `Error::Protocol` if the HTTP client
    /// cannot be created.
    pub fn from_config(config: &BridgeConfig) -> error::Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ProtocolError::ClientBuild(e.to_string()))?;

        Ok(Self {
            endpoint: config.thermostat_api().trim().to_string(),
            api_key: config.api_key().to_string(),
            timeout: config.timeout(),
            client,
        })
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn map_transport_error(&self, err: reqwest::Error) -> ProtocolError {
        if err.is_timeout() {
            ProtocolError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
        } else {
            ProtocolError::Http(err)
        }
    }

    fn check_status(response: &Response) -> Result<(), ProtocolError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(ProtocolError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        })
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl RemoteThermostat for HttpClient {
    async fn fetch_state(&self) -> Result<StateResponse, ProtocolError> {
        tracing::debug!(url = %self.endpoint, "Fetching thermostat state");

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        Self::check_status(&response)?;

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        tracing::debug!(body = %body, "Received thermostat state");

        Ok(StateResponse::new(body))
    }

    async fn send_update(&self, command: UpdateCommand) -> Result<(), ProtocolError> {
        tracing::debug!(
            url = %self.endpoint,
            field = command.field(),
            value = %command.value(),
            "Sending thermostat update"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&command.to_body(&self.api_key))
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        Self::check_status(&response)
    }
}
