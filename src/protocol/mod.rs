// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport to the remote thermostat.
//!
//! The remote exposes a single endpoint:
//!
//! - `GET {thermostat_api}` returns the full state document.
//! - `POST {thermostat_api}` with `{<field>: <value>, "api_key": <token>}`
//!   changes one field. Any 2xx status means the write was accepted; the
//!   body is ignored.
//!
//! [`HttpClient`] is the production implementation. The accessory is
//! generic over [`RemoteThermostat`] so other transports can be plugged in.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpClient;

use std::future::Future;

use crate::command::UpdateCommand;
use crate::error::{ParseError, ProtocolError};
use crate::response::RemoteStateDocument;

/// Raw state response from the remote thermostat.
#[derive(Debug, Clone)]
pub struct StateResponse {
    body: String,
}

impl StateResponse {
    /// Creates a state response with the given body.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the body as a state document.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the body is not a JSON object.
    pub fn parse(&self) -> Result<RemoteStateDocument, ParseError> {
        RemoteStateDocument::from_body(&self.body)
    }
}

/// A remote thermostat endpoint.
///
/// Implementations must be safe to call concurrently: the host may query
/// several characteristics at once and every call is independent.
pub trait RemoteThermostat: Send + Sync {
    /// Fetches the full state document.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` on transport failure, timeout, or a
    /// non-success status.
    fn fetch_state(&self) -> impl Future<Output = Result<StateResponse, ProtocolError>> + Send;

    /// Sends a single-field update.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` on transport failure, timeout, or a
    /// non-success status.
    fn send_update(
        &self,
        command: UpdateCommand,
    ) -> impl Future<Output = Result<(), ProtocolError>> + Send;
}
