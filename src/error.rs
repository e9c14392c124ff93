// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the thermostat bridge.
//!
//! Failures fall into three families that the host treats differently:
//!
//! - [`ConfigError`]: the accessory configuration is unusable. Fatal at
//!   construction time; the accessory must not be registered.
//! - [`ProtocolError`]: the remote thermostat could not be reached or
//!   refused the request (transport failure, non-2xx status, timeout).
//! - [`ParseError`]: the remote answered, but the state document does not
//!   honour the expected contract (missing field, wrong type, unknown
//!   enumeration value).
//!
//! Protocol and parse errors both surface to the host as an unavailable
//! characteristic, but are kept apart so diagnostics can tell a network
//! problem from a contract mismatch.

use thiserror::Error;

use crate::characteristic::Characteristic;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The bridge configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The remote thermostat is unavailable.
    #[error("remote unavailable: {0}")]
    Protocol(#[from] ProtocolError),

    /// The remote thermostat returned a malformed state document.
    #[error("malformed remote state: {0}")]
    Parse(#[from] ParseError),

    /// A host-encoded value could not be translated for the remote.
    #[error("invalid value: {0}")]
    Value(#[from] ValueError),

    /// The characteristic does not support the requested operation.
    #[error("{operation} is not supported by {characteristic}")]
    UnsupportedOperation {
        /// The characteristic that was addressed.
        characteristic: Characteristic,
        /// The operation that was attempted (`get` or `set`).
        operation: &'static str,
    },
}

impl Error {
    /// Returns `true` if the remote could not be reached or refused the request.
    #[must_use]
    pub fn is_remote_unavailable(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }

    /// Returns `true` if the remote answered with a document that violates
    /// the expected contract.
    #[must_use]
    pub fn is_malformed_remote_state(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Returns a stable short name for the error family.
    ///
    /// Used as the `kind` field in log events.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration_error",
            Self::Protocol(_) => "remote_unavailable",
            Self::Parse(_) => "malformed_remote_state",
            Self::Value(_) => "invalid_value",
            Self::UnsupportedOperation { .. } => "unsupported_operation",
        }
    }
}

/// Errors raised while validating the bridge configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field is absent from the host configuration.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A required field is present but empty.
    #[error("field must not be empty: {0}")]
    EmptyField(&'static str),

    /// The endpoint URL is not an absolute HTTP(S) URL.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// The request timeout, in milliseconds, is zero or above the maximum.
    #[error("request timeout must be between 1 ms and 5 minutes, got {0} ms")]
    InvalidTimeout(u64),

    /// The host configuration document could not be decoded.
    #[error("cannot decode accessory configuration: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Errors related to communicating with the remote thermostat.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed at the transport level.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote answered with a non-success status.
    #[error("HTTP {status} - {reason}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Canonical reason phrase, or `Unknown`.
        reason: String,
    },

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The HTTP client could not be created.
    #[error("cannot create HTTP client: {0}")]
    ClientBuild(String),
}

/// Errors related to decoding the remote state document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The response body is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response body is JSON but not an object.
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// Expected field is missing from the document.
    #[error("missing field in response: {0}")]
    MissingField(&'static str),

    /// Field is present with the wrong JSON type.
    #[error("field {field} should be a {expected}")]
    WrongType {
        /// The offending field.
        field: &'static str,
        /// The expected JSON type.
        expected: &'static str,
    },

    /// An enumeration field carries a value outside the known vocabulary.
    #[error("unknown value {value:?} for {field}")]
    UnknownVariant {
        /// The offending field.
        field: &'static str,
        /// The value the remote reported.
        value: String,
    },
}

/// Errors raised when a host-encoded value cannot be translated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A numeric code is outside the characteristic's valid range.
    #[error("code {actual} is out of range [0, {max}] for {characteristic}")]
    OutOfRange {
        /// The characteristic the code was meant for.
        characteristic: &'static str,
        /// Highest valid code.
        max: u8,
        /// The code that was provided.
        actual: u8,
    },

    /// A temperature is NaN or infinite.
    #[error("temperature must be finite, got {0}")]
    NonFiniteTemperature(f64),

    /// The value has the wrong shape for the characteristic.
    #[error("{characteristic} expects a {expected} value")]
    WrongFormat {
        /// The characteristic the value was meant for.
        characteristic: &'static str,
        /// The expected value format.
        expected: &'static str,
    },

    /// A remote vocabulary string is not recognised.
    #[error("unknown {kind}: {value:?}")]
    UnknownName {
        /// The vocabulary being parsed.
        kind: &'static str,
        /// The rejected string.
        value: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
