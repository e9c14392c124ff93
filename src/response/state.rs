// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Remote state document parsing.

use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ParseError, ValueError};
use crate::types::{CurrentHeatingCoolingState, TargetHeatingCoolingState, TemperatureDisplayUnits};

/// Remote field names.
pub(crate) mod field {
    pub const CURRENT_TEMP: &str = "current_temp";
    pub const TARGET_TEMP: &str = "target_temp";
    pub const TARGET_HEAT_COOL_STATE: &str = "target_heat_cool_state";
    pub const CURRENT_HEAT_COOL_STATE: &str = "current_heat_cool_state";
    pub const TEMP_DISPLAY_UNITS: &str = "temp_display_units";
}

/// The state document returned by `GET {thermostat_api}`.
///
/// The remote reports:
///
/// ```json
/// {
///     "current_temp": 21.5,
///     "target_temp": 22.0,
///     "target_heat_cool_state": "heat",
///     "current_heat_cool_state": "off",
///     "temp_display_units": "celsius"
/// }
/// ```
///
/// No field is guaranteed present. Fields are kept as raw JSON so that
/// only the requested one is validated: a broken `temp_display_units`
/// does not prevent reading `current_temp`. Accessors fail with a
/// [`ParseError`] instead of falling back to a default.
///
/// # Examples
///
/// ```
/// use thermobridge::response::RemoteStateDocument;
///
/// let doc = RemoteStateDocument::from_body(r#"{"current_temp": 21.5}"#).unwrap();
/// assert_eq!(doc.current_temperature().unwrap(), 21.5);
/// assert!(doc.target_temperature().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteStateDocument {
    #[serde(default, deserialize_with = "present")]
    current_temp: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    target_temp: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    target_heat_cool_state: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    current_heat_cool_state: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    temp_display_units: Option<Value>,
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only an absent key is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl RemoteStateDocument {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the body is not JSON, or
    /// `ParseError::NotAnObject` if it is JSON but not an object.
    pub fn from_body(body: &str) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    /// Decodes an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::NotAnObject` if `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self, ParseError> {
        if !value.is_object() {
            return Err(ParseError::NotAnObject(json_type(&value)));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Returns `current_temp` in degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the field is missing or not a number.
    pub fn current_temperature(&self) -> Result<f64, ParseError> {
        number(self.current_temp.as_ref(), field::CURRENT_TEMP)
    }

    /// Returns `target_temp` in degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the field is missing or not a number.
    pub fn target_temperature(&self) -> Result<f64, ParseError> {
        number(self.target_temp.as_ref(), field::TARGET_TEMP)
    }

    /// Returns `target_heat_cool_state`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the field is missing, not a string, or not
    /// one of `off`, `heat`, `cool`, `auto`.
    pub fn target_heating_cooling_state(&self) -> Result<TargetHeatingCoolingState, ParseError> {
        variant(self.target_heat_cool_state.as_ref(), field::TARGET_HEAT_COOL_STATE)
    }

    /// Returns `current_heat_cool_state`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the field is missing, not a string, or not
    /// one of `off`, `heat`, `cool`.
    pub fn current_heating_cooling_state(&self) -> Result<CurrentHeatingCoolingState, ParseError> {
        variant(self.current_heat_cool_state.as_ref(), field::CURRENT_HEAT_COOL_STATE)
    }

    /// Returns `temp_display_units`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the field is missing, not a string, or not
    /// one of `celsius`, `fahrenheit`.
    pub fn temperature_display_units(&self) -> Result<TemperatureDisplayUnits, ParseError> {
        variant(self.temp_display_units.as_ref(), field::TEMP_DISPLAY_UNITS)
    }
}

fn number(value: Option<&Value>, name: &'static str) -> Result<f64, ParseError> {
    value
        .ok_or(ParseError::MissingField(name))?
        .as_f64()
        .ok_or(ParseError::WrongType {
            field: name,
            expected: "number",
        })
}

fn variant<T>(value: Option<&Value>, name: &'static str) -> Result<T, ParseError>
where
    T: FromStr<Err = ValueError>,
{
    let raw = value
        .ok_or(ParseError::MissingField(name))?
        .as_str()
        .ok_or(ParseError::WrongType {
            field: name,
            expected: "string",
        })?;
    raw.parse().map_err(|_| ParseError::UnknownVariant {
        field: name,
        value: raw.to_string(),
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
