// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Partial-update requests sent to the remote thermostat.
//!
//! A write carries exactly one changed field plus the authorization token.
//! Sending the full document would clobber changes made remotely to the
//! other fields in the meantime.
//!
//! # Examples
//!
//! ```
//! use thermobridge::command::UpdateCommand;
//! use thermobridge::types::TargetHeatingCoolingState;
//!
//! let cmd = UpdateCommand::TargetHeatingCoolingState(TargetHeatingCoolingState::Cool);
//! assert_eq!(
//!     cmd.to_body("token"),
//!     serde_json::json!({ "target_heat_cool_state": "cool", "api_key": "token" })
//! );
//! ```

use serde_json::{Map, Value};

use crate::characteristic::{Characteristic, CharacteristicValue};
use crate::error::{Error, ValueError};
use crate::response::field;
use crate::types::{TargetHeatingCoolingState, TemperatureDisplayUnits};

/// Key under which the authorization token travels.
pub const API_KEY_FIELD: &str = "api_key";

/// A single-field update of the remote thermostat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateCommand {
    /// Change the setpoint, in degrees Celsius.
    TargetTemperature(f64),
    /// Change the requested operating mode.
    TargetHeatingCoolingState(TargetHeatingCoolingState),
    /// Change the display unit.
    TemperatureDisplayUnits(TemperatureDisplayUnits),
}

impl UpdateCommand {
    /// Translates a host-encoded write into a remote update.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedOperation` for read-only characteristics
    /// and `Error::Value` if the value cannot be translated.
    pub fn from_host(
        characteristic: Characteristic,
        value: CharacteristicValue,
    ) -> Result<Self, Error> {
        let command = match characteristic {
            Characteristic::TargetTemperature => {
                Self::TargetTemperature(value.as_temperature()?)
            }
            Characteristic::TargetHeatingCoolingState => Self::TargetHeatingCoolingState(
                TargetHeatingCoolingState::from_host_code(value.as_code(characteristic)?)?,
            ),
            Characteristic::TemperatureDisplayUnits => Self::TemperatureDisplayUnits(
                TemperatureDisplayUnits::from_host_code(value.as_code(characteristic)?)?,
            ),
            Characteristic::CurrentTemperature | Characteristic::CurrentHeatingCoolingState => {
                return Err(Error::UnsupportedOperation {
                    characteristic,
                    operation: "set",
                });
            }
        };
        Ok(command)
    }

    /// Creates a setpoint update.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NonFiniteTemperature` for NaN or infinity.
    pub fn target_temperature(celsius: f64) -> Result<Self, ValueError> {
        CharacteristicValue::Float(celsius)
            .as_temperature()
            .map(Self::TargetTemperature)
    }

    /// Returns the characteristic this update changes.
    #[must_use]
    pub const fn characteristic(&self) -> Characteristic {
        match self {
            Self::TargetTemperature(_) => Characteristic::TargetTemperature,
            Self::TargetHeatingCoolingState(_) => Characteristic::TargetHeatingCoolingState,
            Self::TemperatureDisplayUnits(_) => Characteristic::TemperatureDisplayUnits,
        }
    }

    /// Returns the remote field name.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::TargetTemperature(_) => field::TARGET_TEMP,
            Self::TargetHeatingCoolingState(_) => field::TARGET_HEAT_COOL_STATE,
            Self::TemperatureDisplayUnits(_) => field::TEMP_DISPLAY_UNITS,
        }
    }

    /// Returns the value in the remote vocabulary.
    #[must_use]
    pub fn value(&self) -> Value {
        match self {
            Self::TargetTemperature(celsius) => Value::from(*celsius),
            Self::TargetHeatingCoolingState(state) => Value::from(state.as_str()),
            Self::TemperatureDisplayUnits(units) => Value::from(units.as_str()),
        }
    }

    /// Builds the request body: the changed field plus the token.
    #[must_use]
    pub fn to_body(&self, api_key: &str) -> Value {
        let mut body = Map::with_capacity(2);
        body.insert(self.field().to_string(), self.value());
        body.insert(API_KEY_FIELD.to_string(), Value::from(api_key));
        Value::Object(body)
    }
}
