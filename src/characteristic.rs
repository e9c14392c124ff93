// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-side characteristic model.
//!
//! The host platform addresses thermostat attributes as characteristics and
//! exchanges their values in its own numeric encoding. This module names the
//! characteristics the bridge serves and the value shapes it accepts.

use std::fmt;

use crate::error::ValueError;
use crate::response::field;
use crate::types::{CurrentHeatingCoolingState, TargetHeatingCoolingState, TemperatureDisplayUnits};

/// A thermostat characteristic served by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Characteristic {
    /// Measured temperature (read-only).
    CurrentTemperature,
    /// Setpoint temperature.
    TargetTemperature,
    /// Requested operating mode.
    TargetHeatingCoolingState,
    /// Actual operating mode (read-only).
    CurrentHeatingCoolingState,
    /// Preferred display unit.
    TemperatureDisplayUnits,
}

impl Characteristic {
    /// All characteristics of the thermostat service.
    pub const ALL: [Self; 5] = [
        Self::CurrentTemperature,
        Self::TargetTemperature,
        Self::TargetHeatingCoolingState,
        Self::CurrentHeatingCoolingState,
        Self::TemperatureDisplayUnits,
    ];

    /// Returns the host platform's name for this characteristic.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CurrentTemperature => "CurrentTemperature",
            Self::TargetTemperature => "TargetTemperature",
            Self::TargetHeatingCoolingState => "TargetHeatingCoolingState",
            Self::CurrentHeatingCoolingState => "CurrentHeatingCoolingState",
            Self::TemperatureDisplayUnits => "TemperatureDisplayUnits",
        }
    }

    /// Returns the field of the remote state document backing this characteristic.
    #[must_use]
    pub const fn remote_field(&self) -> &'static str {
        match self {
            Self::CurrentTemperature => field::CURRENT_TEMP,
            Self::TargetTemperature => field::TARGET_TEMP,
            Self::TargetHeatingCoolingState => field::TARGET_HEAT_COOL_STATE,
            Self::CurrentHeatingCoolingState => field::CURRENT_HEAT_COOL_STATE,
            Self::TemperatureDisplayUnits => field::TEMP_DISPLAY_UNITS,
        }
    }

    /// Returns `true` if the host may write this characteristic.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        matches!(
            self,
            Self::TargetTemperature | Self::TargetHeatingCoolingState | Self::TemperatureDisplayUnits
        )
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value in the host's encoding.
///
/// Temperatures are floats in degrees Celsius; modes and units are small
/// unsigned codes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CharacteristicValue {
    /// A floating point value.
    Float(f64),
    /// An enumeration code.
    UInt8(u8),
}

impl CharacteristicValue {
    /// Interprets the value as a temperature.
    ///
    /// Integer codes are widened so a host that sends whole degrees is
    /// still accepted.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NonFiniteTemperature` for NaN or infinity.
    pub fn as_temperature(&self) -> Result<f64, ValueError> {
        let value = match *self {
            Self::Float(v) => v,
            Self::UInt8(v) => f64::from(v),
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ValueError::NonFiniteTemperature(value))
        }
    }

    /// Interprets the value as an enumeration code for `characteristic`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::WrongFormat` if the value is a float.
    pub fn as_code(&self, characteristic: Characteristic) -> Result<u8, ValueError> {
        match *self {
            Self::UInt8(v) => Ok(v),
            Self::Float(_) => Err(ValueError::WrongFormat {
                characteristic: characteristic.name(),
                expected: "uint8",
            }),
        }
    }
}

impl fmt::Display for CharacteristicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v}"),
            Self::UInt8(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for CharacteristicValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<TargetHeatingCoolingState> for CharacteristicValue {
    fn from(value: TargetHeatingCoolingState) -> Self {
        Self::UInt8(value.host_code())
    }
}

impl From<CurrentHeatingCoolingState> for CharacteristicValue {
    fn from(value: CurrentHeatingCoolingState) -> Self {
        Self::UInt8(value.host_code())
    }
}

impl From<TemperatureDisplayUnits> for CharacteristicValue {
    fn from(value: TemperatureDisplayUnits) -> Self {
        Self::UInt8(value.host_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writable_characteristics() {
        let writable: Vec<_> = Characteristic::ALL
            .into_iter()
            .filter(Characteristic::is_writable)
            .collect();
        assert_eq!(
            writable,
            vec![
                Characteristic::TargetTemperature,
                Characteristic::TargetHeatingCoolingState,
                Characteristic::TemperatureDisplayUnits,
            ]
        );
    }

    #[test]
    fn remote_fields() {
        assert_eq!(Characteristic::CurrentTemperature.remote_field(), "current_temp");
        assert_eq!(
            Characteristic::TemperatureDisplayUnits.remote_field(),
            "temp_display_units"
        );
    }

    #[test]
    fn temperature_accepts_whole_degrees() {
        assert!((CharacteristicValue::UInt8(20).as_temperature().unwrap() - 20.0).abs() < f64::EPSILON);
        assert!((CharacteristicValue::Float(21.5).as_temperature().unwrap() - 21.5).abs() < f64::EPSILON);
    }

    #[test]
    fn temperature_rejects_nan() {
        let err = CharacteristicValue::Float(f64::NAN).as_temperature().unwrap_err();
        assert!(matches!(err, ValueError::NonFiniteTemperature(_)));
    }

    #[test]
    fn code_rejects_float() {
        let err = CharacteristicValue::Float(1.0)
            .as_code(Characteristic::TargetHeatingCoolingState)
            .unwrap_err();
        assert_eq!(
            err,
            ValueError::WrongFormat {
                characteristic: "TargetHeatingCoolingState",
                expected: "uint8",
            }
        );
    }

    #[test]
    fn enum_values_use_host_codes() {
        assert_eq!(
            CharacteristicValue::from(TargetHeatingCoolingState::Cool),
            CharacteristicValue::UInt8(2)
        );
        assert_eq!(
            CharacteristicValue::from(TemperatureDisplayUnits::Fahrenheit),
            CharacteristicValue::UInt8(1)
        );
    }
}
