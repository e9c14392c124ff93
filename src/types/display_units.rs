// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature display unit type.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// The unit a client app should use when showing temperatures.
///
/// This only affects presentation; temperatures themselves always travel
/// in degrees Celsius.
///
/// # Examples
///
/// ```
/// use thermobridge::types::TemperatureDisplayUnits;
///
/// assert_eq!(TemperatureDisplayUnits::Fahrenheit.host_code(), 1);
/// assert!("kelvin".parse::<TemperatureDisplayUnits>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemperatureDisplayUnits {
    /// Degrees Celsius.
    #[default]
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

impl TemperatureDisplayUnits {
    /// All variants in host-code order.
    pub const ALL: [Self; 2] = [Self::Celsius, Self::Fahrenheit];

    /// Returns the remote vocabulary string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        }
    }

    /// Returns the host numeric code.
    #[must_use]
    pub const fn host_code(&self) -> u8 {
        match self {
            Self::Celsius => 0,
            Self::Fahrenheit => 1,
        }
    }

    /// Translates a host numeric code.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` for codes above 1.
    pub const fn from_host_code(code: u8) -> Result<Self, ValueError> {
        match code {
            0 => Ok(Self::Celsius),
            1 => Ok(Self::Fahrenheit),
            _ => Err(ValueError::OutOfRange {
                characteristic: "TemperatureDisplayUnits",
                max: 1,
                actual: code,
            }),
        }
    }
}

impl fmt::Display for TemperatureDisplayUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemperatureDisplayUnits {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "celsius" => Ok(Self::Celsius),
            "fahrenheit" => Ok(Self::Fahrenheit),
            _ => Err(ValueError::UnknownName {
                kind: "temperature display unit",
                value: s.to_string(),
            }),
        }
    }
}
