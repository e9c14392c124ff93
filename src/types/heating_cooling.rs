// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heating/cooling mode types.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// The mode the thermostat is asked to operate in.
///
/// # Examples
///
/// ```
/// use thermobridge::types::TargetHeatingCoolingState;
///
/// let mode = TargetHeatingCoolingState::from_host_code(2).unwrap();
/// assert_eq!(mode, TargetHeatingCoolingState::Cool);
/// assert_eq!(mode.as_str(), "cool");
/// assert_eq!("auto".parse::<TargetHeatingCoolingState>().unwrap().host_code(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetHeatingCoolingState {
    /// Heating and cooling disabled.
    Off,
    /// Heat to the target temperature.
    Heat,
    /// Cool to the target temperature.
    Cool,
    /// Heat or cool as needed.
    Auto,
}

impl TargetHeatingCoolingState {
    /// All variants in host-code order.
    pub const ALL: [Self; 4] = [Self::Off, Self::Heat, Self::Cool, Self::Auto];

    /// Returns the remote vocabulary string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Heat => "heat",
            Self::Cool => "cool",
            Self::Auto => "auto",
        }
    }

    /// Returns the host numeric code.
    #[must_use]
    pub const fn host_code(&self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Heat => 1,
            Self::Cool => 2,
            Self::Auto => 3,
        }
    }

    /// Translates a host numeric code.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` for codes above 3.
    pub const fn from_host_code(code: u8) -> Result<Self, ValueError> {
        match code {
            0 => Ok(Self::Off),
            1 => Ok(Self::Heat),
            2 => Ok(Self::Cool),
            3 => Ok(Self::Auto),
            _ => Err(ValueError::OutOfRange {
                characteristic: "TargetHeatingCoolingState",
                max: 3,
                actual: code,
            }),
        }
    }
}

impl fmt::Display for TargetHeatingCoolingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetHeatingCoolingState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "heat" => Ok(Self::Heat),
            "cool" => Ok(Self::Cool),
            "auto" => Ok(Self::Auto),
            _ => Err(ValueError::UnknownName {
                kind: "target heating/cooling state",
                value: s.to_string(),
            }),
        }
    }
}

/// The mode the thermostat is currently running in.
///
/// Unlike [`TargetHeatingCoolingState`] there is no `auto`: the equipment
/// is either idle, heating or cooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrentHeatingCoolingState {
    /// Idle.
    Off,
    /// Heating.
    Heat,
    /// Cooling.
    Cool,
}

impl CurrentHeatingCoolingState {
    /// All variants in host-code order.
    pub const ALL: [Self; 3] = [Self::Off, Self::Heat, Self::Cool];

    /// Returns the remote vocabulary string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Heat => "heat",
            Self::Cool => "cool",
        }
    }

    /// Returns the host numeric code.
    #[must_use]
    pub const fn host_code(&self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Heat => 1,
            Self::Cool => 2,
        }
    }

    /// Translates a host numeric code.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` for codes above 2.
    pub const fn from_host_code(code: u8) -> Result<Self, ValueError> {
        match code {
            0 => Ok(Self::Off),
            1 => Ok(Self::Heat),
            2 => Ok(Self::Cool),
            _ => Err(ValueError::OutOfRange {
                characteristic: "CurrentHeatingCoolingState",
                max: 2,
                actual: code,
            }),
        }
    }
}

impl fmt::Display for CurrentHeatingCoolingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrentHeatingCoolingState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "heat" => Ok(Self::Heat),
            "cool" => Ok(Self::Cool),
            _ => Err(ValueError::UnknownName {
                kind: "current heating/cooling state",
                value: s.to_string(),
            }),
        }
    }
}
