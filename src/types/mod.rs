// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the host and the remote thermostat.
//!
//! Each enumeration carries a fixed two-way table between the remote's
//! string vocabulary and the host's numeric code. Both directions are
//! written as exhaustive `match` expressions, so adding a variant without
//! extending the table fails to compile.
//!
//! | Type | Remote value | Host code |
//! |------|--------------|-----------|
//! | [`TargetHeatingCoolingState`] | `off` / `heat` / `cool` / `auto` | 0 / 1 / 2 / 3 |
//! | [`CurrentHeatingCoolingState`] | `off` / `heat` / `cool` | 0 / 1 / 2 |
//! | [`TemperatureDisplayUnits`] | `celsius` / `fahrenheit` | 0 / 1 |
//!
//! Temperatures are plain `f64` degrees Celsius on both sides.

mod display_units;
mod heating_cooling;

pub use display_units::TemperatureDisplayUnits;
pub use heating_cooling::{CurrentHeatingCoolingState, TargetHeatingCoolingState};
