// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `thermobridge` - expose a remote HTTP thermostat as a smart-home accessory.
//!
//! The bridge maps the host's thermostat characteristics onto a single
//! remote HTTP endpoint:
//!
//! - every characteristic read issues `GET {thermostat_api}` and extracts
//!   one field of the returned state document;
//! - every characteristic write issues `POST {thermostat_api}` carrying the
//!   single changed field plus the `api_key`.
//!
//! Enumerations are translated between the remote's string vocabulary
//! (`"heat"`, `"fahrenheit"`, ...) and the host's numeric codes through
//! fixed tables in [`types`]. Nothing is cached: the remote is the only
//! source of truth and the bridge holds no mutable state.
//!
//! # Errors
//!
//! Failures are reported per operation and never retried:
//!
//! - [`Error::Config`]: invalid configuration, raised at construction.
//! - [`Error::Protocol`]: remote unavailable (transport, non-2xx, timeout).
//! - [`Error::Parse`]: malformed remote state (missing field, wrong type,
//!   unknown enumeration value).
//!
//! # Quick Start
//!
//! ```no_run
//! use thermobridge::{ThermostatAccessory, TargetHeatingCoolingState};
//!
//! # async fn example() -> thermobridge::Result<()> {
//! let accessory = ThermostatAccessory::from_json(serde_json::json!({
//!     "accessory": "rpi-thermostat",
//!     "name": "Hallway",
//!     "thermostat_api": "http://192.168.1.20:5000/thermostat",
//!     "api_key": "s3cret"
//! }))?;
//!
//! let bridge = accessory.bridge();
//! println!("{} °C", bridge.current_temperature().await?);
//! bridge
//!     .set_target_heating_cooling_state(TargetHeatingCoolingState::Heat)
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod accessory;
pub mod characteristic;
pub mod command;
mod config;
pub mod error;
pub mod protocol;
pub mod response;
pub mod service;
pub mod types;

pub use accessory::{ThermostatAccessory, ThermostatBridge};
pub use characteristic::{Characteristic, CharacteristicValue};
pub use command::UpdateCommand;
pub use config::{ACCESSORY_IDENTIFIER, BridgeConfig};
pub use error::{ConfigError, Error, ParseError, ProtocolError, Result, ValueError};
#[cfg(feature = "http")]
pub use protocol::HttpClient;
pub use protocol::{RemoteThermostat, StateResponse};
pub use response::RemoteStateDocument;
pub use service::ThermostatService;
pub use types::{CurrentHeatingCoolingState, TargetHeatingCoolingState, TemperatureDisplayUnits};
