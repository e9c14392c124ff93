// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The thermostat accessory registered with the host.
//!
//! Construction validates the configuration, creates the remote client and
//! registers one handler per characteristic operation on a
//! [`ThermostatService`]. No network call happens until the host invokes a
//! handler.
//!
//! | Characteristic | get | set |
//! |----------------|-----|-----|
//! | `CurrentTemperature` | yes | |
//! | `TargetTemperature` | yes | yes |
//! | `TargetHeatingCoolingState` | yes | yes |
//! | `CurrentHeatingCoolingState` | yes | |
//! | `TemperatureDisplayUnits` | yes | yes |
//!
//! ```no_run
//! use thermobridge::characteristic::Characteristic;
//! use thermobridge::{BridgeConfig, ThermostatAccessory};
//!
//! # async fn example() -> thermobridge::Result<()> {
//! let config = BridgeConfig::new("http://192.168.1.20:5000/thermostat", "s3cret");
//! let accessory = ThermostatAccessory::new(config)?;
//!
//! let service = &accessory.services()[0];
//! let current = service.get(Characteristic::CurrentTemperature).await?;
//! println!("{current}");
//! # Ok(())
//! # }
//! ```

mod bridge;

pub use bridge::ThermostatBridge;

use std::sync::Arc;

use crate::characteristic::Characteristic;
use crate::config::BridgeConfig;
use crate::error::Result;
use crate::protocol::RemoteThermostat;
use crate::service::ThermostatService;

#[cfg(feature = "http")]
use crate::protocol::HttpClient;

/// A thermostat accessory bridging host characteristics to a remote endpoint.
#[derive(Debug)]
pub struct ThermostatAccessory<P: RemoteThermostat + 'static> {
    config: BridgeConfig,
    bridge: Arc<ThermostatBridge<P>>,
    services: [ThermostatService; 1],
}

#[cfg(feature = "http")]
impl ThermostatAccessory<HttpClient> {
    /// Creates an accessory talking HTTP to `config.thermostat_api()`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration is invalid and
    /// `Error::Protocol` if the HTTP client cannot be created.
    pub fn new(config: BridgeConfig) -> Result<Self> {
        let client = HttpClient::from_config(&config)?;
        Self::assemble(config, client)
    }

    /// Creates an accessory from the host's JSON accessory block.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new), plus `Error::Config` if the block cannot
    /// be decoded.
    pub fn from_json(block: serde_json::Value) -> Result<Self> {
        Self::new(BridgeConfig::from_json(block)?)
    }
}

impl<P: RemoteThermostat + 'static> ThermostatAccessory<P> {
    /// Creates an accessory backed by a custom remote implementation.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration is invalid.
    pub fn with_remote(config: BridgeConfig, remote: P) -> Result<Self> {
        config.validate()?;
        Self::assemble(config, remote)
    }

    /// Wires the bridge and service for an already validated configuration.
    fn assemble(config: BridgeConfig, remote: P) -> Result<Self> {
        let bridge = Arc::new(ThermostatBridge::new(config.name(), remote));
        let service = register_handlers(config.name(), &bridge)?;

        tracing::debug!(
            accessory = %config.name(),
            endpoint = %config.thermostat_api(),
            characteristics = service.characteristics().len(),
            "Thermostat accessory created"
        );

        Ok(Self {
            config,
            bridge,
            services: [service],
        })
    }

    /// Returns the configuration the accessory was built from.
    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.config.name()
    }

    /// Returns the typed operations.
    #[must_use]
    pub fn bridge(&self) -> &ThermostatBridge<P> {
        &self.bridge
    }

    /// Returns the services exposed to the host.
    ///
    /// Always a single thermostat service.
    #[must_use]
    pub fn services(&self) -> &[ThermostatService] {
        &self.services
    }
}

fn register_handlers<P: RemoteThermostat + 'static>(
    name: &str,
    bridge: &Arc<ThermostatBridge<P>>,
) -> Result<ThermostatService> {
    let mut service = ThermostatService::new(name);

    for characteristic in Characteristic::ALL {
        let getter = Arc::clone(bridge);
        service.on_get(characteristic, move || {
            let bridge = Arc::clone(&getter);
            async move { bridge.get_value(characteristic).await }
        });

        if characteristic.is_writable() {
            let setter = Arc::clone(bridge);
            service.on_set(characteristic, move |value| {
                let bridge = Arc::clone(&setter);
                async move { bridge.set_value(characteristic, value).await }
            })?;
        }
    }

    Ok(service)
}
