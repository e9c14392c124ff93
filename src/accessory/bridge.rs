// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed thermostat operations backed by a remote endpoint.

use crate::characteristic::{Characteristic, CharacteristicValue};
use crate::command::UpdateCommand;
use crate::error::{Error, ParseError, Result};
use crate::protocol::RemoteThermostat;
use crate::response::RemoteStateDocument;
use crate::types::{CurrentHeatingCoolingState, TargetHeatingCoolingState, TemperatureDisplayUnits};

/// Mapping layer between characteristic operations and the remote endpoint.
///
/// Each read fetches the full remote document and extracts one field; each
/// write sends one field. The bridge keeps no copy of the remote state, so
/// reads are never stale and concurrent calls never contend.
#[derive(Debug)]
pub struct ThermostatBridge<P: RemoteThermostat> {
    name: String,
    remote: P,
}

impl<P: RemoteThermostat> ThermostatBridge<P> {
    pub(crate) fn new(name: impl Into<String>, remote: P) -> Self {
        Self {
            name: name.into(),
            remote,
        }
    }

    /// Returns the accessory display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the underlying remote endpoint.
    #[must_use]
    pub fn remote(&self) -> &P {
        &self.remote
    }

    // ========== Reads ==========

    /// Reads the measured temperature in degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the remote is unreachable and
    /// `Error::Parse` if `current_temp` is missing or not a number.
    pub async fn current_temperature(&self) -> Result<f64> {
        self.read(
            Characteristic::CurrentTemperature,
            RemoteStateDocument::current_temperature,
        )
        .await
    }

    /// Reads the setpoint in degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the remote is unreachable and
    /// `Error::Parse` if `target_temp` is missing or not a number.
    pub async fn target_temperature(&self) -> Result<f64> {
        self.read(
            Characteristic::TargetTemperature,
            RemoteStateDocument::target_temperature,
        )
        .await
    }

    /// Reads the requested operating mode.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the remote is unreachable and
    /// `Error::Parse` if `target_heat_cool_state` is missing or unknown.
    pub async fn target_heating_cooling_state(&self) -> Result<TargetHeatingCoolingState> {
        self.read(
            Characteristic::TargetHeatingCoolingState,
            RemoteStateDocument::target_heating_cooling_state,
        )
        .await
    }

    /// Reads the actual operating mode.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the remote is unreachable and
    /// `Error::Parse` if `current_heat_cool_state` is missing or unknown.
    pub async fn current_heating_cooling_state(&self) -> Result<CurrentHeatingCoolingState> {
        self.read(
            Characteristic::CurrentHeatingCoolingState,
            RemoteStateDocument::current_heating_cooling_state,
        )
        .await
    }

    /// Reads the display unit.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the remote is unreachable and
    /// `Error::Parse` if `temp_display_units` is missing or unknown.
    pub async fn temperature_display_units(&self) -> Result<TemperatureDisplayUnits> {
        self.read(
            Characteristic::TemperatureDisplayUnits,
            RemoteStateDocument::temperature_display_units,
        )
        .await
    }

    // ========== Writes ==========

    /// Changes the setpoint.
    ///
    /// Success means the remote accepted the request; the new value is not
    /// read back.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for a non-finite temperature and
    /// `Error::Protocol` if the remote rejects or cannot receive the update.
    pub async fn set_target_temperature(&self, celsius: f64) -> Result<()> {
        let command = UpdateCommand::target_temperature(celsius)
            .map_err(|e| self.report(Characteristic::TargetTemperature, "set", e.into()))?;
        self.write(command).await
    }

    /// Changes the requested operating mode.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the remote rejects or cannot receive the update.
    pub async fn set_target_heating_cooling_state(
        &self,
        state: TargetHeatingCoolingState,
    ) -> Result<()> {
        self.write(UpdateCommand::TargetHeatingCoolingState(state))
            .await
    }

    /// Changes the display unit.
    ///
    /// # Errors
    ///
    /// Returns `Error::Protocol` if the remote rejects or cannot receive the update.
    pub async fn set_temperature_display_units(&self, units: TemperatureDisplayUnits) -> Result<()> {
        self.write(UpdateCommand::TemperatureDisplayUnits(units))
            .await
    }

    // ========== Host-encoded access ==========

    /// Reads a characteristic in the host's encoding.
    ///
    /// # Errors
    ///
    /// Same as the typed read for `characteristic`.
    pub async fn get_value(&self, characteristic: Characteristic) -> Result<CharacteristicValue> {
        let value = match characteristic {
            Characteristic::CurrentTemperature => self.current_temperature().await?.into(),
            Characteristic::TargetTemperature => self.target_temperature().await?.into(),
            Characteristic::TargetHeatingCoolingState => {
                self.target_heating_cooling_state().await?.into()
            }
            Characteristic::CurrentHeatingCoolingState => {
                self.current_heating_cooling_state().await?.into()
            }
            Characteristic::TemperatureDisplayUnits => {
                self.temperature_display_units().await?.into()
            }
        };
        Ok(value)
    }

    /// Writes a characteristic from the host's encoding.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedOperation` for read-only characteristics,
    /// `Error::Value` if the code is out of range or has the wrong format,
    /// and `Error::Protocol` if the remote rejects the update.
    pub async fn set_value(
        &self,
        characteristic: Characteristic,
        value: CharacteristicValue,
    ) -> Result<()> {
        let command = UpdateCommand::from_host(characteristic, value)
            .map_err(|e| self.report(characteristic, "set", e))?;
        self.write(command).await
    }

    // ========== Internals ==========

    async fn read<T, F>(&self, characteristic: Characteristic, extract: F) -> Result<T>
    where
        T: std::fmt::Debug,
        F: FnOnce(&RemoteStateDocument) -> std::result::Result<T, ParseError>,
    {
        let result = async {
            let response = self.remote.fetch_state().await?;
            let document = response.parse()?;
            Ok::<_, Error>(extract(&document)?)
        }
        .await;

        match result {
            Ok(value) => {
                tracing::debug!(
                    accessory = %self.name,
                    characteristic = %characteristic,
                    field = characteristic.remote_field(),
                    value = ?value,
                    "get"
                );
                Ok(value)
            }
            Err(e) => Err(self.report(characteristic, "get", e)),
        }
    }

    async fn write(&self, command: UpdateCommand) -> Result<()> {
        let characteristic = command.characteristic();
        match self.remote.send_update(command).await {
            Ok(()) => {
                tracing::debug!(
                    accessory = %self.name,
                    characteristic = %characteristic,
                    field = command.field(),
                    value = %command.value(),
                    "set"
                );
                Ok(())
            }
            Err(e) => Err(self.report(characteristic, "set", e.into())),
        }
    }

    fn report(&self, characteristic: Characteristic, operation: &'static str, err: Error) -> Error {
        tracing::warn!(
            accessory = %self.name,
            characteristic = %characteristic,
            operation,
            kind = err.kind(),
            error = %err,
            "Characteristic operation failed"
        );
        err
    }
}
