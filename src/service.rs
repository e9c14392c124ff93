// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat service and its characteristic handlers.
//!
//! The host drives an accessory through get/set handlers registered per
//! characteristic. Handlers are plain closures over shared immutable state,
//! so the host may invoke them concurrently without coordination.
//!
//! # Examples
//!
//! ```
//! use thermobridge::characteristic::{Characteristic, CharacteristicValue};
//! use thermobridge::service::ThermostatService;
//!
//! # async fn example() -> thermobridge::Result<()> {
//! let mut service = ThermostatService::new("Hallway");
//! service.on_get(Characteristic::CurrentTemperature, || async {
//!     Ok(CharacteristicValue::Float(21.5))
//! });
//!
//! let value = service.get(Characteristic::CurrentTemperature).await?;
//! assert_eq!(value, CharacteristicValue::Float(21.5));
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::characteristic::{Characteristic, CharacteristicValue};
use crate::error::{Error, Result};

/// A boxed future returned by characteristic handlers.
pub type HandlerFuture<T> = Pin<Box<dyn Future<Output = Result<T>> + Send>>;

/// Type alias for get handlers.
type GetHandler = Arc<dyn Fn() -> HandlerFuture<CharacteristicValue> + Send + Sync>;

/// Type alias for set handlers.
type SetHandler = Arc<dyn Fn(CharacteristicValue) -> HandlerFuture<()> + Send + Sync>;

/// A thermostat service exposed to the host.
///
/// Holds at most one get handler and one set handler per characteristic.
/// Registering again replaces the previous handler.
#[derive(Clone)]
pub struct ThermostatService {
    name: String,
    get_handlers: HashMap<Characteristic, GetHandler>,
    set_handlers: HashMap<Characteristic, SetHandler>,
}

impl ThermostatService {
    /// Creates a service with no handlers.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            get_handlers: HashMap::new(),
            set_handlers: HashMap::new(),
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers the read handler for a characteristic.
    pub fn on_get<F, Fut>(&mut self, characteristic: Characteristic, handler: F) -> &mut Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<CharacteristicValue>> + Send + 'static,
    {
        let handler: GetHandler =
            Arc::new(move || -> HandlerFuture<CharacteristicValue> { Box::pin(handler()) });
        self.get_handlers.insert(characteristic, handler);
        self
    }

    /// Registers the write handler for a characteristic.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedOperation` if the characteristic is read-only.
    pub fn on_set<F, Fut>(&mut self, characteristic: Characteristic, handler: F) -> Result<&mut Self>
    where
        F: Fn(CharacteristicValue) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        if !characteristic.is_writable() {
            return Err(Error::UnsupportedOperation {
                characteristic,
                operation: "set",
            });
        }
        let handler: SetHandler =
            Arc::new(move |value: CharacteristicValue| -> HandlerFuture<()> { Box::pin(handler(value)) });
        self.set_handlers.insert(characteristic, handler);
        Ok(self)
    }

    /// Returns `true` if a read handler is registered.
    #[must_use]
    pub fn has_get_handler(&self, characteristic: Characteristic) -> bool {
        self.get_handlers.contains_key(&characteristic)
    }

    /// Returns `true` if a write handler is registered.
    #[must_use]
    pub fn has_set_handler(&self, characteristic: Characteristic) -> bool {
        self.set_handlers.contains_key(&characteristic)
    }

    /// Returns the characteristics that have a read handler.
    #[must_use]
    pub fn characteristics(&self) -> Vec<Characteristic> {
        Characteristic::ALL
            .into_iter()
            .filter(|c| self.get_handlers.contains_key(c))
            .collect()
    }

    /// Invokes the read handler for a characteristic.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedOperation` if no handler is registered,
    /// otherwise whatever the handler fails with.
    pub async fn get(&self, characteristic: Characteristic) -> Result<CharacteristicValue> {
        let handler = self
            .get_handlers
            .get(&characteristic)
            .ok_or(Error::UnsupportedOperation {
                characteristic,
                operation: "get",
            })?;
        handler().await
    }

    /// Invokes the write handler for a characteristic.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedOperation` if no handler is registered,
    /// otherwise whatever the handler fails with.
    pub async fn set(&self, characteristic: Characteristic, value: CharacteristicValue) -> Result<()> {
        let handler = self
            .set_handlers
            .get(&characteristic)
            .ok_or(Error::UnsupportedOperation {
                characteristic,
                operation: "set",
            })?;
        handler(value).await
    }
}

impl fmt::Debug for ThermostatService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut gets: Vec<_> = self.get_handlers.keys().map(Characteristic::name).collect();
        let mut sets: Vec<_> = self.set_handlers.keys().map(Characteristic::name).collect();
        gets.sort_unstable();
        sets.sort_unstable();
        f.debug_struct("ThermostatService")
            .field("name", &self.name)
            .field("get_handlers", &gets)
            .field("set_handlers", &sets)
            .finish()
    }
}
