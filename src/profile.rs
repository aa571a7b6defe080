// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Immutable device profile.
//!
//! A profile is built once per device session at connect time from the
//! device family and the device's `/settings` payload, and is read-only
//! afterwards.
//!
//! # Examples
//!
//! ```
//! use shellor_lib::{DeviceKind, DeviceProfile};
//!
//! let profile = DeviceProfile::new(DeviceKind::Relay { relays: 2 });
//! assert_eq!(profile.meter_group(0), "meter1");
//! assert_eq!(profile.control_group(1), "relay2");
//!
//! let plug = DeviceProfile::new(DeviceKind::Relay { relays: 1 });
//! assert_eq!(plug.meter_group(0), "meter");
//! ```

use serde::Deserialize;

use crate::capabilities::{Capabilities, DeviceKind};
use crate::channel::group;
use crate::error::ParseError;
use crate::status::null_as_empty;

/// Static description of one device instance.
#[derive(Debug, Clone)]
pub struct DeviceProfile {
    kind: DeviceKind,
    capabilities: Capabilities,
    settings: DeviceSettings,
}

impl DeviceProfile {
    /// Creates a profile with the family's default capabilities.
    #[must_use]
    pub fn new(kind: DeviceKind) -> Self {
        Self {
            kind,
            capabilities: kind.capabilities(),
            settings: DeviceSettings::default(),
        }
    }

    /// Replaces the capabilities.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Sets the device settings.
    #[must_use]
    pub fn with_settings(mut self, settings: DeviceSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the device family.
    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Returns the capability flags.
    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Returns the device settings.
    #[must_use]
    pub fn settings(&self) -> &DeviceSettings {
        &self.settings
    }

    /// Returns the configured IANA timezone, empty when unset.
    #[must_use]
    pub fn timezone(&self) -> &str {
        self.settings.timezone.as_deref().unwrap_or_default()
    }

    /// Returns the channel group of meter `index` (zero-based).
    ///
    /// Devices with a single meter use the plain `meter` group.
    #[must_use]
    pub fn meter_group(&self, index: usize) -> String {
        if self.capabilities.num_meters > 1 {
            format!("{}{}", group::METER, index + 1)
        } else {
            group::METER.to_string()
        }
    }

    /// Returns the primary control group of output `index` (zero-based).
    #[must_use]
    pub fn control_group(&self, index: usize) -> String {
        let caps = &self.capabilities;
        let numbered = |prefix: &str, count: u8| {
            if count > 1 {
                format!("{prefix}{}", index + 1)
            } else {
                prefix.to_string()
            }
        };

        if caps.is_dimmer {
            group::LIGHT.to_string()
        } else if caps.is_roller {
            numbered(group::ROLLER, caps.num_rollers)
        } else if caps.has_relays {
            numbered(group::RELAY, caps.num_relays)
        } else if caps.is_light {
            numbered(group::LIGHT, caps.num_relays)
        } else if caps.is_button {
            group::STATUS.to_string()
        } else if caps.is_sensor {
            group::SENSOR.to_string()
        } else {
            numbered(group::STATUS, caps.num_inputs)
        }
    }
}

/// Raw device settings relevant to status normalization.
///
/// Deserialized from the device's `/settings` payload; unknown keys are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceSettings {
    /// IANA timezone of the device clock.
    #[serde(default)]
    pub timezone: Option<String>,

    /// Calibration state; present only on devices that support calibration.
    #[serde(default)]
    pub calibrated: Option<bool>,

    /// `1` when the device is configured as externally powered.
    #[serde(default)]
    pub external_power: Option<i32>,

    /// Thermostat settings of radiator valves.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub thermostats: Vec<ThermostatSettings>,
}

impl DeviceSettings {
    /// Parses a settings payload.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] if the payload is not valid JSON or has
    /// fields of the wrong type.
    pub fn from_json(payload: &str) -> Result<Self, ParseError> {
        serde_json::from_str(payload).map_err(ParseError::from)
    }
}

/// Stored thermostat settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThermostatSettings {
    /// Default boost duration in minutes.
    #[serde(default)]
    pub boost_minutes: Option<u32>,
}
