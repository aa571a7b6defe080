// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device user configuration.

use serde::Deserialize;

use crate::error::{ParseError, ValueError};

/// User configuration of a device.
///
/// # Examples
///
/// ```
/// use shellor_lib::DeviceConfig;
///
/// let config = DeviceConfig::default();
/// assert_eq!(config.low_battery(), 20);
///
/// let config = DeviceConfig::default().with_low_battery(10).unwrap();
/// assert_eq!(config.low_battery(), 10);
///
/// assert!(DeviceConfig::default().with_low_battery(120).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceConfig {
    #[serde(default = "DeviceConfig::default_low_battery")]
    low_battery: u8,
}

impl DeviceConfig {
    /// Default low battery threshold in percent.
    pub const DEFAULT_LOW_BATTERY: u8 = 20;

    fn default_low_battery() -> u8 {
        Self::DEFAULT_LOW_BATTERY
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] on malformed JSON and
    /// [`ParseError::UnexpectedFormat`] when the threshold exceeds 100 %.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let config: Self = serde_json::from_str(json)?;
        if config.low_battery > 100 {
            return Err(ParseError::UnexpectedFormat(format!(
                "low_battery must be a percentage, got {}",
                config.low_battery
            )));
        }
        Ok(config)
    }

    /// Sets the low battery threshold in percent.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::OutOfRange`] if the threshold exceeds 100.
    pub fn with_low_battery(mut self, percent: u8) -> Result<Self, ValueError> {
        if percent > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::from(percent),
            });
        }
        self.low_battery = percent;
        Ok(self)
    }

    /// Returns the battery level below which the battery is reported low.
    #[must_use]
    pub fn low_battery(&self) -> u8 {
        self.low_battery
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            low_battery: Self::DEFAULT_LOW_BATTERY,
        }
    }
}
