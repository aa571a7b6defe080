// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature units and Celsius normalization.
//!
//! Devices report temperatures in the unit configured on the device
//! (`"C"` or `"F"`). Every temperature channel is written in Celsius.
//!
//! # Examples
//!
//! ```
//! use shellor_lib::types::{TemperatureUnit, fahrenheit_to_celsius, to_celsius};
//!
//! assert_eq!(fahrenheit_to_celsius(212.0), 100.0);
//! assert_eq!(to_celsius(21.5, TemperatureUnit::Celsius), 21.5);
//! assert_eq!(TemperatureUnit::from_device("f"), TemperatureUnit::Fahrenheit);
//! ```

use std::fmt;

/// Temperature unit as reported by a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    /// Degrees Celsius.
    #[default]
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

impl TemperatureUnit {
    /// Parses the unit string of a device payload.
    ///
    /// Matching is case-insensitive. Anything other than `"F"` is treated as
    /// Celsius, including an empty string for devices that omit the unit.
    #[must_use]
    pub fn from_device(unit: &str) -> Self {
        if unit.trim().eq_ignore_ascii_case("F") {
            Self::Fahrenheit
        } else {
            Self::Celsius
        }
    }

    /// Returns the device representation of the unit.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts degrees Fahrenheit to degrees Celsius.
#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Normalizes a temperature in the given unit to Celsius.
#[must_use]
pub fn to_celsius(value: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => value,
        TemperatureUnit::Fahrenheit => fahrenheit_to_celsius(value),
    }
}
