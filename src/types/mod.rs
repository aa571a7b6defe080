// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit conversions and value helpers used when normalizing device status.
//!
//! # Helpers
//!
//! - [`TemperatureUnit`], [`to_celsius`] - Fahrenheit/Celsius normalization
//! - [`watt_minutes_to_kwh`], [`watt_hours_to_kwh`] - Energy counters to kWh
//! - [`power_factor`] - Power factor with a noise floor
//! - [`signal_strength`] - Wi-Fi RSSI to a 0-4 quality bucket
//! - [`device_timestamp`] - Device wall-clock epochs to zoned timestamps

mod energy;
mod signal;
mod temperature;
mod timestamp;

pub use energy::{POWER_FACTOR_NOISE_FLOOR, power_factor, watt_hours_to_kwh, watt_minutes_to_kwh};
pub use signal::signal_strength;
pub use temperature::{TemperatureUnit, fahrenheit_to_celsius, to_celsius};
pub use timestamp::{device_timestamp, now_in, parse_timezone, resolve_timezone};
