// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device status snapshot (`GET /status`).

use serde::Deserialize;

use super::null_as_empty;
use crate::error::ParseError;

/// Internal temperature value devices report when no sensor is fitted.
pub const INVALID_TEMPERATURE: f64 = 999.0;

/// Point-in-time status payload of a device.
///
/// Every field is optional; absent sections simply produce no channel
/// updates.
///
/// # Examples
///
/// ```
/// use shellor_lib::status::DeviceStatus;
///
/// let json = r#"{
///     "uptime": 3600,
///     "wifi_sta": {"connected": true, "rssi": -65},
///     "meters": [{"power": 12.5, "is_valid": true, "total": 6000}]
/// }"#;
/// let status = DeviceStatus::from_json(json).unwrap();
///
/// assert_eq!(status.uptime, Some(3600));
/// assert_eq!(status.rssi(), Some(-65));
/// assert_eq!(status.meters.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceStatus {
    /// Seconds since boot.
    #[serde(default)]
    pub uptime: Option<u64>,

    /// Wi-Fi station information.
    #[serde(default)]
    pub wifi_sta: Option<WifiStation>,

    /// Generic internal temperature field.
    #[serde(default)]
    pub temperature: Option<f64>,

    /// Internal temperature sensor block.
    #[serde(default)]
    pub tmp: Option<InternalTemperature>,

    /// Sleep interval of battery devices in seconds.
    #[serde(default)]
    pub sleep_time: Option<u32>,

    /// Whether a firmware update is available.
    #[serde(default)]
    pub has_update: Option<bool>,

    /// Simple power meters, one per output.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub meters: Vec<Meter>,

    /// Polyphase energy meters, one per phase.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub emeters: Vec<EMeter>,

    /// Thermostats (radiator valves).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub thermostats: Vec<ThermostatStatus>,

    /// Digital inputs.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub inputs: Vec<InputStatus>,
}

impl DeviceStatus {
    /// Parses a status payload.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] if the payload is not valid JSON or has
    /// fields of the wrong type.
    pub fn from_json(payload: &str) -> Result<Self, ParseError> {
        serde_json::from_str(payload).map_err(ParseError::from)
    }

    /// Returns the Wi-Fi RSSI in dBm.
    #[must_use]
    pub fn rssi(&self) -> Option<i32> {
        self.wifi_sta.as_ref().and_then(|w| w.rssi)
    }

    /// Returns `true` if the payload carries any meter readings.
    #[must_use]
    pub fn has_meters(&self) -> bool {
        !self.meters.is_empty() || !self.emeters.is_empty()
    }
}

/// Wi-Fi station block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WifiStation {
    /// Whether the station is connected.
    #[serde(default)]
    pub connected: Option<bool>,

    /// SSID of the connected network.
    #[serde(default)]
    pub ssid: Option<String>,

    /// Signal strength in dBm.
    #[serde(default)]
    pub rssi: Option<i32>,
}

/// Internal temperature block of the status payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InternalTemperature {
    /// Temperature in Celsius.
    #[serde(rename = "tC", default)]
    pub celsius: Option<f64>,

    /// Temperature in Fahrenheit.
    #[serde(rename = "tF", default)]
    pub fahrenheit: Option<f64>,

    /// Whether the reading is valid.
    #[serde(default)]
    pub is_valid: Option<bool>,
}

/// Reading of a simple power meter.
///
/// Energy is counted in watt-minutes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meter {
    /// Instantaneous power in watts.
    #[serde(default)]
    pub power: Option<f64>,

    /// Whether the reading is meaningful.
    #[serde(default)]
    pub is_valid: Option<bool>,

    /// Device wall-clock timestamp of the reading.
    #[serde(default)]
    pub timestamp: Option<i64>,

    /// Average power over the last minutes, newest first.
    #[serde(default)]
    pub counters: Option<Vec<f64>>,

    /// Total energy in watt-minutes.
    #[serde(default)]
    pub total: Option<f64>,
}

impl Meter {
    /// Returns the device-reported validity flag, `false` when absent.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid.unwrap_or(false)
    }

    /// Returns the average power of the last minute.
    #[must_use]
    pub fn last_minute(&self) -> Option<f64> {
        self.counters.as_ref().map(|c| c.first().copied().unwrap_or(0.0))
    }
}

/// Reading of a polyphase energy meter.
///
/// Energy is counted in watt-hours.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EMeter {
    /// Active power in watts.
    #[serde(default)]
    pub power: Option<f64>,

    /// Reactive power.
    #[serde(default)]
    pub reactive: Option<f64>,

    /// Power factor, reported by some models only.
    #[serde(default)]
    pub pf: Option<f64>,

    /// Voltage in volts.
    #[serde(default)]
    pub voltage: Option<f64>,

    /// Current in amperes.
    #[serde(default)]
    pub current: Option<f64>,

    /// Whether the phase is enabled and measuring.
    #[serde(default)]
    pub is_valid: Option<bool>,

    /// Consumed energy in watt-hours.
    #[serde(default)]
    pub total: Option<f64>,

    /// Returned energy in watt-hours.
    #[serde(default)]
    pub total_returned: Option<f64>,
}

impl EMeter {
    /// Returns the device-reported validity flag, `false` when absent.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid.unwrap_or(false)
    }
}

/// Thermostat block of a radiator valve.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThermostatStatus {
    /// Valve position in percent, `-1` when unknown.
    #[serde(default)]
    pub pos: Option<f64>,

    /// Target temperature.
    #[serde(default)]
    pub target_t: Option<TargetTemperature>,

    /// Measured temperature.
    #[serde(default)]
    pub tmp: Option<ThermostatTemperature>,

    /// Whether the schedule is enabled.
    #[serde(default)]
    pub schedule: Option<bool>,

    /// Active schedule profile, zero-based.
    #[serde(default)]
    pub schedule_profile: Option<u32>,

    /// Remaining boost minutes.
    #[serde(default)]
    pub boost_minutes: Option<u32>,
}

/// Target temperature of a thermostat.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetTemperature {
    /// Whether the target temperature is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Target value.
    #[serde(default)]
    pub value: Option<f64>,

    /// Unit of the value (`"C"` or `"F"`).
    #[serde(default)]
    pub units: Option<String>,
}

/// Measured temperature of a thermostat.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThermostatTemperature {
    /// Measured value.
    #[serde(default)]
    pub value: Option<f64>,

    /// Unit of the value (`"C"` or `"F"`).
    #[serde(default)]
    pub units: Option<String>,

    /// Whether the reading is valid.
    #[serde(default)]
    pub is_valid: Option<bool>,
}

/// State of a digital input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputStatus {
    /// Input level, `1` when active.
    #[serde(default)]
    pub input: Option<u8>,

    /// Last button event (`S`, `L`, `SS`, ...).
    #[serde(default)]
    pub event: Option<String>,

    /// Event counter.
    #[serde(default)]
    pub event_cnt: Option<u32>,
}
