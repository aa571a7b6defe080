// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor status payload of battery-powered and sensor devices.

use serde::{Deserialize, Deserializer};

use super::null_as_empty;
use crate::error::ParseError;
use crate::types::TemperatureUnit;

/// Sensor payload fetched on every sensor update.
///
/// Different device families populate different sections: door/window
/// sensors report `sensor` and `lux`, H&T sensors `tmp` and `hum`, gas
/// detectors `gas_sensor` and `concentration`, and so on.
///
/// # Examples
///
/// ```
/// use shellor_lib::status::SensorStatus;
///
/// let json = r#"{
///     "sensor": {"state": "open", "is_valid": true},
///     "lux": {"value": 30, "illumination": "dark", "is_valid": true},
///     "bat": {"value": 87, "voltage": 5.9},
///     "act_reasons": ["sensor"]
/// }"#;
/// let sensor = SensorStatus::from_json(json).unwrap();
///
/// assert_eq!(sensor.battery_level(), Some(87.0));
/// assert_eq!(sensor.act_reasons, vec!["sensor".to_string()]);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SensorStatus {
    /// Reasons why the device woke up.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub act_reasons: Vec<String>,

    /// Contact or motion sensor block.
    #[serde(default)]
    pub sensor: Option<ContactSensor>,

    /// Sensor error code, `"0"` when healthy.
    #[serde(default, deserialize_with = "string_or_number")]
    pub sensor_error: Option<String>,

    /// Temperature reading.
    #[serde(default)]
    pub tmp: Option<SensorTemperature>,

    /// Relative humidity.
    #[serde(default)]
    pub hum: Option<Humidity>,

    /// Illuminance.
    #[serde(default)]
    pub lux: Option<Illuminance>,

    /// Accelerometer.
    #[serde(default)]
    pub accel: Option<Accelerometer>,

    /// Flood detector state.
    #[serde(default)]
    pub flood: Option<bool>,

    /// Smoke detector state.
    #[serde(default)]
    pub smoke: Option<bool>,

    /// Gas detector state.
    #[serde(default)]
    pub gas_sensor: Option<GasSensor>,

    /// Gas concentration.
    #[serde(default)]
    pub concentration: Option<GasConcentration>,

    /// Analog inputs.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub adcs: Vec<Adc>,

    /// Whether a charger is connected.
    #[serde(default)]
    pub charger: Option<bool>,

    /// Battery state.
    #[serde(default)]
    pub bat: Option<Battery>,

    /// Motion flag of devices without a `sensor` block.
    #[serde(default)]
    pub motion: Option<bool>,
}

impl SensorStatus {
    /// Parses a sensor payload.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] if the payload is not valid JSON or has
    /// fields of the wrong type.
    pub fn from_json(payload: &str) -> Result<Self, ParseError> {
        serde_json::from_str(payload).map_err(ParseError::from)
    }

    /// Returns the battery level in percent.
    #[must_use]
    pub fn battery_level(&self) -> Option<f64> {
        self.bat.as_ref().map(|b| b.value.unwrap_or(0.0))
    }

    /// Returns the validated temperature reading, if any.
    #[must_use]
    pub fn valid_temperature(&self) -> Option<&SensorTemperature> {
        self.tmp.as_ref().filter(|t| t.is_valid.unwrap_or(false))
    }
}

/// Contact sensor block, shared by door/window and motion sensors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSensor {
    /// Contact state (`"open"` or `"close"`).
    #[serde(default)]
    pub state: Option<String>,

    /// Whether the contact state is meaningful.
    #[serde(default)]
    pub is_valid: Option<bool>,

    /// Motion detected.
    #[serde(default)]
    pub motion: Option<bool>,

    /// Motion detection enabled.
    #[serde(rename = "active", default)]
    pub motion_active: Option<bool>,

    /// Device wall-clock timestamp of the last motion.
    #[serde(rename = "timestamp", default)]
    pub motion_timestamp: Option<i64>,
}

impl ContactSensor {
    /// Returns `true` if the contact reports open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("open"))
    }

    /// Returns `true` if the block carries motion fields.
    #[must_use]
    pub fn has_motion(&self) -> bool {
        self.motion.is_some() || self.motion_active.is_some()
    }
}

/// Temperature reading of a sensor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SensorTemperature {
    /// Value in the configured unit.
    #[serde(default)]
    pub value: Option<f64>,

    /// Configured unit (`"C"` or `"F"`).
    #[serde(default)]
    pub units: Option<String>,

    /// Value in Celsius.
    #[serde(rename = "tC", default)]
    pub celsius: Option<f64>,

    /// Value in Fahrenheit.
    #[serde(rename = "tF", default)]
    pub fahrenheit: Option<f64>,

    /// Whether the reading is valid.
    #[serde(default)]
    pub is_valid: Option<bool>,
}

impl SensorTemperature {
    /// Returns the configured unit.
    #[must_use]
    pub fn unit(&self) -> TemperatureUnit {
        TemperatureUnit::from_device(self.units.as_deref().unwrap_or_default())
    }
}

/// Relative humidity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Humidity {
    /// Humidity in percent.
    #[serde(default)]
    pub value: Option<f64>,
}

/// Illuminance reading.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Illuminance {
    /// Illuminance in lux.
    #[serde(default)]
    pub value: Option<f64>,

    /// Qualitative level (`dark`, `twilight`, `bright`).
    #[serde(default)]
    pub illumination: Option<String>,

    /// Whether the reading is valid.
    #[serde(default)]
    pub is_valid: Option<bool>,
}

/// Accelerometer reading.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Accelerometer {
    /// Tilt angle in degrees.
    #[serde(default)]
    pub tilt: Option<f64>,

    /// Vibration detected.
    #[serde(default)]
    pub vibration: Option<i32>,
}

/// Gas detector state strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GasSensor {
    /// Sensor state (`warmup`, `normal`, `fault`).
    #[serde(default)]
    pub sensor_state: Option<String>,

    /// Self-test state.
    #[serde(default)]
    pub self_test_state: Option<String>,

    /// Alarm state (`none`, `mild`, `heavy`, `test`).
    #[serde(default)]
    pub alarm_state: Option<String>,
}

/// Gas concentration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GasConcentration {
    /// Concentration in parts per million.
    #[serde(default)]
    pub ppm: Option<u32>,

    /// Whether the reading is valid.
    #[serde(default)]
    pub is_valid: Option<bool>,
}

/// Analog input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Adc {
    /// Voltage in volts.
    #[serde(default)]
    pub voltage: Option<f64>,
}

/// Battery state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Battery {
    /// Charge in percent.
    #[serde(default)]
    pub value: Option<f64>,

    /// Battery voltage.
    #[serde(default)]
    pub voltage: Option<f64>,
}

// Firmware versions differ on whether error codes are strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
