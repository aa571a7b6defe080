// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device payload types.
//!
//! - [`DeviceStatus`] - The `/status` snapshot polled every cycle
//! - [`SensorStatus`] - Sensor payload of sensor and battery devices

mod device_status;
mod sensor_status;

use serde::{Deserialize, Deserializer};

pub use device_status::{
    DeviceStatus, EMeter, INVALID_TEMPERATURE, InputStatus, InternalTemperature, Meter,
    TargetTemperature, ThermostatStatus, ThermostatTemperature, WifiStation,
};
pub use sensor_status::{
    Accelerometer, Adc, Battery, ContactSensor, GasConcentration, GasSensor, Humidity,
    Illuminance, SensorStatus, SensorTemperature,
};

// Firmware sends `null` for list sections it has nothing to report in.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
