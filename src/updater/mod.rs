// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Status normalization passes.
//!
//! Each pass reads the profile flags, picks the relevant fields of a status
//! snapshot, converts them and writes channels through the sink traits of
//! [`crate::sink`]. Passes keep no state between calls.

mod device_status;
mod meters;
mod sensors;

pub use device_status::{MIN_RUNNING_UPTIME_SECS, update_device_status};
pub use meters::{emeter_power_factor, update_meters};
pub use sensors::{ALARM_LOW_BATTERY, TemperatureSource, update_sensors};
