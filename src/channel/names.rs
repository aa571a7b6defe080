// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel group and channel identifiers.

/// Channel group identifiers.
pub mod group {
    /// Device health and accumulated meter values.
    pub const DEVICE: &str = "device";
    /// Meter group prefix; numbered (`meter1`, `meter2`) on multi-meter devices.
    pub const METER: &str = "meter";
    /// Environmental sensors.
    pub const SENSOR: &str = "sensors";
    /// Battery state.
    pub const BATTERY: &str = "battery";
    /// Thermostat control.
    pub const CONTROL: &str = "control";
    /// Relay control prefix.
    pub const RELAY: &str = "relay";
    /// Roller control prefix.
    pub const ROLLER: &str = "roller";
    /// Light control prefix.
    pub const LIGHT: &str = "light";
    /// Input and button status prefix.
    pub const STATUS: &str = "status";
}

/// Channel identifiers within a group.
pub mod id {
    pub const UPTIME: &str = "uptime";
    pub const WIFI_SIGNAL: &str = "wifiSignal";
    pub const INTERNAL_TEMP: &str = "internalTemp";
    pub const UPDATE_AVAILABLE: &str = "updateAvailable";
    pub const CALIBRATED: &str = "calibrated";
    pub const SCHEDULE: &str = "schedule";
    pub const SELF_TEST: &str = "selfTest";
    pub const CHARGER: &str = "charger";
    pub const WAKEUP_REASON: &str = "wakeupReason";

    pub const ACCUMULATED_WATTS: &str = "accumulatedWatts";
    pub const ACCUMULATED_TOTAL: &str = "accumulatedWTotal";
    pub const ACCUMULATED_RETURNED: &str = "accumulatedReturned";

    pub const CURRENT_WATTS: &str = "currentWatts";
    pub const TOTAL_KWH: &str = "totalKWH";
    pub const LAST_POWER_1: &str = "lastPower1";
    pub const RETURNED_KWH: &str = "returnedKWH";
    pub const REACTIVE_WATTS: &str = "reactiveWatts";
    pub const VOLTAGE: &str = "voltage";
    pub const CURRENT: &str = "current";
    pub const POWER_FACTOR: &str = "powerFactor";
    pub const LAST_UPDATE: &str = "lastUpdate";

    pub const SLEEP_TIME: &str = "sensorSleepTime";
    pub const STATE: &str = "state";
    pub const SENSOR_ERROR: &str = "lastError";
    pub const TEMPERATURE: &str = "temperature";
    pub const HUMIDITY: &str = "humidity";
    pub const LUX: &str = "lux";
    pub const ILLUMINATION: &str = "illumination";
    pub const TILT: &str = "tilt";
    pub const FLOOD: &str = "flood";
    pub const SMOKE: &str = "smoke";
    pub const ALARM_STATE: &str = "alarmState";
    pub const SENSOR_STATE: &str = "sensorState";
    pub const PPM: &str = "ppm";
    pub const MOTION: &str = "motion";
    pub const MOTION_ACTIVE: &str = "motionActive";
    pub const MOTION_TIMESTAMP: &str = "motionTimestamp";

    pub const BATTERY_LEVEL: &str = "batteryLevel";
    pub const LOW_BATTERY: &str = "lowBattery";

    pub const BOOST: &str = "boost";
    pub const BOOST_TIMER: &str = "boostTimer";
    pub const MODE: &str = "mode";
    pub const PROFILE: &str = "profile";
    pub const TARGET_TEMP: &str = "targetTemp";
    pub const POSITION: &str = "position";

    pub const INPUT: &str = "input";
}

/// Thermostat schedule modes written to the mode channel.
pub mod mode {
    pub const AUTO: &str = "auto";
    pub const MANUAL: &str = "manual";
}

/// Decimal places used when rounding quantities.
pub(crate) mod digits {
    pub const NONE: u8 = 0;
    pub const WATT: u8 = 2;
    pub const KWH: u8 = 3;
    pub const VOLT: u8 = 1;
    pub const TEMP: u8 = 1;
    pub const PERCENT: u8 = 1;
    pub const AMPERE: u8 = 2;
    pub const ADC: u8 = 2;
}
