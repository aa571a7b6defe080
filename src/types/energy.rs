// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Energy unit conversions and power factor computation.
//!
//! Simple meters count energy in watt-minutes, polyphase meters in
//! watt-hours. Both are normalized to kilowatt-hours.

/// Minimum `|P| + |Q|` below which a computed power factor is noise.
pub const POWER_FACTOR_NOISE_FLOOR: f64 = 1.5;

/// Converts a watt-minute counter into kilowatt-hours.
///
/// Negative counters are clamped to zero.
///
/// # Examples
///
/// ```
/// use shellor_lib::types::watt_minutes_to_kwh;
///
/// assert_eq!(watt_minutes_to_kwh(6000.0), 0.1);
/// ```
#[must_use]
pub fn watt_minutes_to_kwh(watt_minutes: f64) -> f64 {
    watt_minutes.max(0.0) / 60.0 / 1000.0
}

/// Converts a watt-hour counter into kilowatt-hours.
///
/// Negative counters are clamped to zero.
#[must_use]
pub fn watt_hours_to_kwh(watt_hours: f64) -> f64 {
    watt_hours.max(0.0) / 1000.0
}

/// Computes the power factor from active and reactive power.
///
/// Returns `0.0` when `|power| + |reactive|` does not exceed
/// [`POWER_FACTOR_NOISE_FLOOR`].
///
/// # Examples
///
/// ```
/// use shellor_lib::types::power_factor;
///
/// assert_eq!(power_factor(3.0, 4.0), 0.6);
/// assert_eq!(power_factor(1.0, 0.0), 0.0);
/// ```
#[must_use]
pub fn power_factor(power: f64, reactive: f64) -> f64 {
    if power.abs() + reactive.abs() > POWER_FACTOR_NOISE_FLOOR {
        power / power.hypot(reactive)
    } else {
        0.0
    }
}
