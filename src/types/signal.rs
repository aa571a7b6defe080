// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wi-Fi signal quality bucketing.

/// Maps a Wi-Fi RSSI in dBm to a signal quality bucket from 0 to 4.
///
/// | RSSI (dBm)      | Bucket |
/// |-----------------|--------|
/// | > -60           | 4      |
/// | -69 ..= -60     | 3      |
/// | -79 ..= -70     | 2      |
/// | -89 ..= -80     | 1      |
/// | <= -90          | 0      |
///
/// # Examples
///
/// ```
/// use shellor_lib::types::signal_strength;
///
/// assert_eq!(signal_strength(-55), 4);
/// assert_eq!(signal_strength(-95), 0);
/// ```
#[must_use]
pub fn signal_strength(rssi: i32) -> u8 {
    match rssi {
        r if r > -60 => 4,
        r if r > -70 => 3,
        r if r > -80 => 2,
        r if r > -90 => 1,
        _ => 0,
    }
}
