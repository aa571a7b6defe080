// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Timestamps reported by devices.
//!
//! Devices keep a local wall clock and report it as epoch seconds, as if
//! local time were UTC. Turning such a value into an absolute instant
//! requires the device's configured timezone.
//!
//! # Examples
//!
//! ```
//! use chrono::Timelike;
//! use shellor_lib::types::device_timestamp;
//!
//! // 2024-01-15 10:30:00 on the device's wall clock in Berlin
//! let ts = device_timestamp("Europe/Berlin", 1_705_314_600).unwrap();
//! assert_eq!(ts.hour(), 10);
//! assert_eq!(ts.offset().local_minus_utc(), 3600);
//! ```

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::ValueError;

/// Parses an IANA timezone name.
///
/// # Errors
///
/// Returns [`ValueError::UnknownTimezone`] if the name is not a known zone.
pub fn parse_timezone(name: &str) -> Result<Tz, ValueError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ValueError::UnknownTimezone(name.to_string()))
}

/// Resolves the timezone of a device, falling back to UTC.
///
/// An empty name means the device has no timezone configured.
#[must_use]
pub fn resolve_timezone(name: &str) -> Tz {
    if name.trim().is_empty() {
        return Tz::UTC;
    }
    parse_timezone(name).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Falling back to UTC for device timestamps");
        Tz::UTC
    })
}

/// Converts a device wall-clock epoch value into a zoned timestamp.
///
/// Returns `None` for values outside the representable range or for local
/// times that do not exist in the zone (spring-forward gaps).
#[must_use]
pub fn device_timestamp(zone: &str, local_epoch_secs: i64) -> Option<DateTime<FixedOffset>> {
    let naive = DateTime::from_timestamp(local_epoch_secs, 0)?.naive_utc();
    resolve_timezone(zone)
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
}

/// Returns the current time in the device's timezone.
#[must_use]
pub fn now_in(zone: &str) -> DateTime<FixedOffset> {
    Utc::now()
        .with_timezone(&resolve_timezone(zone))
        .fixed_offset()
}
