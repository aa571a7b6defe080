// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fetching status payloads from devices.
//!
//! The sensor updater pulls a fresh sensor payload on every pass through a
//! [`SensorStatusSource`]. [`HttpClient`] implements it against the device's
//! REST API; an already parsed [`SensorStatus`] implements it as well, for
//! hosts that receive payloads by other means.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use crate::error::ProtocolError;
use crate::status::SensorStatus;

/// Source of sensor payloads.
#[allow(async_fn_in_trait)]
pub trait SensorStatusSource {
    /// Fetches the current sensor payload.
    ///
    /// Implementations do not retry; timeouts are their own concern.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the payload cannot be fetched or decoded.
    async fn fetch_sensor_status(&self) -> Result<SensorStatus, ProtocolError>;
}

impl SensorStatusSource for SensorStatus {
    async fn fetch_sensor_status(&self) -> Result<SensorStatus, ProtocolError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn parsed_payload_is_a_source() {
        let payload = SensorStatus::from_json(r#"{"flood": true}"#).unwrap();
        let fetched = payload.fetch_sensor_status().await.unwrap();
        assert_eq!(fetched.flood, Some(true));
    }
}
