// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device session.
//!
//! A [`DeviceSession`] binds the profile and configuration of one device to
//! its channel store and event bus, and runs the three status passes on
//! each polling cycle.
//!
//! # Examples
//!
//! ```
//! use shellor_lib::status::{DeviceStatus, SensorStatus};
//! use shellor_lib::{DeviceConfig, DeviceKind, DeviceProfile, DeviceSession};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> shellor_lib::Result<()> {
//! let profile = DeviceProfile::new(DeviceKind::Relay { relays: 1 });
//! let mut session = DeviceSession::new(profile, DeviceConfig::default());
//!
//! let status = DeviceStatus::from_json(
//!     r#"{"uptime": 3600, "meters": [{"power": 60.0, "is_valid": true, "total": 12000}]}"#,
//! )?;
//! let updated = session.refresh(&SensorStatus::default(), &status).await?;
//!
//! assert!(updated);
//! let reader = session.reader();
//! assert_eq!(reader.get("meter", "totalKWH").and_then(|v| v.as_f64()), Some(0.2));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::channel::{ChannelSetup, ChannelValue, group, id};
use crate::config::DeviceConfig;
use crate::error::Result;
use crate::event::{DeviceEvent, DeviceId, EventBus};
use crate::profile::DeviceProfile;
use crate::protocol::SensorStatusSource;
use crate::sink::{ChannelSink, EventSink, InputUpdater};
use crate::state::{ChannelReader, ChannelStore};
use crate::status::DeviceStatus;
use crate::updater::{update_device_status, update_meters, update_sensors};

#[cfg(feature = "http")]
use crate::capabilities::DeviceKind;
#[cfg(feature = "http")]
use crate::protocol::HttpClient;

/// State of one connected device.
///
/// Refreshes take `&mut self`, so one session is never refreshed
/// concurrently. Other tasks observe it through [`reader`](Self::reader)
/// and [`subscribe`](Self::subscribe).
#[derive(Debug)]
pub struct DeviceSession {
    id: DeviceId,
    profile: Arc<DeviceProfile>,
    config: DeviceConfig,
    store: ChannelStore,
    bus: EventBus,
}

impl DeviceSession {
    /// Creates a session with its own event bus.
    #[must_use]
    pub fn new(profile: DeviceProfile, config: DeviceConfig) -> Self {
        Self {
            id: DeviceId::new(),
            profile: Arc::new(profile),
            config,
            store: ChannelStore::with_change_log(),
            bus: EventBus::new(),
        }
    }

    /// Publishes events on a shared bus instead of a private one.
    #[must_use]
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.bus = bus;
        self
    }

    /// Connects to a device over HTTP, reading its settings to build the
    /// profile.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`](crate::Error::Protocol) if the settings
    /// cannot be fetched.
    #[cfg(feature = "http")]
    pub async fn connect(client: &HttpClient, kind: DeviceKind, config: DeviceConfig) -> Result<Self> {
        let settings = client.fetch_settings().await?;
        let profile = DeviceProfile::new(kind).with_settings(settings);
        let session = Self::new(profile, config);
        tracing::info!(
            device_id = %session.id,
            url = client.base_url(),
            kind = ?kind,
            "Device session connected"
        );
        Ok(session)
    }

    /// Returns the session identifier.
    #[must_use]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// Returns the device profile.
    #[must_use]
    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Returns the device configuration.
    #[must_use]
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Returns the channel store.
    #[must_use]
    pub fn store(&self) -> &ChannelStore {
        &self.store
    }

    /// Returns a read handle to the channel values.
    #[must_use]
    pub fn reader(&self) -> ChannelReader {
        self.store.reader()
    }

    /// Subscribes to the events of this session.
    #[must_use]
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<DeviceEvent> {
        self.bus.subscribe()
    }

    /// Runs the status, meter and sensor passes for one snapshot.
    ///
    /// Channel changes are published as [`DeviceEvent::ChannelChanged`]
    /// once all passes completed. After the first refresh the channel
    /// definitions count as created.
    ///
    /// Returns whether a meter or sensor channel changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`](crate::Error::Protocol) if the sensor
    /// payload cannot be fetched. Values written by the earlier passes are
    /// kept.
    pub async fn refresh<S>(&mut self, source: &S, status: &DeviceStatus) -> Result<bool>
    where
        S: SensorStatusSource + ?Sized,
    {
        let profile = Arc::clone(&self.profile);
        let config = self.config.clone();

        let mut updated = update_device_status(&profile, self, status);
        updated |= update_meters(&profile, self, status);
        let sensors = update_sensors(&profile, &config, source, self, status).await;
        self.publish_changes();
        updated |= sensors?;

        self.store.mark_channels_created();
        tracing::debug!(device_id = %self.id, updated, "Device refreshed");
        Ok(updated)
    }

    /// Fetches `/status` and refreshes the session from it.
    ///
    /// The same client serves the sensor payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`](crate::Error::Protocol) on transport
    /// failures.
    #[cfg(feature = "http")]
    pub async fn poll(&mut self, client: &HttpClient) -> Result<bool> {
        let status = client.fetch_status().await?;
        self.refresh(client, &status).await
    }

    fn publish_changes(&mut self) {
        for change in self.store.drain_changes() {
            self.bus.publish(DeviceEvent::channel_changed(self.id, change));
        }
    }
}

impl ChannelSink for DeviceSession {
    fn update_channel(&mut self, group: &str, channel: &str, value: ChannelValue) -> bool {
        self.store.update_channel(group, channel, value)
    }

    fn channels_created(&self) -> bool {
        self.store.channels_created()
    }

    fn define_channels(&mut self, setup: ChannelSetup<'_>) {
        self.store.define_channels(setup);
    }
}

impl EventSink for DeviceSession {
    fn post_event(&mut self, code: &str, is_error: bool) {
        tracing::info!(device_id = %self.id, code, is_error, "Device alarm");
        self.bus.publish(DeviceEvent::alarm(self.id, code, is_error));
    }

    fn update_wakeup_reason(&mut self, reasons: &[String]) -> bool {
        let Some(primary) = reasons.first() else {
            return false;
        };
        let changed = self.store.update_channel(
            group::DEVICE,
            id::WAKEUP_REASON,
            ChannelValue::Text(primary.clone()),
        );
        if changed {
            tracing::debug!(device_id = %self.id, ?reasons, "Device woke up");
            self.bus.publish(DeviceEvent::wakeup(self.id, reasons));
        }
        changed
    }
}

impl InputUpdater for DeviceSession {
    fn update_inputs(&mut self, status: &DeviceStatus) -> bool {
        let numbered = status.inputs.len() > 1;
        let mut updated = false;
        for (index, input) in status.inputs.iter().enumerate() {
            let channel = if numbered {
                format!("{}{}", id::INPUT, index + 1)
            } else {
                id::INPUT.to_string()
            };
            updated |= self.store.update_channel(
                group::STATUS,
                &channel,
                ChannelValue::on_off(input.input.unwrap_or(0) != 0),
            );
        }
        updated
    }
}
