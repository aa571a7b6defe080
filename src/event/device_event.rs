// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device event types.

use serde::Serialize;

use crate::state::ChannelChange;

use super::DeviceId;

/// Events published by a device session.
///
/// # Examples
///
/// ```
/// use shellor_lib::event::{DeviceEvent, DeviceId};
///
/// let device_id = DeviceId::new();
/// let alarm = DeviceEvent::alarm(device_id, "LOW_BATTERY", false);
/// assert!(alarm.is_alarm());
/// assert_eq!(alarm.device_id(), device_id);
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeviceEvent {
    /// The device raised an alarm.
    Alarm {
        /// The ID of the device.
        device_id: DeviceId,
        /// Alarm code, either a device error code or a library code such
        /// as [`ALARM_LOW_BATTERY`](crate::updater::ALARM_LOW_BATTERY).
        code: String,
        /// Whether the alarm reports a device error.
        is_error: bool,
    },

    /// A battery device woke up.
    WakeupReason {
        /// The ID of the device.
        device_id: DeviceId,
        /// Wake-up reasons reported by the device (`button`, `sensor`, ...).
        reasons: Vec<String>,
    },

    /// A channel value changed.
    ChannelChanged {
        /// The ID of the device.
        device_id: DeviceId,
        /// The change.
        change: ChannelChange,
    },
}

impl DeviceEvent {
    /// Returns the device ID associated with this event.
    #[must_use]
    pub fn device_id(&self) -> DeviceId {
        match self {
            Self::Alarm { device_id, .. }
            | Self::WakeupReason { device_id, .. }
            | Self::ChannelChanged { device_id, .. } => *device_id,
        }
    }

    /// Returns `true` if this is an alarm.
    #[must_use]
    pub fn is_alarm(&self) -> bool {
        matches!(self, Self::Alarm { .. })
    }

    /// Returns `true` if this is a channel change.
    #[must_use]
    pub fn is_channel_change(&self) -> bool {
        matches!(self, Self::ChannelChanged { .. })
    }

    /// Creates an alarm event.
    #[must_use]
    pub fn alarm(device_id: DeviceId, code: impl Into<String>, is_error: bool) -> Self {
        Self::Alarm {
            device_id,
            code: code.into(),
            is_error,
        }
    }

    /// Creates a wake-up event.
    #[must_use]
    pub fn wakeup(device_id: DeviceId, reasons: &[String]) -> Self {
        Self::WakeupReason {
            device_id,
            reasons: reasons.to_vec(),
        }
    }

    /// Creates a channel change event.
    #[must_use]
    pub fn channel_changed(device_id: DeviceId, change: ChannelChange) -> Self {
        Self::ChannelChanged { device_id, change }
    }
}
