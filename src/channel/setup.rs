// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel definition requests.

use crate::profile::DeviceProfile;
use crate::status::{DeviceStatus, EMeter, Meter, SensorStatus};

/// Request to define the channels of a device or group.
///
/// Sent to [`ChannelSink::define_channels`](crate::sink::ChannelSink::define_channels)
/// before the first value is written, while the sink reports that channels
/// have not been created yet. The payload carries the shape of the first
/// observed reading, from which the sink derives the channel schema.
#[derive(Debug, Clone, Copy)]
pub enum ChannelSetup<'a> {
    /// Device-level status channels.
    Device {
        /// The device profile.
        profile: &'a DeviceProfile,
        /// First status snapshot.
        status: &'a DeviceStatus,
    },
    /// Channels of a simple meter group.
    Meter {
        /// Group receiving the channels.
        group: &'a str,
        /// First reading of the meter.
        meter: &'a Meter,
    },
    /// Channels of a polyphase meter group.
    EMeter {
        /// Group receiving the channels.
        group: &'a str,
        /// First reading of the meter.
        emeter: &'a EMeter,
    },
    /// Sensor channels.
    Sensor {
        /// The device profile.
        profile: &'a DeviceProfile,
        /// First sensor payload.
        sensor: &'a SensorStatus,
    },
}

impl ChannelSetup<'_> {
    /// Returns the group the setup targets, when it targets a single group.
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        match self {
            Self::Meter { group, .. } | Self::EMeter { group, .. } => Some(group),
            Self::Device { .. } | Self::Sensor { .. } => None,
        }
    }

    /// Returns a short name of the setup kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Device { .. } => "device",
            Self::Meter { .. } => "meter",
            Self::EMeter { .. } => "emeter",
            Self::Sensor { .. } => "sensor",
        }
    }
}
