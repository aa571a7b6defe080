// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collaborator traits the updaters write through.
//!
//! The updaters never store state themselves. Channel values, channel
//! definitions, alarms and input channels all go through these traits,
//! implemented by the host platform or by [`DeviceSession`](crate::DeviceSession).

use crate::channel::{ChannelSetup, ChannelValue};
use crate::status::DeviceStatus;

/// Channel state store.
pub trait ChannelSink {
    /// Writes a channel value.
    ///
    /// Returns `true` if the stored value differs from the previous one.
    fn update_channel(&mut self, group: &str, channel: &str, value: ChannelValue) -> bool;

    /// Returns whether channel definitions have been created for the
    /// current device session.
    fn channels_created(&self) -> bool;

    /// Requests channel definitions before the first value write.
    ///
    /// May be called more than once for the same setup while
    /// [`channels_created`](Self::channels_created) is `false`.
    fn define_channels(&mut self, setup: ChannelSetup<'_>);
}

/// Alarm and wake-up notifications.
pub trait EventSink {
    /// Posts an alarm. Fire-and-forget.
    fn post_event(&mut self, code: &str, is_error: bool);

    /// Publishes the reasons a battery device woke up.
    ///
    /// Returns `true` if this changed any channel.
    fn update_wakeup_reason(&mut self, reasons: &[String]) -> bool;
}

/// Digital input channel mapping.
pub trait InputUpdater {
    /// Maps the input states of a status snapshot to channels.
    ///
    /// Returns `true` if any channel changed.
    fn update_inputs(&mut self, status: &DeviceStatus) -> bool;
}

/// Everything a sensor update writes to.
pub trait DeviceHandler: ChannelSink + EventSink + InputUpdater {}

impl<T> DeviceHandler for T where T: ChannelSink + EventSink + InputUpdater {}
