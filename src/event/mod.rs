// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device events.
//!
//! A [`DeviceSession`](crate::DeviceSession) publishes alarms, wake-up
//! reasons and channel changes on an [`EventBus`], a tokio broadcast
//! channel that any number of tasks can subscribe to.

mod device_event;
mod device_id;
mod event_bus;

pub use device_event::DeviceEvent;
pub use device_id::DeviceId;
pub use event_bus::EventBus;
