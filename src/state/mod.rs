// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel state tracking.
//!
//! [`ChannelStore`] is an in-memory [`ChannelSink`](crate::sink::ChannelSink)
//! that keeps the last value of every channel and reports whether a write
//! changed it. A [`ChannelReader`] gives other tasks read access to the same
//! values while the store is being updated.
//!
//! # Examples
//!
//! ```
//! use shellor_lib::channel::{ChannelValue, Unit};
//! use shellor_lib::sink::ChannelSink;
//! use shellor_lib::state::ChannelStore;
//!
//! let mut store = ChannelStore::new();
//! let reader = store.reader();
//!
//! let watts = ChannelValue::quantity(12.5, 1, Unit::Watt);
//! assert!(store.update_channel("meter", "currentWatts", watts.clone()));
//! assert!(!store.update_channel("meter", "currentWatts", watts.clone()));
//!
//! assert_eq!(reader.get("meter", "currentWatts"), Some(watts));
//! ```

mod channel_change;
mod channel_store;

pub use channel_change::{ChannelChange, ChannelKey};
pub use channel_store::{ChannelReader, ChannelStore};
