// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generic channel model.
//!
//! A channel is a named, typed state slot addressed by a `(group, channel)`
//! pair. Groups are logical sub-units of a device such as one relay output
//! or one meter.
//!
//! # Examples
//!
//! ```
//! use shellor_lib::channel::{ChannelValue, Unit, group, id};
//!
//! let key = (group::DEVICE, id::UPTIME);
//! let value = ChannelValue::quantity(3600.0, 0, Unit::Second);
//! assert_eq!(value.to_string(), "3600 s");
//! # let _ = key;
//! ```

mod names;
mod setup;
mod value;

pub(crate) use names::digits;
pub use names::{group, id, mode};
pub use setup::ChannelSetup;
pub use value::{ChannelValue, Contact, Unit};
