// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel addresses and changes.

use std::fmt;

use serde::Serialize;

use crate::channel::ChannelValue;

/// Address of a channel: a group and a channel id within it.
///
/// Displayed as `group#channel`.
///
/// # Examples
///
/// ```
/// use shellor_lib::state::ChannelKey;
///
/// let key = ChannelKey::new("meter1", "currentWatts");
/// assert_eq!(key.to_string(), "meter1#currentWatts");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ChannelKey {
    group: String,
    channel: String,
}

impl ChannelKey {
    /// Creates a channel key.
    #[must_use]
    pub fn new(group: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            channel: channel.into(),
        }
    }

    /// Returns the group.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Returns the channel id.
    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.group, self.channel)
    }
}

/// A channel value that differs from the previously stored one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelChange {
    /// Channel address.
    pub key: ChannelKey,
    /// Previous value, `None` on the first write.
    pub previous: Option<ChannelValue>,
    /// New value.
    pub value: ChannelValue,
}

impl ChannelChange {
    /// Returns `true` if the channel had no value before.
    #[must_use]
    pub fn is_initial(&self) -> bool {
        self.previous.is_none()
    }
}
