// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory channel store.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::channel::{ChannelSetup, ChannelValue};
use crate::sink::ChannelSink;

use super::{ChannelChange, ChannelKey};

type Values = Arc<RwLock<HashMap<ChannelKey, ChannelValue>>>;

/// Channel values of one device session.
///
/// Tracks the value of every channel, the channel definitions requested by
/// the updaters and whether channels have been created. Writes are
/// serialized through `&mut self`; reads may come from any task through a
/// [`ChannelReader`].
///
/// A store created with [`with_change_log`](Self::with_change_log) also
/// records every change until it is taken with
/// [`drain_changes`](Self::drain_changes).
#[derive(Debug, Default)]
pub struct ChannelStore {
    values: Values,
    setups: Vec<String>,
    created: bool,
    record_changes: bool,
    pending: Vec<ChannelChange>,
}

impl ChannelStore {
    /// Creates an empty store that does not record changes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that records changes.
    ///
    /// The owner must call [`drain_changes`](Self::drain_changes) regularly.
    #[must_use]
    pub fn with_change_log() -> Self {
        Self {
            record_changes: true,
            ..Self::default()
        }
    }

    /// Returns a read handle sharing this store's values.
    #[must_use]
    pub fn reader(&self) -> ChannelReader {
        ChannelReader {
            values: Arc::clone(&self.values),
        }
    }

    /// Returns the current value of a channel.
    #[must_use]
    pub fn get(&self, group: &str, channel: &str) -> Option<ChannelValue> {
        self.values.read().get(&ChannelKey::new(group, channel)).cloned()
    }

    /// Returns the number of channels with a value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Returns `true` if no channel has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    /// Returns the channel definitions requested so far, in request order.
    ///
    /// Each entry is the setup kind, followed by `:group` for group setups
    /// (`"device"`, `"meter:meter1"`). Repeated requests are recorded once.
    #[must_use]
    pub fn setups(&self) -> Vec<String> {
        self.setups.clone()
    }

    /// Marks the channel definitions as created.
    ///
    /// Later passes stop requesting definitions.
    pub fn mark_channels_created(&mut self) {
        self.created = true;
    }

    /// Forgets the created channel definitions, for example after the
    /// device was reconfigured. Channel values are kept.
    pub fn reset_definitions(&mut self) {
        self.created = false;
        self.setups.clear();
    }

    /// Takes the changes recorded since the last call.
    ///
    /// Always empty for stores created without a change log.
    pub fn drain_changes(&mut self) -> Vec<ChannelChange> {
        std::mem::take(&mut self.pending)
    }

    /// Returns all channel values ordered by key.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<ChannelKey, ChannelValue> {
        self.reader().snapshot()
    }
}

impl ChannelSink for ChannelStore {
    fn update_channel(&mut self, group: &str, channel: &str, value: ChannelValue) -> bool {
        let key = ChannelKey::new(group, channel);
        let previous = {
            let mut values = self.values.write();
            if values.get(&key) == Some(&value) {
                return false;
            }
            values.insert(key.clone(), value.clone())
        };

        tracing::trace!(channel = %key, %value, "Channel updated");
        if self.record_changes {
            self.pending.push(ChannelChange {
                key,
                previous,
                value,
            });
        }
        true
    }

    fn channels_created(&self) -> bool {
        self.created
    }

    fn define_channels(&mut self, setup: ChannelSetup<'_>) {
        let entry = match setup.group() {
            Some(group) => format!("{}:{group}", setup.kind()),
            None => setup.kind().to_string(),
        };
        if !self.setups.contains(&entry) {
            tracing::debug!(setup = %entry, "Channel definitions requested");
            self.setups.push(entry);
        }
    }
}

/// Read-only handle to the values of a [`ChannelStore`].
///
/// Cheap to clone and `Send + Sync`.
#[derive(Debug, Clone)]
pub struct ChannelReader {
    values: Values,
}

impl ChannelReader {
    /// Returns the current value of a channel.
    #[must_use]
    pub fn get(&self, group: &str, channel: &str) -> Option<ChannelValue> {
        self.values.read().get(&ChannelKey::new(group, channel)).cloned()
    }

    /// Returns all values of a group ordered by channel id.
    #[must_use]
    pub fn group(&self, group: &str) -> BTreeMap<String, ChannelValue> {
        self.values
            .read()
            .iter()
            .filter(|(key, _)| key.group() == group)
            .map(|(key, value)| (key.channel().to_string(), value.clone()))
            .collect()
    }

    /// Returns all channel values ordered by key.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<ChannelKey, ChannelValue> {
        self.values
            .read()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}
