// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `ShelloR` Lib - normalizes Shelly device status into typed channel state.
//!
//! Shelly devices report their state as loosely structured JSON: optional
//! blocks per hardware family, energy counters in device-native units,
//! temperatures in the configured unit, validity flags per reading. This
//! library turns a status snapshot into typed values written to named
//! `(group, channel)` slots, and reports which values changed.
//!
//! # Status Passes
//!
//! - [`updater::update_device_status`]: uptime, Wi-Fi signal, internal
//!   temperature, update and calibration flags
//! - [`updater::update_meters`]: power meters, summed for rollers and RGBW2
//!   controllers, per output otherwise, plus accumulated device totals
//! - [`updater::update_sensors`]: contact, climate, gas, battery, motion and
//!   thermostat state of battery devices and sensors
//!
//! The passes write through the traits of [`sink`]. [`DeviceSession`]
//! implements all of them on top of an in-memory
//! [`ChannelStore`](state::ChannelStore) and an [`EventBus`](event::EventBus).
//!
//! # Quick Start
//!
//! ```no_run
//! use shellor_lib::protocol::HttpConfig;
//! use shellor_lib::{DeviceConfig, DeviceKind, DeviceSession};
//!
//! #[tokio::main]
//! async fn main() -> shellor_lib::Result<()> {
//!     let client = HttpConfig::new("192.168.1.60")
//!         .with_credentials("admin", "secret")
//!         .into_client()?;
//!
//!     let mut session =
//!         DeviceSession::connect(&client, DeviceKind::HumidityTemperature, DeviceConfig::default())
//!             .await?;
//!     let mut events = session.subscribe();
//!
//!     session.poll(&client).await?;
//!
//!     while let Ok(event) = events.try_recv() {
//!         println!("{event:?}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Custom Hosts
//!
//! Hosts that keep channel state themselves implement
//! [`ChannelSink`](sink::ChannelSink), [`EventSink`](sink::EventSink) and
//! [`InputUpdater`](sink::InputUpdater) and call the passes directly.

mod capabilities;
pub mod channel;
mod config;
pub mod error;
pub mod event;
mod profile;
pub mod protocol;
mod session;
pub mod sink;
pub mod state;
pub mod status;
pub mod types;
pub mod updater;

pub use capabilities::{Capabilities, CapabilitiesBuilder, DeviceKind};
pub use config::DeviceConfig;
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use profile::{DeviceProfile, DeviceSettings, ThermostatSettings};
pub use session::DeviceSession;
