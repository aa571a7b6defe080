// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device families and their capabilities.
//!
//! Each device family maps to a fixed set of capability flags. The flags
//! drive every normalization decision: whether meters are summed or mapped
//! per output, whether a sensor payload is fetched, how groups are named.
//!
//! # Examples
//!
//! ```
//! use shellor_lib::{Capabilities, DeviceKind};
//!
//! let roller = DeviceKind::Roller.capabilities();
//! assert!(roller.is_roller);
//! assert!(roller.sums_meters());
//!
//! let em3 = DeviceKind::EnergyMeter { phases: 3 }.capabilities();
//! assert!(em3.is_emeter);
//! assert_eq!(em3.num_meters, 3);
//! ```

/// Device family of a Shelly device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// Relay with `relays` outputs (1, 2, 2.5, Plug).
    Relay {
        /// Number of relay outputs.
        relays: u8,
    },
    /// Shutter controller (2.5 in roller mode).
    Roller,
    /// Single-channel dimmer.
    Dimmer,
    /// RGBW2 controller.
    Rgbw2,
    /// Light bulb.
    Bulb,
    /// Polyphase energy meter (EM, 3EM).
    EnergyMeter {
        /// Number of measured phases.
        phases: u8,
    },
    /// Door/window contact sensor.
    DoorWindow,
    /// Humidity and temperature sensor.
    HumidityTemperature,
    /// Flood detector.
    Flood,
    /// Smoke detector.
    Smoke,
    /// Gas detector (mains powered).
    Gas,
    /// Sense multi-sensor.
    Sense,
    /// Motion sensor.
    Motion,
    /// Radiator valve.
    Thermostat,
    /// Battery-powered button.
    Button,
    /// Input module with `inputs` digital inputs (i3).
    Inputs {
        /// Number of digital inputs.
        inputs: u8,
    },
}

impl DeviceKind {
    /// Returns the default capabilities of the family.
    #[must_use]
    pub fn capabilities(self) -> Capabilities {
        let base = Capabilities::default();
        match self {
            Self::Relay { relays } => Capabilities {
                has_relays: true,
                num_relays: relays.max(1),
                num_meters: relays.max(1),
                ..base
            },
            Self::Roller => Capabilities {
                is_roller: true,
                num_rollers: 1,
                num_meters: 2,
                ..base
            },
            Self::Dimmer => Capabilities {
                is_light: true,
                is_dimmer: true,
                num_meters: 1,
                ..base
            },
            Self::Rgbw2 => Capabilities {
                is_light: true,
                is_rgbw2: true,
                num_meters: 4,
                ..base
            },
            Self::Bulb => Capabilities {
                is_light: true,
                is_bulb: true,
                num_meters: 1,
                ..base
            },
            Self::EnergyMeter { phases } => Capabilities {
                has_relays: true,
                is_emeter: true,
                num_relays: 1,
                num_meters: phases.max(1),
                ..base
            },
            Self::DoorWindow
            | Self::HumidityTemperature
            | Self::Flood
            | Self::Smoke
            | Self::Motion
            | Self::Sense
            | Self::Thermostat => Capabilities {
                is_sensor: true,
                has_battery: true,
                ..base
            },
            Self::Gas => Capabilities {
                is_sensor: true,
                ..base
            },
            Self::Button => Capabilities {
                is_button: true,
                has_battery: true,
                num_inputs: 1,
                ..base
            },
            Self::Inputs { inputs } => Capabilities {
                num_inputs: inputs.max(1),
                ..base
            },
        }
    }
}

/// Capability flags of a device.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
// Each boolean is an independent hardware trait; several are set together
// on the same device.
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    /// Shutter controller.
    pub is_roller: bool,
    /// RGBW2 controller.
    pub is_rgbw2: bool,
    /// Polyphase energy meter.
    pub is_emeter: bool,
    /// Any light (dimmer, RGBW2, bulb).
    pub is_light: bool,
    /// Light bulb.
    pub is_bulb: bool,
    /// Single-channel dimmer.
    pub is_dimmer: bool,
    /// Sensor device.
    pub is_sensor: bool,
    /// Battery powered.
    pub has_battery: bool,
    /// Has relay outputs.
    pub has_relays: bool,
    /// Button device.
    pub is_button: bool,
    /// Number of relay outputs.
    pub num_relays: u8,
    /// Number of roller outputs.
    pub num_rollers: u8,
    /// Number of meters.
    pub num_meters: u8,
    /// Number of digital inputs.
    pub num_inputs: u8,
}

impl Capabilities {
    /// Returns whether all meter readings are summed into one group.
    #[must_use]
    pub const fn sums_meters(&self) -> bool {
        self.is_roller || self.is_rgbw2
    }

    /// Returns whether the device delivers a sensor payload.
    #[must_use]
    pub const fn has_sensor_payload(&self) -> bool {
        self.is_sensor || self.has_battery
    }
}

/// Builder for creating custom capabilities.
#[derive(Debug, Default)]
pub struct CapabilitiesBuilder {
    inner: Capabilities,
}

impl CapabilitiesBuilder {
    /// Creates a new builder with no capabilities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from the defaults of a device family.
    #[must_use]
    pub fn from_kind(kind: DeviceKind) -> Self {
        Self {
            inner: kind.capabilities(),
        }
    }

    /// Sets the number of relay outputs.
    #[must_use]
    pub fn relays(mut self, count: u8) -> Self {
        self.inner.has_relays = count > 0;
        self.inner.num_relays = count;
        self
    }

    /// Sets the number of meters.
    #[must_use]
    pub fn meters(mut self, count: u8) -> Self {
        self.inner.num_meters = count;
        self
    }

    /// Sets the number of digital inputs.
    #[must_use]
    pub fn inputs(mut self, count: u8) -> Self {
        self.inner.num_inputs = count;
        self
    }

    /// Marks the device as battery powered.
    #[must_use]
    pub fn with_battery(mut self) -> Self {
        self.inner.has_battery = true;
        self
    }

    /// Marks the device as a sensor.
    #[must_use]
    pub fn with_sensor(mut self) -> Self {
        self.inner.is_sensor = true;
        self
    }

    /// Builds the capabilities.
    #[must_use]
    pub fn build(self) -> Capabilities {
        self.inner
    }
}
