// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed channel values.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Unit of a [`ChannelValue::Quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Unit {
    /// Seconds.
    Second,
    /// Minutes.
    Minute,
    /// Watts.
    Watt,
    /// Kilowatt-hours.
    KilowattHour,
    /// Volts.
    Volt,
    /// Amperes.
    Ampere,
    /// Percent.
    Percent,
    /// Degrees Celsius.
    Celsius,
    /// Lux.
    Lux,
    /// Angle in degrees.
    Degree,
    /// Parts per million.
    PartsPerMillion,
}

impl Unit {
    /// Returns the unit symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Second => "s",
            Self::Minute => "min",
            Self::Watt => "W",
            Self::KilowattHour => "kWh",
            Self::Volt => "V",
            Self::Ampere => "A",
            Self::Percent => "%",
            Self::Celsius => "°C",
            Self::Lux => "lx",
            Self::Degree => "°",
            Self::PartsPerMillion => "ppm",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// State of a contact channel (door, window, valve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Contact {
    /// Contact is open.
    Open,
    /// Contact is closed.
    Closed,
}

impl From<bool> for Contact {
    fn from(open: bool) -> Self {
        if open { Self::Open } else { Self::Closed }
    }
}

/// Value written to a channel.
///
/// # Examples
///
/// ```
/// use shellor_lib::channel::{ChannelValue, Unit};
///
/// let power = ChannelValue::quantity(12.345, 2, Unit::Watt);
/// assert_eq!(power, ChannelValue::Quantity { value: 12.35, unit: Unit::Watt });
/// assert_eq!(power.as_f64(), Some(12.35));
///
/// assert_eq!(ChannelValue::text_or_undefined(None), ChannelValue::Undefined);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChannelValue {
    /// Numeric value with a unit.
    Quantity {
        /// The value.
        value: f64,
        /// Unit of the value.
        unit: Unit,
    },
    /// Dimensionless number (signal bucket, profile index).
    Decimal(f64),
    /// On/off switch state.
    OnOff(bool),
    /// Open/closed contact state.
    OpenClosed(Contact),
    /// Free-form text.
    Text(String),
    /// Timestamp.
    DateTime(DateTime<FixedOffset>),
    /// Value is explicitly unknown.
    Undefined,
}

impl ChannelValue {
    /// Creates a quantity rounded to `digits` decimal places.
    #[must_use]
    pub fn quantity(value: f64, digits: u8, unit: Unit) -> Self {
        let scale = 10f64.powi(i32::from(digits));
        Self::Quantity {
            value: (value * scale).round() / scale,
            unit,
        }
    }

    /// Creates a quantity without rounding.
    #[must_use]
    pub fn quantity_exact(value: f64, unit: Unit) -> Self {
        Self::Quantity { value, unit }
    }

    /// Creates an on/off value.
    #[must_use]
    pub fn on_off(on: bool) -> Self {
        Self::OnOff(on)
    }

    /// Creates an open/closed value.
    #[must_use]
    pub fn contact(open: bool) -> Self {
        Self::OpenClosed(Contact::from(open))
    }

    /// Creates a text value, or [`ChannelValue::Undefined`] when absent.
    #[must_use]
    pub fn text_or_undefined(text: Option<&str>) -> Self {
        text.map_or(Self::Undefined, |t| Self::Text(t.to_string()))
    }

    /// Returns the numeric value of quantities and decimals.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Quantity { value, .. } | Self::Decimal(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the switch state of on/off values.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::OnOff(on) => Some(*on),
            _ => None,
        }
    }

    /// Returns `true` for [`ChannelValue::Undefined`].
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

impl fmt::Display for ChannelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quantity { value, unit } => write!(f, "{value} {unit}"),
            Self::Decimal(value) => write!(f, "{value}"),
            Self::OnOff(on) => f.write_str(if *on { "ON" } else { "OFF" }),
            Self::OpenClosed(Contact::Open) => f.write_str("OPEN"),
            Self::OpenClosed(Contact::Closed) => f.write_str("CLOSED"),
            Self::Text(text) => f.write_str(text),
            Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Undefined => f.write_str("UNDEF"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_rounds_to_digits() {
        assert_eq!(
            ChannelValue::quantity(0.123_456, 3, Unit::KilowattHour),
            ChannelValue::Quantity {
                value: 0.123,
                unit: Unit::KilowattHour
            }
        );
        assert_eq!(
            ChannelValue::quantity(21.96, 0, Unit::Celsius).as_f64(),
            Some(22.0)
        );
    }

    #[test]
    fn contact_from_bool() {
        assert_eq!(ChannelValue::contact(true), ChannelValue::OpenClosed(Contact::Open));
        assert_eq!(ChannelValue::contact(false), ChannelValue::OpenClosed(Contact::Closed));
    }

    #[test]
    fn display() {
        assert_eq!(ChannelValue::quantity(5.0, 0, Unit::Watt).to_string(), "5 W");
        assert_eq!(ChannelValue::on_off(true).to_string(), "ON");
        assert_eq!(ChannelValue::contact(false).to_string(), "CLOSED");
        assert_eq!(ChannelValue::Undefined.to_string(), "UNDEF");
    }

    #[test]
    fn accessors() {
        assert_eq!(ChannelValue::Decimal(3.0).as_f64(), Some(3.0));
        assert_eq!(ChannelValue::on_off(false).as_bool(), Some(false));
        assert!(ChannelValue::Text("x".into()).as_f64().is_none());
        assert!(ChannelValue::Undefined.is_undefined());
    }
}
