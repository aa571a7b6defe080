// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power meter aggregation.
//!
//! Devices report one reading per output (simple meters) or per phase
//! (polyphase meters). Rollers and RGBW2 controllers drive a single logical
//! load from several outputs, so their readings are summed into one
//! `meter` group. Every other device gets one group per reading plus
//! device-level accumulated totals.

use crate::channel::{ChannelSetup, ChannelValue, Unit, digits, group, id};
use crate::profile::DeviceProfile;
use crate::sink::ChannelSink;
use crate::status::{DeviceStatus, EMeter, Meter};
use crate::types::{device_timestamp, now_in, power_factor, watt_hours_to_kwh, watt_minutes_to_kwh};

/// Totals accumulated over all per-output meter groups, in W and kWh.
#[derive(Debug, Default)]
struct MeterTotals {
    watts: f64,
    total_kwh: f64,
    returned_kwh: f64,
}

/// Writes meter channels of a status snapshot.
///
/// Returns `true` if any meter channel changed.
///
/// # Examples
///
/// ```
/// use shellor_lib::state::ChannelStore;
/// use shellor_lib::status::DeviceStatus;
/// use shellor_lib::updater::update_meters;
/// use shellor_lib::{DeviceKind, DeviceProfile};
///
/// let profile = DeviceProfile::new(DeviceKind::Relay { relays: 1 });
/// let status = DeviceStatus::from_json(
///     r#"{"meters": [{"power": 42.0, "is_valid": true, "total": 6000}]}"#,
/// ).unwrap();
/// let mut store = ChannelStore::new();
///
/// assert!(update_meters(&profile, &mut store, &status));
/// assert_eq!(store.get("meter", "totalKWH").and_then(|v| v.as_f64()), Some(0.1));
/// assert_eq!(store.get("device", "accumulatedWatts").and_then(|v| v.as_f64()), Some(42.0));
/// ```
pub fn update_meters<S>(profile: &DeviceProfile, sink: &mut S, status: &DeviceStatus) -> bool
where
    S: ChannelSink + ?Sized,
{
    if !status.has_meters() {
        return false;
    }

    let caps = profile.capabilities();
    if caps.sums_meters() {
        return update_summed_meters(profile, sink, &status.meters);
    }

    let mut totals = MeterTotals::default();
    let updated = if caps.is_emeter {
        update_emeters(profile, sink, &status.emeters, &mut totals)
    } else {
        update_simple_meters(profile, sink, &status.meters, &mut totals)
    };

    sink.update_channel(
        group::DEVICE,
        id::ACCUMULATED_WATTS,
        ChannelValue::quantity(totals.watts, digits::WATT, Unit::Watt),
    );
    sink.update_channel(
        group::DEVICE,
        id::ACCUMULATED_TOTAL,
        ChannelValue::quantity(totals.total_kwh, digits::KWH, Unit::KilowattHour),
    );
    sink.update_channel(
        group::DEVICE,
        id::ACCUMULATED_RETURNED,
        ChannelValue::quantity(totals.returned_kwh, digits::KWH, Unit::KilowattHour),
    );

    tracing::debug!(
        watts = totals.watts,
        total_kwh = totals.total_kwh,
        returned_kwh = totals.returned_kwh,
        updated,
        "Updated meter channels"
    );
    updated
}

fn update_simple_meters<S>(
    profile: &DeviceProfile,
    sink: &mut S,
    meters: &[Meter],
    totals: &mut MeterTotals,
) -> bool
where
    S: ChannelSink + ?Sized,
{
    let caps = profile.capabilities();
    let mut updated = false;

    for (index, meter) in meters.iter().enumerate() {
        // Lights in white mode report is_valid=false for working meters.
        if !meter.is_valid() && !caps.is_light {
            continue;
        }
        // Bulbs carry a meter block that the firmware never fills in.
        if caps.is_bulb {
            continue;
        }

        let group = profile.meter_group(index);
        if !sink.channels_created() {
            sink.define_channels(ChannelSetup::Meter {
                group: &group,
                meter,
            });
        }

        let power = meter.power.unwrap_or(0.0);
        updated |= sink.update_channel(
            &group,
            id::CURRENT_WATTS,
            ChannelValue::quantity(power, digits::WATT, Unit::Watt),
        );
        totals.watts += power;

        if let Some(total) = meter.total {
            let kwh = watt_minutes_to_kwh(total);
            updated |= sink.update_channel(
                &group,
                id::TOTAL_KWH,
                ChannelValue::quantity(kwh, digits::KWH, Unit::KilowattHour),
            );
            totals.total_kwh += kwh;
        }

        if let Some(last_minute) = meter.last_minute() {
            updated |= sink.update_channel(
                &group,
                id::LAST_POWER_1,
                ChannelValue::quantity(last_minute, digits::WATT, Unit::Watt),
            );
        }

        if let Some(ts) = meter
            .timestamp
            .and_then(|ts| device_timestamp(profile.timezone(), ts))
        {
            sink.update_channel(&group, id::LAST_UPDATE, ChannelValue::DateTime(ts));
        }
    }

    updated
}

fn update_emeters<S>(
    profile: &DeviceProfile,
    sink: &mut S,
    emeters: &[EMeter],
    totals: &mut MeterTotals,
) -> bool
where
    S: ChannelSink + ?Sized,
{
    let mut updated = false;

    for (index, emeter) in emeters.iter().enumerate() {
        // Disabled phases of multi-phase meters report is_valid=false.
        if !emeter.is_valid() {
            continue;
        }

        let group = profile.meter_group(index);
        if !sink.channels_created() {
            sink.define_channels(ChannelSetup::EMeter {
                group: &group,
                emeter,
            });
        }

        let power = emeter.power.unwrap_or(0.0);
        let total_kwh = watt_hours_to_kwh(emeter.total.unwrap_or(0.0));
        let returned_kwh = watt_hours_to_kwh(emeter.total_returned.unwrap_or(0.0));

        let values = [
            (
                id::CURRENT_WATTS,
                ChannelValue::quantity(power, digits::WATT, Unit::Watt),
            ),
            (
                id::TOTAL_KWH,
                ChannelValue::quantity(total_kwh, digits::KWH, Unit::KilowattHour),
            ),
            (
                id::RETURNED_KWH,
                ChannelValue::quantity(returned_kwh, digits::KWH, Unit::KilowattHour),
            ),
            (
                id::REACTIVE_WATTS,
                ChannelValue::quantity(emeter.reactive.unwrap_or(0.0), digits::WATT, Unit::Watt),
            ),
            (
                id::VOLTAGE,
                ChannelValue::quantity(emeter.voltage.unwrap_or(0.0), digits::VOLT, Unit::Volt),
            ),
            (
                id::CURRENT,
                ChannelValue::quantity(emeter.current.unwrap_or(0.0), digits::AMPERE, Unit::Ampere),
            ),
            (id::POWER_FACTOR, ChannelValue::Decimal(emeter_power_factor(emeter))),
        ];

        let mut changed = false;
        for (channel, value) in values {
            changed |= sink.update_channel(&group, channel, value);
        }

        totals.watts += power;
        totals.total_kwh += total_kwh;
        totals.returned_kwh += returned_kwh;

        if changed {
            sink.update_channel(
                &group,
                id::LAST_UPDATE,
                ChannelValue::DateTime(now_in(profile.timezone())),
            );
        }
        updated |= changed;
    }

    updated
}

/// Returns the device-reported power factor, or computes it from active
/// and reactive power when the device does not report one.
#[must_use]
pub fn emeter_power_factor(emeter: &EMeter) -> f64 {
    if let Some(pf) = emeter.pf {
        return pf;
    }
    emeter
        .reactive
        .map_or(0.0, |reactive| power_factor(emeter.power.unwrap_or(0.0), reactive))
}

fn update_summed_meters<S>(profile: &DeviceProfile, sink: &mut S, meters: &[Meter]) -> bool
where
    S: ChannelSink + ?Sized,
{
    let group = group::METER;

    if !sink.channels_created()
        && let Some(first) = meters.first().filter(|m| m.is_valid())
    {
        sink.define_channels(ChannelSetup::Meter {
            group,
            meter: first,
        });
    }

    let mut current_watts = 0.0;
    let mut total_watt_minutes = 0.0;
    let mut last_minute = 0.0;
    let mut timestamp = 0_i64;

    for meter in meters.iter().filter(|m| m.is_valid()) {
        current_watts += meter.power.unwrap_or(0.0);
        total_watt_minutes += meter.total.unwrap_or(0.0);
        last_minute += meter.last_minute().unwrap_or(0.0);
        timestamp = timestamp.max(meter.timestamp.unwrap_or(0));
    }

    let mut updated = false;
    updated |= sink.update_channel(
        group,
        id::LAST_POWER_1,
        ChannelValue::quantity(last_minute, digits::WATT, Unit::Watt),
    );
    updated |= sink.update_channel(
        group,
        id::CURRENT_WATTS,
        ChannelValue::quantity(current_watts, digits::WATT, Unit::Watt),
    );
    updated |= sink.update_channel(
        group,
        id::TOTAL_KWH,
        ChannelValue::quantity(
            watt_minutes_to_kwh(total_watt_minutes),
            digits::KWH,
            Unit::KilowattHour,
        ),
    );

    if updated
        && timestamp > 0
        && let Some(ts) = device_timestamp(profile.timezone(), timestamp)
    {
        sink.update_channel(group, id::LAST_UPDATE, ChannelValue::DateTime(ts));
    }

    tracing::debug!(current_watts, meters = meters.len(), updated, "Updated summed meter channels");
    updated
}
