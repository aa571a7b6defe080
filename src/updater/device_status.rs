// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device health channels.

use crate::channel::{ChannelSetup, ChannelValue, Unit, digits, group, id};
use crate::profile::DeviceProfile;
use crate::sink::ChannelSink;
use crate::status::{DeviceStatus, INVALID_TEMPERATURE};
use crate::types::signal_strength;

/// Uptime in seconds above which the device is considered running.
pub const MIN_RUNNING_UPTIME_SECS: u64 = 10;

/// Writes the device health channels of a status snapshot.
///
/// Always returns `false`: health fields never require dependent channels
/// to be recomputed.
///
/// # Examples
///
/// ```
/// use shellor_lib::state::ChannelStore;
/// use shellor_lib::status::DeviceStatus;
/// use shellor_lib::updater::update_device_status;
/// use shellor_lib::{DeviceKind, DeviceProfile};
///
/// let profile = DeviceProfile::new(DeviceKind::Relay { relays: 1 });
/// let status = DeviceStatus::from_json(r#"{"uptime": 120, "wifi_sta": {"rssi": -72}}"#).unwrap();
/// let mut store = ChannelStore::new();
///
/// assert!(!update_device_status(&profile, &mut store, &status));
/// assert_eq!(store.get("device", "wifiSignal").and_then(|v| v.as_f64()), Some(2.0));
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn update_device_status<S>(profile: &DeviceProfile, sink: &mut S, status: &DeviceStatus) -> bool
where
    S: ChannelSink + ?Sized,
{
    if !sink.channels_created() {
        sink.define_channels(ChannelSetup::Device { profile, status });
    }

    let uptime = status.uptime.unwrap_or(0);
    if uptime > MIN_RUNNING_UPTIME_SECS {
        // Safe: uptimes stay far below 2^52 seconds
        sink.update_channel(
            group::DEVICE,
            id::UPTIME,
            ChannelValue::quantity(uptime as f64, digits::NONE, Unit::Second),
        );
    }

    let rssi = status.rssi().unwrap_or(0);
    sink.update_channel(
        group::DEVICE,
        id::WIFI_SIGNAL,
        ChannelValue::Decimal(f64::from(signal_strength(rssi))),
    );

    if let Some(celsius) = internal_temperature(profile, status) {
        sink.update_channel(
            group::DEVICE,
            id::INTERNAL_TEMP,
            ChannelValue::quantity(celsius, digits::NONE, Unit::Celsius),
        );
    }

    sink.update_channel(
        group::SENSOR,
        id::SLEEP_TIME,
        ChannelValue::quantity_exact(f64::from(status.sleep_time.unwrap_or(0)), Unit::Second),
    );

    sink.update_channel(
        group::DEVICE,
        id::UPDATE_AVAILABLE,
        ChannelValue::on_off(status.has_update.unwrap_or(false)),
    );

    if let Some(calibrated) = profile.settings().calibrated {
        sink.update_channel(group::DEVICE, id::CALIBRATED, ChannelValue::on_off(calibrated));
    }

    tracing::trace!(uptime, rssi, "Updated device status channels");
    false
}

/// Selects the internal temperature to report.
///
/// The dedicated `tmp` block wins on non-sensor devices; sensors report
/// their own environment there, so they fall back to the generic field.
fn internal_temperature(profile: &DeviceProfile, status: &DeviceStatus) -> Option<f64> {
    let generic = status.temperature;
    if generic.is_some_and(|t| (t - INVALID_TEMPERATURE).abs() < f64::EPSILON) {
        return None;
    }

    match &status.tmp {
        Some(tmp) if !profile.capabilities().is_sensor => Some(tmp.celsius.unwrap_or(0.0)),
        _ => generic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::DeviceKind;
    use crate::profile::DeviceSettings;
    use crate::state::ChannelStore;

    fn run(profile: &DeviceProfile, json: &str) -> ChannelStore {
        let status = DeviceStatus::from_json(json).unwrap();
        let mut store = ChannelStore::new();
        assert!(!update_device_status(profile, &mut store, &status));
        store
    }

    #[test]
    fn uptime_written_only_when_running() {
        let profile = DeviceProfile::new(DeviceKind::Relay { relays: 1 });

        let store = run(&profile, r#"{"uptime": 10}"#);
        assert!(store.get(group::DEVICE, id::UPTIME).is_none());

        let store = run(&profile, r#"{"uptime": 11}"#);
        assert_eq!(
            store.get(group::DEVICE, id::UPTIME),
            Some(ChannelValue::Quantity {
                value: 11.0,
                unit: Unit::Second
            })
        );
    }

    #[test]
    fn internal_temperature_prefers_tmp_block_on_actuators() {
        let profile = DeviceProfile::new(DeviceKind::Relay { relays: 1 });
        let store = run(&profile, r#"{"temperature": 40.0, "tmp": {"tC": 44.6}}"#);
        assert_eq!(
            store.get(group::DEVICE, id::INTERNAL_TEMP).and_then(|v| v.as_f64()),
            Some(45.0)
        );
    }

    #[test]
    fn internal_temperature_generic_on_sensors() {
        let profile = DeviceProfile::new(DeviceKind::HumidityTemperature);
        let store = run(&profile, r#"{"temperature": 21.2, "tmp": {"tC": 19.0}}"#);
        assert_eq!(
            store.get(group::DEVICE, id::INTERNAL_TEMP).and_then(|v| v.as_f64()),
            Some(21.0)
        );
    }

    #[test]
    fn invalid_temperature_sentinel_skipped() {
        let profile = DeviceProfile::new(DeviceKind::Relay { relays: 1 });
        let store = run(&profile, r#"{"temperature": 999, "tmp": {"tC": 30.0}}"#);
        assert!(store.get(group::DEVICE, id::INTERNAL_TEMP).is_none());
    }

    #[test]
    fn defaults_when_fields_absent() {
        let profile = DeviceProfile::new(DeviceKind::Relay { relays: 1 });
        let store = run(&profile, "{}");

        assert_eq!(
            store.get(group::SENSOR, id::SLEEP_TIME).and_then(|v| v.as_f64()),
            Some(0.0)
        );
        assert_eq!(
            store.get(group::DEVICE, id::UPDATE_AVAILABLE),
            Some(ChannelValue::OnOff(false))
        );
        assert!(store.get(group::DEVICE, id::INTERNAL_TEMP).is_none());
        assert!(store.get(group::DEVICE, id::CALIBRATED).is_none());
    }

    #[test]
    fn calibrated_only_when_supported() {
        let settings = DeviceSettings {
            calibrated: Some(true),
            ..DeviceSettings::default()
        };
        let profile = DeviceProfile::new(DeviceKind::Roller).with_settings(settings);
        let store = run(&profile, r#"{"has_update": true}"#);

        assert_eq!(
            store.get(group::DEVICE, id::CALIBRATED),
            Some(ChannelValue::OnOff(true))
        );
        assert_eq!(
            store.get(group::DEVICE, id::UPDATE_AVAILABLE),
            Some(ChannelValue::OnOff(true))
        );
    }

    #[test]
    fn device_channels_defined_once_per_session() {
        let profile = DeviceProfile::new(DeviceKind::Relay { relays: 1 });
        let status = DeviceStatus::default();
        let mut store = ChannelStore::new();

        update_device_status(&profile, &mut store, &status);
        assert_eq!(store.setups(), ["device"]);

        store.mark_channels_created();
        update_device_status(&profile, &mut store, &status);
        assert_eq!(store.setups(), ["device"]);
    }
}
