// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor and battery channels.
//!
//! Battery devices and dedicated sensors publish a separate sensor payload
//! that is fetched on every pass. Each block of the payload is optional and
//! mapped on its own; blocks that are absent leave their channels untouched.

use crate::channel::{ChannelSetup, ChannelValue, Unit, digits, group, id, mode};
use crate::config::DeviceConfig;
use crate::error::ProtocolError;
use crate::profile::{DeviceProfile, ThermostatSettings};
use crate::protocol::SensorStatusSource;
use crate::sink::DeviceHandler;
use crate::status::{DeviceStatus, SensorStatus, SensorTemperature, ThermostatStatus};
use crate::types::{TemperatureUnit, device_timestamp, now_in, to_celsius};

/// Alarm code posted when the battery drops below the configured threshold.
pub const ALARM_LOW_BATTERY: &str = "LOW_BATTERY";

/// Valve position reported while the valve is not calibrated.
const VALVE_POSITION_UNKNOWN: f64 = -1.0;

/// Origin of the temperature reading of a sensor pass.
///
/// Door/window and H&T sensors embed their own reading; radiator valves
/// report temperature as part of their thermostat state.
#[derive(Debug, Clone, Copy)]
pub enum TemperatureSource<'a> {
    /// Validated reading of the sensor payload.
    Sensor(&'a SensorTemperature),
    /// Thermostat state of a radiator valve.
    Thermostat {
        /// First thermostat of the status snapshot.
        state: &'a ThermostatStatus,
        /// First thermostat of the stored settings.
        settings: Option<&'a ThermostatSettings>,
    },
    /// No temperature in this pass.
    None,
}

impl<'a> TemperatureSource<'a> {
    /// Selects the temperature source by payload shape.
    ///
    /// A valid sensor reading takes precedence over thermostat state.
    #[must_use]
    pub fn select(
        profile: &'a DeviceProfile,
        sensor: &'a SensorStatus,
        status: &'a DeviceStatus,
    ) -> Self {
        if let Some(tmp) = sensor.valid_temperature() {
            return Self::Sensor(tmp);
        }
        match status.thermostats.first() {
            Some(state) => Self::Thermostat {
                state,
                settings: profile.settings().thermostats.first(),
            },
            None => Self::None,
        }
    }
}

/// Fetches the sensor payload and writes its channels.
///
/// Does nothing unless the device is a sensor or battery powered. Returns
/// whether any channel changed; in that case the `lastUpdate` channel of
/// the primary control group is refreshed as well.
///
/// # Errors
///
/// Returns the [`ProtocolError`] of the sensor fetch unmodified.
pub async fn update_sensors<H, S>(
    profile: &DeviceProfile,
    config: &DeviceConfig,
    source: &S,
    handler: &mut H,
    status: &DeviceStatus,
) -> Result<bool, ProtocolError>
where
    H: DeviceHandler + ?Sized,
    S: SensorStatusSource + ?Sized,
{
    if !profile.capabilities().has_sensor_payload() {
        return Ok(false);
    }

    let sensor = source.fetch_sensor_status().await?;
    if !handler.channels_created() {
        handler.define_channels(ChannelSetup::Sensor {
            profile,
            sensor: &sensor,
        });
    }

    let mut updated = handler.update_wakeup_reason(&sensor.act_reasons);
    updated |= update_contact(handler, &sensor);
    updated |= match TemperatureSource::select(profile, &sensor, status) {
        TemperatureSource::Sensor(tmp) => update_sensor_temperature(handler, tmp),
        TemperatureSource::Thermostat { state, settings } => {
            update_thermostat(handler, state, settings)
        }
        TemperatureSource::None => false,
    };
    updated |= update_environment(handler, &sensor);
    updated |= update_power_supply(profile, config, handler, &sensor);
    updated |= update_motion(profile, handler, &sensor);
    updated |= handler.update_inputs(status);

    if updated {
        handler.update_channel(
            &profile.control_group(0),
            id::LAST_UPDATE,
            ChannelValue::DateTime(now_in(profile.timezone())),
        );
    }

    tracing::debug!(
        kind = ?profile.kind(),
        reasons = ?sensor.act_reasons,
        updated,
        "Updated sensor channels"
    );
    Ok(updated)
}

fn update_contact<H: DeviceHandler + ?Sized>(handler: &mut H, sensor: &SensorStatus) -> bool {
    let Some(contact) = sensor.sensor.as_ref().filter(|s| s.is_valid.unwrap_or(false)) else {
        return false;
    };

    let mut updated = handler.update_channel(
        group::SENSOR,
        id::STATE,
        ChannelValue::contact(contact.is_open()),
    );

    let error = sensor.sensor_error.as_deref();
    let changed = handler.update_channel(
        group::SENSOR,
        id::SENSOR_ERROR,
        ChannelValue::text_or_undefined(error),
    );
    if changed && error != Some("0") {
        let code = error.unwrap_or_default();
        tracing::info!(code, "Sensor reported an error");
        handler.post_event(code, true);
    }
    updated |= changed;
    updated
}

fn update_sensor_temperature<H: DeviceHandler + ?Sized>(
    handler: &mut H,
    tmp: &SensorTemperature,
) -> bool {
    let unit = tmp.unit();
    let reading = match unit {
        TemperatureUnit::Celsius => tmp.celsius,
        TemperatureUnit::Fahrenheit => tmp.fahrenheit,
    };
    let celsius = to_celsius(reading.or(tmp.value).unwrap_or(0.0), unit);
    handler.update_channel(
        group::SENSOR,
        id::TEMPERATURE,
        ChannelValue::quantity(celsius, digits::TEMP, Unit::Celsius),
    )
}

fn update_thermostat<H: DeviceHandler + ?Sized>(
    handler: &mut H,
    state: &ThermostatStatus,
    settings: Option<&ThermostatSettings>,
) -> bool {
    let device_boost = state.boost_minutes.unwrap_or(0);
    let boost_minutes = if device_boost > 0 {
        device_boost
    } else {
        settings.and_then(|s| s.boost_minutes).unwrap_or(0)
    };
    let target = state.target_t.as_ref();
    let auto = target.and_then(|t| t.enabled).unwrap_or(false);
    let schedule = state.schedule.unwrap_or(false);
    let profile_index = if schedule {
        state.schedule_profile.unwrap_or(0).saturating_add(1)
    } else {
        0
    };

    let schedule_mode = if auto { mode::AUTO } else { mode::MANUAL };

    let mut updated = false;
    updated |= handler.update_channel(group::CONTROL, id::BOOST, ChannelValue::on_off(device_boost > 0));
    updated |= handler.update_channel(
        group::CONTROL,
        id::BOOST_TIMER,
        ChannelValue::quantity(f64::from(boost_minutes), digits::NONE, Unit::Minute),
    );
    updated |= handler.update_channel(
        group::CONTROL,
        id::MODE,
        ChannelValue::Text(schedule_mode.to_string()),
    );
    updated |= handler.update_channel(
        group::CONTROL,
        id::PROFILE,
        ChannelValue::Decimal(f64::from(profile_index)),
    );
    updated |= handler.update_channel(group::DEVICE, id::SCHEDULE, ChannelValue::on_off(schedule));

    if let Some(tmp) = &state.tmp {
        let unit = TemperatureUnit::from_device(tmp.units.as_deref().unwrap_or_default());
        updated |= handler.update_channel(
            group::SENSOR,
            id::TEMPERATURE,
            ChannelValue::quantity(to_celsius(tmp.value.unwrap_or(0.0), unit), digits::TEMP, Unit::Celsius),
        );
    }
    if let Some(target) = target.filter(|t| t.value.is_some()) {
        let unit = TemperatureUnit::from_device(target.units.as_deref().unwrap_or_default());
        updated |= handler.update_channel(
            group::CONTROL,
            id::TARGET_TEMP,
            ChannelValue::quantity(
                to_celsius(target.value.unwrap_or(0.0), unit),
                digits::TEMP,
                Unit::Celsius,
            ),
        );
    }

    if let Some(pos) = state.pos {
        let position = if pos <= VALVE_POSITION_UNKNOWN {
            ChannelValue::Undefined
        } else {
            ChannelValue::quantity(pos, digits::NONE, Unit::Percent)
        };
        updated |= handler.update_channel(group::CONTROL, id::POSITION, position);
        updated |= handler.update_channel(group::SENSOR, id::STATE, ChannelValue::contact(pos > 0.0));
    }

    updated
}

fn update_environment<H: DeviceHandler + ?Sized>(handler: &mut H, sensor: &SensorStatus) -> bool {
    let mut updated = false;

    if let Some(hum) = &sensor.hum {
        updated |= handler.update_channel(
            group::SENSOR,
            id::HUMIDITY,
            ChannelValue::quantity(hum.value.unwrap_or(0.0), digits::PERCENT, Unit::Percent),
        );
    }

    if let Some(lux) = sensor.lux.as_ref().filter(|l| l.is_valid.unwrap_or(false)) {
        updated |= handler.update_channel(
            group::SENSOR,
            id::LUX,
            ChannelValue::quantity(lux.value.unwrap_or(0.0), digits::NONE, Unit::Lux),
        );
        if let Some(illumination) = &lux.illumination {
            updated |= handler.update_channel(
                group::SENSOR,
                id::ILLUMINATION,
                ChannelValue::Text(illumination.clone()),
            );
        }
    }

    if let Some(accel) = &sensor.accel {
        updated |= handler.update_channel(
            group::SENSOR,
            id::TILT,
            ChannelValue::quantity(accel.tilt.unwrap_or(0.0), digits::NONE, Unit::Degree),
        );
    }

    if let Some(flood) = sensor.flood {
        updated |= handler.update_channel(group::SENSOR, id::FLOOD, ChannelValue::on_off(flood));
    }
    if let Some(smoke) = sensor.smoke {
        updated |= handler.update_channel(group::SENSOR, id::SMOKE, ChannelValue::on_off(smoke));
    }

    if let Some(gas) = &sensor.gas_sensor {
        updated |= handler.update_channel(
            group::DEVICE,
            id::SELF_TEST,
            ChannelValue::text_or_undefined(gas.self_test_state.as_deref()),
        );
        updated |= handler.update_channel(
            group::SENSOR,
            id::ALARM_STATE,
            ChannelValue::text_or_undefined(gas.alarm_state.as_deref()),
        );
        updated |= handler.update_channel(
            group::SENSOR,
            id::SENSOR_STATE,
            ChannelValue::text_or_undefined(gas.sensor_state.as_deref()),
        );
    }

    if let Some(concentration) = sensor
        .concentration
        .as_ref()
        .filter(|c| c.is_valid.unwrap_or(false))
    {
        updated |= handler.update_channel(
            group::SENSOR,
            id::PPM,
            ChannelValue::quantity(
                f64::from(concentration.ppm.unwrap_or(0)),
                digits::NONE,
                Unit::PartsPerMillion,
            ),
        );
    }

    if let Some(adc) = sensor.adcs.first() {
        updated |= handler.update_channel(
            group::SENSOR,
            id::VOLTAGE,
            ChannelValue::quantity(adc.voltage.unwrap_or(0.0), digits::ADC, Unit::Volt),
        );
    }

    updated
}

fn update_power_supply<H: DeviceHandler + ?Sized>(
    profile: &DeviceProfile,
    config: &DeviceConfig,
    handler: &mut H,
    sensor: &SensorStatus,
) -> bool {
    let external_power = profile.settings().external_power;
    let charger = external_power == Some(1) || sensor.charger.unwrap_or(false);

    let mut updated = false;
    if external_power.is_some() || sensor.charger.is_some() {
        updated |= handler.update_channel(group::DEVICE, id::CHARGER, ChannelValue::on_off(charger));
    }

    // Sense reports no battery block.
    let Some(level) = sensor.battery_level() else {
        return updated;
    };
    updated |= handler.update_channel(
        group::BATTERY,
        id::BATTERY_LEVEL,
        ChannelValue::quantity(level, digits::NONE, Unit::Percent),
    );

    let low = !charger && level < f64::from(config.low_battery());
    let changed = handler.update_channel(group::BATTERY, id::LOW_BATTERY, ChannelValue::on_off(low));
    if changed && low {
        tracing::info!(level, threshold = config.low_battery(), "Battery low");
        handler.post_event(ALARM_LOW_BATTERY, false);
    }
    updated | changed
}

fn update_motion<H: DeviceHandler + ?Sized>(
    profile: &DeviceProfile,
    handler: &mut H,
    sensor: &SensorStatus,
) -> bool {
    let mut updated = false;

    // Sense
    if let Some(motion) = sensor.motion {
        updated |= handler.update_channel(group::SENSOR, id::MOTION, ChannelValue::on_off(motion));
    }

    // Motion
    if let Some(contact) = sensor.sensor.as_ref().filter(|s| s.has_motion()) {
        updated |= handler.update_channel(
            group::SENSOR,
            id::MOTION_ACTIVE,
            ChannelValue::on_off(contact.motion_active.unwrap_or(false)),
        );
        updated |= handler.update_channel(
            group::SENSOR,
            id::MOTION,
            ChannelValue::on_off(contact.motion.unwrap_or(false)),
        );
        if let Some(ts) = contact
            .motion_timestamp
            .filter(|ts| *ts != 0)
            .and_then(|ts| device_timestamp(profile.timezone(), ts))
        {
            updated |= handler.update_channel(
                group::SENSOR,
                id::MOTION_TIMESTAMP,
                ChannelValue::DateTime(ts),
            );
        }
    }

    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::DeviceKind;
    use crate::profile::DeviceSettings;
    use crate::sink::{ChannelSink, EventSink, InputUpdater};
    use crate::state::ChannelStore;

    /// Sensor source replaying a fixed payload.
    struct Payload(&'static str);

    impl SensorStatusSource for Payload {
        async fn fetch_sensor_status(&self) -> Result<SensorStatus, ProtocolError> {
            Ok(SensorStatus::from_json(self.0)?)
        }
    }

    struct Unreachable;

    impl SensorStatusSource for Unreachable {
        async fn fetch_sensor_status(&self) -> Result<SensorStatus, ProtocolError> {
            Err(ProtocolError::ConnectionFailed("host down".to_string()))
        }
    }

    #[derive(Default)]
    struct Recorder {
        store: ChannelStore,
        events: Vec<(String, bool)>,
        inputs_changed: bool,
    }

    impl Recorder {
        fn value(&self, group: &str, channel: &str) -> Option<ChannelValue> {
            self.store.get(group, channel)
        }
    }

    impl ChannelSink for Recorder {
        fn update_channel(&mut self, group: &str, channel: &str, value: ChannelValue) -> bool {
            self.store.update_channel(group, channel, value)
        }

        fn channels_created(&self) -> bool {
            self.store.channels_created()
        }

        fn define_channels(&mut self, setup: ChannelSetup<'_>) {
            self.store.define_channels(setup);
        }
    }

    impl EventSink for Recorder {
        fn post_event(&mut self, code: &str, is_error: bool) {
            self.events.push((code.to_string(), is_error));
        }

        fn update_wakeup_reason(&mut self, _reasons: &[String]) -> bool {
            false
        }
    }

    impl InputUpdater for Recorder {
        fn update_inputs(&mut self, _status: &DeviceStatus) -> bool {
            self.inputs_changed
        }
    }

    async fn run(profile: &DeviceProfile, payload: &'static str, recorder: &mut Recorder) -> bool {
        update_sensors(
            profile,
            &DeviceConfig::default(),
            &Payload(payload),
            recorder,
            &DeviceStatus::default(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn skipped_for_mains_powered_actuators() {
        let profile = DeviceProfile::new(DeviceKind::Relay { relays: 1 });
        let mut recorder = Recorder::default();
        let updated = update_sensors(
            &profile,
            &DeviceConfig::default(),
            &Unreachable,
            &mut recorder,
            &DeviceStatus::default(),
        )
        .await
        .unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn transport_error_propagates() {
        let profile = DeviceProfile::new(DeviceKind::DoorWindow);
        let mut recorder = Recorder::default();
        let result = update_sensors(
            &profile,
            &DeviceConfig::default(),
            &Unreachable,
            &mut recorder,
            &DeviceStatus::default(),
        )
        .await;
        assert!(matches!(result, Err(ProtocolError::ConnectionFailed(_))));
        assert!(recorder.store.is_empty());
    }

    #[tokio::test]
    async fn door_window_state_and_error_alarm() {
        let profile = DeviceProfile::new(DeviceKind::DoorWindow);
        let mut recorder = Recorder::default();
        let payload = r#"{"sensor": {"state": "OPEN", "is_valid": true}, "sensor_error": 2,
                          "lux": {"value": 30, "illumination": "dark", "is_valid": true},
                          "accel": {"tilt": 12, "vibration": 0}}"#;

        assert!(run(&profile, payload, &mut recorder).await);
        assert_eq!(recorder.value(group::SENSOR, id::STATE), Some(ChannelValue::contact(true)));
        assert_eq!(recorder.value(group::SENSOR, id::ILLUMINATION), Some(ChannelValue::Text("dark".into())));
        assert_eq!(recorder.value(group::SENSOR, id::TILT).and_then(|v| v.as_f64()), Some(12.0));
        assert_eq!(recorder.events, [("2".to_string(), true)]);
        assert_eq!(setups(&recorder), ["sensor"]);
        assert!(recorder.value("sensors", id::LAST_UPDATE).is_some());

        // Same error on the next cycle posts nothing.
        run(&profile, payload, &mut recorder).await;
        assert_eq!(recorder.events.len(), 1);
    }

    fn setups(recorder: &Recorder) -> Vec<String> {
        recorder.store.setups()
    }

    #[tokio::test]
    async fn zero_error_code_not_posted() {
        let profile = DeviceProfile::new(DeviceKind::DoorWindow);
        let mut recorder = Recorder::default();
        run(
            &profile,
            r#"{"sensor": {"state": "close", "is_valid": true}, "sensor_error": 0}"#,
            &mut recorder,
        )
        .await;
        assert_eq!(recorder.value(group::SENSOR, id::STATE), Some(ChannelValue::contact(false)));
        assert!(recorder.events.is_empty());
    }

    #[tokio::test]
    async fn invalid_contact_ignored() {
        let profile = DeviceProfile::new(DeviceKind::DoorWindow);
        let mut recorder = Recorder::default();
        run(&profile, r#"{"sensor": {"state": "open", "is_valid": false}}"#, &mut recorder).await;
        assert!(recorder.value(group::SENSOR, id::STATE).is_none());
    }

    #[tokio::test]
    async fn fahrenheit_converted_once() {
        let profile = DeviceProfile::new(DeviceKind::HumidityTemperature);
        let mut recorder = Recorder::default();
        run(
            &profile,
            r#"{"tmp": {"value": 212.0, "units": "F", "tC": 100.0, "tF": 212.0, "is_valid": true},
                "hum": {"value": 45.5}}"#,
            &mut recorder,
        )
        .await;
        assert_eq!(
            recorder.value(group::SENSOR, id::TEMPERATURE).and_then(|v| v.as_f64()),
            Some(100.0)
        );
        assert_eq!(recorder.value(group::SENSOR, id::HUMIDITY).and_then(|v| v.as_f64()), Some(45.5));
    }

    #[tokio::test]
    async fn celsius_reading_used_as_is() {
        let profile = DeviceProfile::new(DeviceKind::HumidityTemperature);
        let mut recorder = Recorder::default();
        run(
            &profile,
            r#"{"tmp": {"value": 21.44, "units": "C", "tC": 21.44, "tF": 70.6, "is_valid": true}}"#,
            &mut recorder,
        )
        .await;
        assert_eq!(
            recorder.value(group::SENSOR, id::TEMPERATURE).and_then(|v| v.as_f64()),
            Some(21.4)
        );
    }

    fn trv_status(json: &str) -> DeviceStatus {
        DeviceStatus::from_json(json).unwrap()
    }

    async fn run_trv(status: &DeviceStatus, recorder: &mut Recorder) {
        let settings = DeviceSettings::from_json(r#"{"thermostats": [{"boost_minutes": 30}]}"#).unwrap();
        let profile = DeviceProfile::new(DeviceKind::Thermostat).with_settings(settings);
        update_sensors(
            &profile,
            &DeviceConfig::default(),
            &Payload(r#"{"bat": {"value": 80}}"#),
            recorder,
            status,
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn thermostat_state() {
        let status = trv_status(
            r#"{"thermostats": [{
                "pos": 42.0,
                "target_t": {"enabled": true, "value": 68.0, "units": "F"},
                "tmp": {"value": 20.5, "units": "C", "is_valid": true},
                "schedule": true,
                "schedule_profile": 1,
                "boost_minutes": 0
            }]}"#,
        );
        let mut recorder = Recorder::default();
        run_trv(&status, &mut recorder).await;

        let number = |group, channel| recorder.value(group, channel).and_then(|v| v.as_f64());
        assert_eq!(recorder.value(group::CONTROL, id::BOOST), Some(ChannelValue::on_off(false)));
        assert_eq!(number(group::CONTROL, id::BOOST_TIMER), Some(30.0));
        assert_eq!(recorder.value(group::CONTROL, id::MODE), Some(ChannelValue::Text("auto".into())));
        assert_eq!(number(group::CONTROL, id::PROFILE), Some(2.0));
        assert_eq!(recorder.value(group::DEVICE, id::SCHEDULE), Some(ChannelValue::on_off(true)));
        assert_eq!(number(group::SENSOR, id::TEMPERATURE), Some(20.5));
        assert_eq!(number(group::CONTROL, id::TARGET_TEMP), Some(20.0));
        assert_eq!(number(group::CONTROL, id::POSITION), Some(42.0));
        assert_eq!(recorder.value(group::SENSOR, id::STATE), Some(ChannelValue::contact(true)));
    }

    #[tokio::test]
    async fn thermostat_device_boost_overrides_setting() {
        let status = trv_status(
            r#"{"thermostats": [{"schedule": false, "schedule_profile": 3, "boost_minutes": 5}]}"#,
        );
        let mut recorder = Recorder::default();
        run_trv(&status, &mut recorder).await;

        assert_eq!(recorder.value(group::CONTROL, id::BOOST), Some(ChannelValue::on_off(true)));
        assert_eq!(
            recorder.value(group::CONTROL, id::BOOST_TIMER).and_then(|v| v.as_f64()),
            Some(5.0)
        );
        assert_eq!(recorder.value(group::CONTROL, id::MODE), Some(ChannelValue::Text("manual".into())));
        assert_eq!(
            recorder.value(group::CONTROL, id::PROFILE).and_then(|v| v.as_f64()),
            Some(0.0)
        );
    }

    #[tokio::test]
    async fn thermostat_profile_index_saturates() {
        let status = trv_status(r#"{"thermostats": [{"schedule": true, "schedule_profile": 4294967295}]}"#);
        let mut recorder = Recorder::default();
        run_trv(&status, &mut recorder).await;

        assert_eq!(
            recorder.value(group::CONTROL, id::PROFILE).and_then(|v| v.as_f64()),
            Some(f64::from(u32::MAX))
        );
    }

    #[tokio::test]
    async fn uncalibrated_valve_position_undefined() {
        let status = trv_status(r#"{"thermostats": [{"pos": -1}]}"#);
        let mut recorder = Recorder::default();
        run_trv(&status, &mut recorder).await;

        assert_eq!(recorder.value(group::CONTROL, id::POSITION), Some(ChannelValue::Undefined));
        assert_eq!(recorder.value(group::SENSOR, id::STATE), Some(ChannelValue::contact(false)));
    }

    #[tokio::test]
    async fn sensor_temperature_beats_thermostat() {
        let profile = DeviceProfile::new(DeviceKind::Thermostat);
        let status = trv_status(r#"{"thermostats": [{"pos": 10, "tmp": {"value": 30.0}}]}"#);
        let mut recorder = Recorder::default();
        update_sensors(
            &profile,
            &DeviceConfig::default(),
            &Payload(r#"{"tmp": {"tC": 19.0, "units": "C", "is_valid": true}}"#),
            &mut recorder,
            &status,
        )
        .await
        .unwrap();

        assert_eq!(
            recorder.value(group::SENSOR, id::TEMPERATURE).and_then(|v| v.as_f64()),
            Some(19.0)
        );
        assert!(recorder.value(group::CONTROL, id::POSITION).is_none());
    }

    #[tokio::test]
    async fn gas_detector() {
        let profile = DeviceProfile::new(DeviceKind::Gas);
        let mut recorder = Recorder::default();
        run(
            &profile,
            r#"{"gas_sensor": {"sensor_state": "normal", "self_test_state": "completed", "alarm_state": "none"},
                "concentration": {"ppm": 120, "is_valid": true}}"#,
            &mut recorder,
        )
        .await;

        assert_eq!(
            recorder.value(group::DEVICE, id::SELF_TEST),
            Some(ChannelValue::Text("completed".into()))
        );
        assert_eq!(
            recorder.value(group::SENSOR, id::SENSOR_STATE),
            Some(ChannelValue::Text("normal".into()))
        );
        assert_eq!(recorder.value(group::SENSOR, id::PPM).and_then(|v| v.as_f64()), Some(120.0));
        assert!(recorder.value(group::BATTERY, id::BATTERY_LEVEL).is_none());
    }

    #[tokio::test]
    async fn invalid_concentration_skipped() {
        let profile = DeviceProfile::new(DeviceKind::Gas);
        let mut recorder = Recorder::default();
        run(&profile, r#"{"concentration": {"ppm": 0, "is_valid": false}}"#, &mut recorder).await;
        assert!(recorder.value(group::SENSOR, id::PPM).is_none());
    }

    #[tokio::test]
    async fn flood_smoke_and_adc() {
        let profile = DeviceProfile::new(DeviceKind::Flood);
        let mut recorder = Recorder::default();
        run(
            &profile,
            r#"{"flood": true, "smoke": false, "adcs": [{"voltage": 3.456}, {"voltage": 9.9}]}"#,
            &mut recorder,
        )
        .await;

        assert_eq!(recorder.value(group::SENSOR, id::FLOOD), Some(ChannelValue::on_off(true)));
        assert_eq!(recorder.value(group::SENSOR, id::SMOKE), Some(ChannelValue::on_off(false)));
        assert_eq!(recorder.value(group::SENSOR, id::VOLTAGE).and_then(|v| v.as_f64()), Some(3.46));
    }

    #[tokio::test]
    async fn low_battery_alarm_on_transition_only() {
        let profile = DeviceProfile::new(DeviceKind::HumidityTemperature);
        let mut recorder = Recorder::default();

        run(&profile, r#"{"bat": {"value": 25, "voltage": 2.9}}"#, &mut recorder).await;
        assert_eq!(recorder.value(group::BATTERY, id::LOW_BATTERY), Some(ChannelValue::on_off(false)));
        assert!(recorder.events.is_empty());

        run(&profile, r#"{"bat": {"value": 15, "voltage": 2.6}}"#, &mut recorder).await;
        assert_eq!(recorder.value(group::BATTERY, id::LOW_BATTERY), Some(ChannelValue::on_off(true)));
        assert_eq!(recorder.events, [(ALARM_LOW_BATTERY.to_string(), false)]);

        run(&profile, r#"{"bat": {"value": 15, "voltage": 2.6}}"#, &mut recorder).await;
        assert_eq!(recorder.events.len(), 1);
    }

    #[tokio::test]
    async fn charger_suppresses_low_battery() {
        let profile = DeviceProfile::new(DeviceKind::Motion);
        let mut recorder = Recorder::default();
        run(&profile, r#"{"charger": true, "bat": {"value": 5}}"#, &mut recorder).await;

        assert_eq!(recorder.value(group::DEVICE, id::CHARGER), Some(ChannelValue::on_off(true)));
        assert_eq!(recorder.value(group::BATTERY, id::LOW_BATTERY), Some(ChannelValue::on_off(false)));
        assert!(recorder.events.is_empty());
    }

    #[tokio::test]
    async fn external_power_setting_counts_as_charger() {
        let settings = DeviceSettings {
            external_power: Some(1),
            ..Default::default()
        };
        let profile = DeviceProfile::new(DeviceKind::HumidityTemperature).with_settings(settings);
        let mut recorder = Recorder::default();
        run(&profile, r#"{"bat": {"value": 0}}"#, &mut recorder).await;

        assert_eq!(recorder.value(group::DEVICE, id::CHARGER), Some(ChannelValue::on_off(true)));
        assert!(recorder.events.is_empty());
    }

    #[tokio::test]
    async fn charger_untouched_when_unknown() {
        let profile = DeviceProfile::new(DeviceKind::Flood);
        let mut recorder = Recorder::default();
        run(&profile, r#"{"flood": false}"#, &mut recorder).await;
        assert!(recorder.value(group::DEVICE, id::CHARGER).is_none());
    }

    #[tokio::test]
    async fn motion_sensor_fields() {
        let settings = DeviceSettings {
            timezone: Some("UTC".to_string()),
            ..Default::default()
        };
        let profile = DeviceProfile::new(DeviceKind::Motion).with_settings(settings);
        let mut recorder = Recorder::default();
        run(
            &profile,
            r#"{"sensor": {"motion": true, "active": true, "timestamp": 1705314600, "is_valid": true}}"#,
            &mut recorder,
        )
        .await;

        assert_eq!(recorder.value(group::SENSOR, id::MOTION), Some(ChannelValue::on_off(true)));
        assert_eq!(recorder.value(group::SENSOR, id::MOTION_ACTIVE), Some(ChannelValue::on_off(true)));
        let Some(ChannelValue::DateTime(ts)) = recorder.value(group::SENSOR, id::MOTION_TIMESTAMP) else {
            panic!("expected a motion timestamp");
        };
        assert_eq!(ts.timestamp(), 1_705_314_600);
    }

    #[tokio::test]
    async fn sense_motion_flag() {
        let profile = DeviceProfile::new(DeviceKind::Sense);
        let mut recorder = Recorder::default();
        run(&profile, r#"{"motion": false}"#, &mut recorder).await;

        assert_eq!(recorder.value(group::SENSOR, id::MOTION), Some(ChannelValue::on_off(false)));
        assert!(recorder.value(group::SENSOR, id::MOTION_ACTIVE).is_none());
    }

    #[tokio::test]
    async fn input_changes_refresh_last_update() {
        let profile = DeviceProfile::new(DeviceKind::Button);
        let mut recorder = Recorder {
            inputs_changed: true,
            ..Recorder::default()
        };
        assert!(run(&profile, "{}", &mut recorder).await);
        assert!(recorder.value(group::STATUS, id::LAST_UPDATE).is_some());
    }

    #[tokio::test]
    async fn nothing_changed_no_last_update() {
        let profile = DeviceProfile::new(DeviceKind::Button);
        let mut recorder = Recorder::default();
        assert!(!run(&profile, "{}", &mut recorder).await);
        assert!(recorder.value(group::STATUS, id::LAST_UPDATE).is_none());
    }
}
