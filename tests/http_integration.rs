// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP client and device sessions using wiremock.

use std::time::Duration;

use shellor_lib::channel::{ChannelValue, group, id};
use shellor_lib::event::DeviceEvent;
use shellor_lib::protocol::{HttpClient, HttpConfig, SensorStatusSource};
use shellor_lib::updater::ALARM_LOW_BATTERY;
use shellor_lib::{DeviceConfig, DeviceKind, DeviceSession, Error, ProtocolError};
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpConfig {
    let addr = server.address();
    HttpConfig::new(addr.ip().to_string()).with_port(addr.port())
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ============================================================================
// HttpClient Tests
// ============================================================================

mod http_client {
    use super::*;

    #[tokio::test]
    async fn fetch_status_parses_meters() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "/status",
            serde_json::json!({
                "wifi_sta": {"connected": true, "ssid": "home", "rssi": -58},
                "uptime": 5120,
                "has_update": false,
                "meters": [{"power": 12.5, "is_valid": true, "timestamp": 1705314600,
                            "counters": [12.1, 12.4, 12.6], "total": 94210}],
                "unknown_block": {"ignored": true}
            }),
        )
        .await;

        let client = client_for(&server).into_client().unwrap();
        let status = client.fetch_status().await.unwrap();

        assert_eq!(status.uptime, Some(5120));
        assert_eq!(status.rssi(), Some(-58));
        assert_eq!(status.meters.len(), 1);
        assert_eq!(status.meters[0].last_minute(), Some(12.1));
    }

    #[tokio::test]
    async fn fetch_sensor_status_uses_status_endpoint() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "/status",
            serde_json::json!({
                "sensor": {"state": "open", "is_valid": true},
                "tmp": {"value": 71.6, "units": "F", "tC": 22.0, "tF": 71.6, "is_valid": true},
                "bat": {"value": 87, "voltage": 2.97},
                "act_reasons": ["sensor"]
            }),
        )
        .await;

        let client = client_for(&server).into_client().unwrap();
        let sensor = client.fetch_sensor_status().await.unwrap();

        assert!(sensor.sensor.as_ref().unwrap().is_open());
        assert_eq!(sensor.battery_level(), Some(87.0));
        assert_eq!(sensor.act_reasons, ["sensor"]);
    }

    #[tokio::test]
    async fn basic_auth_sent_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/status"))
            .and(basic_auth("admin", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"uptime": 42})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server)
            .with_credentials("admin", "secret")
            .into_client()
            .unwrap();

        assert_eq!(client.fetch_status().await.unwrap().uptime, Some(42));
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = client_for(&server).into_client().unwrap();
        assert!(matches!(
            client.fetch_status().await,
            Err(ProtocolError::AuthenticationFailed)
        ));
    }

    #[tokio::test]
    async fn server_error_maps_to_connection_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server).into_client().unwrap();
        let Err(ProtocolError::ConnectionFailed(message)) = client.fetch_status().await else {
            panic!("expected a connection failure");
        };
        assert!(message.starts_with("HTTP 503"));
    }

    #[tokio::test]
    async fn malformed_body_maps_to_invalid_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).into_client().unwrap();
        assert!(matches!(
            client.fetch_status().await,
            Err(ProtocolError::InvalidPayload(_))
        ));
    }

    #[tokio::test]
    async fn slow_device_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client: HttpClient = client_for(&server)
            .with_timeout(Duration::from_millis(100))
            .into_client()
            .unwrap();

        assert!(matches!(
            client.fetch_status().await,
            Err(ProtocolError::Timeout(100))
        ));
    }
}

// ============================================================================
// DeviceSession Tests
// ============================================================================

mod device_session {
    use super::*;

    #[tokio::test]
    async fn connect_reads_settings() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "/settings",
            serde_json::json!({"timezone": "Europe/Berlin", "calibrated": true}),
        )
        .await;

        let client = client_for(&server).into_client().unwrap();
        let session = DeviceSession::connect(&client, DeviceKind::Roller, DeviceConfig::default())
            .await
            .unwrap();

        assert_eq!(session.profile().timezone(), "Europe/Berlin");
        assert_eq!(session.profile().settings().calibrated, Some(true));
    }

    #[tokio::test]
    async fn poll_energy_meter() {
        let server = MockServer::start().await;
        mount_json(&server, "/settings", serde_json::json!({"timezone": "UTC"})).await;
        mount_json(
            &server,
            "/status",
            serde_json::json!({
                "uptime": 86400,
                "wifi_sta": {"rssi": -85},
                "emeters": [
                    {"power": 230.0, "reactive": 0.0, "voltage": 231.2, "current": 1.0,
                     "is_valid": true, "total": 15000.0, "total_returned": 0.0},
                    {"power": 3.0, "reactive": 4.0, "voltage": 230.0, "current": 0.02,
                     "is_valid": true, "total": 1000.0, "total_returned": 250.0},
                    {"power": 999.0, "is_valid": false, "total": 99999.0}
                ]
            }),
        )
        .await;

        let client = client_for(&server).into_client().unwrap();
        let mut session = DeviceSession::connect(
            &client,
            DeviceKind::EnergyMeter { phases: 3 },
            DeviceConfig::default(),
        )
        .await
        .unwrap();

        assert!(session.poll(&client).await.unwrap());

        let reader = session.reader();
        let number = |group: &str, channel: &str| reader.get(group, channel).and_then(|v| v.as_f64());
        assert_eq!(number(group::DEVICE, id::WIFI_SIGNAL), Some(1.0));
        assert_eq!(number("meter1", id::TOTAL_KWH), Some(15.0));
        assert_eq!(number("meter2", id::RETURNED_KWH), Some(0.25));
        assert_eq!(number("meter1", id::POWER_FACTOR), Some(1.0));
        assert!((number("meter2", id::POWER_FACTOR).unwrap() - 0.6).abs() < 1e-9);
        assert!(reader.get("meter3", id::CURRENT_WATTS).is_none());
        assert_eq!(number(group::DEVICE, id::ACCUMULATED_WATTS), Some(233.0));
        assert_eq!(number(group::DEVICE, id::ACCUMULATED_TOTAL), Some(16.0));
        assert_eq!(number(group::DEVICE, id::ACCUMULATED_RETURNED), Some(0.25));
        assert_eq!(
            session.store().setups(),
            ["device", "emeter:meter1", "emeter:meter2"]
        );
    }

    #[tokio::test]
    async fn poll_door_window_sensor() {
        let server = MockServer::start().await;
        mount_json(&server, "/settings", serde_json::json!({})).await;
        mount_json(
            &server,
            "/status",
            serde_json::json!({
                "uptime": 3,
                "sensor": {"state": "close", "is_valid": true},
                "sensor_error": 0,
                "tmp": {"value": 50.0, "units": "F", "tC": 10.0, "tF": 50.0, "is_valid": true},
                "lux": {"value": 120, "illumination": "twilight", "is_valid": true},
                "accel": {"tilt": 90, "vibration": 0},
                "bat": {"value": 12, "voltage": 2.6},
                "act_reasons": ["sensor"]
            }),
        )
        .await;

        let client = client_for(&server).into_client().unwrap();
        let mut session =
            DeviceSession::connect(&client, DeviceKind::DoorWindow, DeviceConfig::default())
                .await
                .unwrap();
        let mut events = session.subscribe();

        assert!(session.poll(&client).await.unwrap());

        let reader = session.reader();
        assert_eq!(reader.get(group::SENSOR, id::STATE), Some(ChannelValue::contact(false)));
        assert_eq!(
            reader.get(group::SENSOR, id::TEMPERATURE).and_then(|v| v.as_f64()),
            Some(10.0)
        );
        assert_eq!(reader.get(group::BATTERY, id::LOW_BATTERY), Some(ChannelValue::on_off(true)));
        assert!(reader.get(group::DEVICE, id::UPTIME).is_none());
        assert!(reader.get(group::SENSOR, id::LAST_UPDATE).is_some());

        let mut alarms = Vec::new();
        while let Ok(event) = events.try_recv() {
            if let DeviceEvent::Alarm { code, .. } = event {
                alarms.push(code);
            }
        }
        assert_eq!(alarms, [ALARM_LOW_BATTERY]);
    }

    #[tokio::test]
    async fn poll_failure_propagates() {
        let server = MockServer::start().await;
        mount_json(&server, "/settings", serde_json::json!({})).await;
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server).into_client().unwrap();
        let mut session = DeviceSession::connect(&client, DeviceKind::Flood, DeviceConfig::default())
            .await
            .unwrap();

        assert!(matches!(
            session.poll(&client).await,
            Err(Error::Protocol(ProtocolError::ConnectionFailed(_)))
        ));
        assert!(session.store().is_empty());
    }
}
