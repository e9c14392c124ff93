// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP bridge using wiremock.

use std::time::Duration;

use serde_json::json;
use thermobridge::{
    BridgeConfig, Characteristic, CharacteristicValue, CurrentHeatingCoolingState, Error,
    HttpClient, ProtocolError, RemoteThermostat, TargetHeatingCoolingState,
    TemperatureDisplayUnits, ThermostatAccessory, UpdateCommand,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_PATH: &str = "/thermostat";
const API_KEY: &str = "s3cret";

fn config_for(server: &MockServer) -> BridgeConfig {
    BridgeConfig::new(format!("{}{API_PATH}", server.uri()), API_KEY).with_name("Hallway")
}

fn accessory_for(server: &MockServer) -> ThermostatAccessory<HttpClient> {
    ThermostatAccessory::new(config_for(server)).unwrap()
}

/// Config pointing at a local port with no listener behind it.
fn refused_config() -> BridgeConfig {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    BridgeConfig::new(format!("http://{addr}{API_PATH}"), API_KEY)
}

fn state_document() -> serde_json::Value {
    json!({
        "current_temp": 21.5,
        "target_temp": 22.5,
        "target_heat_cool_state": "auto",
        "current_heat_cool_state": "heat",
        "temp_display_units": "fahrenheit"
    })
}

async fn serve_state(server: &MockServer, document: serde_json::Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(document))
        .expect(expected_calls)
        .mount(server)
        .await;
}

// ============================================================================
// HttpClient Tests
// ============================================================================

mod http_client {
    use super::*;

    #[tokio::test]
    async fn fetch_state_returns_body() {
        let server = MockServer::start().await;
        serve_state(&server, state_document(), 1).await;

        let client = HttpClient::from_config(&config_for(&server)).unwrap();
        let document = client.fetch_state().await.unwrap().parse().unwrap();

        assert!((document.current_temperature().unwrap() - 21.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn send_update_posts_single_field_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(API_PATH))
            .and(body_json(json!({ "target_temp": 20.0, "api_key": API_KEY })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::from_config(&config_for(&server)).unwrap();
        client
            .send_update(UpdateCommand::TargetTemperature(20.0))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = HttpClient::from_config(&config_for(&server)).unwrap();
        let err = client.fetch_state().await.unwrap_err();
        assert!(matches!(err, ProtocolError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn slow_remote_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(state_document())
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let config = config_for(&server).with_timeout(Duration::from_millis(50));
        let client = HttpClient::from_config(&config).unwrap();
        let err = client.fetch_state().await.unwrap_err();
        assert!(matches!(err, ProtocolError::Timeout(50)));
    }

    #[tokio::test]
    async fn connection_refused_is_reported() {
        let client = HttpClient::from_config(&refused_config()).unwrap();
        let err = client.fetch_state().await.unwrap_err();
        assert!(matches!(err, ProtocolError::Http(_)));
    }
}

// ============================================================================
// Read Tests
// ============================================================================

mod reads {
    use super::*;

    #[tokio::test]
    async fn current_temperature() {
        let server = MockServer::start().await;
        serve_state(&server, json!({ "current_temp": 21.5 }), 1).await;

        let accessory = accessory_for(&server);
        let value = accessory.bridge().current_temperature().await.unwrap();
        assert!((value - 21.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn every_characteristic_through_the_service() {
        let server = MockServer::start().await;
        serve_state(&server, state_document(), 5).await;

        let accessory = accessory_for(&server);
        let service = &accessory.services()[0];

        let expected = [
            (Characteristic::CurrentTemperature, CharacteristicValue::Float(21.5)),
            (Characteristic::TargetTemperature, CharacteristicValue::Float(22.5)),
            (Characteristic::TargetHeatingCoolingState, CharacteristicValue::UInt8(3)),
            (Characteristic::CurrentHeatingCoolingState, CharacteristicValue::UInt8(1)),
            (Characteristic::TemperatureDisplayUnits, CharacteristicValue::UInt8(1)),
        ];
        for (characteristic, value) in expected {
            assert_eq!(service.get(characteristic).await.unwrap(), value, "{characteristic}");
        }
    }

    #[tokio::test]
    async fn typed_enumerations() {
        let server = MockServer::start().await;
        serve_state(&server, state_document(), 3).await;

        let accessory = accessory_for(&server);
        let bridge = accessory.bridge();
        assert_eq!(
            bridge.target_heating_cooling_state().await.unwrap(),
            TargetHeatingCoolingState::Auto
        );
        assert_eq!(
            bridge.current_heating_cooling_state().await.unwrap(),
            CurrentHeatingCoolingState::Heat
        );
        assert_eq!(
            bridge.temperature_display_units().await.unwrap(),
            TemperatureDisplayUnits::Fahrenheit
        );
    }

    #[tokio::test]
    async fn server_error_is_remote_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(5)
            .mount(&server)
            .await;

        let accessory = accessory_for(&server);
        let service = &accessory.services()[0];
        for characteristic in Characteristic::ALL {
            let err = service.get(characteristic).await.unwrap_err();
            assert!(err.is_remote_unavailable(), "{characteristic}: {err}");
        }
    }

    #[tokio::test]
    async fn connection_refused_is_remote_unavailable() {
        let accessory = ThermostatAccessory::new(refused_config()).unwrap();
        let err = accessory.bridge().current_temperature().await.unwrap_err();
        assert!(err.is_remote_unavailable(), "{err}");
        assert!(matches!(err, Error::Protocol(ProtocolError::Http(_))));
    }

    #[tokio::test]
    async fn unknown_display_unit_is_malformed() {
        let server = MockServer::start().await;
        serve_state(&server, json!({ "temp_display_units": "kelvin" }), 1).await;

        let accessory = accessory_for(&server);
        let err = accessory
            .bridge()
            .temperature_display_units()
            .await
            .unwrap_err();
        assert!(err.is_malformed_remote_state());
        assert!(matches!(err, Error::Parse(_)));
    }

    #[tokio::test]
    async fn missing_field_is_malformed() {
        let server = MockServer::start().await;
        serve_state(&server, json!({ "current_temp": 21.5 }), 1).await;

        let accessory = accessory_for(&server);
        let err = accessory.bridge().target_temperature().await.unwrap_err();
        assert!(err.is_malformed_remote_state());
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let accessory = accessory_for(&server);
        let err = accessory.bridge().current_temperature().await.unwrap_err();
        assert!(err.is_malformed_remote_state());
    }
}

// ============================================================================
// Write Tests
// ============================================================================

mod writes {
    use super::*;

    async fn expect_post(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path(API_PATH))
            .and(body_json(body))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn target_mode_cool() {
        let server = MockServer::start().await;
        expect_post(
            &server,
            json!({ "target_heat_cool_state": "cool", "api_key": API_KEY }),
        )
        .await;

        let accessory = accessory_for(&server);
        accessory.services()[0]
            .set(
                Characteristic::TargetHeatingCoolingState,
                CharacteristicValue::UInt8(2),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn target_temperature() {
        let server = MockServer::start().await;
        expect_post(&server, json!({ "target_temp": 23.5, "api_key": API_KEY })).await;

        let accessory = accessory_for(&server);
        accessory.bridge().set_target_temperature(23.5).await.unwrap();
    }

    #[tokio::test]
    async fn display_units() {
        let server = MockServer::start().await;
        expect_post(
            &server,
            json!({ "temp_display_units": "celsius", "api_key": API_KEY }),
        )
        .await;

        let accessory = accessory_for(&server);
        accessory
            .bridge()
            .set_temperature_display_units(TemperatureDisplayUnits::Celsius)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn write_does_not_read_back() {
        let server = MockServer::start().await;
        expect_post(
            &server,
            json!({ "target_heat_cool_state": "off", "api_key": API_KEY }),
        )
        .await;
        serve_state(&server, state_document(), 0).await;

        let accessory = accessory_for(&server);
        accessory
            .bridge()
            .set_target_heating_cooling_state(TargetHeatingCoolingState::Off)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rejected_write_is_remote_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let accessory = accessory_for(&server);
        let err = accessory
            .bridge()
            .set_target_temperature(20.0)
            .await
            .unwrap_err();
        assert!(err.is_remote_unavailable());
    }

    #[tokio::test]
    async fn connection_refused_is_remote_unavailable() {
        let accessory = ThermostatAccessory::new(refused_config()).unwrap();
        let err = accessory
            .bridge()
            .set_target_temperature(20.0)
            .await
            .unwrap_err();
        assert!(err.is_remote_unavailable(), "{err}");
        assert!(matches!(err, Error::Protocol(ProtocolError::Http(_))));
    }

    #[tokio::test]
    async fn invalid_code_never_reaches_remote() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let accessory = accessory_for(&server);
        let err = accessory.services()[0]
            .set(
                Characteristic::TemperatureDisplayUnits,
                CharacteristicValue::UInt8(5),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Value(_)));
    }
}

// ============================================================================
// Construction Tests
// ============================================================================

mod construction {
    use super::*;

    #[test]
    fn from_host_block() {
        let accessory = ThermostatAccessory::from_json(json!({
            "accessory": "rpi-thermostat",
            "name": "Hallway",
            "thermostat_api": "http://192.168.1.20:5000/thermostat",
            "api_key": API_KEY
        }))
        .unwrap();
        assert_eq!(accessory.name(), "Hallway");
        assert_eq!(accessory.services().len(), 1);
    }

    #[test]
    fn missing_key_fails_fast() {
        let err = ThermostatAccessory::from_json(json!({
            "name": "Hallway",
            "thermostat_api": "http://192.168.1.20:5000/thermostat"
        }))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn empty_url_fails_fast() {
        let err = ThermostatAccessory::new(BridgeConfig::new("", API_KEY)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
