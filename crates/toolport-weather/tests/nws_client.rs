// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weather reports against a mocked National Weather Service.

use std::time::Duration;

use toolport_core::ToolportError;
use toolport_resilience::RetryPolicy;
use toolport_test_utils::nws;
use toolport_weather::client::MAX_RESPONSE_BYTES;
use toolport_weather::{NO_ALERTS, NO_PERIODS, WeatherClient, WeatherService};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(base_url: &str, timeout: Duration) -> WeatherService {
    let client = WeatherClient::new("toolport-tests/1.0", timeout)
        .unwrap()
        .with_base_url(base_url)
        .with_retry_policy(RetryPolicy {
            max_retries: 1,
            base_delay: Duration::ZERO,
        });
    WeatherService::with_client(client, 5)
}

#[tokio::test]
async fn alerts_are_rendered_and_joined() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alerts/active/area/CA"))
        .and(header("user-agent", "toolport-tests/1.0"))
        .and(header("accept", "application/geo+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nws::alerts_body(vec![
            nws::alert_feature("Wind Advisory", "San Francisco", "Moderate"),
            nws::sparse_alert_feature(),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let report = service(&server.uri(), Duration::from_secs(5))
        .alerts_report("ca")
        .await
        .unwrap();

    let blocks: Vec<&str> = report.split("\n---\n").collect();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].starts_with("Event: Wind Advisory\nArea: San Francisco\nSeverity: Moderate"));
    assert!(blocks[0].contains("Instructions: Monitor local media for updates."));
    assert!(blocks[1].contains("Event: Unknown"));
    assert!(blocks[1].contains("Description: No description available"));
}

#[tokio::test]
async fn zero_alerts_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alerts/active/area/WY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nws::alerts_body(vec![])))
        .mount(&server)
        .await;

    let report = service(&server.uri(), Duration::from_secs(5))
        .alerts_report("WY")
        .await
        .unwrap();
    assert_eq!(report, NO_ALERTS);
}

#[tokio::test]
async fn invalid_state_never_reaches_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = service(&server.uri(), Duration::from_secs(5))
        .alerts_report("California")
        .await
        .unwrap_err();
    assert!(matches!(err, ToolportError::InvalidInput(_)));
}

#[tokio::test]
async fn forecast_follows_gridpoint_url_and_truncates() {
    let server = MockServer::start().await;
    let forecast_url = format!("{}/gridpoints/MTR/85,105/forecast", server.uri());
    Mock::given(method("GET"))
        .and(path("/points/37.7749,-122.4194"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nws::points_body(&forecast_url)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gridpoints/MTR/85,105/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nws::forecast_body(14)))
        .expect(1)
        .mount(&server)
        .await;

    let report = service(&server.uri(), Duration::from_secs(5))
        .forecast_report(37.7749, -122.4194)
        .await
        .unwrap();

    let blocks: Vec<&str> = report.split("\n---\n").collect();
    assert_eq!(blocks.len(), 5);
    assert_eq!(
        blocks[0],
        "Today:\nTemperature: 60°F\nWind: 5 to 10 mph NW\nForecast: Today: sunny, with a high near 60."
    );
    assert!(blocks[4].starts_with("Tuesday:"));
}

#[tokio::test]
async fn empty_forecast_message() {
    let server = MockServer::start().await;
    let forecast_url = format!("{}/gridpoints/BOU/1,1/forecast", server.uri());
    Mock::given(method("GET"))
        .and(path("/points/40,-105"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nws::points_body(&forecast_url)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gridpoints/BOU/1,1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nws::forecast_body(0)))
        .mount(&server)
        .await;

    let report = service(&server.uri(), Duration::from_secs(5))
        .forecast_report(40.0, -105.0)
        .await
        .unwrap();
    assert_eq!(report, NO_PERIODS);
}

#[tokio::test]
async fn missing_forecast_url_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/points/0,-140"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nws::points_body_without_forecast()))
        .mount(&server)
        .await;

    let err = service(&server.uri(), Duration::from_secs(5))
        .forecast_report(0.0, -140.0)
        .await
        .unwrap_err();
    assert!(matches!(err, ToolportError::UpstreamMalformed { .. }), "got {err:?}");
}

#[tokio::test]
async fn not_found_point_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/points/51.5,-0.12"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "title": "Data Unavailable For Requested Point"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = service(&server.uri(), Duration::from_secs(5))
        .forecast_report(51.5, -0.12)
        .await
        .unwrap_err();
    assert!(matches!(err, ToolportError::UpstreamUnavailable { .. }));
    assert!(err.to_string().contains("404"), "got: {err}");
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = service(&server.uri(), Duration::from_secs(5))
        .alerts_report("TX")
        .await
        .unwrap_err();
    assert!(matches!(err, ToolportError::UpstreamMalformed { .. }));
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(nws::alerts_body(vec![]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = service(&server.uri(), Duration::from_millis(100))
        .alerts_report("FL")
        .await
        .unwrap_err();
    assert!(matches!(err, ToolportError::UpstreamUnavailable { .. }));
    assert!(err.to_string().contains("timed out"), "got: {err}");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alerts/active/area/TX"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![b' '; MAX_RESPONSE_BYTES + 1]))
        .mount(&server)
        .await;

    let err = service(&server.uri(), Duration::from_secs(5))
        .alerts_report("TX")
        .await
        .unwrap_err();
    assert!(matches!(err, ToolportError::UpstreamMalformed { .. }), "got {err:?}");
    assert!(err.to_string().contains("byte limit"), "got: {err}");
}
