// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! National Weather Service response bodies, trimmed to the fields the
//! weather server reads plus a few it ignores.

use serde_json::{Value, json};

/// An `/alerts/active/area/{state}` body with the given alert features.
pub fn alerts_body(features: Vec<Value>) -> Value {
    json!({
        "@context": ["https://geojson.org/geojson-ld/geojson-context.jsonld"],
        "type": "FeatureCollection",
        "title": "Current watches, warnings, and advisories",
        "features": features,
    })
}

/// A fully populated alert feature.
pub fn alert_feature(event: &str, area: &str, severity: &str) -> Value {
    json!({
        "id": format!("urn:oid:2.49.0.1.840.0.{}", event.len()),
        "type": "Feature",
        "properties": {
            "event": event,
            "areaDesc": area,
            "severity": severity,
            "certainty": "Likely",
            "description": format!("{event} in effect for {area}."),
            "instruction": "Monitor local media for updates.",
        }
    })
}

/// An alert feature whose properties carry none of the formatted fields.
pub fn sparse_alert_feature() -> Value {
    json!({
        "type": "Feature",
        "properties": { "status": "Actual" }
    })
}

/// A `/points/{lat},{lon}` body pointing at `forecast_url`.
pub fn points_body(forecast_url: &str) -> Value {
    json!({
        "type": "Feature",
        "properties": {
            "gridId": "MTR",
            "gridX": 85,
            "gridY": 105,
            "forecast": forecast_url,
            "forecastHourly": format!("{forecast_url}/hourly"),
        }
    })
}

/// A `/points` body without a forecast URL (e.g. a point over open ocean).
pub fn points_body_without_forecast() -> Value {
    json!({ "type": "Feature", "properties": { "gridId": null } })
}

/// A forecast period with the given name and temperature in Fahrenheit.
pub fn forecast_period(number: u32, name: &str, temperature: i64) -> Value {
    json!({
        "number": number,
        "name": name,
        "isDaytime": number % 2 == 1,
        "temperature": temperature,
        "temperatureUnit": "F",
        "windSpeed": "5 to 10 mph",
        "windDirection": "NW",
        "shortForecast": "Sunny",
        "detailedForecast": format!("{name}: sunny, with a high near {temperature}."),
    })
}

/// A gridpoint forecast body with `count` generated periods.
pub fn forecast_body(count: u32) -> Value {
    let names = [
        "Today",
        "Tonight",
        "Monday",
        "Monday Night",
        "Tuesday",
        "Tuesday Night",
        "Wednesday",
        "Wednesday Night",
    ];
    let periods: Vec<Value> = (0..count)
        .map(|i| {
            let name = names[i as usize % names.len()];
            forecast_period(i + 1, name, 60 + i64::from(i))
        })
        .collect();
    json!({
        "type": "Feature",
        "properties": { "units": "us", "periods": periods }
    })
}
