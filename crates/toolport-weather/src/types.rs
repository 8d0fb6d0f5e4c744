// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed projections of National Weather Service GeoJSON bodies.
//!
//! Every field the reports read is optional: the API omits or nulls fields
//! freely, and a missing value is rendered as a placeholder rather than
//! failing the call.

use serde::Deserialize;

/// `GET /alerts/active/area/{state}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertCollection {
    #[serde(default)]
    pub features: Vec<AlertFeature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertFeature {
    #[serde(default)]
    pub properties: AlertProperties,
}

/// The alert fields included in a report.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertProperties {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub area_desc: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instruction: Option<String>,
}

/// `GET /points/{lat},{lon}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PointResponse {
    #[serde(default)]
    pub properties: PointProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PointProperties {
    /// Gridpoint forecast URL. Absent for points the NWS does not cover.
    #[serde(default)]
    pub forecast: Option<String>,
}

/// `GET` of a gridpoint forecast URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub properties: ForecastProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastProperties {
    #[serde(default)]
    pub periods: Vec<ForecastPeriod>,
}

/// One forecast period ("Tonight", "Monday", ...).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub temperature: Option<Temperature>,
    #[serde(default)]
    pub temperature_unit: Option<String>,
    #[serde(default)]
    pub wind_speed: Option<String>,
    #[serde(default)]
    pub wind_direction: Option<String>,
    #[serde(default)]
    pub detailed_forecast: Option<String>,
}

/// A period temperature: a bare number, or a quantitative value object when
/// the API is asked for its newer representation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Temperature {
    Number(f64),
    Quantity {
        #[serde(default)]
        value: Option<f64>,
    },
}

impl Temperature {
    pub fn value(self) -> Option<f64> {
        match self {
            Temperature::Number(v) => Some(v),
            Temperature::Quantity { value } => value,
        }
    }
}
