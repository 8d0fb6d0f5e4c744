// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the National Weather Service API.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use toolport_core::ToolportError;
use toolport_resilience::{RetryPolicy, read_body_capped, send_with_retry};
use tracing::{debug, info};

use crate::types::{AlertCollection, AlertProperties, ForecastPeriod, ForecastResponse, PointResponse};

/// Base URL for the NWS API.
pub const API_BASE_URL: &str = "https://api.weather.gov";

/// Upstream name used in errors and logs.
pub const UPSTREAM: &str = "nws";

/// Largest response body accepted.
pub const MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;

const GEO_JSON: &str = "application/geo+json";

/// HTTP client for NWS alert and forecast lookups.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl WeatherClient {
    /// Creates a client sending `user_agent` with every request.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, ToolportError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|e| ToolportError::Config(format!("invalid user agent: {e}")))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static(GEO_JSON));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ToolportError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Active alerts for a two-letter state or territory code.
    pub async fn active_alerts(&self, state: &str) -> Result<Vec<AlertProperties>, ToolportError> {
        let state = normalize_state(state)?;
        let url = format!("{}/alerts/active/area/{state}", self.base_url);
        let collection: AlertCollection = self.get_json(&url).await?;
        info!(%state, count = collection.features.len(), "fetched active alerts");
        Ok(collection
            .features
            .into_iter()
            .map(|f| f.properties)
            .collect())
    }

    /// Forecast periods for a point: resolves the gridpoint, then fetches its forecast.
    pub async fn forecast_periods(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<ForecastPeriod>, ToolportError> {
        validate_coordinates(latitude, longitude)?;
        let url = format!("{}/points/{latitude},{longitude}", self.base_url);
        let point: PointResponse = self.get_json(&url).await?;
        let forecast_url = point
            .properties
            .forecast
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                ToolportError::malformed(
                    UPSTREAM,
                    format!("no forecast URL for {latitude},{longitude}"),
                )
            })?;
        debug!(%forecast_url, "resolved gridpoint forecast");

        let forecast: ForecastResponse = self.get_json(&forecast_url).await?;
        info!(
            latitude,
            longitude,
            count = forecast.properties.periods.len(),
            "fetched forecast"
        );
        Ok(forecast.properties.periods)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ToolportError> {
        let response = send_with_retry(&self.retry, UPSTREAM, || self.client.get(url)).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ToolportError::unavailable(
                UPSTREAM,
                format!("{url} returned {status}"),
            ));
        }
        let body = read_body_capped(response, MAX_RESPONSE_BYTES, UPSTREAM).await?;
        serde_json::from_slice(&body).map_err(|e| ToolportError::UpstreamMalformed {
            upstream: UPSTREAM.to_string(),
            message: format!("failed to parse {url}: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

/// Uppercases a two-letter region code, rejecting anything else.
pub fn normalize_state(state: &str) -> Result<String, ToolportError> {
    let state = state.trim();
    if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ToolportError::InvalidInput(format!(
            "state must be a two-letter code (e.g. CA, NY), got {state:?}"
        )));
    }
    Ok(state.to_ascii_uppercase())
}

/// Rejects non-finite or out-of-range coordinates.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), ToolportError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(ToolportError::InvalidInput(format!(
            "latitude must be between -90 and 90, got {latitude}"
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(ToolportError::InvalidInput(format!(
            "longitude must be between -180 and 180, got {longitude}"
        )));
    }
    Ok(())
}
