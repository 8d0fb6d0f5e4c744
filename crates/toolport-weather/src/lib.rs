// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! National Weather Service adapter.
//!
//! [`WeatherService`] turns validated tool parameters into NWS lookups and
//! renders the results as plain-text reports.

pub mod client;
pub mod format;
pub mod types;

use toolport_config::ToolportConfig;
use toolport_core::ToolportError;
use toolport_resilience::RetryPolicy;
use tracing::info;

pub use client::{WeatherClient, normalize_state, validate_coordinates};
pub use format::{NO_ALERTS, NO_PERIODS};

/// Alert and forecast reports over a [`WeatherClient`].
#[derive(Debug, Clone)]
pub struct WeatherService {
    client: WeatherClient,
    forecast_periods: usize,
}

impl WeatherService {
    pub fn new(config: &ToolportConfig) -> Result<Self, ToolportError> {
        let client = WeatherClient::new(&config.weather.user_agent, config.upstream.timeout())?
            .with_base_url(config.weather.base_url.clone())
            .with_retry_policy(RetryPolicy::from_config(&config.upstream));
        info!(base_url = %config.weather.base_url, "weather service initialized");
        Ok(Self::with_client(client, config.weather.forecast_periods))
    }

    pub fn with_client(client: WeatherClient, forecast_periods: usize) -> Self {
        Self {
            client,
            forecast_periods,
        }
    }

    /// Rendered active alerts for `state`, or the no-alerts message.
    pub async fn alerts_report(&self, state: &str) -> Result<String, ToolportError> {
        let alerts = self.client.active_alerts(state).await?;
        Ok(format::alerts_report(&alerts))
    }

    /// Rendered forecast for a point, or the no-periods message.
    pub async fn forecast_report(&self, latitude: f64, longitude: f64) -> Result<String, ToolportError> {
        let periods = self.client.forecast_periods(latitude, longitude).await?;
        Ok(format::forecast_report(&periods, self.forecast_periods))
    }
}
