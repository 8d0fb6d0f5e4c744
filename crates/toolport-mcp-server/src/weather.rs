// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The weather MCP server: `get_alerts` and `get_forecast` over the NWS API.

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Deserialize;
use toolport_config::ToolportConfig;
use toolport_core::{ServerKind, ToolportError};
use toolport_weather::WeatherService;
use tracing::warn;

/// Parameters of the `get_alerts` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AlertsRequest {
    /// Two-letter US state or territory code (e.g. CA, NY).
    pub state: String,
}

/// Parameters of the `get_forecast` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ForecastRequest {
    /// Latitude of the location, in decimal degrees.
    pub latitude: f64,
    /// Longitude of the location, in decimal degrees.
    pub longitude: f64,
}

#[derive(Clone)]
pub struct WeatherServer {
    service: WeatherService,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WeatherServer {
    pub fn new(service: WeatherService) -> Self {
        Self {
            service,
            tool_router: Self::tool_router(),
        }
    }

    pub fn from_config(config: &ToolportConfig) -> Result<Self, ToolportError> {
        Ok(Self::new(WeatherService::new(config)?))
    }

    #[tool(description = "Get active weather alerts for a US state (two-letter code, e.g. CA).")]
    pub async fn get_alerts(
        &self,
        Parameters(AlertsRequest { state }): Parameters<AlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(into_result(
            self.service.alerts_report(&state).await,
            "Unable to fetch alerts",
        ))
    }

    #[tool(description = "Get the weather forecast for a location given its latitude and longitude.")]
    pub async fn get_forecast(
        &self,
        Parameters(ForecastRequest {
            latitude,
            longitude,
        }): Parameters<ForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        Ok(into_result(
            self.service.forecast_report(latitude, longitude).await,
            "Unable to fetch forecast",
        ))
    }
}

fn into_result(report: Result<String, ToolportError>, context: &str) -> CallToolResult {
    match report {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => {
            warn!(error = %e, "{context}");
            CallToolResult::error(vec![Content::text(format!("{context}: {e}"))])
        }
    }
}

#[tool_handler]
impl ServerHandler for WeatherServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: ServerKind::Weather.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "US weather from the National Weather Service. Use get_alerts with a state code \
                 or get_forecast with coordinates."
                    .into(),
            ),
            ..Default::default()
        }
    }
}
