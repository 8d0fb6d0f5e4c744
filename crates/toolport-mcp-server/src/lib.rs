// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! MCP servers for the Toolport adapters.
//!
//! Each server owns its upstream client and exposes typed tools through an
//! rmcp tool router. Tool failures are reported as error-flagged results so a
//! failing upstream never takes the server down.

pub mod image;
pub mod weather;

use rmcp::{ServerHandler, ServiceExt};
use toolport_core::ToolportError;
use tracing::info;

pub use image::{GenerateImageRequest, ImageGenerationServer};
pub use weather::{AlertsRequest, ForecastRequest, WeatherServer};

/// Serves `server` over stdin/stdout until the client disconnects.
pub async fn serve_stdio<S>(server: S) -> Result<(), ToolportError>
where
    S: ServerHandler,
{
    let name = server.get_info().server_info.name;
    let running = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| ToolportError::Internal(format!("failed to start MCP server: {e}")))?;
    info!(server = %name, "MCP server listening on stdio");

    let reason = running
        .waiting()
        .await
        .map_err(|e| ToolportError::Internal(format!("MCP server task failed: {e}")))?;
    info!(server = %name, ?reason, "MCP server stopped");
    Ok(())
}
