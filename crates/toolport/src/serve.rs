// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server startup for the `image` and `weather` subcommands.

use toolport_config::ToolportConfig;
use toolport_core::{ServerKind, ToolportError};
use toolport_mcp_server::{ImageGenerationServer, WeatherServer, serve_stdio};
use tracing::{error, info};

/// Runs the image generation server until the client disconnects.
pub async fn run_image(config: &ToolportConfig) -> Result<(), ToolportError> {
    init_tracing(&config.server.normalized_log_level());
    info!(
        server = %ServerKind::ImageGeneration,
        model = %config.gemini.model,
        max_dimension = config.image.max_dimension,
        target_size_kb = config.image.target_size_kb,
        "starting toolport"
    );

    let server = ImageGenerationServer::from_config(config).inspect_err(|e| {
        error!(error = %e, "image generation server failed to start");
    })?;
    serve_stdio(server).await
}

/// Runs the weather server until the client disconnects.
pub async fn run_weather(config: &ToolportConfig) -> Result<(), ToolportError> {
    init_tracing(&config.server.normalized_log_level());
    info!(
        server = %ServerKind::Weather,
        base_url = %config.weather.base_url,
        "starting toolport"
    );

    let server = WeatherServer::from_config(config).inspect_err(|e| {
        error!(error = %e, "weather server failed to start");
    })?;
    serve_stdio(server).await
}

/// Prints the effective settings for `check-config`.
pub fn print_summary(config: &ToolportConfig) {
    let key = if config.gemini.api_key.as_deref().is_some_and(|k| !k.is_empty()) {
        "set in config"
    } else if std::env::var_os("GEMINI_API_KEY").is_some() {
        "from GEMINI_API_KEY"
    } else {
        "missing (image server will not start)"
    };
    println!("toolport: configuration is valid");
    println!("  gemini.model           = {}", config.gemini.model);
    println!("  gemini.api_key         = {key}");
    println!("  image.max_dimension    = {}", config.image.max_dimension);
    println!("  image.target_size_kb   = {}", config.image.target_size_kb);
    println!("  weather.base_url       = {}", config.weather.base_url);
    println!("  upstream.timeout_secs  = {}", config.upstream.timeout_secs);
    println!("  upstream.max_retries   = {}", config.upstream.max_retries);
}

/// Filter used when `RUST_LOG` is unset: `level` for toolport crates, warn elsewhere.
fn default_directives(level: &str) -> String {
    format!("toolport={level},warn")
}

/// Initializes the tracing subscriber with stderr output.
///
/// Stdout carries the MCP protocol stream and must not receive log lines.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
