// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key fails
//! at startup instead of silently falling back to a default.

use serde::{Deserialize, Serialize};

/// Top-level Toolport configuration.
///
/// Constructed once at process start and passed by reference into the
/// upstream clients and servers. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ToolportConfig {
    /// Process-level settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Gemini image-generation upstream.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Size-bounding routine parameters.
    #[serde(default)]
    pub image: ImageConfig,

    /// National Weather Service upstream.
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Timeout and retry policy shared by all upstream calls.
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

/// Process-level settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Logging level (trace, debug, info, warn, error). Logs always go to stderr.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// `log_level` trimmed and lowercased, as validated and as used in filter directives.
    pub fn normalized_log_level(&self) -> String {
        self.log_level.trim().to_ascii_lowercase()
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Gemini API key. `None` falls back to the `GEMINI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for image generation.
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API base URL, without a trailing slash.
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
            base_url: default_gemini_base_url(),
        }
    }
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

/// Size-bounding routine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ImageConfig {
    /// Maximum width or height of the output, in pixels.
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,

    /// Target maximum encoded size, in KiB.
    #[serde(default = "default_target_size_kb")]
    pub target_size_kb: u32,

    /// JPEG quality of the first encoding attempt (1-100).
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Lowest JPEG quality the routine will fall back to.
    #[serde(default = "default_min_quality")]
    pub min_quality: u8,

    /// Quality decrement between encoding attempts.
    #[serde(default = "default_quality_step")]
    pub quality_step: u8,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_dimension: default_max_dimension(),
            target_size_kb: default_target_size_kb(),
            jpeg_quality: default_jpeg_quality(),
            min_quality: default_min_quality(),
            quality_step: default_quality_step(),
        }
    }
}

fn default_max_dimension() -> u32 {
    1024
}

fn default_target_size_kb() -> u32 {
    500
}

fn default_jpeg_quality() -> u8 {
    85
}

fn default_min_quality() -> u8 {
    30
}

fn default_quality_step() -> u8 {
    5
}

/// National Weather Service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WeatherConfig {
    /// API base URL, without a trailing slash.
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// User-Agent header. The NWS API rejects requests without one.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Number of forecast periods included in a forecast report.
    #[serde(default = "default_forecast_periods")]
    pub forecast_periods: usize,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            user_agent: default_user_agent(),
            forecast_periods: default_forecast_periods(),
        }
    }
}

fn default_weather_base_url() -> String {
    "https://api.weather.gov".to_string()
}

fn default_user_agent() -> String {
    "toolport-weather/1.0".to_string()
}

fn default_forecast_periods() -> usize {
    5
}

/// Timeout and retry policy for upstream HTTP calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries after the first attempt for transient failures. 0 disables retries.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry, in milliseconds. Doubles on each retry.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    1000
}

impl UpstreamConfig {
    /// Per-request timeout as a [`std::time::Duration`].
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl ImageConfig {
    /// Target maximum encoded size, in bytes.
    pub fn target_bytes(&self) -> usize {
        self.target_size_kb as usize * 1024
    }
}
