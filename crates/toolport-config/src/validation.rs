// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that serde attributes cannot express.

use crate::diagnostic::ConfigError;
use crate::model::ToolportConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every violation instead of stopping at the first one.
pub fn validate_config(config: &ToolportConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.server.normalized_log_level();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "server.log_level `{}` must be one of {}",
            config.server.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    check_base_url(&mut errors, "gemini.base_url", &config.gemini.base_url);
    check_base_url(&mut errors, "weather.base_url", &config.weather.base_url);

    if config.gemini.model.trim().is_empty() {
        errors.push(ConfigError::validation("gemini.model must not be empty"));
    }

    let image = &config.image;
    if image.max_dimension == 0 {
        errors.push(ConfigError::validation("image.max_dimension must be at least 1"));
    }
    if image.target_size_kb == 0 {
        errors.push(ConfigError::validation("image.target_size_kb must be at least 1"));
    }
    for (key, quality) in [
        ("image.jpeg_quality", image.jpeg_quality),
        ("image.min_quality", image.min_quality),
    ] {
        if !(1..=100).contains(&quality) {
            errors.push(ConfigError::validation(format!(
                "{key} must be between 1 and 100, got {quality}"
            )));
        }
    }
    if image.min_quality > image.jpeg_quality {
        errors.push(ConfigError::validation(format!(
            "image.min_quality ({}) must not exceed image.jpeg_quality ({})",
            image.min_quality, image.jpeg_quality
        )));
    }
    if image.quality_step == 0 {
        errors.push(ConfigError::validation("image.quality_step must be at least 1"));
    }

    if config.weather.user_agent.trim().is_empty() {
        errors.push(ConfigError::validation(
            "weather.user_agent must not be empty (api.weather.gov rejects anonymous requests)",
        ));
    }
    if config.weather.forecast_periods == 0 {
        errors.push(ConfigError::validation(
            "weather.forecast_periods must be at least 1",
        ));
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ConfigError::validation("upstream.timeout_secs must be at least 1"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_base_url(errors: &mut Vec<ConfigError>, key: &str, url: &str) {
    let url = url.trim();
    if url.is_empty() {
        errors.push(ConfigError::validation(format!("{key} must not be empty")));
    } else if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(ConfigError::validation(format!(
            "{key} `{url}` must start with http:// or https://"
        )));
    } else if url.ends_with('/') {
        errors.push(ConfigError::validation(format!(
            "{key} `{url}` must not end with a trailing slash"
        )));
    }
}
