// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini image-generation adapter.
//!
//! This crate implements [`ImageGenerator`] over the Gemini
//! `generateContent` endpoint. The model is asked for image output and the
//! first inline image in the response is returned as raw bytes.

pub mod client;
pub mod types;

use async_trait::async_trait;
use toolport_config::ToolportConfig;
use toolport_core::{GeneratedImage, ImageGenerator, ToolportError};
use toolport_resilience::RetryPolicy;
use tracing::info;

use crate::client::GeminiClient;

/// Environment variable consulted when no key is configured.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gemini image generator implementing [`ImageGenerator`].
///
/// API key resolution order: `gemini.api_key` -> `GEMINI_API_KEY` -> error.
#[derive(Debug, Clone)]
pub struct GeminiImageGenerator {
    client: GeminiClient,
}

impl GeminiImageGenerator {
    /// Creates a generator from the given configuration.
    pub fn new(config: &ToolportConfig) -> Result<Self, ToolportError> {
        let api_key = resolve_api_key(&config.gemini.api_key)?;
        let client = GeminiClient::new(
            &api_key,
            config.gemini.model.clone(),
            config.upstream.timeout(),
        )?
        .with_base_url(config.gemini.base_url.clone())
        .with_retry_policy(RetryPolicy::from_config(&config.upstream));

        info!(model = %config.gemini.model, "Gemini image generator initialized");
        Ok(Self { client })
    }

    /// Wraps an existing client.
    pub fn with_client(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageGenerator for GeminiImageGenerator {
    fn model(&self) -> &str {
        self.client.model()
    }

    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ToolportError> {
        self.client.generate_image(prompt).await
    }
}

/// Resolves the Gemini API key from config or environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, ToolportError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(ToolportError::Config(
            "Gemini API key not found. Set gemini.api_key in config or GEMINI_API_KEY environment variable.".into(),
        )),
    }
}
