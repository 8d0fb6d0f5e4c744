// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! Provides [`GeminiClient`], which handles authentication, the request
//! timeout, retries of transient failures, and extraction of the first
//! inline image from the response.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{HeaderMap, HeaderValue};
use toolport_core::{GeneratedImage, ToolportError};
use toolport_resilience::{RetryPolicy, read_body_capped, send_with_retry};
use tracing::{debug, info, warn};

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// Base URL for the Gemini API.
pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Upstream name used in errors and logs.
pub const UPSTREAM: &str = "gemini";

/// MIME type assumed when an inline part does not declare one.
const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Largest response body accepted. Inline images arrive base64-encoded.
pub const MAX_RESPONSE_BYTES: usize = 32 * 1024 * 1024;

/// Longest upstream body excerpt included in an error message.
const MAX_ERROR_BODY: usize = 512;

/// HTTP client for Gemini image generation.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    model: String,
    base_url: String,
    retry: RetryPolicy,
}

impl GeminiClient {
    /// Creates a client authenticated with `api_key` for `model`.
    pub fn new(api_key: &str, model: String, timeout: Duration) -> Result<Self, ToolportError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| ToolportError::Config(format!("invalid Gemini API key header value: {e}")))?;
        key.set_sensitive(true);
        headers.insert("x-goog-api-key", key);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ToolportError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            model,
            base_url: API_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
        })
    }

    /// Overrides the base URL (configuration or wiremock).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Overrides the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Model identifier used for generation.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generates an image for `prompt`.
    ///
    /// Non-success statuses and transport failures become
    /// [`ToolportError::UpstreamUnavailable`]; a response without any inline
    /// image becomes [`ToolportError::UpstreamMalformed`].
    pub async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, ToolportError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let request = GenerateContentRequest::image_prompt(prompt);
        info!(model = %self.model, prompt_len = prompt.len(), "requesting image generation");

        let response =
            send_with_retry(&self.retry, UPSTREAM, || self.client.post(&url).json(&request)).await?;

        let status = response.status();
        let body = read_body_capped(response, MAX_RESPONSE_BYTES, UPSTREAM).await?;

        if !status.is_success() {
            let message = match serde_json::from_slice::<ApiErrorResponse>(&body) {
                Ok(api_err) => {
                    let detail = api_err.error;
                    format!(
                        "Gemini API error {} ({}): {}",
                        detail.code.unwrap_or(status.as_u16()),
                        detail.status.as_deref().unwrap_or(status.as_str()),
                        detail.message
                    )
                }
                Err(_) => format!(
                    "API returned {status}: {}",
                    excerpt(&String::from_utf8_lossy(&body))
                ),
            };
            return Err(ToolportError::unavailable(UPSTREAM, message));
        }

        let parsed: GenerateContentResponse =
            serde_json::from_slice(&body).map_err(|e| ToolportError::UpstreamMalformed {
                upstream: UPSTREAM.to_string(),
                message: format!("failed to parse response: {e}"),
                source: Some(Box::new(e)),
            })?;

        extract_image(parsed)
    }
}

/// Picks the first non-empty inline image out of a response, collecting any
/// text the model returned alongside it.
pub fn extract_image(response: GenerateContentResponse) -> Result<GeneratedImage, ToolportError> {
    let mut texts = Vec::new();
    let mut finish_reasons = Vec::new();
    let parts = response
        .candidates
        .into_iter()
        .filter_map(|c| {
            finish_reasons.extend(c.finish_reason.filter(|r| r != "STOP"));
            c.content
        })
        .flat_map(|c| c.parts);

    for (index, part) in parts.enumerate() {
        if let Some(inline) = part.inline_data.filter(|d| !d.data.is_empty()) {
            let data = STANDARD.decode(inline.data.as_bytes()).map_err(|e| {
                ToolportError::UpstreamMalformed {
                    upstream: UPSTREAM.to_string(),
                    message: format!("inline image data is not valid base64: {e}"),
                    source: Some(Box::new(e)),
                }
            })?;
            let mime_type = inline
                .mime_type
                .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());
            debug!(part = index, %mime_type, size_bytes = data.len(), "found inline image");
            return Ok(GeneratedImage {
                data,
                mime_type,
                text: (!texts.is_empty()).then(|| texts.concat()),
            });
        }
        if let Some(text) = part.text.filter(|t| !t.is_empty()) {
            texts.push(text);
        }
    }

    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        warn!(%reason, "prompt was blocked");
        return Err(ToolportError::malformed(
            UPSTREAM,
            format!("no image data was generated from the prompt (blocked: {reason})"),
        ));
    }

    let mut message = "no image data was generated from the prompt".to_string();
    if !finish_reasons.is_empty() {
        warn!(reasons = ?finish_reasons, "generation stopped early");
        message.push_str(&format!(" (finish reason: {})", finish_reasons.join(", ")));
    }
    if !texts.is_empty() {
        let text = texts.concat();
        warn!(text = %excerpt(&text), "model returned text but no image");
        message.push_str(&format!("; model replied: {}", excerpt(&text)));
    }
    Err(ToolportError::malformed(UPSTREAM, message))
}

fn excerpt(text: &str) -> &str {
    if text.len() <= MAX_ERROR_BODY {
        return text;
    }
    let mut end = MAX_ERROR_BODY;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
