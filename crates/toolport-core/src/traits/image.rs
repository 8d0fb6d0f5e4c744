// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image-generation upstream trait.

use async_trait::async_trait;

use crate::error::ToolportError;
use crate::types::GeneratedImage;

/// An upstream that turns a text prompt into an image.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Model identifier used for generation (for logging and server info).
    fn model(&self) -> &str;

    /// Generates a single image for the prompt.
    ///
    /// Returns [`ToolportError::UpstreamMalformed`] when the upstream answers
    /// without any image data.
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ToolportError>;
}
