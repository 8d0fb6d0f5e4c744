// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The image generation MCP server.
//!
//! Exposes one tool, `generate_image`, which asks the configured
//! [`ImageGenerator`] for an image, bounds it to the configured dimension
//! and byte size, and returns it as base64 JPEG image content.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Deserialize;
use toolport_config::ToolportConfig;
use toolport_core::{ImageArtifact, ImageGenerator, ServerKind, ToolportError};
use toolport_gemini::GeminiImageGenerator;
use toolport_imaging::{BoundingOptions, bound_image};
use tracing::{info, warn};

/// Parameters of the `generate_image` tool.
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateImageRequest {
    /// Text description of the image to generate.
    pub prompt: String,
}

/// MCP server wrapping an [`ImageGenerator`] and the size-bounding routine.
#[derive(Clone)]
pub struct ImageGenerationServer {
    generator: Arc<dyn ImageGenerator>,
    bounding: BoundingOptions,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ImageGenerationServer {
    pub fn new(generator: Arc<dyn ImageGenerator>, bounding: BoundingOptions) -> Self {
        Self {
            generator,
            bounding,
            tool_router: Self::tool_router(),
        }
    }

    /// Builds a Gemini-backed server. Fails when no API key is available.
    pub fn from_config(config: &ToolportConfig) -> Result<Self, ToolportError> {
        let generator = GeminiImageGenerator::new(config)?;
        Ok(Self::new(
            Arc::new(generator),
            BoundingOptions::from(&config.image),
        ))
    }

    #[tool(
        description = "Generate an image from a text prompt. Returns a JPEG no larger than the configured dimension and size."
    )]
    pub async fn generate_image(
        &self,
        Parameters(GenerateImageRequest { prompt }): Parameters<GenerateImageRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self.render(&prompt).await {
            Ok(artifact) => {
                info!(
                    width = artifact.width,
                    height = artifact.height,
                    quality = artifact.quality,
                    size_bytes = artifact.size_bytes(),
                    met_target = artifact.met_target,
                    "image generated"
                );
                let caption = format!(
                    "Generated image ({}, {} bytes):",
                    artifact.mime_type,
                    artifact.size_bytes()
                );
                let encoded = STANDARD.encode(&artifact.data);
                Ok(CallToolResult::success(vec![
                    Content::text(caption),
                    Content::image(encoded, artifact.mime_type),
                ]))
            }
            Err(e) => {
                warn!(error = %e, "generate_image failed");
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error generating image: {e}"
                ))]))
            }
        }
    }

    async fn render(&self, prompt: &str) -> Result<ImageArtifact, ToolportError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ToolportError::InvalidInput("prompt must not be empty".into()));
        }

        let generated = self.generator.generate(prompt).await?;
        info!(
            model = self.generator.model(),
            mime_type = %generated.mime_type,
            size_bytes = generated.data.len(),
            "upstream image received"
        );

        let options = self.bounding;
        tokio::task::spawn_blocking(move || bound_image(&generated.data, &options))
            .await
            .map_err(|e| ToolportError::Internal(format!("image task failed: {e}")))?
    }
}

#[tool_handler]
impl ServerHandler for ImageGenerationServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: ServerKind::ImageGeneration.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Use generate_image with a descriptive prompt. The result is a JPEG image."
                    .into(),
            ),
            ..Default::default()
        }
    }
}
