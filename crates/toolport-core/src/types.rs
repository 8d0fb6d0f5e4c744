// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request-scoped types passed between upstream clients, the imaging
//! pipeline, and the tool handlers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// MIME type of every image produced by the size-bounding routine.
pub const JPEG_MIME_TYPE: &str = "image/jpeg";

/// The adapter servers shipped by the `toolport` binary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServerKind {
    /// Text-to-image generation backed by Gemini.
    ImageGeneration,
    /// Alerts and forecasts backed by the National Weather Service.
    Weather,
}

/// Raw image returned by an image-generation upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Decoded image bytes, in whatever format the model produced.
    pub data: Vec<u8>,
    /// MIME type declared by the upstream.
    pub mime_type: String,
    /// Any text the model emitted alongside the image.
    pub text: Option<String>,
}

/// A size-bounded, JPEG-encoded image ready to be sent to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageArtifact {
    /// JPEG bytes.
    pub data: Vec<u8>,
    /// Always [`JPEG_MIME_TYPE`].
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
    /// JPEG quality of the final encoding.
    pub quality: u8,
    /// False when the byte target could not be met at the quality floor.
    pub met_target: bool,
}

impl ImageArtifact {
    /// Encoded size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
