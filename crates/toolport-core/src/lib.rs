// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Toolport adapter servers.
//!
//! This crate provides the error taxonomy, request-scoped types, and upstream
//! traits shared by the imaging pipeline, the upstream clients, and the MCP
//! servers.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ToolportError;
pub use traits::ImageGenerator;
pub use types::{GeneratedImage, ImageArtifact, JPEG_MIME_TYPE, ServerKind};
