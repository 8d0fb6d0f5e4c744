// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by every Toolport crate.

use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// The error type returned by upstream clients, the imaging pipeline, and
/// configuration resolution.
///
/// Tool handlers never let this escape the tool boundary: it is rendered
/// into an error-flagged tool result instead.
#[derive(Debug, Error)]
pub enum ToolportError {
    /// Malformed tool parameters or an image that cannot be decoded.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Network failure, timeout, or non-success status from an upstream API.
    #[error("{upstream} unavailable: {message}")]
    UpstreamUnavailable {
        upstream: String,
        message: String,
        source: Option<BoxedSource>,
    },

    /// The upstream answered, but not with the shape we expect.
    #[error("{upstream} returned an unexpected response: {message}")]
    UpstreamMalformed {
        upstream: String,
        message: String,
        source: Option<BoxedSource>,
    },

    /// Missing credentials or invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors (task join failures, transport start-up).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ToolportError {
    /// Builds an [`UpstreamUnavailable`](Self::UpstreamUnavailable) error without a source.
    pub fn unavailable(upstream: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            upstream: upstream.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Builds an [`UpstreamMalformed`](Self::UpstreamMalformed) error without a source.
    pub fn malformed(upstream: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UpstreamMalformed {
            upstream: upstream.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Returns true when the failure originated at an upstream API.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable { .. } | Self::UpstreamMalformed { .. }
        )
    }
}
