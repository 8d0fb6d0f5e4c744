// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Size-capped response body reads.

use reqwest::Response;
use toolport_core::ToolportError;
use tracing::warn;

/// Reads the whole body of `response`, failing once it exceeds `limit` bytes.
///
/// A declared `Content-Length` over the limit is rejected before any of the
/// body is read; otherwise chunks are accumulated until the limit is crossed.
/// Oversized bodies become [`ToolportError::UpstreamMalformed`], read errors
/// [`ToolportError::UpstreamUnavailable`].
pub async fn read_body_capped(
    mut response: Response,
    limit: usize,
    upstream: &str,
) -> Result<Vec<u8>, ToolportError> {
    if let Some(declared) = response.content_length()
        && declared > limit as u64
    {
        warn!(upstream, declared, limit, "upstream body exceeds size limit");
        return Err(too_large(upstream, limit));
    }

    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| ToolportError::UpstreamUnavailable {
            upstream: upstream.to_string(),
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?
    {
        if body.len() + chunk.len() > limit {
            warn!(upstream, limit, "upstream body exceeds size limit");
            return Err(too_large(upstream, limit));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn too_large(upstream: &str, limit: usize) -> ToolportError {
    ToolportError::malformed(
        upstream,
        format!("response body exceeds the {limit}-byte limit"),
    )
}
