// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock image generator for deterministic server tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use toolport_core::{GeneratedImage, ImageGenerator, ToolportError};

/// Canned outcome of one `generate` call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Return this image.
    Image(GeneratedImage),
    /// Fail as if the upstream were unreachable.
    Unavailable(String),
    /// Fail as if the upstream answered without an image.
    NoImage,
}

/// An [`ImageGenerator`] that replays queued outcomes and records prompts.
///
/// When the queue is empty every call fails with `Unavailable`.
#[derive(Clone, Default)]
pub struct MockImageGenerator {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockImageGenerator {
    /// Create a mock with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock pre-loaded with outcomes.
    pub fn with_outcomes(outcomes: Vec<MockOutcome>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(outcomes.into())),
            prompts: Arc::default(),
        }
    }

    /// Create a mock that returns `data` once, labelled with `mime_type`.
    pub fn returning(data: Vec<u8>, mime_type: &str) -> Self {
        Self::with_outcomes(vec![MockOutcome::Image(GeneratedImage {
            data,
            mime_type: mime_type.to_string(),
            text: None,
        })])
    }

    /// Queue another outcome.
    pub async fn push(&self, outcome: MockOutcome) {
        self.outcomes.lock().await.push_back(outcome);
    }

    /// Prompts received so far, in call order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    fn model(&self) -> &str {
        "mock-image-model"
    }

    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ToolportError> {
        self.prompts.lock().await.push(prompt.to_string());
        match self.outcomes.lock().await.pop_front() {
            Some(MockOutcome::Image(image)) => Ok(image),
            Some(MockOutcome::NoImage) => Err(ToolportError::malformed(
                "mock",
                "no image data was generated from the prompt",
            )),
            Some(MockOutcome::Unavailable(message)) => {
                Err(ToolportError::unavailable("mock", message))
            }
            None => Err(ToolportError::unavailable("mock", "no queued outcome")),
        }
    }
}
