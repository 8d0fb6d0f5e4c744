// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Toolport.
//!
//! Provides deterministic fixtures and mock upstreams so tests never touch
//! real external services.
//!
//! # Components
//!
//! - [`images`] - in-memory PNG/JPEG fixtures and a JPEG magic check
//! - [`nws`] - National Weather Service JSON bodies for wiremock
//! - [`MockImageGenerator`] - queued-outcome image generator

pub mod images;
pub mod mock_generator;
pub mod nws;

pub use mock_generator::{MockImageGenerator, MockOutcome};
