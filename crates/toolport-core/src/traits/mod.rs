// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Upstream adapter traits.
//!
//! Traits use `#[async_trait]` so that servers can hold them as
//! `Arc<dyn Trait>` and tests can substitute mocks.

pub mod image;

pub use image::ImageGenerator;
