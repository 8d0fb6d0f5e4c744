// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resilience primitives for upstream HTTP calls.

pub mod body;
pub mod retry;

pub use body::read_body_capped;
pub use retry::{RetryPolicy, is_transient_error, is_transient_status, send_with_retry};
