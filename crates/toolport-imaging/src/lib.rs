// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image post-processing for the image-generation server.
//!
//! Generated images are often several megabytes of PNG. Before they are
//! handed to the client they are downscaled and re-encoded as JPEG under a
//! byte budget by [`bound_image`].

pub mod bound;

pub use bound::{BoundingOptions, bound_image, encode_jpeg, flatten_to_rgb, scaled_dimensions};
