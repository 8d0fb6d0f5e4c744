// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The size-bounding routine: downscale to a maximum dimension, then lower
//! JPEG quality step by step until the encoding fits the byte target or the
//! quality floor is reached.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage, Rgba};
use toolport_config::model::ImageConfig;
use toolport_core::{ImageArtifact, JPEG_MIME_TYPE, ToolportError};
use tracing::{debug, info, warn};

/// Parameters of the size-bounding routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingOptions {
    /// Maximum width or height of the output, in pixels.
    pub max_dimension: u32,
    /// Target maximum encoded size, in bytes.
    pub target_bytes: usize,
    /// Quality of the first encoding attempt.
    pub initial_quality: u8,
    /// Quality floor; the routine never encodes below it.
    pub min_quality: u8,
    /// Quality decrement between attempts.
    pub quality_step: u8,
}

impl Default for BoundingOptions {
    fn default() -> Self {
        Self::from(&ImageConfig::default())
    }
}

impl From<&ImageConfig> for BoundingOptions {
    fn from(config: &ImageConfig) -> Self {
        Self {
            max_dimension: config.max_dimension,
            target_bytes: config.target_bytes(),
            initial_quality: config.jpeg_quality,
            min_quality: config.min_quality,
            quality_step: config.quality_step,
        }
    }
}

impl BoundingOptions {
    fn validate(&self) -> Result<(), ToolportError> {
        if self.max_dimension == 0 || self.target_bytes == 0 || self.quality_step == 0 {
            return Err(ToolportError::InvalidInput(
                "max dimension, target size and quality step must be positive".into(),
            ));
        }
        if self.min_quality == 0
            || self.min_quality > self.initial_quality
            || self.initial_quality > 100
        {
            return Err(ToolportError::InvalidInput(format!(
                "quality range {}..={} is not within 1..=100",
                self.min_quality, self.initial_quality
            )));
        }
        Ok(())
    }
}

/// Output dimensions for an image of `width`x`height` capped at `max_dimension`.
///
/// Images already within the cap are returned unchanged (never upscaled).
/// Each dimension is rounded to the nearest pixel and is at least 1.
pub fn scaled_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_dimension {
        return (width, height);
    }
    let scale = f64::from(max_dimension) / f64::from(longest);
    let fit = |d: u32| ((f64::from(d) * scale).round() as u32).clamp(1, max_dimension);
    (fit(width), fit(height))
}

/// Decode `input`, bound it, and return a JPEG artifact.
///
/// Fails only with [`ToolportError::InvalidInput`] (undecodable bytes or
/// nonsensical options) or [`ToolportError::Internal`] (encoder failure).
/// When the target cannot be met at the quality floor, the floor encoding is
/// returned with `met_target = false`.
pub fn bound_image(input: &[u8], options: &BoundingOptions) -> Result<ImageArtifact, ToolportError> {
    options.validate()?;
    if input.is_empty() {
        return Err(ToolportError::InvalidInput("image data is empty".into()));
    }

    let decoded = image::load_from_memory(input)
        .map_err(|e| ToolportError::InvalidInput(format!("could not decode image: {e}")))?;
    let (width, height) = (decoded.width(), decoded.height());
    debug!(width, height, input_bytes = input.len(), "decoded image");

    // Flatten before resampling so transparent pixels cannot bleed their
    // color channels into opaque edges.
    let flat = flatten_to_rgb(&decoded);
    drop(decoded);

    let (target_w, target_h) = scaled_dimensions(width, height, options.max_dimension);
    let rgb = if (target_w, target_h) != (width, height) {
        info!(from = %format!("{width}x{height}"), to = %format!("{target_w}x{target_h}"), "resizing image");
        imageops::resize(&flat, target_w, target_h, FilterType::Lanczos3)
    } else {
        flat
    };

    let mut quality = options.initial_quality;
    loop {
        let data = encode_jpeg(&rgb, quality)?;
        let met_target = data.len() <= options.target_bytes;

        if met_target || quality <= options.min_quality {
            if met_target {
                info!(quality, size_bytes = data.len(), "image bounded");
            } else {
                warn!(
                    quality,
                    size_bytes = data.len(),
                    target_bytes = options.target_bytes,
                    "target size not reached at quality floor"
                );
            }
            return Ok(ImageArtifact {
                data,
                mime_type: JPEG_MIME_TYPE.to_string(),
                width: rgb.width(),
                height: rgb.height(),
                quality,
                met_target,
            });
        }

        debug!(quality, size_bytes = data.len(), "over target, lowering quality");
        quality = quality
            .saturating_sub(options.quality_step)
            .max(options.min_quality);
    }
}

/// Convert to 8-bit RGB, compositing any alpha channel over white.
pub fn flatten_to_rgb(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        let alpha = u16::from(a);
        let over_white =
            |c: u8| ((u16::from(c) * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        Rgb([over_white(r), over_white(g), over_white(b)])
    })
}

/// Encode an RGB image as baseline JPEG at `quality`.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, ToolportError> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(image)
        .map_err(|e| ToolportError::Internal(format!("JPEG encoding failed: {e}")))?;
    Ok(buf)
}
