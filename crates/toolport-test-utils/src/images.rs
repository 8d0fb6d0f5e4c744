// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic in-memory image fixtures.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage};

/// JPEG start-of-image marker followed by the first marker prefix.
pub const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Returns true when `bytes` start with the JPEG magic header.
pub fn is_jpeg(bytes: &[u8]) -> bool {
    bytes.starts_with(&JPEG_MAGIC)
}

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, format)
        .expect("in-memory encoding cannot fail");
    cursor.into_inner()
}

/// A smooth RGB gradient. Compresses very well as JPEG.
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    });
    encode(DynamicImage::ImageRgb8(image), ImageFormat::Png)
}

/// Pseudo-random RGB noise. Compresses very poorly as JPEG.
pub fn noise_png(width: u32, height: u32, seed: u64) -> Vec<u8> {
    let mut state = seed | 1;
    let image = RgbImage::from_fn(width, height, |_, _| {
        // xorshift64
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let [r, g, b, ..] = state.to_le_bytes();
        Rgb([r, g, b])
    });
    encode(DynamicImage::ImageRgb8(image), ImageFormat::Png)
}

/// A fully transparent RGBA image whose color channels are black.
pub fn transparent_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    encode(DynamicImage::ImageRgba8(image), ImageFormat::Png)
}

/// Opaque red with its first `transparent_cols` columns fully transparent
/// black, giving a hard alpha edge.
pub fn transparent_edge_png(width: u32, height: u32, transparent_cols: u32) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, _| {
        if x < transparent_cols {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([255, 0, 0, 255])
        }
    });
    encode(DynamicImage::ImageRgba8(image), ImageFormat::Png)
}

/// A single-channel grayscale image.
pub fn grayscale_png(width: u32, height: u32) -> Vec<u8> {
    let image = GrayImage::from_fn(width, height, |x, _| Luma([(x % 256) as u8]));
    encode(DynamicImage::ImageLuma8(image), ImageFormat::Png)
}

/// A gradient encoded as JPEG.
pub fn gradient_jpeg(width: u32, height: u32) -> Vec<u8> {
    let png = gradient_png(width, height);
    let image = image::load_from_memory(&png).expect("fixture decodes");
    encode(image, ImageFormat::Jpeg)
}
