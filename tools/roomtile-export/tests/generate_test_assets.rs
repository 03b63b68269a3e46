//! Generates tile photos for integration tests

use image::{Rgba, RgbaImage};
use std::path::Path;

pub const TILE_COLOR: Rgba<u8> = Rgba([180, 60, 30, 255]);

/// Solid tile photo of the given size
pub fn generate_tile_png(path: &Path, width: u32, height: u32) -> image::ImageResult<()> {
    RgbaImage::from_pixel(width, height, TILE_COLOR).save(path)
}

/// Photo with a red left half and a blue right half, for checking crop centering
pub fn generate_split_png(path: &Path, width: u32, height: u32) -> image::ImageResult<()> {
    RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 255])
        }
    })
    .save(path)
}
