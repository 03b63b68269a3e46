//! Single-image conversions: crop or composite one tile photo.

use std::path::Path;

use anyhow::{Context, Result};
use roomtile_core::{
    load_tile, AspectFitCropper, GroutCompositor, GroutStyle, HeapCanvas, PhysicalDimensions,
    Raster, TextureConfig,
};

/// Center-crop `input` to the tile's aspect ratio and write it as PNG.
///
/// Sources already within tolerance are written unchanged. Returns the
/// output dimensions.
pub fn crop_image(
    input: &Path,
    output: &Path,
    tile: PhysicalDimensions,
    config: &TextureConfig,
) -> Result<(u32, u32)> {
    let source =
        load_tile(input).with_context(|| format!("Failed to load tile: {}", input.display()))?;
    let cropper = AspectFitCropper::new(&config.canvas);

    match cropper.plan(source.width(), source.height(), tile) {
        Some(region) => tracing::debug!(?region, "cropping"),
        None => tracing::debug!("aspect ratio already matches"),
    }

    let cropped = cropper.crop(&source, tile).into_owned();
    let dimensions = cropped.dimensions();
    Raster::Image(cropped).save_png(output)?;
    Ok(dimensions)
}

/// Composite `input` into a grouted tile unit and write it as PNG.
///
/// Returns `true` if the canvas could not be allocated and a blank
/// placeholder was written instead.
pub fn composite_image(
    input: &Path,
    output: &Path,
    tile: PhysicalDimensions,
    grout: &GroutStyle,
    config: &TextureConfig,
) -> Result<bool> {
    config.validate()?;
    let source =
        load_tile(input).with_context(|| format!("Failed to load tile: {}", input.display()))?;

    let canvas = HeapCanvas::new(config.canvas.max_pixels);
    let raster = GroutCompositor::new(&config.canvas).composite(&source, tile, grout, &canvas);
    raster.save_png(output)?;
    Ok(raster.is_blank())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_png(path: &Path, width: u32, height: u32) {
        RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_crop_image_squares_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("wide.png");
        let output = dir.path().join("cropped.png");
        write_png(&input, 400, 200);

        let tile = PhysicalDimensions::new(12.0, 12.0).unwrap();
        let dims = crop_image(&input, &output, tile, &TextureConfig::default()).unwrap();

        assert_eq!(dims, (200, 200));
        let written = image::open(&output).unwrap();
        assert_eq!((written.width(), written.height()), (200, 200));
    }

    #[test]
    fn test_composite_image_writes_grout_border() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tile.png");
        let output = dir.path().join("unit.png");
        write_png(&input, 64, 64);

        let tile = PhysicalDimensions::new(12.0, 12.0).unwrap();
        let blank = composite_image(
            &input,
            &output,
            tile,
            &GroutStyle::default(),
            &TextureConfig::default(),
        )
        .unwrap();

        assert!(!blank);
        let written = image::open(&output).unwrap().to_rgba8();
        assert_eq!(written.dimensions(), (512, 512));
        assert_eq!(*written.get_pixel(0, 0), roomtile_core::DEFAULT_GROUT_COLOR);
        assert_eq!(*written.get_pixel(256, 256), Rgba([200, 40, 40, 255]));
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let tile = PhysicalDimensions::new(12.0, 12.0).unwrap();
        let result = crop_image(
            &dir.path().join("nope.png"),
            &dir.path().join("out.png"),
            tile,
            &TextureConfig::default(),
        );
        assert!(result.is_err());
    }
}
