//! Surface texture entry points.
//!
//! [`compute_surface_texture`] is the one call a wall or floor renderer makes
//! whenever its tile, grout or size changes: crop, composite, then compute
//! repeats. [`repeat_factors_only`] serves callers that cache the texture and
//! only need new tiling math.

use std::path::Path;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::config::TextureConfig;
use crate::dimensions::{PhysicalDimensions, SurfaceKind};
use crate::error::{Result, TextureError};
use crate::grout::{GroutCompositor, GroutStyle};
use crate::raster::{CanvasProvider, HeapCanvas, Raster};
use crate::repeat::{repeat_factors, RepeatFactors};

/// Texture addressing outside the unit square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WrapMode {
    #[default]
    ClampToEdge,
    Repeat,
}

/// A baked surface texture and how to tile it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableTexture {
    pub raster: Raster,
    pub repeat: RepeatFactors,
    /// Horizontal and vertical wrap modes
    pub wrap: (WrapMode, WrapMode),
    pub grout_baked: bool,
}

impl RenderableTexture {
    /// True when compositing fell back to a blank placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.raster.is_blank()
    }
}

/// Crop, composite and compute repeats for one surface.
///
/// `tile` is in inches, `surface` in feet. Canvases come from the heap within
/// the configured pixel budget.
pub fn compute_surface_texture(
    source: &RgbaImage,
    tile: PhysicalDimensions,
    surface: PhysicalDimensions,
    grout: &GroutStyle,
    kind: SurfaceKind,
    config: &TextureConfig,
) -> RenderableTexture {
    let canvas = HeapCanvas::new(config.canvas.max_pixels);
    compute_surface_texture_with(source, tile, surface, grout, kind, config, &canvas)
}

/// [`compute_surface_texture`] with an explicit canvas provider.
#[allow(clippy::too_many_arguments)]
pub fn compute_surface_texture_with(
    source: &RgbaImage,
    tile: PhysicalDimensions,
    surface: PhysicalDimensions,
    grout: &GroutStyle,
    kind: SurfaceKind,
    config: &TextureConfig,
    canvas: &dyn CanvasProvider,
) -> RenderableTexture {
    let raster = GroutCompositor::new(&config.canvas).composite(source, tile, grout, canvas);
    RenderableTexture {
        raster,
        repeat: repeat_factors_only(tile, surface, kind, config),
        wrap: (WrapMode::Repeat, WrapMode::Repeat),
        grout_baked: grout.visible,
    }
}

/// Repeat factors for `tile` (inches) on a `kind` surface of `surface` (feet).
pub fn repeat_factors_only(
    tile: PhysicalDimensions,
    surface: PhysicalDimensions,
    kind: SurfaceKind,
    config: &TextureConfig,
) -> RepeatFactors {
    repeat_factors(
        tile,
        surface,
        config.repeat.threshold,
        config.repeat.calibration(kind),
    )
}

/// Decode an encoded tile image (PNG, JPEG or WebP) to RGBA.
pub fn decode_tile(bytes: &[u8]) -> Result<RgbaImage> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgba8())
        .map_err(TextureError::Decode)
}

/// Read and decode a tile image file.
pub fn load_tile(path: &Path) -> Result<RgbaImage> {
    let bytes = std::fs::read(path).map_err(|source| TextureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_tile(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn dims(length: f64, width: f64) -> PhysicalDimensions {
        PhysicalDimensions::new(length, width).unwrap()
    }

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_floor_texture_end_to_end() {
        let source = RgbaImage::from_pixel(300, 200, Rgba([50, 100, 150, 255]));
        let config = TextureConfig::default();
        let texture = compute_surface_texture(
            &source,
            dims(12.0, 12.0),
            dims(12.0, 10.0),
            &GroutStyle::default(),
            SurfaceKind::Floor,
            &config,
        );

        assert_eq!(texture.raster.dimensions(), (512, 512));
        assert!(!texture.is_placeholder());
        assert!(texture.grout_baked);
        assert_eq!(texture.wrap, (WrapMode::Repeat, WrapMode::Repeat));
        assert!((texture.repeat.x - 1.8).abs() < 1e-9);
        assert!((texture.repeat.y - 1.875).abs() < 1e-9);
        assert_eq!(texture.raster.pixel(0, 0), crate::grout::DEFAULT_GROUT_COLOR);
    }

    #[test]
    fn test_wall_uses_wall_calibration() {
        let config = TextureConfig::default();
        let r = repeat_factors_only(dims(12.0, 12.0), dims(12.0, 9.0), SurfaceKind::Wall, &config);
        assert!((r.x - 1.5).abs() < 1e-9);
        assert!((r.y - 1.125).abs() < 1e-9);
    }

    #[test]
    fn test_repeat_factors_only_is_deterministic() {
        let config = TextureConfig::default();
        let a = repeat_factors_only(dims(7.0, 13.0), dims(11.5, 9.25), SurfaceKind::Floor, &config);
        let b = repeat_factors_only(dims(7.0, 13.0), dims(11.5, 9.25), SurfaceKind::Floor, &config);
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
    }

    #[test]
    fn test_decode_roundtrip() {
        let img = RgbaImage::from_pixel(5, 3, Rgba([1, 2, 3, 255]));
        let decoded = decode_tile(&png_bytes(&img)).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_decode_failure() {
        let err = decode_tile(b"definitely not an image").unwrap_err();
        assert!(matches!(err, TextureError::Decode(_)));
        assert!(err.to_string().starts_with("could not load texture"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_tile(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, TextureError::Io { .. }));
    }

    #[test]
    fn test_source_left_untouched() {
        let source = RgbaImage::from_fn(40, 10, |x, y| Rgba([x as u8, y as u8, 7, 255]));
        let before = source.clone();
        let config = TextureConfig::default();
        let _ = compute_surface_texture(
            &source,
            dims(12.0, 12.0),
            dims(10.0, 10.0),
            &GroutStyle::hidden(),
            SurfaceKind::Wall,
            &config,
        );
        assert_eq!(source, before);
    }
}
