//! Output rasters and canvas acquisition.

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::{Result, TextureError};

/// Source of drawing canvases.
///
/// Returning `None` signals the canvas could not be produced (allocation
/// failure or budget exceeded). Callers must degrade rather than fail.
pub trait CanvasProvider {
    fn create_canvas(&self, width: u32, height: u32) -> Option<RgbaImage>;
}

/// Heap-backed canvases with a pixel budget.
///
/// Allocation uses `try_reserve_exact`, so running out of memory surfaces as
/// `None` instead of aborting the process.
#[derive(Debug, Clone, Copy)]
pub struct HeapCanvas {
    max_pixels: u64,
}

impl HeapCanvas {
    pub fn new(max_pixels: u64) -> Self {
        Self { max_pixels }
    }
}

impl CanvasProvider for HeapCanvas {
    fn create_canvas(&self, width: u32, height: u32) -> Option<RgbaImage> {
        let pixels = u64::from(width) * u64::from(height);
        if pixels == 0 || pixels > self.max_pixels {
            return None;
        }
        let len = usize::try_from(pixels.checked_mul(4)?).ok()?;

        let mut data = Vec::new();
        data.try_reserve_exact(len).ok()?;
        data.resize(len, 0);
        RgbaImage::from_raw(width, height, data)
    }
}

/// Pixels of a composited texture.
#[derive(Debug, Clone, PartialEq)]
pub enum Raster {
    /// Rendered RGBA pixels.
    Image(RgbaImage),
    /// Fully transparent placeholder that owns no pixel storage.
    Blank { width: u32, height: u32 },
}

impl Raster {
    pub fn width(&self) -> u32 {
        self.dimensions().0
    }

    pub fn height(&self) -> u32 {
        self.dimensions().1
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Raster::Image(img) => img.dimensions(),
            Raster::Blank { width, height } => (*width, *height),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Raster::Blank { .. })
    }

    /// Pixel at `(x, y)`; placeholders read as transparent black.
    ///
    /// # Panics
    /// If `(x, y)` is outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        match self {
            Raster::Image(img) => *img.get_pixel(x, y),
            Raster::Blank { width, height } => {
                assert!(x < *width && y < *height, "pixel ({x}, {y}) out of bounds");
                Rgba([0, 0, 0, 0])
            }
        }
    }

    pub fn as_image(&self) -> Option<&RgbaImage> {
        match self {
            Raster::Image(img) => Some(img),
            Raster::Blank { .. } => None,
        }
    }

    /// Materialise the pixels, allocating for placeholders.
    pub fn to_image(&self) -> RgbaImage {
        match self {
            Raster::Image(img) => img.clone(),
            Raster::Blank { width, height } => RgbaImage::new(*width, *height),
        }
    }

    /// Write the raster as PNG.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        match self {
            Raster::Image(img) => img.save_with_format(path, ImageFormat::Png),
            Raster::Blank { .. } => self.to_image().save_with_format(path, ImageFormat::Png),
        }
        .map_err(TextureError::Encode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heap_canvas_budget() {
        let canvas = HeapCanvas::new(64 * 64);
        let img = canvas.create_canvas(64, 64).unwrap();
        assert_eq!(img.dimensions(), (64, 64));
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 0]));

        assert!(canvas.create_canvas(65, 64).is_none());
        assert!(canvas.create_canvas(0, 10).is_none());
    }

    #[test]
    fn test_heap_canvas_huge_request() {
        let canvas = HeapCanvas::new(u64::MAX);
        assert!(canvas.create_canvas(u32::MAX, u32::MAX).is_none());
    }

    #[test]
    fn test_blank_raster() {
        let blank = Raster::Blank {
            width: 8,
            height: 4,
        };
        assert!(blank.is_blank());
        assert_eq!(blank.dimensions(), (8, 4));
        assert_eq!(blank.pixel(7, 3), Rgba([0, 0, 0, 0]));
        assert!(blank.as_image().is_none());
        assert_eq!(blank.to_image().dimensions(), (8, 4));
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.png");
        Raster::Blank {
            width: 4,
            height: 4,
        }
        .save_png(&path)
        .unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (4, 4));
    }
}
