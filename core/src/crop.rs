//! Aspect-fit cropping
//!
//! A tile photo rarely has the pixel aspect ratio of the physical tile it
//! depicts. Stretching it onto a repeated tile would distort the pattern, so
//! the longer axis is center-cropped until the ratios agree. Near matches
//! (within the configured tolerance) are left alone to avoid needless
//! resampling.

use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use tracing::debug;

use crate::config::CanvasConfig;
use crate::dimensions::PhysicalDimensions;

/// Source rectangle of a crop, in source pixel coordinates.
///
/// Fields are fractional; they are exactly the centered crop geometry before
/// any pixel snapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    /// Integer pixel bounds `(x, y, width, height)` clamped to the source.
    pub fn pixel_bounds(&self, source_width: u32, source_height: u32) -> (u32, u32, u32, u32) {
        let snap = |origin: f64, extent: f64, limit: u32| {
            let start = (origin.round() as u32).min(limit.saturating_sub(1));
            let len = (extent.round() as u32).clamp(1, limit - start);
            (start, len)
        };
        let (x, w) = snap(self.x, self.width, source_width);
        let (y, h) = snap(self.y, self.height, source_height);
        (x, y, w, h)
    }

    /// Side of the square preview a crop is rendered into.
    pub fn output_size(&self, resolution: u32) -> u32 {
        let longest = self.width.max(self.height).ceil() as u32;
        resolution.min(longest).max(1)
    }
}

/// `width / height`
#[inline]
pub fn aspect_ratio(width: u32, height: u32) -> f64 {
    f64::from(width) / f64::from(height)
}

/// Whether a `source_width x source_height` image differs from `target_ar` by
/// more than `tolerance`.
pub fn needs_crop(source_width: u32, source_height: u32, target_ar: f64, tolerance: f64) -> bool {
    (aspect_ratio(source_width, source_height) - target_ar).abs() > tolerance
}

/// Centered crop of a `source_width x source_height` image to `target_ar`.
///
/// Wider sources lose columns symmetrically, taller sources lose rows. An exact
/// match returns the full frame.
pub fn crop_region(source_width: u32, source_height: u32, target_ar: f64) -> CropRegion {
    let sw = f64::from(source_width);
    let sh = f64::from(source_height);
    let source_ar = sw / sh;

    let mut region = CropRegion {
        x: 0.0,
        y: 0.0,
        width: sw,
        height: sh,
    };

    if source_ar > target_ar {
        region.width = sh * target_ar;
        region.x = (sw - region.width) / 2.0;
    } else if source_ar < target_ar {
        region.height = sw / target_ar;
        region.y = (sh - region.height) / 2.0;
    }
    region
}

/// Center-crops tile images to their physical aspect ratio.
#[derive(Debug, Clone, Copy)]
pub struct AspectFitCropper {
    tolerance: f64,
    resolution: u32,
    filter: FilterType,
}

impl AspectFitCropper {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            tolerance: config.aspect_tolerance,
            resolution: config.resolution,
            filter: config.filter.filter_type(),
        }
    }

    /// The crop that would be applied, or `None` when within tolerance.
    pub fn plan(&self, source_width: u32, source_height: u32, tile: PhysicalDimensions) -> Option<CropRegion> {
        if source_width == 0 || source_height == 0 {
            return None;
        }
        let target_ar = tile.aspect_ratio();
        if !needs_crop(source_width, source_height, target_ar, self.tolerance) {
            return None;
        }
        Some(crop_region(source_width, source_height, target_ar))
    }

    /// Crop `source` for a tile of the given physical size.
    ///
    /// Returns the source itself when no crop is needed. Otherwise the crop is
    /// resampled into a square of [`CropRegion::output_size`] pixels.
    pub fn crop<'a>(&self, source: &'a RgbaImage, tile: PhysicalDimensions) -> Cow<'a, RgbaImage> {
        let (sw, sh) = source.dimensions();
        let Some(region) = self.plan(sw, sh, tile) else {
            debug!(sw, sh, target_ar = tile.aspect_ratio(), "aspect within tolerance, no crop");
            return Cow::Borrowed(source);
        };

        let (x, y, w, h) = region.pixel_bounds(sw, sh);
        let size = region.output_size(self.resolution);
        debug!(sw, sh, x, y, w, h, size, "cropping tile to aspect ratio");

        let cropped = imageops::crop_imm(source, x, y, w, h).to_image();
        Cow::Owned(imageops::resize(&cropped, size, size, self.filter))
    }
}
