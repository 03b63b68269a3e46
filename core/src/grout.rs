//! Grout compositing
//!
//! Bakes a single repeatable tile unit onto a square canvas. With grout
//! visible the canvas is flooded with the grout color and the tile is drawn
//! inset by half the grout width on every side, so neighbouring repeats meet
//! at a full-width grout line.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::CanvasConfig;
use crate::crop::AspectFitCropper;
use crate::dimensions::PhysicalDimensions;
use crate::raster::{CanvasProvider, Raster};

/// Grout color surfaces start with (`#dbdbdb`).
pub const DEFAULT_GROUT_COLOR: Rgba<u8> = Rgba([0xdb, 0xdb, 0xdb, 0xff]);

/// Grout appearance for one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroutStyle {
    #[serde(with = "crate::color::hex", default = "default_color")]
    pub color: Rgba<u8>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_color() -> Rgba<u8> {
    DEFAULT_GROUT_COLOR
}
fn default_visible() -> bool {
    true
}

impl Default for GroutStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_GROUT_COLOR,
            visible: true,
        }
    }
}

impl GroutStyle {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::default()
        }
    }
}

/// Composites tile images into fixed-resolution textures.
#[derive(Debug, Clone, Copy)]
pub struct GroutCompositor {
    resolution: u32,
    grout_width: u32,
    filter: FilterType,
    cropper: AspectFitCropper,
}

impl GroutCompositor {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            resolution: config.resolution,
            grout_width: config.grout_width,
            filter: config.filter.filter_type(),
            cropper: AspectFitCropper::new(config),
        }
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Pixels of grout on each edge of the canvas.
    pub fn grout_inset(&self) -> u32 {
        self.grout_width / 2
    }

    /// Render one tile unit.
    ///
    /// `source` may be raw; the aspect-fit crop is re-applied here. Never
    /// fails: when `canvas` cannot supply a surface the result is a blank
    /// placeholder of the same resolution.
    pub fn composite(
        &self,
        source: &RgbaImage,
        tile: PhysicalDimensions,
        grout: &GroutStyle,
        canvas: &dyn CanvasProvider,
    ) -> Raster {
        let res = self.resolution;
        let Some(mut target) = canvas.create_canvas(res, res) else {
            warn!(resolution = res, "no drawing canvas available, using blank placeholder");
            return Raster::Blank {
                width: res,
                height: res,
            };
        };

        let (offset, side) = if grout.visible {
            for pixel in target.pixels_mut() {
                *pixel = grout.color;
            }
            (self.grout_inset(), res.saturating_sub(self.grout_width).max(1))
        } else {
            (0, res)
        };

        let processed = self.cropper.crop(source, tile);
        if processed.width() == 0 || processed.height() == 0 {
            warn!("empty tile image, nothing to draw");
        } else {
            let unit = imageops::resize(&*processed, side, side, self.filter);
            imageops::overlay(&mut target, &unit, i64::from(offset), i64::from(offset));
        }

        debug!(resolution = res, grout = grout.visible, "composited tile texture");
        Raster::Image(target)
    }
}
