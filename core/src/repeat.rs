//! Continuous repeat factors for the live surface preview.
//!
//! The baked texture represents one tile at a fixed canvas resolution, not a
//! 1:1 physical scale, so the physical tile count is scaled by a shared
//! density threshold and a per-surface calibration.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SurfaceCalibration;
use crate::dimensions::{LengthUnit, PhysicalDimensions};

/// Texture repeats along the surface's X (length) and Y (width) axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepeatFactors {
    pub x: f64,
    pub y: f64,
}

/// Repeat factors for `tile` (inches) across `surface` (feet).
///
/// `repeat = surfaceInches / tileInches * threshold * calibration` per axis.
/// Fractional results are expected; partial tiles at the edges are fine.
pub fn repeat_factors(
    tile: PhysicalDimensions,
    surface: PhysicalDimensions,
    threshold: f64,
    calibration: SurfaceCalibration,
) -> RepeatFactors {
    let surface_in = surface.to_inches(LengthUnit::Feet);
    let tiles_x = surface_in.length() / tile.length();
    let tiles_y = surface_in.width() / tile.width();

    let factors = RepeatFactors {
        x: tiles_x * threshold * calibration.x,
        y: tiles_y * threshold * calibration.y,
    };
    debug!(tiles_x, tiles_y, repeat_x = factors.x, repeat_y = factors.y, "repeat factors");
    factors
}
