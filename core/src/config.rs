//! Texture configuration (`[canvas]` and `[repeat]` tables)
//!
//! Holds the styling constants the compositor and repeat calculator need.
//! Everything here is passed explicitly into the entry points so wall and
//! floor renderers (and tests) can hold independently tuned values.

use std::path::Path;

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::dimensions::SurfaceKind;
use crate::error::{Result, TextureError};

/// Full texture engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TextureConfig {
    /// Canvas and cropping settings
    #[serde(default)]
    pub canvas: CanvasConfig,
    /// Repeat factor calibration
    #[serde(default)]
    pub repeat: RepeatConfig,
}

/// Resampling filter used when blitting tiles onto a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    /// Bilinear
    #[default]
    Triangle,
    CatmullRom,
    Lanczos3,
}

impl ResampleFilter {
    pub fn filter_type(self) -> FilterType {
        match self {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Canvas settings shared by the cropper and the compositor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Side of the square output canvas in pixels (default: 512)
    #[serde(default = "default_resolution")]
    pub resolution: u32,
    /// Grout line thickness in pixels at `resolution` (default: 4)
    #[serde(default = "default_grout_width")]
    pub grout_width: u32,
    /// Largest aspect ratio mismatch left uncropped (default: 0.05)
    #[serde(default = "default_aspect_tolerance")]
    pub aspect_tolerance: f64,
    /// Resampling filter (default: triangle)
    #[serde(default)]
    pub filter: ResampleFilter,
    /// Pixel budget for a single canvas; larger requests get a placeholder
    /// (default: 4096 x 4096)
    #[serde(default = "default_max_pixels")]
    pub max_pixels: u64,
}

/// Per-surface multipliers applied on top of the shared threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceCalibration {
    pub x: f64,
    pub y: f64,
}

impl SurfaceCalibration {
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };
}

/// Repeat factor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatConfig {
    /// Visual density constant shared by every surface (default: 1/8)
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Floor calibration (default: x 1.2, y 1.5)
    #[serde(default = "default_floor_calibration")]
    pub floor: SurfaceCalibration,
    /// Wall calibration (default: x 1.0, y 1.0)
    #[serde(default = "default_wall_calibration")]
    pub wall: SurfaceCalibration,
}

fn default_resolution() -> u32 {
    512
}
fn default_grout_width() -> u32 {
    4
}
fn default_aspect_tolerance() -> f64 {
    0.05
}
fn default_max_pixels() -> u64 {
    4096 * 4096
}

fn default_threshold() -> f64 {
    1.0 / 8.0
}
fn default_floor_calibration() -> SurfaceCalibration {
    SurfaceCalibration { x: 1.2, y: 1.5 }
}
fn default_wall_calibration() -> SurfaceCalibration {
    SurfaceCalibration::IDENTITY
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            grout_width: default_grout_width(),
            aspect_tolerance: default_aspect_tolerance(),
            filter: ResampleFilter::default(),
            max_pixels: default_max_pixels(),
        }
    }
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            floor: default_floor_calibration(),
            wall: default_wall_calibration(),
        }
    }
}

impl RepeatConfig {
    /// Calibration multipliers for one surface.
    pub fn calibration(&self, kind: SurfaceKind) -> SurfaceCalibration {
        match kind {
            SurfaceKind::Floor => self.floor,
            SurfaceKind::Wall => self.wall,
        }
    }
}

impl TextureConfig {
    /// Parse and validate a TOML document. Missing tables take defaults.
    pub fn parse(s: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| TextureError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| TextureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Check the invariants the compositor and calculator rely on.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(TextureError::InvalidConfig(msg));
        let canvas = &self.canvas;

        if canvas.resolution == 0 {
            return invalid("canvas.resolution must be at least 1".into());
        }
        if canvas.grout_width >= canvas.resolution {
            return invalid(format!(
                "canvas.grout_width ({}) must be smaller than canvas.resolution ({})",
                canvas.grout_width, canvas.resolution
            ));
        }
        if !(canvas.aspect_tolerance.is_finite() && canvas.aspect_tolerance >= 0.0) {
            return invalid("canvas.aspect_tolerance must be a non-negative number".into());
        }
        if canvas.max_pixels < u64::from(canvas.resolution) * u64::from(canvas.resolution) {
            return invalid(format!(
                "canvas.max_pixels ({}) cannot hold a {}x{} canvas",
                canvas.max_pixels, canvas.resolution, canvas.resolution
            ));
        }

        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.repeat.threshold) {
            return invalid("repeat.threshold must be positive".into());
        }
        for (name, cal) in [("floor", self.repeat.floor), ("wall", self.repeat.wall)] {
            if !positive(cal.x) || !positive(cal.y) {
                return invalid(format!("repeat.{name} multipliers must be positive"));
            }
        }
        Ok(())
    }
}
