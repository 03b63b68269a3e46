//! Physical dimensions and unit conversion.
//!
//! Tile sizes are carried in inches and surface sizes in feet. Values from
//! other units are converted at the edges, so the texture math only ever sees
//! validated, positive numbers.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TextureError};

/// Inches in one foot.
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Centimeters in one inch.
pub const CENTIMETERS_PER_INCH: f64 = 2.54;

/// Wall height assumed when a room does not declare one.
pub const DEFAULT_WALL_HEIGHT_FT: f64 = 9.0;

/// Unit a length was entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Inches,
    Feet,
    Centimeters,
}

impl LengthUnit {
    /// Convert a value in this unit to inches.
    pub fn to_inches(self, value: f64) -> f64 {
        match self {
            LengthUnit::Inches => value,
            LengthUnit::Feet => value * INCHES_PER_FOOT,
            LengthUnit::Centimeters => value / CENTIMETERS_PER_INCH,
        }
    }
}

/// Which plane of the room a texture is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    Wall,
    Floor,
}

impl SurfaceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SurfaceKind::Wall => "wall",
            SurfaceKind::Floor => "floor",
        }
    }
}

impl std::fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(length, width)` pair of positive, finite lengths.
///
/// The unit is implied by context: inches for tiles, feet for surfaces.
/// `length` runs along the texture's X axis and `width` along its Y axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct PhysicalDimensions {
    length: f64,
    width: f64,
}

impl PhysicalDimensions {
    /// Create dimensions, rejecting zero, negative or non-finite components.
    pub fn new(length: f64, width: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(length) || !valid(width) {
            return Err(TextureError::InvalidDimensions { length, width });
        }
        Ok(Self { length, width })
    }

    /// Create tile dimensions from values entered in `unit`, stored in inches.
    pub fn from_unit(length: f64, width: f64, unit: LengthUnit) -> Result<Self> {
        Self::new(unit.to_inches(length), unit.to_inches(width))
    }

    /// Only for literals known to be valid (catalog presets, recommendations).
    pub(crate) const fn new_unchecked(length: f64, width: f64) -> Self {
        Self { length, width }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// `length / width`, the aspect ratio a tile image should have.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.length / self.width
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Same extent expressed in inches, given the unit these values are in.
    pub fn to_inches(self, unit: LengthUnit) -> Self {
        Self {
            length: unit.to_inches(self.length),
            width: unit.to_inches(self.width),
        }
    }
}

impl TryFrom<(f64, f64)> for PhysicalDimensions {
    type Error = TextureError;

    fn try_from((length, width): (f64, f64)) -> Result<Self> {
        Self::new(length, width)
    }
}

impl From<PhysicalDimensions> for (f64, f64) {
    fn from(dims: PhysicalDimensions) -> Self {
        (dims.length, dims.width)
    }
}

impl std::fmt::Display for PhysicalDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.length, self.width)
    }
}

/// Room measurements in feet.
///
/// `height` is the wall height and is only needed for wall surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub length: f64,
    pub width: f64,
    #[serde(default)]
    pub height: Option<f64>,
}

impl RoomDimensions {
    pub fn new(length: f64, width: f64, height: Option<f64>) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    /// Wall height, falling back to [`DEFAULT_WALL_HEIGHT_FT`].
    pub fn wall_height(&self) -> f64 {
        self.height.unwrap_or(DEFAULT_WALL_HEIGHT_FT)
    }

    /// Extent of one surface in feet.
    ///
    /// The floor spans room length by room width; a wall spans room length by
    /// wall height.
    pub fn surface(&self, kind: SurfaceKind) -> Result<PhysicalDimensions> {
        match kind {
            SurfaceKind::Floor => PhysicalDimensions::new(self.length, self.width),
            SurfaceKind::Wall => PhysicalDimensions::new(self.length, self.wall_height()),
        }
    }
}
