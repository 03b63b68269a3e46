//! Discrete tile layout
//!
//! Whole-tile counts and quantities for a surface, as sent to the renovation
//! service and shown in quantity estimates. Unlike [`crate::repeat`] these
//! round up to full tiles and carry no visual calibration.

use serde::{Deserialize, Serialize};

use crate::dimensions::{LengthUnit, PhysicalDimensions, RoomDimensions};
use crate::renovation::RenovationKind;

/// Square inches in one square foot.
const SQ_INCHES_PER_SQ_FOOT: f64 = 144.0;

/// Waste allowance used when none is given (10%).
pub const DEFAULT_WASTE_FACTOR: f64 = 0.1;

/// Largest room length or width accepted, in feet.
pub const MAX_ROOM_SPAN_FT: f64 = 100.0;

/// Largest wall height accepted, in feet.
pub const MAX_WALL_HEIGHT_FT: f64 = 20.0;

/// Largest tile side accepted, in inches.
pub const MAX_TILE_SIDE_IN: f64 = 48.0;

/// Whole tiles along each axis of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileLayout {
    pub tiles_x: u32,
    pub tiles_y: u32,
    /// Target area as a percentage of the area the whole tiles cover
    pub coverage: f64,
    /// Target surface area in square feet
    pub area: f64,
}

/// Tile counts including a waste allowance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileQuantity {
    pub tiles_needed: u64,
    pub tiles_with_waste: u64,
    /// Area of `tiles_needed` tiles in square feet
    pub tile_area: f64,
    /// Target surface area in square feet
    pub target_area: f64,
}

/// Whole tiles needed to cover `surface` (feet) with `tile` (inches).
///
/// Per-axis counts saturate at `u32::MAX`.
pub fn tile_layout(surface: PhysicalDimensions, tile: PhysicalDimensions) -> TileLayout {
    let surface_in = surface.to_inches(LengthUnit::Feet);
    let tiles_x = (surface_in.length() / tile.length()).ceil() as u32;
    let tiles_y = (surface_in.width() / tile.width()).ceil() as u32;

    let covered = f64::from(tiles_x) * tile.length() * f64::from(tiles_y) * tile.width();
    let target = surface_in.area();

    TileLayout {
        tiles_x,
        tiles_y,
        coverage: target / covered * 100.0,
        area: target / SQ_INCHES_PER_SQ_FOOT,
    }
}

/// Tile quantity for a surface with `waste_factor` extra (0.1 = 10%).
pub fn tile_quantity(surface: PhysicalDimensions, tile: PhysicalDimensions, waste_factor: f64) -> TileQuantity {
    let layout = tile_layout(surface, tile);
    let tiles_needed = u64::from(layout.tiles_x) * u64::from(layout.tiles_y);
    // saturating cast
    let tiles_with_waste = (tiles_needed as f64 * (1.0 + waste_factor)).ceil() as u64;

    TileQuantity {
        tiles_needed,
        tiles_with_waste,
        tile_area: tile.area() / SQ_INCHES_PER_SQ_FOOT * tiles_needed as f64,
        target_area: layout.area,
    }
}

/// A dimension that is out of range for the requested renovation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DimensionIssue {
    #[error("Room/wall length must be between 1 and 100 feet")]
    RoomLength,
    #[error("Room width must be between 1 and 100 feet")]
    RoomWidth,
    #[error("Wall height must be between 1 and 20 feet")]
    WallHeight,
    #[error("Tile length must be between 1 and 48 inches")]
    TileLength,
    #[error("Tile width must be between 1 and 48 inches")]
    TileWidth,
}

fn in_range(value: f64, max: f64) -> bool {
    value > 0.0 && value <= max
}

/// Check the room measurements a renovation needs.
///
/// Length matters for everything except wall coloring, width for floor work,
/// height for wall tiling.
pub fn validate_room_dimensions(room: &RoomDimensions, kind: RenovationKind) -> Vec<DimensionIssue> {
    let mut issues = Vec::new();

    if kind != RenovationKind::WallColoring && !in_range(room.length, MAX_ROOM_SPAN_FT) {
        issues.push(DimensionIssue::RoomLength);
    }
    if kind.tiles_floor() && !in_range(room.width, MAX_ROOM_SPAN_FT) {
        issues.push(DimensionIssue::RoomWidth);
    }
    if kind.tiles_wall() && !room.height.is_some_and(|h| in_range(h, MAX_WALL_HEIGHT_FT)) {
        issues.push(DimensionIssue::WallHeight);
    }
    issues
}

/// Check tile sides are within (0, 48] inches.
pub fn validate_tile_dimensions(length: f64, width: f64) -> Vec<DimensionIssue> {
    let mut issues = Vec::new();
    if !in_range(length, MAX_TILE_SIDE_IN) {
        issues.push(DimensionIssue::TileLength);
    }
    if !in_range(width, MAX_TILE_SIDE_IN) {
        issues.push(DimensionIssue::TileWidth);
    }
    issues
}

/// Square tile sizes suited to the room's floor area.
pub fn recommended_tile_sizes(room: &RoomDimensions) -> [PhysicalDimensions; 3] {
    let sides = match room.length * room.width {
        area if area < 50.0 => [6.0, 8.0, 12.0],
        area if area < 150.0 => [12.0, 16.0, 18.0],
        _ => [18.0, 24.0, 36.0],
    };
    sides.map(|s| PhysicalDimensions::new_unchecked(s, s))
}

const COMMON_RATIOS: &[(f64, &str)] = &[
    (1.0, "1:1"),
    (4.0 / 3.0, "4:3"),
    (3.0 / 2.0, "3:2"),
    (16.0 / 9.0, "16:9"),
    (2.0, "2:1"),
    (3.0, "3:1"),
];

/// Human readable ratio such as `4:3`.
///
/// Snaps to a common ratio within 0.1, otherwise reduces `round(ar * 10):10`.
pub fn format_aspect_ratio(aspect_ratio: f64) -> String {
    let distance = |r: f64| (r - aspect_ratio).abs();
    let closest = COMMON_RATIOS
        .iter()
        .min_by(|a, b| distance(a.0).total_cmp(&distance(b.0)));

    if let Some(&(ratio, label)) = closest {
        if distance(ratio) < 0.1 {
            return label.to_string();
        }
    }

    let width = (aspect_ratio * 10.0).round() as u64;
    let height = 10;
    let divisor = gcd(width, height).max(1);
    format!("{}:{}", width / divisor, height / divisor)
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}
