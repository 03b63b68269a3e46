//! Renovation request parameters
//!
//! The remote renovation service takes multipart forms. This module only
//! builds the text fields from the discrete tile layout; the transport lives
//! with the caller.

use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::color::format_hex_color;
use crate::layout::TileLayout;

/// Grout width the renovation service uses when none is given, in pixels.
pub const DEFAULT_REQUEST_GROUT_WIDTH: u32 = 2;

/// Kind of renovation requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenovationKind {
    FloorTiling,
    WallTiling,
    CompleteTiling,
    WallColoring,
    FloorTilingWallColoring,
}

impl RenovationKind {
    pub const ALL: [RenovationKind; 5] = [
        RenovationKind::FloorTiling,
        RenovationKind::WallTiling,
        RenovationKind::CompleteTiling,
        RenovationKind::WallColoring,
        RenovationKind::FloorTilingWallColoring,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            RenovationKind::FloorTiling => "floor-tiling",
            RenovationKind::WallTiling => "wall-tiling",
            RenovationKind::CompleteTiling => "complete-tiling",
            RenovationKind::WallColoring => "wall-coloring",
            RenovationKind::FloorTilingWallColoring => "floor-tiling-wall-coloring",
        }
    }

    /// Service path, relative to the API base URL.
    pub fn endpoint(self) -> String {
        format!("/api/{}", self.slug())
    }

    pub fn tiles_floor(self) -> bool {
        matches!(
            self,
            RenovationKind::FloorTiling
                | RenovationKind::CompleteTiling
                | RenovationKind::FloorTilingWallColoring
        )
    }

    pub fn tiles_wall(self) -> bool {
        matches!(self, RenovationKind::WallTiling | RenovationKind::CompleteTiling)
    }

    pub fn colors_wall(self) -> bool {
        matches!(
            self,
            RenovationKind::WallColoring | RenovationKind::FloorTilingWallColoring
        )
    }

    /// Multipart file fields the request carries.
    pub fn file_fields(self) -> &'static [&'static str] {
        match self {
            RenovationKind::FloorTiling | RenovationKind::FloorTilingWallColoring => {
                &["room_image", "floor_tile"]
            }
            RenovationKind::WallTiling => &["room_image", "wall_tile"],
            RenovationKind::CompleteTiling => &["room_image", "floor_tile", "wall_tile"],
            RenovationKind::WallColoring => &["room_image"],
        }
    }
}

impl FromStr for RenovationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| format!("unknown renovation kind {s:?}"))
    }
}

impl std::fmt::Display for RenovationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Tiling parameters for one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilingParams {
    pub tiles_x: u32,
    pub tiles_y: u32,
    pub grout_width: u32,
    pub grout_color: Rgba<u8>,
}

impl TilingParams {
    pub fn from_layout(layout: &TileLayout, grout_width: u32, grout_color: Rgba<u8>) -> Self {
        Self {
            tiles_x: layout.tiles_x,
            tiles_y: layout.tiles_y,
            grout_width,
            grout_color,
        }
    }

    fn push_fields(&self, prefix: &str, fields: &mut Vec<(String, String)>) {
        fields.push((format!("{prefix}tiles_x"), self.tiles_x.to_string()));
        fields.push((format!("{prefix}tiles_y"), self.tiles_y.to_string()));
        fields.push((format!("{prefix}grout_width"), self.grout_width.to_string()));
        fields.push((format!("{prefix}grout_color"), format_hex_color(self.grout_color)));
    }
}

/// Parameters of one renovation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenovationParams {
    FloorTiling(TilingParams),
    WallTiling(TilingParams),
    CompleteTiling { floor: TilingParams, wall: TilingParams },
    WallColoring { wall_color: Rgba<u8> },
    FloorTilingWallColoring { floor: TilingParams, wall_color: Rgba<u8> },
}

impl RenovationParams {
    pub fn kind(&self) -> RenovationKind {
        match self {
            RenovationParams::FloorTiling(_) => RenovationKind::FloorTiling,
            RenovationParams::WallTiling(_) => RenovationKind::WallTiling,
            RenovationParams::CompleteTiling { .. } => RenovationKind::CompleteTiling,
            RenovationParams::WallColoring { .. } => RenovationKind::WallColoring,
            RenovationParams::FloorTilingWallColoring { .. } => RenovationKind::FloorTilingWallColoring,
        }
    }

    /// Multipart text fields in the order the service documents them.
    ///
    /// Complete tiling interleaves its `floor_`/`wall_` fields by parameter
    /// rather than by surface.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        match self {
            RenovationParams::FloorTiling(params) | RenovationParams::WallTiling(params) => {
                params.push_fields("", &mut fields);
            }
            RenovationParams::CompleteTiling { floor, wall } => {
                let pairs = [
                    ("floor_tiles_x", floor.tiles_x.to_string()),
                    ("floor_tiles_y", floor.tiles_y.to_string()),
                    ("wall_tiles_x", wall.tiles_x.to_string()),
                    ("wall_tiles_y", wall.tiles_y.to_string()),
                    ("floor_grout_width", floor.grout_width.to_string()),
                    ("wall_grout_width", wall.grout_width.to_string()),
                    ("floor_grout_color", format_hex_color(floor.grout_color)),
                    ("wall_grout_color", format_hex_color(wall.grout_color)),
                ];
                fields.extend(pairs.into_iter().map(|(k, v)| (k.to_string(), v)));
            }
            RenovationParams::WallColoring { wall_color } => {
                fields.push(("wall_color".to_string(), format_hex_color(*wall_color)));
            }
            RenovationParams::FloorTilingWallColoring { floor, wall_color } => {
                fields.push(("wall_color".to_string(), format_hex_color(*wall_color)));
                floor.push_fields("", &mut fields);
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(x: u32, y: u32) -> TilingParams {
        TilingParams {
            tiles_x: x,
            tiles_y: y,
            grout_width: DEFAULT_REQUEST_GROUT_WIDTH,
            grout_color: Rgba([0xdb, 0xdb, 0xdb, 255]),
        }
    }

    fn field<'a>(fields: &'a [(String, String)], key: &str) -> Option<&'a str> {
        fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_kind_slug_roundtrip() {
        for kind in RenovationKind::ALL {
            assert_eq!(kind.slug().parse::<RenovationKind>().unwrap(), kind);
        }
        assert!("roof-tiling".parse::<RenovationKind>().is_err());
        assert_eq!(RenovationKind::WallColoring.endpoint(), "/api/wall-coloring");
    }

    #[test]
    fn test_floor_fields() {
        let fields = RenovationParams::FloorTiling(params(12, 10)).form_fields();
        assert_eq!(field(&fields, "tiles_x"), Some("12"));
        assert_eq!(field(&fields, "tiles_y"), Some("10"));
        assert_eq!(field(&fields, "grout_width"), Some("2"));
        assert_eq!(field(&fields, "grout_color"), Some("#dbdbdb"));
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn test_complete_fields_are_prefixed() {
        let request = RenovationParams::CompleteTiling {
            floor: params(12, 10),
            wall: params(12, 9),
        };
        let fields = request.form_fields();
        assert_eq!(fields.len(), 8);
        assert_eq!(field(&fields, "floor_tiles_y"), Some("10"));
        assert_eq!(field(&fields, "wall_tiles_y"), Some("9"));
        assert!(field(&fields, "tiles_x").is_none());
        assert_eq!(request.kind().file_fields(), &["room_image", "floor_tile", "wall_tile"]);
    }

    #[test]
    fn test_wall_coloring_fields() {
        let request = RenovationParams::FloorTilingWallColoring {
            floor: params(4, 4),
            wall_color: Rgba([0xf8, 0xf8, 0xff, 255]),
        };
        let fields = request.form_fields();
        assert_eq!(field(&fields, "wall_color"), Some("#f8f8ff"));
        assert_eq!(field(&fields, "tiles_x"), Some("4"));
        assert!(request.kind().tiles_floor());
        assert!(request.kind().colors_wall());
        assert!(!request.kind().tiles_wall());
    }
}
