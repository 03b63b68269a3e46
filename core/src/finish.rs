//! Per-room surface finish selection.

use tracing::debug;

use crate::catalog::{TileCatalog, TileSpec};
use crate::color::{default_wall_color, parse_hex_color, WallColor};
use crate::dimensions::SurfaceKind;
use crate::error::Result;
use crate::grout::GroutStyle;

/// A wall is either tiled or painted, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum WallFinish {
    Tile(TileSpec),
    Color(WallColor),
}

/// Current finish choices for one room.
#[derive(Debug, Clone)]
pub struct RoomFinish {
    selection: Option<SurfaceKind>,
    wall: WallFinish,
    floor: Option<TileSpec>,
    wall_grout: GroutStyle,
    floor_grout: GroutStyle,
    custom_colors: u32,
}

fn default_floor(catalog: &TileCatalog) -> Option<TileSpec> {
    catalog.available_for(SurfaceKind::Floor).next().cloned()
}

impl RoomFinish {
    /// Painted off-white walls, the first floor-capable tile on the floor,
    /// default grout on both, floor selected for editing.
    pub fn new(catalog: &TileCatalog) -> Self {
        Self {
            selection: Some(SurfaceKind::Floor),
            wall: WallFinish::Color(default_wall_color()),
            floor: default_floor(catalog),
            wall_grout: GroutStyle::default(),
            floor_grout: GroutStyle::default(),
            custom_colors: 0,
        }
    }

    pub fn selection(&self) -> Option<SurfaceKind> {
        self.selection
    }

    pub fn set_selection(&mut self, selection: Option<SurfaceKind>) {
        self.selection = selection;
    }

    /// Select `kind`, or clear the selection if it is already selected.
    pub fn toggle_selection(&mut self, kind: SurfaceKind) {
        self.selection = if self.selection == Some(kind) {
            None
        } else {
            Some(kind)
        };
    }

    pub fn wall(&self) -> &WallFinish {
        &self.wall
    }

    pub fn floor(&self) -> Option<&TileSpec> {
        self.floor.as_ref()
    }

    /// Tile on `kind`, if that surface is tiled.
    pub fn tile(&self, kind: SurfaceKind) -> Option<&TileSpec> {
        match kind {
            SurfaceKind::Floor => self.floor.as_ref(),
            SurfaceKind::Wall => match &self.wall {
                WallFinish::Tile(tile) => Some(tile),
                WallFinish::Color(_) => None,
            },
        }
    }

    pub fn wall_color(&self) -> Option<&WallColor> {
        match &self.wall {
            WallFinish::Color(color) => Some(color),
            WallFinish::Tile(_) => None,
        }
    }

    pub fn grout(&self, kind: SurfaceKind) -> &GroutStyle {
        match kind {
            SurfaceKind::Wall => &self.wall_grout,
            SurfaceKind::Floor => &self.floor_grout,
        }
    }

    pub fn grout_mut(&mut self, kind: SurfaceKind) -> &mut GroutStyle {
        match kind {
            SurfaceKind::Wall => &mut self.wall_grout,
            SurfaceKind::Floor => &mut self.floor_grout,
        }
    }

    /// Whether `tile` may go on the currently selected surface.
    pub fn can_apply(&self, tile: &TileSpec) -> bool {
        self.selection.is_some_and(|kind| tile.applies_to(kind))
    }

    /// Put `tile` on the selected surface. Returns false if it does not apply.
    pub fn select_tile(&mut self, tile: &TileSpec) -> bool {
        let Some(kind) = self.selection.filter(|&kind| tile.applies_to(kind)) else {
            return false;
        };
        debug!(surface = %kind, tile = %tile.id, "tile selected");
        match kind {
            SurfaceKind::Wall => self.wall = WallFinish::Tile(tile.clone()),
            SurfaceKind::Floor => self.floor = Some(tile.clone()),
        }
        true
    }

    /// Paint the walls, replacing any wall tile.
    pub fn select_wall_color(&mut self, color: WallColor) {
        self.wall = WallFinish::Color(color);
    }

    /// Paint the walls with an arbitrary hex color.
    pub fn select_custom_wall_color(&mut self, hex: &str) -> Result<()> {
        let color = parse_hex_color(hex)?;
        self.custom_colors += 1;
        self.select_wall_color(WallColor {
            id: format!("custom-{}", self.custom_colors),
            name: "Custom Color".to_string(),
            color,
            custom: true,
        });
        Ok(())
    }

    /// Tiles from `catalog` applicable to the selected surface.
    pub fn available_tiles<'a>(&self, catalog: &'a TileCatalog) -> Vec<&'a TileSpec> {
        match self.selection {
            Some(kind) => catalog.available_for(kind).collect(),
            None => Vec::new(),
        }
    }

    /// Drop selections of a tile that left the catalog.
    ///
    /// A wall falls back to the default paint, the floor to the first
    /// floor-capable tile still in `catalog`.
    pub fn on_tile_removed(&mut self, id: &str, catalog: &TileCatalog) {
        if matches!(&self.wall, WallFinish::Tile(tile) if tile.id == id) {
            self.wall = WallFinish::Color(default_wall_color());
        }
        if self.floor.as_ref().is_some_and(|tile| tile.id == id) {
            self.floor = default_floor(catalog);
        }
    }
}
