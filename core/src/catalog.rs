//! Tile catalog
//!
//! Built-in presets come from an immutable baseline. Their sizes may be
//! overridden for the session and reset from that baseline; user uploads live
//! alongside them as custom tiles until removed.

use serde::{Deserialize, Serialize};

use crate::dimensions::{PhysicalDimensions, SurfaceKind};
use crate::error::{Result, TextureError};

/// Surfaces a tile may be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationTarget {
    Wall,
    Floor,
    #[default]
    Both,
}

impl ApplicationTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationTarget::Wall => "wall",
            ApplicationTarget::Floor => "floor",
            ApplicationTarget::Both => "both",
        }
    }

    pub fn applies_to(self, kind: SurfaceKind) -> bool {
        matches!(
            (self, kind),
            (ApplicationTarget::Both, _)
                | (ApplicationTarget::Wall, SurfaceKind::Wall)
                | (ApplicationTarget::Floor, SurfaceKind::Floor)
        )
    }
}

/// A selectable tile texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSpec {
    pub id: String,
    pub name: String,
    /// Image used for the texture
    pub texture: String,
    /// Image shown in pickers; usually the same as `texture`
    pub preview: String,
    /// Physical size in inches
    pub size: PhysicalDimensions,
    #[serde(default)]
    pub glossy: bool,
    #[serde(default)]
    pub target: ApplicationTarget,
    #[serde(default)]
    pub custom: bool,
}

impl TileSpec {
    pub fn applies_to(&self, kind: SurfaceKind) -> bool {
        self.target.applies_to(kind)
    }
}

/// `(id, name, image, length, width, glossy, target)`
type Preset = (&'static str, &'static str, &'static str, f64, f64, bool, ApplicationTarget);

const BUILTIN: &[Preset] = &[
    ("1", "Tiles-1", "/textures/floor/tiles1_glossy.webp", 12.0, 12.0, true, ApplicationTarget::Both),
    ("2", "Tiles-2", "/textures/floor/tiles2_glossy.webp", 12.0, 12.0, true, ApplicationTarget::Both),
    ("3", "Tiles-3", "/textures/floor/tiles3_glossy.webp", 10.0, 10.0, true, ApplicationTarget::Both),
    ("4", "Tiles-4", "/textures/floor/tiles4_matt.webp", 10.0, 10.0, false, ApplicationTarget::Both),
    ("5", "Tiles-5", "/textures/floor/tiles5_matt.webp", 12.0, 12.0, false, ApplicationTarget::Both),
    ("6", "Tiles-6", "/textures/floor/tiles6_matt.webp", 12.0, 12.0, false, ApplicationTarget::Both),
    ("7", "Tiles-7", "/textures/floor/tiles7_matt.webp", 24.0, 24.0, false, ApplicationTarget::Both),
    ("8", "Tiles-8", "/textures/floor/tiles8_glossy.webp", 16.0, 32.0, true, ApplicationTarget::Floor),
    ("9", "Hardwood Flooring", "/textures/floor/tiles9_glossy.webp", 16.0, 32.0, true, ApplicationTarget::Floor),
];

/// The immutable built-in presets.
pub fn builtin_tiles() -> Vec<TileSpec> {
    BUILTIN
        .iter()
        .map(|&(id, name, image, length, width, glossy, target)| TileSpec {
            id: id.to_string(),
            name: name.to_string(),
            texture: image.to_string(),
            preview: image.to_string(),
            size: PhysicalDimensions::new_unchecked(length, width),
            glossy,
            target,
            custom: false,
        })
        .collect()
}

/// Presets plus session custom tiles, looked up by id.
#[derive(Debug, Clone)]
pub struct TileCatalog {
    baseline: Vec<TileSpec>,
    presets: Vec<TileSpec>,
    custom: Vec<TileSpec>,
}

impl Default for TileCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TileCatalog {
    /// Catalog holding the built-in presets.
    pub fn new() -> Self {
        Self::with_baseline(builtin_tiles())
    }

    pub fn with_baseline(baseline: Vec<TileSpec>) -> Self {
        Self {
            presets: baseline.clone(),
            baseline,
            custom: Vec::new(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&TileSpec> {
        self.all().find(|t| t.id == id)
    }

    /// Presets followed by custom tiles.
    pub fn all(&self) -> impl Iterator<Item = &TileSpec> {
        self.presets.iter().chain(&self.custom)
    }

    pub fn custom_tiles(&self) -> &[TileSpec] {
        &self.custom
    }

    /// Tiles that can be applied to `kind`.
    pub fn available_for(&self, kind: SurfaceKind) -> impl Iterator<Item = &TileSpec> {
        self.all().filter(move |t| t.applies_to(kind))
    }

    /// Override a tile's physical size for this session.
    pub fn set_size(&mut self, id: &str, size: PhysicalDimensions) -> Result<()> {
        let tile = self
            .presets
            .iter_mut()
            .chain(self.custom.iter_mut())
            .find(|t| t.id == id)
            .ok_or_else(|| TextureError::Catalog(format!("no tile with id {id:?}")))?;
        tile.size = size;
        Ok(())
    }

    /// Restore a preset to its baseline definition.
    pub fn reset(&mut self, id: &str) -> Result<()> {
        let original = self
            .baseline
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TextureError::Catalog(format!("{id:?} is not a built-in tile")))?;
        if let Some(tile) = self.presets.iter_mut().find(|t| t.id == id) {
            *tile = original.clone();
        }
        Ok(())
    }

    /// Restore every preset to its baseline definition.
    pub fn reset_all(&mut self) {
        self.presets = self.baseline.clone();
    }

    /// Add a user-supplied tile. Ids must be unique across the catalog.
    pub fn add_custom(&mut self, mut tile: TileSpec) -> Result<()> {
        if self.get(&tile.id).is_some() {
            return Err(TextureError::Catalog(format!("duplicate tile id {:?}", tile.id)));
        }
        tile.custom = true;
        self.custom.push(tile);
        Ok(())
    }

    /// Remove a custom tile. Presets cannot be removed.
    pub fn remove_custom(&mut self, id: &str) -> Option<TileSpec> {
        let index = self.custom.iter().position(|t| t.id == id)?;
        Some(self.custom.remove(index))
    }
}
