//! roomtile.toml manifest parsing and building
//!
//! A manifest describes one room: its measurements, what goes on the floor
//! and walls, and optionally texture engine overrides.
//!
//! ```toml
//! [room]
//! length = 12.0
//! width = 10.0
//! height = 9.0
//!
//! [floor]
//! tile = "tiles/marble.png"
//! size = [12, 24]
//! grout = { color = "#dbdbdb", visible = true }
//!
//! [wall]
//! color = "#f8f8ff"
//!
//! [config.repeat]
//! threshold = 0.125
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use roomtile_core::layout::{
    tile_quantity, validate_room_dimensions, validate_tile_dimensions, DEFAULT_WASTE_FACTOR,
};
use roomtile_core::renovation::DEFAULT_REQUEST_GROUT_WIDTH;
use roomtile_core::{
    compute_surface_texture, format_hex_color, load_tile, parse_hex_color, tile_layout, GroutStyle,
    LengthUnit, PhysicalDimensions, RenovationKind, RenovationParams, RepeatFactors,
    RoomDimensions, SurfaceKind, TextureConfig, TileCatalog, TileLayout, TileQuantity,
    TilingParams,
};
use serde::{Deserialize, Serialize};

/// Name of the summary written next to the textures.
pub const SUMMARY_FILE: &str = "summary.json";

/// roomtile.toml manifest structure
#[derive(Debug, Deserialize)]
pub struct RoomManifest {
    pub room: RoomDimensions,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub config: TextureConfig,
    pub floor: Option<SurfaceEntry>,
    pub wall: Option<SurfaceEntry>,
}

/// Output section
#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    /// Output directory, relative to the manifest (default: "out")
    pub dir: Option<PathBuf>,
}

/// What one surface is finished with
#[derive(Debug, Deserialize)]
pub struct SurfaceEntry {
    /// Tile image, relative to the manifest
    pub tile: Option<PathBuf>,
    /// Built-in catalog id supplying the tile size when `size` is absent
    pub preset: Option<String>,
    /// Tile `[length, width]` in `unit`
    pub size: Option<(f64, f64)>,
    #[serde(default)]
    pub unit: LengthUnit,
    /// Solid paint color (walls only)
    pub color: Option<String>,
    #[serde(default)]
    pub grout: GroutStyle,
}

impl SurfaceEntry {
    /// Tile size in inches, from `size` or the preset.
    pub fn tile_size(&self, catalog: &TileCatalog) -> Result<PhysicalDimensions> {
        if let Some((length, width)) = self.size {
            return Ok(PhysicalDimensions::from_unit(length, width, self.unit)?);
        }
        match &self.preset {
            Some(id) => catalog
                .get(id)
                .map(|t| t.size)
                .with_context(|| format!("unknown tile preset {id:?}")),
            None => anyhow::bail!("tile needs either `size` or `preset`"),
        }
    }
}

impl RoomManifest {
    /// Parse a manifest from TOML text.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).context("Failed to parse roomtile manifest")
    }

    pub fn surface(&self, kind: SurfaceKind) -> Option<&SurfaceEntry> {
        match kind {
            SurfaceKind::Floor => self.floor.as_ref(),
            SurfaceKind::Wall => self.wall.as_ref(),
        }
    }

    /// Renovation the manifest amounts to, if any surface is finished.
    pub fn renovation_kind(&self) -> Option<RenovationKind> {
        let floor_tiled = self.floor.as_ref().is_some_and(|f| f.tile.is_some());
        let wall_tiled = self.wall.as_ref().is_some_and(|w| w.tile.is_some());
        let wall_painted = self.wall.as_ref().is_some_and(|w| w.color.is_some());

        match (floor_tiled, wall_tiled, wall_painted) {
            (true, true, _) => Some(RenovationKind::CompleteTiling),
            (true, false, true) => Some(RenovationKind::FloorTilingWallColoring),
            (true, false, false) => Some(RenovationKind::FloorTiling),
            (false, true, _) => Some(RenovationKind::WallTiling),
            (false, false, true) => Some(RenovationKind::WallColoring),
            (false, false, false) => None,
        }
    }
}

/// Load a manifest from disk.
pub fn load_manifest(path: &Path) -> Result<RoomManifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    RoomManifest::parse(&content)
}

/// Check the manifest without touching any images.
pub fn validate(manifest: &RoomManifest) -> Result<()> {
    manifest.config.validate()?;
    let catalog = TileCatalog::new();

    let kind = manifest
        .renovation_kind()
        .context("Manifest finishes neither the floor nor the walls")?;

    let issues = validate_room_dimensions(&manifest.room, kind);
    if let Some(first) = issues.first() {
        anyhow::bail!("Invalid room for {kind}: {first}");
    }

    if let Some(floor) = &manifest.floor {
        if floor.color.is_some() {
            anyhow::bail!("[floor] cannot be painted; use a tile");
        }
        if floor.tile.is_none() {
            anyhow::bail!("[floor] needs a `tile` image");
        }
    }
    if let Some(wall) = &manifest.wall {
        match (&wall.tile, &wall.color) {
            (Some(_), Some(_)) => anyhow::bail!("[wall] takes either `tile` or `color`, not both"),
            (None, None) => anyhow::bail!("[wall] needs a `tile` or a `color`"),
            (None, Some(color)) => {
                parse_hex_color(color)?;
            }
            (Some(_), None) => {}
        }
    }

    for kind in [SurfaceKind::Floor, SurfaceKind::Wall] {
        let Some(entry) = manifest.surface(kind).filter(|e| e.tile.is_some()) else {
            continue;
        };
        let size = entry
            .tile_size(&catalog)
            .with_context(|| format!("[{kind}] tile size"))?;
        if let Some(issue) = validate_tile_dimensions(size.length(), size.width()).first() {
            anyhow::bail!("[{kind}] {issue}");
        }
    }

    Ok(())
}

/// Result of building one surface
#[derive(Debug, Serialize, Deserialize)]
pub struct SurfaceSummary {
    pub surface: SurfaceKind,
    /// Written texture, relative to the output directory
    pub texture: Option<PathBuf>,
    /// Paint color for painted walls
    pub color: Option<String>,
    pub repeat: Option<RepeatFactors>,
    pub layout: Option<TileLayout>,
    pub quantity: Option<TileQuantity>,
    pub grout_baked: bool,
    pub placeholder: bool,
}

/// Renovation request the room translates to
#[derive(Debug, Serialize, Deserialize)]
pub struct RequestSummary {
    pub kind: RenovationKind,
    pub endpoint: String,
    pub files: Vec<String>,
    pub fields: Vec<(String, String)>,
}

/// Everything `build` produced
#[derive(Debug, Serialize, Deserialize)]
pub struct BuildSummary {
    pub surfaces: Vec<SurfaceSummary>,
    pub request: RequestSummary,
}

/// Output directory for a manifest.
pub fn output_dir(manifest: &RoomManifest, manifest_dir: &Path, override_dir: Option<&Path>) -> PathBuf {
    match (override_dir, &manifest.output.dir) {
        (Some(dir), _) => dir.to_path_buf(),
        (None, Some(dir)) => manifest_dir.join(dir),
        (None, None) => manifest_dir.join("out"),
    }
}

/// Render every tiled surface and write the summary.
pub fn build_all(
    manifest: &RoomManifest,
    manifest_dir: &Path,
    override_dir: Option<&Path>,
) -> Result<BuildSummary> {
    validate(manifest)?;
    let catalog = TileCatalog::new();
    let out_dir = output_dir(manifest, manifest_dir, override_dir);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let mut surfaces = Vec::new();
    let mut tiling: Vec<(SurfaceKind, TilingParams)> = Vec::new();

    for kind in [SurfaceKind::Floor, SurfaceKind::Wall] {
        let Some(entry) = manifest.surface(kind) else {
            continue;
        };

        let Some(tile_path) = &entry.tile else {
            surfaces.push(SurfaceSummary {
                surface: kind,
                texture: None,
                color: entry.color.clone(),
                repeat: None,
                layout: None,
                quantity: None,
                grout_baked: false,
                placeholder: false,
            });
            continue;
        };

        let tile = entry.tile_size(&catalog)?;
        let surface = manifest.room.surface(kind)?;
        let source_path = manifest_dir.join(tile_path);
        tracing::info!("Compositing {} tile {:?}", kind, source_path);

        let source = load_tile(&source_path)?;
        let texture =
            compute_surface_texture(&source, tile, surface, &entry.grout, kind, &manifest.config);

        let file_name = PathBuf::from(format!("{kind}.png"));
        texture.raster.save_png(&out_dir.join(&file_name))?;

        let layout = tile_layout(surface, tile);
        tiling.push((
            kind,
            TilingParams::from_layout(&layout, DEFAULT_REQUEST_GROUT_WIDTH, entry.grout.color),
        ));

        surfaces.push(SurfaceSummary {
            surface: kind,
            texture: Some(file_name),
            color: None,
            repeat: Some(texture.repeat),
            layout: Some(layout),
            quantity: Some(tile_quantity(surface, tile, DEFAULT_WASTE_FACTOR)),
            grout_baked: texture.grout_baked,
            placeholder: texture.is_placeholder(),
        });
    }

    let request = request_params(manifest, &tiling)?;
    let summary = BuildSummary {
        surfaces,
        request: RequestSummary {
            kind: request.kind(),
            endpoint: request.kind().endpoint(),
            files: request.kind().file_fields().iter().map(|f| f.to_string()).collect(),
            fields: request.form_fields(),
        },
    };

    let summary_path = out_dir.join(SUMMARY_FILE);
    let json = serde_json::to_string_pretty(&summary)?;
    std::fs::write(&summary_path, json)
        .with_context(|| format!("Failed to write {}", summary_path.display()))?;

    Ok(summary)
}

fn request_params(
    manifest: &RoomManifest,
    tiling: &[(SurfaceKind, TilingParams)],
) -> Result<RenovationParams> {
    let params_for = |kind: SurfaceKind| {
        tiling
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, p)| *p)
            .with_context(|| format!("{kind} has no tile"))
    };
    let wall_color = || -> Result<_> {
        let color = manifest
            .wall
            .as_ref()
            .and_then(|w| w.color.as_deref())
            .context("wall has no color")?;
        Ok(parse_hex_color(color)?)
    };

    let kind = manifest
        .renovation_kind()
        .context("Manifest finishes neither the floor nor the walls")?;
    Ok(match kind {
        RenovationKind::FloorTiling => RenovationParams::FloorTiling(params_for(SurfaceKind::Floor)?),
        RenovationKind::WallTiling => RenovationParams::WallTiling(params_for(SurfaceKind::Wall)?),
        RenovationKind::CompleteTiling => RenovationParams::CompleteTiling {
            floor: params_for(SurfaceKind::Floor)?,
            wall: params_for(SurfaceKind::Wall)?,
        },
        RenovationKind::WallColoring => RenovationParams::WallColoring {
            wall_color: wall_color()?,
        },
        RenovationKind::FloorTilingWallColoring => RenovationParams::FloorTilingWallColoring {
            floor: params_for(SurfaceKind::Floor)?,
            wall_color: wall_color()?,
        },
    })
}

/// Short human-readable description of a surface summary.
pub fn describe(summary: &SurfaceSummary) -> String {
    match (&summary.repeat, &summary.layout, &summary.color) {
        (Some(repeat), Some(layout), _) => format!(
            "{}: repeat {:.3} x {:.3}, {} x {} tiles{}",
            summary.surface,
            repeat.x,
            repeat.y,
            layout.tiles_x,
            layout.tiles_y,
            if summary.placeholder { " (placeholder)" } else { "" }
        ),
        (_, _, Some(color)) => match parse_hex_color(color) {
            Ok(c) => format!("{}: painted {}", summary.surface, format_hex_color(c)),
            Err(_) => format!("{}: painted {}", summary.surface, color),
        },
        _ => format!("{}: unfinished", summary.surface),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r##"
[room]
length = 12.0
width = 10.0

[floor]
tile = "floor.png"
size = [12, 12]

[wall]
color = "#f8f8ff"
"##;

    #[test]
    fn test_manifest_parsing() {
        let manifest = RoomManifest::parse(FULL).unwrap();
        assert_eq!(manifest.room.length, 12.0);
        assert_eq!(manifest.room.height, None);
        assert_eq!(manifest.floor.as_ref().unwrap().unit, LengthUnit::Inches);
        assert!(manifest.floor.as_ref().unwrap().grout.visible);
        assert_eq!(manifest.config, TextureConfig::default());
        assert_eq!(manifest.renovation_kind(), Some(RenovationKind::FloorTilingWallColoring));
        validate(&manifest).unwrap();
    }

    #[test]
    fn test_manifest_with_config() {
        let manifest = RoomManifest::parse(&format!(
            "{FULL}\n[config.canvas]\nresolution = 128\n\n[config.repeat]\nthreshold = 0.4\n"
        ))
        .unwrap();
        assert_eq!(manifest.config.canvas.resolution, 128);
        assert_eq!(manifest.config.repeat.threshold, 0.4);
    }

    #[test]
    fn test_preset_size_and_units() {
        let catalog = TileCatalog::new();
        let manifest = RoomManifest::parse(
            r#"
[room]
length = 10.0
width = 10.0

[floor]
tile = "a.png"
preset = "9"

[wall]
tile = "b.png"
size = [30.48, 30.48]
unit = "centimeters"
"#,
        )
        .unwrap();
        let floor = manifest.floor.as_ref().unwrap().tile_size(&catalog).unwrap();
        assert_eq!((floor.length(), floor.width()), (16.0, 32.0));
        let wall = manifest.wall.as_ref().unwrap().tile_size(&catalog).unwrap();
        assert!((wall.length() - 12.0).abs() < 1e-9);
        assert_eq!(manifest.renovation_kind(), Some(RenovationKind::CompleteTiling));
    }

    #[test]
    fn test_validate_rejects_painted_and_tiled_wall() {
        let manifest = RoomManifest::parse(
            r##"
[room]
length = 12.0
width = 10.0

[wall]
tile = "w.png"
size = [12, 12]
color = "#ffffff"
"##,
        )
        .unwrap();
        assert!(validate(&manifest).is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_tile() {
        let manifest = RoomManifest::parse(
            r#"
[room]
length = 12.0
width = 10.0

[floor]
tile = "f.png"
size = [60, 12]
"#,
        )
        .unwrap();
        let err = validate(&manifest).unwrap_err();
        assert!(err.to_string().contains("Tile length"));
    }

    #[test]
    fn test_validate_rejects_empty_room() {
        let manifest = RoomManifest::parse("[room]\nlength = 12.0\nwidth = 10.0\n").unwrap();
        assert!(manifest.renovation_kind().is_none());
        assert!(validate(&manifest).is_err());
    }

    #[test]
    fn test_output_dir_resolution() {
        let manifest = RoomManifest::parse(FULL).unwrap();
        let base = Path::new("/rooms/kitchen");
        assert_eq!(output_dir(&manifest, base, None), base.join("out"));
        assert_eq!(
            output_dir(&manifest, base, Some(Path::new("/tmp/x"))),
            PathBuf::from("/tmp/x")
        );
    }
}
