//! roomtile-export - tile texture baking tool
//!
//! Bakes grouted, aspect-corrected wall and floor textures from a room
//! manifest, and exposes the crop, composite and tiling math one image or
//! one surface at a time.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use roomtile_core::layout::{
    format_aspect_ratio, recommended_tile_sizes, validate_tile_dimensions, DEFAULT_WASTE_FACTOR,
};
use roomtile_core::{
    format_hex_color, parse_hex_color, repeat_factors_only, tile_layout, tile_quantity,
    wall_palette, GroutStyle, LengthUnit, PhysicalDimensions, RoomDimensions, SurfaceKind,
    TextureConfig, TileCatalog,
};
use roomtile_export::{manifest, texture};

#[derive(Parser)]
#[command(name = "roomtile-export")]
#[command(about = "roomtile texture baking tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build surface textures from a room manifest
    Build {
        /// Path to roomtile.toml manifest
        #[arg(default_value = "roomtile.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate manifest without building
    Check {
        /// Path to roomtile.toml manifest
        #[arg(default_value = "roomtile.toml")]
        manifest: PathBuf,
    },

    /// Center-crop a tile photo to its physical aspect ratio
    Crop {
        /// Input PNG/JPG/WebP file
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        tile: TileArgs,

        /// Texture engine config (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Composite a tile photo into a grouted tile unit
    Composite {
        /// Input PNG/JPG/WebP file
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        tile: TileArgs,

        /// Grout color (#rgb or #rrggbb)
        #[arg(long)]
        grout_color: Option<String>,

        /// Leave out the grout border
        #[arg(long)]
        no_grout: bool,

        /// Texture engine config (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the live-preview repeat factors for a surface
    Repeat {
        #[command(flatten)]
        room: RoomArgs,

        #[command(flatten)]
        tile: TileArgs,

        /// Texture engine config (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print whole-tile counts and quantities for a surface
    Tiles {
        #[command(flatten)]
        room: RoomArgs,

        #[command(flatten)]
        tile: TileArgs,

        /// Extra fraction ordered for cuts and breakage
        #[arg(long, default_value_t = DEFAULT_WASTE_FACTOR)]
        waste: f64,
    },

    /// List built-in tiles and wall colors
    Catalog {
        /// Only tiles applicable to this surface
        #[arg(long, value_enum)]
        surface: Option<Surface>,

        /// List the wall paint palette instead
        #[arg(long)]
        colors: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Surface {
    Floor,
    Wall,
}

impl From<Surface> for SurfaceKind {
    fn from(surface: Surface) -> Self {
        match surface {
            Surface::Floor => SurfaceKind::Floor,
            Surface::Wall => SurfaceKind::Wall,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Unit {
    Inches,
    Feet,
    Centimeters,
}

impl From<Unit> for LengthUnit {
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::Inches => LengthUnit::Inches,
            Unit::Feet => LengthUnit::Feet,
            Unit::Centimeters => LengthUnit::Centimeters,
        }
    }
}

#[derive(Args)]
struct TileArgs {
    /// Tile length
    #[arg(long)]
    tile_length: f64,

    /// Tile width
    #[arg(long)]
    tile_width: f64,

    /// Unit of the tile measurements
    #[arg(long, value_enum, default_value_t = Unit::Inches)]
    unit: Unit,
}

impl TileArgs {
    fn dimensions(&self) -> Result<PhysicalDimensions> {
        Ok(PhysicalDimensions::from_unit(
            self.tile_length,
            self.tile_width,
            self.unit.into(),
        )?)
    }
}

#[derive(Args)]
struct RoomArgs {
    /// Room length in feet
    #[arg(long)]
    length: f64,

    /// Room width in feet
    #[arg(long)]
    width: f64,

    /// Wall height in feet (default: 9)
    #[arg(long)]
    height: Option<f64>,

    /// Surface to compute for
    #[arg(long, value_enum, default_value_t = Surface::Floor)]
    surface: Surface,
}

impl RoomArgs {
    fn room(&self) -> RoomDimensions {
        RoomDimensions::new(self.length, self.width, self.height)
    }

    fn kind(&self) -> SurfaceKind {
        self.surface.into()
    }

    fn dimensions(&self) -> Result<PhysicalDimensions> {
        Ok(self.room().surface(self.kind())?)
    }
}

fn load_config(path: Option<&Path>) -> Result<TextureConfig> {
    let config = match path {
        Some(path) => TextureConfig::load(path)?,
        None => TextureConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            manifest,
            output,
            verbose,
        } => {
            if verbose {
                tracing::info!("Building room from {:?}", manifest);
            }

            let room = manifest::load_manifest(&manifest)?;
            let base = manifest.parent().unwrap_or_else(|| Path::new("."));
            let summary = manifest::build_all(&room, base, output.as_deref())?;

            for surface in &summary.surfaces {
                tracing::info!("{}", manifest::describe(surface));
            }
            tracing::info!("Build complete! ({})", summary.request.endpoint);
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let room = manifest::load_manifest(&manifest)?;
            manifest::validate(&room)?;
            tracing::info!("Manifest is valid!");
        }

        Commands::Crop {
            input,
            output,
            tile,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let output = output.unwrap_or_else(|| input.with_extension("cropped.png"));
            tracing::info!("Cropping {:?} -> {:?}", input, output);
            let (width, height) = texture::crop_image(&input, &output, tile.dimensions()?, &config)?;
            tracing::info!("Done! ({}x{})", width, height);
        }

        Commands::Composite {
            input,
            output,
            tile,
            grout_color,
            no_grout,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let mut grout = GroutStyle::default();
            if let Some(color) = grout_color {
                grout.color = parse_hex_color(&color)?;
            }
            grout.visible = !no_grout;

            let output = output.unwrap_or_else(|| input.with_extension("tile.png"));
            tracing::info!("Compositing {:?} -> {:?}", input, output);
            let blank =
                texture::composite_image(&input, &output, tile.dimensions()?, &grout, &config)?;
            if blank {
                tracing::warn!("Canvas unavailable, wrote a blank placeholder");
            }
            tracing::info!("Done!");
        }

        Commands::Repeat { room, tile, config } => {
            let config = load_config(config.as_deref())?;
            let repeat =
                repeat_factors_only(tile.dimensions()?, room.dimensions()?, room.kind(), &config);
            println!("{} repeat: {:.4} x {:.4}", room.kind(), repeat.x, repeat.y);
        }

        Commands::Tiles { room, tile, waste } => {
            let surface = room.dimensions()?;
            let tile = tile.dimensions()?;
            if let Some(issue) = validate_tile_dimensions(tile.length(), tile.width()).first() {
                anyhow::bail!("{issue}");
            }
            let layout = tile_layout(surface, tile);
            let quantity = tile_quantity(surface, tile, waste);

            println!("{} {}", room.kind(), surface);
            println!(
                "  tiles: {} x {} ({:.1}% of covered area used)",
                layout.tiles_x, layout.tiles_y, layout.coverage
            );
            println!(
                "  needed: {} ({} with {:.0}% waste)",
                quantity.tiles_needed,
                quantity.tiles_with_waste,
                waste * 100.0
            );

            println!("Recommended sizes:");
            for size in recommended_tile_sizes(&room.room()) {
                println!("  {} ({})", size, format_aspect_ratio(size.aspect_ratio()));
            }
        }

        Commands::Catalog { surface, colors } => {
            if colors {
                for color in wall_palette() {
                    println!("{:<12} {:<16} {}", color.id, color.name, color.hex());
                }
            } else {
                let catalog = TileCatalog::new();
                let tiles: Vec<_> = match surface {
                    Some(surface) => catalog.available_for(surface.into()).collect(),
                    None => catalog.all().collect(),
                };
                for tile in tiles {
                    println!(
                        "{:<4} {:<20} {:<12} {}{}",
                        tile.id,
                        tile.name,
                        tile.size,
                        tile.target.as_str(),
                        if tile.glossy { ", glossy" } else { "" }
                    );
                }
            }
            println!("default grout: {}", format_hex_color(roomtile_core::DEFAULT_GROUT_COLOR));
        }
    }

    Ok(())
}
