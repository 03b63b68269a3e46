//! roomtile core - tile texture engine
//!
//! Turns a tile photo plus real-world tile and surface sizes into a texture a
//! 3D wall or floor can repeat without distortion.
//!
//! # Architecture
//!
//! - [`crop`] - aspect-fit center cropping of tile images
//! - [`grout`] - compositing a tile unit with an optional grout border
//! - [`repeat`] - continuous repeat factors for the live preview
//! - [`layout`] - whole-tile counts and quantities for renovation requests
//! - [`pipeline`] - [`compute_surface_texture`] and [`repeat_factors_only`]
//! - [`catalog`], [`finish`], [`slot`] - tile catalog, per-room selection and
//!   stale-decode handling
//!
//! # Example
//! ```no_run
//! use roomtile_core::*;
//!
//! let source = load_tile("tiles/marble.png".as_ref())?;
//! let tile = PhysicalDimensions::new(12.0, 24.0)?; // inches
//! let floor = RoomDimensions::new(12.0, 10.0, None).surface(SurfaceKind::Floor)?; // feet
//!
//! let texture = compute_surface_texture(
//!     &source,
//!     tile,
//!     floor,
//!     &GroutStyle::default(),
//!     SurfaceKind::Floor,
//!     &TextureConfig::default(),
//! );
//! texture.raster.save_png("floor.png".as_ref())?;
//! println!("repeat {} x {}", texture.repeat.x, texture.repeat.y);
//! # Ok::<(), TextureError>(())
//! ```

pub mod catalog;
pub mod color;
pub mod config;
pub mod crop;
pub mod dimensions;
pub mod error;
pub mod finish;
pub mod grout;
pub mod layout;
pub mod pipeline;
pub mod raster;
pub mod renovation;
pub mod repeat;
pub mod slot;

pub use catalog::{builtin_tiles, ApplicationTarget, TileCatalog, TileSpec};
pub use color::{format_hex_color, parse_hex_color, wall_palette, WallColor};
pub use config::{CanvasConfig, RepeatConfig, ResampleFilter, SurfaceCalibration, TextureConfig};
pub use crop::{crop_region, AspectFitCropper, CropRegion};
pub use dimensions::{LengthUnit, PhysicalDimensions, RoomDimensions, SurfaceKind};
pub use error::{Result, TextureError};
pub use finish::{RoomFinish, WallFinish};
pub use grout::{GroutCompositor, GroutStyle, DEFAULT_GROUT_COLOR};
pub use layout::{tile_layout, tile_quantity, TileLayout, TileQuantity};
pub use pipeline::{
    compute_surface_texture, compute_surface_texture_with, decode_tile, load_tile,
    repeat_factors_only, RenderableTexture, WrapMode,
};
pub use raster::{CanvasProvider, HeapCanvas, Raster};
pub use renovation::{RenovationKind, RenovationParams, TilingParams};
pub use repeat::{repeat_factors, RepeatFactors};
pub use slot::{DecodeTicket, SlotUpdate, TextureSlot};
