//! Error types for texture computation.

use std::path::PathBuf;

/// Errors produced by the texture engine.
///
/// Canvas exhaustion is not an error here; the compositor falls back to a
/// blank placeholder.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// Source image bytes could not be decoded.
    #[error("could not load texture: {0}")]
    Decode(#[source] image::ImageError),

    /// Composited texture could not be encoded or written.
    #[error("could not write texture: {0}")]
    Encode(#[source] image::ImageError),

    /// Reading a source file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A physical dimension was zero, negative or not finite.
    #[error("invalid dimensions {length} x {width} (both must be positive and finite)")]
    InvalidDimensions { length: f64, width: f64 },

    /// A color string was not a recognised hex color.
    #[error("invalid color {0:?} (expected #rgb, #rrggbb or #rrggbbaa)")]
    InvalidColor(String),

    /// Texture configuration failed to parse or validate.
    #[error("invalid texture config: {0}")]
    InvalidConfig(String),

    /// Tile catalog operation was refused.
    #[error("tile catalog: {0}")]
    Catalog(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TextureError>;
