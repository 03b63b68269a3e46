//! roomtile-export library
//!
//! Manifest builds and single-image conversions, shared by the
//! `roomtile-export` binary and its tests.

pub mod manifest;
pub mod texture;

pub use manifest::{build_all, load_manifest, validate, BuildSummary, RoomManifest};
