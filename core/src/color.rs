//! Hex color parsing and the built-in wall color palette.

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TextureError};

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Result<Rgba<u8>> {
    let invalid = || TextureError::InvalidColor(s.to_string());
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    let nibble = |i: usize| {
        u8::from_str_radix(&hex[i..i + 1], 16)
            .map(|v| v * 17)
            .map_err(|_| invalid())
    };

    match hex.len() {
        3 => Ok(Rgba([nibble(0)?, nibble(1)?, nibble(2)?, 255])),
        6 => Ok(Rgba([byte(0)?, byte(2)?, byte(4)?, 255])),
        8 => Ok(Rgba([byte(0)?, byte(2)?, byte(4)?, byte(6)?])),
        _ => Err(invalid()),
    }
}

/// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
pub fn format_hex_color(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    if a == 255 {
        format!("#{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

/// Serde adapter storing an `Rgba<u8>` as a hex string.
pub mod hex {
    use image::Rgba;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Rgba<u8>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hex_color(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgba<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_hex_color(&s).map_err(serde::de::Error::custom)
    }
}

/// A solid wall paint color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallColor {
    pub id: String,
    pub name: String,
    #[serde(with = "hex")]
    pub color: Rgba<u8>,
    #[serde(default)]
    pub custom: bool,
}

impl WallColor {
    pub fn hex(&self) -> String {
        format_hex_color(self.color)
    }
}

/// Id of the palette entry walls start with.
pub const DEFAULT_WALL_COLOR_ID: &str = "offwhite";

const PALETTE: &[(&str, &str, [u8; 3])] = &[
    ("offwhite", "Off White", [0xf8, 0xf8, 0xff]),
    ("white", "Pure White", [0xff, 0xff, 0xff]),
    ("beige", "Beige", [0xf5, 0xf5, 0xdc]),
    ("lightgray", "Light Gray", [0xd3, 0xd3, 0xd3]),
    ("warmgray", "Warm Gray", [0x8b, 0x86, 0x80]),
    ("cream", "Cream", [0xff, 0xfd, 0xd0]),
    ("lightblue", "Light Blue", [0xad, 0xd8, 0xe6]),
    ("lightgreen", "Light Green", [0x90, 0xee, 0x90]),
    ("lavender", "Lavender", [0xe6, 0xe6, 0xfa]),
    ("peach", "Peach", [0xff, 0xcb, 0xa4]),
];

/// The built-in wall color palette, in display order.
pub fn wall_palette() -> Vec<WallColor> {
    PALETTE
        .iter()
        .map(|&(id, name, [r, g, b])| WallColor {
            id: id.to_string(),
            name: name.to_string(),
            color: Rgba([r, g, b, 255]),
            custom: false,
        })
        .collect()
}

/// The color walls use when nothing else is selected.
pub fn default_wall_color() -> WallColor {
    wall_palette()
        .into_iter()
        .find(|c| c.id == DEFAULT_WALL_COLOR_ID)
        .unwrap_or_else(|| WallColor {
            id: DEFAULT_WALL_COLOR_ID.to_string(),
            name: "Off White".to_string(),
            color: Rgba([0xf8, 0xf8, 0xff, 255]),
            custom: false,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(parse_hex_color("#dbdbdb").unwrap(), Rgba([0xdb, 0xdb, 0xdb, 255]));
        assert_eq!(parse_hex_color("fff").unwrap(), Rgba([255, 255, 255, 255]));
        assert_eq!(parse_hex_color("#10203040").unwrap(), Rgba([0x10, 0x20, 0x30, 0x40]));
        assert_eq!(parse_hex_color("  #ABC ").unwrap(), Rgba([0xaa, 0xbb, 0xcc, 255]));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_hex_color("").is_err());
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#gggggg").is_err());
        assert!(parse_hex_color("#ééé").is_err());
        assert!(parse_hex_color("#+f+f+f").is_err());
        assert!(parse_hex_color("+ff").is_err());
        assert!(parse_hex_color("#-1ffff").is_err());
    }

    #[test]
    fn test_format_hex() {
        assert_eq!(format_hex_color(Rgba([0xdb, 0xdb, 0xdb, 255])), "#dbdbdb");
        assert_eq!(format_hex_color(Rgba([1, 2, 3, 4])), "#01020304");
    }

    #[test]
    fn test_palette() {
        let palette = wall_palette();
        assert_eq!(palette.len(), 10);
        assert_eq!(default_wall_color().hex(), "#f8f8ff");
        assert!(palette.iter().all(|c| !c.custom));
    }
}
