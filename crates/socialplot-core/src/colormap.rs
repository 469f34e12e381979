//! Colors and categorical palettes
//!
//! Charts only need flat fills and strokes, so colors are 8-bit RGB and
//! serialize to the `#rrggbb` form SVG expects.

use serde::{Deserialize, Serialize};

/// A color in 8-bit RGB
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Box fill of the boxplot
    pub const LIGHT_GRAY: Color = Color::rgb(0xe0, 0xe0, 0xe0);
    pub const STEEL_BLUE: Color = Color::rgb(0x46, 0x82, 0xb4);

    /// Create a color from RGB components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from hex string (e.g., "#FF5733" or "ff5733")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::rgb(r, g, b))
    }

    /// Convert to lowercase hex string
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid hex color: {:?}", value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// The palette used for post types in the grouped bar plot
pub fn post_type_palette() -> Vec<Color> {
    category10().into_iter().take(3).collect()
}

/// The ten-color categorical palette (Tableau 10 / d3 category10)
pub fn category10() -> Vec<Color> {
    [
        "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
        "#bcbd22", "#17becf",
    ]
    .iter()
    .filter_map(|hex| Color::from_hex(hex))
    .collect()
}
