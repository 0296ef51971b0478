// THEORY:
// Custom colors are the user's own additions beyond the built-in palettes. The list
// is ordered (swatches render in insertion order) and holds canonical lowercase
// `#rrggbb` strings, so "0,0,0", "000", and "#000000" all land on one entry.

use crate::core_modules::color_spec::color_spec::{ParsedColor, parse};
use crate::core_modules::pixel::pixel::RgbKey;
use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free list of custom hex colors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomColorList {
    hexes: Vec<String>,
}

impl CustomColorList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from stored hex strings, canonicalizing each entry and dropping
    /// duplicates and entries that no longer parse.
    pub fn from_stored(hexes: impl IntoIterator<Item = String>) -> Self {
        let mut list = Self::new();
        for hex in hexes {
            match parse(&hex) {
                Ok(color) => {
                    list.add(&color);
                }
                Err(err) => tracing::warn!(%hex, %err, "dropping unreadable custom color"),
            }
        }
        list
    }

    /// Appends the color unless its hex is already listed. Returns `true` if appended.
    pub fn add(&mut self, color: &ParsedColor) -> bool {
        if self.contains(&color.hex) {
            return false;
        }
        self.hexes.push(color.hex.clone());
        true
    }

    /// Removes the entry matching `hex` in any accepted notation.
    /// Returns the removed color's RGB key.
    pub fn remove(&mut self, hex: &str) -> Option<RgbKey> {
        let canonical = canonical_hex(hex);
        let position = self.hexes.iter().position(|entry| *entry == canonical)?;
        let removed = self.hexes.remove(position);
        parse(&removed).ok().map(|color| color.rgb_key())
    }

    pub fn contains(&self, hex: &str) -> bool {
        let canonical = canonical_hex(hex);
        self.hexes.iter().any(|entry| *entry == canonical)
    }

    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.hexes.iter().map(String::as_str)
    }
}

fn canonical_hex(hex: &str) -> String {
    parse(hex)
        .map(|color| color.hex)
        .unwrap_or_else(|_| hex.trim().to_ascii_lowercase())
}
