// THEORY:
// Built-in palettes are static configuration: two fixed tables of preset colors
// shown as swatches before the user adds any colors of their own. The free palette
// doubles as the first-run default selection. Neither table changes at runtime.
//
// Every entry carries a display name and a stable numeric id. Ids are unique
// across both tables so a swatch can be referred to without its hex.

use crate::core_modules::color_spec::color_spec::parse;
use crate::core_modules::pixel::pixel::RgbKey;

/// Which swatch group a color belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteKind {
    Free,
    Premium,
    Custom,
}

/// A single preset color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub hex: &'static str,
    pub name: &'static str,
    pub id: u16,
}

impl PaletteEntry {
    /// The entry's RGB identity. `None` only if the table holds a malformed hex.
    pub fn rgb_key(&self) -> Option<RgbKey> {
        parse(self.hex).ok().map(|color| color.rgb_key())
    }
}

pub const FREE_PALETTE: &[PaletteEntry] = &[
    PaletteEntry { hex: "#000000", name: "Black", id: 1 },
    PaletteEntry { hex: "#3c3c3c", name: "Dark Gray", id: 2 },
    PaletteEntry { hex: "#787878", name: "Gray", id: 3 },
    PaletteEntry { hex: "#d2d2d2", name: "Light Gray", id: 4 },
    PaletteEntry { hex: "#ffffff", name: "White", id: 5 },
    PaletteEntry { hex: "#600018", name: "Deep Red", id: 6 },
    PaletteEntry { hex: "#ed1c24", name: "Red", id: 7 },
    PaletteEntry { hex: "#ff7f27", name: "Orange", id: 8 },
    PaletteEntry { hex: "#f6aa09", name: "Gold", id: 9 },
    PaletteEntry { hex: "#f9dd3b", name: "Yellow", id: 10 },
    PaletteEntry { hex: "#fffabc", name: "Light Yellow", id: 11 },
    PaletteEntry { hex: "#0eb968", name: "Dark Green", id: 12 },
    PaletteEntry { hex: "#13e67b", name: "Green", id: 13 },
    PaletteEntry { hex: "#87ff5e", name: "Light Green", id: 14 },
    PaletteEntry { hex: "#0c816e", name: "Dark Teal", id: 15 },
    PaletteEntry { hex: "#10aea6", name: "Teal", id: 16 },
    PaletteEntry { hex: "#13e1be", name: "Light Teal", id: 17 },
    PaletteEntry { hex: "#28509e", name: "Dark Blue", id: 18 },
    PaletteEntry { hex: "#4093e4", name: "Blue", id: 19 },
    PaletteEntry { hex: "#60f7f2", name: "Cyan", id: 20 },
    PaletteEntry { hex: "#6b50f6", name: "Indigo", id: 21 },
    PaletteEntry { hex: "#99b1fb", name: "Light Indigo", id: 22 },
    PaletteEntry { hex: "#780c99", name: "Dark Purple", id: 23 },
    PaletteEntry { hex: "#aa38b9", name: "Purple", id: 24 },
    PaletteEntry { hex: "#e09ff9", name: "Light Purple", id: 25 },
    PaletteEntry { hex: "#cb007a", name: "Dark Pink", id: 26 },
    PaletteEntry { hex: "#ec1f80", name: "Pink", id: 27 },
    PaletteEntry { hex: "#f38da9", name: "Light Pink", id: 28 },
    PaletteEntry { hex: "#684634", name: "Dark Brown", id: 29 },
    PaletteEntry { hex: "#95682a", name: "Brown", id: 30 },
    PaletteEntry { hex: "#f8b277", name: "Beige", id: 31 },
];

pub const PREMIUM_PALETTE: &[PaletteEntry] = &[
    PaletteEntry { hex: "#aaaaaa", name: "Medium Gray", id: 32 },
    PaletteEntry { hex: "#a50e1e", name: "Dark Red", id: 33 },
    PaletteEntry { hex: "#fa8072", name: "Light Red", id: 34 },
    PaletteEntry { hex: "#e45c1a", name: "Dark Orange", id: 35 },
    PaletteEntry { hex: "#d6b594", name: "Light Tan", id: 36 },
    PaletteEntry { hex: "#9c8431", name: "Dark Goldenrod", id: 37 },
    PaletteEntry { hex: "#c5ad31", name: "Goldenrod", id: 38 },
    PaletteEntry { hex: "#e8d45f", name: "Light Goldenrod", id: 39 },
    PaletteEntry { hex: "#4a6b3a", name: "Dark Olive", id: 40 },
    PaletteEntry { hex: "#5a944a", name: "Olive", id: 41 },
    PaletteEntry { hex: "#84c573", name: "Light Olive", id: 42 },
    PaletteEntry { hex: "#bbfaf2", name: "Light Cyan", id: 43 },
    PaletteEntry { hex: "#7dc7ff", name: "Light Blue", id: 44 },
    PaletteEntry { hex: "#4d31b8", name: "Dark Indigo", id: 45 },
    PaletteEntry { hex: "#4a4284", name: "Dark Slate Blue", id: 46 },
    PaletteEntry { hex: "#7a71c4", name: "Slate Blue", id: 47 },
    PaletteEntry { hex: "#b5aef1", name: "Light Slate Blue", id: 48 },
    PaletteEntry { hex: "#9b5249", name: "Dark Peach", id: 49 },
    PaletteEntry { hex: "#d18078", name: "Peach", id: 50 },
    PaletteEntry { hex: "#fab6a4", name: "Light Peach", id: 51 },
    PaletteEntry { hex: "#dba463", name: "Light Brown", id: 52 },
    PaletteEntry { hex: "#7b6352", name: "Dark Tan", id: 53 },
    PaletteEntry { hex: "#9c846b", name: "Tan", id: 54 },
    PaletteEntry { hex: "#6d643f", name: "Dark Stone", id: 55 },
    PaletteEntry { hex: "#948c6b", name: "Stone", id: 56 },
    PaletteEntry { hex: "#cdc59e", name: "Light Stone", id: 57 },
    PaletteEntry { hex: "#333941", name: "Dark Slate", id: 58 },
    PaletteEntry { hex: "#6d758d", name: "Slate", id: 59 },
    PaletteEntry { hex: "#b3b9d1", name: "Light Slate", id: 60 },
];

pub fn palette(kind: PaletteKind) -> &'static [PaletteEntry] {
    match kind {
        PaletteKind::Free => FREE_PALETTE,
        PaletteKind::Premium => PREMIUM_PALETTE,
        PaletteKind::Custom => &[],
    }
}

/// RGB keys of every free palette color, used to seed a first-run selection.
pub fn free_palette_keys() -> impl Iterator<Item = RgbKey> {
    FREE_PALETTE.iter().filter_map(PaletteEntry::rgb_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_entry_parses() {
        for entry in FREE_PALETTE.iter().chain(PREMIUM_PALETTE) {
            assert!(entry.rgb_key().is_some(), "bad palette hex {}", entry.hex);
        }
    }

    #[test]
    fn ids_and_colors_are_unique() {
        let all: Vec<_> = FREE_PALETTE.iter().chain(PREMIUM_PALETTE).collect();
        let ids: HashSet<u16> = all.iter().map(|e| e.id).collect();
        let keys: HashSet<RgbKey> = all.iter().filter_map(|e| e.rgb_key()).collect();
        assert_eq!(ids.len(), all.len());
        assert_eq!(keys.len(), all.len());
    }

    #[test]
    fn free_keys_cover_free_palette_only() {
        let keys: HashSet<RgbKey> = free_palette_keys().collect();
        assert_eq!(keys.len(), FREE_PALETTE.len());
        assert!(keys.contains(&RgbKey::new(0, 0, 0)));
        assert!(!keys.contains(&RgbKey::new(0xaa, 0xaa, 0xaa)));
        assert!(palette(PaletteKind::Custom).is_empty());
    }
}
