// THEORY:
// Swatches are described, not drawn. `render_swatches` turns the palettes plus the
// current selection into plain view-models; whatever actually paints them (a
// terminal listing, a web page, a GUI) is somebody else's concern. Each view carries
// enough to draw a swatch and to route a click back as a `SessionEvent`.

use crate::core_modules::active_set::ActiveKeySet;
use crate::core_modules::color_spec::color_spec::parse;
use crate::core_modules::custom_colors::CustomColorList;
use crate::core_modules::palette::{PaletteEntry, PaletteKind, palette};
use crate::core_modules::pixel::pixel::RgbKey;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwatchView {
    pub key: RgbKey,
    /// Lowercase `#rrggbb`.
    pub hex: String,
    /// Tooltip text: optional "name #id" line, then hex and RGB lines.
    pub label: String,
    pub active: bool,
    /// Only custom swatches can be removed.
    pub removable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwatchGroup {
    pub kind: PaletteKind,
    pub title: &'static str,
    pub swatches: Vec<SwatchView>,
}

pub fn render_swatches(active: &ActiveKeySet, custom: &CustomColorList) -> Vec<SwatchGroup> {
    let preset = |kind: PaletteKind, title: &'static str| SwatchGroup {
        kind,
        title,
        swatches: palette(kind)
            .iter()
            .filter_map(|entry| preset_view(entry, active))
            .collect(),
    };

    vec![
        preset(PaletteKind::Free, "Free"),
        preset(PaletteKind::Premium, "Premium"),
        SwatchGroup {
            kind: PaletteKind::Custom,
            title: "Custom",
            swatches: custom.iter().filter_map(|hex| custom_view(hex, active)).collect(),
        },
    ]
}

fn preset_view(entry: &PaletteEntry, active: &ActiveKeySet) -> Option<SwatchView> {
    let key = entry.rgb_key()?;
    Some(SwatchView {
        key,
        hex: key.to_hex(),
        label: label(Some(entry), key),
        active: active.contains(&key),
        removable: false,
    })
}

fn custom_view(hex: &str, active: &ActiveKeySet) -> Option<SwatchView> {
    let key = parse(hex).ok()?.rgb_key();
    Some(SwatchView {
        key,
        hex: key.to_hex(),
        label: label(None, key),
        active: active.contains(&key),
        removable: true,
    })
}

fn label(entry: Option<&PaletteEntry>, key: RgbKey) -> String {
    let mut lines = Vec::with_capacity(3);
    if let Some(entry) = entry {
        lines.push(format!("{} #{}", entry.name, entry.id));
    }
    lines.push(format!("Hex: {}", key.to_hex().to_uppercase()));
    lines.push(format!("RGB: ({}, {}, {})", key.red, key.green, key.blue));
    lines.join("\n")
}
