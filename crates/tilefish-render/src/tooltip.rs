use serde::Serialize;
use serde_json::Number;

use crate::model::TileDescriptor;

/// Pointer offsets, in page pixels, used to anchor the tooltip.
pub const TOOLTIP_OFFSET_X: f64 = 10.0;
pub const TOOLTIP_OFFSET_Y: f64 = -28.0;
/// Near-opaque; the tooltip fades from 0 to this while a tile is hovered.
pub const TOOLTIP_VISIBLE_OPACITY: f64 = 0.9;

/// Floating tooltip state for one hovered tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipLayout {
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
    pub name: String,
    pub category: String,
    /// Display value with thousands grouping.
    pub value_text: String,
    /// Raw source value, mirrored into the `data-value` test hook.
    pub value: Number,
}

impl TooltipLayout {
    /// `Name: …` / `Category: …` / `Value: …`, in display order.
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Name: {}", self.name),
            format!("Category: {}", self.category),
            format!("Value: {}", self.value_text),
        ]
    }
}

/// Tooltip for `tile`, anchored near the pointer.
pub fn for_tile(tile: &TileDescriptor, pointer_x: f64, pointer_y: f64) -> TooltipLayout {
    TooltipLayout {
        x: pointer_x + TOOLTIP_OFFSET_X,
        y: pointer_y + TOOLTIP_OFFSET_Y,
        opacity: TOOLTIP_VISIBLE_OPACITY,
        name: tile.name.clone(),
        category: tile.category.clone(),
        value_text: thousands(&tile.value),
        value: tile.value.clone(),
    }
}

/// Locale-style thousands grouping of a raw JSON number (`825000000` →
/// `825,000,000`). A fractional part is carried through ungrouped.
pub fn thousands(value: &Number) -> String {
    let raw = value.to_string();
    if raw.contains(['e', 'E']) {
        return raw;
    }
    let (head, tail) = match raw.split_once('.') {
        Some((h, t)) => (h, Some(t)),
        None => (raw.as_str(), None),
    };
    let (sign, digits) = match head.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", head),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match tail {
        Some(t) => format!("{sign}{grouped}.{t}"),
        None => format!("{sign}{grouped}"),
    }
}
