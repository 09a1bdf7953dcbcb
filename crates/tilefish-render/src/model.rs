use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Legend grid constants, in layout units.
pub const LEGEND_OFFSET_X: f64 = 70.0;
pub const LEGEND_RECT_SIZE: f64 = 15.0;
pub const LEGEND_H_SPACING: f64 = 150.0;
pub const LEGEND_V_SPACING: f64 = 10.0;

/// Rectangle bounds in layout coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

/// Everything the view layer needs to draw one leaf tile.
///
/// `value` is the raw source number (so `data-value` reproduces the input
/// token exactly); `weight` is the aggregated numeric value the layout
/// partitioned by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileDescriptor {
    pub id: String,
    pub name: String,
    pub category: String,
    pub value: Number,
    pub weight: f64,
    pub fill: String,
    pub rect: Rect,
    /// Name split at capitalized-word boundaries, one entry per label line.
    pub label_lines: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendItemLayout {
    pub label: String,
    pub fill: String,
    pub x: f64,
    pub y: f64,
}

/// Wrapping swatch grid derived from the distinct leaf categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendLayout {
    pub width: f64,
    pub items_per_row: usize,
    pub items: Vec<LegendItemLayout>,
}

impl LegendLayout {
    pub fn rows(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.items.len().div_ceil(self.items_per_row)
        }
    }

    pub fn height(&self) -> f64 {
        self.rows() as f64 * (LEGEND_RECT_SIZE + LEGEND_V_SPACING)
    }
}

/// The fully computed chart: one of these per successful dataset load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartLayout {
    pub title: String,
    pub description: String,
    /// Treemap canvas size in layout units.
    pub width: f64,
    pub height: f64,
    pub padding_inner: f64,
    /// Distinct leaf categories in first-encountered order.
    pub categories: Vec<String>,
    pub tiles: Vec<TileDescriptor>,
    pub legend: LegendLayout,
}
