#![forbid(unsafe_code)]

//! Headless layout + SVG renderer for tilefish treemap charts.
//!
//! The layout stage mirrors d3-treemap (`paddingInner`, squarify tiling);
//! the SVG stage emits the tile groups, the legend grid, and the
//! machine-readable data attributes the chart contract promises.

pub mod color;
pub mod label;
pub mod model;
pub mod svg;
pub mod tooltip;
pub mod treemap;
pub mod view;

use std::sync::Arc;

use indexmap::IndexSet;
use tilefish_core::dataset::DatasetDescriptor;
use tilefish_core::hierarchy::Hierarchy;
use tilefish_core::tree::RawNode;

use crate::color::OrdinalColorScale;
use crate::model::{
    ChartLayout, LEGEND_H_SPACING, LEGEND_RECT_SIZE, LEGEND_V_SPACING, LegendItemLayout,
    LegendLayout, Rect, TileDescriptor,
};
use crate::treemap::{LayoutEngine, Squarified};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid chart model: {message}")]
    InvalidModel { message: String },
    #[error("chart model JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Data(#[from] tilefish_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    /// Treemap canvas size in layout units.
    pub width: f64,
    pub height: f64,
    /// Gap between sibling tiles (d3 `paddingInner`).
    pub padding_inner: f64,
    /// Width of the legend strip; controls where the swatch grid wraps.
    pub legend_width: f64,
    pub layout_engine: Arc<dyn LayoutEngine + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 570.0,
            padding_inner: 0.5,
            legend_width: 500.0,
            layout_engine: Arc::new(Squarified),
        }
    }
}

/// Runs the full chart computation for one loaded dataset: hierarchy
/// construction (with structural validation), rectangle assignment, tile
/// descriptors, category set, and the legend grid.
pub fn layout_chart(
    dataset: &DatasetDescriptor,
    root: &RawNode,
    options: &LayoutOptions,
) -> Result<ChartLayout> {
    let mut hierarchy = Hierarchy::build(root)?;
    options.layout_engine.layout(
        &mut hierarchy,
        options.width,
        options.height,
        options.padding_inner,
    );

    let mut colors = OrdinalColorScale::default();
    let mut categories: IndexSet<String> = IndexSet::new();
    let mut tiles = Vec::new();
    for idx in hierarchy.leaves() {
        let node = hierarchy.node(idx);
        let category = node.category.clone().ok_or_else(|| Error::InvalidModel {
            message: format!("leaf `{}` has no category after validation", node.id),
        })?;
        let value = node.raw_value.clone().ok_or_else(|| Error::InvalidModel {
            message: format!("leaf `{}` has no value after validation", node.id),
        })?;
        categories.insert(category.clone());
        tiles.push(TileDescriptor {
            id: node.id.clone(),
            name: node.name.clone(),
            fill: colors.color_for(&category),
            category,
            value,
            weight: node.value,
            rect: Rect {
                x0: node.x0,
                y0: node.y0,
                x1: node.x1,
                y1: node.y1,
            },
            label_lines: label::split_label(&node.name),
        });
    }

    let legend = layout_legend(&categories, &mut colors, options.legend_width);
    tracing::debug!(
        tiles = tiles.len(),
        categories = categories.len(),
        "chart layout complete"
    );

    Ok(ChartLayout {
        title: dataset.title.clone(),
        description: dataset.description.clone(),
        width: options.width,
        height: options.height,
        padding_inner: options.padding_inner,
        categories: categories.into_iter().collect(),
        tiles,
        legend,
    })
}

// The legend reuses the tile color scale, so swatches and tiles agree by
// construction; the scale's domain is already locked in tile order.
fn layout_legend(
    categories: &IndexSet<String>,
    colors: &mut OrdinalColorScale,
    legend_width: f64,
) -> LegendLayout {
    let items_per_row = ((legend_width / LEGEND_H_SPACING).floor() as usize).max(1);
    let row_height = LEGEND_RECT_SIZE + LEGEND_V_SPACING;
    let items = categories
        .iter()
        .enumerate()
        .map(|(i, label)| LegendItemLayout {
            label: label.clone(),
            fill: colors.color_for(label),
            x: ((i % items_per_row) as f64) * LEGEND_H_SPACING,
            y: ((i / items_per_row) as f64) * row_height,
        })
        .collect();
    LegendLayout {
        width: legend_width,
        items_per_row,
        items,
    }
}
