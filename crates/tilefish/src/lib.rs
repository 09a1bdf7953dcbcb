#![forbid(unsafe_code)]

//! `tilefish` is a headless treemap chart renderer.
//!
//! A dataset (from the built-in catalog, or any JSON document of the same
//! shape) is fetched, validated, laid out with a d3-parity squarified
//! treemap, and emitted as a self-contained SVG page: title and description
//! regions, colored tiles with machine-readable data attributes, and a
//! wrapping category legend.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`tilefish::render`)
//! - `fetch`: enable HTTP retrieval of dataset documents (`tilefish::fetch`)

pub use tilefish_core::*;

#[cfg(feature = "fetch")]
pub mod fetch;

#[cfg(feature = "render")]
pub mod render {
    pub use tilefish_render::LayoutOptions;
    pub use tilefish_render::model::{ChartLayout, LegendLayout, Rect, TileDescriptor};
    pub use tilefish_render::svg::{SvgRenderOptions, render_chart_svg, render_error_svg};
    pub use tilefish_render::tooltip::{self, TooltipLayout};
    pub use tilefish_render::treemap::{LayoutEngine, Squarified};
    pub use tilefish_render::view::{PageView, SvgPage};

    use tilefish_core::dataset::{DatasetDescriptor, DatasetRegistry};
    use tilefish_core::tree::RawNode;

    #[derive(Debug, thiserror::Error)]
    pub enum ChartError {
        #[error(transparent)]
        Data(#[from] tilefish_core::Error),
        #[error(transparent)]
        Render(#[from] tilefish_render::Error),
        #[cfg(feature = "fetch")]
        #[error(transparent)]
        Fetch(#[from] crate::fetch::FetchError),
    }

    pub type Result<T> = std::result::Result<T, ChartError>;

    /// Synchronous layout helper (executor-free).
    pub fn layout_chart_sync(
        dataset: &DatasetDescriptor,
        root: &RawNode,
        layout_options: &LayoutOptions,
    ) -> Result<ChartLayout> {
        Ok(tilefish_render::layout_chart(dataset, root, layout_options)?)
    }

    pub async fn layout_chart(
        dataset: &DatasetDescriptor,
        root: &RawNode,
        layout_options: &LayoutOptions,
    ) -> Result<ChartLayout> {
        layout_chart_sync(dataset, root, layout_options)
    }

    /// Synchronous SVG render helper (executor-free).
    pub fn render_svg_sync(
        dataset: &DatasetDescriptor,
        root: &RawNode,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let layout = layout_chart_sync(dataset, root, layout_options)?;
        Ok(render_chart_svg(&layout, svg_options))
    }

    pub async fn render_svg(
        dataset: &DatasetDescriptor,
        root: &RawNode,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        render_svg_sync(dataset, root, layout_options, svg_options)
    }

    /// Convenience wrapper that bundles the dataset catalog and common
    /// options for one-call rendering.
    ///
    /// It stays runtime-agnostic: layout and SVG emission are CPU-bound, and
    /// only [`ChartRenderer::fetch_and_render_sync`] performs I/O.
    #[derive(Clone)]
    pub struct ChartRenderer {
        pub registry: DatasetRegistry,
        pub layout: LayoutOptions,
        pub svg: SvgRenderOptions,
    }

    impl Default for ChartRenderer {
        fn default() -> Self {
            Self {
                registry: DatasetRegistry::new(),
                layout: LayoutOptions::default(),
                svg: SvgRenderOptions::default(),
            }
        }
    }

    impl ChartRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Resolves a requested dataset key, falling back to the default.
        pub fn select(&self, key: Option<&str>) -> &DatasetDescriptor {
            self.registry.select(key)
        }

        pub fn layout_sync(
            &self,
            dataset: &DatasetDescriptor,
            root: &RawNode,
        ) -> Result<ChartLayout> {
            layout_chart_sync(dataset, root, &self.layout)
        }

        pub fn render_svg_sync(
            &self,
            dataset: &DatasetDescriptor,
            root: &RawNode,
        ) -> Result<String> {
            render_svg_sync(dataset, root, &self.layout, &self.svg)
        }

        /// Fetches the dataset's document and renders it in one call.
        #[cfg(feature = "fetch")]
        pub fn fetch_and_render_sync(&self, key: Option<&str>) -> Result<String> {
            let dataset = self.select(key).clone();
            let root = crate::fetch::fetch_dataset(&dataset)?;
            self.render_svg_sync(&dataset, &root)
        }

        /// The failed-state page for `dataset`: header intact, chart region
        /// empty, message visible.
        pub fn error_page(&self, dataset: &DatasetDescriptor, message: &str) -> String {
            render_error_svg(
                &dataset.title,
                &dataset.description,
                message,
                &self.layout,
                &self.svg,
            )
        }
    }
}
