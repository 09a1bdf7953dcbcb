use std::fmt::Write as _;

use crate::model::{LegendLayout, TileDescriptor};
use crate::svg::{self, SvgRenderOptions};

/// Rendering surface for one chart page load.
///
/// The pipeline talks only to this trait: production hands it to
/// [`SvgPage`], tests hand it to a recording implementation and assert on
/// the tile descriptors directly.
pub trait PageView {
    fn set_title(&mut self, title: &str);
    fn set_description(&mut self, description: &str);
    fn render_tiles(&mut self, tiles: &[TileDescriptor]);
    fn render_legend(&mut self, legend: &LegendLayout);
    /// Enters the failed state: any tile/legend content is discarded so a
    /// broken chart can never be partially shown.
    fn show_error(&mut self, message: &str);
}

const HEADER_HEIGHT: f64 = 70.0;
const TITLE_Y: f64 = 34.0;
const DESCRIPTION_Y: f64 = 58.0;
const LEGEND_GAP: f64 = 20.0;
const FOOTER_PADDING: f64 = 10.0;

/// [`PageView`] that assembles the SVG page: title and description text
/// regions, the `tree-map` canvas, and the `legend` strip in one document.
#[derive(Debug, Clone)]
pub struct SvgPage {
    options: SvgRenderOptions,
    chart_width: f64,
    chart_height: f64,
    legend_width: f64,
    title: String,
    description: String,
    tiles_svg: String,
    legend_svg: String,
    legend_height: f64,
    error: Option<String>,
}

impl SvgPage {
    pub fn new(
        chart_width: f64,
        chart_height: f64,
        legend_width: f64,
        options: SvgRenderOptions,
    ) -> Self {
        Self {
            options,
            chart_width,
            chart_height,
            legend_width,
            title: String::new(),
            description: String::new(),
            tiles_svg: String::new(),
            legend_svg: String::new(),
            legend_height: 0.0,
            error: None,
        }
    }

    fn chart_id(&self) -> &str {
        self.options.chart_id.as_deref().unwrap_or("tilefish")
    }

    /// The finished SVG document.
    pub fn finish(&self) -> String {
        let chart_id = svg::escape_xml(self.chart_id());
        let total_width = self.chart_width.max(self.legend_width).max(1.0);
        let legend_y = HEADER_HEIGHT + self.chart_height + LEGEND_GAP;
        let total_height = legend_y + self.legend_height + FOOTER_PADDING;

        let mut out = String::new();
        let _ = write!(
            &mut out,
            r#"<svg id="{chart_id}" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="graphics-document document" aria-roledescription="treemap">"#,
            w = svg::fmt(total_width),
            h = svg::fmt(total_height),
        );
        let _ = write!(&mut out, "<style>{}</style>", svg::page_css(&chart_id));

        let _ = write!(
            &mut out,
            r#"<text id="title" class="chart-title" x="0" y="{y}">{text}</text>"#,
            y = svg::fmt(TITLE_Y),
            text = svg::escape_xml(&self.title),
        );
        let _ = write!(
            &mut out,
            r#"<text id="description" class="chart-description" x="0" y="{y}">{text}</text>"#,
            y = svg::fmt(DESCRIPTION_Y),
            text = svg::escape_xml(&self.description),
        );

        let _ = write!(
            &mut out,
            r#"<svg id="tree-map" x="0" y="{y}" width="{w}" height="{h}">"#,
            y = svg::fmt(HEADER_HEIGHT),
            w = svg::fmt(self.chart_width),
            h = svg::fmt(self.chart_height),
        );
        out.push_str(&self.tiles_svg);
        out.push_str("</svg>");

        if let Some(message) = self.error.as_deref() {
            let _ = write!(
                &mut out,
                r#"<text class="chart-error" x="{x}" y="{y}" text-anchor="middle">{text}</text>"#,
                x = svg::fmt(total_width / 2.0),
                y = svg::fmt(HEADER_HEIGHT + self.chart_height / 2.0),
                text = svg::escape_xml(message),
            );
        } else {
            let _ = write!(
                &mut out,
                r#"<svg id="legend" x="0" y="{y}" width="{w}" height="{h}">"#,
                y = svg::fmt(legend_y),
                w = svg::fmt(self.legend_width),
                h = svg::fmt(self.legend_height.max(1.0)),
            );
            out.push_str(&self.legend_svg);
            out.push_str("</svg>");
        }

        out.push_str("</svg>");
        out
    }
}

impl PageView for SvgPage {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    fn render_tiles(&mut self, tiles: &[TileDescriptor]) {
        if self.error.is_some() {
            return;
        }
        let mut out = String::new();
        for tile in tiles {
            svg::tile_group_svg(&mut out, tile);
        }
        self.tiles_svg = out;
    }

    fn render_legend(&mut self, legend: &LegendLayout) {
        if self.error.is_some() {
            return;
        }
        let mut out = String::new();
        svg::legend_group_svg(&mut out, legend);
        self.legend_svg = out;
        self.legend_height = legend.height();
    }

    fn show_error(&mut self, message: &str) {
        self.tiles_svg.clear();
        self.legend_svg.clear();
        self.legend_height = 0.0;
        self.error = Some(message.to_string());
    }
}
