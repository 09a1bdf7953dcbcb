use std::fmt::Write as _;

use crate::model::{ChartLayout, LEGEND_OFFSET_X, LEGEND_RECT_SIZE, LegendLayout, TileDescriptor};
use crate::tooltip;
use crate::view::{PageView, SvgPage};

/// Tile label metrics: first-line baseline and per-line pitch, in layout
/// units relative to the tile's top-left corner.
pub(crate) const TILE_LABEL_START_Y: f64 = 8.0;
pub(crate) const TILE_LABEL_LINE_HEIGHT: f64 = 9.0;

#[derive(Debug, Clone, Default)]
pub struct SvgRenderOptions {
    /// Optional id for the root SVG element; it also prefixes the embedded
    /// CSS selectors so several charts can share a document.
    pub chart_id: Option<String>,
}

/// Renders the full chart page: title/description regions, the treemap
/// canvas, and the legend grid, as one SVG document.
pub fn render_chart_svg(layout: &ChartLayout, options: &SvgRenderOptions) -> String {
    let mut page = SvgPage::new(
        layout.width,
        layout.height,
        layout.legend.width,
        options.clone(),
    );
    page.set_title(&layout.title);
    page.set_description(&layout.description);
    page.render_tiles(&layout.tiles);
    page.render_legend(&layout.legend);
    page.finish()
}

/// Failure placeholder: title and description keep their pre-fetch content,
/// the chart region stays empty, and the message is shown where tiles would
/// have been. Nothing partially drawn is ever emitted.
pub fn render_error_svg(
    title: &str,
    description: &str,
    message: &str,
    layout: &crate::LayoutOptions,
    options: &SvgRenderOptions,
) -> String {
    let mut page = SvgPage::new(layout.width, layout.height, layout.legend_width, options.clone());
    page.set_title(title);
    page.set_description(description);
    page.show_error(message);
    page.finish()
}

pub(crate) fn tile_group_svg(out: &mut String, tile: &TileDescriptor) {
    let _ = write!(
        out,
        r#"<g class="group" transform="translate({x},{y})">"#,
        x = fmt(tile.rect.x0),
        y = fmt(tile.rect.y0),
    );
    let _ = write!(
        out,
        r#"<rect id="{id}" class="tile" width="{w}" height="{h}" data-name="{name}" data-category="{category}" data-value="{value}" fill="{fill}">"#,
        id = escape_xml(&tile.id),
        w = fmt(tile.rect.width()),
        h = fmt(tile.rect.height()),
        name = escape_xml(&tile.name),
        category = escape_xml(&tile.category),
        value = escape_xml(&tile.value.to_string()),
        fill = escape_xml(&tile.fill),
    );
    // Native SVG hover text; mirrors the floating tooltip's three lines.
    let _ = write!(
        out,
        r#"<title>Name: {name}&#10;Category: {category}&#10;Value: {value}</title>"#,
        name = escape_xml(&tile.name),
        category = escape_xml(&tile.category),
        value = escape_xml(&tooltip::thousands(&tile.value)),
    );
    out.push_str("</rect>");

    out.push_str(r#"<text class="tile-text">"#);
    for (i, line) in tile.label_lines.iter().enumerate() {
        let _ = write!(
            out,
            r#"<tspan x="0" y="{y}">{text}</tspan>"#,
            y = fmt(TILE_LABEL_START_Y + (i as f64) * TILE_LABEL_LINE_HEIGHT),
            text = escape_xml(line),
        );
    }
    out.push_str("</text></g>");
}

pub(crate) fn legend_group_svg(out: &mut String, legend: &LegendLayout) {
    let _ = write!(
        out,
        r#"<g transform="translate({x},0)">"#,
        x = fmt(LEGEND_OFFSET_X)
    );
    for item in &legend.items {
        let _ = write!(
            out,
            r#"<g transform="translate({x},{y})">"#,
            x = fmt(item.x),
            y = fmt(item.y),
        );
        let _ = write!(
            out,
            r#"<rect class="legend-item" width="{s}" height="{s}" fill="{fill}"/>"#,
            s = fmt(LEGEND_RECT_SIZE),
            fill = escape_xml(&item.fill),
        );
        let _ = write!(
            out,
            r#"<text class="legend-label" x="{x}" y="{y}">{label}</text>"#,
            x = fmt(LEGEND_RECT_SIZE + 4.0),
            y = fmt(LEGEND_RECT_SIZE - 2.0),
            label = escape_xml(&item.label),
        );
        out.push_str("</g>");
    }
    out.push_str("</g>");
}

pub(crate) fn page_css(chart_id: &str) -> String {
    format!(
        r#"#{id} .chart-title{{fill:#111;font-size:24px;font-family:sans-serif;}}#{id} .chart-description{{fill:#444;font-size:14px;font-family:sans-serif;}}#{id} .tile-text{{fill:#111;font-size:9px;font-family:sans-serif;}}#{id} .legend-label{{fill:#111;font-size:13px;font-family:sans-serif;}}#{id} .chart-error{{fill:#b00020;font-size:16px;font-family:sans-serif;}}"#,
        id = chart_id
    )
}

pub(crate) fn fmt(v: f64) -> String {
    // Round-trippable decimal form for SVG attributes, without `-0` or tiny
    // float noise from our own padding arithmetic.
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_snaps_near_integers_and_drops_negative_zero() {
        assert_eq!(fmt(12.000000001), "12");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(0.5), "0.5");
        assert_eq!(fmt(f64::NAN), "0");
    }

    #[test]
    fn escape_xml_covers_markup_characters() {
        assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    }
}
