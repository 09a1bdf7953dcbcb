use futures::executor::block_on;
use serde_json::json;
use tilefish::RawNode;
use tilefish::render::{
    ChartRenderer, LegendLayout, PageView, TileDescriptor, render_svg, tooltip,
};

fn movie_fixture() -> RawNode {
    RawNode::from_value(json!({
        "name": "Movies",
        "children": [
            {
                "name": "Drama",
                "children": [
                    { "name": "Inception", "category": "Drama", "value": 825000000 },
                    { "name": "Titanic", "category": "Drama", "value": 658672302 },
                    { "name": "TheKingsSpeech", "category": "Drama", "value": 414211549 },
                    { "name": "Amadeus", "category": "Drama", "value": 51973029 }
                ]
            },
            {
                "name": "Action",
                "children": [
                    { "name": "Avatar", "category": "Action", "value": 760507625 },
                    { "name": "JurassicWorld", "category": "Action", "value": 652270625 },
                    { "name": "TheAvengers", "category": "Action", "value": 623357910 }
                ]
            },
            {
                "name": "Comedy",
                "children": [
                    { "name": "ToyStory3", "category": "Comedy", "value": 415004880 },
                    { "name": "Frozen", "category": "Comedy", "value": 400738009 },
                    { "name": "DespicableMe2", "category": "Comedy", "value": 368061265 }
                ]
            }
        ]
    }))
    .unwrap()
}

#[test]
fn movies_fixture_renders_ten_tiles_three_legend_entries_and_the_title() {
    let renderer = ChartRenderer::new();
    let dataset = renderer.select(Some("movies")).clone();
    let svg = renderer.render_svg_sync(&dataset, &movie_fixture()).unwrap();

    let doc = roxmltree::Document::parse(&svg).unwrap();
    let groups = doc
        .descendants()
        .filter(|n| n.attribute("class") == Some("group"))
        .count();
    let legend_entries = doc
        .descendants()
        .filter(|n| n.attribute("class") == Some("legend-item"))
        .count();
    let title = doc
        .descendants()
        .find(|n| n.attribute("id") == Some("title"))
        .unwrap();

    assert_eq!(groups, 10);
    assert_eq!(legend_entries, 3);
    assert_eq!(title.text(), Some("Movie Sales"));
}

#[test]
fn async_wrappers_match_the_sync_pipeline() {
    let renderer = ChartRenderer::new();
    let dataset = renderer.select(Some("movies")).clone();
    let root = movie_fixture();
    let sync_svg = renderer.render_svg_sync(&dataset, &root).unwrap();
    let async_svg =
        block_on(render_svg(&dataset, &root, &renderer.layout, &renderer.svg)).unwrap();
    assert_eq!(sync_svg, async_svg);
}

#[test]
fn hovering_inception_yields_the_grouped_value_and_the_raw_hook() {
    let renderer = ChartRenderer::new();
    let dataset = renderer.select(Some("movies")).clone();
    let layout = renderer.layout_sync(&dataset, &movie_fixture()).unwrap();

    let tile = layout
        .tiles
        .iter()
        .find(|t| t.name == "Inception")
        .unwrap();
    assert_eq!(tile.category, "Drama");

    let tip = tooltip::for_tile(tile, 400.0, 300.0);
    assert_eq!(tip.x, 410.0);
    assert_eq!(tip.y, 272.0);
    assert!(tip.lines()[2].contains("825,000,000"));
    assert_eq!(tip.value.to_string(), "825000000");
}

#[test]
fn every_leaf_value_survives_into_its_tile_unchanged() {
    let renderer = ChartRenderer::new();
    let dataset = renderer.select(Some("movies")).clone();
    let layout = renderer.layout_sync(&dataset, &movie_fixture()).unwrap();
    assert_eq!(layout.categories, ["Drama", "Action", "Comedy"]);
    for tile in &layout.tiles {
        assert_eq!(tile.weight, tile.value.as_f64().unwrap());
    }
}

#[test]
fn failed_fetch_state_keeps_the_header_and_shows_an_error() {
    let renderer = ChartRenderer::new();
    let dataset = renderer.select(Some("movies")).clone();
    let page = renderer.error_page(
        &dataset,
        "Request to `https://example.invalid/movie-data.json` failed: connection refused",
    );

    let doc = roxmltree::Document::parse(&page).unwrap();
    let title = doc
        .descendants()
        .find(|n| n.attribute("id") == Some("title"))
        .unwrap();
    assert_eq!(title.text(), Some("Movie Sales"));
    assert_eq!(
        doc.descendants()
            .filter(|n| n.attribute("class") == Some("tile"))
            .count(),
        0
    );
    assert!(
        doc.descendants()
            .any(|n| n.attribute("class") == Some("chart-error"))
    );
}

#[derive(Default)]
struct RecordingView {
    title: String,
    description: String,
    tiles: Vec<TileDescriptor>,
    legend_labels: Vec<String>,
    error: Option<String>,
}

impl PageView for RecordingView {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    fn render_tiles(&mut self, tiles: &[TileDescriptor]) {
        self.tiles = tiles.to_vec();
    }

    fn render_legend(&mut self, legend: &LegendLayout) {
        self.legend_labels = legend.items.iter().map(|i| i.label.clone()).collect();
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }
}

#[test]
fn the_pipeline_is_observable_through_any_page_view() {
    let renderer = ChartRenderer::new();
    let dataset = renderer.select(Some("movies")).clone();
    let layout = renderer.layout_sync(&dataset, &movie_fixture()).unwrap();

    let mut view = RecordingView::default();
    view.set_title(&layout.title);
    view.set_description(&layout.description);
    view.render_tiles(&layout.tiles);
    view.render_legend(&layout.legend);

    assert_eq!(view.title, "Movie Sales");
    assert_eq!(view.tiles.len(), 10);
    assert_eq!(view.legend_labels, ["Drama", "Action", "Comedy"]);
    assert!(view.error.is_none());

    let inception = view.tiles.iter().find(|t| t.name == "Inception").unwrap();
    assert_eq!(inception.id, "Movies.Drama.Inception");
    assert_eq!(inception.value.to_string(), "825000000");
}
