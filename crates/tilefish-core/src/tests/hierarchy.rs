use crate::*;
use serde_json::json;

fn build(value: serde_json::Value) -> Result<Hierarchy> {
    Hierarchy::build(&RawNode::from_value(value)?)
}

fn movie_tree() -> serde_json::Value {
    json!({
        "name": "Movies",
        "children": [
            {
                "name": "Drama",
                "children": [
                    { "name": "Inception", "category": "Drama", "value": 825000000 },
                    { "name": "Titanic", "category": "Drama", "value": 658000000 }
                ]
            },
            {
                "name": "Action",
                "children": [
                    { "name": "Avatar", "category": "Action", "value": 760505847 }
                ]
            }
        ]
    })
}

#[test]
fn assigns_dotted_path_ids() {
    let h = build(movie_tree()).unwrap();
    let ids: Vec<&str> = h
        .each_before()
        .into_iter()
        .map(|idx| h.node(idx).id.as_str())
        .collect();
    assert!(ids.contains(&"Movies"));
    assert!(ids.contains(&"Movies.Drama"));
    assert!(ids.contains(&"Movies.Drama.Inception"));
    assert!(ids.contains(&"Movies.Action.Avatar"));
}

#[test]
fn ids_are_unique_and_stable() {
    let a = build(movie_tree()).unwrap();
    let b = build(movie_tree()).unwrap();
    let ids = |h: &Hierarchy| {
        let mut v: Vec<String> = h.nodes().iter().map(|n| n.id.clone()).collect();
        v.sort();
        v
    };
    let ids_a = ids(&a);
    assert_eq!(ids_a, ids(&b));
    let mut deduped = ids_a.clone();
    deduped.dedup();
    assert_eq!(deduped, ids_a);
}

#[test]
fn aggregates_leaf_values_upward() {
    let h = build(movie_tree()).unwrap();
    assert_eq!(h.root().value, 825000000.0 + 658000000.0 + 760505847.0);
    let drama = h
        .nodes()
        .iter()
        .find(|n| n.id == "Movies.Drama")
        .unwrap();
    assert_eq!(drama.value, 825000000.0 + 658000000.0);
}

#[test]
fn computes_height_as_distance_to_deepest_leaf() {
    let h = build(movie_tree()).unwrap();
    assert_eq!(h.root().height, 2);
    let drama = h
        .nodes()
        .iter()
        .find(|n| n.id == "Movies.Drama")
        .unwrap();
    assert_eq!(drama.height, 1);
    let leaf = h
        .nodes()
        .iter()
        .find(|n| n.id == "Movies.Drama.Inception")
        .unwrap();
    assert_eq!(leaf.height, 0);
}

#[test]
fn sorts_siblings_by_descending_aggregated_value() {
    let h = build(json!({
        "name": "root",
        "children": [
            { "name": "small", "category": "a", "value": 1 },
            { "name": "large", "category": "a", "value": 3 },
            { "name": "mid", "category": "a", "value": 2 }
        ]
    }))
    .unwrap();
    let names: Vec<&str> = h.root().children.iter().map(|&c| h.node(c).name.as_str()).collect();
    assert_eq!(names, ["large", "mid", "small"]);
}

#[test]
fn height_outranks_value_for_mixed_depth_siblings() {
    // An internal node sorts before a heavier leaf whenever heights differ;
    // this ordering is visible in how tiles stack, so it must hold exactly.
    let h = build(json!({
        "name": "root",
        "children": [
            { "name": "heavy-leaf", "category": "a", "value": 100 },
            {
                "name": "light-group",
                "children": [
                    { "name": "inner", "category": "a", "value": 1 }
                ]
            }
        ]
    }))
    .unwrap();
    let names: Vec<&str> = h.root().children.iter().map(|&c| h.node(c).name.as_str()).collect();
    assert_eq!(names, ["light-group", "heavy-leaf"]);
}

#[test]
fn sort_is_stable_on_ties() {
    let h = build(json!({
        "name": "root",
        "children": [
            { "name": "first", "category": "a", "value": 5 },
            { "name": "second", "category": "a", "value": 5 },
            { "name": "third", "category": "a", "value": 5 }
        ]
    }))
    .unwrap();
    let names: Vec<&str> = h.root().children.iter().map(|&c| h.node(c).name.as_str()).collect();
    assert_eq!(names, ["first", "second", "third"]);
}

#[test]
fn leaves_preserve_preorder_after_sort() {
    let h = build(movie_tree()).unwrap();
    let leaf_names: Vec<&str> = h
        .leaves()
        .into_iter()
        .map(|idx| h.node(idx).name.as_str())
        .collect();
    // Drama (sum 1.483bn) sorts before Action (760m); Inception before Titanic.
    assert_eq!(leaf_names, ["Inception", "Titanic", "Avatar"]);
}

#[test]
fn keeps_raw_value_token_for_leaves() {
    let h = build(movie_tree()).unwrap();
    let leaf = h
        .nodes()
        .iter()
        .find(|n| n.id == "Movies.Drama.Inception")
        .unwrap();
    assert_eq!(leaf.raw_value.as_ref().unwrap().to_string(), "825000000");
}

#[test]
fn rejects_leaf_without_value() {
    let err = build(json!({
        "name": "root",
        "children": [ { "name": "broken", "category": "a" } ]
    }))
    .unwrap_err();
    assert_eq!(err.to_string(), "Leaf `root.broken` has no usable numeric value");
}

#[test]
fn rejects_leaf_with_non_numeric_value() {
    let err = build(json!({
        "name": "root",
        "children": [ { "name": "broken", "category": "a", "value": "lots" } ]
    }))
    .unwrap_err();
    assert!(matches!(err, Error::MissingValue { .. }));
}

#[test]
fn rejects_negative_leaf_value() {
    let err = build(json!({
        "name": "root",
        "children": [ { "name": "refund", "category": "a", "value": -5 } ]
    }))
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Leaf `root.refund` has invalid value: -5. Negative values are not allowed in treemaps. All leaf values must be >= 0."
    );
}

#[test]
fn rejects_leaf_without_category() {
    let err = build(json!({
        "name": "root",
        "children": [ { "name": "uncategorized", "value": 5 } ]
    }))
    .unwrap_err();
    assert!(matches!(err, Error::MissingCategory { .. }));
}

#[test]
fn rejects_blank_name() {
    let err = build(json!({
        "name": "root",
        "children": [ { "name": "  ", "category": "a", "value": 5 } ]
    }))
    .unwrap_err();
    assert!(matches!(err, Error::EmptyName { .. }));
}

#[test]
fn rejects_duplicate_sibling_names() {
    let err = build(json!({
        "name": "root",
        "children": [
            { "name": "twin", "category": "a", "value": 1 },
            { "name": "twin", "category": "a", "value": 2 }
        ]
    }))
    .unwrap_err();
    assert_eq!(err.to_string(), "Duplicate node id `root.twin`: sibling names must be unique");
}

#[test]
fn same_name_under_different_parents_is_fine() {
    let h = build(json!({
        "name": "root",
        "children": [
            { "name": "a", "children": [ { "name": "x", "category": "c", "value": 1 } ] },
            { "name": "b", "children": [ { "name": "x", "category": "c", "value": 2 } ] }
        ]
    }));
    assert!(h.is_ok());
}

#[test]
fn rejects_trees_nested_past_the_depth_cap() {
    let mut node = json!({ "name": "leaf", "category": "a", "value": 1 });
    for i in 0..=hierarchy::MAX_DEPTH {
        node = json!({ "name": format!("level{i}"), "children": [node] });
    }
    let err = build(node).unwrap_err();
    assert!(matches!(err, Error::TooDeep { .. }));
}

#[test]
fn single_leaf_root_builds() {
    let h = build(json!({ "name": "only", "category": "a", "value": 7 })).unwrap();
    assert_eq!(h.len(), 1);
    assert_eq!(h.leaves(), vec![0]);
    assert_eq!(h.root().value, 7.0);
    assert_eq!(h.root().height, 0);
}
