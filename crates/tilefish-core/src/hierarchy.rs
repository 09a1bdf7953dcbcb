use std::collections::HashSet;

use serde_json::Number;

use crate::error::{Error, Result};
use crate::tree::RawNode;

/// Hard cap on nesting depth. JSON cannot encode a cycle, but generated or
/// adversarial documents can still nest absurdly deep; past this the tree is
/// rejected instead of recursed.
pub const MAX_DEPTH: usize = 64;

/// One node of the built hierarchy, stored in a flat arena.
#[derive(Debug, Clone)]
pub struct HierNode {
    /// Dotted path id: the root keeps its bare name, every other node is
    /// `parent.id + "." + name`. Unique within one built tree.
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    /// Raw JSON number carried by the node itself (always present on leaves).
    pub raw_value: Option<Number>,
    /// The node's own numeric value; 0 when the node carries none.
    pub own_value: f64,
    /// Aggregated value: own value plus everything below it.
    pub value: f64,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub depth: usize,
    /// Distance to the deepest descendant leaf (0 for leaves).
    pub height: usize,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl HierNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

fn push_node(
    nodes: &mut Vec<HierNode>,
    seen_ids: &mut HashSet<String>,
    node: &RawNode,
    parent: Option<usize>,
    depth: usize,
) -> Result<usize> {
    if depth > MAX_DEPTH {
        return Err(Error::TooDeep {
            max_depth: MAX_DEPTH,
        });
    }
    if node.name.trim().is_empty() {
        return Err(Error::EmptyName {
            parent: parent.map(|p| nodes[p].id.clone()).unwrap_or_default(),
        });
    }

    let id = match parent {
        Some(p) => format!("{}.{}", nodes[p].id, node.name),
        None => node.name.clone(),
    };
    if !seen_ids.insert(id.clone()) {
        return Err(Error::DuplicateId { id });
    }

    let own_value = node.numeric_value().unwrap_or(0.0);
    if node.is_leaf() {
        let value = node
            .numeric_value()
            .ok_or_else(|| Error::MissingValue { path: id.clone() })?;
        if value < 0.0 {
            return Err(Error::NegativeValue {
                path: id.clone(),
                value,
            });
        }
        if node.category.is_none() {
            return Err(Error::MissingCategory { path: id.clone() });
        }
    }

    let idx = nodes.len();
    nodes.push(HierNode {
        id,
        name: node.name.clone(),
        category: node.category.clone(),
        raw_value: node.value.as_ref().and_then(|v| v.as_number().cloned()),
        own_value,
        value: 0.0,
        parent,
        children: Vec::new(),
        depth,
        height: 0,
        x0: 0.0,
        y0: 0.0,
        x1: 0.0,
        y1: 0.0,
    });

    if let Some(parent_idx) = parent {
        nodes[parent_idx].children.push(idx);
    }

    if let Some(children) = node.children.as_ref() {
        for child in children {
            push_node(nodes, seen_ids, child, Some(idx), depth + 1)?;
        }
    }

    Ok(idx)
}

fn compute_sum(nodes: &mut [HierNode], idx: usize) -> f64 {
    let mut sum = nodes[idx].own_value;
    let children = nodes[idx].children.clone();
    for c in children {
        sum += compute_sum(nodes, c);
    }
    nodes[idx].value = sum;
    sum
}

fn compute_height(nodes: &mut [HierNode], idx: usize) -> usize {
    let mut height = 0;
    let children = nodes[idx].children.clone();
    for c in children {
        height = height.max(compute_height(nodes, c) + 1);
    }
    nodes[idx].height = height;
    height
}

/// Sorts every node's children the way tiles stack: deeper subtrees first,
/// then larger aggregated values, original input order on ties.
fn sort_children(nodes: &mut [HierNode], idx: usize) {
    let mut items = nodes[idx]
        .children
        .iter()
        .copied()
        .enumerate()
        .map(|(pos, child)| (child, pos))
        .collect::<Vec<_>>();
    items.sort_by(|(a, a_pos), (b, b_pos)| {
        let (ah, av) = (nodes[*a].height, nodes[*a].value);
        let (bh, bv) = (nodes[*b].height, nodes[*b].value);
        bh.cmp(&ah)
            .then_with(|| bv.partial_cmp(&av).unwrap_or(std::cmp::Ordering::Equal))
            .then_with(|| a_pos.cmp(b_pos))
    });
    nodes[idx].children = items.into_iter().map(|(child, _pos)| child).collect();

    let children = nodes[idx].children.clone();
    for c in children {
        sort_children(nodes, c);
    }
}

/// Pre-order traversal over the arena, `root` first.
pub fn each_before(nodes: &[HierNode], root: usize) -> Vec<usize> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(idx) = stack.pop() {
        out.push(idx);
        for &c in nodes[idx].children.iter().rev() {
            stack.push(c);
        }
    }
    out
}

/// A fully linked, aggregated, sorted tree ready for rectangle assignment.
///
/// Built fresh for every loaded dataset and read-only downstream, except for
/// the rectangle bounds a layout engine writes into the arena.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    nodes: Vec<HierNode>,
}

impl Hierarchy {
    pub const ROOT: usize = 0;

    /// Builds the hierarchy from a raw tree: parent/child links, dotted ids,
    /// aggregated values, heights, and the sibling sort, in that order.
    /// Rectangle bounds stay zeroed until a layout engine assigns them.
    ///
    /// This is also where structural validation happens; a malformed tree is
    /// rejected before anything downstream can render from it.
    pub fn build(root: &RawNode) -> Result<Self> {
        let mut nodes = Vec::new();
        let mut seen_ids = HashSet::new();
        push_node(&mut nodes, &mut seen_ids, root, None, 0)?;
        compute_sum(&mut nodes, Self::ROOT);
        compute_height(&mut nodes, Self::ROOT);
        sort_children(&mut nodes, Self::ROOT);
        tracing::debug!(nodes = nodes.len(), "built treemap hierarchy");
        Ok(Self { nodes })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, idx: usize) -> &HierNode {
        &self.nodes[idx]
    }

    pub fn root(&self) -> &HierNode {
        &self.nodes[Self::ROOT]
    }

    pub fn nodes(&self) -> &[HierNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [HierNode] {
        &mut self.nodes
    }

    /// Pre-order traversal indices, root first.
    pub fn each_before(&self) -> Vec<usize> {
        each_before(&self.nodes, Self::ROOT)
    }

    /// Leaf indices in pre-order: the order tiles are rendered in, and the
    /// order the category set is derived in.
    pub fn leaves(&self) -> Vec<usize> {
        self.each_before()
            .into_iter()
            .filter(|&idx| self.nodes[idx].is_leaf())
            .collect()
    }
}
