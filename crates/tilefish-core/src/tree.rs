use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

/// Externally-sourced nested dataset node.
///
/// Leaves carry `category` and `value`; internal nodes only name a grouping
/// and aggregate their children. `value` is kept as raw JSON so downstream
/// output can reproduce the source token without reformatting; structural
/// validation happens when the hierarchy is built, not here.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub children: Option<Vec<RawNode>>,
}

impl RawNode {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.as_ref().is_none_or(|c| c.is_empty())
    }

    /// The node's own numeric value, if it carries one.
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.as_ref().and_then(json_f64)
    }
}

pub(crate) fn json_f64(v: &Value) -> Option<f64> {
    v.as_f64()
        .or_else(|| v.as_i64().map(|n| n as f64))
        .or_else(|| v.as_u64().map(|n| n as f64))
}
