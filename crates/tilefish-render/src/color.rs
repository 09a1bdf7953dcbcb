use indexmap::IndexMap;

/// d3 `schemeCategory10`, the categorical palette this chart family defaults
/// to.
pub const SCHEME_CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Ordinal color scale: keys get palette entries in first-seen order and keep
/// them for the scale's lifetime; the range wraps when exhausted.
#[derive(Debug, Clone)]
pub struct OrdinalColorScale {
    range: Vec<String>,
    domain: IndexMap<String, usize>,
}

impl Default for OrdinalColorScale {
    fn default() -> Self {
        Self::new(SCHEME_CATEGORY10.iter().map(|c| c.to_string()).collect())
    }
}

impl OrdinalColorScale {
    pub fn new(range: Vec<String>) -> Self {
        Self {
            range,
            domain: IndexMap::new(),
        }
    }

    pub fn color_for(&mut self, key: &str) -> String {
        let idx = if let Some(idx) = self.domain.get(key).copied() {
            idx
        } else {
            let idx = self.domain.len();
            self.domain.insert(key.to_string(), idx);
            idx
        };
        if self.range.is_empty() {
            return String::new();
        }
        self.range[idx % self.range.len()].clone()
    }

    /// Keys in first-seen order.
    pub fn domain(&self) -> impl Iterator<Item = &str> {
        self.domain.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }
}
