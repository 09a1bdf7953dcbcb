use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key of the dataset used when the requested key is absent or unrecognized.
pub const DEFAULT_DATASET: &str = "kickstarter";

/// Metadata for one chartable dataset. Defined at startup, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    pub key: String,
    /// Display title written into the page's `title` region.
    pub title: String,
    /// One-line description written into the page's `description` region.
    pub description: String,
    /// Remote JSON document holding the raw data tree.
    pub source_url: String,
}

/// Static mapping from a short key to dataset metadata, in catalog order.
#[derive(Debug, Clone)]
pub struct DatasetRegistry {
    datasets: IndexMap<String, DatasetDescriptor>,
}

impl Default for DatasetRegistry {
    fn default() -> Self {
        let mut registry = Self {
            datasets: IndexMap::new(),
        };
        registry.insert(
            "videogames",
            "Video Game Sales",
            "Top 100 Most Sold Video Games Grouped by Platform",
            "https://cdn.rawgit.com/freeCodeCamp/testable-projects-fcc/a80ce8f9/src/data/tree_map/video-game-sales-data.json",
        );
        registry.insert(
            "movies",
            "Movie Sales",
            "Top 100 Highest Grossing Movies Grouped By Genre",
            "https://cdn.rawgit.com/freeCodeCamp/testable-projects-fcc/a80ce8f9/src/data/tree_map/movie-data.json",
        );
        registry.insert(
            "kickstarter",
            "Kickstarter Pledges",
            "Top 100 Most Pledged Kickstarter Campaigns Grouped By Category",
            "https://cdn.rawgit.com/freeCodeCamp/testable-projects-fcc/a80ce8f9/src/data/tree_map/kickstarter-funding-data.json",
        );
        registry
    }
}

impl DatasetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, key: &str, title: &str, description: &str, source_url: &str) {
        self.datasets.insert(
            key.to_string(),
            DatasetDescriptor {
                key: key.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                source_url: source_url.to_string(),
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<&DatasetDescriptor> {
        self.datasets.get(key)
    }

    /// Resolves a requested key to a descriptor.
    ///
    /// An absent or unrecognized key falls back to [`DEFAULT_DATASET`]; the
    /// default is guaranteed to exist in the built-in catalog, so selection is
    /// total and never surfaces an error to the caller.
    pub fn select(&self, key: Option<&str>) -> &DatasetDescriptor {
        key.and_then(|k| self.datasets.get(k)).unwrap_or_else(|| {
            self.datasets
                .get(DEFAULT_DATASET)
                .expect("default dataset must exist in the catalog")
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatasetDescriptor> {
        self.datasets.values()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}
