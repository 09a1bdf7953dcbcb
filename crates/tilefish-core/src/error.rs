pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Dataset JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Node under `{parent}` has an empty name")]
    EmptyName { parent: String },

    #[error("Leaf `{path}` has no usable numeric value")]
    MissingValue { path: String },

    #[error(
        "Leaf `{path}` has invalid value: {value}. Negative values are not allowed in treemaps. All leaf values must be >= 0."
    )]
    NegativeValue { path: String, value: f64 },

    #[error("Leaf `{path}` has no category")]
    MissingCategory { path: String },

    #[error("Duplicate node id `{id}`: sibling names must be unique")]
    DuplicateId { id: String },

    #[error("Data tree exceeds the maximum supported depth of {max_depth}")]
    TooDeep { max_depth: usize },
}
