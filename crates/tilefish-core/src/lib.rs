#![forbid(unsafe_code)]

//! Dataset catalog + treemap hierarchy model (headless).
//!
//! Design goals:
//! - 1:1 parity with the d3-hierarchy pipeline treemap charts are built on
//!   (`eachBefore` id assignment, `sum`, two-key sibling sort)
//! - deterministic, testable outputs (no I/O, no ambient state)

pub mod dataset;
pub mod error;
pub mod hierarchy;
pub mod tree;

pub use dataset::{DEFAULT_DATASET, DatasetDescriptor, DatasetRegistry};
pub use error::{Error, Result};
pub use hierarchy::{HierNode, Hierarchy};
pub use tree::RawNode;

#[cfg(test)]
mod tests;
