//! Dataset assembly.
//!
//! Turns a directory of per-artist lyrics files into a flat table of
//! labelled, length-bounded examples.

/// Greedy concatenation of same-label fragments
pub mod aggregator;
/// Directory-to-table orchestration
pub mod builder;
/// Artist-to-label mapping
pub mod label;
/// The assembled table and its CSV form
pub mod table;

pub use aggregator::{Aggregation, Aggregator};
pub use builder::DatasetBuilder;
pub use label::{artist_key, LabelAssigner};
pub use table::Dataset;
