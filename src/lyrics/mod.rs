//! Lyrics processing.
//!
//! Turns raw scraped lyrics into short fragments fit for dataset assembly.

pub mod cleaner;

pub use cleaner::{clean_lyrics, SplitMode};
