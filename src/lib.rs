//! `bobornot` - "Bob or not Bob?" lyrics classification toolkit.
//!
//! Collects song lyrics per artist, cleans them into fragments, labels
//! them as Bob Marley or not and concatenates them into a training table.
//! The same table feeds the terminal guessing game, next to a hosted
//! classifier that scores user-written lyrics.

// Re-export public modules for use in integration tests and as a library
pub mod app;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod genius;
pub mod lyrics;
pub mod quiz;
pub mod types;
pub mod ui;
