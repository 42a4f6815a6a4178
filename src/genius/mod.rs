//! Genius corpus source.
//!
//! Fetches an artist's songs and their lyrics from Genius, with bounded
//! retries on transient failures, and stores them as one JSON file per
//! artist for the dataset builder.

/// API client for Genius requests
pub mod api;
/// Lyrics extraction from song pages
pub mod page;
/// Per-artist lyrics files
pub mod store;
/// Data types representing Genius resources
pub mod types;

pub use api::{retry, GeniusClient};
pub use store::save_artist_lyrics;
pub use types::{Artist, SongRef, SongSort};
