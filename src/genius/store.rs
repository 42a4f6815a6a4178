//! Per-artist lyrics files.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::dataset::artist_key;
use crate::error::{Error, Result};
use crate::types::RawSong;

/// Write `<artist_key>.json` mapping each title to its raw lyrics.
///
/// Titles keep fetch order; a repeated title keeps its last lyrics.
pub fn save_artist_lyrics(dir: &Path, artist_name: &str, songs: &[RawSong]) -> Result<PathBuf> {
    fs_err::create_dir_all(dir).map_err(|e| Error::io(e, dir.to_path_buf()))?;

    let lyrics: Map<String, Value> = songs
        .iter()
        .map(|song| (song.title.clone(), Value::String(song.lyrics.clone())))
        .collect();

    let path = dir.join(format!("{}.json", artist_key(artist_name)));
    let json = serde_json::to_string(&lyrics)
        .map_err(|e| Error::parse(format!("failed to encode lyrics: {e}"), path.clone()))?;
    fs_err::write(&path, json).map_err(|e| Error::io(e, path.clone()))?;

    tracing::info!("{} had been created with {} songs", path.display(), lyrics.len());
    Ok(path)
}
