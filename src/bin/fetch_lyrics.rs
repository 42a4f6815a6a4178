//! Download song lyrics from Genius, one JSON file per artist.
//!
//! Usage: cargo run --bin fetch_lyrics [-- --dir data --artists "Katy Perry"]

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bobornot::config::Config;
use bobornot::constants::genius::{OTHER_MAX_SONGS, ROSTER, TARGET_ARTIST_NAME, TARGET_MAX_SONGS};
use bobornot::genius::{save_artist_lyrics, GeniusClient, SongSort};

/// Collect raw lyrics for the artist roster.
#[derive(Parser, Debug)]
#[command(name = "fetch_lyrics", version, about)]
struct Args {
    /// Output directory for the per-artist files (defaults to LYRICS_DIR)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Artists to fetch, instead of the built-in roster
    #[arg(short, long, value_delimiter = ',')]
    artists: Vec<String>,

    /// Songs per artist (defaults to 50 for Bob Marley, 10 otherwise)
    #[arg(short, long)]
    max_songs: Option<usize>,

    /// Song order: popularity, title or release_date
    #[arg(short, long, default_value_t = SongSort::Popularity)]
    sort: SongSort,

    /// Extra attempts on transient failures (defaults to GENIUS_RETRIES)
    #[arg(short, long)]
    retries: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();
    let mut config = Config::load().context("Failed to load config")?;
    if let Some(retries) = args.retries {
        config.genius_retries = retries;
    }
    if !config.has_genius_token() {
        bail!("GENIUS_TOKEN is not set; create an API client at https://genius.com/api-clients");
    }

    let dir = args.dir.unwrap_or_else(|| config.lyrics_dir.clone());
    let artists: Vec<String> = if args.artists.is_empty() {
        ROSTER.iter().map(|a| (*a).to_string()).collect()
    } else {
        args.artists
    };

    tracing::info!("{} v{}: fetching {} artists into {}", config.app_name(), config.app_version(), artists.len(), dir.display());
    let client = GeniusClient::new(&config);
    let mut failures = 0usize;

    for artist in &artists {
        let max = args.max_songs.unwrap_or(if artist == TARGET_ARTIST_NAME { TARGET_MAX_SONGS } else { OTHER_MAX_SONGS });

        // One failing artist should not lose the others
        let (resolved, songs) = match client.fetch_artist_songs(artist, max, args.sort).await {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::error!("Skipping {artist}: {e}");
                failures += 1;
                continue;
            }
        };

        // File stem is the label key, so it must follow the name Genius resolved
        save_artist_lyrics(&dir, &resolved.name, &songs)
            .with_context(|| format!("Failed to save lyrics for {artist}"))?;
    }

    if failures == artists.len() {
        bail!("No artist could be fetched");
    }
    if failures > 0 {
        tracing::warn!("{failures} of {} artists failed", artists.len());
    }
    Ok(())
}
