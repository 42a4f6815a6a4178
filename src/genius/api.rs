use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

use crate::config::Config;
use crate::constants::genius::{
    API_BASE_URL, CONCURRENT_LYRICS_FETCHES, REQUEST_TIMEOUT_SECS, RETRY_BACKOFF_MS, SONGS_PER_PAGE,
};
use crate::dataset::artist_key;
use crate::error::{Error, Result};
use crate::genius::page::extract_lyrics;
use crate::genius::types::{Artist, SongRef, SongSort};
use crate::types::RawSong;

/// Client for the Genius API and song pages
///
/// Every request is retried on transient failures (network errors, 429 and
/// 5xx responses) up to the configured number of extra attempts.
#[derive(Clone)]
pub struct GeniusClient {
    token: String,
    retries: u32,
    backoff: Duration,
    client: Client,
}

impl GeniusClient {
    /// Create a new Genius client from config
    pub fn new(config: &Config) -> Self {
        Self {
            token: config.genius_token.clone(),
            retries: config.genius_retries,
            backoff: Duration::from_millis(RETRY_BACKOFF_MS),
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }

    fn ensure_configured(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(Error::config(
                "Genius client not configured",
                "Set the GENIUS_TOKEN environment variable",
            ));
        }
        Ok(())
    }

    /// Make an authenticated GET request to the API, with retries
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = format!("{API_BASE_URL}{path}");
        retry(self.retries, self.backoff, path, || async {
            let resp = self.client
                .get(&url)
                .bearer_auth(&self.token)
                .query(query)
                .send()
                .await
                .map_err(|e| Error::Network(format!("Request to {path} failed: {e}")))?;

            let status = resp.status();
            if !status.is_success() {
                return Err(Error::genius_status(
                    format!("Request to {path} returned {status}"),
                    status.as_u16(),
                ));
            }

            resp.json().await
                .map_err(|e| Error::parse(format!("Invalid JSON from {path}: {e}"), None))
        })
        .await
    }

    /// Fetch a public song page, with retries
    async fn get_page(&self, url: &str) -> Result<String> {
        retry(self.retries, self.backoff, url, || async {
            let resp = self.client
                .get(url)
                .send()
                .await
                .map_err(|e| Error::Network(format!("Request to {url} failed: {e}")))?;

            let status = resp.status();
            if !status.is_success() {
                return Err(Error::genius_status(
                    format!("Song page {url} returned {status}"),
                    status.as_u16(),
                ));
            }

            resp.text().await
                .map_err(|e| Error::Network(format!("Reading {url} failed: {e}")))
        })
        .await
    }

    /// Find the artist best matching a display name
    pub async fn search_artist(&self, name: &str) -> Result<Artist> {
        self.ensure_configured()?;
        let json = self.get_json("/search", &[("q", name.to_string())]).await?;
        parse_search_hits(&json, name)
            .ok_or_else(|| Error::genius(format!("No artist found for '{name}'")))
    }

    /// List up to `max_count` songs whose primary artist is `artist_id`
    pub async fn artist_songs(&self, artist_id: u64, max_count: usize, sort: SongSort) -> Result<Vec<SongRef>> {
        self.ensure_configured()?;
        let path = format!("/artists/{artist_id}/songs");
        let mut songs = Vec::new();
        let mut page = Some(1u64);

        while let Some(current) = page {
            if songs.len() >= max_count {
                break;
            }
            let query = [
                ("sort", sort.as_param().to_string()),
                ("per_page", SONGS_PER_PAGE.to_string()),
                ("page", current.to_string()),
            ];
            let json = self.get_json(&path, &query).await?;
            let (batch, next) = parse_songs_page(&json, artist_id)?;
            songs.extend(batch);
            page = next;
        }

        songs.truncate(max_count);
        Ok(songs)
    }

    /// Scrape the lyrics of one song, `None` if the page has none
    pub async fn song_lyrics(&self, song: &SongRef) -> Result<Option<String>> {
        let html = self.get_page(&song.url).await?;
        Ok(extract_lyrics(&html))
    }

    /// Fetch up to `max_count` songs of an artist with their raw lyrics
    ///
    /// Returns the artist Genius resolved `artist_name` to, whose name keys
    /// the songs. Songs without lyrics are skipped. Song order follows `sort`.
    pub async fn fetch_artist_songs(
        &self,
        artist_name: &str,
        max_count: usize,
        sort: SongSort,
    ) -> Result<(Artist, Vec<RawSong>)> {
        let artist = self.search_artist(artist_name).await?;
        tracing::info!("Searching songs by {} (id {})", artist.name, artist.id);

        let refs = self.artist_songs(artist.id, max_count, sort).await?;
        let fetched: Vec<(SongRef, Option<String>)> = stream::iter(refs)
            .map(|song| async move {
                let lyrics = self.song_lyrics(&song).await?;
                Ok::<_, Error>((song, lyrics))
            })
            .buffered(CONCURRENT_LYRICS_FETCHES)
            .try_collect()
            .await?;

        let songs = songs_with_lyrics(&artist, fetched);
        tracing::info!("Done. Found {} songs for {}", songs.len(), artist.name);
        Ok((artist, songs))
    }
}

/// Keep the songs whose page had lyrics, keyed by the resolved artist
fn songs_with_lyrics(artist: &Artist, fetched: Vec<(SongRef, Option<String>)>) -> Vec<RawSong> {
    let key = artist_key(&artist.name);
    fetched
        .into_iter()
        .filter_map(|(song, lyrics)| match lyrics {
            Some(lyrics) => Some(RawSong { artist: key.clone(), title: song.title, lyrics }),
            None => {
                tracing::debug!("No lyrics on page for '{}'", song.title);
                None
            }
        })
        .collect()
}

/// Run `op`, repeating it up to `retries` more times while it fails transiently
///
/// The delay before attempt `n` is `n * backoff`.
pub async fn retry<T, F, Fut>(retries: u32, backoff: Duration, what: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < retries => {
                attempt += 1;
                tracing::warn!("{what} failed ({e}), retry {attempt}/{retries}");
                tokio::time::sleep(backoff * attempt).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Pick the search hit whose primary artist matches `name`
///
/// An exact case-insensitive name match wins; otherwise the first hit's
/// primary artist is used.
fn parse_search_hits(json: &Value, name: &str) -> Option<Artist> {
    let hits = json["response"]["hits"].as_array()?;
    let artists: Vec<Artist> = hits.iter().filter_map(|hit| {
        let artist = &hit["result"]["primary_artist"];
        Some(Artist {
            id: artist["id"].as_u64()?,
            name: artist["name"].as_str()?.to_string(),
        })
    }).collect();

    let wanted = name.to_lowercase();
    artists.iter()
        .find(|a| a.name.to_lowercase() == wanted)
        .or_else(|| artists.first())
        .cloned()
}

/// Parse one page of an artist's songs and the number of the next page
fn parse_songs_page(json: &Value, artist_id: u64) -> Result<(Vec<SongRef>, Option<u64>)> {
    let response = &json["response"];
    let data = response["songs"].as_array()
        .ok_or_else(|| Error::parse("Missing 'songs' array in artist songs response", None))?;

    let songs = data.iter().filter_map(|s| {
        if s["primary_artist"]["id"].as_u64() != Some(artist_id) {
            return None;
        }
        Some(SongRef {
            id: s["id"].as_u64()?,
            title: s["title"].as_str()?.to_string(),
            url: s["url"].as_str()?.to_string(),
        })
    }).collect();

    Ok((songs, response["next_page"].as_u64()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::dataset::builder::load_artist_file;
    use crate::dataset::LabelAssigner;
    use crate::genius::store::save_artist_lyrics;
    use crate::types::Label;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn search_prefers_exact_artist_name() {
        let json = json!({"response": {"hits": [
            {"result": {"primary_artist": {"id": 1, "name": "Ziggy Marley"}}},
            {"result": {"primary_artist": {"id": 2, "name": "Bob Marley & The Wailers"}}},
        ]}});
        let artist = parse_search_hits(&json, "bob marley & the wailers").unwrap();
        assert_eq!(artist, Artist { id: 2, name: "Bob Marley & The Wailers".into() });

        let fallback = parse_search_hits(&json, "Marley").unwrap();
        assert_eq!(fallback.id, 1);
    }

    #[test]
    fn search_without_hits() {
        assert!(parse_search_hits(&json!({"response": {"hits": []}}), "Nobody").is_none());
        assert!(parse_search_hits(&json!({}), "Nobody").is_none());
    }

    #[test]
    fn songs_page_keeps_primary_artist_songs() {
        let json = json!({"response": {"next_page": 2, "songs": [
            {"id": 10, "title": "Three Little Birds", "url": "https://genius.com/a", "primary_artist": {"id": 7}},
            {"id": 11, "title": "Featured On", "url": "https://genius.com/b", "primary_artist": {"id": 8}},
        ]}});
        let (songs, next) = parse_songs_page(&json, 7).unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].title, "Three Little Birds");
        assert_eq!(next, Some(2));

        let last = json!({"response": {"next_page": null, "songs": []}});
        assert_eq!(parse_songs_page(&last, 7).unwrap().1, None);
        assert!(parse_songs_page(&json!({"response": {}}), 7).is_err());
    }

    #[test]
    fn saved_file_is_named_after_the_resolved_artist() {
        let json = json!({"response": {"hits": [
            {"result": {"primary_artist": {"id": 2, "name": "Bob Marley & The Wailers"}}},
        ]}});
        let artist = parse_search_hits(&json, "bob marley & the wailers").unwrap();
        let fetched = vec![
            (
                SongRef { id: 10, title: "Three Little Birds".into(), url: "https://genius.com/a".into() },
                Some("Don't worry about a thing".into()),
            ),
            (SongRef { id: 11, title: "Instrumental".into(), url: "https://genius.com/b".into() }, None),
        ];
        let songs = songs_with_lyrics(&artist, fetched);
        assert_eq!(songs.len(), 1);

        let dir = tempfile::tempdir().unwrap();
        let path = save_artist_lyrics(dir.path(), &artist.name, &songs).unwrap();
        assert_eq!(path.file_name().unwrap(), "Bob_Marley_&_The_Wailers.json");

        let loaded = load_artist_file(&path).unwrap();
        assert_eq!(loaded, songs);
        assert_eq!(LabelAssigner::default().assign(&loaded[0].artist), Label::Target);
    }

    #[tokio::test]
    async fn retry_recovers_from_transient_failures() {
        let calls = AtomicU32::new(0);
        let result = retry(3, Duration::ZERO, "test", || async {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(Error::genius_status("busy", 503))
            } else {
                Ok("lyrics")
            }
        })
        .await;
        assert_eq!(result.unwrap(), "lyrics");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retry_gives_up_after_bound() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = retry(3, Duration::ZERO, "test", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::Network("timed out".into()))
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn retry_does_not_repeat_permanent_failures() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = retry(3, Duration::ZERO, "test", || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::genius_status("Unauthorized", 401))
        })
        .await;
        assert!(matches!(result, Err(Error::Genius { status: Some(401), .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unconfigured_client_fails_fast() {
        let client = GeniusClient::new(&Config::default());
        let err = client.search_artist("Katy Perry").await.unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
