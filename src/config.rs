//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::{classifier, dataset, genius};
use crate::error::Result;

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// `Genius` API access token
    pub genius_token: String,
    /// Extra attempts for transient `Genius` failures
    pub genius_retries: u32,
    /// Token for the hosted inference endpoint, if any
    pub hf_token: Option<String>,
    /// Model queried for predictions
    pub model_id: String,
    /// Base URL of the inference endpoint
    pub inference_url: String,
    /// Directory holding one lyrics JSON file per artist
    pub lyrics_dir: PathBuf,
    /// Location of the assembled dataset table
    pub dataset_path: PathBuf,
    /// Maximum example length, in characters
    pub max_len: usize,
    /// Artist key labelled as the target
    pub target_artist: String,
    /// Confidence the target label must exceed
    pub threshold: f64,
    /// Optional cap on examples kept per label
    pub max_per_label: Option<usize>,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            genius_token: String::new(),
            genius_retries: genius::DEFAULT_RETRIES,
            hf_token: None,
            model_id: classifier::DEFAULT_MODEL_ID.to_string(),
            inference_url: classifier::DEFAULT_INFERENCE_URL.to_string(),
            lyrics_dir: PathBuf::from(dataset::DEFAULT_LYRICS_DIR),
            dataset_path: PathBuf::from(dataset::DEFAULT_DATASET_PATH),
            max_len: dataset::DEFAULT_MAX_LEN,
            target_artist: dataset::TARGET_ARTIST_KEY.to_string(),
            threshold: classifier::DEFAULT_THRESHOLD,
            max_per_label: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(token) = env::var("GENIUS_TOKEN") {
            config.genius_token = token;
        }
        if let Some(retries) = parse_var("GENIUS_RETRIES") {
            config.genius_retries = retries;
        }

        config.hf_token = env::var("HF_TOKEN").ok().filter(|t| !t.is_empty());
        if let Ok(model) = env::var("MODEL_ID") {
            config.model_id = model;
        }
        if let Ok(url) = env::var("INFERENCE_URL") {
            config.inference_url = url.trim_end_matches('/').to_string();
        }

        if let Ok(dir) = env::var("LYRICS_DIR") {
            config.lyrics_dir = expand_path(&dir);
        }
        if let Ok(path) = env::var("DATASET_PATH") {
            config.dataset_path = expand_path(&path);
        }
        if let Some(max_len) = parse_var::<usize>("MAX_LEN").filter(|&n| n > 0) {
            config.max_len = max_len;
        }
        if let Ok(target) = env::var("TARGET_ARTIST") {
            config.target_artist = crate::dataset::artist_key(&target);
        }
        if let Some(threshold) = parse_var("THRESHOLD") {
            config.threshold = clamp_threshold(threshold);
        }
        config.max_per_label = parse_var("MAX_PER_LABEL");

        Ok(config)
    }

    /// Check if `Genius` is configured
    pub fn has_genius_token(&self) -> bool {
        !self.genius_token.is_empty()
    }
}

/// Keep a threshold inside the selectable range.
pub fn clamp_threshold(value: f64) -> f64 {
    if value.is_nan() {
        return classifier::DEFAULT_THRESHOLD;
    }
    value.clamp(classifier::MIN_THRESHOLD, classifier::MAX_THRESHOLD)
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).to_string())
}
