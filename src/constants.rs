//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Lyrics cleaning constants.
pub mod cleaning {
    /// Fragments this short or shorter are discarded as noise.
    pub const MIN_FRAGMENT_LEN: usize = 5;

    /// Maximum characters allowed between the contributor count and `Lyrics`.
    pub const MAX_HEADER_SPAN: usize = 100;

    /// Maximum characters allowed inside a section marker such as `[Chorus]`.
    pub const MAX_SECTION_MARKER_LEN: usize = 50;

    /// Boilerplate phrases removed verbatim from scraped lyrics.
    pub const BOILERPLATE: &[&str] = &["Embed", "You might also like"];
}

/// Dataset assembly constants.
pub mod dataset {
    /// Default maximum example length, in characters.
    pub const DEFAULT_MAX_LEN: usize = 100;

    /// Artist key (file stem) whose lyrics are labelled as the target.
    pub const TARGET_ARTIST_KEY: &str = "Bob_Marley_&_The_Wailers";

    /// Label name written for target-artist rows.
    pub const TARGET_LABEL: &str = "Bob";

    /// Label name written for every other artist.
    pub const OTHER_LABEL: &str = "Not_bob";

    /// CSV header for the label column.
    pub const LABEL_COLUMN: &str = "labels";

    /// CSV header for the lyrics column.
    pub const LYRICS_COLUMN: &str = "lyrics";

    /// Default directory holding one JSON file per artist.
    pub const DEFAULT_LYRICS_DIR: &str = "data";

    /// Default location of the assembled table.
    pub const DEFAULT_DATASET_PATH: &str = "data/lyrics.csv";
}

/// Genius corpus source constants.
pub mod genius {
    /// Base URL of the Genius REST API.
    pub const API_BASE_URL: &str = "https://api.genius.com";

    /// Default number of extra attempts for transient failures.
    pub const DEFAULT_RETRIES: u32 = 3;

    /// Delay added per attempt when backing off, in milliseconds.
    pub const RETRY_BACKOFF_MS: u64 = 500;

    /// Request timeout, in seconds.
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Songs requested per page of the artist songs endpoint.
    pub const SONGS_PER_PAGE: usize = 50;

    /// Lyrics pages fetched concurrently for one artist.
    pub const CONCURRENT_LYRICS_FETCHES: usize = 4;

    /// Songs collected for the target artist.
    pub const TARGET_MAX_SONGS: usize = 50;

    /// Songs collected for every other artist.
    pub const OTHER_MAX_SONGS: usize = 10;

    /// Artists scraped to build the corpus.
    pub const ROSTER: &[&str] = &[
        "Ed Sheeran",
        "Bob Marley & The Wailers",
        "Elvis Presley",
        "John Legend",
        "Bruno Mars",
        "Michael Jackson",
        "The Beatles",
        "Katy Perry",
    ];

    /// Display name of the target artist as Genius lists it.
    pub const TARGET_ARTIST_NAME: &str = "Bob Marley & The Wailers";
}

/// Classification constants.
pub mod classifier {
    /// Hosted model used for predictions.
    pub const DEFAULT_MODEL_ID: &str = "MathNcl/Bob_or_not_Bob";

    /// Hosted inference endpoint; the model id is appended.
    pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";

    /// Default confidence the target label must exceed.
    pub const DEFAULT_THRESHOLD: f64 = 0.6;

    /// Lowest selectable threshold.
    pub const MIN_THRESHOLD: f64 = 0.5;

    /// Highest selectable threshold.
    pub const MAX_THRESHOLD: f64 = 1.0;

    /// Threshold adjustment per key press.
    pub const THRESHOLD_STEP: f64 = 0.01;

    /// Request timeout, in seconds.
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for async task communication.
    pub const CHANNEL_BUFFER_SIZE: usize = 10;
}

/// UI layout constants.
pub mod ui {
    /// Height of the lyrics input box, borders included.
    pub const INPUT_HEIGHT: u16 = 3;
}
