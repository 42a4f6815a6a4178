//! Dataset assembly from a directory of per-artist lyrics files.
//!
//! Each `<artist_key>.json` file holds an object mapping song titles to raw
//! lyrics. Every song is cleaned into fragments, every fragment is labelled,
//! and each label's fragments are concatenated into examples.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde_json::{Map, Value};
use walkdir::WalkDir;

use crate::config::Config;
use crate::dataset::aggregator::{Aggregation, Aggregator};
use crate::dataset::label::LabelAssigner;
use crate::dataset::table::Dataset;
use crate::error::{Error, Result};
use crate::lyrics::{clean_lyrics, SplitMode};
use crate::types::{Example, Fragment, Label, LabeledFragment, RawSong};

/// Builds a [`Dataset`] from a lyrics directory.
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    lyrics_dir: PathBuf,
    assigner: LabelAssigner,
    aggregator: Aggregator,
    split_mode: SplitMode,
    max_per_label: Option<usize>,
}

impl DatasetBuilder {
    /// Create a builder with default settings for the given directory.
    pub fn new(lyrics_dir: impl Into<PathBuf>) -> Self {
        Self {
            lyrics_dir: lyrics_dir.into(),
            assigner: LabelAssigner::default(),
            aggregator: Aggregator::default(),
            split_mode: SplitMode::Lines,
            max_per_label: None,
        }
    }

    /// Create a builder from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.lyrics_dir)
            .assigner(LabelAssigner::new(config.target_artist.clone()))
            .max_len(config.max_len)
            .max_per_label(config.max_per_label)
    }

    /// Set the maximum example length, in characters.
    #[must_use]
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.aggregator = Aggregator::new(max_len, self.aggregator.mode());
        self
    }

    /// Set the concatenation policy.
    #[must_use]
    pub fn aggregation(mut self, mode: Aggregation) -> Self {
        self.aggregator = Aggregator::new(self.aggregator.max_len(), mode);
        self
    }

    /// Set the label assigner.
    #[must_use]
    pub fn assigner(mut self, assigner: LabelAssigner) -> Self {
        self.assigner = assigner;
        self
    }

    /// Set how songs are cut into fragments.
    #[must_use]
    pub fn split_mode(mut self, mode: SplitMode) -> Self {
        self.split_mode = mode;
        self
    }

    /// Keep at most `cap` examples per label, if set.
    #[must_use]
    pub fn max_per_label(mut self, cap: Option<usize>) -> Self {
        self.max_per_label = cap;
        self
    }

    /// Read, clean, label and concatenate the whole corpus.
    ///
    /// Any unreadable or malformed file aborts the build.
    pub fn build(&self) -> Result<Dataset> {
        let start = Instant::now();

        let songs = load_corpus(&self.lyrics_dir)?;
        let fragments = self.fragments(&songs);
        let labeled: Vec<LabeledFragment> = fragments
            .into_iter()
            .map(|f| self.assigner.label(f))
            .collect();

        let mut examples = Vec::new();
        for (label, texts) in group_by_label(&labeled) {
            examples.extend(
                self.aggregator
                    .aggregate(texts.as_slice())
                    .into_iter()
                    .map(|text| Example::new(label, text)),
            );
        }

        let mut dataset = Dataset::new(examples);
        if let Some(cap) = self.max_per_label {
            dataset.cap_per_label(cap);
        }

        tracing::info!(
            "Built {} examples from {} songs ({} fragments) in {:?}",
            dataset.len(),
            songs.len(),
            labeled.len(),
            start.elapsed()
        );
        Ok(dataset)
    }

    /// Clean every song into fragments, in corpus order.
    pub fn fragments(&self, songs: &[RawSong]) -> Vec<Fragment> {
        songs
            .iter()
            .flat_map(|song| {
                clean_lyrics(&song.lyrics, self.split_mode)
                    .into_iter()
                    .map(move |text| Fragment {
                        artist: song.artist.clone(),
                        title: song.title.clone(),
                        text,
                    })
            })
            .collect()
    }
}

/// Group fragment texts by label, labels in order of first appearance.
fn group_by_label(labeled: &[LabeledFragment]) -> Vec<(Label, Vec<&str>)> {
    let mut groups: Vec<(Label, Vec<&str>)> = Vec::new();
    for item in labeled {
        let text = item.fragment.text.as_str();
        match groups.iter_mut().find(|(label, _)| *label == item.label) {
            Some((_, texts)) => texts.push(text),
            None => groups.push((item.label, vec![text])),
        }
    }
    groups
}

/// Load every `*.json` file directly inside `dir`, sorted by file name.
pub fn load_corpus(dir: &Path) -> Result<Vec<RawSong>> {
    if !dir.is_dir() {
        return Err(Error::io(
            io::Error::new(io::ErrorKind::NotFound, "lyrics directory not found"),
            dir.to_path_buf(),
        ));
    }

    let mut songs = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf);
            Error::io(io::Error::from(e), path)
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }
        let artist_songs = load_artist_file(path)?;
        tracing::debug!("Loaded {} songs from {}", artist_songs.len(), path.display());
        songs.extend(artist_songs);
    }
    Ok(songs)
}

/// Load one `<artist_key>.json` file. The artist key is the file stem.
pub fn load_artist_file(path: &Path) -> Result<Vec<RawSong>> {
    let artist = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::parse("file name is not valid UTF-8", path.to_path_buf()))?
        .to_string();

    let contents = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    let titles: Map<String, Value> = serde_json::from_str(&contents)
        .map_err(|e| Error::parse(format!("invalid lyrics JSON: {e}"), path.to_path_buf()))?;

    titles
        .into_iter()
        .map(|(title, lyrics)| match lyrics {
            Value::String(lyrics) => Ok(RawSong { artist: artist.clone(), title, lyrics }),
            other => Err(Error::parse(
                format!("lyrics for '{title}' must be a string, found {other}"),
                path.to_path_buf(),
            )),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn artist_key_comes_from_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "The_Beatles.json", r#"{"Let It Be": "When I find myself"}"#);
        let songs = load_artist_file(&dir.path().join("The_Beatles.json")).unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].artist, "The_Beatles");
        assert_eq!(songs[0].title, "Let It Be");
    }

    #[test]
    fn titles_keep_file_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Katy_Perry.json", r#"{"Roar": "a", "Firework": "b", "Hot n Cold": "c"}"#);
        let songs = load_artist_file(&dir.path().join("Katy_Perry.json")).unwrap();
        let titles: Vec<_> = songs.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Roar", "Firework", "Hot n Cold"]);
    }

    #[test]
    fn non_string_lyrics_are_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Bruno_Mars.json", r#"{"Grenade": null}"#);
        let err = load_artist_file(&dir.path().join("Bruno_Mars.json")).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn other_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "notes.txt", "not lyrics");
        write(dir.path(), "lyrics.csv", "labels,lyrics\n");
        assert!(load_corpus(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn labels_group_in_first_appearance_order() {
        let assigner = LabelAssigner::default();
        let labeled: Vec<_> = [("Ed_Sheeran", "one"), ("Bob_Marley_&_The_Wailers", "two"), ("Ed_Sheeran", "three")]
            .into_iter()
            .map(|(artist, text)| {
                assigner.label(Fragment { artist: artist.into(), title: "t".into(), text: text.into() })
            })
            .collect();
        let groups = group_by_label(&labeled);
        assert_eq!(groups, vec![(Label::Other, vec!["one", "three"]), (Label::Target, vec!["two"])]);
    }

    #[test]
    fn sections_mode_cuts_on_markers() {
        let song = RawSong {
            artist: "Bob_Marley_&_The_Wailers".into(),
            title: "Jamming".into(),
            lyrics: "[Chorus]\nWe're jamming\nI wanna jam it with you\n[Verse 1]\nNo bullet can stop us now".into(),
        };
        let builder = DatasetBuilder::new("unused").split_mode(SplitMode::Sections);
        let fragments = builder.fragments(std::slice::from_ref(&song));
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "We're jamming\nI wanna jam it with you");

        let lines = DatasetBuilder::new("unused").fragments(&[song]);
        assert_eq!(lines.len(), 3);
    }
}
