//! Core type definitions shared by the corpus, dataset and UI layers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::dataset::{OTHER_LABEL, TARGET_LABEL};
use crate::error::Error;

/// One song as fetched from the corpus source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSong {
    /// Artist key (display name with spaces replaced by underscores).
    pub artist: String,
    /// Song title.
    pub title: String,
    /// Raw lyrics text, boilerplate included.
    pub lyrics: String,
}

/// A cleaned line (or section) of lyrics attributed to one song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Artist key the fragment came from.
    pub artist: String,
    /// Title of the song the fragment came from.
    pub title: String,
    /// Cleaned text, always longer than the noise threshold.
    pub text: String,
}

/// Binary label distinguishing the artist of interest from everyone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Written or performed by the target artist.
    #[serde(rename = "Bob")]
    Target,
    /// Any other artist.
    #[serde(rename = "Not_bob")]
    Other,
}

impl Label {
    /// Returns both labels, target first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Target, Self::Other]
    }

    /// Name used in the dataset table.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Target => TARGET_LABEL,
            Self::Other => OTHER_LABEL,
        }
    }

    /// Human-readable name for the UI.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Target => "Bob",
            Self::Other => "Not Bob",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Label {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            TARGET_LABEL => Ok(Self::Target),
            OTHER_LABEL => Ok(Self::Other),
            other => Err(Error::Dataset(format!("unknown label '{other}'"))),
        }
    }
}

/// A fragment tagged with its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledFragment {
    /// The underlying fragment.
    pub fragment: Fragment,
    /// Label derived from the fragment's artist.
    pub label: Label,
}

/// A finished, length-bounded training and display unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Label shared by every concatenated fragment.
    #[serde(rename = "labels")]
    pub label: Label,
    /// Concatenated fragments, each followed by a space.
    #[serde(rename = "lyrics")]
    pub text: String,
}

impl Example {
    /// Create an example.
    pub fn new(label: Label, text: impl Into<String>) -> Self {
        Self { label, text: text.into() }
    }

    /// Length of the text in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn label_names_round_trip_through_from_str() {
        for label in Label::all() {
            assert_eq!(label.name().parse::<Label>().unwrap(), *label);
        }
        assert!("Marley".parse::<Label>().is_err());
    }

    #[test]
    fn example_length_counts_characters() {
        let example = Example::new(Label::Other, "été ");
        assert_eq!(example.len(), 4);
        assert!(!example.is_empty());
    }
}
