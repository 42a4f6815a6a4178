//! Genius data types.
//!
//! These types represent the subset of the Genius API the corpus needs.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// An artist as returned by search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    /// Genius artist id
    pub id: u64,
    /// Display name as Genius spells it
    pub name: String,
}

/// A song listed on an artist page, lyrics not yet fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRef {
    /// Genius song id
    pub id: u64,
    /// Song title, used as the key in the lyrics file
    pub title: String,
    /// Public song page holding the lyrics
    pub url: String,
}

/// Ordering of an artist's song list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SongSort {
    /// Most viewed first
    #[default]
    Popularity,
    /// Alphabetical
    Title,
    /// By release date
    ReleaseDate,
}

impl SongSort {
    /// Query parameter value understood by the API.
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::Title => "title",
            Self::ReleaseDate => "release_date",
        }
    }
}

impl fmt::Display for SongSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for SongSort {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity" => Ok(Self::Popularity),
            "title" => Ok(Self::Title),
            "release_date" => Ok(Self::ReleaseDate),
            other => Err(Error::config(
                format!("unknown song sort '{other}'"),
                "Use popularity, title or release_date",
            )),
        }
    }
}
