//! Lyrics cleaning and fragment splitting.
//!
//! Lyrics scraped from Genius carry a contributor header
//! (`3 Contributors Intense Lyrics`), section markers (`[Chorus]`) and page
//! boilerplate (`Embed`, `You might also like`). Cleaning removes those and
//! splits what is left into fragments.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::cleaning::{BOILERPLATE, MAX_HEADER_SPAN, MAX_SECTION_MARKER_LEN, MIN_FRAGMENT_LEN};

/// Regex matching the `<N> Contributors ... Lyrics` header.
#[allow(clippy::expect_used)]
static RE_CONTRIBUTORS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\d{{1,4}} Contributors.{{0,{MAX_HEADER_SPAN}}}Lyrics"))
        .expect("valid regex: RE_CONTRIBUTORS")
});

/// Regex matching bracketed section markers like `[Verse 1]`.
#[allow(clippy::expect_used)]
static RE_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\[.{{0,{MAX_SECTION_MARKER_LEN}}}\]"))
        .expect("valid regex: RE_SECTION")
});

/// How cleaned lyrics are cut into fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitMode {
    /// One fragment per line; section markers are removed.
    #[default]
    Lines,
    /// One fragment per verse/chorus, cut on the section markers.
    Sections,
}

/// Clean one song's raw lyrics and split it into fragments.
///
/// Fragments of five characters or fewer are dropped. Source order is kept,
/// since later concatenation depends on it.
pub fn clean_lyrics(raw: &str, mode: SplitMode) -> Vec<String> {
    let mut cleaned = RE_CONTRIBUTORS.replace_all(raw, "").into_owned();
    if mode == SplitMode::Lines {
        cleaned = RE_SECTION.replace_all(&cleaned, "").into_owned();
    }
    for phrase in BOILERPLATE {
        cleaned = cleaned.replace(phrase, "");
    }

    match mode {
        SplitMode::Lines => keep_fragments(cleaned.split('\n')),
        SplitMode::Sections => keep_fragments(RE_SECTION.split(&cleaned).map(str::trim)),
    }
}

fn keep_fragments<'a>(pieces: impl Iterator<Item = &'a str>) -> Vec<String> {
    pieces
        .filter(|piece| piece.chars().count() > MIN_FRAGMENT_LEN)
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    const SONG: &str = "112 ContributorsTranslationsEspañolOne Love Lyrics[Chorus]\n\
One love, one heart\nLet's get together and feel all right\n[Verse 1]\n\
Let them all pass all their dirty remarks\nYou might also like\nThere is one question I'd really love to ask\n42Embed";

    #[test]
    fn strips_contributor_header_on_one_line() {
        let lines = clean_lyrics("3 Contributors Intense Lyrics\nLine one here\nEmbed", SplitMode::Lines);
        assert_eq!(lines, vec!["Line one here"]);
    }

    #[test]
    fn header_never_survives() {
        let raw = "15 Contributors Redemption Song Lyrics\nOld pirates, yes, they rob I";
        for mode in [SplitMode::Lines, SplitMode::Sections] {
            let fragments = clean_lyrics(raw, mode);
            assert!(fragments.iter().all(|f| !f.contains("Contributors")));
        }
    }

    #[test]
    fn removes_markers_and_boilerplate() {
        let lines = clean_lyrics(SONG, SplitMode::Lines);
        assert!(lines.iter().all(|l| !l.contains('[') && !l.contains("Embed")));
        assert!(lines.iter().all(|l| !l.contains("You might also like")));
        assert!(lines.contains(&"One love, one heart".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("There is one question I'd really love to ask"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn short_lines_are_noise() {
        let lines = clean_lyrics("Oh\nYeah!\nsix ch\nlonger line", SplitMode::Lines);
        assert_eq!(lines, vec!["six ch", "longer line"]);
        assert!(lines.iter().all(|l| l.chars().count() > MIN_FRAGMENT_LEN));
    }

    #[test]
    fn length_is_measured_in_characters() {
        // five characters, more than five bytes
        assert!(clean_lyrics("élèvé", SplitMode::Lines).is_empty());
        assert_eq!(clean_lyrics("élèvés", SplitMode::Lines), vec!["élèvés"]);
    }

    #[test]
    fn order_is_preserved() {
        let lines = clean_lyrics("first line\nsecond line\nthird line", SplitMode::Lines);
        assert_eq!(lines, vec!["first line", "second line", "third line"]);
    }

    #[test]
    fn cleaning_is_idempotent_on_clean_text() {
        let once = clean_lyrics(SONG, SplitMode::Lines);
        let twice = clean_lyrics(&once.join("\n"), SplitMode::Lines);
        assert_eq!(once, twice);
    }

    #[test]
    fn oversized_markers_are_left_alone() {
        let marker = format!("[{}]", "x".repeat(60));
        let lines = clean_lyrics(&marker, SplitMode::Lines);
        assert_eq!(lines, vec![marker]);
    }

    #[test]
    fn sections_mode_splits_on_markers() {
        let sections = clean_lyrics(SONG, SplitMode::Sections);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0], "One love, one heart\nLet's get together and feel all right");
        assert!(sections[1].starts_with("Let them all pass"));
        assert!(sections[1].contains("\nThere is one question"));
        assert!(sections.iter().all(|s| s.trim() == s));
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(clean_lyrics("", SplitMode::Lines).is_empty());
        assert!(clean_lyrics("", SplitMode::Sections).is_empty());
    }
}
