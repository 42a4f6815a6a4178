//! Lyrics extraction from Genius song pages.
//!
//! Lyrics live in one or more `<div data-lyrics-container="true">` blocks,
//! with `<br>` for line breaks and inline markup for annotations.

use std::sync::LazyLock;

use regex::Regex;

const CONTAINER_ATTR: &str = "data-lyrics-container=\"true\"";

/// Regex matching line-break tags.
#[allow(clippy::expect_used)]
static RE_BR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>").expect("valid regex: RE_BR")
});

/// Regex matching any remaining tag.
#[allow(clippy::expect_used)]
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>").expect("valid regex: RE_TAG")
});

/// Regex matching numeric character references.
#[allow(clippy::expect_used)]
static RE_NUMERIC_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").expect("valid regex: RE_NUMERIC_ENTITY")
});

/// Extract plain-text lyrics from a song page.
///
/// Returns `None` when the page has no lyrics container (instrumentals,
/// unreleased songs).
pub fn extract_lyrics(html: &str) -> Option<String> {
    let blocks: Vec<String> = container_bodies(html)
        .into_iter()
        .map(|body| {
            let text = RE_BR.replace_all(body, "\n");
            let text = RE_TAG.replace_all(&text, "");
            decode_entities(&text)
        })
        .collect();

    (!blocks.is_empty()).then(|| blocks.join("\n"))
}

/// Inner HTML of every lyrics container, nested `div`s included.
fn container_bodies(html: &str) -> Vec<&str> {
    let mut bodies = Vec::new();
    let mut cursor = 0;

    while let Some(found) = html[cursor..].find(CONTAINER_ATTR) {
        let attr_at = cursor + found;
        let Some(open_end) = html[attr_at..].find('>').map(|i| attr_at + i + 1) else {
            break;
        };
        let close_at = matching_div_close(html, open_end).unwrap_or(html.len());
        bodies.push(&html[open_end..close_at]);
        cursor = close_at;
    }

    bodies
}

/// Offset of the `</div>` closing the `div` whose body starts at `start`.
fn matching_div_close(html: &str, start: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut pos = start;

    loop {
        let next_open = html[pos..].find("<div").map(|i| pos + i);
        let next_close = html[pos..].find("</div").map(|i| pos + i)?;

        match next_open {
            Some(open) if open < next_close => {
                depth += 1;
                pos = open + "<div".len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(next_close);
                }
                pos = next_close + "</div".len();
            }
        }
    }
}

fn decode_entities(text: &str) -> String {
    let numeric = RE_NUMERIC_ENTITY.replace_all(text, |caps: &regex::Captures<'_>| {
        let code = &caps[1];
        let value = code
            .strip_prefix('x')
            .map_or_else(|| code.parse::<u32>().ok(), |hex| u32::from_str_radix(hex, 16).ok());
        value.and_then(char::from_u32).map_or_else(|| caps[0].to_string(), String::from)
    });

    numeric
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn extracts_lines_from_container() {
        let html = r#"<html><div class="Header">1 Contributor</div>
<div data-lyrics-container="true" class="Lyrics__Container">[Verse 1]<br/>Cold ground was my bed last night<br>And rock was my pillow too</div></html>"#;
        let lyrics = extract_lyrics(html).unwrap();
        assert_eq!(lyrics, "[Verse 1]\nCold ground was my bed last night\nAnd rock was my pillow too");
    }

    #[test]
    fn nested_annotations_are_flattened() {
        let html = r#"<div data-lyrics-container="true"><a href="/1"><span>Get up, stand up</span></a><br/><div class="inline">Stand up for your rights</div><br/>Don't give up the fight</div><div>footer</div>"#;
        let lyrics = extract_lyrics(html).unwrap();
        assert_eq!(lyrics, "Get up, stand up\nStand up for your rights\nDon't give up the fight");
        assert!(!lyrics.contains("footer"));
    }

    #[test]
    fn multiple_containers_are_joined() {
        let html = r#"<div data-lyrics-container="true">First part</div><div>ad</div><div data-lyrics-container="true">Second part</div>"#;
        assert_eq!(extract_lyrics(html).unwrap(), "First part\nSecond part");
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(decode_entities("Don&#x27;t &amp; won&#39;t &quot;now&quot;"), "Don't & won't \"now\"");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("&#xZZ;"), "&#xZZ;");
    }

    #[test]
    fn page_without_lyrics() {
        assert!(extract_lyrics("<html><body>This song is an instrumental</body></html>").is_none());
    }
}
