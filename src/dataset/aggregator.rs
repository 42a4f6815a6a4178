//! Greedy fragment concatenation.
//!
//! Consecutive fragments of one label are joined, each followed by a space,
//! into examples no longer than `max_len` characters.

use crate::constants::dataset::DEFAULT_MAX_LEN;

/// Concatenation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    /// Every fragment ends up in exactly one example.
    ///
    /// A fragment that does not fit starts the next example, and the last
    /// partial example is flushed. Examples never exceed `max_len`, separator
    /// included, unless a single fragment is already longer than that.
    #[default]
    Greedy,
    /// Reproduces the published corpus.
    ///
    /// The fit test ignores the separator, the fragment that overflows is
    /// dropped and the last partial example is never emitted.
    Legacy,
}

/// Joins same-label fragments into bounded examples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregator {
    max_len: usize,
    mode: Aggregation,
}

impl Aggregator {
    /// Create an aggregator.
    pub const fn new(max_len: usize, mode: Aggregation) -> Self {
        Self { max_len, mode }
    }

    /// Maximum example length, in characters.
    pub const fn max_len(&self) -> usize {
        self.max_len
    }

    /// Active concatenation policy.
    pub const fn mode(&self) -> Aggregation {
        self.mode
    }

    /// Concatenate fragments, in order, into examples.
    pub fn aggregate<S: AsRef<str>>(&self, fragments: &[S]) -> Vec<String> {
        match self.mode {
            Aggregation::Greedy => self.greedy(fragments),
            Aggregation::Legacy => self.legacy(fragments),
        }
    }

    fn greedy<S: AsRef<str>>(&self, fragments: &[S]) -> Vec<String> {
        let mut examples = Vec::new();
        let mut acc = Accumulator::default();

        for fragment in fragments {
            let fragment = fragment.as_ref();
            if acc.len + char_len(fragment) + 1 > self.max_len && !acc.is_empty() {
                examples.push(acc.take());
            }
            acc.push(fragment);
        }

        if !acc.is_empty() {
            examples.push(acc.take());
        }
        examples
    }

    fn legacy<S: AsRef<str>>(&self, fragments: &[S]) -> Vec<String> {
        let mut examples = Vec::new();
        let mut acc = Accumulator::default();

        for fragment in fragments {
            let fragment = fragment.as_ref();
            if acc.len + char_len(fragment) <= self.max_len {
                acc.push(fragment);
            } else {
                examples.push(acc.take());
            }
        }

        examples
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEN, Aggregation::default())
    }
}

/// Running concatenation with its length in characters.
#[derive(Debug, Default)]
struct Accumulator {
    text: String,
    len: usize,
}

impl Accumulator {
    fn push(&mut self, fragment: &str) {
        self.text.push_str(fragment);
        self.text.push(' ');
        self.len += char_len(fragment) + 1;
    }

    fn take(&mut self) -> String {
        self.len = 0;
        std::mem::take(&mut self.text)
    }

    const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn fragment(len: usize) -> String {
        "a".repeat(len)
    }

    #[test]
    fn single_fragment_is_flushed_with_separator() {
        let examples = Aggregator::new(100, Aggregation::Greedy).aggregate(&["Line one here"]);
        assert_eq!(examples, vec!["Line one here "]);
    }

    #[test]
    fn overflow_starts_a_new_example() {
        let fragments = [fragment(60), fragment(60)];
        let examples = Aggregator::new(100, Aggregation::Greedy).aggregate(&fragments);
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0], format!("{} ", fragment(60)));
        assert_eq!(examples[1], format!("{} ", fragment(60)));
    }

    #[test]
    fn legacy_drops_overflow_and_trailing() {
        let fragments = [fragment(60), fragment(60)];
        let examples = Aggregator::new(100, Aggregation::Legacy).aggregate(&fragments);
        assert_eq!(examples, vec![format!("{} ", fragment(60))]);

        let trailing_only = Aggregator::new(100, Aggregation::Legacy).aggregate(&["Line one here"]);
        assert!(trailing_only.is_empty());
    }

    #[test]
    fn legacy_emits_empty_accumulator_on_oversized_fragment() {
        let examples = Aggregator::new(10, Aggregation::Legacy).aggregate(&[fragment(20)]);
        assert_eq!(examples, vec![String::new()]);
    }

    #[test]
    fn greedy_examples_respect_bound() {
        let lengths = [7, 30, 12, 55, 9, 40, 40, 18, 6, 33, 21, 70, 8];
        let fragments: Vec<String> = lengths.iter().map(|&n| fragment(n)).collect();
        let max_len = 100;
        let examples = Aggregator::new(max_len, Aggregation::Greedy).aggregate(&fragments);

        assert!(examples.iter().all(|e| e.chars().count() <= max_len));
        let total: usize = examples.iter().map(|e| e.chars().count()).sum();
        let expected: usize = lengths.iter().map(|n| n + 1).sum();
        assert_eq!(total, expected);
    }

    #[test]
    fn exact_fit_includes_separator() {
        // 49 + 1 + 49 + 1 == 100
        let fragments = [fragment(49), fragment(49), fragment(5)];
        let examples = Aggregator::new(100, Aggregation::Greedy).aggregate(&fragments);
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].chars().count(), 100);
    }

    #[test]
    fn oversized_fragment_stands_alone() {
        let fragments = [fragment(10), fragment(150), fragment(10)];
        let examples = Aggregator::new(100, Aggregation::Greedy).aggregate(&fragments);
        assert_eq!(examples.len(), 3);
        assert_eq!(examples[1].chars().count(), 151);
    }

    #[test]
    fn order_is_preserved() {
        let examples = Aggregator::new(20, Aggregation::Greedy).aggregate(&["first one", "second", "third one"]);
        assert_eq!(examples, vec!["first one second ", "third one "]);
    }

    #[test]
    fn lengths_count_characters() {
        let examples = Aggregator::new(8, Aggregation::Greedy).aggregate(&["ééé", "ààà"]);
        assert_eq!(examples, vec!["ééé ààà "]);
    }

    #[test]
    fn no_fragments_no_examples() {
        let empty: [&str; 0] = [];
        assert!(Aggregator::default().aggregate(&empty).is_empty());
    }
}
