//! "Is it Bob Marley's lyrics?" guessing game over the dataset table.

use rand::Rng;

use crate::dataset::Dataset;
use crate::types::{Example, Label};

/// Outcome of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// The guess matched the row's label.
    Correct,
    /// The guess did not match.
    Wrong,
}

impl Answer {
    /// Message shown to the player.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Correct => "Correct!",
            Self::Wrong => "Wrong Answer!",
        }
    }
}

/// Game state: the table, the row on display and the last outcome.
#[derive(Debug, Default)]
pub struct Quiz {
    dataset: Dataset,
    current: Option<usize>,
    last_answer: Option<Answer>,
    correct: u32,
    played: u32,
}

impl Quiz {
    /// Start a game over `dataset` with no row drawn yet.
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset, ..Self::default() }
    }

    /// The table the game draws from.
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Draw new lyrics. Returns `false` when the table is empty.
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        self.current = self.dataset.sample_index(rng);
        self.last_answer = None;
        self.current.is_some()
    }

    /// Row currently shown, drawing one first if none is.
    pub fn current_or_draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&Example> {
        if self.current.is_none() {
            self.next(rng);
        }
        self.current()
    }

    /// Row currently shown.
    pub fn current(&self) -> Option<&Example> {
        self.current.and_then(|i| self.dataset.get(i))
    }

    /// Score a guess against the row on display.
    ///
    /// Guessing `Other` is correct for every non-target row.
    pub fn guess(&mut self, guess: Label) -> Option<Answer> {
        let actual = self.current()?.label;
        let answer = if guess == actual { Answer::Correct } else { Answer::Wrong };
        self.played += 1;
        if answer == Answer::Correct {
            self.correct += 1;
        }
        self.last_answer = Some(answer);
        Some(answer)
    }

    /// Outcome of the latest guess on the current row.
    pub const fn last_answer(&self) -> Option<Answer> {
        self.last_answer
    }

    /// Correct guesses and total guesses so far.
    pub const fn score(&self) -> (u32, u32) {
        (self.correct, self.played)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn single_row(label: Label) -> Quiz {
        Quiz::new(Dataset::new(vec![Example::new(label, "Exodus, movement of Jah people ")]))
    }

    #[test]
    fn empty_table_has_nothing_to_show() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut quiz = Quiz::default();
        assert!(!quiz.next(&mut rng));
        assert!(quiz.current_or_draw(&mut rng).is_none());
        assert_eq!(quiz.guess(Label::Target), None);
    }

    #[test]
    fn guesses_are_scored() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut quiz = single_row(Label::Target);
        assert!(quiz.current_or_draw(&mut rng).is_some());

        assert_eq!(quiz.guess(Label::Target), Some(Answer::Correct));
        assert_eq!(quiz.guess(Label::Other), Some(Answer::Wrong));
        assert_eq!(quiz.last_answer(), Some(Answer::Wrong));
        assert_eq!(quiz.score(), (1, 2));
    }

    #[test]
    fn new_lyrics_clear_the_last_answer() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut quiz = single_row(Label::Other);
        quiz.next(&mut rng);
        assert_eq!(quiz.guess(Label::Other).map(Answer::message), Some("Correct!"));
        quiz.next(&mut rng);
        assert_eq!(quiz.last_answer(), None);
    }
}
