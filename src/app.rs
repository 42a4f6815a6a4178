//! Application state and keyboard handling for the interactive page.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;

use crate::classifier::{shared_classifier, Classifier, Prediction, Verdict};
use crate::config::{clamp_threshold, Config};
use crate::constants::async_tasks::CHANNEL_BUFFER_SIZE;
use crate::constants::classifier::THRESHOLD_STEP;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::quiz::Quiz;
use crate::types::Label;

/// Messages sent back from async tasks.
#[derive(Debug)]
pub enum AppUpdate {
    /// A classification request finished.
    Classified {
        /// Text that was sent.
        text: String,
        /// Model output or failure.
        result: Result<Prediction>,
    },
}

/// Screens of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Initial splash screen.
    Splash,
    /// Lyrics text box and verdict.
    Classify,
    /// Guessing game over the dataset.
    Quiz,
}

/// Whole-page state.
pub struct App {
    /// Screen currently shown.
    pub mode: AppMode,
    /// Loaded configuration.
    pub config: Config,
    /// Lyrics typed by the user.
    pub input: String,
    /// Confidence the target label must exceed.
    pub threshold: f64,
    /// Last classified text and its prediction.
    pub last_prediction: Option<(String, Prediction)>,
    /// Guessing game over the loaded table.
    pub quiz: Quiz,
    rng: StdRng,
    /// Sender handed to spawned tasks for their results.
    pub async_task_tx: mpsc::Sender<AppUpdate>,
    async_task_rx: mpsc::Receiver<AppUpdate>,
    /// A classification request is in flight.
    pub is_loading: bool,
    /// Blocking error shown until dismissed with Esc.
    pub error_message: Option<String>,
    /// Key help overlay is open.
    pub show_help: bool,
    /// Methodology overlay is open.
    pub show_methodology: bool,
    /// The dataset load has been attempted.
    pub initialized: bool,
    should_quit: bool,
}

impl App {
    /// Create the app, loading configuration from the environment.
    pub fn new() -> Self {
        // Fall back to defaults on error
        let config = Config::load().unwrap_or_default();
        Self::with_config(config)
    }

    /// Create the app with explicit configuration.
    pub fn with_config(config: Config) -> Self {
        let (async_task_tx, async_task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        Self {
            mode: AppMode::Splash,
            threshold: config.threshold,
            config,
            input: String::new(),
            last_prediction: None,
            quiz: Quiz::default(),
            rng: StdRng::from_entropy(),
            async_task_tx,
            async_task_rx,
            is_loading: false,
            error_message: None,
            show_help: false,
            show_methodology: false,
            initialized: false,
            should_quit: false,
        }
    }

    /// Whether the main loop should exit.
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Ask the main loop to exit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Verdict for the last prediction under the current threshold.
    pub fn verdict(&self) -> Option<Verdict> {
        self.last_prediction
            .as_ref()
            .map(|(_, prediction)| Verdict::from_prediction(prediction, self.threshold))
    }

    /// Route a key press to the open overlay or the current screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        // Modals swallow everything until dismissed
        if self.error_message.is_some() {
            if key.code == KeyCode::Esc {
                self.error_message = None;
            }
            return;
        }
        if self.show_help || self.show_methodology {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::F(2)) {
                self.show_help = false;
                self.show_methodology = false;
            }
            return;
        }

        match key.code {
            KeyCode::F(1) => {
                self.show_help = true;
                return;
            }
            KeyCode::F(2) => {
                self.show_methodology = true;
                return;
            }
            KeyCode::F(10) => {
                self.quit();
                return;
            }
            KeyCode::Tab if self.mode != AppMode::Splash => {
                self.mode = match self.mode {
                    AppMode::Classify => AppMode::Quiz,
                    _ => AppMode::Classify,
                };
                return;
            }
            _ => {}
        }

        match self.mode {
            AppMode::Splash => self.handle_splash_input(),
            AppMode::Classify => self.handle_classify_input(key),
            AppMode::Quiz => self.handle_quiz_input(key),
        }
    }

    fn handle_splash_input(&mut self) {
        if !self.initialized {
            self.load_dataset();
            self.initialized = true;
        }
        self.mode = AppMode::Classify;
    }

    fn load_dataset(&mut self) {
        match Dataset::read_csv(&self.config.dataset_path) {
            Ok(dataset) => {
                tracing::info!("Loaded {} quiz rows from {}", dataset.len(), self.config.dataset_path.display());
                self.quiz = Quiz::new(dataset);
                self.quiz.next(&mut self.rng);
            }
            Err(e) => {
                self.error_message = Some(format!("Quiz unavailable: {e}"));
            }
        }
    }

    fn handle_classify_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.classify_input(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Esc => self.input.clear(),
            KeyCode::Up => self.adjust_threshold(THRESHOLD_STEP),
            KeyCode::Down => self.adjust_threshold(-THRESHOLD_STEP),
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn handle_quiz_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('b' | 'B') => {
                self.quiz.guess(Label::Target);
            }
            KeyCode::Char('n' | 'N') => {
                self.quiz.guess(Label::Other);
            }
            KeyCode::Char('r' | 'R') => {
                self.quiz.next(&mut self.rng);
            }
            KeyCode::Char('q') => self.quit(),
            KeyCode::Esc => self.mode = AppMode::Classify,
            _ => {}
        }
    }

    /// Move the threshold by `delta`, keeping it in range and on the step grid.
    pub fn adjust_threshold(&mut self, delta: f64) {
        let steps_per_unit = THRESHOLD_STEP.recip();
        let stepped = ((self.threshold + delta) * steps_per_unit).round() / steps_per_unit;
        self.threshold = clamp_threshold(stepped);
    }

    fn classify_input(&mut self) {
        let text = self.input.trim().to_string();
        if text.is_empty() || self.is_loading {
            return;
        }

        self.is_loading = true;
        let classifier = shared_classifier(&self.config);
        let tx_clone = self.async_task_tx.clone();

        tokio::spawn(async move {
            let result = classifier.classify(&text).await;
            if tx_clone.send(AppUpdate::Classified { text, result }).await.is_err() {
                tracing::debug!("App closed before classification finished");
            }
        });
    }

    /// Apply results from async tasks.
    pub fn handle_updates(&mut self) {
        match self.async_task_rx.try_recv() {
            Ok(update) => self.apply_update(update),
            Err(mpsc::error::TryRecvError::Empty | mpsc::error::TryRecvError::Disconnected) => {}
        }
    }

    fn apply_update(&mut self, update: AppUpdate) {
        match update {
            AppUpdate::Classified { text, result } => {
                self.is_loading = false;
                match result {
                    Ok(prediction) => self.last_prediction = Some((text, prediction)),
                    Err(e) => self.error_message = Some(format!("Classification failed: {e}")),
                }
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::Example;
    use std::path::PathBuf;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn test_app() -> App {
        let mut config = Config::default();
        config.dataset_path = PathBuf::from("/nonexistent/bobornot/lyrics.csv");
        App::with_config(config)
    }

    #[test]
    fn splash_reports_missing_dataset() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Classify);
        assert!(app.error_message.as_deref().unwrap().contains("Quiz unavailable"));

        press(&mut app, KeyCode::Esc);
        assert!(app.error_message.is_none());
    }

    #[test]
    fn typing_edits_the_input() {
        let mut app = test_app();
        app.mode = AppMode::Classify;
        for c in "Jah!".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input, "Jah");
        press(&mut app, KeyCode::Esc);
        assert!(app.input.is_empty());
    }

    #[test]
    fn threshold_stays_in_range() {
        let mut app = test_app();
        app.mode = AppMode::Classify;
        press(&mut app, KeyCode::Up);
        assert!((app.threshold - 0.61).abs() < 1e-9);
        for _ in 0..100 {
            press(&mut app, KeyCode::Down);
        }
        assert!((app.threshold - 0.5).abs() < 1e-9);
        for _ in 0..100 {
            press(&mut app, KeyCode::Up);
        }
        assert!((app.threshold - 1.0).abs() < 1e-9);
    }

    #[test]
    fn stepped_threshold_prints_cleanly() {
        let mut app = test_app();
        app.mode = AppMode::Classify;
        for _ in 0..3 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.threshold.to_string(), "0.57");

        app.apply_update(AppUpdate::Classified {
            text: "Get up, stand up".into(),
            result: Ok(Prediction { label: "Bob".into(), score: 0.55 }),
        });
        assert_eq!(app.verdict().unwrap().headline(), "Not Bob - Bob's score < 0.57 (0.55)");
    }

    #[test]
    fn verdict_follows_threshold() {
        let mut app = test_app();
        app.apply_update(AppUpdate::Classified {
            text: "One good thing about music".into(),
            result: Ok(Prediction { label: "Bob".into(), score: 0.7 }),
        });
        assert!(app.verdict().unwrap().is_target());
        app.threshold = 0.8;
        assert!(!app.verdict().unwrap().is_target());
    }

    #[test]
    fn classification_errors_are_shown() {
        let mut app = test_app();
        app.is_loading = true;
        app.apply_update(AppUpdate::Classified {
            text: "anything".into(),
            result: Err(crate::error::Error::classifier("Model is currently loading", Some(503))),
        });
        assert!(!app.is_loading);
        assert!(app.error_message.is_some());
    }

    #[test]
    fn quiz_keys_score_guesses() {
        let mut app = test_app();
        app.quiz = Quiz::new(Dataset::new(vec![Example::new(Label::Other, "Shape of you, yeah ")]));
        app.mode = AppMode::Quiz;
        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.quiz.score(), (1, 1));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.mode, AppMode::Classify);
    }
}
