//! The assembled dataset table.
//!
//! Stored on disk as CSV with a `labels,lyrics` header, the format read by
//! the quiz and by the external training job.

use std::path::Path;

use rand::Rng;

use crate::constants::dataset::{LABEL_COLUMN, LYRICS_COLUMN};
use crate::error::{Error, Result};
use crate::types::{Example, Label};

/// Ordered, read-many collection of examples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    examples: Vec<Example>,
}

impl Dataset {
    /// Wrap already-built examples.
    pub fn new(examples: Vec<Example>) -> Self {
        Self { examples }
    }

    /// All examples, in table order.
    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Row at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Example> {
        self.examples.get(index)
    }

    /// Number of rows per label, labels in order of first appearance.
    pub fn label_counts(&self) -> Vec<(Label, usize)> {
        let mut counts: Vec<(Label, usize)> = Vec::new();
        for example in &self.examples {
            match counts.iter_mut().find(|(label, _)| *label == example.label) {
                Some((_, n)) => *n += 1,
                None => counts.push((example.label, 1)),
            }
        }
        counts
    }

    /// Keep only the first `cap` rows of each label, preserving order.
    pub fn cap_per_label(&mut self, cap: usize) {
        let mut seen: Vec<(Label, usize)> = Vec::new();
        self.examples.retain(|example| {
            let slot = match seen.iter().position(|(label, _)| *label == example.label) {
                Some(i) => i,
                None => {
                    seen.push((example.label, 0));
                    seen.len() - 1
                }
            };
            seen[slot].1 += 1;
            seen[slot].1 <= cap
        });
    }

    /// Index of a uniformly random row, or `None` for an empty table.
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        (!self.examples.is_empty()).then(|| rng.gen_range(0..self.examples.len()))
    }

    /// A uniformly random row, or `None` for an empty table.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Example> {
        self.sample_index(rng).and_then(|i| self.examples.get(i))
    }

    /// Write the table as CSV, creating parent directories as needed.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(|e| Error::io(e, parent.to_path_buf()))?;
        }

        let file = fs_err::File::create(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        let mut writer = csv::Writer::from_writer(file);
        for example in &self.examples {
            writer.serialize(example)?;
        }
        writer.flush().map_err(|e| Error::io(e, path.to_path_buf()))?;

        tracing::info!("Wrote {} rows to {}", self.examples.len(), path.display());
        Ok(())
    }

    /// Read a table previously written by [`Dataset::write_csv`].
    pub fn read_csv(path: &Path) -> Result<Self> {
        let file = fs_err::File::open(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| Error::parse(format!("unreadable header: {e}"), path.to_path_buf()))?;
        for column in [LABEL_COLUMN, LYRICS_COLUMN] {
            if !headers.iter().any(|h| h == column) {
                return Err(Error::parse(format!("missing '{column}' column"), path.to_path_buf()));
            }
        }

        let examples = reader
            .deserialize::<Example>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::parse(format!("invalid dataset row: {e}"), path.to_path_buf()))?;
        Ok(Self { examples })
    }
}
