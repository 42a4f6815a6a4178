//! Assemble the labelled training table from the per-artist lyrics files.
//!
//! Usage: cargo run --bin build_dataset [-- --dir data --out data/lyrics.csv]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bobornot::config::Config;
use bobornot::dataset::{artist_key, Aggregation, DatasetBuilder};
use bobornot::lyrics::SplitMode;

/// Clean, label and concatenate lyrics into a CSV table.
#[derive(Parser, Debug)]
#[command(name = "build_dataset", version, about)]
struct Args {
    /// Directory of per-artist lyrics files (defaults to LYRICS_DIR)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Output CSV path (defaults to DATASET_PATH)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Maximum example length in characters (defaults to MAX_LEN)
    #[arg(short, long)]
    max_len: Option<usize>,

    /// Reproduce the historical concatenation, which drops overflowing lines
    #[arg(long)]
    legacy: bool,

    /// Split songs on section markers instead of lines
    #[arg(long)]
    sections: bool,

    /// Keep at most this many examples per label (defaults to MAX_PER_LABEL)
    #[arg(long)]
    max_per_label: Option<usize>,

    /// Artist key labelled as the target (defaults to TARGET_ARTIST)
    #[arg(short, long)]
    target: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();
    let mut config = Config::load().context("Failed to load config")?;
    if let Some(dir) = args.dir {
        config.lyrics_dir = dir;
    }
    if let Some(max_len) = args.max_len {
        config.max_len = max_len;
    }
    if let Some(target) = &args.target {
        config.target_artist = artist_key(target);
    }
    if args.max_per_label.is_some() {
        config.max_per_label = args.max_per_label;
    }

    let mut builder = DatasetBuilder::from_config(&config);
    if args.legacy {
        builder = builder.aggregation(Aggregation::Legacy);
    }
    if args.sections {
        builder = builder.split_mode(SplitMode::Sections);
    }

    let dataset = builder.build().context("Failed to build dataset")?;

    let out = args.out.unwrap_or_else(|| config.dataset_path.clone());
    dataset
        .write_csv(&out)
        .with_context(|| format!("Failed to write {}", out.display()))?;

    for (label, count) in dataset.label_counts() {
        tracing::info!("{label}: {count} examples");
    }
    tracing::info!("Wrote {} examples to {}", dataset.len(), out.display());
    Ok(())
}
