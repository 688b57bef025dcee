use std::path::PathBuf;

use clap::Parser;

use crate::trim::{DEFAULT_FADE_SECONDS, DEFAULT_THRESHOLD_DB, TrimConfig};

/// Trim silent heads and tails off the audio file sources listed in a manifest.
#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Args {
    /// JSON list of sources: `id`, `parent.id`, `originalWavFilePath`
    #[clap(long)]
    pub manifest: PathBuf,

    /// Where the property batch is written
    #[clap(long, default_value = "trim_changes.json")]
    pub out: PathBuf,

    /// Reset trim, fade, loop and initial delay before processing
    #[clap(long)]
    pub reset_preprocess: bool,

    /// Only reset trim, fade, loop and initial delay
    #[clap(long)]
    pub reset_all: bool,

    /// Level in dB under which the head is trimmed
    #[clap(long, default_value_t = DEFAULT_THRESHOLD_DB, allow_negative_numbers = true)]
    pub threshold_begin: f64,

    /// Level in dB under which the tail is trimmed
    #[clap(long, default_value_t = DEFAULT_THRESHOLD_DB, allow_negative_numbers = true)]
    pub threshold_end: f64,

    #[clap(long)]
    pub no_trim_begin: bool,

    #[clap(long)]
    pub no_trim_end: bool,

    /// Fade-in duration in seconds
    #[clap(long, default_value_t = DEFAULT_FADE_SECONDS)]
    pub fade_begin: f64,

    /// Fade-out duration in seconds
    #[clap(long, default_value_t = DEFAULT_FADE_SECONDS)]
    pub fade_end: f64,

    /// Compensate head trimming with the parent's initial delay
    #[clap(long)]
    pub initial_delay: bool,

    /// Maximum number of sources analyzed at once
    #[clap(long)]
    pub jobs: Option<usize>,

    /// Report what would change without writing the batch
    #[clap(long)]
    pub dry_run: bool,

    #[clap(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn trim_config(&self) -> TrimConfig {
        TrimConfig {
            reset_preprocess: self.reset_preprocess,
            reset_all: self.reset_all,
            threshold_begin_db: self.threshold_begin,
            threshold_end_db: self.threshold_end,
            no_trim_begin: self.no_trim_begin,
            no_trim_end: self.no_trim_end,
            fade_begin_seconds: self.fade_begin,
            fade_end_seconds: self.fade_end,
            compensate_with_initial_delay: self.initial_delay,
        }
    }
}
