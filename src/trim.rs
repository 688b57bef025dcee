//! Per-source trim, fade and initial-delay decisions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::AudioBuffer;
use crate::error::{Result, TrimError};
use crate::scan::{Direction, find_boundary};
use crate::threshold::db_to_linear;

pub const DEFAULT_THRESHOLD_DB: f64 = -54.0;
pub const DEFAULT_FADE_SECONDS: f64 = 0.004;
/// Loop marker value the authoring tool reads as "no loop".
pub const LOOP_UNSET: f64 = -0.001;

/// Options shared by every source in one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimConfig {
    pub reset_preprocess: bool,
    pub reset_all: bool,
    pub threshold_begin_db: f64,
    pub threshold_end_db: f64,
    pub no_trim_begin: bool,
    pub no_trim_end: bool,
    pub fade_begin_seconds: f64,
    pub fade_end_seconds: f64,
    pub compensate_with_initial_delay: bool,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            reset_preprocess: false,
            reset_all: false,
            threshold_begin_db: DEFAULT_THRESHOLD_DB,
            threshold_end_db: DEFAULT_THRESHOLD_DB,
            no_trim_begin: false,
            no_trim_end: false,
            fade_begin_seconds: DEFAULT_FADE_SECONDS,
            fade_end_seconds: DEFAULT_FADE_SECONDS,
            compensate_with_initial_delay: false,
        }
    }
}

/// Property values computed for one source and its parent.
///
/// `None` means "leave the current value alone".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrimDecision {
    pub trim_begin: Option<f64>,
    pub trim_end: Option<f64>,
    pub fade_in: f64,
    pub fade_out: f64,
    pub loop_begin: Option<f64>,
    pub loop_end: Option<f64>,
    pub initial_delay: Option<f64>,
}

impl TrimDecision {
    /// Identity values for a source lasting `duration` seconds.
    pub fn reset(duration: f64) -> Self {
        Self {
            trim_begin: Some(0.0),
            trim_end: Some(duration),
            fade_in: 0.0,
            fade_out: 0.0,
            loop_begin: Some(LOOP_UNSET),
            loop_end: Some(LOOP_UNSET),
            initial_delay: Some(0.0),
        }
    }
}

/// A validated [`TrimConfig`] with its thresholds converted to linear amplitude.
#[derive(Debug, Clone)]
pub struct TrimPolicy {
    config: TrimConfig,
    threshold_begin: f64,
    threshold_end: f64,
}

impl TrimPolicy {
    pub fn new(config: TrimConfig) -> Result<Self> {
        let threshold_begin = linear_threshold("threshold_begin", config.threshold_begin_db)?;
        let threshold_end = linear_threshold("threshold_end", config.threshold_end_db)?;
        Ok(Self {
            config,
            threshold_begin,
            threshold_end,
        })
    }

    /// Decide trim, fade and delay values for one decoded source.
    pub fn decide(&self, buffer: &AudioBuffer, sample_rate: u32) -> Result<TrimDecision> {
        let frames = buffer.frame_count();
        if frames == 0 {
            return Err(TrimError::invalid_buffer("buffer holds no frames"));
        }
        if sample_rate == 0 {
            return Err(TrimError::invalid_buffer("sample rate is zero"));
        }

        let rate = sample_rate as f64;
        let config = &self.config;
        let mut decision = TrimDecision {
            trim_begin: None,
            trim_end: None,
            fade_in: 0.0,
            fade_out: 0.0,
            loop_begin: None,
            loop_end: None,
            initial_delay: None,
        };

        if config.reset_preprocess || config.reset_all {
            decision = TrimDecision::reset(frames as f64 / rate);
            if config.reset_all {
                return Ok(decision);
            }
        }

        let last = frames - 1;
        let begin = find_boundary(buffer, 0, last, self.threshold_begin, Direction::Forward);
        let end = find_boundary(buffer, last, 0, self.threshold_end, Direction::Reverse);
        debug!(frames, begin, end, "found trim boundaries");

        if !config.no_trim_begin && begin > 0 {
            decision.trim_begin = Some(begin as f64 / rate);
        }
        if !config.no_trim_end && end < last {
            decision.trim_end = Some(end as f64 / rate);
        }
        decision.fade_in = config.fade_begin_seconds;
        decision.fade_out = config.fade_end_seconds;
        if config.compensate_with_initial_delay {
            decision.initial_delay = Some(begin as f64 / rate);
        }

        Ok(decision)
    }
}

fn linear_threshold(name: &'static str, db: f64) -> Result<f64> {
    if !db.is_finite() {
        return Err(TrimError::ThresholdOutOfRange { name, value: db });
    }
    Ok(db_to_linear(db))
}
