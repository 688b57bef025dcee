//! Batch orchestration: validate the run, analyze every source, hand the
//! collected changes to the writer in one go.

use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::error::TrimError;
use crate::project::{
    PropertyBatch, PropertyUpdate, PropertyWriter, SourceProvider, SourceRef, decision_updates,
};
use crate::trim::{TrimConfig, TrimPolicy};

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Upper bound on sources analyzed at once.
    pub jobs: usize,
    /// Compute and report, but leave the writer untouched.
    pub dry_run: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            jobs: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            dry_run: false,
        }
    }
}

/// A source left out of the batch and why.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedSource {
    pub source_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub batch: PropertyBatch,
    pub processed: usize,
    pub skipped: Vec<SkippedSource>,
    /// Whether the writer was handed the batch.
    pub applied: bool,
}

type SourceResult = Result<(PropertyUpdate, PropertyUpdate), TrimError>;

/// Validate the run-wide options before any source is touched.
pub fn validate(config: TrimConfig) -> anyhow::Result<TrimPolicy> {
    for (name, value) in [
        ("fade_begin", config.fade_begin_seconds),
        ("fade_end", config.fade_end_seconds),
    ] {
        if !value.is_finite() || value < 0.0 {
            anyhow::bail!("fade `{name}` must be a non-negative number of seconds, got {value}");
        }
    }
    match TrimPolicy::new(config) {
        Ok(policy) => Ok(policy),
        Err(e) if e.is_run_fatal() => anyhow::bail!("run configuration rejected: {e}"),
        Err(e) => Err(e.into()),
    }
}

fn process_source(
    provider: &dyn SourceProvider,
    policy: &TrimPolicy,
    source: &SourceRef,
) -> SourceResult {
    let record = provider.load(source)?;
    let wave = &record.waveform;
    let decision = policy.decide(&wave.buffer, wave.sample_rate)?;
    debug!(source = %record.source_id, ?decision, "decided");
    Ok(decision_updates(
        &record.source_id,
        &record.parent_id,
        &decision,
    ))
}

/// Analyze every source the provider lists and apply the result as one batch.
///
/// Sources that fail to decode or analyze are skipped and reported; a bad
/// configuration aborts before any source is read, and a run-fatal error
/// raised by any source aborts before the writer is called.
pub async fn run_batch<P, W>(
    provider: Arc<P>,
    writer: &mut W,
    config: TrimConfig,
    options: &RunOptions,
) -> anyhow::Result<BatchReport>
where
    P: SourceProvider + 'static,
    W: PropertyWriter,
{
    let policy = validate(config)?;
    let sources = provider.sources()?;
    info!(
        "Analyzing {} sources with up to {} jobs",
        sources.len(),
        options.jobs
    );

    let permits = Arc::new(Semaphore::new(options.jobs.max(1)));
    let mut tasks = JoinSet::new();
    for (index, source) in sources.into_iter().enumerate() {
        let permit = permits.clone().acquire_owned().await?;
        let provider = provider.clone();
        let policy = policy.clone();
        tasks.spawn_blocking(move || {
            let _permit = permit;
            let result = process_source(provider.as_ref(), &policy, &source);
            (index, source.id, result)
        });
    }

    let mut outcomes: Vec<(usize, String, SourceResult)> = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        outcomes.push(joined.context("source analysis task failed")?);
    }
    outcomes.sort_by_key(|(index, _, _)| *index);

    let mut objects = Vec::new();
    let mut skipped = Vec::new();
    for (_, source_id, result) in outcomes {
        match result {
            Ok((source, parent)) => {
                objects.push(source);
                objects.push(parent);
            }
            Err(e) if e.is_run_fatal() => {
                anyhow::bail!("source {source_id} failed the whole run: {e}");
            }
            Err(e) => {
                warn!("Skipping source {}: {}", source_id, e);
                skipped.push(SkippedSource {
                    source_id,
                    reason: e.to_string(),
                });
            }
        }
    }

    let processed = objects.len() / 2;
    let batch = PropertyBatch::new(objects);
    let applied = !options.dry_run && !batch.objects.is_empty();
    if applied {
        writer.apply(&batch)?;
    } else if options.dry_run {
        info!("Dry run: {} sources analyzed, nothing applied", processed);
    } else {
        warn!("No source could be processed; nothing to apply");
    }

    Ok(BatchReport {
        batch,
        processed,
        skipped,
        applied,
    })
}
