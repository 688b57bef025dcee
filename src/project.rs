//! Boundary with the authoring project: where sources come from and where
//! computed property changes go.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::audio::{Waveform, read_wav};
use crate::error::Result;
use crate::trim::TrimDecision;

pub const UNDO_GROUP_LABEL: &str = "Trim Audio File Sources";

/// An audio file source as listed by the project query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub id: String,
    #[serde(rename = "parent.id")]
    pub parent_id: String,
    #[serde(rename = "originalWavFilePath")]
    pub wav_path: PathBuf,
}

/// A source together with its decoded waveform.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    pub source_id: String,
    pub parent_id: String,
    pub waveform: Waveform,
}

/// Yields the sources of a run and decodes them on demand.
pub trait SourceProvider: Send + Sync {
    fn sources(&self) -> anyhow::Result<Vec<SourceRef>>;

    fn load(&self, source: &SourceRef) -> Result<SourceRecord>;
}

/// Accepts a whole batch of property changes as one unit.
pub trait PropertyWriter {
    fn apply(&mut self, batch: &PropertyBatch) -> anyhow::Result<()>;
}

/// Property values to set on one project object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyUpdate {
    pub object: String,
    #[serde(flatten)]
    pub properties: BTreeMap<String, f64>,
}

impl PropertyUpdate {
    pub fn new(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            properties: BTreeMap::new(),
        }
    }

    fn set(&mut self, name: &str, value: Option<f64>) {
        if let Some(value) = value {
            self.properties.insert(format!("@{name}"), value);
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.properties.get(&format!("@{name}")).copied()
    }
}

/// Split a decision into the source update and the parent update.
pub fn decision_updates(
    source_id: &str,
    parent_id: &str,
    decision: &TrimDecision,
) -> (PropertyUpdate, PropertyUpdate) {
    let mut source = PropertyUpdate::new(source_id);
    source.set("TrimBegin", decision.trim_begin);
    source.set("TrimEnd", decision.trim_end);
    source.set("FadeInDuration", Some(decision.fade_in));
    source.set("FadeOutDuration", Some(decision.fade_out));
    source.set("LoopBegin", decision.loop_begin);
    source.set("LoopEnd", decision.loop_end);

    let mut parent = PropertyUpdate::new(parent_id);
    parent.set("InitialDelay", decision.initial_delay);

    (source, parent)
}

/// Every change produced by one run, applied together under one undo label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyBatch {
    pub undo_group: String,
    pub objects: Vec<PropertyUpdate>,
}

impl PropertyBatch {
    pub fn new(objects: Vec<PropertyUpdate>) -> Self {
        Self {
            undo_group: UNDO_GROUP_LABEL.to_string(),
            objects,
        }
    }
}

/// Reads sources from a JSON manifest and decodes them from disk.
///
/// Relative WAV paths are resolved against the manifest's directory.
#[derive(Debug, Clone)]
pub struct ManifestProvider {
    path: PathBuf,
}

impl ManifestProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn resolve(&self, wav: &Path) -> PathBuf {
        match self.path.parent() {
            Some(dir) if wav.is_relative() => dir.join(wav),
            _ => wav.to_path_buf(),
        }
    }
}

impl SourceProvider for ManifestProvider {
    fn sources(&self) -> anyhow::Result<Vec<SourceRef>> {
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("reading manifest {}", self.path.display()))?;
        let sources: Vec<SourceRef> = serde_json::from_str(&data)
            .with_context(|| format!("parsing manifest {}", self.path.display()))?;
        Ok(sources)
    }

    fn load(&self, source: &SourceRef) -> Result<SourceRecord> {
        let waveform = read_wav(self.resolve(&source.wav_path))?;
        Ok(SourceRecord {
            source_id: source.id.clone(),
            parent_id: source.parent_id.clone(),
            waveform,
        })
    }
}

/// Writes the batch as one JSON document, replacing the target in a single rename.
#[derive(Debug, Clone)]
pub struct JsonBatchWriter {
    path: PathBuf,
}

impl JsonBatchWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PropertyWriter for JsonBatchWriter {
    fn apply(&mut self, batch: &PropertyBatch) -> anyhow::Result<()> {
        let data = serde_json::to_string_pretty(batch)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("moving batch into {}", self.path.display()))?;
        info!(
            "Wrote {} object updates to {}",
            batch.objects.len(),
            self.path.display()
        );
        Ok(())
    }
}
