/// Errors raised while analyzing a single source or validating a run.
#[derive(Debug, thiserror::Error)]
pub enum TrimError {
    /// Buffer is empty or its sample rate is unusable.
    #[error("invalid buffer: {reason}")]
    InvalidBuffer { reason: String },

    /// Sample encoding other than 16-bit int, 32-bit int or 32-bit float.
    #[error("unsupported sample format: {format}")]
    UnsupportedFormat { format: String },

    /// A decibel threshold that is NaN or infinite.
    #[error("threshold `{name}` out of range: got {value} dB")]
    ThresholdOutOfRange { name: &'static str, value: f64 },

    /// The waveform file could not be decoded.
    #[error(transparent)]
    Decode(#[from] hound::Error),
}

impl TrimError {
    pub(crate) fn invalid_buffer(reason: impl Into<String>) -> Self {
        TrimError::InvalidBuffer {
            reason: reason.into(),
        }
    }

    /// Thresholds are shared by every source, so a bad one stops the whole run.
    pub fn is_run_fatal(&self) -> bool {
        matches!(self, TrimError::ThresholdOutOfRange { .. })
    }
}

pub type Result<T> = std::result::Result<T, TrimError>;
