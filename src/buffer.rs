//! In-memory PCM buffers and per-frame sample normalization.

use crate::error::{Result, TrimError};

/// Encoding of the raw samples held by an [`AudioBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    Int16,
    Int32,
    Float32,
}

impl SampleFormat {
    /// Value a raw sample is divided by to land in roughly [-1, 1].
    pub fn divisor(self) -> f64 {
        match self {
            SampleFormat::Int16 => i16::MAX as f64,
            SampleFormat::Int32 => i32::MAX as f64,
            SampleFormat::Float32 => 1.0,
        }
    }
}

/// Interleaved raw samples, tagged by their format.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Float32(Vec<f32>),
}

impl Samples {
    pub fn format(&self) -> SampleFormat {
        match self {
            Samples::Int16(_) => SampleFormat::Int16,
            Samples::Int32(_) => SampleFormat::Int32,
            Samples::Float32(_) => SampleFormat::Float32,
        }
    }

    fn len(&self) -> usize {
        match self {
            Samples::Int16(s) => s.len(),
            Samples::Int32(s) => s.len(),
            Samples::Float32(s) => s.len(),
        }
    }

    fn raw(&self, index: usize) -> f64 {
        match self {
            Samples::Int16(s) => s[index] as f64,
            Samples::Int32(s) => s[index] as f64,
            Samples::Float32(s) => s[index] as f64,
        }
    }
}

/// Scale a raw sample value into the unit range for `format`.
pub fn normalize(raw: f64, format: SampleFormat) -> f64 {
    raw / format.divisor()
}

/// Decoded waveform addressed by frame (one value per channel).
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Samples,
    channels: usize,
}

impl AudioBuffer {
    /// Wrap interleaved samples. A trailing partial frame is ignored.
    pub fn new(samples: Samples, channels: usize) -> Result<Self> {
        if channels == 0 {
            return Err(TrimError::invalid_buffer("channel count is zero"));
        }
        Ok(Self { samples, channels })
    }

    pub fn mono(samples: Samples) -> Self {
        Self {
            samples,
            channels: 1,
        }
    }

    pub fn format(&self) -> SampleFormat {
        self.samples.format()
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels
    }

    /// Signed normalized value of the loudest channel in `frame`.
    ///
    /// Ties keep the lowest channel. Panics if `frame` is out of range.
    pub fn frame_value(&self, frame: usize) -> f64 {
        let format = self.format();
        let base = frame * self.channels;
        let mut dominant = normalize(self.samples.raw(base), format);
        for channel in 1..self.channels {
            let value = normalize(self.samples.raw(base + channel), format);
            if value.abs() > dominant.abs() {
                dominant = value;
            }
        }
        dominant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_scale_normalizes_to_unity() {
        assert!((normalize(i16::MAX as f64, SampleFormat::Int16) - 1.0).abs() < 1e-12);
        assert!((normalize(i32::MAX as f64, SampleFormat::Int32) - 1.0).abs() < 1e-12);
        assert_eq!(normalize(1.0, SampleFormat::Float32), 1.0);
        for format in [SampleFormat::Int16, SampleFormat::Int32, SampleFormat::Float32] {
            assert_eq!(normalize(0.0, format), 0.0);
        }
    }

    #[test]
    fn loudest_channel_keeps_its_sign() {
        let buffer = AudioBuffer::new(Samples::Int16(vec![100, -20000, 0, 5]), 2).unwrap();
        assert_eq!(buffer.frame_count(), 2);
        assert!((buffer.frame_value(0) + 20000.0 / 32767.0).abs() < 1e-12);
        assert!((buffer.frame_value(1) - 5.0 / 32767.0).abs() < 1e-12);
    }

    #[test]
    fn partial_trailing_frame_is_dropped() {
        let buffer = AudioBuffer::new(Samples::Float32(vec![0.1, 0.2, 0.3]), 2).unwrap();
        assert_eq!(buffer.frame_count(), 1);
    }

    #[test]
    fn zero_channels_rejected() {
        let err = AudioBuffer::new(Samples::Int32(vec![1, 2]), 0).unwrap_err();
        assert!(matches!(err, TrimError::InvalidBuffer { .. }));
    }
}
