use std::path::Path;

use hound::{SampleFormat as WavFormat, WavReader};

use crate::buffer::{AudioBuffer, Samples};
use crate::error::{Result, TrimError};

/// Decoded waveform plus the rate it was recorded at.
#[derive(Debug, Clone)]
pub struct Waveform {
    pub sample_rate: u32,
    pub buffer: AudioBuffer,
}

/// Read a 16/32-bit integer or 32-bit float WAV file into memory.
pub fn read_wav(path: impl AsRef<Path>) -> Result<Waveform> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();

    let samples = match (spec.sample_format, spec.bits_per_sample) {
        (WavFormat::Int, 16) => {
            Samples::Int16(reader.into_samples::<i16>().collect::<std::result::Result<_, _>>()?)
        }
        (WavFormat::Int, 32) => {
            Samples::Int32(reader.into_samples::<i32>().collect::<std::result::Result<_, _>>()?)
        }
        (WavFormat::Float, 32) => {
            Samples::Float32(reader.into_samples::<f32>().collect::<std::result::Result<_, _>>()?)
        }
        (format, bits) => {
            return Err(TrimError::UnsupportedFormat {
                format: format!("{bits}-bit {format:?}"),
            });
        }
    };

    let buffer = AudioBuffer::new(samples, spec.channels as usize)?;
    Ok(Waveform {
        sample_rate: spec.sample_rate,
        buffer,
    })
}
