//! Silence trimming for audio file sources of an audio middleware project.
//!
//! Each source's waveform is scanned from both ends for the first frame
//! louder than a decibel threshold; the cut is snapped back to the nearest
//! zero-crossing and turned into trim, fade and initial-delay properties.

pub mod args;
pub mod audio;
pub mod buffer;
pub mod error;
pub mod pipeline;
pub mod project;
pub mod scan;
pub mod threshold;
pub mod trim;

pub use error::{Result, TrimError};
