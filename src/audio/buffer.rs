//! Audio buffers
//!
//! Two transient representations flow through a conversion:
//! - [`PcmClip`]: planar 32-bit float samples, produced by decoding and
//!   mutated by gain, resample and channel remix.
//! - [`PcmFrames`]: interleaved integer samples at a fixed [`SampleWidth`],
//!   produced by requantizing a clip and then sliced in time.

use crate::audio::config::SampleWidth;
use crate::error::{MediaError, Result};

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert decibels to linear amplitude
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

// ============================================================================
// Float Clip
// ============================================================================

/// Decoded audio as non-interleaved 32-bit float samples
///
/// Each channel is a separate `Vec<f32>` normalized to -1.0..1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmClip {
    /// Sample data: outer Vec is channels, inner Vec is samples
    pub samples: Vec<Vec<f32>>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl PcmClip {
    /// Create an audio clip from interleaved sample data
    ///
    /// # Arguments
    /// * `interleaved` - Interleaved sample data (L, R, L, R, ... for stereo)
    /// * `channels` - Number of channels in the stream
    /// * `sample_rate` - Sample rate in Hz
    pub fn from_interleaved(interleaved: &[f32], channels: usize, sample_rate: u32) -> Result<Self> {
        if channels == 0 {
            return Err(MediaError::InvalidParameter {
                param: "channels",
                value: "0".to_string(),
                range: ">= 1",
            });
        }

        let frames = interleaved.len() / channels;
        let mut samples = vec![Vec::with_capacity(frames); channels];

        // A trailing partial frame is dropped
        for frame in interleaved.chunks_exact(channels) {
            for (ch, &sample) in frame.iter().enumerate() {
                samples[ch].push(sample);
            }
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Get the number of channels
    #[inline]
    pub fn channels(&self) -> usize {
        self.samples.len()
    }

    /// Get the number of frames (samples per channel)
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.samples.first().map_or(0, Vec::len)
    }

    /// Duration of the clip in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / self.sample_rate as f64
    }
}

// ============================================================================
// Integer Frames
// ============================================================================

/// Requantized audio as interleaved integer samples
///
/// Samples are signed values in the range of `sample_width`. One-byte samples
/// are kept signed here (-128..=127) and only biased to unsigned when written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmFrames {
    /// Interleaved samples
    pub samples: Vec<i32>,
    /// Number of channels
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Width of every sample
    pub sample_width: SampleWidth,
}

impl PcmFrames {
    /// Get the number of frames
    #[inline]
    pub fn frame_count(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    /// Size of the frames as raw PCM bytes
    pub fn byte_len(&self) -> usize {
        self.frame_count() * self.channels as usize * self.sample_width.bytes()
    }

    /// Frame index for a position in milliseconds, clamped to the stream
    pub fn frame_at_ms(&self, ms: u64) -> usize {
        let frame = ms as u128 * self.sample_rate as u128 / 1000;
        frame.min(self.frame_count() as u128) as usize
    }

    /// Keep only the frames in `[start, end)`
    pub fn retain_frames(&mut self, start: usize, end: usize) {
        let channels = self.channels as usize;
        let end = end.min(self.frame_count());
        let start = start.min(end);
        self.samples.truncate(end * channels);
        self.samples.drain(..start * channels);
    }
}
