//! Audio conversion parameters
//!
//! `AudioConfig` replaces loose keyword arguments with an explicit,
//! validated parameter set. It can be loaded from a JSON job file and then
//! overridden field by field from the command line.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MediaError, Result};

// ============================================================================
// Constants
// ============================================================================

/// Minimum gain in dB (-96 dB = effectively silent)
pub const MIN_GAIN_DB: f32 = -96.0;

/// Maximum gain in dB (+24 dB)
pub const MAX_GAIN_DB: f32 = 24.0;

/// Lowest accepted target sample rate
pub const MIN_SAMPLE_RATE: u32 = 1000;

/// Highest accepted target sample rate
pub const MAX_SAMPLE_RATE: u32 = 192_000;

/// Highest accepted target channel count
pub const MAX_CHANNELS: u16 = 8;

// ============================================================================
// Sample Width
// ============================================================================

/// Bytes per sample in the emitted PCM stream
///
/// Serialized as the byte count (1-4). One-byte samples are stored unsigned,
/// all wider widths are signed little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum SampleWidth {
    /// 8-bit unsigned
    U8,
    /// 16-bit signed
    S16,
    /// 24-bit signed
    S24,
    /// 32-bit signed
    S32,
}

impl SampleWidth {
    /// Number of bytes per sample
    pub fn bytes(&self) -> usize {
        match self {
            SampleWidth::U8 => 1,
            SampleWidth::S16 => 2,
            SampleWidth::S24 => 3,
            SampleWidth::S32 => 4,
        }
    }

    /// Number of bits per sample
    pub fn bits(&self) -> u16 {
        self.bytes() as u16 * 8
    }

    /// Largest positive integer sample value at this width
    pub fn full_scale(&self) -> i64 {
        (1_i64 << (self.bits() - 1)) - 1
    }

    /// Create a SampleWidth from a byte count
    pub fn from_bytes(bytes: u16) -> Option<Self> {
        match bytes {
            1 => Some(SampleWidth::U8),
            2 => Some(SampleWidth::S16),
            3 => Some(SampleWidth::S24),
            4 => Some(SampleWidth::S32),
            _ => None,
        }
    }

    /// Create a SampleWidth from a bit depth
    pub fn from_bits(bits: u16) -> Option<Self> {
        if bits % 8 != 0 {
            return None;
        }
        Self::from_bytes(bits / 8)
    }
}

impl TryFrom<u16> for SampleWidth {
    type Error = MediaError;

    fn try_from(bytes: u16) -> Result<Self> {
        SampleWidth::from_bytes(bytes).ok_or(MediaError::InvalidParameter {
            param: "sample_width",
            value: bytes.to_string(),
            range: "1, 2, 3 or 4 bytes",
        })
    }
}

impl From<SampleWidth> for u16 {
    fn from(width: SampleWidth) -> u16 {
        width.bytes() as u16
    }
}

// ============================================================================
// Audio Config
// ============================================================================

/// Parameters for one audio conversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Gain applied before any other transform, in dB
    pub gain_db: f32,
    /// Target sample rate in Hz
    pub sample_rate: u32,
    /// Target channel count
    pub channel_count: u16,
    /// Target sample width
    pub sample_width: SampleWidth,
    /// Start of the kept window, in seconds
    pub start_offset_seconds: f64,
    /// Length of the kept window in seconds; negative keeps everything to the end
    pub duration_seconds: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig {
            gain_db: 0.0,
            sample_rate: 8000,
            channel_count: 1,
            sample_width: SampleWidth::U8,
            start_offset_seconds: 0.0,
            duration_seconds: 10.0,
        }
    }
}

impl AudioConfig {
    /// Load a config from a JSON job file
    ///
    /// Missing fields take their default values.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| MediaError::InputNotFound {
            path: path.display().to_string(),
            source: Some(e),
        })?;
        let config: AudioConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field against its accepted range
    pub fn validate(&self) -> Result<()> {
        if !self.gain_db.is_finite() || !(MIN_GAIN_DB..=MAX_GAIN_DB).contains(&self.gain_db) {
            return Err(MediaError::InvalidParameter {
                param: "gain_db",
                value: self.gain_db.to_string(),
                range: "-96..=24 dB",
            });
        }
        if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&self.sample_rate) {
            return Err(MediaError::InvalidParameter {
                param: "sample_rate",
                value: self.sample_rate.to_string(),
                range: "1000..=192000 Hz",
            });
        }
        if !(1..=MAX_CHANNELS).contains(&self.channel_count) {
            return Err(MediaError::InvalidParameter {
                param: "channel_count",
                value: self.channel_count.to_string(),
                range: "1..=8",
            });
        }
        if !self.start_offset_seconds.is_finite() || self.start_offset_seconds < 0.0 {
            return Err(MediaError::InvalidParameter {
                param: "start_offset_seconds",
                value: self.start_offset_seconds.to_string(),
                range: ">= 0 seconds",
            });
        }
        if !self.duration_seconds.is_finite() {
            return Err(MediaError::InvalidParameter {
                param: "duration_seconds",
                value: self.duration_seconds.to_string(),
                range: "finite seconds (negative = to end)",
            });
        }
        Ok(())
    }

    /// Start of the kept window in milliseconds
    pub fn start_ms(&self) -> u64 {
        seconds_to_ms(self.start_offset_seconds)
    }

    /// End of the kept window in milliseconds, `None` for "to end of stream"
    pub fn end_ms(&self) -> Option<u64> {
        if self.duration_seconds < 0.0 {
            None
        } else {
            Some(self.start_ms().saturating_add(seconds_to_ms(self.duration_seconds)))
        }
    }
}

/// Saturates at `u64::MAX` for offsets beyond any real stream
fn seconds_to_ms(secs: f64) -> u64 {
    (secs * 1000.0).round().max(0.0) as u64
}
