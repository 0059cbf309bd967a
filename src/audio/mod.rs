//! Audio-to-array conversion
//!
//! Turns a compressed audio clip into a C source fragment holding its raw PCM
//! bytes:
//! - Decode (symphonia)
//! - Gain, resample, channel remix, requantize, time-slice
//! - WAV intermediate (hound)
//! - C array emission

pub mod buffer;
pub mod config;
pub mod decode;
pub mod emit;
pub mod transform;
pub mod wav;

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

pub use buffer::{PcmClip, PcmFrames};
pub use config::{AudioConfig, SampleWidth};
pub use decode::decode_file;
pub use emit::render_c_array;
pub use wav::{read_wav, write_wav, WavPcm};

use crate::error::{MediaError, Result};
use crate::symbol::validate_identifier;

/// Where a conversion writes its files
#[derive(Debug, Clone)]
pub struct AudioOutputs {
    /// Final C source fragment
    pub source: PathBuf,
    /// Intermediate WAV file (overwritten on every run)
    pub intermediate: PathBuf,
    /// Prefix of every generated C symbol
    pub symbol: String,
}

impl Default for AudioOutputs {
    fn default() -> Self {
        AudioOutputs {
            source: PathBuf::from("wave.c"),
            intermediate: PathBuf::from("_temp_.wav"),
            symbol: "wave".to_string(),
        }
    }
}

/// Summary of one conversion run
#[derive(Debug, Clone, PartialEq)]
pub struct AudioReport {
    /// Path of the generated C source
    pub output: PathBuf,
    /// Frames in the emitted array
    pub frame_count: usize,
    /// Length of the emitted array in bytes
    pub byte_len: usize,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bits per sample
    pub bits: u16,
    /// Number of channels
    pub channels: u16,
}

/// Decode, transform and slice a source clip according to `config`
pub fn load_clip(source: &Path, config: &AudioConfig) -> Result<PcmFrames> {
    config.validate()?;

    let mut clip = decode_file(source)?;
    transform::apply_gain(&mut clip, config.gain_db);
    transform::resample(&mut clip, config.sample_rate);
    transform::remix_channels(&mut clip, config.channel_count as usize)?;

    let mut frames = transform::requantize(&clip, config.sample_width);
    transform::slice(&mut frames, config.start_ms(), config.end_ms());

    Ok(frames)
}

/// Run a full conversion: source audio → WAV intermediate → C source
pub fn convert_audio(source: &Path, config: &AudioConfig, outputs: &AudioOutputs) -> Result<AudioReport> {
    validate_identifier(&outputs.symbol)?;

    let frames = load_clip(source, config)?;
    write_wav(&frames, &outputs.intermediate)?;

    let pcm = read_wav(&outputs.intermediate)?;
    info!(
        "PCM: {} ch, {} bit, {} Hz, {} frames",
        pcm.channels,
        pcm.sample_width.bits(),
        pcm.sample_rate,
        pcm.frame_count
    );

    let text = render_c_array(&pcm, &outputs.symbol);
    fs::write(&outputs.source, text).map_err(|e| MediaError::write_failure(&outputs.source, e))?;
    info!("Wrote {} ({} bytes of PCM)", outputs.source.display(), pcm.data.len());

    Ok(AudioReport {
        output: outputs.source.clone(),
        frame_count: pcm.frame_count,
        byte_len: pcm.data.len(),
        sample_rate: pcm.sample_rate,
        bits: pcm.sample_width.bits(),
        channels: pcm.channels,
    })
}
