//! WAV intermediate
//!
//! The requantized frames are written to a standard PCM WAV file, which is
//! both a debugging artifact (it can be auditioned in any player) and the
//! source of the raw bytes emitted into the C array.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::debug;

use crate::audio::buffer::PcmFrames;
use crate::audio::config::SampleWidth;
use crate::error::{MediaError, Result};

/// Raw PCM data read back from a WAV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavPcm {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Width of every sample
    pub sample_width: SampleWidth,
    /// Number of frames
    pub frame_count: usize,
    /// Data chunk bytes, exactly as stored in the file
    pub data: Vec<u8>,
}

impl WavPcm {
    /// Bytes per frame (all channels)
    pub fn frame_bytes(&self) -> usize {
        self.channels as usize * self.sample_width.bytes()
    }
}

/// Write frames to a PCM WAV file, overwriting any existing file
pub fn write_wav(frames: &PcmFrames, path: &Path) -> Result<()> {
    let spec = WavSpec {
        channels: frames.channels,
        sample_rate: frames.sample_rate,
        bits_per_sample: frames.sample_width.bits(),
        sample_format: SampleFormat::Int,
    };

    let mut writer =
        WavWriter::create(path, spec).map_err(|e| MediaError::write_failure(path, e))?;

    // Write samples based on width
    for &sample in &frames.samples {
        let written = match frames.sample_width {
            SampleWidth::U8 => writer.write_sample(sample as i8),
            SampleWidth::S16 => writer.write_sample(sample as i16),
            SampleWidth::S24 | SampleWidth::S32 => writer.write_sample(sample),
        };
        written.map_err(|e| MediaError::write_failure(path, e))?;
    }

    writer
        .finalize()
        .map_err(|e| MediaError::write_failure(path, e))?;

    debug!(
        "Wrote {} frames to {} ({} bit)",
        frames.frame_count(),
        path.display(),
        frames.sample_width.bits()
    );
    Ok(())
}

/// Read a PCM WAV file back as raw little-endian data bytes
///
/// 8-bit samples are returned unsigned, as stored on disk. Wider samples are
/// returned as signed little-endian bytes.
pub fn read_wav(path: &Path) -> Result<WavPcm> {
    let mut reader = WavReader::open(path).map_err(|e| MediaError::DecodeFailure {
        path: path.display().to_string(),
        reason: format!("Failed to open WAV file: {}", e),
        source: Some(Box::new(e)),
    })?;

    let spec = reader.spec();
    let sample_width = match (spec.sample_format, SampleWidth::from_bits(spec.bits_per_sample)) {
        (SampleFormat::Int, Some(width)) => width,
        _ => {
            return Err(MediaError::DecodeFailure {
                path: path.display().to_string(),
                reason: format!(
                    "{}-bit {:?} samples are not integer PCM",
                    spec.bits_per_sample, spec.sample_format
                ),
                source: None,
            })
        }
    };

    let mut data = Vec::with_capacity(reader.len() as usize * sample_width.bytes());
    for sample in reader.samples::<i32>() {
        let sample = sample.map_err(|e| MediaError::DecodeFailure {
            path: path.display().to_string(),
            reason: format!("Failed to read samples: {}", e),
            source: Some(Box::new(e)),
        })?;
        push_sample_bytes(&mut data, sample, sample_width);
    }

    let frame_bytes = spec.channels as usize * sample_width.bytes();
    Ok(WavPcm {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        sample_width,
        frame_count: data.len() / frame_bytes.max(1),
        data,
    })
}

/// Append the on-disk byte representation of one sample
fn push_sample_bytes(data: &mut Vec<u8>, sample: i32, width: SampleWidth) {
    match width {
        // 8-bit WAV is unsigned with a 128 bias
        SampleWidth::U8 => data.push((sample + 128) as u8),
        SampleWidth::S16 => data.extend_from_slice(&(sample as i16).to_le_bytes()),
        SampleWidth::S24 => data.extend_from_slice(&sample.to_le_bytes()[..3]),
        SampleWidth::S32 => data.extend_from_slice(&sample.to_le_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn frames(samples: Vec<i32>, channels: u16, width: SampleWidth) -> PcmFrames {
        PcmFrames {
            samples,
            channels,
            sample_rate: 8000,
            sample_width: width,
        }
    }

    #[test]
    fn test_u8_bytes_are_biased_unsigned() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("u8.wav");

        write_wav(&frames(vec![-128, -1, 0, 127], 1, SampleWidth::U8), &path).unwrap();
        let pcm = read_wav(&path).unwrap();

        assert_eq!(pcm.sample_width, SampleWidth::U8);
        assert_eq!(pcm.data, vec![0, 127, 128, 255]);
        assert_eq!(pcm.frame_count, 4);
    }

    #[test]
    fn test_s16_bytes_little_endian() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s16.wav");

        write_wav(&frames(vec![1, -2], 2, SampleWidth::S16), &path).unwrap();
        let pcm = read_wav(&path).unwrap();

        assert_eq!(pcm.channels, 2);
        assert_eq!(pcm.frame_count, 1);
        assert_eq!(pcm.data, vec![0x01, 0x00, 0xFE, 0xFF]);
    }

    #[test]
    fn test_s24_and_s32_lengths() {
        let dir = tempdir().unwrap();

        let path24 = dir.path().join("s24.wav");
        write_wav(&frames(vec![-8_388_608, 8_388_607, 0], 1, SampleWidth::S24), &path24).unwrap();
        let pcm24 = read_wav(&path24).unwrap();
        assert_eq!(pcm24.data.len(), 9);
        assert_eq!(&pcm24.data[..3], &[0x00, 0x00, 0x80]);

        let path32 = dir.path().join("s32.wav");
        write_wav(&frames(vec![i32::MIN, i32::MAX], 2, SampleWidth::S32), &path32).unwrap();
        let pcm32 = read_wav(&path32).unwrap();
        assert_eq!(pcm32.data.len(), 8);
        assert_eq!(pcm32.frame_bytes(), 8);
    }

    #[test]
    fn test_write_failure_names_path() {
        let path = Path::new("/nonexistent/dir/_temp_.wav");
        match write_wav(&frames(vec![0], 1, SampleWidth::U8), path) {
            Err(MediaError::WriteFailure { path, .. }) => assert!(path.contains("_temp_.wav")),
            other => panic!("Expected WriteFailure, got: {:?}", other),
        }
    }

    #[test]
    fn test_read_float_wav_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("float.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        writer.write_sample(0.5_f32).unwrap();
        writer.finalize().unwrap();

        assert!(matches!(read_wav(&path), Err(MediaError::DecodeFailure { .. })));
    }
}
