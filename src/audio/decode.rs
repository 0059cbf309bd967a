//! Audio decoding using Symphonia
//!
//! Any container/codec enabled in symphonia's feature set is accepted
//! (MP3, WAV, FLAC, OGG Vorbis, AAC/MP4). The first decodable track is
//! decoded in full into a [`PcmClip`].

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, info, warn};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::audio::buffer::PcmClip;
use crate::error::{MediaError, Result};

/// Decode an audio file to a float clip
///
/// # Errors
/// * `InputNotFound` - If the file does not exist or cannot be opened
/// * `DecodeFailure` - If the format is not recognized, there is no audio
///   track, or the stream is unreadable
pub fn decode_file(path: &Path) -> Result<PcmClip> {
    info!("Decoding {}", path.display());

    let file = File::open(path).map_err(|e| MediaError::InputNotFound {
        path: path.display().to_string(),
        source: Some(e),
    })?;

    let decode_failure = |reason: &str, e: SymphoniaError| MediaError::DecodeFailure {
        path: path.display().to_string(),
        reason: reason.to_string(),
        source: Some(Box::new(e)),
    };

    let mss = MediaSourceStream::new(Box::new(file), Default::default());
    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| decode_failure("unrecognized format", e))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| MediaError::DecodeFailure {
            path: path.display().to_string(),
            reason: "no audio track".to_string(),
            source: None,
        })?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);
    let mut channels = track.codec_params.channels.map_or(0, |c| c.count());

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| decode_failure("unsupported codec", e))?;

    let mut interleaved: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(decode_failure("unreadable stream", e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate = spec.rate;
                channels = spec.channels.count();

                let mut buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buf.copy_interleaved_ref(decoded);
                interleaved.extend_from_slice(buf.samples());
            }
            Err(SymphoniaError::DecodeError(reason)) => {
                warn!("Skipping corrupt packet in {}: {}", path.display(), reason);
            }
            Err(e) => return Err(decode_failure("decoder error", e)),
        }
    }

    if channels == 0 || sample_rate == 0 {
        return Err(MediaError::DecodeFailure {
            path: path.display().to_string(),
            reason: "stream has no channel layout or sample rate".to_string(),
            source: None,
        });
    }

    let clip = PcmClip::from_interleaved(&interleaved, channels, sample_rate)?;
    debug!(
        "Decoded {} frames, {} ch @ {} Hz ({:.2}s)",
        clip.frame_count(),
        clip.channels(),
        clip.sample_rate,
        clip.duration_secs()
    );

    Ok(clip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use tempfile::tempdir;

    #[test]
    fn test_decode_wav() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let spec = WavSpec {
            channels: 2,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for i in 0..2205 {
            writer.write_sample((i % 100) as i16 * 100).unwrap();
            writer.write_sample(-((i % 100) as i16) * 100).unwrap();
        }
        writer.finalize().unwrap();

        let clip = decode_file(&path).unwrap();
        assert_eq!(clip.channels(), 2);
        assert_eq!(clip.sample_rate, 22050);
        assert_eq!(clip.frame_count(), 2205);
    }

    #[test]
    fn test_decode_missing_file() {
        match decode_file(Path::new("/nonexistent/path/song.mp3")) {
            Err(MediaError::InputNotFound { path, .. }) => assert!(path.contains("song.mp3")),
            other => panic!("Expected InputNotFound, got: {:?}", other),
        }
    }

    #[test]
    fn test_decode_garbage_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("noise.bin");
        std::fs::write(&path, b"definitely not an audio container").unwrap();

        match decode_file(&path) {
            Err(MediaError::DecodeFailure { path, .. }) => assert!(path.contains("noise.bin")),
            other => panic!("Expected DecodeFailure, got: {:?}", other),
        }
    }
}
