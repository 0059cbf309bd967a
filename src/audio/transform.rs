//! Clip transforms
//!
//! Applied in a fixed order by [`crate::audio::convert_audio`]:
//! gain → resample → remix channels → requantize → time-slice.
//!
//! Sample rate conversion uses linear interpolation, which is adequate for
//! the low target rates of embedded playback.

use log::debug;

use crate::audio::buffer::{db_to_linear, PcmClip, PcmFrames};
use crate::audio::config::SampleWidth;
use crate::error::{MediaError, Result};

// ============================================================================
// Gain
// ============================================================================

/// Scale every sample by `gain_db`
pub fn apply_gain(clip: &mut PcmClip, gain_db: f32) {
    let gain_linear = db_to_linear(gain_db);

    // Unity gain optimization
    if (gain_linear - 1.0).abs() < f32::EPSILON {
        return;
    }

    for channel in clip.samples.iter_mut() {
        for sample in channel.iter_mut() {
            *sample *= gain_linear;
        }
    }
}

// ============================================================================
// Resample
// ============================================================================

/// Resample every channel of the clip to `target_rate`
///
/// Output frame `i` interpolates between the two source frames around
/// `i / ratio`. The interpolation weights are shared by all channels, so the
/// clip is walked once.
pub fn resample(clip: &mut PcmClip, target_rate: u32) {
    if clip.sample_rate == target_rate || clip.sample_rate == 0 {
        clip.sample_rate = target_rate;
        return;
    }

    let ratio = target_rate as f64 / clip.sample_rate as f64;
    debug!(
        "Resampling {} Hz -> {} Hz (ratio {:.4})",
        clip.sample_rate, target_rate, ratio
    );

    let source_len = clip.frame_count();
    let target_len = (source_len as f64 * ratio).ceil() as usize;
    let mut output = vec![Vec::with_capacity(target_len); clip.channels()];

    for i in 0..target_len {
        let (idx, frac) = source_position(i, ratio);
        for (channel, out) in clip.samples.iter().zip(output.iter_mut()) {
            out.push(interpolate(channel, idx, frac));
        }
    }

    clip.samples = output;
    clip.sample_rate = target_rate;
}

/// Source frame index and fractional offset for output frame `i`
#[inline]
fn source_position(i: usize, ratio: f64) -> (usize, f32) {
    let pos = i as f64 / ratio;
    let idx = pos.floor() as usize;
    (idx, (pos - idx as f64) as f32)
}

/// Linear interpolation between `samples[idx]` and `samples[idx + 1]`
///
/// Past the last sample the final value is held; past the end it is silence.
#[inline]
fn interpolate(samples: &[f32], idx: usize, frac: f32) -> f32 {
    match (samples.get(idx), samples.get(idx + 1)) {
        (Some(&a), Some(&b)) => a + (b - a) * frac,
        (Some(&a), None) => a,
        _ => 0.0,
    }
}

// ============================================================================
// Channel Remix
// ============================================================================

/// Change the channel count of the clip
///
/// Any layout can be folded to mono (channel average) and mono can be spread
/// to any count (duplication). Other conversions are rejected.
pub fn remix_channels(clip: &mut PcmClip, target: usize) -> Result<()> {
    let current = clip.channels();
    if current == target {
        return Ok(());
    }

    if target == 1 {
        let frames = clip.frame_count();
        let scale = 1.0 / current as f32;
        let mono = (0..frames)
            .map(|i| clip.samples.iter().map(|ch| ch[i]).sum::<f32>() * scale)
            .collect();
        clip.samples = vec![mono];
    } else if current == 1 {
        let mono = clip.samples[0].clone();
        clip.samples = vec![mono; target];
    } else {
        return Err(MediaError::UnsupportedChannelConversion {
            from: current,
            to: target,
        });
    }

    debug!("Remixed {} -> {} channels", current, target);
    Ok(())
}

// ============================================================================
// Requantize
// ============================================================================

/// Convert a float clip to interleaved integer samples of `width`
///
/// Samples are scaled by the width's full-scale value, rounded and clamped.
pub fn requantize(clip: &PcmClip, width: SampleWidth) -> PcmFrames {
    let full_scale = width.full_scale() as f64;
    let min = -full_scale - 1.0;
    let frames = clip.frame_count();
    let channels = clip.channels();
    let mut samples = Vec::with_capacity(frames * channels);

    for i in 0..frames {
        for channel in &clip.samples {
            let scaled = (channel[i] as f64 * full_scale).round().clamp(min, full_scale);
            samples.push(scaled as i32);
        }
    }

    PcmFrames {
        samples,
        channels: channels as u16,
        sample_rate: clip.sample_rate,
        sample_width: width,
    }
}

// ============================================================================
// Time Slice
// ============================================================================

/// Keep the window `[start_ms, end_ms)`; `None` keeps everything to the end
pub fn slice(frames: &mut PcmFrames, start_ms: u64, end_ms: Option<u64>) {
    let start = frames.frame_at_ms(start_ms);
    let end = match end_ms {
        Some(ms) => frames.frame_at_ms(ms),
        None => frames.frame_count(),
    };
    debug!("Slicing frames [{}, {})", start, end);
    frames.retain_frames(start, end);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mono(samples: Vec<f32>, rate: u32) -> PcmClip {
        PcmClip {
            samples: vec![samples],
            sample_rate: rate,
        }
    }

    #[test]
    fn test_gain_scales_samples() {
        let mut clip = mono(vec![0.5, -0.5], 8000);
        apply_gain(&mut clip, -6.0);
        assert_relative_eq!(clip.samples[0][0], 0.25059, epsilon = 1e-4);
        assert_relative_eq!(clip.samples[0][1], -0.25059, epsilon = 1e-4);
    }

    #[test]
    fn test_unity_gain_is_noop() {
        let mut clip = mono(vec![0.3, -0.7], 8000);
        apply_gain(&mut clip, 0.0);
        assert_eq!(clip.samples[0], vec![0.3, -0.7]);
    }

    #[test]
    fn test_resample_upsample_interpolates() {
        let mut clip = mono(vec![0.0, 1.0, 0.0], 8000);
        resample(&mut clip, 16000);
        assert_eq!(clip.frame_count(), 6);
        // Output frame 1 sits halfway between the first two source frames
        assert_relative_eq!(clip.samples[0][1], 0.5, epsilon = 0.01);
        assert_relative_eq!(clip.samples[0][2], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_resample_downsample_length() {
        let mut clip = mono(vec![0.0, 0.5, 1.0, 0.5, 0.0, -0.5, -1.0, -0.5], 16000);
        resample(&mut clip, 8000);
        assert_eq!(clip.frame_count(), 4);
    }

    #[test]
    fn test_resample_keeps_channels_aligned() {
        let mut clip = PcmClip {
            samples: vec![vec![0.0, 1.0, 0.0, -1.0], vec![0.0, -1.0, 0.0, 1.0]],
            sample_rate: 8000,
        };
        resample(&mut clip, 12000);
        assert_eq!(clip.channels(), 2);
        assert_eq!(clip.samples[0].len(), clip.samples[1].len());
        for (l, r) in clip.samples[0].iter().zip(&clip.samples[1]) {
            assert_relative_eq!(*l, -*r, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_interpolate_edges() {
        assert_eq!(interpolate(&[0.25, 0.75], 1, 0.5), 0.75);
        assert_eq!(interpolate(&[0.25], 3, 0.0), 0.0);
    }

    #[test]
    fn test_resample_updates_rate() {
        let mut clip = mono(vec![0.0; 16000], 16000);
        resample(&mut clip, 8000);
        assert_eq!(clip.sample_rate, 8000);
        assert_eq!(clip.frame_count(), 8000);
    }

    #[test]
    fn test_remix_stereo_to_mono_averages() {
        let mut clip = PcmClip {
            samples: vec![vec![1.0, 0.0], vec![0.0, -1.0]],
            sample_rate: 8000,
        };
        remix_channels(&mut clip, 1).unwrap();
        assert_eq!(clip.samples, vec![vec![0.5, -0.5]]);
    }

    #[test]
    fn test_remix_mono_to_stereo_duplicates() {
        let mut clip = mono(vec![0.25, 0.75], 8000);
        remix_channels(&mut clip, 2).unwrap();
        assert_eq!(clip.channels(), 2);
        assert_eq!(clip.samples[0], clip.samples[1]);
    }

    #[test]
    fn test_remix_rejects_stereo_to_quad() {
        let mut clip = PcmClip {
            samples: vec![vec![0.0], vec![0.0]],
            sample_rate: 8000,
        };
        assert!(matches!(
            remix_channels(&mut clip, 4),
            Err(MediaError::UnsupportedChannelConversion { from: 2, to: 4 })
        ));
    }

    #[test]
    fn test_requantize_widths() {
        let clip = mono(vec![1.0, -1.0, 0.0, 2.0], 8000);

        let u8_frames = requantize(&clip, SampleWidth::U8);
        assert_eq!(u8_frames.samples, vec![127, -127, 0, 127]);

        let s16 = requantize(&clip, SampleWidth::S16);
        assert_eq!(s16.samples, vec![32767, -32767, 0, 32767]);

        let s24 = requantize(&clip, SampleWidth::S24);
        assert_eq!(s24.samples[0], 8_388_607);

        let s32 = requantize(&clip, SampleWidth::S32);
        assert_eq!(s32.samples[0], i32::MAX);
        assert_eq!(s32.byte_len(), 16);
    }

    #[test]
    fn test_requantize_interleaves() {
        let clip = PcmClip {
            samples: vec![vec![1.0, 1.0], vec![-1.0, -1.0]],
            sample_rate: 8000,
        };
        let frames = requantize(&clip, SampleWidth::U8);
        assert_eq!(frames.samples, vec![127, -127, 127, -127]);
        assert_eq!(frames.channels, 2);
    }

    #[test]
    fn test_slice_window_and_to_end() {
        let clip = mono(vec![0.0; 8000], 1000);
        let mut window = requantize(&clip, SampleWidth::S16);
        slice(&mut window, 1000, Some(3500));
        assert_eq!(window.frame_count(), 2500);

        let mut tail = requantize(&clip, SampleWidth::S16);
        slice(&mut tail, 6000, None);
        assert_eq!(tail.frame_count(), 2000);

        let mut past_end = requantize(&clip, SampleWidth::S16);
        slice(&mut past_end, 9000, Some(10_000));
        assert_eq!(past_end.frame_count(), 0);
    }

    #[test]
    fn test_slice_huge_offset_is_empty() {
        use crate::audio::config::AudioConfig;

        for start in [1e14, 1e30] {
            let config = AudioConfig {
                start_offset_seconds: start,
                duration_seconds: -1.0,
                ..Default::default()
            };
            assert!(config.validate().is_ok());

            let clip = mono(vec![0.0; 8000], 8000);
            let mut frames = requantize(&clip, SampleWidth::U8);
            slice(&mut frames, config.start_ms(), config.end_ms());
            assert_eq!(frames.frame_count(), 0);

            let bounded = AudioConfig {
                duration_seconds: 5.0,
                ..config
            };
            let mut frames = requantize(&clip, SampleWidth::U8);
            slice(&mut frames, bounded.start_ms(), bounded.end_ms());
            assert_eq!(frames.frame_count(), 0);
        }
    }
}
