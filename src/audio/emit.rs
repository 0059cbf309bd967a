//! C source emission for PCM data
//!
//! Renders a byte-array literal plus accessor functions that the firmware
//! links against to find the clip, its size and its format.

use crate::audio::config::SampleWidth;
use crate::audio::wav::WavPcm;

/// Frames per line in the array literal
pub const FRAMES_PER_LINE: usize = 32;

/// Bias subtracted from 8-bit samples before emission
///
/// The playback hardware expects 8-bit samples re-centered around zero.
/// Wider samples are emitted as raw bytes.
pub const U8_EMIT_BIAS: i16 = 127;

/// Render the C source fragment for `pcm`
///
/// `symbol` prefixes every generated name (`<symbol>_array`,
/// `<symbol>_get`, `<symbol>_get_size`, ...). It must already be a valid C
/// identifier.
pub fn render_c_array(pcm: &WavPcm, symbol: &str) -> String {
    let size = pcm.data.len();
    let mut out = String::with_capacity(size * 5 + 512);

    out.push_str(&format!(
        "#include <stdint.h>\n\
         \n\
         static const uint8_t {s}_array[];\n\
         char *{s}_get(void){{return (char*){s}_array;}}\n\
         uint32_t {s}_get_size(void){{return {size};}}\n\
         uint32_t {s}_get_framerate(void){{return {rate};}}\n\
         uint32_t {s}_get_bits(void){{return {bits};}}\n\
         uint32_t {s}_get_ch(void){{return {ch};}}\n\
         /* size : {size} */\n\
         static const uint8_t {s}_array[]={{\n",
        s = symbol,
        size = size,
        rate = pcm.sample_rate,
        bits = pcm.sample_width.bits(),
        ch = pcm.channels,
    ));

    let line_bytes = (pcm.frame_bytes() * FRAMES_PER_LINE).max(1);
    for line in pcm.data.chunks(line_bytes) {
        let values: Vec<String> = line
            .iter()
            .map(|&b| emitted_value(b, pcm.sample_width).to_string())
            .collect();
        out.push_str(&values.join(", "));
        out.push_str(",\n");
    }

    out.push_str("};\n");
    out
}

/// Value written to the array literal for one raw data byte
#[inline]
pub fn emitted_value(byte: u8, width: SampleWidth) -> i16 {
    match width {
        SampleWidth::U8 => byte as i16 - U8_EMIT_BIAS,
        _ => byte as i16,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcm(data: Vec<u8>, channels: u16, width: SampleWidth) -> WavPcm {
        let frame_bytes = channels as usize * width.bytes();
        WavPcm {
            sample_rate: 8000,
            channels,
            sample_width: width,
            frame_count: data.len() / frame_bytes,
            data,
        }
    }

    /// Values of the array body, in order
    fn body_values(source: &str) -> Vec<i16> {
        let body = source
            .split("[]={\n")
            .nth(1)
            .and_then(|rest| rest.split("};").next())
            .unwrap();
        body.split(|c| c == ',' || c == '\n')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| v.parse().unwrap())
            .collect()
    }

    #[test]
    fn test_header_and_accessors() {
        let source = render_c_array(&pcm(vec![128; 4], 2, SampleWidth::S16), "wave");

        assert!(source.starts_with("#include <stdint.h>\n\nstatic const uint8_t wave_array[];\n"));
        assert!(source.contains("char *wave_get(void){return (char*)wave_array;}\n"));
        assert!(source.contains("uint32_t wave_get_size(void){return 4;}\n"));
        assert!(source.contains("uint32_t wave_get_framerate(void){return 8000;}\n"));
        assert!(source.contains("uint32_t wave_get_bits(void){return 16;}\n"));
        assert!(source.contains("uint32_t wave_get_ch(void){return 2;}\n"));
        assert!(source.contains("/* size : 4 */\nstatic const uint8_t wave_array[]={\n"));
        assert!(source.ends_with("128, 128, 128, 128,\n};\n"));
    }

    #[test]
    fn test_u8_bias_applied() {
        let raw = vec![0, 127, 128, 255];
        let source = render_c_array(&pcm(raw.clone(), 1, SampleWidth::U8), "wave");
        let values = body_values(&source);

        assert_eq!(values, vec![-127, 0, 1, 128]);
        for (value, byte) in values.iter().zip(raw) {
            assert_eq!(*value, byte as i16 - 127);
        }
    }

    #[test]
    fn test_wide_samples_not_biased() {
        let source = render_c_array(&pcm(vec![0, 255, 7, 9], 1, SampleWidth::S16), "clip");
        assert_eq!(body_values(&source), vec![0, 255, 7, 9]);
        assert!(source.contains("clip_get_size"));
    }

    #[test]
    fn test_lines_hold_32_frames_and_partial_tail() {
        // 70 stereo 16-bit frames: two full lines and a 6-frame tail
        let data = vec![1u8; 70 * 4];
        let source = render_c_array(&pcm(data, 2, SampleWidth::S16), "wave");
        let body = source.split("[]={\n").nth(1).unwrap();
        let lines: Vec<&str> = body.lines().filter(|l| *l != "};").collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].split(", ").count(), 32 * 4);
        assert_eq!(lines[2].split(", ").count(), 6 * 4);
        assert!(lines.iter().all(|l| l.ends_with(',')));
        assert_eq!(body_values(&source).len(), 70 * 4);
    }

    #[test]
    fn test_empty_clip_renders_empty_array() {
        let source = render_c_array(&pcm(Vec::new(), 1, SampleWidth::U8), "wave");
        assert!(source.contains("wave_get_size(void){return 0;}"));
        assert!(source.ends_with("static const uint8_t wave_array[]={\n};\n"));
        assert!(body_values(&source).is_empty());
    }
}
