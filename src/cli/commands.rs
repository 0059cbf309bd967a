//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::{Path, PathBuf};

use anyhow::Context;
use dialoguer::{Input, Select};
use log::info;

use crate::audio::{convert_audio, AudioConfig, AudioOutputs, SampleWidth};
use crate::cli::AudioArgs;
use crate::frames::{generate_frame_table, BuildFragment, FrameOrder, FrameTableConfig, RowStyle};
use crate::scan::{scan_files, select_file};

/// Resolve the audio config from defaults, job file and flags
pub fn resolve_audio_config(args: &AudioArgs) -> crate::Result<AudioConfig> {
    let mut config = match &args.config {
        Some(path) => AudioConfig::from_json_file(path)?,
        None => AudioConfig::default(),
    };

    if let Some(gain_db) = args.gain_db {
        config.gain_db = gain_db;
    }
    if let Some(rate) = args.rate {
        config.sample_rate = rate;
    }
    if let Some(channels) = args.channels {
        config.channel_count = channels;
    }
    if let Some(width) = args.width {
        config.sample_width = SampleWidth::try_from(width)?;
    }
    if let Some(start) = args.start {
        config.start_offset_seconds = start;
    }
    if let Some(duration) = args.duration {
        config.duration_seconds = duration;
    }

    config.validate()?;
    Ok(config)
}

/// Convert an audio clip into a C byte array
pub fn audio(args: AudioArgs) -> anyhow::Result<()> {
    let mut config = resolve_audio_config(&args)?;

    let input = match &args.input {
        Some(path) => path.clone(),
        None => {
            let input = pick_source(&args)?;
            prompt_parameters(&mut config)?;
            config.validate()?;
            input
        }
    };

    info!("Converting {} with {:?}", input.display(), config);

    let outputs = AudioOutputs {
        source: args.output.clone(),
        intermediate: args.intermediate.clone(),
        symbol: args.symbol.clone(),
    };
    let report = convert_audio(&input, &config, &outputs)
        .with_context(|| format!("converting {}", input.display()))?;

    println!(
        "Wrote {}: {} frames, {} ch, {} bit, {} Hz",
        report.output.display(),
        report.frame_count,
        report.channels,
        report.bits,
        report.sample_rate
    );
    println!("size={}", report.byte_len);

    Ok(())
}

/// List candidate files and let the user pick one by index
fn pick_source(args: &AudioArgs) -> anyhow::Result<PathBuf> {
    let files = scan_files(&args.scan_dir, args.prefix.as_deref(), args.suffix.as_deref())?;
    if files.is_empty() {
        anyhow::bail!("no candidate files found in {}", args.scan_dir.display());
    }

    let labels: Vec<String> = files
        .iter()
        .enumerate()
        .map(|(i, path)| format!("[{}] {}", i, path.display()))
        .collect();
    let index = Select::new()
        .with_prompt("Source file")
        .default(0)
        .items(&labels)
        .interact()
        .context("reading file selection")?;

    Ok(select_file(&files, index)?.to_path_buf())
}

/// Ask for the conversion parameters, defaulting to the current values
fn prompt_parameters(config: &mut AudioConfig) -> anyhow::Result<()> {
    config.sample_rate = Input::new()
        .with_prompt("Sample rate (Hz)")
        .default(config.sample_rate)
        .interact_text()
        .context("reading sample rate")?;

    let width: u16 = Input::new()
        .with_prompt("Sample width (bytes)")
        .default(u16::from(config.sample_width))
        .validate_with(|w: &u16| -> Result<(), String> {
            SampleWidth::from_bytes(*w)
                .map(|_| ())
                .ok_or_else(|| "expected 1, 2, 3 or 4".to_string())
        })
        .interact_text()
        .context("reading sample width")?;
    config.sample_width = SampleWidth::try_from(width)?;

    config.start_offset_seconds = Input::new()
        .with_prompt("Start time (s)")
        .default(config.start_offset_seconds)
        .interact_text()
        .context("reading start time")?;

    config.duration_seconds = Input::new()
        .with_prompt("Duration (s, negative = to end)")
        .default(config.duration_seconds)
        .interact_text()
        .context("reading duration")?;

    Ok(())
}

/// Generate a frame symbol table
pub fn frame_table(frames_dir: &Path, output: &Path, order: FrameOrder, braced: bool) -> anyhow::Result<()> {
    let config = FrameTableConfig {
        order,
        row_style: if braced { RowStyle::Braced } else { RowStyle::Flat },
        ..FrameTableConfig::indexed()
    };

    let report = generate_frame_table(frames_dir, &config, output)?;
    println!("Wrote {} ({} frames)", report.header.display(), report.frames.len());

    Ok(())
}

/// Generate a frame symbol table plus the build fragment
pub fn frame_bundle(
    frames_dir: &Path,
    output: &Path,
    cmake: &Path,
    resource_prefix: &str,
    order: FrameOrder,
) -> anyhow::Result<()> {
    let config = FrameTableConfig {
        order,
        build: Some(BuildFragment {
            output: cmake.to_path_buf(),
            resource_prefix: resource_prefix.to_string(),
            ..BuildFragment::default()
        }),
        ..FrameTableConfig::embedded()
    };

    let report = generate_frame_table(frames_dir, &config, output)?;
    println!("Wrote {} ({} frames)", report.header.display(), report.frames.len());
    if let Some(build) = &report.build_fragment {
        println!("Wrote {}", build.display());
    }

    Ok(())
}
