//! CLI Module
//!
//! Command-line interface for media-embed.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::frames::FrameOrder;

/// media-embed - prepare audio clips and image frames for firmware embedding
#[derive(Parser, Debug)]
#[command(name = "media-embed")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an audio clip into a C byte array
    #[command(name = "audio")]
    Audio(AudioArgs),

    /// Generate a frame symbol table (numeric order)
    #[command(name = "frame-table")]
    FrameTable {
        /// Directory holding the frame images
        #[arg(long, default_value = "frames")]
        frames_dir: PathBuf,

        /// Header file to generate
        #[arg(short, long, default_value = "frames.h")]
        output: PathBuf,

        /// Row ordering policy
        #[arg(long, value_enum, default_value_t = FrameOrder::Numeric)]
        order: FrameOrder,

        /// Wrap each table row in braces
        #[arg(long)]
        braced: bool,
    },

    /// Generate a frame symbol table plus an ESP-IDF component fragment
    #[command(name = "frame-bundle")]
    FrameBundle {
        /// Directory holding the frame images
        #[arg(long, default_value = "frames")]
        frames_dir: PathBuf,

        /// Header file to generate
        #[arg(short, long, default_value = "frames.h")]
        output: PathBuf,

        /// Build fragment to generate
        #[arg(long, default_value = "../../main/CMakeLists.txt")]
        cmake: PathBuf,

        /// Path prefix of each embedded frame in the build fragment
        #[arg(long, default_value = "../media/video/frames/")]
        resource_prefix: String,

        /// Row ordering policy
        #[arg(long, value_enum, default_value_t = FrameOrder::Lexicographic)]
        order: FrameOrder,
    },
}

/// Arguments of the `audio` subcommand
///
/// Flags override values from `--config`. When no input is given, the
/// remaining parameters are asked for interactively.
#[derive(clap::Args, Debug, Default)]
pub struct AudioArgs {
    /// Source audio file; omit to pick one interactively
    pub input: Option<PathBuf>,

    /// JSON job file with conversion parameters
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Gain in dB
    #[arg(long, allow_hyphen_values = true)]
    pub gain_db: Option<f32>,

    /// Target sample rate in Hz
    #[arg(short, long)]
    pub rate: Option<u32>,

    /// Target channel count
    #[arg(long)]
    pub channels: Option<u16>,

    /// Target sample width in bytes (1-4)
    #[arg(short, long)]
    pub width: Option<u16>,

    /// Start offset in seconds
    #[arg(short, long)]
    pub start: Option<f64>,

    /// Duration in seconds; negative keeps everything to the end
    #[arg(short, long, allow_hyphen_values = true)]
    pub duration: Option<f64>,

    /// C source file to generate
    #[arg(short, long, default_value = "wave.c")]
    pub output: PathBuf,

    /// Intermediate WAV file
    #[arg(long, default_value = "_temp_.wav")]
    pub intermediate: PathBuf,

    /// Prefix of the generated C symbols
    #[arg(long, default_value = "wave")]
    pub symbol: String,

    /// Directory listed for interactive selection
    #[arg(long, default_value = ".")]
    pub scan_dir: PathBuf,

    /// Only list files whose name starts with this
    #[arg(long)]
    pub prefix: Option<String>,

    /// Only list files whose name ends with this
    #[arg(long)]
    pub suffix: Option<String>,
}
