//! media-embed CLI
//!
//! Command-line entry point for the media preprocessing tools.

use clap::Parser;
use env_logger::Env;
use log::debug;

use media_embed::cli::commands;
use media_embed::cli::{Cli, Commands};
use media_embed::MediaError;

fn main() {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    debug!("media-embed v{}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = handle_command(cli.command) {
        eprintln!("error: {:#}", err);
        if let Some(media_err) = err.downcast_ref::<MediaError>() {
            eprintln!("code: {}", media_err.error_code());
            for suggestion in media_err.recovery_suggestions() {
                eprintln!("  - {}", suggestion);
            }
        }
        std::process::exit(1);
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Audio(args) => commands::audio(args),
        Commands::FrameTable {
            frames_dir,
            output,
            order,
            braced,
        } => commands::frame_table(&frames_dir, &output, order, braced),
        Commands::FrameBundle {
            frames_dir,
            output,
            cmake,
            resource_prefix,
            order,
        } => commands::frame_bundle(&frames_dir, &output, &cmake, &resource_prefix, order),
    }
}
