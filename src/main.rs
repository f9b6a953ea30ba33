// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "camera-screen")]
#[command(about = "Drive the camera screen from the command line")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct CaptureFlags {
    /// Use the front camera
    #[arg(long)]
    front: bool,

    /// Frame rate (30 or 60)
    #[arg(long)]
    fps: Option<u32>,

    /// Turn the flash (or torch, for video) on
    #[arg(long)]
    flash: bool,

    /// Request HDR
    #[arg(long)]
    hdr: bool,

    /// Gallery directory (default: platform pictures/videos folders)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl From<CaptureFlags> for cli::CaptureArgs {
    fn from(flags: CaptureFlags) -> Self {
        Self {
            front: flags.front,
            fps: flags.fps,
            flash: flags.flash,
            hdr: flags.hdr,
            output: flags.output,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List available cameras
    List,

    /// Take a photo
    Photo {
        #[command(flatten)]
        flags: CaptureFlags,
    },

    /// Record a video
    Video {
        #[command(flatten)]
        flags: CaptureFlags,

        /// Recording duration in seconds
        #[arg(short, long, default_value = "10")]
        duration: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=camera_screen=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => cli::list_cameras(),
        Commands::Photo { flags } => cli::take_photo(flags.into()).await,
        Commands::Video { flags, duration } => cli::record_video(flags.into(), duration).await,
    }
}
