//! burnin CLI: compile overlay jobs and burn them into videos.
//!
//! Usage:
//!   burnin render <JOB> --video <PATH>   Render overlays onto a video
//!   burnin plan <JOB>                    Show the compiled program without rendering
//!   burnin check                         Check that ffmpeg/ffprobe are usable

use std::path::PathBuf;

use burnin_common::config::AppConfig;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "burnin",
    about = "Burn timed overlays into videos with ffmpeg",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/burnin/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a job's overlays onto a video
    Render {
        /// Job document (JSON)
        job: PathBuf,

        /// Source video
        #[arg(long)]
        video: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Time budget in seconds (overrides config)
        #[arg(long)]
        timeout: Option<u64>,

        /// Fill missing dimensions/duration from ffprobe
        #[arg(long)]
        probe: bool,

        /// Write a JSON report of the outcome
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Compile a job and print the program without running ffmpeg
    Plan {
        /// Job document (JSON)
        job: PathBuf,

        /// Source video, used for probing and the printed command
        #[arg(long)]
        video: Option<PathBuf>,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that the configured engine binaries run
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    burnin_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Render {
            job,
            video,
            output,
            timeout,
            probe,
            report,
        } => commands::render::run(&config, job, video, output, timeout, probe, report).await,
        Commands::Plan { job, video, output } => commands::plan::run(&config, job, video, output),
        Commands::Check => commands::check::run(&config),
    }
}
