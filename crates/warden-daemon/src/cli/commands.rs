use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "warden")]
#[command(version = BUILD_VERSION)]
#[command(about = "Warden - Periodic health supervisor with bounded auto-remediation")]
#[command(long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[arg(short, long, global = true, value_name = "FILE", env = "WARDEN_CONFIG", help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,

    #[arg(short, long, global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[arg(long, global = true, value_name = "FILE", help = "Write logs to file")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text", help = "Output format")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run one supervision tick (default)")]
    #[command(long_about = "Run the probes, remediate if critical, collect diagnostics, notify on transitions and persist state.\n\nExit status: 0 healthy or degraded, 1 critical, 2 fatal error, 3 another tick is running.")]
    Tick,

    #[command(about = "Run the probes without touching state")]
    Check,

    #[command(about = "Show the persisted supervisor state")]
    Status,

    #[command(about = "Clear the persisted state after manual intervention")]
    Reset,

    #[command(about = "Write a default configuration file")]
    Init {
        #[arg(short, long, help = "Overwrite existing configuration")]
        force: bool,
    },

    #[command(about = "Generate systemd service and timer units")]
    Systemd {
        #[arg(short, long, default_value = "/etc/systemd/system", help = "Output directory")]
        output_dir: PathBuf,
        #[arg(short, long, default_value = "root", help = "User to run as")]
        user: String,
        #[arg(short, long, help = "Write the units to the output directory instead of printing them")]
        write: bool,
    },

    #[command(about = "Show version information")]
    Version,
}
