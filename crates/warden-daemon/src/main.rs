mod cli;

use clap::Parser;
use cli::{
    generate_systemd, init_config, init_logging, reset_state, run_checks, run_tick, show_status,
    show_version, Cli, Commands,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::error;
use warden_daemon::config::{LoggingConfig, DEFAULT_CONFIG_PATH, DEFAULT_TICK_INTERVAL_SECS};
use warden_daemon::supervisor::{EXIT_FATAL, EXIT_LOCKED, EXIT_OK};
use warden_daemon::WardenConfig;
use warden_types::{WardenError, WardenResult};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = WardenConfig::load(&config_path);

    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_else(|_| LoggingConfig::default());
    init_logging(&cli, &logging);

    match dispatch(&cli, &config_path, config).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{}", e);
            eprintln!("\x1b[38;5;196merror:\x1b[0m {}", e);
            match e {
                WardenError::StateLocked(_) => ExitCode::from(EXIT_LOCKED),
                _ => ExitCode::from(EXIT_FATAL),
            }
        }
    }
}

async fn dispatch(
    cli: &Cli,
    config_path: &Path,
    config: WardenResult<WardenConfig>,
) -> WardenResult<u8> {
    match cli.command.as_ref().unwrap_or(&Commands::Tick) {
        Commands::Tick => run_tick(&config?, &cli.format).await,
        Commands::Check => run_checks(&config?, &cli.format).await,
        Commands::Status => show_status(&config?, &cli.format),
        Commands::Reset => reset_state(&config?),
        Commands::Init { force } => init_config(config_path, *force),
        Commands::Systemd { output_dir, user, write } => {
            let interval = config
                .map(|c| c.service.tick_interval_secs)
                .unwrap_or(DEFAULT_TICK_INTERVAL_SECS);
            generate_systemd(output_dir, user, config_path, interval, *write)
        }
        Commands::Version => {
            show_version();
            Ok(EXIT_OK)
        }
    }
}
