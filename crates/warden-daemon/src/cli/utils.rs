use super::commands::Cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use warden_daemon::config::LoggingConfig;

const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn init_logging(cli: &Cli, logging: &LoggingConfig) {
    let level = if cli.quiet {
        "warn".to_string()
    } else {
        match cli.verbose {
            0 => logging.level.to_string(),
            1 => "info,warden_daemon=debug,warden=debug".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    // Reports go to stdout; logs stay on stderr.
    let console_layer = if logging.json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_target(cli.verbose >= 2)
            .with_writer(std::io::stderr)
            .boxed()
    };

    let log_file = cli.log_file.as_ref().or(logging.file.as_ref());
    let file_layer = log_file.and_then(|path| {
        match std::fs::OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(
                fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            ),
            Err(e) => {
                eprintln!("Failed to open log file {:?}: {}", path, e);
                None
            }
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();
}

pub fn show_version() {
    println!("warden {}", BUILD_VERSION);
}

pub fn paint(classification: warden_types::HealthClassification) -> String {
    use warden_types::HealthClassification::*;
    let color = match classification {
        Healthy => 46,
        Degraded => 226,
        Critical => 196,
    };
    format!("\x1b[38;5;{}m{}\x1b[0m", color, classification)
}
