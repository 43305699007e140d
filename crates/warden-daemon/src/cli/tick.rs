use chrono::Utc;
use warden_daemon::{Supervisor, TickLock, TickReport, WardenConfig};
use warden_types::{WardenError, WardenResult};

use super::commands::OutputFormat;
use super::utils::paint;

pub async fn run_tick(config: &WardenConfig, format: &OutputFormat) -> WardenResult<u8> {
    let _lock = TickLock::acquire(&config.lock_path())?;

    let supervisor = Supervisor::from_config(config)?;
    let report = supervisor.tick(Utc::now()).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| WardenError::Serialization(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Text => print_report(&report),
    }

    Ok(report.exit_code())
}

fn print_report(report: &TickReport) {
    for result in &report.results {
        println!("  {}", result);
    }
    println!();
    if report.initial != report.classification {
        println!(
            "Classification: {} (before remediation {})",
            paint(report.classification),
            paint(report.initial)
        );
    } else {
        println!("Classification: {}", paint(report.classification));
    }
    println!("Remediation:    {}", report.remediation);
    println!(
        "Restarts:       {}",
        report.state.restart_attempt_count
    );
    if let Some(ref n) = report.notification {
        println!(
            "Notification:   {} {} -> {} ({})",
            n.severity,
            n.from,
            n.to,
            if n.delivered { "delivered" } else { "not delivered" }
        );
    }
    if let Some(ref path) = report.snapshot {
        println!("Diagnostics:    {}", path.display());
    }
}
