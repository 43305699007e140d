use warden_daemon::classifier::{classify, failing};
use warden_daemon::supervisor::{EXIT_CRITICAL, EXIT_OK};
use warden_daemon::{ProbeSet, WardenConfig};
use warden_types::{WardenError, WardenResult};

use super::commands::OutputFormat;
use super::utils::paint;

pub async fn run_checks(config: &WardenConfig, format: &OutputFormat) -> WardenResult<u8> {
    let http = reqwest::Client::builder()
        .build()
        .map_err(|e| WardenError::Config(format!("Failed to build HTTP client: {}", e)))?;
    let probes = ProbeSet::from_config(&config.probes, &http)?;

    let results = probes.run_all().await;
    let classification = classify(&results);

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "classification": classification,
                "results": results,
            });
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("\x1b[38;5;46m{} health check\x1b[0m", config.service.name);
            println!("\x1b[38;5;245m{}\x1b[0m", "═".repeat(50));
            for result in &results {
                println!("  {}", result);
            }
            println!();
            println!(
                "{} of {} probes failing: {}",
                failing(&results).len(),
                results.len(),
                paint(classification)
            );
        }
    }

    Ok(if classification.is_critical() { EXIT_CRITICAL } else { EXIT_OK })
}
