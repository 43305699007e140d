use chrono::Utc;
use warden_daemon::supervisor::EXIT_OK;
use warden_daemon::{JsonStateStore, StateStore, WardenConfig};
use warden_types::{WardenError, WardenResult};

use super::commands::OutputFormat;
use super::utils::paint;

pub fn show_status(config: &WardenConfig, format: &OutputFormat) -> WardenResult<u8> {
    let store = JsonStateStore::new(config.state_path());
    let state = store.load()?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&state)
                .map_err(|e| WardenError::Serialization(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let now = Utc::now();
            println!("State file:        {}", store.path().display());
            println!("Classification:    {}", paint(state.last_classification));
            println!("Last notified:     {}", state.last_notified_classification);
            println!(
                "Restart attempts:  {}/{}",
                state.restart_attempt_count, config.policy.max_attempts
            );
            match state.last_restart_timestamp {
                Some(ts) => println!("Last restart:      {}", ts.to_rfc3339()),
                None => println!("Last restart:      never"),
            }
            if let Some(remaining) = state.cooldown_remaining(now, config.policy.cooldown()) {
                println!("Cooldown:          {}s remaining", remaining.as_secs());
            }
            if let Some(ref error) = state.last_remediation_error {
                println!("Last restart error: {}", error);
            }
            if state.budget_exhausted(config.policy.max_attempts) {
                println!(
                    "\x1b[38;5;196mRestart budget exhausted.\x1b[0m Fix the service, then run `warden reset`."
                );
            }
        }
    }

    Ok(EXIT_OK)
}
