use std::path::Path;
use warden_daemon::supervisor::EXIT_OK;
use warden_daemon::WardenConfig;
use warden_types::WardenResult;

pub fn init_config(config_path: &Path, force: bool) -> WardenResult<u8> {
    if config_path.exists() && !force {
        println!("\x1b[38;5;226mConfiguration already exists at {:?}\x1b[0m", config_path);
        println!("Use --force to overwrite");
        return Ok(EXIT_OK);
    }

    let config = WardenConfig::default();
    config.save(config_path)?;

    println!("\x1b[38;5;46m[+]\x1b[0m Wrote default configuration to {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Point the template probes under [[probes.checks]] at your service");
    println!("  2. Set remediation.restart_command for your service");
    println!("  3. Run `warden check` to try the probes");
    println!("  4. Run `warden systemd` to schedule ticks");
    Ok(EXIT_OK)
}
