use tracing::info;
use warden_daemon::supervisor::EXIT_OK;
use warden_daemon::{JsonStateStore, StateStore, TickLock, WardenConfig};
use warden_types::WardenResult;

pub fn reset_state(config: &WardenConfig) -> WardenResult<u8> {
    let _lock = TickLock::acquire(&config.lock_path())?;

    let store = JsonStateStore::new(config.state_path());
    store.reset()?;

    info!("Supervisor state reset by operator");
    println!("\x1b[38;5;46m[+]\x1b[0m State cleared at {}", store.path().display());
    Ok(EXIT_OK)
}
