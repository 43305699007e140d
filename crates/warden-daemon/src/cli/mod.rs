mod check;
mod commands;
mod init;
mod reset;
mod status;
mod systemd;
mod tick;
mod utils;

pub use check::run_checks;
pub use commands::{Cli, Commands};
pub use init::init_config;
pub use reset::reset_state;
pub use status::show_status;
pub use systemd::generate_systemd;
pub use tick::run_tick;
pub use utils::{init_logging, show_version};
