mod constants;
mod diagnostics;
mod logging;
mod notify;
mod policy;
mod probes;
mod types;
mod warden;

pub use constants::*;
pub use diagnostics::DiagnosticsConfig;
pub use logging::LoggingConfig;
pub use notify::NotifyConfig;
pub use policy::{PolicyConfig, RemediationConfig};
pub use probes::{ProbeCheck, ProbeConfig, ProbesConfig, REQUIRED_PROBE_KINDS};
pub use types::*;
pub use warden::{default_data_dir, ServiceConfig, WardenConfig};
