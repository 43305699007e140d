#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod classifier;
pub mod command;
pub mod config;
pub mod diagnostics;
pub mod notify;
pub mod probes;
pub mod remediation;
pub mod state;
pub mod supervisor;

pub use classifier::classify;
pub use config::WardenConfig;
pub use diagnostics::{DiagnosticsCollector, FsDiagnosticsCollector, SnapshotContext, SnapshotRef};
pub use notify::{Alert, AlertContext, NotificationSink, Notifier};
pub use probes::{Probe, ProbeSet};
pub use remediation::{CommandRemediator, Remediator};
pub use state::{JsonStateStore, MemoryStateStore, StateStore, SupervisorState, TickLock};
pub use supervisor::{RemediationDecision, Supervisor, TickReport};
