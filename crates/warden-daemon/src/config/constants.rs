pub const DEFAULT_CONFIG_PATH: &str = "/etc/warden/warden.toml";

pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TICK_CEILING_SECS: u64 = 60;

pub const DEFAULT_COOLDOWN_SECS: u64 = 300;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_SETTLE_SECS: u64 = 30;
pub const DEFAULT_RESTART_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_WARNING_PERCENT: f64 = 80.0;
pub const DEFAULT_CRITICAL_PERCENT: f64 = 90.0;

pub const DEFAULT_KEEP_SNAPSHOTS: usize = 5;
pub const DEFAULT_SNAPSHOT_MAX_AGE_HOURS: u64 = 24;
pub const DEFAULT_LOG_TAIL_LINES: usize = 200;
pub const DEFAULT_MAX_PROCESSES: usize = 25;

pub const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_NOTIFY_RETRY_DELAY_SECS: u64 = 5;

pub const STATE_FILE_NAME: &str = "state.json";
pub const LOCK_FILE_NAME: &str = "state.lock";
pub const DIAGNOSTICS_DIR_NAME: &str = "diagnostics";
