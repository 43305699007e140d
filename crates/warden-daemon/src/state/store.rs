use parking_lot::Mutex;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use warden_types::{WardenError, WardenResult};

use super::types::SupervisorState;

/// Durable home of [`SupervisorState`]. Only the supervisor reads and
/// writes through it.
pub trait StateStore: Send + Sync {
    fn load(&self) -> WardenResult<SupervisorState>;

    /// Replaces the stored state as a whole; readers never observe a partial write.
    fn save(&self, state: &SupervisorState) -> WardenResult<()>;

    fn reset(&self) -> WardenResult<()>;

    fn describe(&self) -> String;
}

pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "state.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn persist_err(&self, action: &str, e: impl std::fmt::Display) -> WardenError {
        WardenError::StatePersistence(format!("Failed to {} {:?}: {}", action, self.path, e))
    }
}

impl StateStore for JsonStateStore {
    fn load(&self) -> WardenResult<SupervisorState> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No state at {:?}, starting from defaults", self.path);
                return Ok(SupervisorState::default());
            }
            Err(e) => return Err(self.persist_err("read", e)),
        };

        serde_json::from_str(&contents).map_err(|e| self.persist_err("parse", e))
    }

    fn save(&self, state: &SupervisorState) -> WardenResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.persist_err("create directory for", e))?;
            }
        }

        let bytes = serde_json::to_vec_pretty(state)
            .map_err(|e| WardenError::Serialization(format!("Failed to encode state: {}", e)))?;

        let tmp = self.temp_path();
        {
            let mut file = File::create(&tmp).map_err(|e| self.persist_err("create temp file for", e))?;
            file.write_all(&bytes).map_err(|e| self.persist_err("write", e))?;
            file.sync_all().map_err(|e| self.persist_err("sync", e))?;
        }

        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            self.persist_err("replace", e)
        })?;

        #[cfg(unix)]
        {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                if let Ok(dir) = File::open(parent) {
                    let _ = dir.sync_all();
                }
            }
        }

        debug!("State saved to {:?}", self.path);
        Ok(())
    }

    fn reset(&self) -> WardenResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("State {:?} removed", self.path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.persist_err("remove", e)),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Default)]
pub struct MemoryStateStore {
    state: Mutex<Option<SupervisorState>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: SupervisorState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }

    pub fn snapshot(&self) -> Option<SupervisorState> {
        self.state.lock().clone()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> WardenResult<SupervisorState> {
        Ok(self.state.lock().clone().unwrap_or_default())
    }

    fn save(&self, state: &SupervisorState) -> WardenResult<()> {
        *self.state.lock() = Some(state.clone());
        Ok(())
    }

    fn reset(&self) -> WardenResult<()> {
        *self.state.lock() = None;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}

impl<T: StateStore + ?Sized> StateStore for Arc<T> {
    fn load(&self) -> WardenResult<SupervisorState> {
        (**self).load()
    }

    fn save(&self, state: &SupervisorState) -> WardenResult<()> {
        (**self).save(state)
    }

    fn reset(&self) -> WardenResult<()> {
        (**self).reset()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
