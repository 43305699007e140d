use std::fs::{self, File, OpenOptions};
use std::path::Path;
use tracing::debug;
use warden_types::{WardenError, WardenResult};

/// Exclusive advisory lock held for the whole read-modify-write of a tick.
/// Released when dropped.
pub struct TickLock {
    #[cfg(unix)]
    _lock: nix::fcntl::Flock<File>,
    #[cfg(not(unix))]
    _file: File,
}

impl TickLock {
    pub fn acquire(path: &Path) -> WardenResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                WardenError::StatePersistence(format!("Failed to create {:?}: {}", parent, e))
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .map_err(|e| {
                WardenError::StatePersistence(format!("Failed to open lock {:?}: {}", path, e))
            })?;

        #[cfg(unix)]
        {
            use nix::errno::Errno;
            use nix::fcntl::{Flock, FlockArg};

            match Flock::lock(file, FlockArg::LockExclusiveNonblock) {
                Ok(lock) => {
                    debug!("Acquired tick lock {:?}", path);
                    Ok(Self { _lock: lock })
                }
                Err((_, Errno::EWOULDBLOCK)) => Err(WardenError::StateLocked(format!(
                    "{} is held by another tick",
                    path.display()
                ))),
                Err((_, errno)) => Err(WardenError::StatePersistence(format!(
                    "Failed to lock {:?}: {}",
                    path, errno
                ))),
            }
        }

        #[cfg(not(unix))]
        {
            debug!("Advisory locking unavailable on this platform, opened {:?}", path);
            Ok(Self { _file: file })
        }
    }
}
