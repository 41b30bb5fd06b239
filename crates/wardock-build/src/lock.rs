use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per build context directory.
///
/// Holding a [`DirectoryGuard`] across the Dockerfile write and the engine
/// build keeps concurrent builds for the same directory from reading each
/// other's Dockerfile.
#[derive(Debug, Default)]
pub struct DirectoryLocks {
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

/// Released on drop.
#[derive(Debug)]
pub struct DirectoryGuard {
    dir: PathBuf,
    _guard: OwnedMutexGuard<()>,
}

impl DirectoryGuard {
    /// Resolved directory the guard is keyed on.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DirectoryLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other guard for `dir` is alive.
    ///
    /// Entries no guard or waiter refers to any more are dropped here, so
    /// the map only holds directories with builds in flight.
    pub async fn acquire(&self, dir: &Path) -> DirectoryGuard {
        let key = resolve(dir);
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(key.clone()).or_default())
        };

        tracing::debug!(dir = %key.display(), "waiting for directory lock");
        let guard = lock.lock_owned().await;

        DirectoryGuard {
            dir: key,
            _guard: guard,
        }
    }
}

/// Paths that name the same directory share one lock.
fn resolve(dir: &Path) -> PathBuf {
    match std::fs::canonicalize(dir) {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "cannot canonicalize, locking as given");
            dir.to_path_buf()
        }
    }
}
