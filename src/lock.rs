use crate::error::{LockError, Result};
use fs2::FileExt;
use std::env;
use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use tracing::debug;

// Cross-process lock keyed by a file name in a shared directory.
// Instances with the same name rendezvous on the same backing file, whether
// they live in one process or many; the OS advisory lock decides the holder.
pub struct NamedLock {
    name: String,
    dir: PathBuf,
    handle: Option<File>,
}

impl NamedLock {
    /// Create an unheld lock backed by `<temp-dir>/<name>`.
    ///
    /// Nothing touches the filesystem until [`acquire`](Self::acquire).
    pub fn new(name: impl Into<String>) -> Self {
        Self::in_dir(env::temp_dir(), name)
    }

    /// Create an unheld lock backed by `<dir>/<name>` instead of the
    /// platform temporary directory.
    pub fn in_dir(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            handle: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the backing file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }

    /// Whether this instance currently holds the lock.
    pub fn is_held(&self) -> bool {
        self.handle.is_some()
    }

    /// Acquire an exclusive lock on the backing file.
    ///
    /// With `wait` set, blocks until the current holder releases; there is
    /// no timeout. Without it, a lock held elsewhere fails immediately with
    /// [`LockError::Contended`]. Acquiring while this instance already holds
    /// the lock is a no-op.
    pub fn acquire(&mut self, wait: bool) -> Result<()> {
        if self.name.is_empty() {
            return Err(LockError::MissingName);
        }
        if self.handle.is_some() {
            // Already ours. A second flock on a fresh descriptor would
            // contend with our own handle and deadlock a blocking caller.
            return Ok(());
        }

        // Create-if-missing and open in one step. Several processes may race
        // through this open for the same name; only the lock below picks the
        // winner. The file is never written and never removed, so it stays
        // reusable across runs.
        let path = self.path();
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| LockError::Open {
                path: path.clone(),
                source,
            })?;

        if wait {
            file.lock_exclusive().map_err(|source| LockError::Open {
                path: path.clone(),
                source,
            })?;
        } else if let Err(err) = file.try_lock_exclusive() {
            // `file` drops here, so the descriptor does not leak on the
            // contended path.
            let contended = fs2::lock_contended_error();
            return Err(if err.raw_os_error() == contended.raw_os_error() {
                debug!("lock contended: {}", path.display());
                LockError::Contended {
                    name: self.name.clone(),
                }
            } else {
                LockError::Open { path, source: err }
            });
        }

        debug!("acquired lock: {}", path.display());
        self.handle = Some(file);
        Ok(())
    }

    /// Release the lock and close the backing handle.
    ///
    /// Fails with [`LockError::NotHeld`] when this instance is not the
    /// holder, which includes a second release. The backing file is left on
    /// disk for future acquisitions.
    pub fn release(&mut self) -> Result<()> {
        match self.handle.take() {
            Some(file) => {
                let _ = file.unlock();
                debug!("released lock: {}", self.path().display());
                Ok(())
            }
            None => Err(LockError::NotHeld {
                name: self.name.clone(),
            }),
        }
    }

    /// Acquire, then wrap in a guard that releases on drop.
    pub fn into_guard(mut self, wait: bool) -> Result<LockGuard> {
        self.acquire(wait)?;
        Ok(LockGuard { lock: self })
    }
}

// Scoped holder for a NamedLock. Dropping the guard releases, so the lock
// cannot stay held past an early return or panic in the guarded work.
pub struct LockGuard {
    lock: NamedLock,
}

impl LockGuard {
    /// Acquire `<temp-dir>/<name>` and hold it for the guard's lifetime.
    pub fn acquire(name: impl Into<String>, wait: bool) -> Result<Self> {
        NamedLock::new(name).into_guard(wait)
    }

    /// The lock this guard is holding.
    pub fn lock(&self) -> &NamedLock {
        &self.lock
    }
}

impl Drop for LockGuard {
    // Release the lock automatically when the guard goes out of scope.
    fn drop(&mut self) {
        let _ = self.lock.release();
    }
}
