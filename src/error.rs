//! Error types for named-lock acquisition and release

use std::io;
use std::path::PathBuf;

/// Error type for [`NamedLock`](crate::NamedLock) operations.
///
/// `Contended` is the one ordinary outcome in here: a non-blocking acquire
/// ran into another holder. Callers are expected to match on it and skip
/// their run. Every other variant means mutual exclusion could not even be
/// attempted or the call was misused.
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("no identifying name was supplied for the lock")]
    MissingName,

    #[error("opening lock file failed: {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("lock \"{name}\" is already held by another process")]
    Contended { name: String },

    #[error("lock \"{name}\" is not currently held")]
    NotHeld { name: String },
}

pub type Result<T> = std::result::Result<T, LockError>;
