//! Named cross-process locks for keeping recurring jobs single-instance.
//!
//! A [`NamedLock`] maps a name onto a file in the platform temporary
//! directory and takes an OS advisory exclusive lock on it, so independent
//! invocations of the same job can agree that only one of them runs at a
//! time. The backing file is created on first use and never deleted; only
//! the lock state on it matters.
//!
//! Contention on a non-blocking acquire is an ordinary outcome, reported as
//! [`LockError::Contended`] for the caller to branch on:
//!
//! ```no_run
//! use joblock::{LockError, NamedLock};
//!
//! fn nightly() -> Result<(), LockError> {
//!     let mut lock = NamedLock::new("nightly-job");
//!     match lock.acquire(false) {
//!         // Previous run still going; skip this one.
//!         Err(LockError::Contended { .. }) => return Ok(()),
//!         result => result?,
//!     }
//!     // guarded work happens here
//!     lock.release()
//! }
//! ```
//!
//! Where the guarded work can fail or return early, prefer the scoped form:
//! [`LockGuard::acquire`] releases on every exit path, including panics.

mod error;
mod lock;

pub use error::{LockError, Result};
pub use lock::{LockGuard, NamedLock};
