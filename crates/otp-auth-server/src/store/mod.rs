//! In-memory stores for outstanding codes and verified sessions.
//!
//! Each store owns a single `RwLock`. Locks are never held across an
//! `.await`, and no lock spans both stores.

mod otp;
mod session;

pub use otp::OtpStore;
pub use session::SessionStore;

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Acquire a read guard, recovering the data if a writer panicked.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

/// Acquire a write guard, recovering the data if a writer panicked.
fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
