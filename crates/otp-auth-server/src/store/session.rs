//! Verified phone numbers.

use super::{read, write};
use std::collections::HashSet;
use std::sync::RwLock;

/// Records which phone numbers completed verification.
///
/// Entries are never removed: there is no logout and no expiry.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashSet<String>>,
}

impl SessionStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a number as authenticated.
    pub fn create(&self, phone_number: impl Into<String>) {
        write(&self.sessions).insert(phone_number.into());
    }

    /// Check whether a number is authenticated.
    pub fn exists(&self, phone_number: &str) -> bool {
        read(&self.sessions).contains(phone_number)
    }

    /// Number of authenticated numbers.
    pub fn len(&self) -> usize {
        read(&self.sessions).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
