//! Outstanding one-time codes, one per phone number.

use super::{read, write};
use std::collections::HashMap;
use std::sync::RwLock;

/// Maps a phone number to its most recently issued code.
#[derive(Debug, Default)]
pub struct OtpStore {
    codes: RwLock<HashMap<String, String>>,
}

impl OtpStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a code, replacing any previous one for the number.
    pub fn set(&self, phone_number: impl Into<String>, code: impl Into<String>) {
        write(&self.codes).insert(phone_number.into(), code.into());
    }

    /// Get the outstanding code for a number.
    pub fn get(&self, phone_number: &str) -> Option<String> {
        read(&self.codes).get(phone_number).cloned()
    }

    /// Remove the code for a number. No-op if absent.
    pub fn delete(&self, phone_number: &str) {
        write(&self.codes).remove(phone_number);
    }

    /// Remove the code only if it is still `code`.
    ///
    /// Returns `false` when the entry is gone or was overwritten by a newer
    /// send, in which case the newer code is left in place.
    pub fn delete_if_matches(&self, phone_number: &str, code: &str) -> bool {
        let mut codes = write(&self.codes);
        match codes.get(phone_number) {
            Some(stored) if stored == code => {
                codes.remove(phone_number);
                true
            }
            _ => false,
        }
    }

    /// Number of outstanding codes.
    pub fn len(&self) -> usize {
        read(&self.codes).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
