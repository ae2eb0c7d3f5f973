//! One-time code generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Number of digits in a generated code.
pub const CODE_LENGTH: usize = 6;

const CODE_MIN: u32 = 100_000;
const CODE_MAX: u32 = 999_999;

/// Generates 6-digit numeric codes.
///
/// Seeded once from OS entropy when constructed and shared for the life of
/// the process, so concurrent requests never observe a reseeded stream.
#[derive(Debug)]
pub struct CodeGenerator {
    rng: Mutex<StdRng>,
}

impl CodeGenerator {
    /// Create a generator seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a deterministic generator.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Generate a code in `100000..=999999`.
    pub fn generate(&self) -> String {
        let value = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(CODE_MIN..=CODE_MAX);
        format!("{:0width$}", value, width = CODE_LENGTH)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}
