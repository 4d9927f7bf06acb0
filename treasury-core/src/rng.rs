//! Reproducible randomness for bucket sampling.
//!
//! A master seed is expanded into a sub-seed per `(mode, anchor)` pair with
//! BLAKE3, so replaying a run with the same master seed picks the same
//! observation for every bucket.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone)]
pub struct SeedSource {
    master_seed: u64,
}

impl SeedSource {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Draw a fresh master seed from the thread RNG.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Deterministic sub-seed for a sampling mode (`"year"`, `"month"`) and anchor.
    pub fn sub_seed(&self, mode: &str, anchor: NaiveDate) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(mode.as_bytes());
        hasher.update(anchor.to_string().as_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    pub fn rng_for(&self, mode: &str, anchor: NaiveDate) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(mode, anchor))
    }
}
