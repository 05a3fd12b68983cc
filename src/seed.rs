//! Process-wide hash seed.
//!
//! The seed is set at most once per process. Passing a non-zero candidate
//! adopts it; passing zero derives one from the wall clock and the process
//! id. Once set, further calls are no-ops that report the existing seed.
//!
//! Tables do not read this global implicitly: [`Murmur3::default`] does,
//! and [`Murmur3::with_seed`] bypasses it entirely.
//!
//! [`Murmur3::default`]: crate::hasher::Murmur3
//! [`Murmur3::with_seed`]: crate::hasher::Murmur3::with_seed

use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

// Substituted when the derived seed happens to be zero.
const FALLBACK_SEED: u32 = 0x9e37_79b9;

static PROCESS_SEED: SeedCell = SeedCell::new();

/// One-time seed storage.
#[derive(Debug)]
pub struct SeedCell {
    cell: OnceLock<u32>,
}

impl SeedCell {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Set the seed if unset and return the effective value.
    pub fn initialize(&self, candidate: u32) -> u32 {
        *self.cell.get_or_init(|| {
            let seed = if candidate != 0 {
                candidate
            } else {
                derive_seed()
            };
            log::debug!("hash seed initialized to {:#010x}", seed);
            seed
        })
    }

    /// Current seed, or `None` if never initialized.
    pub fn get(&self) -> Option<u32> {
        self.cell.get().copied()
    }
}

impl Default for SeedCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed derived from the clock and the process id; never zero.
pub fn derive_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let seed = (now.as_secs() as u32) ^ now.subsec_micros() ^ std::process::id();
    if seed == 0 {
        FALLBACK_SEED
    } else {
        seed
    }
}

/// Initialize the process seed. No-op if it is already set.
///
/// Call this once during startup, before any table hashes a key through
/// the process seed.
pub fn initialize_seed(candidate: u32) -> u32 {
    PROCESS_SEED.initialize(candidate)
}

/// The process seed, derived on first use if nobody initialized it.
pub fn process_seed() -> u32 {
    PROCESS_SEED.initialize(0)
}
