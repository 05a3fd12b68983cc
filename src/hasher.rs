//! Key hashing seam.

use crate::seed;

/// Hashes a whole key to 32 bits. Implementations must be deterministic for
/// the lifetime of a table.
pub trait KeyHasher {
    fn hash_key(&self, key: &[u8]) -> u32;
}

impl<H: KeyHasher + ?Sized> KeyHasher for &H {
    #[inline]
    fn hash_key(&self, key: &[u8]) -> u32 {
        (**self).hash_key(key)
    }
}

/// Seeded 32-bit MurmurHash3 (x86 variant).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Murmur3 {
    seed: u32,
}

impl Murmur3 {
    pub const fn with_seed(seed: u32) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

/// Uses the process seed, initializing it on first use.
impl Default for Murmur3 {
    fn default() -> Self {
        Self::with_seed(seed::process_seed())
    }
}

impl KeyHasher for Murmur3 {
    #[inline]
    fn hash_key(&self, key: &[u8]) -> u32 {
        mur3::murmurhash3_x86_32(key, self.seed)
    }
}
