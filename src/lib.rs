//! byte-table: a single-threaded, separate-chaining hash table keyed by
//! arbitrary byte strings, meant as the storage layer of a symbol table or
//! interner.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small table whose growth, collision and removal behavior can
//!   be reasoned about and observed directly.
//! - Layers:
//!   - `seed`: one process-wide 32-bit seed, set exactly once.
//!   - `hasher`: the `KeyHasher` seam; `Murmur3` is the default.
//!   - `bucket`: chains of items linked by arena key.
//!   - `ByteTable<V, H>`: slot array of optional buckets over an item
//!     arena; set/get/exists/remove/grow/destroy.
//!
//! Constraints
//! - Single-threaded: no internal locking. Reads take `&self`, writes take
//!   `&mut self`.
//! - Keys are copied in. Values are moved in; choose `V = &T` to keep
//!   ownership with the caller.
//! - An absent slot is `None`, never an empty bucket.
//!
//! Growth
//! - After a new entry, if `len / capacity >= max_load_factor` (integer
//!   division) the slot array is replaced by one `growth_factor` times
//!   larger. Items stay put in the arena; only links are rebuilt, using the
//!   hash cached at insert, so keys are neither copied nor re-hashed.
//! - If growth cannot allocate, the triggering insert still stands and the
//!   table keeps its old capacity. `set` reports this as
//!   `SetOutcome::GrowFailed`, not as an error.
//!
//! Lookup
//! - Every lookup compares key length and bytes, including single-entry
//!   buckets. The per-bucket `ever_collided` flag is observable history
//!   only.
//!
//! Removal
//! - Chains are scanned with a trailing cursor. A bucket emptied by removal
//!   is freed, and its collision history with it.
//!
//! Notes and non-goals
//! - No ordering guarantees for `iter`.
//! - No open addressing, no tombstones.
//! - The seed is process-scoped; tables receive it through their hasher,
//!   and `Murmur3::with_seed` bypasses the global entirely.

mod bucket;
mod byte_table;
#[cfg(test)]
mod byte_table_proptest;
pub mod config;
mod error;
pub mod hasher;
pub mod seed;

// Public surface
pub use byte_table::{BucketStats, ByteTable, SetOutcome};
pub use config::TableConfig;
pub use error::{Result, TableError};
pub use hasher::{KeyHasher, Murmur3};
pub use seed::initialize_seed;
