//! Construction parameters for [`ByteTable`](crate::ByteTable).

use crate::bucket::Bucket;
use crate::error::{Result, TableError};

pub const DEFAULT_INITIAL_CAPACITY: usize = 16;
pub const DEFAULT_MAX_LOAD_FACTOR: u32 = 1;
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// Largest slot array the table will ever try to allocate.
pub const MAX_CAPACITY: usize = isize::MAX as usize / core::mem::size_of::<Option<Bucket>>();

/// Table parameters. Only `initial_capacity` and `max_load_factor` change
/// observable hashing behavior; the rest bound resource use.
///
/// A higher load factor delays growth, trading longer chains for fewer
/// reallocations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableConfig {
    pub(crate) initial_capacity: usize,
    pub(crate) max_load_factor: u32,
    pub(crate) growth_factor: usize,
    pub(crate) max_capacity: usize,
    pub(crate) max_key_len: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            max_capacity: MAX_CAPACITY,
            max_key_len: usize::MAX,
        }
    }
}

impl TableConfig {
    pub fn new(initial_capacity: usize, max_load_factor: u32) -> Self {
        Self {
            initial_capacity,
            max_load_factor,
            ..Self::default()
        }
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_max_load_factor(mut self, factor: u32) -> Self {
        self.max_load_factor = factor;
        self
    }

    pub fn with_growth_factor(mut self, factor: usize) -> Self {
        self.growth_factor = factor;
        self
    }

    /// Ceiling for growth. Values above [`MAX_CAPACITY`] are clamped.
    pub fn with_max_capacity(mut self, capacity: usize) -> Self {
        self.max_capacity = capacity.min(MAX_CAPACITY);
        self
    }

    pub fn with_max_key_len(mut self, len: usize) -> Self {
        self.max_key_len = len;
        self
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    pub fn max_load_factor(&self) -> u32 {
        self.max_load_factor
    }

    pub fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    pub fn max_key_len(&self) -> usize {
        self.max_key_len
    }

    /// Rejects configurations the table cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(TableError::invalid("initial capacity must be non-zero"));
        }
        if self.max_load_factor == 0 {
            return Err(TableError::invalid("max load factor must be non-zero"));
        }
        if self.growth_factor < 2 {
            return Err(TableError::invalid("growth factor must be at least 2"));
        }
        if self.max_capacity > MAX_CAPACITY {
            return Err(TableError::invalid(format!(
                "max capacity {} exceeds addressable limit {}",
                self.max_capacity, MAX_CAPACITY
            )));
        }
        if self.initial_capacity > self.max_capacity {
            return Err(TableError::invalid(format!(
                "initial capacity {} exceeds max capacity {}",
                self.initial_capacity, self.max_capacity
            )));
        }
        Ok(())
    }
}
