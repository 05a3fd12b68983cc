//! ByteTable: separate-chaining hash table keyed by byte strings.

use crate::bucket::{Bucket, Item, ItemKey, Items};
use crate::config::TableConfig;
use crate::error::{Result, TableError};
use crate::hasher::{KeyHasher, Murmur3};

/// What a successful [`ByteTable::set`] did.
#[derive(Debug)]
#[must_use]
pub enum SetOutcome<V> {
    /// A new entry was linked; no growth was needed.
    Inserted,
    /// A new entry was linked and the table grew to `capacity` slots.
    Grown { capacity: usize },
    /// A new entry was linked but the growth it triggered failed. The entry
    /// stays; the table keeps its previous capacity and remains usable.
    GrowFailed(TableError),
    /// An existing entry's value was overwritten; carries the old value.
    Replaced(V),
}

impl<V> SetOutcome<V> {
    /// True if a new entry was created.
    pub fn is_insert(&self) -> bool {
        !matches!(self, SetOutcome::Replaced(_))
    }

    pub fn map_replaced<U, F>(self, f: F) -> SetOutcome<U>
    where
        F: FnOnce(V) -> U,
    {
        match self {
            SetOutcome::Inserted => SetOutcome::Inserted,
            SetOutcome::Grown { capacity } => SetOutcome::Grown { capacity },
            SetOutcome::GrowFailed(e) => SetOutcome::GrowFailed(e),
            SetOutcome::Replaced(v) => SetOutcome::Replaced(f(v)),
        }
    }
}

/// Snapshot of one occupied slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BucketStats {
    pub len: usize,
    /// Whether this bucket has ever held more than one entry.
    pub ever_collided: bool,
}

/// Hash table mapping byte-string keys to values of type `V`.
///
/// Keys are copied in on insert. Values are moved in; use `V = &T` to keep
/// caller ownership of the underlying data.
#[derive(Debug)]
pub struct ByteTable<V, H = Murmur3> {
    hasher: H,
    config: TableConfig,
    slots: Vec<Option<Bucket>>,
    items: Items<V>, // arena owning every entry
}

impl<V> ByteTable<V> {
    /// Table hashed with the process seed.
    pub fn new(initial_capacity: usize, max_load_factor: u32) -> Result<Self> {
        Self::with_config(TableConfig::new(initial_capacity, max_load_factor))
    }

    pub fn with_config(config: TableConfig) -> Result<Self> {
        Self::with_config_and_hasher(config, Murmur3::default())
    }
}

impl<V, H> ByteTable<V, H>
where
    H: KeyHasher,
{
    pub fn with_config_and_hasher(config: TableConfig, hasher: H) -> Result<Self> {
        config.validate()?;
        let slots = alloc_slots(config.initial_capacity)?;
        log::trace!(
            "created table: capacity={} max_load_factor={}",
            config.initial_capacity,
            config.max_load_factor
        );
        Ok(Self {
            hasher,
            config,
            slots,
            items: Items::with_key(),
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn max_load_factor(&self) -> u32 {
        self.config.max_load_factor
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Slot `key` maps to at the current capacity.
    pub fn slot_of(&self, key: &[u8]) -> usize {
        self.index_of(self.hasher.hash_key(key))
    }

    #[inline]
    fn index_of(&self, hash: u32) -> usize {
        hash as usize % self.slots.len()
    }

    pub fn bucket_stats(&self, slot: usize) -> Option<BucketStats> {
        self.slots.get(slot)?.as_ref().map(|b| BucketStats {
            len: b.len(),
            ever_collided: b.ever_collided(),
        })
    }

    pub fn occupied_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    fn find(&self, key: &[u8]) -> Option<ItemKey> {
        let idx = self.slot_of(key);
        self.slots[idx].as_ref()?.find(&self.items, key)
    }

    pub fn get(&self, key: &[u8]) -> Option<&V> {
        let k = self.find(key)?;
        self.items.get(k).map(|item| &item.value)
    }

    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        let k = self.find(key)?;
        self.items.get_mut(k).map(|item| &mut item.value)
    }

    pub fn exists(&self, key: &[u8]) -> bool {
        self.find(key).is_some()
    }

    /// Insert `key -> value`, or overwrite the value of an existing key when
    /// `replace` is set.
    ///
    /// Without `replace`, an existing key yields [`TableError::KeyExists`]
    /// and the table is unchanged (`value` is dropped). A new entry may
    /// trigger growth; see [`SetOutcome`].
    pub fn set(&mut self, key: &[u8], value: V, replace: bool) -> Result<SetOutcome<V>> {
        if key.len() > self.config.max_key_len {
            return Err(TableError::invalid(format!(
                "key of {} bytes exceeds limit of {}",
                key.len(),
                self.config.max_key_len
            )));
        }
        let hash = self.hasher.hash_key(key);
        let idx = self.index_of(hash);

        if let Some(bucket) = &self.slots[idx] {
            if let Some(k) = bucket.find(&self.items, key) {
                if !replace {
                    return Err(TableError::KeyExists);
                }
                let old = core::mem::replace(&mut self.items[k].value, value);
                return Ok(SetOutcome::Replaced(old));
            }
        }

        // Copy the key before touching the arena so a failed copy links nothing.
        let owned = copy_key(key)?;
        let k = self.items.insert(Item::new(owned, value, hash));
        link(&mut self.slots[idx], &mut self.items, k);
        Ok(self.after_insert())
    }

    /// [`set`](Self::set), handing an overwritten value to `dealloc`.
    pub fn set_with<F>(
        &mut self,
        key: &[u8],
        value: V,
        replace: bool,
        dealloc: F,
    ) -> Result<SetOutcome<()>>
    where
        F: FnOnce(V),
    {
        self.set(key, value, replace).map(|o| o.map_replaced(dealloc))
    }

    fn load_reached(&self) -> bool {
        self.len() / self.capacity() >= self.config.max_load_factor as usize
    }

    fn after_insert(&mut self) -> SetOutcome<V> {
        if !self.load_reached() {
            return SetOutcome::Inserted;
        }
        match self.grow() {
            Ok(capacity) => SetOutcome::Grown { capacity },
            Err(e) => {
                log::warn!(
                    "table growth failed at capacity {} with {} entries: {}",
                    self.capacity(),
                    self.len(),
                    e
                );
                SetOutcome::GrowFailed(e)
            }
        }
    }

    /// Grow to `capacity * growth_factor` slots and rehash every entry.
    /// Returns the new capacity.
    ///
    /// On error nothing has changed. Entries keep their arena slots, so keys
    /// are relinked rather than copied, and the cached hash is reused.
    pub fn grow(&mut self) -> Result<usize> {
        let old_capacity = self.capacity();
        let max = self.config.max_capacity;
        let requested = old_capacity.checked_mul(self.config.growth_factor);
        let new_capacity = match requested {
            Some(c) if c <= max => c,
            _ => return Err(TableError::CapacityExceeded { requested, max }),
        };

        let new_slots = alloc_slots(new_capacity)?;
        let old_slots = core::mem::replace(&mut self.slots, new_slots);
        for bucket in old_slots.into_iter().flatten() {
            let mut cur = Some(bucket.head());
            while let Some(k) = cur {
                let Some(item) = self.items.get(k) else {
                    break;
                };
                cur = item.next;
                let idx = item.hash as usize % new_capacity;
                link(&mut self.slots[idx], &mut self.items, k);
            }
        }

        log::debug!(
            "table grew from {} to {} slots ({} entries)",
            old_capacity,
            new_capacity,
            self.len()
        );
        Ok(new_capacity)
    }

    /// Remove `key` and return its value.
    ///
    /// A bucket emptied by the removal is freed and its slot becomes absent.
    pub fn remove(&mut self, key: &[u8]) -> Result<V> {
        let idx = self.slot_of(key);
        let slot = &mut self.slots[idx];
        let bucket = slot.as_mut().ok_or(TableError::NotFound)?;
        let k = bucket
            .unlink(&mut self.items, key)
            .ok_or(TableError::NotFound)?;
        if bucket.len() == 0 {
            *slot = None;
        }
        let item = self
            .items
            .remove(k)
            .expect("unlinked item must still be in the arena");
        Ok(item.value)
    }

    /// [`remove`](Self::remove), handing the value to `dealloc`.
    pub fn remove_with<F>(&mut self, key: &[u8], dealloc: F) -> Result<()>
    where
        F: FnOnce(V),
    {
        self.remove(key).map(dealloc)
    }

    /// Entries in slot order, then chain order. The order changes on growth.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &V)> + '_ {
        self.slots
            .iter()
            .flatten()
            .flat_map(move |b| b.keys(&self.items))
            .filter_map(move |k| self.items.get(k))
            .map(|item| (&*item.key, &item.value))
    }

    pub fn destroy(self) {
        drop(self);
    }

    /// Tear the table down, handing every value to `dealloc` in slot order,
    /// then chain order.
    pub fn destroy_with<F>(mut self, mut dealloc: F)
    where
        F: FnMut(V),
    {
        let slots = core::mem::take(&mut self.slots);
        for bucket in slots.into_iter().flatten() {
            let mut cur = Some(bucket.head());
            while let Some(k) = cur {
                let Some(item) = self.items.remove(k) else {
                    break;
                };
                cur = item.next;
                dealloc(item.value);
            }
        }
    }
}

fn alloc_slots(capacity: usize) -> Result<Vec<Option<Bucket>>> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(capacity)?;
    slots.resize_with(capacity, || None);
    Ok(slots)
}

fn copy_key(key: &[u8]) -> Result<Box<[u8]>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(key.len())?;
    buf.extend_from_slice(key);
    Ok(buf.into_boxed_slice())
}

fn link<V>(slot: &mut Option<Bucket>, items: &mut Items<V>, k: ItemKey) {
    if let Some(bucket) = slot.as_mut() {
        bucket.push_back(items, k);
    } else {
        *slot = Some(Bucket::new(items, k));
    }
}
