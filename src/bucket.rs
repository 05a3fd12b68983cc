//! Chains of items sharing one slot.
//!
//! Items live in the table's arena and link to each other by arena key, so
//! a chain is just a `head`/`tail` pair plus bookkeeping. Nothing here
//! allocates; the table decides when items enter or leave the arena.

use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Arena key of one item.
    pub(crate) struct ItemKey;
}

pub(crate) type Items<V> = SlotMap<ItemKey, Item<V>>;

#[derive(Debug)]
pub(crate) struct Item<V> {
    pub(crate) key: Box<[u8]>,
    pub(crate) value: V,
    pub(crate) hash: u32,
    pub(crate) next: Option<ItemKey>,
}

impl<V> Item<V> {
    pub(crate) fn new(key: Box<[u8]>, value: V, hash: u32) -> Self {
        Self {
            key,
            value,
            hash,
            next: None,
        }
    }

    // Length first, so a shared prefix never matches.
    #[inline]
    pub(crate) fn matches(&self, key: &[u8]) -> bool {
        self.key.len() == key.len() && *self.key == *key
    }
}

/// Non-empty chain. An empty slot is `None` in the table, never a `Bucket`
/// with `len == 0`.
#[derive(Debug)]
pub(crate) struct Bucket {
    head: ItemKey,
    tail: ItemKey,
    len: usize,
    ever_collided: bool,
}

impl Bucket {
    /// Bucket holding exactly `first`.
    pub(crate) fn new<V>(items: &mut Items<V>, first: ItemKey) -> Self {
        if let Some(item) = items.get_mut(first) {
            item.next = None;
        }
        Self {
            head: first,
            tail: first,
            len: 1,
            ever_collided: false,
        }
    }

    pub(crate) fn head(&self) -> ItemKey {
        self.head
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn ever_collided(&self) -> bool {
        self.ever_collided
    }

    /// Append at the tail.
    pub(crate) fn push_back<V>(&mut self, items: &mut Items<V>, k: ItemKey) {
        if let Some(item) = items.get_mut(k) {
            item.next = None;
        }
        if let Some(tail) = items.get_mut(self.tail) {
            tail.next = Some(k);
        }
        self.tail = k;
        self.len += 1;
        if self.len > 1 {
            self.ever_collided = true;
        }
    }

    /// First item whose key equals `key`.
    pub(crate) fn find<V>(&self, items: &Items<V>, key: &[u8]) -> Option<ItemKey> {
        self.keys(items)
            .find(|&k| items.get(k).is_some_and(|item| item.matches(key)))
    }

    /// Unlink the item matching `key` and return its arena key. The item
    /// itself stays in the arena for the caller to remove.
    pub(crate) fn unlink<V>(&mut self, items: &mut Items<V>, key: &[u8]) -> Option<ItemKey> {
        let mut prev: Option<ItemKey> = None;
        let mut cur = Some(self.head);
        while let Some(k) = cur {
            let item = items.get(k)?;
            let next = item.next;
            if item.matches(key) {
                match prev {
                    None => {
                        if let Some(n) = next {
                            self.head = n;
                        }
                    }
                    Some(p) => {
                        if let Some(p_item) = items.get_mut(p) {
                            p_item.next = next;
                        }
                        if self.tail == k {
                            self.tail = p;
                        }
                    }
                }
                self.len -= 1;
                return Some(k);
            }
            prev = Some(k);
            cur = next;
        }
        None
    }

    /// Arena keys in chain order.
    pub(crate) fn keys<'a, V>(&self, items: &'a Items<V>) -> ChainKeys<'a, V> {
        ChainKeys {
            items,
            cur: Some(self.head),
        }
    }
}

pub(crate) struct ChainKeys<'a, V> {
    items: &'a Items<V>,
    cur: Option<ItemKey>,
}

impl<'a, V> Iterator for ChainKeys<'a, V> {
    type Item = ItemKey;

    fn next(&mut self) -> Option<ItemKey> {
        let k = self.cur?;
        self.cur = self.items.get(k).and_then(|item| item.next);
        Some(k)
    }
}
