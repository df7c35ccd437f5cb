// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Recency ordering for cache entries.
//!
//! Entries live in a slab of slots linked into a doubly-linked list, ordered from least recently
//! used (head) to most recently used (tail). A key-to-slot index elsewhere gives O(1) lookup, and
//! relinking a slot at the tail is O(1). Freed slots are recycled through a free list.

#![expect(
    clippy::cast_possible_truncation,
    reason = "SlotIndex is u32 and the cache caps its capacity below u32::MAX"
)]

/// Index type for slots to reduce memory footprint.
pub type SlotIndex = u32;

/// Sentinel value indicating no slot (null pointer equivalent).
pub const NULL_INDEX: SlotIndex = SlotIndex::MAX;

/// A resident cache entry.
#[derive(Debug)]
pub struct Entry<K, V> {
    /// A clone of the key, stored for O(1) index removal during eviction.
    pub key: K,
    /// The cached value.
    pub value: V,
    /// Number of `put`/`get` touches, starting at 1 on insertion.
    pub access_count: u64,
}

/// A slab slot holding at most one entry and its list links.
#[derive(Debug)]
struct Slot<K, V> {
    entry: Option<Entry<K, V>>,
    /// Towards the most recently used end.
    next: SlotIndex,
    /// Towards the least recently used end.
    prev: SlotIndex,
}

impl<K, V> Slot<K, V> {
    const fn vacant() -> Self {
        Self {
            entry: None,
            next: NULL_INDEX,
            prev: NULL_INDEX,
        }
    }
}

/// Entries ordered from least to most recently used.
#[derive(Debug)]
pub struct RecencyList<K, V> {
    /// Slab of slots, grown on demand.
    slots: Vec<Slot<K, V>>,

    /// Least recently used entry.
    head: Option<SlotIndex>,

    /// Most recently used entry.
    tail: Option<SlotIndex>,

    /// Free list head for recycling slots. Free slots are chained through `next`.
    free_head: Option<SlotIndex>,

    /// Current number of entries in the list.
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    /// Creates an empty list, reserving room for `capacity_hint` entries.
    #[must_use]
    pub fn with_capacity(capacity_hint: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity_hint),
            head: None,
            tail: None,
            free_head: None,
            len: 0,
        }
    }

    /// Returns the current number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no entries.
    #[cfg(test)]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocates a slot, recycling a freed one when possible.
    fn alloc_slot(&mut self) -> SlotIndex {
        if let Some(idx) = self.free_head {
            let next_free = self.slots[idx as usize].next;
            self.free_head = (next_free != NULL_INDEX).then_some(next_free);
            return idx;
        }
        self.slots.push(Slot::vacant());
        (self.slots.len() - 1) as SlotIndex
    }

    /// Returns a slot to the free list.
    fn free_slot(&mut self, idx: SlotIndex) {
        let slot = &mut self.slots[idx as usize];
        slot.entry = None;
        slot.prev = NULL_INDEX;
        slot.next = self.free_head.unwrap_or(NULL_INDEX);
        self.free_head = Some(idx);
    }

    /// Links a detached slot at the most recently used end.
    fn link_back(&mut self, idx: SlotIndex) {
        let old_tail = self.tail;
        {
            let slot = &mut self.slots[idx as usize];
            slot.prev = old_tail.unwrap_or(NULL_INDEX);
            slot.next = NULL_INDEX;
        }
        match old_tail {
            Some(tail) => self.slots[tail as usize].next = idx,
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    /// Detaches a slot from its neighbors without freeing it.
    fn unlink(&mut self, idx: SlotIndex) {
        let (prev, next) = {
            let slot = &self.slots[idx as usize];
            (slot.prev, slot.next)
        };

        if prev == NULL_INDEX {
            // This was the head
            self.head = (next != NULL_INDEX).then_some(next);
        } else {
            self.slots[prev as usize].next = next;
        }

        if next == NULL_INDEX {
            // This was the tail
            self.tail = (prev != NULL_INDEX).then_some(prev);
        } else {
            self.slots[next as usize].prev = prev;
        }
    }

    /// Appends an entry with an access count of 1 at the most recently used end.
    pub fn push_back(&mut self, key: K, value: V) -> SlotIndex {
        let idx = self.alloc_slot();
        self.slots[idx as usize].entry = Some(Entry {
            key,
            value,
            access_count: 1,
        });
        self.link_back(idx);
        self.len += 1;
        idx
    }

    /// Records an access: bumps the access count and moves the entry to the most recently
    /// used end. Vacant slots are ignored.
    pub fn touch(&mut self, idx: SlotIndex) {
        let Some(entry) = self.slots.get_mut(idx as usize).and_then(|slot| slot.entry.as_mut()) else {
            return;
        };
        entry.access_count = entry.access_count.saturating_add(1);

        if self.tail != Some(idx) {
            self.unlink(idx);
            self.link_back(idx);
        }
    }

    /// Returns the entry stored in a slot.
    #[must_use]
    pub fn entry(&self, idx: SlotIndex) -> Option<&Entry<K, V>> {
        self.slots.get(idx as usize)?.entry.as_ref()
    }

    /// Returns the entry stored in a slot, mutably.
    #[must_use]
    pub fn entry_mut(&mut self, idx: SlotIndex) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(idx as usize)?.entry.as_mut()
    }

    /// Removes an entry from the list, returning it.
    pub fn remove(&mut self, idx: SlotIndex) -> Option<Entry<K, V>> {
        let entry = self.slots.get_mut(idx as usize)?.entry.take()?;
        self.unlink(idx);
        self.free_slot(idx);
        self.len -= 1;
        Some(entry)
    }

    /// Drops every entry, keeping the allocated slab.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.tail = None;
        self.free_head = None;
        self.len = 0;
    }

    /// Iterates entries from least to most recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }
}

/// Iterator over a [`RecencyList`] from least to most recently used.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<SlotIndex>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (SlotIndex, &'a Entry<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let slot = &self.list.slots[idx as usize];
        self.cursor = (slot.next != NULL_INDEX).then_some(slot.next);
        self.remaining = self.remaining.saturating_sub(1);
        slot.entry.as_ref().map(|entry| (idx, entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
