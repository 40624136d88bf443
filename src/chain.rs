//! Chain: the per-bucket collection of entries that resolves collisions.
//!
//! Entries live in a `SlotMap` so each one has a stable generational handle;
//! lookups are a linear scan comparing whole keys. The chain never hashes and
//! never removes entries, so a handle stays valid for the chain's lifetime.
//! Every chain carries a process-unique id; handles remember it, and a
//! handle presented to a different chain resolves to nothing.

use core::num::NonZeroU64;
use core::sync::atomic::{AtomicU64, Ordering};
use slotmap::{DefaultKey, SlotMap};

static NEXT_CHAIN_ID: AtomicU64 = AtomicU64::new(1);

fn next_chain_id() -> NonZeroU64 {
    let id = NEXT_CHAIN_ID.fetch_add(1, Ordering::Relaxed);
    // Starts at 1 and would need 2^64 chains to wrap.
    NonZeroU64::new(id).unwrap_or(NonZeroU64::MIN)
}

/// Names one entry inside the chain that produced it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct EntryHandle {
    chain: NonZeroU64,
    slot: DefaultKey,
}

impl EntryHandle {
    pub(crate) fn new(chain: NonZeroU64, slot: DefaultKey) -> Self {
        EntryHandle { chain, slot }
    }
}

#[derive(Debug)]
struct Entry {
    key: Box<str>,
    value: u32,
}

/// Outcome of `Chain::insert_or_update`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Upsert {
    /// The key was absent and a new entry now holds it.
    Inserted(EntryHandle),
    /// The key was present; its entry was overwritten in place.
    Updated { handle: EntryHandle, previous: u32 },
}

impl Upsert {
    pub fn handle(&self) -> EntryHandle {
        match *self {
            Upsert::Inserted(h) => h,
            Upsert::Updated { handle, .. } => handle,
        }
    }

    pub fn previous(&self) -> Option<u32> {
        match *self {
            Upsert::Inserted(_) => None,
            Upsert::Updated { previous, .. } => Some(previous),
        }
    }
}

/// Entries of one bucket, at most one per key.
#[derive(Debug)]
pub struct Chain {
    id: NonZeroU64,
    slots: SlotMap<DefaultKey, Entry>,
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

impl Chain {
    pub fn new() -> Self {
        Self {
            id: next_chain_id(),
            slots: SlotMap::with_key(),
        }
    }

    // Slot key for `h`, if `h` came from this chain.
    fn slot_of(&self, h: EntryHandle) -> Option<DefaultKey> {
        (h.chain == self.id).then_some(h.slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// First entry whose key equals `key` byte for byte.
    pub fn find(&self, key: &str) -> Option<EntryHandle> {
        self.slots
            .iter()
            .find(|(_, e)| &*e.key == key)
            .map(|(k, _)| EntryHandle::new(self.id, k))
    }

    pub fn insert_or_update(&mut self, key: &str, value: u32) -> Upsert {
        if let Some(handle) = self.find(key) {
            let entry = &mut self.slots[handle.slot];
            let previous = core::mem::replace(&mut entry.value, value);
            return Upsert::Updated { handle, previous };
        }
        let k = self.slots.insert(Entry {
            key: key.into(),
            value,
        });
        Upsert::Inserted(EntryHandle::new(self.id, k))
    }

    /// Key of the entry `h` names; `None` for a handle from another chain.
    pub fn key(&self, h: EntryHandle) -> Option<&str> {
        self.slots.get(self.slot_of(h)?).map(|e| &*e.key)
    }

    pub fn value(&self, h: EntryHandle) -> Option<u32> {
        self.slots.get(self.slot_of(h)?).map(|e| e.value)
    }

    /// Value stored under `key`, if any.
    pub fn lookup(&self, key: &str) -> Option<u32> {
        self.find(key).and_then(|h| self.value(h))
    }

    /// Number of entries carrying `key`. Uniqueness keeps this at 0 or 1.
    pub fn occurrences(&self, key: &str) -> usize {
        self.slots.values().filter(|e| &*e.key == key).count()
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.slots.values().map(|e| (&*e.key, e.value))
    }
}
