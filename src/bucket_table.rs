//! BucketTable: a fixed array of independently locked chains.

use crate::bernstein::{BuildBernstein, DEFAULT_CAPACITY};
use crate::chain::{Chain, Upsert};
use core::fmt;
use core::hash::{BuildHasher, Hasher};
use parking_lot::RwLock;

/// Rejected table configuration.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CapacityError {
    /// A table needs at least one bucket to map keys onto.
    Zero,
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityError::Zero => f.write_str("bucket table capacity must be non-zero"),
        }
    }
}

impl std::error::Error for CapacityError {}

/// One slot of the table: a chain and the lock guarding it.
#[derive(Debug, Default)]
struct Bucket {
    chain: RwLock<Chain>,
}

/// Fixed-capacity map from string keys to `u32`, one lock per bucket.
pub struct BucketTable<S = BuildBernstein> {
    hasher: S,
    buckets: Box<[Bucket]>,
}

impl BucketTable {
    /// Table with `DEFAULT_CAPACITY` buckets.
    pub fn new() -> Self {
        Self::build(DEFAULT_CAPACITY, BuildBernstein)
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        Self::with_capacity_and_hasher(capacity, BuildBernstein)
    }
}

impl Default for BucketTable {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> BucketTable<S>
where
    S: BuildHasher,
{
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self, CapacityError> {
        if capacity == 0 {
            return Err(CapacityError::Zero);
        }
        Ok(Self::build(capacity, hasher))
    }

    fn build(capacity: usize, hasher: S) -> Self {
        let buckets: Box<[Bucket]> = (0..capacity).map(|_| Bucket::default()).collect();
        tracing::debug!(capacity, "created bucket table");
        Self { hasher, buckets }
    }

    // Only the key bytes are fed to the hasher; `Hash for str` would append
    // a terminator and change every bucket index.
    fn make_hash(&self, key: &str) -> u32 {
        let mut h = self.hasher.build_hasher();
        h.write(key.as_bytes());
        h.finish() as u32
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket that `key` maps to: `hash(key) % capacity`.
    pub fn bucket_index(&self, key: &str) -> usize {
        self.make_hash(key) as usize % self.buckets.len()
    }

    fn bucket(&self, key: &str) -> &Bucket {
        &self.buckets[self.bucket_index(key)]
    }

    /// Whether `key` has ever been added. Takes the bucket lock in shared mode.
    pub fn contains(&self, key: &str) -> bool {
        self.bucket(key).chain.read().find(key).is_some()
    }

    /// Last value written for `key`, or `None` if it was never added.
    pub fn get_value(&self, key: &str) -> Option<u32> {
        self.bucket(key).chain.read().lookup(key)
    }

    /// Value for a key the caller knows is present.
    ///
    /// # Panics
    /// Panics if `key` was never added; check with `contains` first when
    /// presence is not already established.
    pub fn expect_value(&self, key: &str) -> u32 {
        match self.get_value(key) {
            Some(v) => v,
            None => panic!("key {key:?} is not present in the bucket table"),
        }
    }

    /// Insert `key` or overwrite its value in place, returning the previous
    /// value. Blocks while another writer or any reader holds this key's bucket.
    pub fn add_entry(&self, key: &str, value: u32) -> Option<u32> {
        let index = self.bucket_index(key);
        let mut chain = self.buckets[index].chain.write();
        let res = chain.insert_or_update(key, value);
        if let Upsert::Inserted(_) = res {
            tracing::trace!(bucket = index, chain_len = chain.len(), "new entry");
        }
        res.previous()
    }

    /// Number of entries in bucket `index`.
    ///
    /// # Panics
    /// Panics if `index >= capacity()`.
    pub fn bucket_len(&self, index: usize) -> usize {
        self.buckets[index].chain.read().len()
    }

    /// How many entries in `key`'s bucket carry `key`; 0 or 1.
    pub fn occurrences(&self, key: &str) -> usize {
        self.bucket(key).chain.read().occurrences(key)
    }

    /// Total entries across all buckets. Buckets are visited one at a time,
    /// so concurrent writers may make the sum momentarily stale.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.chain.read().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|b| b.chain.read().is_empty())
    }

    /// Tear the table down, returning how many entries were released.
    pub fn destroy(mut self) -> usize {
        // Owned: no other reference exists, so no locking is needed.
        self.buckets.iter_mut().map(|b| b.chain.get_mut().len()).sum()
    }
}

impl<S> Drop for BucketTable<S> {
    fn drop(&mut self) {
        let mut released = 0usize;
        for b in self.buckets.iter_mut() {
            released += core::mem::take(b.chain.get_mut()).len();
        }
        tracing::debug!(capacity = self.buckets.len(), released, "destroyed bucket table");
    }
}

impl<S> fmt::Debug for BucketTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketTable")
            .field("capacity", &self.buckets.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bernstein::bernstein_hash;

    #[test]
    fn zero_capacity_rejected() {
        match BucketTable::with_capacity(0) {
            Err(CapacityError::Zero) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn index_follows_bernstein_modulo() {
        let t = BucketTable::with_capacity(7).unwrap();
        for key in ["", "a", "alpha", "beta", "gamma"] {
            assert_eq!(t.bucket_index(key), bernstein_hash(key) as usize % 7);
        }
    }

    #[test]
    fn add_reports_previous_value() {
        let t = BucketTable::with_capacity(4).unwrap();
        assert_eq!(t.add_entry("k", 1), None);
        assert_eq!(t.add_entry("k", 2), Some(1));
        assert_eq!(t.get_value("k"), Some(2));
        assert_eq!(t.occurrences("k"), 1);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn destroy_counts_entries() {
        let t = BucketTable::with_capacity(3).unwrap();
        for i in 0..10u32 {
            t.add_entry(&format!("k{i}"), i);
        }
        t.add_entry("k0", 100);
        assert_eq!(t.destroy(), 10);
    }
}
