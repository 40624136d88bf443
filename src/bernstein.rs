//! Bernstein (djb2) string hashing used to pick a bucket.

use core::hash::{BuildHasher, Hasher};

/// Number of buckets used by `BucketTable::new`.
pub const DEFAULT_CAPACITY: usize = 4096;

const SEED: u32 = 5381;

/// Hash `key` with the djb2 recurrence `acc = acc * 33 + byte`, wrapping at 32 bits.
///
/// There is no per-process seed: the same key hashes identically across runs.
pub fn bernstein_hash(key: &str) -> u32 {
    step(SEED, key.as_bytes())
}

#[inline]
fn step(acc: u32, bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(acc, |acc, &b| acc.wrapping_mul(33).wrapping_add(u32::from(b)))
}

/// `Hasher` adapter over the same recurrence. Only the bytes handed to
/// `write` contribute; `finish` widens the 32-bit accumulator.
#[derive(Clone, Copy, Debug)]
pub struct BernsteinHasher {
    acc: u32,
}

impl Default for BernsteinHasher {
    fn default() -> Self {
        Self { acc: SEED }
    }
}

impl Hasher for BernsteinHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.acc = step(self.acc, bytes);
    }

    #[inline]
    fn finish(&self) -> u64 {
        u64::from(self.acc)
    }
}

/// Stateless builder for `BernsteinHasher`; the table's default `S`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildBernstein;

impl BuildHasher for BuildBernstein {
    type Hasher = BernsteinHasher;

    fn build_hasher(&self) -> BernsteinHasher {
        BernsteinHasher::default()
    }
}
