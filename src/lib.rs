//! bucket-hashmap: a fixed-capacity map from string keys to `u32` values
//! that many threads can read and write at once.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a bucket array whose slots lock independently, so writers to
//!   different buckets never contend.
//! - Layers:
//!   - `bernstein`: djb2 string hash (`acc = acc * 33 + byte`, seed 5381,
//!     wrapping at 32 bits) plus `Hasher`/`BuildHasher` adapters. Bucket
//!     index is `hash % capacity`.
//!   - `Chain`: the entries of one bucket in a `SlotMap`, searched by linear
//!     scan; insert-or-update keeps one entry per key and preserves the
//!     entry's handle on update.
//!   - `BucketTable<S>`: a boxed slice of `RwLock<Chain>` of fixed length;
//!     the public map.
//!
//! Constraints
//! - Capacity is chosen at construction and never changes; no rehashing.
//! - No removal and no iteration; an entry lives until the table drops.
//! - Hashing is deterministic across runs and offers no flooding resistance.
//!
//! Locking
//! - `add_entry` takes its bucket's lock exclusively for the whole
//!   find-then-mutate sequence. `contains`, `get_value` and `expect_value`
//!   take it shared. Readers never observe a half-written chain, and readers
//!   of one bucket do not block each other.
//! - Lock waits are unbounded and cannot be cancelled. `parking_lot` locks do
//!   not poison, so there is no lock failure to surface.
//!
//! Failure policy
//! - `get_value` returns `None` for an absent key. `expect_value` keeps the
//!   fatal contract and panics instead.
//! - Allocation failure aborts through the global allocator.
//! - A zero capacity is the only recoverable error (`CapacityError::Zero`).
//!
//! Teardown
//! - Dropping the table (or calling `destroy`) frees every entry; both need
//!   ownership, so no other thread can still be using the table.

pub mod bernstein;
mod bucket_table;
pub mod chain;
mod chain_proptest;

// Public surface
pub use bernstein::{bernstein_hash, BernsteinHasher, BuildBernstein, DEFAULT_CAPACITY};
pub use bucket_table::{BucketTable, CapacityError};
