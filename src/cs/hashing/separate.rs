//! # Separate Chaining Hash Table
//!
//! A fixed-size map from `i32` keys to `i32` values that resolves collisions with
//! singly linked chains, one per bucket. Chain nodes live in an [`EntryArena`] and
//! link to each other by index.
//!
//! The table is tuned to collide, not to perform:
//! - The hash is `(key * 31 + 17) mod 64`, deliberately weak.
//! - Inserts never check for an existing key. A repeated key gets a second entry
//!   ahead of the first, so lookups see the most recent value.
//! - [`ChainedHashTable::count_chain_length`] stops counting after
//!   [`CHAIN_COUNT_CAP`] nodes and therefore reports at most `CHAIN_COUNT_CAP + 1`.
//! - There is no resizing or rehashing.
//!
//! ## Example
//! ```rust
//! use hashbench::cs::hashing::separate::ChainedHashTable;
//!
//! let mut table = ChainedHashTable::new();
//! table.insert(17, 20).unwrap();
//! table.insert(17, 30).unwrap();
//!
//! assert_eq!(table.lookup(17), Some(30));
//! assert!(table.delete(17));
//! assert_eq!(table.lookup(17), Some(20));
//! ```

use log::debug;

use super::arena::{Entry, EntryArena, EntryIndex};
use crate::error::{Error, Result};

/// Number of buckets in every table.
pub const TABLE_SIZE: usize = 64;

/// Multiplier of the bucket hash.
pub const HASH_MULTIPLIER: i64 = 31;

/// Offset of the bucket hash.
pub const HASH_OFFSET: i64 = 17;

/// Once a chain count passes this value, counting stops.
pub const CHAIN_COUNT_CAP: usize = 5;

/// Legacy "key not found" value for callers that print a plain integer.
pub const NOT_FOUND: i32 = -1;

/// Maps a key to its bucket: `(key * 31 + 17) mod TABLE_SIZE`.
///
/// Evaluated in 64-bit arithmetic so no `i32` key overflows. Negative keys take the
/// non-negative (Euclidean) remainder.
pub fn hash(key: i32) -> usize {
    (i64::from(key) * HASH_MULTIPLIER + HASH_OFFSET).rem_euclid(TABLE_SIZE as i64) as usize
}

/// A separate-chaining hash table with a fixed bucket count.
#[derive(Debug)]
pub struct ChainedHashTable {
    buckets: [Option<EntryIndex>; TABLE_SIZE],
    arena: EntryArena,
    /// The number of live entries, duplicates included.
    len: usize,
}

impl Default for ChainedHashTable {
    fn default() -> Self {
        Self {
            buckets: [None; TABLE_SIZE],
            arena: EntryArena::new(),
            len: 0,
        }
    }
}

impl ChainedHashTable {
    /// Creates a table with every bucket empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no entry is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the fixed number of buckets, always [`TABLE_SIZE`].
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Acquires storage for `additional` entries up front.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.arena.reserve(additional)
    }

    /// Prepends a new entry to the chain of `hash(key)`.
    ///
    /// Existing entries with the same key are left in place behind the new one.
    /// Fails only with [`Error::OutOfMemory`].
    pub fn insert(&mut self, key: i32, value: i32) -> Result<()> {
        let bucket = hash(key);
        let index = self.arena.alloc(Entry {
            key,
            value,
            next: self.buckets[bucket],
        })?;
        self.buckets[bucket] = Some(index);
        self.len += 1;
        Ok(())
    }

    /// Returns the value of the first entry in the chain whose key matches,
    /// which is the most recently inserted one.
    pub fn lookup(&self, key: i32) -> Option<i32> {
        let mut cursor = self.buckets[hash(key)];
        while let Some(index) = cursor {
            let entry = &self.arena[index];
            if entry.key == key {
                return Some(entry.value);
            }
            cursor = entry.next;
        }
        None
    }

    /// Unlinks and releases the first entry matching `key`.
    ///
    /// Returns false, leaving the table untouched, if no entry matches. Older
    /// duplicates of the key stay in the chain.
    pub fn delete(&mut self, key: i32) -> bool {
        let bucket = hash(key);
        let mut prev: Option<EntryIndex> = None;
        let mut cursor = self.buckets[bucket];

        while let Some(index) = cursor {
            let (entry_key, next) = {
                let entry = &self.arena[index];
                (entry.key, entry.next)
            };

            if entry_key == key {
                match prev {
                    None => self.buckets[bucket] = next,
                    Some(p) => self.arena[p].next = next,
                }
                self.arena.release(index);
                self.len -= 1;
                return true;
            }

            prev = Some(index);
            cursor = next;
        }
        false
    }

    /// Counts the nodes of one chain, giving up once the count exceeds
    /// [`CHAIN_COUNT_CAP`].
    ///
    /// Exact for chains of up to `CHAIN_COUNT_CAP + 1` nodes; longer chains all
    /// report `CHAIN_COUNT_CAP + 1`.
    pub fn count_chain_length(&self, bucket: usize) -> Result<usize> {
        let mut cursor = self.head(bucket)?;
        let mut count = 0;

        while let Some(index) = cursor {
            count += 1;
            cursor = self.arena[index].next;

            if count > CHAIN_COUNT_CAP {
                break;
            }
        }

        Ok(count)
    }

    /// Iterates one chain from head to tail.
    pub fn chain(&self, bucket: usize) -> Result<Chain<'_>> {
        Ok(Chain {
            arena: &self.arena,
            cursor: self.head(bucket)?,
        })
    }

    /// Copies the `(key, value)` pairs of every bucket, head first.
    pub fn chain_snapshot(&self) -> Vec<Vec<(i32, i32)>> {
        self.buckets
            .iter()
            .map(|&head| {
                Chain {
                    arena: &self.arena,
                    cursor: head,
                }
                .map(|entry| (entry.key, entry.value))
                .collect()
            })
            .collect()
    }

    /// Releases every entry, walking each chain head to tail, and returns how
    /// many entries were released.
    pub fn teardown(mut self) -> usize {
        let mut released = 0;

        for slot in self.buckets.iter_mut() {
            let mut cursor = slot.take();
            while let Some(index) = cursor {
                match self.arena.release(index) {
                    Some(entry) => {
                        released += 1;
                        cursor = entry.next;
                    }
                    None => break,
                }
            }
        }

        self.len = 0;
        debug!("table torn down, released {} entries", released);
        released
    }

    fn head(&self, bucket: usize) -> Result<Option<EntryIndex>> {
        self.buckets
            .get(bucket)
            .copied()
            .ok_or(Error::BucketOutOfRange {
                index: bucket,
                buckets: TABLE_SIZE,
            })
    }
}

/// Iterator over the entries of one chain, head first.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    arena: &'a EntryArena,
    cursor: Option<EntryIndex>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<&'a Entry> {
        let arena = self.arena;
        let entry = &arena[self.cursor?];
        self.cursor = entry.next;
        Some(entry)
    }
}
