//! # Entry Arena
//!
//! Index-addressed storage for the nodes of a chained hash table. Chains link
//! entries by [`EntryIndex`] instead of by pointer, and released slots are kept
//! on an intrusive free list so the next allocation reuses them before the
//! backing vector grows.
//!
//! Growth goes through `Vec::try_reserve`, so running out of memory surfaces as
//! [`Error::OutOfMemory`] instead of aborting the process.

use std::ops::{Index, IndexMut};

use log::trace;

use crate::error::{Error, Result};

/// Position of an entry inside an [`EntryArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryIndex(usize);

/// A single key/value node of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: i32,
    pub value: i32,
    /// Successor in the same chain, if any.
    pub next: Option<EntryIndex>,
}

#[derive(Debug)]
enum Slot {
    Occupied(Entry),
    Vacant { next_free: Option<EntryIndex> },
}

/// Slot storage with a free list of released indices.
#[derive(Debug, Default)]
pub struct EntryArena {
    slots: Vec<Slot>,
    free_head: Option<EntryIndex>,
    live: usize,
}

impl EntryArena {
    /// Creates an arena with no slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn live(&self) -> usize {
        self.live
    }

    /// Number of released slots waiting to be reused.
    pub fn free_slots(&self) -> usize {
        self.slots.len() - self.live
    }

    /// Total number of slots, occupied or not.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Makes room for `additional` more slots beyond the ones already allocated.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.slots
            .try_reserve(additional)
            .map_err(|_| Error::OutOfMemory {
                requested: additional,
            })
    }

    /// Stores `entry`, reusing a released slot when one is available.
    pub fn alloc(&mut self, entry: Entry) -> Result<EntryIndex> {
        if let Some(index) = self.free_head {
            match std::mem::replace(&mut self.slots[index.0], Slot::Occupied(entry)) {
                Slot::Vacant { next_free } => self.free_head = next_free,
                Slot::Occupied(_) => unreachable!("free list points at occupied slot {}", index.0),
            }
            self.live += 1;
            trace!("reused arena slot {}", index.0);
            return Ok(index);
        }

        self.reserve(1)?;
        let index = EntryIndex(self.slots.len());
        self.slots.push(Slot::Occupied(entry));
        self.live += 1;
        trace!("grew arena to {} slots", self.slots.len());
        Ok(index)
    }

    /// Takes the entry out of `index` and puts the slot on the free list.
    ///
    /// Returns `None` if the slot is already vacant or out of bounds.
    pub fn release(&mut self, index: EntryIndex) -> Option<Entry> {
        let slot = self.slots.get_mut(index.0)?;
        if let Slot::Vacant { .. } = slot {
            return None;
        }
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match std::mem::replace(slot, vacant) {
            Slot::Occupied(entry) => {
                self.free_head = Some(index);
                self.live -= 1;
                Some(entry)
            }
            Slot::Vacant { .. } => None,
        }
    }

    /// Returns the entry at `index`, or `None` if the slot is vacant.
    pub fn get(&self, index: EntryIndex) -> Option<&Entry> {
        match self.slots.get(index.0) {
            Some(Slot::Occupied(entry)) => Some(entry),
            _ => None,
        }
    }

    /// Mutable counterpart of [`EntryArena::get`].
    pub fn get_mut(&mut self, index: EntryIndex) -> Option<&mut Entry> {
        match self.slots.get_mut(index.0) {
            Some(Slot::Occupied(entry)) => Some(entry),
            _ => None,
        }
    }
}

impl Index<EntryIndex> for EntryArena {
    type Output = Entry;

    fn index(&self, index: EntryIndex) -> &Entry {
        match self.get(index) {
            Some(entry) => entry,
            None => panic!("no live entry at arena slot {}", index.0),
        }
    }
}

impl IndexMut<EntryIndex> for EntryArena {
    fn index_mut(&mut self, index: EntryIndex) -> &mut Entry {
        match self.get_mut(index) {
            Some(entry) => entry,
            None => panic!("no live entry at arena slot {}", index.0),
        }
    }
}
