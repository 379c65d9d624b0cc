use std::mem::size_of;

use crate::alloc::Heap;
use crate::error::Result;
use crate::skiplist::{Iter, Node, SkipList};
use crate::types::{Key, Link, Value};

/// In-memory sorted buffer for writes. Wraps a SkipList.
///
/// Every write goes here first. When size exceeds the threshold the
/// memtable is full and the owner should freeze it and start a new one.
///
/// Deletes are handled via tombstones: an empty value that means
/// "this key is deleted." You can't just remove the key because older
/// versions may exist further down the storage hierarchy.
pub struct MemTable {
    data: SkipList<Key, Value>,
    size: usize,
    size_limit: usize,
}

/// Per-entry bookkeeping charged on top of key and value bytes.
const ENTRY_OVERHEAD: usize = size_of::<Node<Key, Value>>() + size_of::<Link>();

impl MemTable {
    /// Create a new empty memtable with given size limit in bytes.
    pub fn new(size_limit: usize) -> Self {
        MemTable {
            data: SkipList::new(),
            size: 0,
            size_limit,
        }
    }

    /// Insert or update a key-value pair.
    pub fn put(&mut self, key: Key, value: Value) -> Result<()> {
        let charged = key.len() + value.len() + ENTRY_OVERHEAD;
        self.data.set(key, value)?;
        // Overwrites are charged too: the size never shrinks.
        self.size += charged;
        Ok(())
    }

    /// Look up a key. Returns None if not found OR if tombstoned.
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        match self.data.get(key) {
            Some(v) if v.is_empty() => None,
            Some(v) => Some(v.as_slice()),
            None => None,
        }
    }

    /// Mark a key as deleted by writing a tombstone (empty value).
    pub fn delete(&mut self, key: Key) -> Result<()> {
        self.put(key, Vec::new())
    }

    /// Sorted iterator over all entries, tombstones included.
    pub fn iter(&self) -> Iter<'_, Key, Value, Heap<Node<Key, Value>>> {
        self.data.iter()
    }

    /// Sorted iterator starting at the first key not less than `key`.
    pub fn iter_from(&self, key: &[u8]) -> Iter<'_, Key, Value, Heap<Node<Key, Value>>> {
        self.data.iter_from(key)
    }

    /// Number of entries, tombstones included.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Approximate memory usage in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if memtable has reached the flush threshold.
    pub fn is_full(&self) -> bool {
        self.size >= self.size_limit
    }
}
