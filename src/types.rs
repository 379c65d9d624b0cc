/// Raw key bytes, as stored by the [`MemTable`](crate::memtable::MemTable).
pub type Key = Vec<u8>;

/// Raw value bytes. An empty value is a tombstone in the memtable.
pub type Value = Vec<u8>;

/// Forward link at one level: the slot of the next node, or `None` at the end.
pub type Link = Option<usize>;

/// Predecessor at one level recorded by a search. `None` is the head sentinel.
pub type Pred = Option<usize>;
