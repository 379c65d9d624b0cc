//! # Skip List Engine
//!
//! An ordered in-memory index built on a skip list, meant as the building
//! block of a memtable in a log-structured storage engine.
//!
//! ## Core idea
//! Keep every pair on a sorted linked chain (level 0), then promote a random
//! subset of nodes onto sparser "express" chains above it. A search starts on
//! the sparsest chain and drops a level each time it would overshoot, giving
//! O(log n) expected lookups without any rebalancing.
//!
//! ## Bag semantics
//! [`SkipList::add`] never replaces: equal keys sit side by side. Use
//! [`SkipList::set`] for replace-or-insert.
//!
//! ```
//! use skiplist_engine::SkipList;
//!
//! let mut sl = SkipList::seeded(23);
//! sl.add("bar", "baz").unwrap();
//! sl.add("foo", "bar").unwrap();
//! assert_eq!(sl.first(), Some((&"bar", &"baz")));
//! assert_eq!(sl.last(), Some((&"foo", &"bar")));
//! ```

pub mod alloc;
pub mod compare;
pub mod config;
pub mod error;
pub mod height;
pub mod memtable;
pub mod skiplist;
pub mod types;

// Public re-exports for the top-level API
pub use alloc::{Allocator, Fixed, Footprint, Heap, Ledger, Tracking};
pub use compare::{Comparator, Natural};
pub use config::Options;
pub use error::{Error, Result};
pub use height::{Geometric, HeightGenerator};
pub use memtable::MemTable;
pub use skiplist::{Iter, Node, SkipList, Stats};
