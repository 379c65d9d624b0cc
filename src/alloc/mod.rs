//! Node allocation strategies.
//!
//! Nodes live in an arena and link to each other by slot index rather than
//! by pointer. The allocator owns that arena: every node the list creates
//! goes in through [`Allocator::allocate`] and comes back out through
//! [`Allocator::release`], so swapping the allocator swaps where (and
//! whether) node memory is available.
//!
//! ```text
//! Allocator<T>
//!     ├── Heap<T>         growable, never fails (default)
//!     ├── Fixed<T>        bounded capacity, allocation can fail
//!     └── Tracking<A>     wraps any allocator, counts into a shared Ledger
//! ```

mod fixed;
mod tracking;

pub use fixed::Fixed;
pub use tracking::{Ledger, Tracking};

/// Slab-like node storage with stable slot indices.
///
/// A slot stays valid until it is released. Released slots may be handed
/// out again by later allocations.
pub trait Allocator<T> {
    /// Store `value`, returning its slot. When no memory is available the
    /// value is handed back untouched.
    fn allocate(&mut self, value: T) -> Result<usize, T>;

    /// Remove and return the value in `slot`, if occupied.
    fn release(&mut self, slot: usize) -> Option<T>;

    fn get(&self, slot: usize) -> Option<&T>;

    fn get_mut(&mut self, slot: usize) -> Option<&mut T>;

    /// Number of occupied slots.
    fn live(&self) -> usize;
}

/// Approximate bytes a value occupies, used for allocation accounting.
pub trait Footprint {
    fn footprint(&self) -> usize;
}

/// Growable slab on the system heap. The default allocator.
///
/// Freed slots go on a free list and are reused before the slab grows.
#[derive(Debug)]
pub struct Heap<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
    live: usize,
}

impl<T> Heap<T> {
    pub fn new() -> Self {
        Heap {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Pre-size the slab so the first `capacity` allocations do not grow it.
    pub fn with_capacity(capacity: usize) -> Self {
        Heap {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Slots ever created, occupied or not.
    pub fn slots(&self) -> usize {
        self.slots.len()
    }
}

impl<T> Default for Heap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Allocator<T> for Heap<T> {
    fn allocate(&mut self, value: T) -> Result<usize, T> {
        self.live += 1;
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(value);
                Ok(slot)
            }
            None => {
                self.slots.push(Some(value));
                Ok(self.slots.len() - 1)
            }
        }
    }

    fn release(&mut self, slot: usize) -> Option<T> {
        let value = self.slots.get_mut(slot)?.take()?;
        self.free.push(slot);
        self.live -= 1;
        Some(value)
    }

    #[inline]
    fn get(&self, slot: usize) -> Option<&T> {
        self.slots.get(slot)?.as_ref()
    }

    #[inline]
    fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.slots.get_mut(slot)?.as_mut()
    }

    fn live(&self) -> usize {
        self.live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn released_slots_are_reused() {
        let mut heap: Heap<&str> = Heap::new();
        let a = heap.allocate("a").unwrap();
        let b = heap.allocate("b").unwrap();
        assert_ne!(a, b);
        assert_eq!(heap.live(), 2);

        assert_eq!(heap.release(a), Some("a"));
        assert_eq!(heap.live(), 1);
        assert_eq!(heap.get(a), None);

        let c = heap.allocate("c").unwrap();
        assert_eq!(c, a);
        assert_eq!(heap.slots(), 2);
        assert_eq!(heap.get(c), Some(&"c"));
    }

    #[test]
    fn double_release_is_none() {
        let mut heap: Heap<u32> = Heap::new();
        let a = heap.allocate(7).unwrap();
        assert_eq!(heap.release(a), Some(7));
        assert_eq!(heap.release(a), None);
        assert_eq!(heap.release(99), None);
        assert_eq!(heap.live(), 0);
    }
}
