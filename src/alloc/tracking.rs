use std::cell::Cell;
use std::marker::PhantomData;
use std::rc::Rc;

use super::{Allocator, Footprint, Heap};

#[derive(Debug, Default)]
struct Counters {
    allocations: Cell<usize>,
    releases: Cell<usize>,
    failures: Cell<usize>,
    bytes: Cell<usize>,
}

/// Shared view of a [`Tracking`] allocator's counters.
///
/// The ledger is a cheap clone that outlives the list owning the allocator,
/// so a test can destroy the list and still check for leaks.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    counters: Rc<Counters>,
}

impl Ledger {
    pub fn allocations(&self) -> usize {
        self.counters.allocations.get()
    }

    pub fn releases(&self) -> usize {
        self.counters.releases.get()
    }

    /// Allocations refused by the inner allocator.
    pub fn failures(&self) -> usize {
        self.counters.failures.get()
    }

    /// Allocations not yet released.
    pub fn outstanding(&self) -> usize {
        self.allocations() - self.releases()
    }

    /// Bytes held by outstanding allocations.
    pub fn bytes(&self) -> usize {
        self.counters.bytes.get()
    }

    pub fn is_balanced(&self) -> bool {
        self.outstanding() == 0 && self.bytes() == 0
    }

    fn bump(cell: &Cell<usize>, by: usize) {
        cell.set(cell.get() + by);
    }
}

/// Wraps an allocator and records every allocation and release in a [`Ledger`].
///
/// ```
/// use skiplist_engine::{Options, SkipList, Tracking, Natural};
///
/// let tracking = Tracking::new();
/// let ledger = tracking.ledger();
/// let mut sl = SkipList::with_options(Natural, tracking, &Options::default()).unwrap();
/// sl.add(1, 1).unwrap();
/// assert_eq!(ledger.outstanding(), 1);
/// sl.destroy();
/// assert!(ledger.is_balanced());
/// ```
#[derive(Debug)]
pub struct Tracking<T, A = Heap<T>> {
    inner: A,
    ledger: Ledger,
    _marker: PhantomData<T>,
}

impl<T> Tracking<T, Heap<T>> {
    pub fn new() -> Self {
        Self::wrap(Heap::new())
    }
}

impl<T> Default for Tracking<T, Heap<T>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A> Tracking<T, A> {
    pub fn wrap(inner: A) -> Self {
        Tracking {
            inner,
            ledger: Ledger::default(),
            _marker: PhantomData,
        }
    }

    pub fn ledger(&self) -> Ledger {
        self.ledger.clone()
    }
}

impl<T, A> Allocator<T> for Tracking<T, A>
where
    T: Footprint,
    A: Allocator<T>,
{
    fn allocate(&mut self, value: T) -> Result<usize, T> {
        let bytes = value.footprint();
        let counters = &self.ledger.counters;
        match self.inner.allocate(value) {
            Ok(slot) => {
                Ledger::bump(&counters.allocations, 1);
                Ledger::bump(&counters.bytes, bytes);
                log::trace!("alloc slot {slot}, {bytes} bytes");
                Ok(slot)
            }
            Err(value) => {
                Ledger::bump(&counters.failures, 1);
                Err(value)
            }
        }
    }

    fn release(&mut self, slot: usize) -> Option<T> {
        let value = self.inner.release(slot)?;
        let bytes = value.footprint();
        let counters = &self.ledger.counters;
        Ledger::bump(&counters.releases, 1);
        counters.bytes.set(counters.bytes.get() - bytes);
        log::trace!("free slot {slot}, {bytes} bytes");
        Some(value)
    }

    #[inline]
    fn get(&self, slot: usize) -> Option<&T> {
        self.inner.get(slot)
    }

    #[inline]
    fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.inner.get_mut(slot)
    }

    fn live(&self) -> usize {
        self.inner.live()
    }
}
