use super::{Allocator, Heap};

/// Capacity-bounded slab.
///
/// The whole slab is reserved up front. Once `capacity` slots are live,
/// further allocations fail and the list reports
/// [`Error::AllocationFailure`](crate::Error::AllocationFailure).
#[derive(Debug)]
pub struct Fixed<T> {
    inner: Heap<T>,
    capacity: usize,
}

impl<T> Fixed<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Fixed {
            inner: Heap::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.inner.live() >= self.capacity
    }
}

impl<T> Allocator<T> for Fixed<T> {
    fn allocate(&mut self, value: T) -> Result<usize, T> {
        if self.is_full() {
            return Err(value);
        }
        self.inner.allocate(value)
    }

    fn release(&mut self, slot: usize) -> Option<T> {
        self.inner.release(slot)
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
