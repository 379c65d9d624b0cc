use std::iter::FusedIterator;
use std::marker::PhantomData;

use super::Node;
use crate::alloc::Allocator;
use crate::types::Link;

/// Iterator over skip list pairs in ascending key order.
///
/// Simply follows level 0 forward links; level 0 is a sorted chain
/// containing every pair. Duplicate keys come out adjacent.
pub struct Iter<'a, K, V, A> {
    alloc: &'a A,
    current: Link,
    _marker: PhantomData<&'a (K, V)>,
}

impl<'a, K, V, A> Iter<'a, K, V, A> {
    pub(super) fn new(alloc: &'a A, start: Link) -> Self {
        Iter {
            alloc,
            current: start,
            _marker: PhantomData,
        }
    }
}

impl<'a, K: 'a, V: 'a, A> Iterator for Iter<'a, K, V, A>
where
    A: Allocator<Node<K, V>>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.alloc.get(self.current?)?;
        self.current = node.forward[0];
        Some((&node.key, &node.value))
    }
}

impl<'a, K: 'a, V: 'a, A> FusedIterator for Iter<'a, K, V, A> where A: Allocator<Node<K, V>> {}

/// Owning walk down level 0 that releases each node as it goes.
///
/// Whatever is left is released on drop, so a caller that stops early or
/// panics mid-walk still hands every node back to the allocator.
pub(super) struct Drain<'a, K, V, A>
where
    A: Allocator<Node<K, V>>,
{
    alloc: &'a mut A,
    current: Link,
    _marker: PhantomData<(K, V)>,
}

impl<'a, K, V, A> Drain<'a, K, V, A>
where
    A: Allocator<Node<K, V>>,
{
    pub(super) fn new(alloc: &'a mut A, start: Link) -> Self {
        Drain {
            alloc,
            current: start,
            _marker: PhantomData,
        }
    }
}

impl<K, V, A> Iterator for Drain<'_, K, V, A>
where
    A: Allocator<Node<K, V>>,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.alloc.release(self.current?)?;
        self.current = node.forward[0];
        Some(node.into_pair())
    }
}

impl<K, V, A> Drop for Drain<'_, K, V, A>
where
    A: Allocator<Node<K, V>>,
{
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}

impl<K, V, A> Clone for Iter<'_, K, V, A> {
    fn clone(&self) -> Self {
        Iter {
            alloc: self.alloc,
            current: self.current,
            _marker: PhantomData,
        }
    }
}
