use std::borrow::Borrow;
use std::cmp::Ordering;

use super::{Node, SkipList};
use crate::alloc::Allocator;
use crate::compare::Comparator;
use crate::height::HeightGenerator;
use crate::types::{Link, Pred};

impl<K, V, C, A, G> SkipList<K, V, C, A, G>
where
    A: Allocator<Node<K, V>>,
    G: HeightGenerator,
{
    #[inline]
    pub(super) fn node(&self, idx: usize) -> &Node<K, V> {
        self.alloc.get(idx).expect("dangling node link")
    }

    #[inline]
    pub(super) fn node_mut(&mut self, idx: usize) -> &mut Node<K, V> {
        self.alloc.get_mut(idx).expect("dangling node link")
    }

    /// Successor of `pred` at `level`, where `None` is the head sentinel.
    #[inline]
    pub(super) fn next_of(&self, pred: Pred, level: usize) -> Link {
        match pred {
            None => self.head[level],
            Some(idx) => self.node(idx).forward[level],
        }
    }

    #[inline]
    pub(super) fn set_next(&mut self, pred: Pred, level: usize, next: Link) {
        match pred {
            None => self.head[level] = next,
            Some(idx) => self.node_mut(idx).forward[level] = next,
        }
    }

    /// Descend from the top level in use, advancing while the next key is
    /// strictly less than `key`, and record the last node left behind at
    /// each level in `path`.
    ///
    /// Returns the first level-0 node whose key is not less than `key`.
    /// Among duplicates that is always the first one in level-0 order.
    pub(super) fn search<Q>(&self, key: &Q, path: &mut [Pred]) -> Link
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.descend(key, |level, pred| path[level] = pred)
    }

    /// [`search`](Self::search) without recording predecessors.
    pub(super) fn lower_bound<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.descend(key, |_, _| {})
    }

    /// Slot of the first pair whose key equals `key`.
    pub(super) fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.matching(self.lower_bound(key), key)
    }

    /// Keep a lower-bound result only if it is an exact match.
    pub(super) fn matching<Q>(&self, candidate: Link, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        candidate.filter(|&idx| {
            self.cmp.compare(self.node(idx).key.borrow(), key) == Ordering::Equal
        })
    }

    fn descend<Q, F>(&self, key: &Q, mut record: F) -> Link
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
        F: FnMut(usize, Pred),
    {
        let mut pred: Pred = None;
        for level in (0..self.height).rev() {
            while let Some(next) = self.next_of(pred, level) {
                if self.cmp.compare(self.node(next).key.borrow(), key) != Ordering::Less {
                    break;
                }
                pred = Some(next);
            }
            record(level, pred);
        }
        self.next_of(pred, 0)
    }

    /// Slot of the last node, found by always advancing while a successor
    /// exists and dropping a level when none does.
    pub(super) fn last_index(&self) -> Option<usize> {
        let mut current: Pred = None;
        for level in (0..self.height).rev() {
            while let Some(next) = self.next_of(current, level) {
                current = Some(next);
            }
        }
        current
    }

    /// Like [`last_index`](Self::last_index), but stop one short at each
    /// level so `path` holds the predecessors of the last node.
    pub(super) fn last_path(&self, path: &mut [Pred]) -> Option<usize> {
        let mut pred: Pred = None;
        for level in (0..self.height).rev() {
            while let Some(next) = self.next_of(pred, level) {
                if self.node(next).forward[level].is_none() {
                    break;
                }
                pred = Some(next);
            }
            path[level] = pred;
        }
        self.next_of(pred, 0)
    }
}
