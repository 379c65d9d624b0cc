mod debug;
mod iter;
mod node;
mod search;

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::ops::ControlFlow;

use crate::alloc::{Allocator, Heap};
use crate::compare::{Comparator, Natural};
use crate::config::{HEIGHT_LIMIT, Options};
use crate::error::{Error, Result};
use crate::height::{Geometric, HeightGenerator};
use crate::types::{Link, Pred};

use iter::Drain;
pub use iter::Iter;
pub use node::Node;

/// A probabilistic ordered bag: keys are sorted, duplicates are kept.
///
/// Why skip list over red-black tree?
///   - Simpler to implement correctly
///   - Level 0 is a plain sorted chain, so ordered scans are a linked-list walk
///   - This is what LevelDB uses for its memtable
///
/// Average case: O(log n) insert, O(log n) lookup, O(n) iteration.
/// Worst case: O(n), but astronomically unlikely with random heights.
///
/// The list is generic over three injected strategies:
///   - `C`: the key [`Comparator`] (default [`Natural`], i.e. `Ord`)
///   - `A`: the node [`Allocator`] (default [`Heap`])
///   - `G`: the [`HeightGenerator`] (default [`Geometric`], p = 0.5)
///
/// Not thread-safe. Share it behind a `Mutex` if you must.
pub struct SkipList<K, V, C = Natural, A = Heap<Node<K, V>>, G = Geometric>
where
    A: Allocator<Node<K, V>>,
{
    /// Head sentinel links, one per level up to the maximum height.
    head: Box<[Link]>,
    /// Levels currently in use: `head[height..]` are all `None`.
    height: usize,
    len: usize,
    cmp: C,
    alloc: A,
    heights: G,
    _marker: PhantomData<(K, V)>,
}

/// Point-in-time shape of a [`SkipList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub len: usize,
    /// Levels currently in use.
    pub height: usize,
    pub max_height: usize,
    /// Nodes the allocator reports live.
    pub allocated: usize,
}

impl<K: Ord, V> SkipList<K, V> {
    /// Create an empty list ordered by `Ord`, seeded from OS entropy.
    pub fn new() -> Self {
        Self::assemble(Natural, Heap::new(), Geometric::default())
    }

    /// Create an empty list ordered by `Ord` whose heights replay from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::assemble(Natural, Heap::new(), Geometric::seeded(seed))
    }
}

impl<K: Ord, V> Default for SkipList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: Comparator<K>> SkipList<K, V, C> {
    /// Create an empty list ordered by `cmp`.
    pub fn with_comparator(cmp: C) -> Self {
        Self::assemble(cmp, Heap::new(), Geometric::default())
    }
}

impl<K, V, C, A> SkipList<K, V, C, A>
where
    C: Comparator<K>,
    A: Allocator<Node<K, V>>,
{
    /// Create an empty list with an explicit allocator and configuration.
    pub fn with_options(cmp: C, alloc: A, opts: &Options) -> Result<Self> {
        let heights = Geometric::from_options(opts)?;
        Ok(Self::assemble(cmp, alloc, heights))
    }
}

impl<K, V, C, A, G> SkipList<K, V, C, A, G>
where
    A: Allocator<Node<K, V>>,
    G: HeightGenerator,
{
    /// Create an empty list with a custom height generator.
    pub fn with_generator(cmp: C, alloc: A, heights: G) -> Result<Self> {
        let max = heights.max_height();
        if max == 0 || max > HEIGHT_LIMIT {
            return Err(Error::InvalidOptions(format!(
                "generator max_height must be in 1..={}, got {max}",
                HEIGHT_LIMIT
            )));
        }
        Ok(Self::assemble(cmp, alloc, heights))
    }

    fn assemble(cmp: C, alloc: A, heights: G) -> Self {
        let max_height = heights.max_height();
        SkipList {
            head: vec![None; max_height].into_boxed_slice(),
            height: 0,
            len: 0,
            cmp,
            alloc,
            heights,
            _marker: PhantomData,
        }
    }

    /// Restart the height sequence from `seed`.
    pub fn set_seed(&mut self, seed: u64) {
        self.heights.reseed(seed);
    }

    /// Insert a pair. Equal keys are kept side by side (bag semantics).
    ///
    /// Algorithm:
    ///   1. Find the predecessor at each level
    ///   2. Draw a height and allocate a node sized for it
    ///   3. Splice the node in at every level below its height
    ///
    /// On allocation failure nothing is linked and the pair is dropped.
    pub fn add(&mut self, key: K, value: V) -> Result<()>
    where
        C: Comparator<K>,
    {
        self.with_path(|sl, path| {
            sl.search(&key, path);
            let idx = sl.allocate(key, value)?;
            sl.splice(idx, path);
            Ok(())
        })
    }

    /// Replace the value of the first pair under `key`, or insert a new pair.
    ///
    /// Returns the previous value, or `None` if the key was absent.
    pub fn set(&mut self, key: K, value: V) -> Result<Option<V>>
    where
        C: Comparator<K>,
    {
        self.with_path(|sl, path| {
            let found = sl.search(&key, path);
            if let Some(idx) = sl.matching(found, &key) {
                let old = std::mem::replace(&mut sl.node_mut(idx).value, value);
                return Ok(Some(old));
            }
            let idx = sl.allocate(key, value)?;
            sl.splice(idx, path);
            Ok(None)
        })
    }

    /// Value of the first pair under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let idx = self.find(key)?;
        Some(&self.node(idx).value)
    }

    /// Mutable value of the first pair under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let idx = self.find(key)?;
        Some(&mut self.node_mut(idx).value)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.find(key).is_some()
    }

    /// Remove one pair under `key` and return its value.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.remove_first(key).map(|(_, value)| value)
    }

    /// Remove every pair under `key`, handing each to `f`.
    ///
    /// Returns how many pairs were removed. The order in which duplicates
    /// reach `f` is unspecified.
    pub fn delete_all<Q, F>(&mut self, key: &Q, mut f: F) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
        F: FnMut(K, V),
    {
        let mut removed = 0;
        while let Some((k, v)) = self.remove_first(key) {
            f(k, v);
            removed += 1;
        }
        log::debug!("delete_all removed {removed} pairs, {} left", self.len);
        removed
    }

    /// Smallest pair, in O(1).
    pub fn first(&self) -> Option<(&K, &V)> {
        let node = self.node(self.head[0]?);
        Some((&node.key, &node.value))
    }

    /// Largest pair. There are no back links, so this descends the levels
    /// always taking the last node, in O(log n).
    pub fn last(&self) -> Option<(&K, &V)> {
        let node = self.node(self.last_index()?);
        Some((&node.key, &node.value))
    }

    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let idx = self.head[0]?;
        self.with_path(|sl, path| {
            // The first node follows the head at every level it is on,
            // and a fresh path is all head.
            Some(sl.unlink(idx, path))
        })
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.with_path(|sl, path| {
            let idx = sl.last_path(path)?;
            Some(sl.unlink(idx, path))
        })
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Visit every pair in ascending order until `f` breaks.
    ///
    /// Returns `Break` if `f` halted the scan.
    pub fn iterate<F>(&self, f: F) -> ControlFlow<()>
    where
        F: FnMut(&K, &V) -> ControlFlow<()>,
    {
        self.walk(self.head[0], f)
    }

    /// Like [`iterate`](Self::iterate), but start at the first pair whose key
    /// is not less than `key`.
    pub fn iterate_from<Q, F>(&self, key: &Q, f: F) -> ControlFlow<()>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
        F: FnMut(&K, &V) -> ControlFlow<()>,
    {
        self.walk(self.lower_bound(key), f)
    }

    /// Iterator over all pairs in ascending order.
    pub fn iter(&self) -> Iter<'_, K, V, A> {
        Iter::new(&self.alloc, self.head[0])
    }

    /// Iterator starting at the first pair whose key is not less than `key`.
    pub fn iter_from<Q>(&self, key: &Q) -> Iter<'_, K, V, A>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        Iter::new(&self.alloc, self.lower_bound(key))
    }

    /// Remove every pair. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        self.clear_with(|_, _| {})
    }

    /// Remove every pair in ascending order, handing each to `f`.
    ///
    /// The list is reset before the walk, so it is empty and usable
    /// afterwards even if `f` panics. Pairs `f` never saw are dropped.
    pub fn clear_with<F>(&mut self, mut f: F) -> usize
    where
        F: FnMut(K, V),
    {
        let start = self.head[0];
        self.head.fill(None);
        self.height = 0;
        self.len = 0;

        let mut removed = 0;
        for (key, value) in Drain::new(&mut self.alloc, start) {
            f(key, value);
            removed += 1;
        }
        log::debug!("cleared {removed} pairs");
        removed
    }

    /// Release every pair and the list itself.
    pub fn destroy(self) -> usize {
        self.destroy_with(|_, _| {})
    }

    /// Release every pair, handing each to `f`, then the list itself.
    pub fn destroy_with<F>(mut self, f: F) -> usize
    where
        F: FnMut(K, V),
    {
        self.clear_with(f)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            len: self.len,
            height: self.height,
            max_height: self.head.len(),
            allocated: self.alloc.live(),
        }
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Draw a height and hand the node to the allocator.
    fn allocate(&mut self, key: K, value: V) -> Result<usize> {
        let height = self.draw_height();
        match self.alloc.allocate(Node::new(key, value, height)) {
            Ok(idx) => Ok(idx),
            Err(_) => {
                log::debug!("allocator refused node of height {height}");
                Err(Error::AllocationFailure { height })
            }
        }
    }

    fn draw_height(&mut self) -> usize {
        let height = self.heights.next_height();
        let max = self.head.len();
        assert!(
            (1..=max).contains(&height),
            "height generator returned {height}, outside 1..={max}"
        );
        height
    }

    /// Link an allocated node in after the recorded predecessors.
    fn splice(&mut self, idx: usize, path: &mut [Pred]) {
        let height = self.node(idx).height();
        // Levels above the current height only have the head before them.
        for pred in path.iter_mut().take(height).skip(self.height) {
            *pred = None;
        }
        for (level, &pred) in path.iter().enumerate().take(height) {
            let next = self.next_of(pred, level);
            self.node_mut(idx).forward[level] = next;
            self.set_next(pred, level, Some(idx));
        }
        self.height = self.height.max(height);
        self.len += 1;
        log::trace!("spliced slot {idx} at height {height}, len {}", self.len);
    }

    /// Unlink a node from every level it is on and release it.
    fn unlink(&mut self, idx: usize, path: &[Pred]) -> (K, V) {
        let height = self.node(idx).height();
        for (level, &pred) in path.iter().enumerate().take(height) {
            if self.next_of(pred, level) == Some(idx) {
                let next = self.node(idx).forward[level];
                self.set_next(pred, level, next);
            }
        }
        while self.height > 0 && self.head[self.height - 1].is_none() {
            self.height -= 1;
        }
        self.len -= 1;
        log::trace!("unlinked slot {idx} of height {height}, len {}", self.len);

        self.alloc
            .release(idx)
            .expect("linked node missing from allocator")
            .into_pair()
    }

    fn remove_first<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.with_path(|sl, path| {
            let found = sl.search(key, path);
            let idx = sl.matching(found, key)?;
            Some(sl.unlink(idx, path))
        })
    }

    /// Run `f` with a fresh predecessor path, one slot per level.
    fn with_path<R>(&mut self, f: impl FnOnce(&mut Self, &mut [Pred]) -> R) -> R {
        let mut path: [Pred; HEIGHT_LIMIT] = [None; HEIGHT_LIMIT];
        let max = self.head.len();
        f(self, &mut path[..max])
    }

    fn walk<F>(&self, mut current: Link, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(&K, &V) -> ControlFlow<()>,
    {
        while let Some(idx) = current {
            let node = self.node(idx);
            if f(&node.key, &node.value).is_break() {
                return ControlFlow::Break(());
            }
            current = node.forward[0];
        }
        ControlFlow::Continue(())
    }
}

impl<K, V, C, A, G> Drop for SkipList<K, V, C, A, G>
where
    A: Allocator<Node<K, V>>,
{
    fn drop(&mut self) {
        // Hand every node back so custom allocators see balanced books.
        let start = self.head[0].take();
        drop(Drain::new(&mut self.alloc, start));
    }
}

impl<'a, K, V, C, A, G> IntoIterator for &'a SkipList<K, V, C, A, G>
where
    A: Allocator<Node<K, V>>,
    G: HeightGenerator,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C, A, G> fmt::Debug for SkipList<K, V, C, A, G>
where
    K: fmt::Debug,
    V: fmt::Debug,
    A: Allocator<Node<K, V>>,
    G: HeightGenerator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
