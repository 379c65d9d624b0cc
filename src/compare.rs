use std::cmp::Ordering;

/// Total order over keys, injected at container creation.
///
/// Any `Fn(&K, &K) -> Ordering` closure is a comparator, so a reverse-ordered
/// list is just:
///
/// ```
/// use skiplist_engine::SkipList;
///
/// let mut sl = SkipList::with_comparator(|a: &u32, b: &u32| b.cmp(a));
/// sl.add(1, "one").unwrap();
/// sl.add(2, "two").unwrap();
/// assert_eq!(sl.first(), Some((&2, &"two")));
/// ```
pub trait Comparator<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
