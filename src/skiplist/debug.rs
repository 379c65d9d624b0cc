use std::cmp::Ordering;
use std::fmt;

use super::{Node, SkipList};
use crate::alloc::Allocator;
use crate::compare::Comparator;
use crate::error::{Error, Result};
use crate::height::HeightGenerator;

impl<K, V, C, A, G> SkipList<K, V, C, A, G>
where
    A: Allocator<Node<K, V>>,
    G: HeightGenerator,
{
    /// Walk every level and verify the structural invariants:
    ///
    /// - each level is in non-decreasing key order
    /// - a node of height `h` is linked at exactly levels `0..h`
    /// - levels at or above the height in use are empty
    /// - the level-0 chain holds exactly `len()` nodes, all of them live
    ///
    /// Diagnostic only; O(n * height).
    pub fn check(&self) -> Result<()>
    where
        C: Comparator<K>,
    {
        let max = self.head.len();
        if self.height > max {
            return corrupt(format!("height {} exceeds max {max}", self.height));
        }
        if self.height > 0 && self.head[self.height - 1].is_none() {
            return corrupt(format!("top level {} is empty", self.height - 1));
        }
        if let Some(level) = (self.height..max).find(|&l| self.head[l].is_some()) {
            return corrupt(format!("level {level} above height in use is linked"));
        }

        // Nodes tall enough for each level, counted off the level-0 chain.
        let mut tall_enough = vec![0usize; max];
        for level in 0..self.height {
            let mut seen = 0usize;
            let mut prev: Option<&Node<K, V>> = None;
            let mut current = self.head[level];
            while let Some(idx) = current {
                let Some(node) = self.alloc.get(idx) else {
                    return corrupt(format!("level {level} links to free slot {idx}"));
                };
                let h = node.height();
                if h == 0 || h > max {
                    return corrupt(format!("slot {idx} has height {h}, max {max}"));
                }
                if h <= level {
                    return corrupt(format!("slot {idx} of height {h} linked at level {level}"));
                }
                if let Some(prev) = prev {
                    if self.cmp.compare(&prev.key, &node.key) == Ordering::Greater {
                        return corrupt(format!("level {level} out of order at slot {idx}"));
                    }
                }
                if level == 0 {
                    for count in tall_enough.iter_mut().take(h) {
                        *count += 1;
                    }
                }
                seen += 1;
                if seen > self.len {
                    return corrupt(format!("level {level} holds more than {} nodes", self.len));
                }
                prev = Some(node);
                current = node.forward[level];
            }

            if level == 0 && seen != self.len {
                return corrupt(format!("level 0 holds {seen} nodes, len is {}", self.len));
            }
            if seen != tall_enough[level] {
                return corrupt(format!(
                    "level {level} holds {seen} nodes, {} are tall enough",
                    tall_enough[level]
                ));
            }
        }

        // A node taller than the height in use would be missing from a level.
        if let Some(&stranded) = tall_enough.get(self.height) {
            if stranded != 0 {
                return corrupt(format!(
                    "{stranded} nodes reach level {}, above the height in use",
                    self.height
                ));
            }
        }

        if self.alloc.live() != self.len {
            return corrupt(format!(
                "allocator holds {} nodes, len is {}",
                self.alloc.live(),
                self.len
            ));
        }
        Ok(())
    }

    /// Render every level, top first, printing keys with `Debug`.
    pub fn dump<W>(&self, out: &mut W) -> fmt::Result
    where
        W: fmt::Write,
        K: fmt::Debug,
    {
        self.dump_with(out, |w, k, _| write!(w, "{k:?}"))
    }

    /// Render every level, top first, printing each pair with `printer`.
    ///
    /// ```text
    /// skiplist: len 4, height 2/28
    /// L01: "b"
    /// L00: "a" "b" "c" "c"
    /// ```
    pub fn dump_with<W, P>(&self, out: &mut W, mut printer: P) -> fmt::Result
    where
        W: fmt::Write,
        P: FnMut(&mut W, &K, &V) -> fmt::Result,
    {
        writeln!(
            out,
            "skiplist: len {}, height {}/{}",
            self.len,
            self.height,
            self.head.len()
        )?;
        for level in (0..self.height).rev() {
            write!(out, "L{level:02}:")?;
            let mut current = self.head[level];
            while let Some(idx) = current {
                let node = self.node(idx);
                out.write_char(' ')?;
                printer(out, &node.key, &node.value)?;
                current = node.forward[level];
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

fn corrupt(msg: String) -> Result<()> {
    log::debug!("consistency check failed: {msg}");
    Err(Error::Corruption(msg))
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use crate::{Error, SkipList};
    use test_log::test;

    #[test]
    fn dump_lists_every_key_on_level_zero() {
        let mut sl = SkipList::seeded(3);
        for k in ["c", "a", "b", "c"] {
            sl.add(k, ()).unwrap();
        }
        let mut out = String::new();
        sl.dump(&mut out).unwrap();

        assert!(out.starts_with("skiplist: len 4, height "));
        let level0 = out.lines().last().unwrap();
        assert_eq!(level0, r#"L00: "a" "b" "c" "c""#);
    }

    #[test]
    fn dump_with_custom_printer() {
        let mut sl = SkipList::seeded(3);
        sl.add(1, "one").unwrap();
        let mut out = String::new();
        sl.dump_with(&mut out, |w, k, v| write!(w, "{k}={v}")).unwrap();
        assert!(out.ends_with("L00: 1=one\n"));
    }

    #[test]
    fn check_passes_through_churn() {
        let mut sl = SkipList::seeded(11);
        for i in 0..2_000u32 {
            sl.add(i % 97, i).unwrap();
            if i % 3 == 0 {
                sl.delete(&(i % 89));
            }
        }
        sl.check().unwrap();
        sl.clear();
        sl.check().unwrap();
    }

    #[test]
    fn check_catches_node_taller_than_height() {
        let mut sl = SkipList::seeded(11);
        for i in 0..500u32 {
            sl.add(i, ()).unwrap();
        }
        assert!(sl.stats().height >= 2);

        // Hide the top level without shrinking the nodes on it.
        let top = sl.height - 1;
        sl.head[top] = None;
        sl.height = top;

        assert!(matches!(sl.check(), Err(Error::Corruption(_))));
    }
}
