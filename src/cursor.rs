//! Fail-fast traversal.
//!
//! A `Cursor` is detached from the set: it stores only a position and the
//! set's stamp at creation, and is handed the set on every step. That lets
//! the set be mutated while a cursor is alive, and the cursor notices on its
//! next step. `Iter` is the ordinary borrowing iterator built on the same
//! walk; its shared borrow rules out mutation, so it never goes stale.

use crate::chain::NodeKey;
use crate::chained_hash_set::{ChainedHashSet, Stamp};
use crate::error::SetError;
use core::iter::FusedIterator;

/// Position in a bucket/chain walk. Order: ascending bucket index, then
/// chain order.
///
/// Any insert, remove or clear performed on the set after the cursor was
/// created makes `next` fail with [`SetError::ConcurrentModification`].
#[derive(Clone, Debug)]
pub struct Cursor {
    stamp: Stamp,
    // Next bucket to scan once the current chain runs out.
    next_bucket: usize,
    node: Option<NodeKey>,
}

impl Cursor {
    pub(crate) fn new(stamp: Stamp) -> Self {
        Self {
            stamp,
            next_bucket: 0,
            node: None,
        }
    }

    /// True if a further element exists after the current position.
    /// Never moves the cursor.
    pub fn has_next<E, H, S>(&self, set: &ChainedHashSet<E, H, S>) -> bool {
        if self
            .node
            .and_then(|k| set.chains().next_of(k))
            .is_some()
        {
            return true;
        }
        set.buckets().next_occupied(self.next_bucket).is_some()
    }

    /// Advances and returns the element at the new position.
    ///
    /// Staleness is checked before exhaustion, so a cursor whose set was
    /// cleared reports `ConcurrentModification` rather than `NoSuchElement`.
    pub fn next<'a, E, H, S>(
        &mut self,
        set: &'a ChainedHashSet<E, H, S>,
    ) -> Result<&'a E, SetError> {
        if self.stamp != set.stamp() {
            return Err(SetError::ConcurrentModification);
        }
        let chains = set.chains();
        let key = match self.node.and_then(|k| chains.next_of(k)) {
            Some(k) => k,
            None => {
                let (index, head) = set
                    .buckets()
                    .next_occupied(self.next_bucket)
                    .ok_or(SetError::NoSuchElement)?;
                self.next_bucket = index + 1;
                head
            }
        };
        self.node = Some(key);
        Ok(chains.item(key))
    }
}

/// Borrowing iterator over a [`ChainedHashSet`].
pub struct Iter<'a, E, H, S> {
    set: &'a ChainedHashSet<E, H, S>,
    cursor: Cursor,
    remaining: usize,
}

impl<'a, E, H, S> Iter<'a, E, H, S> {
    pub(crate) fn new(set: &'a ChainedHashSet<E, H, S>) -> Self {
        Self {
            set,
            cursor: set.cursor(),
            remaining: set.len(),
        }
    }
}

impl<'a, E, H, S> Iterator for Iter<'a, E, H, S> {
    type Item = &'a E;

    #[inline]
    fn next(&mut self) -> Option<&'a E> {
        let item = self.cursor.next(self.set).ok()?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E, H, S> ExactSizeIterator for Iter<'_, E, H, S> {}

impl<E, H, S> FusedIterator for Iter<'_, E, H, S> {}

impl<E, H, S> Clone for Iter<'_, E, H, S> {
    fn clone(&self) -> Self {
        Self {
            set: self.set,
            cursor: self.cursor.clone(),
            remaining: self.remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{ChainedHashSet, SetError};
    use std::collections::BTreeSet;

    fn bucket_by_value(id: u64, cap: usize) -> usize {
        (id % cap as u64) as usize
    }

    #[test]
    fn empty_set_is_exhausted() {
        let s: ChainedHashSet<u8> = ChainedHashSet::new();
        let mut c = s.cursor();
        assert!(!c.has_next(&s));
        assert_eq!(c.next(&s), Err(SetError::NoSuchElement));
    }

    /// Invariant: `has_next` is a pure query; repeated calls do not skip.
    #[test]
    fn has_next_does_not_advance() {
        let s: ChainedHashSet<u32> = (0..5).collect();
        let mut c = s.cursor();
        let mut seen = BTreeSet::new();
        while c.has_next(&s) && c.has_next(&s) {
            seen.insert(*c.next(&s).unwrap());
        }
        assert_eq!(seen, (0..5).collect::<BTreeSet<_>>());
        assert_eq!(c.next(&s), Err(SetError::NoSuchElement));
    }

    /// Invariant: a walk visits buckets in ascending order and each chain
    /// front to back.
    #[test]
    fn walks_buckets_then_chains() {
        // Every element lands in bucket 5.
        let mut s = ChainedHashSet::with_hash_function(|_id: u64, _cap: usize| 5usize);
        s.add("first");
        s.add("second");
        s.add("third");
        let order: Vec<&str> = s.iter().copied().collect();
        assert_eq!(order, ["first", "second", "third"]);
    }

    #[test]
    fn stale_after_add() {
        let mut s: ChainedHashSet<u32> = ChainedHashSet::new();
        s.add(1);
        let mut c = s.cursor();
        s.add(2);
        assert_eq!(c.next(&s), Err(SetError::ConcurrentModification));
    }

    #[test]
    fn stale_after_remove_midway() {
        let mut s: ChainedHashSet<u32> = (0..10).collect();
        let mut c = s.cursor();
        let first = *c.next(&s).unwrap();
        s.remove(&first);
        assert_eq!(c.next(&s), Err(SetError::ConcurrentModification));
    }

    /// Invariant: clear invalidates cursors even though it resets the
    /// modification count to zero.
    #[test]
    fn stale_after_clear_of_fresh_set() {
        let mut s: ChainedHashSet<u32> = ChainedHashSet::new();
        let mut c = s.cursor();
        s.clear();
        assert_eq!(s.mod_count(), 0);
        assert_eq!(c.next(&s), Err(SetError::ConcurrentModification));
    }

    /// Invariant: failed insertions and removals are not structural changes.
    #[test]
    fn no_op_mutations_keep_cursor_valid() {
        let mut s: ChainedHashSet<u32> = (0..3).collect();
        let mut c = s.cursor();
        assert!(!s.add(1));
        assert!(!s.remove(&42));
        let mut n = 0;
        while c.has_next(&s) {
            c.next(&s).unwrap();
            n += 1;
        }
        assert_eq!(n, 3);
    }

    #[test]
    fn iter_is_exact_size() {
        let s: ChainedHashSet<u32> = (0..50).collect();
        let mut it = s.iter();
        assert_eq!(it.len(), 50);
        it.next();
        assert_eq!(it.len(), 49);
        assert_eq!(it.count(), 49);
    }

    #[test]
    fn custom_function_spreads_by_value() {
        let mut s = ChainedHashSet::with_hash_function(bucket_by_value);
        for i in 0..40u64 {
            s.add(i);
        }
        assert_eq!(s.iter().count(), 40);
        let all: BTreeSet<u64> = s.iter().copied().collect();
        assert_eq!(all, (0..40).collect::<BTreeSet<_>>());
    }
}
