//! ChainedHashSet: bucket array of collision chains with doubling growth.

use crate::buckets::BucketArray;
use crate::chain::Chains;
use crate::cursor::{Cursor, Iter};
use crate::error::SetError;
use crate::hash_function::{DivisionHash, PrimaryHashFunction};
use crate::reentrancy::DebugReentrancy;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

/// Bucket count of a new or cleared set.
pub const INITIAL_CAPACITY: usize = 16;

/// Growth happens once `len` exceeds `capacity * LOAD_FACTOR`.
pub const LOAD_FACTOR: f64 = 0.75;

/// Snapshot of the set's structural version, captured by cursors.
///
/// `clear` resets `mods` to zero, so the clear epoch is part of the stamp to
/// keep cursors created before a clear from matching again afterwards.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Stamp {
    clears: u64,
    mods: u64,
}

/// A set of distinct elements stored in separately chained buckets.
///
/// `H` picks the bucket for an element's identity hash; `S` produces that
/// identity hash. The capacity is always a power of two, starts at
/// [`INITIAL_CAPACITY`] and doubles whenever the element count exceeds the
/// load threshold. Removal never shrinks the table.
pub struct ChainedHashSet<E, H = DivisionHash, S = DefaultHashBuilder> {
    hasher: S,
    function: H,
    buckets: BucketArray,
    chains: Chains<E>,
    len: usize,
    mod_count: u64,
    clears: u64,
    reentrancy: DebugReentrancy,
}

impl<E> ChainedHashSet<E>
where
    E: Eq + Hash,
{
    pub fn new() -> Self {
        Self::from_parts(DivisionHash, DefaultHashBuilder::default())
    }
}

impl<E, H> ChainedHashSet<E, H>
where
    E: Eq + Hash,
    H: PrimaryHashFunction,
{
    pub fn with_hash_function(function: H) -> Self {
        Self::from_parts(function, DefaultHashBuilder::default())
    }
}

impl<E, S> ChainedHashSet<E, DivisionHash, S>
where
    E: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_parts(DivisionHash, hasher)
    }
}

impl<E, H, S> ChainedHashSet<E, H, S> {
    fn from_parts(function: H, hasher: S) -> Self {
        Self {
            hasher,
            function,
            buckets: BucketArray::new(INITIAL_CAPACITY),
            chains: Chains::new(),
            len: 0,
            mod_count: 0,
            clears: 0,
            reentrancy: DebugReentrancy::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.capacity()
    }

    /// Largest element count the current capacity holds without growing.
    pub fn load_threshold(&self) -> usize {
        (self.buckets.capacity() as f64 * LOAD_FACTOR) as usize
    }

    /// Structural modifications since creation or the last `clear`.
    pub fn mod_count(&self) -> u64 {
        self.mod_count
    }

    /// Resets to the freshly created state: capacity [`INITIAL_CAPACITY`],
    /// no elements, modification count zero. Every outstanding cursor
    /// becomes stale.
    pub fn clear(&mut self) {
        let dropped = self.len;
        self.buckets = BucketArray::new(INITIAL_CAPACITY);
        self.len = 0;
        self.mod_count = 0;
        self.clears = self.clears.wrapping_add(1);
        self.chains.clear();
        tracing::trace!(dropped, "cleared chained hash set");
    }

    /// Borrowing iterator in bucket order, then chain order.
    pub fn iter(&self) -> Iter<'_, E, H, S> {
        Iter::new(self)
    }

    /// Detached fail-fast cursor; see [`Cursor`].
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.stamp())
    }

    /// Always fails: retaining by another collection is not provided.
    pub fn retain_all<I>(&mut self, _items: I) -> Result<bool, SetError>
    where
        I: IntoIterator,
    {
        Err(SetError::Unsupported("retain_all"))
    }

    /// Always fails: collect through [`iter`](Self::iter) instead.
    pub fn to_array(&self) -> Result<Box<[E]>, SetError> {
        Err(SetError::Unsupported("to_array"))
    }

    /// Always fails: collect through [`iter`](Self::iter) instead.
    pub fn to_array_typed<T>(&self, _dest: Vec<T>) -> Result<Vec<T>, SetError> {
        Err(SetError::Unsupported("to_array_typed"))
    }

    pub(crate) fn stamp(&self) -> Stamp {
        Stamp {
            clears: self.clears,
            mods: self.mod_count,
        }
    }

    pub(crate) fn buckets(&self) -> &BucketArray {
        &self.buckets
    }

    pub(crate) fn chains(&self) -> &Chains<E> {
        &self.chains
    }
}

impl<E, H, S> ChainedHashSet<E, H, S>
where
    E: Eq + Hash,
    H: PrimaryHashFunction,
    S: BuildHasher,
{
    pub fn with_hash_function_and_hasher(function: H, hasher: S) -> Self {
        Self::from_parts(function, hasher)
    }

    fn bucket_index(&self, hash: u64) -> usize {
        let capacity = self.buckets.capacity();
        let index = self.function.hash(hash, capacity);
        debug_assert!(
            index < capacity,
            "primary hash function returned {index} for capacity {capacity}"
        );
        index
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let index = self.bucket_index(self.hasher.hash_one(q));
        self.chains.find(self.buckets.head(index), q).is_some()
    }

    /// Inserts `element` unless an equal one is present. Returns whether the
    /// set changed. May double the capacity before returning.
    pub fn add(&mut self, element: E) -> bool {
        {
            let _g = self.reentrancy.enter();
            let hash = self.hasher.hash_one(&element);
            let index = self.bucket_index(hash);
            let head = self.buckets.head_mut(index);
            if self.chains.find(*head, &element).is_some() {
                return false;
            }
            self.chains.append(head, element, hash);
        }
        self.len += 1;
        self.mod_count += 1;
        while self.len > self.load_threshold() {
            self.grow();
        }
        true
    }

    /// Removes the element equal to `q`. Returns whether the set changed.
    pub fn remove<Q>(&mut self, q: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.take(q).is_some()
    }

    /// Removes and returns the element equal to `q`.
    pub fn take<Q>(&mut self, q: &Q) -> Option<E>
    where
        E: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if self.len == 0 {
            return None;
        }
        let removed = {
            let _g = self.reentrancy.enter();
            let index = self.bucket_index(self.hasher.hash_one(q));
            self.chains.unlink(self.buckets.head_mut(index), q)
        }?;
        self.len -= 1;
        self.mod_count += 1;
        Some(removed)
    }

    /// True if every item is present. Stops at the first missing one.
    pub fn contains_all<'a, I>(&self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a E>,
        E: 'a,
    {
        items.into_iter().all(|e| self.contains(e))
    }

    /// Adds items in order and returns false at the first one already
    /// present. Items added before that point stay in the set.
    pub fn add_all<I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = E>,
    {
        for e in items {
            if !self.add(e) {
                return false;
            }
        }
        true
    }

    /// Removes items in order and returns false at the first one not
    /// present. Items removed before that point stay removed.
    pub fn remove_all<'a, I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a E>,
        E: 'a,
    {
        for e in items {
            if !self.remove(e) {
                return false;
            }
        }
        true
    }

    /// Doubles the bucket array and relinks every node in old traversal
    /// order. Nodes are moved, not reallocated, and the stored identity hash
    /// is reused, so no user code runs.
    fn grow(&mut self) {
        let old_capacity = self.buckets.capacity();
        let new_capacity = old_capacity * 2;
        let old = core::mem::replace(&mut self.buckets, BucketArray::new(new_capacity));
        let mut tails = vec![None; new_capacity];
        let function = &self.function;
        let targets = self.buckets.slots_mut();
        for head in old.heads() {
            self.chains.relink(head, targets, &mut tails, |hash| {
                let index = function.hash(hash, new_capacity);
                debug_assert!(index < new_capacity);
                index
            });
        }
        tracing::trace!(
            old_capacity,
            new_capacity,
            len = self.len,
            "grew chained hash set"
        );
    }

    /// Checks every structural invariant; panics on the first violation.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let capacity = self.capacity();
        assert!(capacity.is_power_of_two());
        assert!(capacity >= INITIAL_CAPACITY);
        assert_eq!(self.len, self.chains.len(), "orphaned or missing nodes");
        assert!(self.len <= self.load_threshold(), "load above threshold");
        let mut counted = 0;
        for (index, head) in self.buckets.heads().enumerate() {
            for k in self.chains.keys(head) {
                let node = self.chains.node(k).expect("linked node is live");
                assert_eq!(self.function.hash(node.hash, capacity), index);
                assert_eq!(self.hasher.hash_one(&node.item), node.hash);
                counted += 1;
            }
        }
        assert_eq!(counted, self.len, "len != sum of chain lengths");
    }
}

impl<E> Default for ChainedHashSet<E>
where
    E: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, H, S> fmt::Debug for ChainedHashSet<E, H, S>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<E, H, S> Extend<E> for ChainedHashSet<E, H, S>
where
    E: Eq + Hash,
    H: PrimaryHashFunction,
    S: BuildHasher,
{
    /// Adds every item; duplicates are skipped rather than stopping.
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for e in iter {
            self.add(e);
        }
    }
}

impl<E, H, S> FromIterator<E> for ChainedHashSet<E, H, S>
where
    E: Eq + Hash,
    H: PrimaryHashFunction + Default,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut set = Self::from_parts(H::default(), S::default());
        set.extend(iter);
        set
    }
}

impl<'a, E, H, S> IntoIterator for &'a ChainedHashSet<E, H, S> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E, H, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
