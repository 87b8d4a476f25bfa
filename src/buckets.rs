//! Bucket array: one optional chain head per slot.

use crate::chain::NodeKey;

#[derive(Debug)]
pub(crate) struct BucketArray {
    slots: Box<[Option<NodeKey>]>,
}

impl BucketArray {
    /// Allocates `capacity` empty slots. `capacity` must be a power of two.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        Self {
            slots: vec![None; capacity].into_boxed_slice(),
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn head(&self, index: usize) -> Option<NodeKey> {
        self.slots[index]
    }

    #[inline]
    pub(crate) fn head_mut(&mut self, index: usize) -> &mut Option<NodeKey> {
        &mut self.slots[index]
    }

    pub(crate) fn heads(&self) -> impl Iterator<Item = Option<NodeKey>> + '_ {
        self.slots.iter().copied()
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Option<NodeKey>] {
        &mut self.slots
    }

    /// First non-empty slot at or after `from`, with its head.
    pub(crate) fn next_occupied(&self, from: usize) -> Option<(usize, NodeKey)> {
        self.slots
            .get(from..)?
            .iter()
            .enumerate()
            .find_map(|(i, slot)| slot.map(|k| (from + i, k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Chains;

    #[test]
    fn new_array_is_empty() {
        let b = BucketArray::new(16);
        assert_eq!(b.capacity(), 16);
        assert!(b.heads().all(|h| h.is_none()));
        assert!(b.next_occupied(0).is_none());
    }

    #[test]
    fn next_occupied_scans_forward() {
        let mut chains = Chains::new();
        let mut b = BucketArray::new(8);
        let k3 = chains.append(b.head_mut(3), 'a', 0);
        let k6 = chains.append(b.head_mut(6), 'b', 0);

        assert_eq!(b.next_occupied(0), Some((3, k3)));
        assert_eq!(b.next_occupied(3), Some((3, k3)));
        assert_eq!(b.next_occupied(4), Some((6, k6)));
        assert_eq!(b.next_occupied(7), None);
        // Past the end is simply exhausted.
        assert_eq!(b.next_occupied(8), None);
        assert_eq!(b.next_occupied(100), None);
    }
}
