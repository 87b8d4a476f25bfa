//! Collision chains: singly linked node lists stored in a generational arena.
//!
//! Every node belongs to exactly one chain, and every chain is hung off
//! exactly one bucket slot. A chain is identified by its head key, which the
//! bucket array owns; `Chains` owns the nodes themselves.

use core::borrow::Borrow;
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Generational key of a chain node. Stale keys (after removal or clear)
    /// never resolve to a newer node.
    pub(crate) struct NodeKey;
}

#[derive(Debug)]
pub(crate) struct Node<E> {
    pub(crate) item: E,
    /// Identity hash computed once at insertion; growth reuses it.
    pub(crate) hash: u64,
    pub(crate) next: Option<NodeKey>,
}

#[derive(Debug)]
pub(crate) struct Chains<E> {
    nodes: SlotMap<NodeKey, Node<E>>,
}

impl<E> Chains<E> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Total number of nodes across all chains.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    #[cfg(test)]
    pub(crate) fn node(&self, key: NodeKey) -> Option<&Node<E>> {
        self.nodes.get(key)
    }

    /// Successor of `key`; `None` at the tail or when `key` is stale.
    #[inline]
    pub(crate) fn next_of(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key).and_then(|n| n.next)
    }

    /// Element stored at a live key.
    #[inline]
    pub(crate) fn item(&self, key: NodeKey) -> &E {
        &self.nodes[key].item
    }

    /// Walks the chain starting at `head`, comparing with `==` only.
    pub(crate) fn find<Q>(&self, head: Option<NodeKey>, q: &Q) -> Option<NodeKey>
    where
        E: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.keys(head).find(|&k| self.nodes[k].item.borrow() == q)
    }

    /// Appends a new node at the tail of the chain (or as its head if empty).
    pub(crate) fn append(&mut self, head: &mut Option<NodeKey>, item: E, hash: u64) -> NodeKey {
        let key = self.nodes.insert(Node {
            item,
            hash,
            next: None,
        });
        self.link_tail(head, key);
        key
    }

    /// Hooks an existing, detached node onto the tail of a chain.
    fn link_tail(&mut self, head: &mut Option<NodeKey>, key: NodeKey) {
        match *head {
            None => *head = Some(key),
            Some(first) => {
                let mut tail = first;
                while let Some(next) = self.nodes[tail].next {
                    tail = next;
                }
                self.nodes[tail].next = Some(key);
            }
        }
    }

    /// Unlinks the first node equal to `q`, returning its element.
    ///
    /// The whole chain is scanned, tail included. Unlinking the head moves
    /// the bucket to the head's successor (or empties it).
    pub(crate) fn unlink<Q>(&mut self, head: &mut Option<NodeKey>, q: &Q) -> Option<E>
    where
        E: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut prev: Option<NodeKey> = None;
        let mut cur = *head;
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if node.item.borrow() == q {
                let next = node.next;
                match prev {
                    None => *head = next,
                    Some(p) => self.nodes[p].next = next,
                }
                return self.nodes.remove(k).map(|n| n.item);
            }
            prev = Some(k);
            cur = node.next;
        }
        None
    }

    /// Moves every node of the chain at `head` into `targets`, appending each
    /// at the tail of the slot `place(hash)` picks. `tails` caches the last
    /// node of every target slot so relinking stays linear.
    pub(crate) fn relink<F>(
        &mut self,
        head: Option<NodeKey>,
        targets: &mut [Option<NodeKey>],
        tails: &mut [Option<NodeKey>],
        mut place: F,
    ) where
        F: FnMut(u64) -> usize,
    {
        let mut cur = head;
        while let Some(k) = cur {
            let node = &mut self.nodes[k];
            cur = node.next.take();
            let slot = place(node.hash);
            match tails[slot] {
                None => targets[slot] = Some(k),
                Some(t) => self.nodes[t].next = Some(k),
            }
            tails[slot] = Some(k);
        }
    }

    /// Keys of the chain starting at `head`, in link order.
    pub(crate) fn keys(&self, head: Option<NodeKey>) -> ChainKeys<'_, E> {
        ChainKeys {
            chains: self,
            cur: head,
        }
    }
}

pub(crate) struct ChainKeys<'a, E> {
    chains: &'a Chains<E>,
    cur: Option<NodeKey>,
}

impl<E> Iterator for ChainKeys<'_, E> {
    type Item = NodeKey;

    #[inline]
    fn next(&mut self) -> Option<NodeKey> {
        let k = self.cur?;
        self.cur = self.chains.next_of(k);
        Some(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(c: &Chains<&'static str>, head: Option<NodeKey>) -> Vec<&'static str> {
        c.keys(head).map(|k| *c.item(k)).collect()
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut c = Chains::new();
        let mut head = None;
        c.append(&mut head, "a", 1);
        c.append(&mut head, "b", 2);
        c.append(&mut head, "c", 3);
        assert_eq!(items(&c, head), ["a", "b", "c"]);
        assert_eq!(c.len(), 3);
    }

    /// Invariant: head, middle and tail nodes are all removable and the
    /// remaining chain stays linked.
    #[test]
    fn unlink_head_middle_tail() {
        let mut c = Chains::new();
        let mut head = None;
        for (i, s) in ["a", "b", "c", "d"].into_iter().enumerate() {
            c.append(&mut head, s, i as u64);
        }

        assert_eq!(c.unlink(&mut head, "d"), Some("d"));
        assert_eq!(items(&c, head), ["a", "b", "c"]);

        assert_eq!(c.unlink(&mut head, "b"), Some("b"));
        assert_eq!(items(&c, head), ["a", "c"]);

        assert_eq!(c.unlink(&mut head, "a"), Some("a"));
        assert_eq!(items(&c, head), ["c"]);

        assert_eq!(c.unlink(&mut head, "zz"), None);
        assert_eq!(c.unlink(&mut head, "c"), Some("c"));
        assert!(head.is_none());
        assert_eq!(c.len(), 0);
    }

    #[test]
    fn find_compares_by_equality() {
        let mut c: Chains<String> = Chains::new();
        let mut head = None;
        // Same stored hash, different values: neither shadows the other.
        c.append(&mut head, "x".to_string(), 7);
        c.append(&mut head, "y".to_string(), 7);
        assert!(c.find(head, "x").is_some());
        assert!(c.find(head, "y").is_some());
        assert!(c.find(head, "z").is_none());
        assert!(c.find(None, "x").is_none());
    }

    /// Invariant: relinking preserves traversal order within each target
    /// slot and leaves no node behind.
    #[test]
    fn relink_distributes_by_stored_hash() {
        let mut c = Chains::new();
        let mut head = None;
        for (s, h) in [("a", 0u64), ("b", 1), ("c", 2), ("d", 3)] {
            c.append(&mut head, s, h);
        }
        let mut targets = vec![None; 2];
        let mut tails = vec![None; 2];
        c.relink(head, &mut targets, &mut tails, |h| (h % 2) as usize);
        assert_eq!(items(&c, targets[0]), ["a", "c"]);
        assert_eq!(items(&c, targets[1]), ["b", "d"]);
    }

    #[test]
    fn stale_keys_do_not_resolve() {
        let mut c = Chains::new();
        let mut head = None;
        let k = c.append(&mut head, "a", 0);
        c.clear();
        assert!(c.node(k).is_none());
        assert!(c.next_of(k).is_none());
    }
}
