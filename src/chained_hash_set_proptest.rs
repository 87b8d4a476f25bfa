#![cfg(test)]

// Property tests for ChainedHashSet kept inside the crate so they can check
// internal invariants (chain lengths, bucket placement, load bound) after
// every operation.

use crate::chained_hash_set::ChainedHashSet;
use crate::hash_function::{MultiplicationHash, PrimaryHashFunction};
use crate::SetError;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

// Pool-indexed operations: indices shrink toward earlier keys and the op
// list shrinks in length.
#[derive(Clone, Debug)]
enum Op {
    Add(usize),
    Remove(usize),
    Contains(usize),
    AddAll(Vec<usize>),
    RemoveAll(Vec<usize>),
    ContainsAll(Vec<usize>),
    Clear,
    Iterate,
    StaleCursor(usize),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=40).prop_flat_map(|pool| {
        let n = pool.len();
        let idx = 0..n;
        let idxs = proptest::collection::vec(0..n, 0..6);
        let op = prop_oneof![
            6 => idx.clone().prop_map(Op::Add),
            3 => idx.clone().prop_map(Op::Remove),
            2 => idx.clone().prop_map(Op::Contains),
            1 => idxs.clone().prop_map(Op::AddAll),
            1 => idxs.clone().prop_map(Op::RemoveAll),
            1 => idxs.prop_map(Op::ContainsAll),
            1 => Just(Op::Clear),
            1 => Just(Op::Iterate),
            1 => idx.prop_map(Op::StaleCursor),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run<H: PrimaryHashFunction>(
    mut sut: ChainedHashSet<String, H>,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashSet<String> = HashSet::new();

    for op in ops {
        match op {
            Op::Add(i) => {
                let k = pool[i].clone();
                let expected = !model.contains(&k);
                prop_assert_eq!(sut.add(k.clone()), expected);
                model.insert(k);
            }
            Op::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k.as_str()), model.remove(k));
            }
            Op::Contains(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.contains(k.as_str()), model.contains(k));
            }
            Op::AddAll(is) => {
                // Model the short circuit: stop at the first duplicate.
                let mut expected = true;
                for &i in &is {
                    if !model.insert(pool[i].clone()) {
                        expected = false;
                        break;
                    }
                }
                let items: Vec<String> = is.iter().map(|&i| pool[i].clone()).collect();
                prop_assert_eq!(sut.add_all(items), expected);
            }
            Op::RemoveAll(is) => {
                let mut expected = true;
                for &i in &is {
                    if !model.remove(&pool[i]) {
                        expected = false;
                        break;
                    }
                }
                let items: Vec<&String> = is.iter().map(|&i| &pool[i]).collect();
                prop_assert_eq!(sut.remove_all(items), expected);
            }
            Op::ContainsAll(is) => {
                let expected = is.iter().all(|&i| model.contains(&pool[i]));
                prop_assert_eq!(sut.contains_all(is.iter().map(|&i| &pool[i])), expected);
            }
            Op::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), crate::INITIAL_CAPACITY);
                prop_assert_eq!(sut.mod_count(), 0);
            }
            Op::Iterate => {
                let seen: Vec<&String> = sut.iter().collect();
                prop_assert_eq!(seen.len(), model.len());
                let unique: BTreeSet<&String> = seen.iter().copied().collect();
                prop_assert_eq!(unique.len(), seen.len(), "iteration yielded a duplicate");
                prop_assert!(unique.iter().all(|k| model.contains(*k)));
            }
            Op::StaleCursor(i) => {
                // A cursor taken before a successful structural change must fail.
                let mut c = sut.cursor();
                let k = pool[i].clone();
                let changed = if model.contains(&k) {
                    model.remove(&k);
                    sut.remove(k.as_str())
                } else {
                    model.insert(k.clone());
                    sut.add(k)
                };
                prop_assert!(changed);
                prop_assert_eq!(c.next(&sut), Err(SetError::ConcurrentModification));
            }
        }

        sut.assert_invariants();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashSet.
// After every op: len parity, chain lengths sum to len, every node sits in
// the bucket its stored hash maps to, len never exceeds the load threshold.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run(ChainedHashSet::new(), &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_multiplication((pool, ops) in arb_scenario()) {
        run(ChainedHashSet::with_hash_function(MultiplicationHash), &pool, ops)?;
    }
}

fn two_buckets(id: u64, _cap: usize) -> usize {
    (id & 1) as usize
}

// Property: same invariants when nearly every element collides, stressing
// long chains, mid-chain and tail unlinking, and relinking on growth.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let f: fn(u64, usize) -> usize = two_buckets;
        run(ChainedHashSet::with_hash_function(f), &pool, ops)?;
    }

    // Property: a full cursor walk yields every element exactly once.
    #[test]
    fn prop_cursor_round_trip(items in proptest::collection::hash_set(any::<u32>(), 0..200)) {
        let sut: ChainedHashSet<u32> = items.iter().copied().collect();
        let mut c = sut.cursor();
        let mut seen = HashSet::new();
        while c.has_next(&sut) {
            let v = *c.next(&sut).expect("has_next promised an element");
            prop_assert!(seen.insert(v), "element visited twice");
        }
        prop_assert_eq!(c.next(&sut), Err(SetError::NoSuchElement));
        prop_assert_eq!(seen, items);
    }
}
