//! chain-hashset: a single-threaded set backed by separately chained
//! buckets, with a pluggable primary hash function and fail-fast cursors.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a classic chained hash table whose pieces can each be checked in
//!   isolation, exposed as a set with explicit growth and iteration rules.
//! - Layers:
//!   - `Chains<E>`: node storage in a generational arena plus the chain
//!     walks (probe, append at tail, unlink anywhere, relink on growth).
//!   - `BucketArray`: one `Option<NodeKey>` head per slot; no untyped slots.
//!   - `ChainedHashSet<E, H, S>`: addressing, element count, modification
//!     stamp and the growth policy.
//!   - `Cursor` / `Iter`: bucket-then-chain traversal; the cursor is
//!     detached and fail-fast, the iterator borrows.
//!
//! Addressing
//! - `S: BuildHasher` turns an element into its `u64` identity hash.
//! - `H: PrimaryHashFunction` maps `(identity, capacity)` to a bucket index
//!   in `[0, capacity)`. The set trusts it; an out-of-range index trips a
//!   debug assertion and then a bounds check.
//! - Chains compare with `==` only. Colliding hashes never make two unequal
//!   elements duplicates.
//!
//! Growth
//! - Capacity starts at 16 and is always a power of two.
//! - After a successful `add`, while `len > floor(capacity * 0.75)`, the
//!   bucket array doubles and every node is relinked in the old traversal
//!   order. Nodes carry their identity hash, so growth never calls `Hash`.
//! - Removal never shrinks. `clear` returns to capacity 16.
//!
//! Fail-fast traversal
//! - The set keeps a modification count (reset by `clear`) and a clear
//!   epoch. A cursor copies both at creation and compares on every `next`.
//! - Any successful insert, remove, or any clear, makes older cursors fail
//!   with `SetError::ConcurrentModification`.
//!
//! Reentrancy
//! - Probes run user `Eq`/`Hash`. A debug-only guard panics if that code
//!   re-enters the same set while a probe is in progress.
//!
//! Notes and non-goals
//! - Single-threaded; no interior locking.
//! - `retain_all` and the `to_array` family always return
//!   `SetError::Unsupported`.
//! - Absent elements are unrepresentable in the typed API; the `try_*`
//!   methods accept `Option` and reject `None` with
//!   `SetError::InvalidArgument`.

mod buckets;
mod chain;
mod chained_hash_set;
mod chained_hash_set_proptest;
mod cursor;
mod error;
pub mod hash_function;
mod nullable;
mod reentrancy;

// Public surface
pub use chained_hash_set::{ChainedHashSet, INITIAL_CAPACITY, LOAD_FACTOR};
pub use cursor::{Cursor, Iter};
pub use error::SetError;
pub use hash_function::{DivisionHash, MultiplicationHash, PrimaryHashFunction};
