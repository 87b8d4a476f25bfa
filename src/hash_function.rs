//! Primary hash functions: map an element's identity hash onto a bucket index.
//!
//! The set never decides how a bucket is chosen. It hands the identity hash
//! produced by its `BuildHasher` and the current capacity to a
//! `PrimaryHashFunction` and trusts the answer to lie in `[0, capacity)`.

/// Maps `(identity hash, capacity)` to a bucket index in `[0, capacity)`.
///
/// Implementations must be deterministic: the same inputs must always yield
/// the same index, otherwise stored elements become unreachable.
pub trait PrimaryHashFunction {
    fn hash(&self, identity: u64, capacity: usize) -> usize;
}

impl<F> PrimaryHashFunction for F
where
    F: Fn(u64, usize) -> usize,
{
    #[inline]
    fn hash(&self, identity: u64, capacity: usize) -> usize {
        self(identity, capacity)
    }
}

/// Division method: `identity mod capacity`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DivisionHash;

impl PrimaryHashFunction for DivisionHash {
    #[inline]
    fn hash(&self, identity: u64, capacity: usize) -> usize {
        (identity % capacity as u64) as usize
    }
}

/// Multiplication method (Knuth): `floor(capacity * frac(identity * A))`
/// with `A` the fractional part of the golden ratio.
///
/// The fraction is kept in 64-bit fixed point, so for a power-of-two
/// capacity this selects the top `log2(capacity)` bits of the product.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct MultiplicationHash;

impl MultiplicationHash {
    /// `2^64 / phi`, rounded to odd.
    pub const GOLDEN: u64 = 0x9E37_79B9_7F4A_7C15;
}

impl PrimaryHashFunction for MultiplicationHash {
    #[inline]
    fn hash(&self, identity: u64, capacity: usize) -> usize {
        let frac = identity.wrapping_mul(Self::GOLDEN);
        ((frac as u128 * capacity as u128) >> 64) as usize
    }
}
