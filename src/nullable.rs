//! Option-taking entry points for callers whose elements may be absent.
//!
//! The typed API cannot be handed a missing element. Callers bridging from
//! data where absence is possible use these mirrors instead: an absent
//! element or collection is rejected with [`SetError::InvalidArgument`]
//! before the set is touched. Inside a collection, an absent element fails
//! at that point; elements processed earlier stay applied.

use crate::chained_hash_set::ChainedHashSet;
use crate::error::SetError;
use crate::hash_function::PrimaryHashFunction;
use core::hash::{BuildHasher, Hash};

const ELEMENT: SetError = SetError::InvalidArgument("element");
const COLLECTION: SetError = SetError::InvalidArgument("collection");

impl<E, H, S> ChainedHashSet<E, H, S>
where
    E: Eq + Hash,
    H: PrimaryHashFunction,
    S: BuildHasher,
{
    pub fn try_contains(&self, element: Option<&E>) -> Result<bool, SetError> {
        element.map(|e| self.contains(e)).ok_or(ELEMENT)
    }

    pub fn try_add(&mut self, element: Option<E>) -> Result<bool, SetError> {
        let e = element.ok_or(ELEMENT)?;
        Ok(self.add(e))
    }

    pub fn try_remove(&mut self, element: Option<&E>) -> Result<bool, SetError> {
        let e = element.ok_or(ELEMENT)?;
        Ok(self.remove(e))
    }

    pub fn try_contains_all<'a, I>(&self, items: Option<I>) -> Result<bool, SetError>
    where
        I: IntoIterator<Item = Option<&'a E>>,
        E: 'a,
    {
        for e in items.ok_or(COLLECTION)? {
            if !self.try_contains(e)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn try_add_all<I>(&mut self, items: Option<I>) -> Result<bool, SetError>
    where
        I: IntoIterator<Item = Option<E>>,
    {
        for e in items.ok_or(COLLECTION)? {
            if !self.try_add(e)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn try_remove_all<'a, I>(&mut self, items: Option<I>) -> Result<bool, SetError>
    where
        I: IntoIterator<Item = Option<&'a E>>,
        E: 'a,
    {
        for e in items.ok_or(COLLECTION)? {
            if !self.try_remove(e)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
