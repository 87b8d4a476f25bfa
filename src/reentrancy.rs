//! Debug-only probe guard.
//!
//! While the set walks a chain it calls user `Eq` and `Hash` code. If that
//! code reaches back into the same set, the walk could observe (or cause) a
//! half-updated chain. In debug builds a second entry panics; in release
//! builds the guard is an empty struct.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-set probe tracker. Hold `let _g = self.reentrancy.enter();` for as
/// long as user code may run against internal state.
#[derive(Debug)]
pub(crate) struct DebugReentrancy {
    #[cfg(debug_assertions)]
    active: Cell<bool>,
    // Single-threaded: keeps the owning set !Sync.
    _nosync: PhantomData<Cell<()>>,
}

impl DebugReentrancy {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(false),
            _nosync: PhantomData,
        }
    }

    /// Marks a probe as in progress until the returned guard drops.
    #[inline]
    pub(crate) fn enter(&self) -> ProbeGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.active.replace(true),
                "reentrancy detected: element Eq/Hash re-entered the set during a probe"
            );
            return ProbeGuard { owner: self };
        }

        #[cfg(not(debug_assertions))]
        {
            return ProbeGuard { _z: PhantomData };
        }
    }
}

impl Default for DebugReentrancy {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct ProbeGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for ProbeGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.active.set(false);
    }
}
