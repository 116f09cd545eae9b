//! Debug-only chain-walk tracking.
//!
//! Routing runs `K: Hash` and a chain walk runs `K: Eq` for every node it
//! compares. If that user code calls back into the same table while a walk
//! is open, the nested call sees a chain that may be half relinked. Debug
//! builds record which table operation holds the walk and panic on a
//! nested entry, naming both operations. Release builds keep nothing.

use core::cell::Cell;
use core::marker::PhantomData;

pub(crate) struct WalkTracker {
    #[cfg(debug_assertions)]
    open: Cell<Option<&'static str>>,
    // Tables are single-threaded.
    _nosync: PhantomData<Cell<()>>,
}

/// An open walk; closes when dropped.
#[must_use]
pub(crate) struct Walk<'a> {
    #[cfg(debug_assertions)]
    tracker: &'a WalkTracker,
    #[cfg(not(debug_assertions))]
    _tracker: PhantomData<&'a WalkTracker>,
}

#[cfg(debug_assertions)]
impl WalkTracker {
    pub(crate) const fn new() -> Self {
        Self {
            open: Cell::new(None),
            _nosync: PhantomData,
        }
    }

    /// Open a walk on behalf of `op`.
    pub(crate) fn begin(&self, op: &'static str) -> Walk<'_> {
        if let Some(outer) = self.open.get() {
            panic!("chain walk re-entered: `{}` called while `{}` was walking", op, outer);
        }
        self.open.set(Some(op));
        Walk { tracker: self }
    }

    #[cfg(test)]
    pub(crate) fn current(&self) -> Option<&'static str> {
        self.open.get()
    }
}

#[cfg(not(debug_assertions))]
impl WalkTracker {
    pub(crate) const fn new() -> Self {
        Self {
            _nosync: PhantomData,
        }
    }

    #[inline(always)]
    pub(crate) fn begin(&self, _op: &'static str) -> Walk<'_> {
        Walk {
            _tracker: PhantomData,
        }
    }

    #[cfg(test)]
    pub(crate) fn current(&self) -> Option<&'static str> {
        None
    }
}

#[cfg(debug_assertions)]
impl Drop for Walk<'_> {
    fn drop(&mut self) {
        let op = self.tracker.open.replace(None);
        debug_assert!(op.is_some(), "walk closed twice");
    }
}
