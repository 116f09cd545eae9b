//! BucketRouter: maps keys to bucket indices for a fixed bucket count.

use crate::error::{Result, SymbolTableError};
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

/// Deterministic key -> bucket mapping. The bucket count is fixed at
/// construction, so a key routes to the same index for the router's
/// whole lifetime.
#[derive(Clone, Debug)]
pub struct BucketRouter<S> {
    hasher: S,
    buckets: NonZeroUsize,
}

impl<S> BucketRouter<S> {
    pub(crate) fn with_nonzero(buckets: NonZeroUsize, hasher: S) -> Self {
        Self { hasher, buckets }
    }

    #[inline]
    pub fn buckets(&self) -> usize {
        self.buckets.get()
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }
}

impl<S> BucketRouter<S>
where
    S: BuildHasher,
{
    pub fn new(buckets: usize, hasher: S) -> Result<Self> {
        let buckets = NonZeroUsize::new(buckets).ok_or(SymbolTableError::ZERO_BUCKETS)?;
        Ok(Self::with_nonzero(buckets, hasher))
    }

    /// Bucket index for `key`, always in `[0, buckets)`.
    ///
    /// The hash is an unsigned `u64`, so a plain remainder is already
    /// non-negative; reducing in `u64` before narrowing keeps the high
    /// bits in play on 32-bit targets.
    #[inline]
    pub fn index<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        let hash = self.hasher.hash_one(key);
        (hash % self.buckets.get() as u64) as usize
    }

    /// Like [`index`](Self::index), for callers holding a key that may be
    /// absent.
    pub fn route<Q>(&self, key: Option<&Q>) -> Result<usize>
    where
        Q: ?Sized + Hash,
    {
        key.map(|k| self.index(k)).ok_or(SymbolTableError::MISSING_KEY)
    }
}
