//! SymbolTable: the public facade over [`ChainTable`].
//!
//! Adds the null-as-delete convention (`put(key, None)` removes `key`),
//! validates the bucket count at construction and logs table creation.
//! Structural work (routing, chain walks, relinking) stays in `chain`.

use crate::chain::{Chain, ChainTable, Iter, Keys, Values};
use crate::error::Result;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use hashbrown::hash_map::DefaultHashBuilder;
use log::debug;

/// Bucket count used by [`SymbolTable::default`].
pub const DEFAULT_BUCKETS: usize = 997;

const DEFAULT_BUCKETS_NZ: NonZeroUsize = match NonZeroUsize::new(DEFAULT_BUCKETS) {
    Some(n) => n,
    None => panic!("DEFAULT_BUCKETS must be positive"),
};

/// What a [`SymbolTable::put`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "put reports whether the key was added, updated or removed"]
pub enum PutOutcome<V> {
    /// A new key was linked in; size grew by one.
    Inserted,
    /// An existing key's value was overwritten; carries the old value.
    Updated(V),
    /// A `None` value removed an existing key; carries its value.
    Removed(V),
    /// A `None` value for a key that was not present.
    Unchanged,
}

impl<V> PutOutcome<V> {
    /// Change in table size caused by the put.
    pub fn size_delta(&self) -> isize {
        match self {
            PutOutcome::Inserted => 1,
            PutOutcome::Removed(_) => -1,
            PutOutcome::Updated(_) | PutOutcome::Unchanged => 0,
        }
    }
}

/// Separate-chaining symbol table with a fixed bucket count.
///
/// Storing `None` for a key deletes it: a key is never present without a
/// value. Callers relying on "put null to remove" get exactly that.
pub struct SymbolTable<K, V, S = DefaultHashBuilder> {
    chains: ChainTable<K, V, S>,
}

impl<K, V> SymbolTable<K, V>
where
    K: Eq + Hash,
{
    /// Empty table with `buckets` chains. Fails if `buckets` is zero.
    pub fn new(buckets: usize) -> Result<Self> {
        Self::with_hasher(buckets, DefaultHashBuilder::default())
    }
}

impl<K, V, S> Default for SymbolTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        debug!("symbol table created: buckets={}", DEFAULT_BUCKETS);
        Self {
            chains: ChainTable::with_nonzero(DEFAULT_BUCKETS_NZ, S::default()),
        }
    }
}

impl<K, V, S> SymbolTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(buckets: usize, hasher: S) -> Result<Self> {
        let chains = ChainTable::with_hasher(buckets, hasher)?;
        debug!("symbol table created: buckets={}", buckets);
        Ok(Self { chains })
    }

    /// Associate `value` with `key`, or remove `key` when `value` is `None`.
    pub fn put(&mut self, key: K, value: Option<V>) -> PutOutcome<V> {
        match value {
            None => match self.chains.remove(&key) {
                Some((_, old)) => PutOutcome::Removed(old),
                None => PutOutcome::Unchanged,
            },
            Some(v) => match self.chains.insert(key, v) {
                Some(old) => PutOutcome::Updated(old),
                None => PutOutcome::Inserted,
            },
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.chains.get(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.chains.get_mut(key)
    }

    /// Remove `key`, returning its value. Absent keys are a no-op.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.chains.remove(key).map(|(_, v)| v)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.chains.contains_key(key)
    }

    /// Bucket `key` routes to.
    pub fn bucket_of<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        self.chains.bucket_of(key)
    }

    pub(crate) fn chains(&self) -> &ChainTable<K, V, S> {
        &self.chains
    }
}

impl<K, V, S> SymbolTable<K, V, S> {
    pub fn size(&self) -> usize {
        self.chains.len()
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.chains.bucket_count()
    }

    pub fn hasher(&self) -> &S {
        self.chains.hasher()
    }

    /// Live keys, each once: buckets in ascending order, each chain head
    /// to tail (most recently inserted first). Every call starts over.
    pub fn keys(&self) -> Keys<'_, K, V> {
        self.chains.keys()
    }

    pub fn values(&self) -> Values<'_, K, V> {
        self.chains.values()
    }

    /// Entries in the same order as [`keys`](Self::keys).
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.chains.iter()
    }

    pub fn chain(&self, bucket: usize) -> Chain<'_, K, V> {
        self.chains.chain(bucket)
    }
}

impl<'a, K, V, S> IntoIterator for &'a SymbolTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> Extend<(K, Option<V>)> for SymbolTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, Option<V>)>>(&mut self, iter: T) {
        for (k, v) in iter {
            let _ = self.put(k, v);
        }
    }
}

impl<K, V, S> core::fmt::Debug for SymbolTable<K, V, S>
where
    K: core::fmt::Debug,
    V: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.chains, f)
    }
}
