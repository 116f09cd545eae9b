//! NullableTable: the symbol table operations for callers whose keys may
//! be absent.
//!
//! Every keyed operation validates the key before routing: an absent key
//! is an [`InvalidArgument`](SymbolTableError::InvalidArgument) and the
//! table is not touched.

use crate::chain::Keys;
use crate::error::{Result, SymbolTableError};
use crate::symbol_table::{PutOutcome, SymbolTable};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;
use log::warn;

pub struct NullableTable<K, V, S = DefaultHashBuilder> {
    table: SymbolTable<K, V, S>,
}

fn require<T>(key: Option<T>, op: &'static str) -> Result<T> {
    key.ok_or_else(|| {
        warn!("{}: rejected absent key", op);
        SymbolTableError::MISSING_KEY
    })
}

impl<K, V> NullableTable<K, V>
where
    K: Eq + Hash,
{
    pub fn new(buckets: usize) -> Result<Self> {
        SymbolTable::new(buckets).map(Self::from)
    }
}

impl<K, V, S> From<SymbolTable<K, V, S>> for NullableTable<K, V, S> {
    fn from(table: SymbolTable<K, V, S>) -> Self {
        Self { table }
    }
}

impl<K, V, S> NullableTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn put(&mut self, key: Option<K>, value: Option<V>) -> Result<PutOutcome<V>> {
        let key = require(key, "put")?;
        Ok(self.table.put(key, value))
    }

    pub fn get<Q>(&self, key: Option<&Q>) -> Result<Option<&V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let key = require(key, "get")?;
        Ok(self.table.get(key))
    }

    pub fn delete<Q>(&mut self, key: Option<&Q>) -> Result<Option<V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let key = require(key, "delete")?;
        Ok(self.table.delete(key))
    }

    pub fn contains<Q>(&self, key: Option<&Q>) -> Result<bool>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let key = require(key, "contains")?;
        Ok(self.table.contains(key))
    }

    /// Bucket an optional key routes to.
    pub fn bucket_of<Q>(&self, key: Option<&Q>) -> Result<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        self.table.chains().route(key).map_err(|e| {
            warn!("bucket_of: rejected absent key");
            e
        })
    }
}

impl<K, V, S> NullableTable<K, V, S> {
    pub fn size(&self) -> usize {
        self.table.size()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        self.table.keys()
    }

    pub fn as_table(&self) -> &SymbolTable<K, V, S> {
        &self.table
    }

    pub fn into_inner(self) -> SymbolTable<K, V, S> {
        self.table
    }
}
