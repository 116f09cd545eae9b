//! ChainTable: structural separate-chaining layer over a node arena.
//!
//! Buckets hold the arena key of their chain head; each node owns the
//! link to its successor. A node is reachable from exactly one place:
//! its bucket slot if it is the head, otherwise its predecessor's
//! `next`. The bucket count never changes.

use crate::error::Result;
use crate::reentrancy::WalkTracker;
use crate::router::BucketRouter;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::num::NonZeroUsize;
use hashbrown::hash_map::DefaultHashBuilder;
use log::trace;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    struct NodeKey;
}

/// Stable, generational name for one live entry. A handle to a removed
/// entry never resolves again, even if its arena slot is reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(NodeKey);

impl Handle {
    pub fn key<'a, K, V, S>(&self, table: &'a ChainTable<K, V, S>) -> Option<&'a K> {
        table.nodes.get(self.0).map(|n| &n.key)
    }

    pub fn value<'a, K, V, S>(&self, table: &'a ChainTable<K, V, S>) -> Option<&'a V> {
        table.nodes.get(self.0).map(|n| &n.value)
    }

    pub fn value_mut<'a, K, V, S>(&self, table: &'a mut ChainTable<K, V, S>) -> Option<&'a mut V> {
        table.nodes.get_mut(self.0).map(|n| &mut n.value)
    }
}

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    next: Option<NodeKey>,
}

/// Separate-chaining table over a fixed number of buckets.
///
/// Keys are unique across the whole table. New keys are linked in at the
/// head of their bucket's chain, updates keep their node, and removal
/// relinks the node's owner to its successor. Lookups hand out
/// generational [`Handle`]s.
pub struct ChainTable<K, V, S = DefaultHashBuilder> {
    router: BucketRouter<S>,
    heads: Box<[Option<NodeKey>]>,
    nodes: SlotMap<NodeKey, Node<K, V>>,
    walks: WalkTracker,
}

impl<K, V> ChainTable<K, V>
where
    K: Eq + Hash,
{
    pub fn new(buckets: usize) -> Result<Self> {
        Self::with_hasher(buckets, DefaultHashBuilder::default())
    }
}

impl<K, V, S> ChainTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(buckets: usize, hasher: S) -> Result<Self> {
        Ok(Self::with_router(BucketRouter::new(buckets, hasher)?))
    }

    pub(crate) fn with_nonzero(buckets: NonZeroUsize, hasher: S) -> Self {
        Self::with_router(BucketRouter::with_nonzero(buckets, hasher))
    }

    fn with_router(router: BucketRouter<S>) -> Self {
        Self {
            heads: vec![None; router.buckets()].into_boxed_slice(),
            router,
            nodes: SlotMap::with_key(),
            walks: WalkTracker::new(),
        }
    }

    /// First node reachable from `head` whose key equals `q`.
    fn locate<Q>(
        nodes: &SlotMap<NodeKey, Node<K, V>>,
        head: Option<NodeKey>,
        q: &Q,
    ) -> Option<NodeKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut cur = head;
        while let Some(n) = cur {
            let node = &nodes[n];
            if node.key.borrow() == q {
                return Some(n);
            }
            cur = node.next;
        }
        None
    }

    pub fn bucket_of<Q>(&self, q: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        let _w = self.walks.begin("bucket_of");
        self.router.index(q)
    }

    /// Bucket for a key that may be absent.
    pub(crate) fn route<Q>(&self, q: Option<&Q>) -> Result<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        let _w = self.walks.begin("route");
        self.router.route(q)
    }

    pub fn find<Q>(&self, q: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _w = self.walks.begin("find");
        let b = self.router.index(q);
        Self::locate(&self.nodes, self.heads[b], q).map(Handle)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(q).is_some()
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let n = self.find(q)?;
        self.nodes.get(n.0).map(|node| &node.value)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let n = self.find(q)?;
        self.nodes.get_mut(n.0).map(|node| &mut node.value)
    }

    /// Insert or overwrite. A new key is linked in at the head of its
    /// bucket; an existing key keeps its node and position and the
    /// previous value is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let _w = self.walks.begin("insert");
        let b = self.router.index(&key);
        if let Some(n) = Self::locate(&self.nodes, self.heads[b], &key) {
            trace!("chain update: bucket={} size={}", b, self.nodes.len());
            return Some(core::mem::replace(&mut self.nodes[n].value, value));
        }

        let next = self.heads[b];
        let n = self.nodes.insert(Node { key, value, next });
        self.heads[b] = Some(n);
        trace!("chain insert: bucket={} size={}", b, self.nodes.len());
        None
    }

    /// Unlink and return the entry for `q`, if any. The rest of the chain
    /// keeps its order.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _w = self.walks.begin("remove");
        let b = self.router.index(q);
        let mut prev: Option<NodeKey> = None;
        let mut cur = self.heads[b];
        while let Some(n) = cur {
            let node = &self.nodes[n];
            if node.key.borrow() == q {
                unlink(&mut self.heads, &mut self.nodes, b, prev, n);
                trace!("chain remove: bucket={} size={}", b, self.nodes.len() - 1);
                return self.nodes.remove(n).map(|node| (node.key, node.value));
            }
            prev = cur;
            cur = node.next;
        }
        None
    }
}

// Point whatever owns `n` (its bucket slot or its predecessor) at `n`'s
// successor. Takes the fields separately so callers can keep a walk open.
fn unlink<K, V>(
    heads: &mut [Option<NodeKey>],
    nodes: &mut SlotMap<NodeKey, Node<K, V>>,
    bucket: usize,
    prev: Option<NodeKey>,
    n: NodeKey,
) {
    let next = nodes[n].next;
    match prev {
        None => heads[bucket] = next,
        Some(p) => nodes[p].next = next,
    }
}

impl<K, V, S> ChainTable<K, V, S> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.heads.len()
    }

    pub fn hasher(&self) -> &S {
        self.router.hasher()
    }

    #[cfg(test)]
    pub(crate) fn open_walk(&self) -> Option<&'static str> {
        self.walks.current()
    }

    /// Entries of one bucket, head to tail. Empty for an out-of-range
    /// bucket.
    pub fn chain(&self, bucket: usize) -> Chain<'_, K, V> {
        Chain {
            nodes: &self.nodes,
            cur: self.heads.get(bucket).copied().flatten(),
        }
    }

    /// All entries, bucket by bucket in ascending index order and
    /// head to tail within each bucket.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            heads: self.heads.iter(),
            cur: None,
            remaining: self.nodes.len(),
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K, V, S> core::fmt::Debug for ChainTable<K, V, S>
where
    K: core::fmt::Debug,
    V: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over one bucket's chain.
pub struct Chain<'a, K, V> {
    nodes: &'a SlotMap<NodeKey, Node<K, V>>,
    cur: Option<NodeKey>,
}

impl<'a, K, V> Iterator for Chain<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let node = &nodes[self.cur?];
        self.cur = node.next;
        Some((&node.key, &node.value))
    }
}

impl<K, V> FusedIterator for Chain<'_, K, V> {}

/// Iterator over every entry in bucket order.
pub struct Iter<'a, K, V> {
    nodes: &'a SlotMap<NodeKey, Node<K, V>>,
    heads: core::slice::Iter<'a, Option<NodeKey>>,
    cur: Option<NodeKey>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        loop {
            if let Some(n) = self.cur {
                let node = &nodes[n];
                self.cur = node.next;
                self.remaining -= 1;
                return Some((&node.key, &node.value));
            }
            self.cur = *self.heads.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}
