//! chained-symtab: a symbol table built on separate chaining over a
//! fixed array of buckets.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, verifiable associative container whose chain
//!   surgery (head insertion, in-place update, relinking on delete) is
//!   explicit and testable bucket by bucket.
//! - Layers:
//!   - BucketRouter<S>: hashes a key with `S: BuildHasher` and reduces
//!     the hash to a bucket index in `[0, M)`.
//!   - ChainTable<K, V, S>: structural layer. Bucket heads plus a
//!     generational node arena; each node owns the link to its
//!     successor. Returns stable `Handle`s; never interprets values.
//!   - SymbolTable<K, V, S>: public facade. `put(key, None)` deletes,
//!     construction validates the bucket count, operations are logged.
//!   - NullableTable<K, V, S>: the same operations for keys that may be
//!     absent; an absent key is an `InvalidArgument`.
//!
//! Constraints
//! - Single-threaded: tables are `!Sync`.
//! - Bucket count M is fixed at construction; there is no rehashing.
//!   Heavily skewed key sets produce long chains.
//! - Keys are unique across the whole table, not just per bucket.
//! - `size` is the exact number of live nodes.
//! - A key is never stored without a value.
//!
//! Chains and ownership
//! - Nodes live in a `slotmap::SlotMap`; a chain link is an arena key,
//!   not a pointer. Each node is referenced from exactly one place: its
//!   bucket slot when it is the head, otherwise its predecessor's `next`.
//! - Removal relinks the owner of the removed node to its successor and
//!   frees the arena slot. Generational keys keep stale handles from
//!   resolving to a later node that reuses the slot.
//!
//! Enumeration order
//! - `keys()`/`iter()` walk buckets in ascending index order and each
//!   chain head to tail. New keys are linked at the head, so within a
//!   bucket the most recently inserted key comes first; updates do not
//!   move a key.
//! - Iterators borrow the table, so mutation during enumeration does not
//!   compile.
//!
//! Reentrancy
//! - Routing runs `K: Hash` and chain walks run `K: Eq`. A debug-only
//!   walk guard panics if that user code reaches back into the same
//!   table mid-walk; in release builds the guard is free.
//!
//! Notes and non-goals
//! - No load-factor growth, no persistence, no concurrent access.
//! - The `graph` module is a client-side toolkit (degree statistics,
//!   connected components, depth-first paths) and does not depend on the
//!   table internals.

pub mod chain;
mod chain_proptest;
mod error;
pub mod graph;
pub mod nullable;
mod reentrancy;
pub mod router;
mod symbol_table;

// Public surface
pub use chain::{ChainTable, Handle};
pub use error::{Result, SymbolTableError};
pub use nullable::NullableTable;
pub use symbol_table::{PutOutcome, SymbolTable, DEFAULT_BUCKETS};
