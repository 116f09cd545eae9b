// SymbolTable behavioural suite.
//
// Each test documents what behaviour is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Null-as-delete: `put(k, None)` removes k and never stores it.
// - Uniqueness: re-putting a key updates in place; size is unchanged.
// - Size bookkeeping: +1 per new key, -1 per removal of a present key.
// - Chain integrity: deleting head, middle or tail of a shared bucket
//   leaves every other key retrievable.
// - Enumeration: keys() yields exactly size() distinct live keys,
//   grouped by bucket, newest first within a bucket.
mod common;

use chained_symtab::{PutOutcome, SymbolTable};
use common::init_logger;
use std::collections::BTreeSet;
use std::hash::{BuildHasher, Hasher};

// Every key hashes to 0, so any bucket count behaves like one chain.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

fn single_bucket() -> SymbolTable<String, i32> {
    init_logger();
    SymbolTable::new(1).expect("one bucket is valid")
}

fn put(t: &mut SymbolTable<String, i32>, k: &str, v: Option<i32>) -> PutOutcome<i32> {
    t.put(k.to_string(), v)
}

// Test: construction.
// Verifies: a new table is empty with size 0 and no keys.
#[test]
fn new_table_is_empty() {
    let t = single_bucket();
    assert!(t.is_empty());
    assert_eq!(t.size(), 0);
    assert_eq!(t.keys().next(), None);
    assert_eq!(t.get("anything"), None);
    assert!(!t.contains("anything"));
}

// Test: construction with zero buckets.
// Verifies: InvalidArgument, not a panic.
#[test]
fn zero_buckets_is_invalid_argument() {
    init_logger();
    let err = SymbolTable::<String, i32>::new(0).err().expect("must fail");
    assert_eq!(err.to_string(), "invalid argument: bucket count must be positive");
}

// Test: size/is_empty after a single put.
#[test]
fn size_counts_live_keys() {
    let mut t = single_bucket();
    let _ = put(&mut t, "q", Some(3));
    assert!(!t.is_empty());
    assert_eq!(t.size(), 1);
    assert_eq!(t.len(), 1);
}

// Test: put of a new key.
// Assumes: another key already shares the bucket.
// Verifies: key readable, size +1.
#[test]
fn put_new_key_adds_it() {
    let mut t = single_bucket();
    let _ = put(&mut t, "q1", Some(10));
    assert_eq!(put(&mut t, "q", Some(7)), PutOutcome::Inserted);
    assert!(t.contains("q"));
    assert_eq!(t.get("q"), Some(&7));
    assert_eq!(t.size(), 2);
}

// Test: put(None) for an absent key.
// Verifies: nothing is stored; size stays 0.
#[test]
fn put_none_for_absent_key_adds_nothing() {
    let mut t = single_bucket();
    assert_eq!(put(&mut t, "q", None), PutOutcome::Unchanged);
    assert!(!t.contains("q"));
    assert_eq!(t.size(), 0);
}

// Test: put(None) when the key is at the head of its chain.
// Verifies: key removed, size -1, neighbour intact.
#[test]
fn put_none_removes_head_key() {
    let mut t = single_bucket();
    let _ = put(&mut t, "q1", Some(1));
    let _ = put(&mut t, "q", Some(2));
    assert_eq!(t.chain(0).next().map(|(k, _)| k.as_str()), Some("q"));

    assert_eq!(put(&mut t, "q", None), PutOutcome::Removed(2));
    assert!(!t.contains("q"));
    assert!(t.contains("q1"));
    assert_eq!(t.size(), 1);
}

// Test: put(None) when the key is not at the head of its chain.
// Assumes: M=1, so "k" and "a" collide.
// Verifies: !contains("a"), contains("k"), size 1.
#[test]
fn put_none_removes_collided_key() {
    let mut t = single_bucket();
    let _ = put(&mut t, "k", Some(1));
    let _ = put(&mut t, "a", Some(2));
    let _ = put(&mut t, "a", None);
    assert!(!t.contains("a"));
    assert!(t.contains("k"));
    assert_eq!(t.size(), 1);

    // Same again with "a" below the head.
    let mut t = single_bucket();
    let _ = put(&mut t, "a", Some(2));
    let _ = put(&mut t, "k", Some(1));
    let _ = put(&mut t, "a", None);
    assert!(!t.contains("a"));
    assert!(t.contains("k"));
    assert_eq!(t.size(), 1);
}

// Test: update in place at the head and below the head.
// Verifies: newest value wins; size unchanged; chain order unchanged.
#[test]
fn put_existing_key_updates_in_place() {
    for first in ["q", "q1"] {
        let mut t = single_bucket();
        let _ = put(&mut t, "q1", Some(0));
        let _ = put(&mut t, "q", Some(-5));
        let order: Vec<String> = t.keys().cloned().collect();

        let old = if first == "q" { -5 } else { 0 };
        assert_eq!(put(&mut t, first, Some(42)), PutOutcome::Updated(old));
        assert_eq!(t.get(first), Some(&42));
        assert_eq!(t.size(), 2);
        assert_eq!(t.keys().cloned().collect::<Vec<_>>(), order);
    }
}

// Test: get on single- and multi-node tables, hits and misses.
#[test]
fn get_hits_and_misses() {
    let mut t = single_bucket();
    let _ = put(&mut t, "q", Some(5));
    assert_eq!(t.get("q"), Some(&5));
    assert_eq!(t.get("-17"), None);

    let _ = put(&mut t, "q1", Some(6));
    let _ = put(&mut t, "q2", Some(7));
    assert_eq!(t.get("q"), Some(&5));
    assert_eq!(t.get("q1"), Some(&6));
    assert_eq!(t.get("q2"), Some(&7));
    assert_eq!(t.get("123456"), None);
}

// Test: delete of the only (head) key.
#[test]
fn delete_head_key() {
    let mut t = single_bucket();
    let _ = put(&mut t, "q", Some(1));
    assert!(t.contains("q"));
    assert_eq!(t.delete("q"), Some(1));
    assert!(!t.contains("q"));
    assert!(t.is_empty());
}

// Test: delete from the middle/bottom of a long chain.
// Verifies: put a,k,u,b,c,j then delete a; k and u survive, size 5.
#[test]
fn delete_mid_chain_key() {
    let mut t = single_bucket();
    for (i, k) in ["a", "k", "u", "b", "c", "j"].iter().enumerate() {
        let _ = put(&mut t, k, Some(i as i32));
    }
    assert!(t.contains("a"));
    assert_eq!(t.delete("a"), Some(0));
    assert!(!t.contains("a"));
    assert!(t.contains("k"));
    assert!(t.contains("u"));
    assert_eq!(t.size(), 5);
}

// Test: delete at every chain position.
// Verifies: all other keys stay retrievable with their values.
#[test]
fn delete_any_position_keeps_chain_intact() {
    let keys = ["a", "b", "c", "d", "e"];
    for victim in keys {
        let mut t = single_bucket();
        for (i, k) in keys.iter().enumerate() {
            let _ = put(&mut t, k, Some(i as i32));
        }
        assert!(t.delete(victim).is_some());
        for (i, k) in keys.iter().enumerate() {
            if *k == victim {
                assert!(!t.contains(*k));
            } else {
                assert_eq!(t.get(*k), Some(&(i as i32)), "{} lost after deleting {}", k, victim);
            }
        }
        assert_eq!(t.size(), keys.len() - 1);
    }
}

// Test: delete of an absent key.
// Verifies: idempotent; size and other keys unchanged.
#[test]
fn delete_absent_key_is_noop() {
    let mut t = single_bucket();
    let _ = put(&mut t, "a", Some(1));
    assert_eq!(t.delete("zzz"), None);
    assert_eq!(t.delete("zzz"), None);
    assert_eq!(t.size(), 1);
    assert_eq!(t.get("a"), Some(&1));
}

// Test: keys() on an empty table, repeatedly.
#[test]
fn keys_of_empty_table() {
    let t = single_bucket();
    assert_eq!(t.keys().count(), 0);
    assert_eq!(t.keys().count(), 0);
}

// Test: keys() with one key per bucket and with keys sharing a bucket.
// Verifies: exactly the live keys, each once, count == size.
#[test]
fn keys_yield_each_live_key_once() {
    init_logger();
    let mut spread: SymbolTable<String, i32> = SymbolTable::new(97).unwrap();
    let mut shared: SymbolTable<String, i32> = SymbolTable::new(1).unwrap();
    for (i, k) in ["q", "q1", "q2"].iter().enumerate() {
        let _ = spread.put(k.to_string(), Some(i as i32));
    }
    for (i, k) in ["a", "k", "u"].iter().enumerate() {
        let _ = shared.put(k.to_string(), Some(i as i32));
    }

    for (t, expected) in [(&spread, ["q", "q1", "q2"]), (&shared, ["a", "k", "u"])] {
        let seen: Vec<&str> = t.keys().map(String::as_str).collect();
        assert_eq!(seen.len(), t.size());
        let set: BTreeSet<&str> = seen.iter().copied().collect();
        assert_eq!(set, expected.into_iter().collect::<BTreeSet<_>>());
    }
}

// Test: keys() order within a bucket.
// Verifies: head-to-tail, most recently inserted first; deletions close gaps.
#[test]
fn keys_within_bucket_are_newest_first() {
    let mut t = single_bucket();
    for (i, k) in ["a", "k", "u"].iter().enumerate() {
        let _ = put(&mut t, k, Some(i as i32));
    }
    assert_eq!(t.keys().map(String::as_str).collect::<Vec<_>>(), ["u", "k", "a"]);
    let _ = t.delete("k");
    assert_eq!(t.keys().map(String::as_str).collect::<Vec<_>>(), ["u", "a"]);
}

// Test: keys() order across buckets.
// Verifies: bucket indices along the enumeration never decrease, and
// keys() agrees with contains() exactly.
#[test]
fn keys_grouped_by_ascending_bucket() {
    init_logger();
    let mut t: SymbolTable<String, usize> = SymbolTable::new(7).unwrap();
    for i in 0..100 {
        let _ = t.put(format!("key-{}", i), Some(i));
    }
    for i in (0..100).step_by(3) {
        let _ = t.put(format!("key-{}", i), None);
    }

    let buckets: Vec<usize> = t.keys().map(|k| t.bucket_of(k)).collect();
    assert!(buckets.windows(2).all(|w| w[0] <= w[1]));

    let live: BTreeSet<String> = t.keys().cloned().collect();
    assert_eq!(live.len(), t.size());
    for i in 0..100 {
        let k = format!("key-{}", i);
        assert_eq!(live.contains(&k), t.contains(&k));
        assert_eq!(t.contains(&k), i % 3 != 0);
    }
}

// Test: a custom hasher forcing collisions across a multi-bucket table.
// Verifies: all keys land in bucket 0 and remain individually addressable.
#[test]
fn custom_hasher_collisions() {
    init_logger();
    let mut t: SymbolTable<String, i32, ConstBuildHasher> =
        SymbolTable::with_hasher(16, ConstBuildHasher).unwrap();
    for i in 0..20 {
        let _ = t.put(format!("c{}", i), Some(i));
    }
    assert_eq!(t.chain(0).count(), 20);
    assert!((1..16).all(|b| t.chain(b).next().is_none()));
    let _ = t.put("c7".to_string(), None);
    let _ = t.put("c19".to_string(), Some(-1));
    assert_eq!(t.size(), 19);
    assert_eq!(t.get("c19"), Some(&-1));
    assert!(!t.contains("c7"));
    assert_eq!(t.chain(0).next().map(|(k, _)| k.as_str()), Some("c19"));
}
