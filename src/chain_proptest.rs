#![cfg(test)]

// Property tests for ChainTable kept inside the crate so they can reach
// handles and per-bucket chains directly.

use crate::chain::{ChainTable, Handle};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::Hasher;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations so shrinking moves towards earlier keys and
// shorter op lists.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Find(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    (1usize..=5, proptest::collection::vec("[a-z]{0,5}", 1..=8)).prop_flat_map(|(buckets, pool)| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Find),
            prop_oneof![contains_pool, "[a-z]{0,5}".prop_map(|s| s)].prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (buckets, pool.clone(), ops))
    })
}

// Checks shared by both hashers: size parity, stale handles, and chain
// structure (every key sits in the bucket it routes to, exactly once).
fn check_structure<S: std::hash::BuildHasher>(
    sut: &ChainTable<Key, i32, S>,
    model: &HashMap<Key, i32>,
    stale: &[Handle],
) -> Result<(), TestCaseError> {
    for &h in stale {
        prop_assert!(h.value(sut).is_none());
    }
    prop_assert_eq!(sut.len(), model.len());
    prop_assert_eq!(sut.is_empty(), model.is_empty());

    let mut seen = 0;
    for b in 0..sut.bucket_count() {
        for (k, v) in sut.chain(b) {
            prop_assert_eq!(sut.bucket_of(k), b);
            prop_assert_eq!(model.get(k), Some(v));
            seen += 1;
        }
    }
    prop_assert_eq!(seen, model.len());
    Ok(())
}

fn run<S: std::hash::BuildHasher>(
    mut sut: ChainTable<Key, i32, S>,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Key, i32> = HashMap::new();
    let mut live: HashMap<Key, Handle> = HashMap::new();
    let mut stale: Vec<Handle> = Vec::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = key_from(&pool, i);
                let prev = sut.insert(k.clone(), v);
                prop_assert_eq!(prev, model.insert(k.clone(), v));
                let h = sut.find(&k).expect("just inserted");
                if let Some(&old) = live.get(&k) {
                    // Updates keep the original node.
                    prop_assert_eq!(old, h);
                } else {
                    live.insert(k.clone(), h);
                    // New keys go to the head of their chain.
                    let head = sut.chain(sut.bucket_of(&k)).next().map(|(hk, _)| hk.clone());
                    prop_assert_eq!(head, Some(k));
                }
            }
            OpI::Remove(i) => {
                let k = key_from(&pool, i);
                let removed = sut.remove(&k);
                match model.remove(&k) {
                    Some(mv) => {
                        let (kk, vv) = removed.expect("present in model");
                        prop_assert!(kk == k);
                        prop_assert_eq!(vv, mv);
                        stale.push(live.remove(&k).expect("tracked"));
                    }
                    None => prop_assert!(removed.is_none()),
                }
            }
            OpI::Find(i) => {
                let k = key_from(&pool, i);
                let s = sut.find(&k);
                prop_assert_eq!(s.is_some(), model.contains_key(&k));
                if let Some(h) = s {
                    prop_assert_eq!(Some(&h), live.get(&k));
                    prop_assert_eq!(h.value(&sut), model.get(&k));
                }
            }
            OpI::Contains(s) => {
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(sut.contains_key(s.as_str()), has_model);
                prop_assert_eq!(sut.get(s.as_str()).is_some(), has_model);
            }
            OpI::Mutate(i, d) => {
                let k = key_from(&pool, i);
                if let Some(vr) = sut.get_mut(&k) {
                    *vr = vr.saturating_add(d);
                    let mv = model.get_mut(&k).expect("model agrees");
                    *mv = mv.saturating_add(d);
                } else {
                    prop_assert!(!model.contains_key(&k));
                }
            }
            OpI::Iterate => {
                let s_keys: Vec<Key> = sut.keys().cloned().collect();
                let unique: BTreeSet<Key> = s_keys.iter().cloned().collect();
                prop_assert_eq!(unique.len(), s_keys.len(), "keys repeated");
                let m_keys: BTreeSet<Key> = model.keys().cloned().collect();
                prop_assert_eq!(unique, m_keys);
            }
        }
        check_structure(&sut, &model, &stale)?;
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap for
// small bucket counts, so chains are long and every relink path is hit.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((buckets, pool, ops) in arb_scenario()) {
        run(ChainTable::new(buckets).unwrap(), pool, ops)?;
    }
}

// Collision variant using a constant hasher: every key shares one chain.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl std::hash::BuildHasher for ConstBuildHasher {
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

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((buckets, pool, ops) in arb_scenario()) {
        let sut = ChainTable::with_hasher(buckets, ConstBuildHasher).unwrap();
        run(sut, pool, ops)?;
    }
}
