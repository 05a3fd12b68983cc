// Property tests for ByteTable kept inside the crate so they can inspect
// bucket-level state alongside the public API.

use crate::byte_table::{ByteTable, SetOutcome};
use crate::config::TableConfig;
use crate::error::TableError;
use crate::hasher::{KeyHasher, Murmur3};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32, bool),
    Remove(usize),
    Get(usize),
    Exists(Vec<u8>),
    Mutate(usize, i32),
    Grow,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<OpI>)> {
    // Short keys over a tiny alphabet produce shared prefixes on purpose.
    proptest::collection::vec(proptest::collection::vec(b'a'..=b'c', 0..4), 1..=10).prop_flat_map(
        |pool| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let exists_pool = proptest::sample::select(pool.clone());
            let op = prop_oneof![
                4 => (idx.clone(), any::<i32>(), any::<bool>())
                    .prop_map(|(i, v, r)| OpI::Set(i, v, r)),
                2 => idx.clone().prop_map(OpI::Remove),
                2 => idx.clone().prop_map(OpI::Get),
                1 => prop_oneof![
                    exists_pool,
                    proptest::collection::vec(b'a'..=b'd', 0..5)
                ]
                .prop_map(OpI::Exists),
                1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
                1 => Just(OpI::Grow),
                1 => Just(OpI::Iterate),
            ];
            proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
        },
    )
}

fn run_state_machine<H: KeyHasher>(
    mut sut: ByteTable<i32, H>,
    pool: &[Vec<u8>],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Vec<u8>, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Set(i, v, replace) => {
                let k = &pool[i];
                let prev = model.get(k).copied();
                let cap_before = sut.capacity();
                match sut.set(k, v, replace) {
                    Ok(SetOutcome::Replaced(old)) => {
                        prop_assert!(replace, "replaced without replace flag");
                        prop_assert_eq!(Some(old), prev);
                        model.insert(k.clone(), v);
                        prop_assert_eq!(sut.capacity(), cap_before);
                    }
                    Ok(SetOutcome::Inserted) => {
                        prop_assert!(prev.is_none());
                        model.insert(k.clone(), v);
                        prop_assert_eq!(sut.capacity(), cap_before);
                    }
                    Ok(SetOutcome::Grown { capacity }) => {
                        prop_assert!(prev.is_none());
                        model.insert(k.clone(), v);
                        prop_assert_eq!(capacity, cap_before * 2);
                    }
                    Ok(SetOutcome::GrowFailed(e)) => {
                        prop_assert!(false, "unbounded table failed to grow: {}", e);
                    }
                    Err(TableError::KeyExists) => {
                        prop_assert!(!replace && prev.is_some());
                    }
                    Err(e) => prop_assert!(false, "unexpected error: {}", e),
                }
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                match (sut.remove(k), model.remove(k)) {
                    (Ok(v), Some(mv)) => prop_assert_eq!(v, mv),
                    (Err(TableError::NotFound), None) => {}
                    (got, want) => prop_assert!(false, "remove mismatch: {:?} vs {:?}", got, want),
                }
                prop_assert!(!sut.exists(k));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
                prop_assert_eq!(sut.exists(k), model.contains_key(k));
            }
            OpI::Exists(k) => {
                prop_assert_eq!(sut.exists(&k), model.contains_key(&k));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(v) = sut.get_mut(k) {
                    *v = v.saturating_add(d);
                    let mv = model.get_mut(k).expect("model has mutated key");
                    *mv = mv.saturating_add(d);
                } else {
                    prop_assert!(!model.contains_key(k));
                }
            }
            OpI::Grow => {
                let cap_before = sut.capacity();
                prop_assert_eq!(sut.grow().expect("unbounded grow"), cap_before * 2);
            }
            OpI::Iterate => {
                let s_keys: BTreeSet<Vec<u8>> = sut.iter().map(|(k, _)| k.to_vec()).collect();
                let m_keys: BTreeSet<Vec<u8>> = model.keys().cloned().collect();
                prop_assert_eq!(sut.iter().count(), model.len());
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        // Post-conditions after each op
        // 1) Size parity
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        // 2) Load factor invariant holds after every op
        prop_assert!(sut.len() / sut.capacity() < sut.max_load_factor() as usize);
        // 3) Bucket sizes add up and no empty bucket is allocated
        let mut total = 0;
        for slot in 0..sut.capacity() {
            if let Some(stats) = sut.bucket_stats(slot) {
                prop_assert!(stats.len > 0);
                prop_assert!(stats.len == 1 || stats.ever_collided);
                total += stats.len;
            }
        }
        prop_assert_eq!(total, sut.len());
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Duplicate keys without replace are rejected and leave the value alone.
// - Replace hands back the previous value.
// - get/exists parity; prefix keys never alias.
// - Growth (triggered or explicit) preserves every entry and len.
// - Bucket sizes sum to len; no empty bucket survives a removal.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), lf in 1u32..=3) {
        let sut = ByteTable::with_config_and_hasher(TableConfig::new(1, lf), Murmur3::with_seed(9001))
            .expect("valid config");
        run_state_machine(sut, &pool, ops)?;
    }
}

// Constant hash: every key shares slot 0.
#[derive(Clone, Copy, Default)]
struct ConstHasher;
impl KeyHasher for ConstHasher {
    fn hash_key(&self, _key: &[u8]) -> u32 {
        0
    }
}

// Property: Same state-machine invariants as above, under worst-case
// collision behavior (constant hasher). This stresses chain scanning,
// unlinking at every chain position, and relinking during growth.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario(), lf in 1u32..=3) {
        let sut = ByteTable::with_config_and_hasher(TableConfig::new(2, lf), ConstHasher)
            .expect("valid config");
        run_state_machine(sut, &pool, ops)?;
    }
}
