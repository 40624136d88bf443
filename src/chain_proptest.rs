#![cfg(test)]

// Property tests for Chain kept inside the crate so they can reach the
// entry handles without feature gates.

use crate::chain::{Chain, EntryHandle, Upsert};
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Clone, Debug)]
enum OpI {
    Upsert(usize, u32),
    Find(usize),
    Lookup(String),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-c]{0,3}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<u32>()).prop_map(|(i, v)| OpI::Upsert(i, v)),
            idx.clone().prop_map(OpI::Find),
            "[a-c]{0,3}".prop_map(OpI::Lookup),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: Chain agrees with a HashMap model.
// - Upsert inserts once per key; later upserts return the first handle
//   and the previous value.
// - find/lookup parity with the model, including keys never inserted.
// - len equals the model's key count; every key occurs at most once.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_chain_matches_model((pool, ops) in arb_scenario()) {
        let mut sut = Chain::new();
        let mut model: HashMap<String, u32> = HashMap::new();
        let mut handles: HashMap<String, EntryHandle> = HashMap::new();

        for op in ops {
            match op {
                OpI::Upsert(i, v) => {
                    let k = &pool[i];
                    match sut.insert_or_update(k, v) {
                        Upsert::Inserted(h) => {
                            prop_assert!(!model.contains_key(k));
                            handles.insert(k.clone(), h);
                        }
                        Upsert::Updated { handle, previous } => {
                            prop_assert_eq!(Some(&previous), model.get(k));
                            prop_assert_eq!(Some(&handle), handles.get(k));
                        }
                    }
                    model.insert(k.clone(), v);
                }
                OpI::Find(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.find(k), handles.get(k).copied());
                }
                OpI::Lookup(k) => {
                    prop_assert_eq!(sut.lookup(&k), model.get(&k).copied());
                }
            }
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
        }

        for (k, h) in &handles {
            prop_assert_eq!(sut.occurrences(k), 1);
            prop_assert_eq!(sut.key(*h), Some(k.as_str()));
            prop_assert_eq!(sut.value(*h), model.get(k).copied());
        }
        let mut seen: Vec<&str> = sut.iter().map(|(k, _)| k).collect();
        seen.sort_unstable();
        let mut expected: Vec<&str> = model.keys().map(String::as_str).collect();
        expected.sort_unstable();
        prop_assert_eq!(seen, expected);
    }
}
