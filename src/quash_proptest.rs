#![cfg(test)]

// Property tests for the composite kept inside the crate so they can call
// the consistency checker after every single step.

use crate::quash::{DeleteOutcome, ExtractOutcome, Quash};
use crate::record::Record;
use proptest::prelude::*;
use std::collections::BTreeMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// numerals, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize),
    Delete(usize),
    Lookup(usize),
    ExtractMin,
    Enumerate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<i64>, Vec<OpI>)> {
    proptest::collection::vec(-99i64..=99, 1..=10).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => idx.clone().prop_map(OpI::Insert),
            2 => idx.clone().prop_map(OpI::Delete),
            2 => idx.prop_map(OpI::Lookup),
            2 => Just(OpI::ExtractMin),
            1 => Just(OpI::Enumerate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn parse(record: &Record) -> i64 {
    record
        .to_string()
        .parse()
        .expect("records under test are canonical numerals")
}

// Property: State-machine equivalence against a BTreeMap multiset model.
// Invariants exercised across random operation sequences:
// - Insert returns the running multiplicity; duplicates collapse.
// - Delete decrements above multiplicity 1 and removes exactly at 1.
// - Lookup parity with the model, including reported multiplicity.
// - ExtractMin always consumes one instance of the model's minimum.
// - Enumeration yields each distinct record exactly once with its count.
// - After every step: bidirectional index consistency, heap order, and
//   distinct-record count parity.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut = Quash::new();
        let mut model: BTreeMap<i64, usize> = BTreeMap::new();

        for op in ops {
            match op {
                OpI::Insert(i) => {
                    let v = pool[i];
                    let count = sut.insert(Record::from(v));
                    let entry = model.entry(v).or_insert(0);
                    *entry += 1;
                    prop_assert_eq!(count, *entry, "running multiplicity for {}", v);
                }
                OpI::Delete(i) => {
                    let v = pool[i];
                    let outcome = sut.delete(&Record::from(v));
                    match model.get_mut(&v) {
                        None => prop_assert_eq!(outcome, DeleteOutcome::NotFound),
                        Some(m) if *m > 1 => {
                            *m -= 1;
                            prop_assert_eq!(outcome, DeleteOutcome::Decremented(*m));
                        }
                        Some(_) => {
                            model.remove(&v);
                            prop_assert_eq!(outcome, DeleteOutcome::Removed);
                        }
                    }
                }
                OpI::Lookup(i) => {
                    let v = pool[i];
                    prop_assert_eq!(sut.lookup(&Record::from(v)), model.get(&v).copied());
                }
                OpI::ExtractMin => {
                    let outcome = sut.extract_min();
                    match model.iter().next().map(|(&k, &m)| (k, m)) {
                        None => prop_assert_eq!(outcome, ExtractOutcome::Empty),
                        Some((min, m)) if m > 1 => {
                            *model.get_mut(&min).expect("minimum is present") -= 1;
                            prop_assert_eq!(
                                outcome,
                                ExtractOutcome::Decremented {
                                    record: Record::from(min),
                                    multiplicity: m - 1
                                }
                            );
                        }
                        Some((min, _)) => {
                            model.remove(&min);
                            prop_assert_eq!(outcome, ExtractOutcome::Removed(Record::from(min)));
                        }
                    }
                }
                OpI::Enumerate => {
                    let listed: BTreeMap<i64, usize> = sut
                        .iter_counted()
                        .map(|(rec, mult)| (parse(rec), mult))
                        .collect();
                    prop_assert_eq!(&listed, &model, "each distinct record listed once");
                }
            }

            // Post-conditions after each op: both back-reference maps agree,
            // heap order holds, and the distinct count matches the model.
            sut.check_consistency();
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
        }
    }
}

// Property: bulk insertion across several table growths followed by a full
// drain (crossing shrinks on the way down) yields the multiset in sorted
// order and ends empty.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_drain_is_sorted(values in proptest::collection::vec(-10_000i64..=10_000, 0..250)) {
        let mut sut = Quash::new();
        let mut model: BTreeMap<i64, usize> = BTreeMap::new();
        for &v in &values {
            sut.insert(Record::from(v));
            *model.entry(v).or_insert(0) += 1;
        }
        sut.check_consistency();
        prop_assert_eq!(sut.len(), model.len());

        let mut drained = Vec::new();
        loop {
            match sut.extract_min() {
                ExtractOutcome::Empty => break,
                ExtractOutcome::Decremented { record, .. } => drained.push(parse(&record)),
                ExtractOutcome::Removed(record) => drained.push(parse(&record)),
            }
        }
        let expected: Vec<i64> = model
            .iter()
            .flat_map(|(&k, &m)| std::iter::repeat(k).take(m))
            .collect();
        prop_assert_eq!(drained, expected);
        prop_assert!(sut.is_empty());
        sut.check_consistency();
    }
}
