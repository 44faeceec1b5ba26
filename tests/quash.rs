// Quash integration suite (public API).
//
// Each test documents what behavior is being verified and which invariants
// are assumed or asserted. The core invariants exercised:
// - Membership: lookup reports presence with the current multiplicity.
// - Multiplicity: duplicate inserts collapse; deletes peel instances off
//   one at a time and only the last one removes the record.
// - Order: extract_min always consumes an instance of the global minimum
//   under the signed-numeral order.
// - Resizing: growth and shrinkage are invisible to membership queries.
// - Consistency: check_consistency passes at every checkpoint.

use quash::{DeleteOutcome, ExtractOutcome, Quash, Record};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

// Test: the end-to-end scenario from the command protocol.
// Verifies: lookup multiplicity after duplicate insert, minimum selection
// across signs, decrement-before-remove extraction.
#[test]
fn insert_five_three_five_scenario() {
    let mut quash = Quash::new();
    assert_eq!(quash.insert(Record::from("5")), 1);
    assert_eq!(quash.insert(Record::from("3")), 1);
    assert_eq!(quash.insert(Record::from("5")), 2);
    assert_eq!(quash.lookup(&Record::from("5")), Some(2));

    assert_eq!(quash.extract_min(), ExtractOutcome::Removed(Record::from("3")));
    assert_eq!(
        quash.extract_min(),
        ExtractOutcome::Decremented {
            record: Record::from("5"),
            multiplicity: 1
        }
    );
    assert_eq!(quash.lookup(&Record::from("5")), Some(1));
    assert_eq!(quash.extract_min(), ExtractOutcome::Removed(Record::from("5")));
    assert_eq!(quash.extract_min(), ExtractOutcome::Empty);
    quash.check_consistency();
}

// Test: absence reporting on an empty structure.
// Verifies: lookup and delete of a missing record change nothing.
#[test]
fn empty_quash_reports_absence() {
    let mut quash = Quash::new();
    assert_eq!(quash.lookup(&Record::from("42")), None);
    assert_eq!(quash.delete(&Record::from("42")), DeleteOutcome::NotFound);
    assert_eq!(quash.extract_min(), ExtractOutcome::Empty);
    assert!(quash.is_empty());
    quash.check_consistency();
}

// Test: negative numerals order below positives and by reversed magnitude
// among themselves.
// Verifies: extraction order over mixed signs matches integer order.
#[test]
fn mixed_sign_extraction_order() {
    let mut quash = Quash::new();
    for v in ["5", "-3", "10", "-10", "0", "-5", "9"] {
        quash.insert(Record::from(v));
    }
    let mut order = Vec::new();
    while let ExtractOutcome::Removed(rec) = quash.extract_min() {
        order.push(rec.to_string());
    }
    assert_eq!(order, vec!["-10", "-5", "-3", "0", "5", "9", "10"]);
}

// Test: growth across several size classes keeps every record findable with
// its multiplicity unchanged.
// Assumes: 600 distinct numerals force multiple grow rebuilds.
#[test]
fn bulk_growth_preserves_membership() {
    let mut quash = Quash::new();
    for v in 0..600i64 {
        assert_eq!(quash.insert(Record::from(v)), 1);
        assert_eq!(quash.insert(Record::from(v)), 2);
    }
    assert_eq!(quash.len(), 600);
    for v in 0..600i64 {
        assert_eq!(quash.lookup(&Record::from(v)), Some(2), "record {}", v);
    }
    quash.check_consistency();
}

// Test: randomized stress against a BTreeMap multiset model.
// Verifies: outcome parity for every operation and model equality of the
// final drain; consistency is checked at periodic checkpoints (debug builds
// also self-check after every mutation).
#[test]
fn randomized_stress_against_model() {
    let mut rng = StdRng::seed_from_u64(0x9a5);
    let mut quash = Quash::new();
    let mut model: BTreeMap<i64, usize> = BTreeMap::new();

    for step in 0..4_000 {
        let v = rng.gen_range(-400i64..400);
        match rng.gen_range(0..10) {
            0..=4 => {
                let count = quash.insert(Record::from(v));
                let entry = model.entry(v).or_insert(0);
                *entry += 1;
                assert_eq!(count, *entry);
            }
            5..=7 => {
                let outcome = quash.delete(&Record::from(v));
                match model.get_mut(&v) {
                    None => assert_eq!(outcome, DeleteOutcome::NotFound),
                    Some(m) if *m > 1 => {
                        *m -= 1;
                        assert_eq!(outcome, DeleteOutcome::Decremented(*m));
                    }
                    Some(_) => {
                        model.remove(&v);
                        assert_eq!(outcome, DeleteOutcome::Removed);
                    }
                }
            }
            8 => {
                assert_eq!(quash.lookup(&Record::from(v)), model.get(&v).copied());
            }
            _ => {
                let outcome = quash.extract_min();
                match model.iter().next().map(|(&k, &m)| (k, m)) {
                    None => assert_eq!(outcome, ExtractOutcome::Empty),
                    Some((min, m)) if m > 1 => {
                        *model.get_mut(&min).unwrap() -= 1;
                        assert_eq!(
                            outcome,
                            ExtractOutcome::Decremented {
                                record: Record::from(min),
                                multiplicity: m - 1
                            }
                        );
                    }
                    Some((min, _)) => {
                        model.remove(&min);
                        assert_eq!(outcome, ExtractOutcome::Removed(Record::from(min)));
                    }
                }
            }
        }
        if step % 256 == 0 {
            quash.check_consistency();
            assert_eq!(quash.len(), model.len());
        }
    }

    quash.check_consistency();
    let drained: Vec<i64> = std::iter::from_fn(|| match quash.extract_min() {
        ExtractOutcome::Empty => None,
        ExtractOutcome::Decremented { record, .. } => Some(record.to_string().parse().unwrap()),
        ExtractOutcome::Removed(record) => Some(record.to_string().parse().unwrap()),
    })
    .collect();
    let expected: Vec<i64> = model
        .iter()
        .flat_map(|(&k, &m)| std::iter::repeat(k).take(m))
        .collect();
    assert_eq!(drained, expected);
    assert!(quash.is_empty());
}

// Test: enumeration after heavy churn lists each surviving record once.
// Verifies: iteration count equals distinct membership and includes no
// deleted record.
#[test]
fn enumeration_after_churn() {
    let mut quash = Quash::new();
    for v in 0..50i64 {
        quash.insert(Record::from(v));
    }
    for v in (0..50i64).step_by(2) {
        assert_eq!(quash.delete(&Record::from(v)), DeleteOutcome::Removed);
    }
    let mut survivors: Vec<i64> = quash
        .iter()
        .map(|rec| rec.to_string().parse().unwrap())
        .collect();
    survivors.sort_unstable();
    let expected: Vec<i64> = (0..50i64).filter(|v| v % 2 == 1).collect();
    assert_eq!(survivors, expected);
    quash.check_consistency();
}
