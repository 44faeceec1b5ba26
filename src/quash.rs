//! Quash: the composite structure owning one hash table and one min-heap.
//!
//! Every mutation goes through this layer so the two back-reference maps —
//! table slot -> heap index and heap slot -> table index — are updated in
//! lockstep. Heap routines receive a relink callback bound to the table, so
//! any swap restores both directions before the routine returns.
//!
//! Resizing either structure invalidates all indices: table resizes rebuild
//! a fresh table+heap pair at the neighboring size class and re-place every
//! live record; heap growth preserves indices by construction.

use core::mem;

use crate::checksum::adler32;
use crate::heap::MinHeap;
use crate::record::Record;
use crate::table::{OpenTable, Status, SIZE_CLASSES};

/// Outcome of [`Quash::delete`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The record was not a member; no state changed.
    NotFound,
    /// The record had duplicates; its multiplicity dropped to the carried
    /// value and it remains a member.
    Decremented(usize),
    /// The last instance was removed from both structures.
    Removed,
}

/// Outcome of [`Quash::extract_min`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// Nothing to remove.
    Empty,
    /// The minimum had duplicates; one instance was consumed and the record
    /// remains a member at the carried multiplicity.
    Decremented { record: Record, multiplicity: usize },
    /// The minimum's last instance was removed from both structures.
    Removed(Record),
}

/// An open-addressed hash table and a binary min-heap over the same records,
/// cross-linked by array indices. Membership queries are O(1) amortized via
/// the table; the minimum is always at the heap root. Duplicate insertions
/// collapse onto one slot pair with a multiplicity counter.
pub struct Quash {
    table: OpenTable,
    heap: MinHeap,
    /// Raises the shrink threshold after each shrink so the table does not
    /// oscillate between neighboring classes. Never reset.
    hysteresis: usize,
}

/// Rebuild at `class`: consume the old heap and produce a fresh table+heap
/// pair holding the same live records and multiplicities, re-placed in
/// heap-traversal order. All prior indices are invalid afterward.
fn rebuilt(heap: MinHeap, class: usize) -> (OpenTable, MinHeap) {
    let mut table = OpenTable::with_class(class);
    let mut rebuilt_heap = MinHeap::with_capacity(heap.capacity());
    for (record, multiplicity) in heap.into_entries() {
        let table_index = table.place(record.clone());
        let heap_index =
            rebuilt_heap.insert(record, table_index, &mut |t, h| table.set_heap_index(t, h));
        rebuilt_heap.set_multiplicity(heap_index, multiplicity);
    }
    (table, rebuilt_heap)
}

impl Quash {
    /// Create an empty quash at the smallest table class.
    pub fn new() -> Self {
        Quash {
            table: OpenTable::with_class(0),
            heap: MinHeap::new(),
            hysteresis: 0,
        }
    }

    /// Number of distinct live records (multiplicity not counted).
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Insert one instance of `record`, returning its running multiplicity.
    /// A duplicate only bumps the existing slot pair's counter; a fresh
    /// record may first grow the table one size class.
    pub fn insert(&mut self, record: Record) -> usize {
        if let Some(table_index) = self.table.find(&record) {
            let heap_index = self.table.heap_index(table_index);
            let multiplicity = self.heap.bump(heap_index);
            self.debug_validate();
            return multiplicity;
        }
        if self.table.over_loaded() {
            let next = self.table.class() + 1;
            if next < SIZE_CLASSES.len() {
                self.rebuild(next);
            }
        }
        let table_index = self.table.place(record.clone());
        let table = &mut self.table;
        self.heap
            .insert(record, table_index, &mut |t, h| table.set_heap_index(t, h));
        self.debug_validate();
        1
    }

    /// Delete one instance of `record`. Only the last instance removes the
    /// record from both structures (and may shrink the table); earlier
    /// instances just decrement the multiplicity.
    pub fn delete(&mut self, record: &Record) -> DeleteOutcome {
        let Some(table_index) = self.table.find(record) else {
            return DeleteOutcome::NotFound;
        };
        let heap_index = self.table.heap_index(table_index);
        if self.heap.multiplicity(heap_index) > 1 {
            let multiplicity = self.heap.decrement(heap_index);
            self.debug_validate();
            return DeleteOutcome::Decremented(multiplicity);
        }
        self.table.tombstone(table_index);
        let table = &mut self.table;
        self.heap
            .remove_at(heap_index, &mut |t, h| table.set_heap_index(t, h));
        self.maybe_shrink();
        self.debug_validate();
        DeleteOutcome::Removed
    }

    /// Report membership with the current multiplicity.
    pub fn lookup(&self, record: &Record) -> Option<usize> {
        let table_index = self.table.find(record)?;
        Some(self.heap.multiplicity(self.table.heap_index(table_index)))
    }

    /// Remove one instance of the minimum record. The root's multiplicity is
    /// consumed first; its last instance leaves both structures and may
    /// shrink the table.
    pub fn extract_min(&mut self) -> ExtractOutcome {
        if self.heap.is_empty() {
            return ExtractOutcome::Empty;
        }
        let record = self.heap.record(1).clone();
        if self.heap.multiplicity(1) > 1 {
            let multiplicity = self.heap.decrement(1);
            self.debug_validate();
            return ExtractOutcome::Decremented {
                record,
                multiplicity,
            };
        }
        let table_index = self.heap.table_index(1);
        self.table.tombstone(table_index);
        let table = &mut self.table;
        self.heap
            .remove_at(1, &mut |t, h| table.set_heap_index(t, h));
        self.maybe_shrink();
        self.debug_validate();
        ExtractOutcome::Removed(record)
    }

    /// Records in heap array order (root-minimal, not globally sorted), one
    /// item per distinct record regardless of multiplicity.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.heap.iter()
    }

    /// Like [`Quash::iter`], with each record's multiplicity.
    pub fn iter_counted(&self) -> impl Iterator<Item = (&Record, usize)> {
        self.heap.iter_counted()
    }

    fn rebuild(&mut self, class: usize) {
        let heap = mem::take(&mut self.heap);
        let (table, heap) = rebuilt(heap, class);
        self.table = table;
        self.heap = heap;
    }

    fn maybe_shrink(&mut self) {
        if !self.table.under_loaded(self.hysteresis) {
            return;
        }
        let target = self.table.class() - 1;
        // A large hysteresis can push the shrink floor past the smaller
        // table's grow threshold; survivors that would not fit under it stay
        // where they are.
        if self.table.occupied() > SIZE_CLASSES[target] / 2 {
            return;
        }
        self.hysteresis += 1;
        self.rebuild(target);
    }

    #[cfg(test)]
    pub(crate) fn table_class(&self) -> usize {
        self.table.class()
    }

    #[cfg(test)]
    pub(crate) fn hysteresis(&self) -> usize {
        self.hysteresis
    }

    /// Assert the structure's invariants: bidirectional index consistency,
    /// agreement of the duplicated record copies and stored checksums,
    /// min-heap order, live multiplicities, and occupancy parity. Panics on
    /// violation. Mutating operations run this automatically in debug
    /// builds.
    pub fn check_consistency(&self) {
        assert_eq!(
            self.table.occupied(),
            self.heap.len(),
            "table occupancy must match heap population"
        );
        let mut occupied_seen = 0;
        for (table_index, slot) in self.table.slots().iter().enumerate() {
            if slot.status != Status::Occupied {
                continue;
            }
            occupied_seen += 1;
            let record = slot
                .record
                .as_ref()
                .expect("occupied table slot holds a record");
            assert_eq!(
                slot.key,
                adler32(record.bytes()),
                "stored key must be the record's checksum"
            );
            let heap_index = slot.heap_index;
            assert!(
                (1..=self.heap.len()).contains(&heap_index),
                "heap back-reference must be an occupied heap index"
            );
            assert_eq!(
                self.heap.table_index(heap_index),
                table_index,
                "table -> heap -> table must round-trip"
            );
            assert_eq!(
                self.heap.record(heap_index),
                record,
                "both record copies must agree"
            );
        }
        assert_eq!(occupied_seen, self.heap.len());
        for heap_index in 1..=self.heap.len() {
            let table_index = self.heap.table_index(heap_index);
            let slot = &self.table.slots()[table_index];
            assert_eq!(
                slot.status,
                Status::Occupied,
                "heap back-reference must point at an occupied table slot"
            );
            assert_eq!(
                slot.heap_index, heap_index,
                "heap -> table -> heap must round-trip"
            );
            assert!(
                self.heap.multiplicity(heap_index) >= 1,
                "live slots carry positive multiplicity"
            );
            if heap_index > 1 {
                assert!(
                    self.heap.record(heap_index >> 1) <= self.heap.record(heap_index),
                    "min-heap order must hold at index {}",
                    heap_index
                );
            }
        }
    }

    #[inline]
    fn debug_validate(&self) {
        #[cfg(debug_assertions)]
        self.check_consistency();
    }
}

impl Default for Quash {
    fn default() -> Self {
        Self::new()
    }
}
