//! OpenTable: open-addressed hash table keyed by record checksum.
//!
//! Collision resolution is double hashing over a fixed ascending sequence of
//! prime capacities. Deletion is lazy: removed slots become tombstones that
//! keep probe chains scannable. Slots stepped over during an insertion probe
//! are additionally marked `probed`, and lookups continue past any slot that
//! is tombstoned or probed even if its occupancy has since changed. Each
//! occupied slot carries a forward-reference to its record's heap position.
//!
//! The table never resizes itself; the composite rebuilds a fresh table at a
//! neighboring size class and re-places every live record.

use crate::checksum::adler32;
use crate::record::Record;

/// Ascending prime capacities; each class is roughly double the previous.
pub(crate) const SIZE_CLASSES: [usize; 27] = [
    23,
    127,
    251,
    509,
    1021,
    2039,
    4093,
    8191,
    16381,
    32749,
    65521,
    131071,
    262139,
    524287,
    1048573,
    2097143,
    4194301,
    8388593,
    16777213,
    33554393,
    67108859,
    134217689,
    268435399,
    536870909,
    1073741789,
    2147483647,
    4294967291,
];

/// Secondary-hash prime used at the smallest class; the largest prime below
/// `SIZE_CLASSES[0]`.
const MIN_STEP_PRIME: usize = 19;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Status {
    Empty,
    Occupied,
    Tombstone,
}

#[derive(Clone, Debug)]
pub(crate) struct TableSlot {
    pub(crate) status: Status,
    /// Sticky: set when an insertion probe steps over this slot, never
    /// cleared while this table is live. Later lookups must scan past the
    /// slot regardless of its current occupancy.
    pub(crate) probed: bool,
    pub(crate) key: u32,
    pub(crate) record: Option<Record>,
    pub(crate) heap_index: usize,
}

impl TableSlot {
    fn empty() -> Self {
        TableSlot {
            status: Status::Empty,
            probed: false,
            key: 0,
            record: None,
            heap_index: 0,
        }
    }
}

#[derive(Debug)]
pub(crate) struct OpenTable {
    slots: Vec<TableSlot>,
    class: usize,
    occupied: usize,
}

impl OpenTable {
    pub(crate) fn with_class(class: usize) -> Self {
        assert!(class < SIZE_CLASSES.len(), "size class out of range");
        OpenTable {
            slots: vec![TableSlot::empty(); SIZE_CLASSES[class]],
            class,
            occupied: 0,
        }
    }

    pub(crate) fn class(&self) -> usize {
        self.class
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn occupied(&self) -> usize {
        self.occupied
    }

    pub(crate) fn slots(&self) -> &[TableSlot] {
        &self.slots
    }

    /// Secondary probe step for `key`: `R - (key mod R)` with `R` the size
    /// class below the current one. Always in `1..=R`, and the capacity is
    /// prime, so the probe sequence cycles through every slot.
    fn step(&self, key: u32) -> usize {
        let r = if self.class == 0 {
            MIN_STEP_PRIME
        } else {
            SIZE_CLASSES[self.class - 1]
        };
        r - (key as usize % r)
    }

    /// Locate the occupied slot holding `record`, comparing bytes rather
    /// than checksums. Scanning continues past tombstoned or probed slots
    /// and stops at any other non-match; the probe budget of one full cycle
    /// bounds scans over heavily tombstoned tables.
    pub(crate) fn find(&self, record: &Record) -> Option<usize> {
        let key = adler32(record.bytes());
        let capacity = self.capacity();
        let step = self.step(key);
        let mut index = key as usize % capacity;
        for _ in 0..capacity {
            let slot = &self.slots[index];
            if slot.status == Status::Occupied && slot.record.as_ref() == Some(record) {
                return Some(index);
            }
            if slot.status != Status::Tombstone && !slot.probed {
                return None;
            }
            index = (index + step) % capacity;
        }
        None
    }

    /// Place a record known to be absent, marking every occupied slot the
    /// probe steps over. Claims the first non-occupied slot (tombstones are
    /// reused; their probed flag is preserved). The returned slot has its
    /// heap back-reference unset; the composite links it once the heap
    /// position is known.
    pub(crate) fn place(&mut self, record: Record) -> usize {
        debug_assert!(
            self.occupied < self.capacity(),
            "placement requires a free slot"
        );
        let key = adler32(record.bytes());
        let capacity = self.capacity();
        let step = self.step(key);
        let mut index = key as usize % capacity;
        while self.slots[index].status == Status::Occupied {
            self.slots[index].probed = true;
            index = (index + step) % capacity;
        }
        let slot = &mut self.slots[index];
        slot.status = Status::Occupied;
        slot.key = key;
        slot.record = Some(record);
        slot.heap_index = 0;
        self.occupied += 1;
        index
    }

    /// Lazily delete the slot at `index`. The tombstone keeps probe chains
    /// scannable; the record copy is dropped.
    pub(crate) fn tombstone(&mut self, index: usize) {
        let slot = &mut self.slots[index];
        debug_assert_eq!(slot.status, Status::Occupied);
        slot.status = Status::Tombstone;
        slot.record = None;
        self.occupied -= 1;
    }

    pub(crate) fn heap_index(&self, index: usize) -> usize {
        self.slots[index].heap_index
    }

    /// Point the slot at `index` at a new heap position. Invoked by the
    /// composite's relink callback on every heap move.
    pub(crate) fn set_heap_index(&mut self, index: usize, heap_index: usize) {
        self.slots[index].heap_index = heap_index;
    }

    /// Grow trigger: occupancy above 50% of capacity.
    pub(crate) fn over_loaded(&self) -> bool {
        self.occupied > self.capacity() / 2
    }

    /// Shrink trigger: occupancy below `capacity/10 + hysteresis²`, unless
    /// already at the smallest class.
    pub(crate) fn under_loaded(&self, hysteresis: usize) -> bool {
        self.class > 0 && self.occupied < self.capacity() / 10 + hysteresis * hysteresis
    }
}
