//! MinHeap: 1-indexed array-backed binary min-heap over records.
//!
//! Each occupied slot carries a multiplicity counter and a back-reference to
//! the hash-table slot that owns the same record. Every routine that moves a
//! slot takes a `relink` callback and invokes it for each slot it moves, so
//! the table's `heap_index` back-references are updated in the same routine
//! as the move itself and the two structures can never drift apart.
//!
//! Index 0 holds a permanent negative-infinity sentinel that terminates
//! upward comparisons at the root. Unused capacity beyond `count` holds
//! positive-infinity sentinels so sibling comparisons during sift-down never
//! select a vacant slot.

use crate::record::Record;

/// Heap keys extend the record order with explicit bounds. The variant order
/// gives `NegInf < Finite(_) < PosInf` with `Finite` comparing by the
/// signed-numeral record order; no real numeral can collide with a bound.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub(crate) enum Key {
    NegInf,
    Finite(Record),
    PosInf,
}

#[derive(Clone, Debug)]
pub(crate) struct HeapSlot {
    pub(crate) key: Key,
    pub(crate) multiplicity: usize,
    pub(crate) table_index: usize,
}

impl HeapSlot {
    fn vacant() -> Self {
        HeapSlot {
            key: Key::PosInf,
            multiplicity: 0,
            table_index: 0,
        }
    }
}

/// Initial capacity in slots, including the index-0 sentinel.
const INITIAL_CAPACITY: usize = 1024;

#[derive(Debug)]
pub(crate) struct MinHeap {
    slots: Vec<HeapSlot>,
    count: usize,
}

impl MinHeap {
    pub(crate) fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        assert!(capacity >= 2, "heap needs room for the sentinel plus one slot");
        let mut slots = Vec::with_capacity(capacity);
        slots.push(HeapSlot {
            key: Key::NegInf,
            multiplicity: 0,
            table_index: 0,
        });
        slots.resize_with(capacity, HeapSlot::vacant);
        MinHeap { slots, count: 0 }
    }

    /// Number of occupied slots (distinct records).
    pub(crate) fn len(&self) -> usize {
        self.count
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Double the capacity, padding with vacant sentinels. Slot indices are
    /// preserved, so no relinking is needed.
    fn grow(&mut self) {
        let target = self.slots.len() * 2;
        self.slots.resize_with(target, HeapSlot::vacant);
    }

    /// Insert a record with multiplicity 1, linked to `table_index`, and
    /// restore heap order. Returns the record's final heap index. `relink`
    /// is invoked for this slot and every slot displaced on the way up.
    pub(crate) fn insert<F>(&mut self, record: Record, table_index: usize, relink: &mut F) -> usize
    where
        F: FnMut(usize, usize),
    {
        if self.count == self.slots.len() - 1 {
            self.grow();
        }
        let i = self.count + 1;
        self.slots[i] = HeapSlot {
            key: Key::Finite(record),
            multiplicity: 1,
            table_index,
        };
        self.count = i;
        relink(table_index, i);
        self.sift_up(i, relink)
    }

    /// Remove the slot at `i`: swap it with the last occupied slot, vacate
    /// the freed position, and restore order from `i` in whichever direction
    /// the replacement requires. No-op when the heap is empty or `i` is out
    /// of the occupied range.
    pub(crate) fn remove_at<F>(&mut self, i: usize, relink: &mut F)
    where
        F: FnMut(usize, usize),
    {
        if i == 0 || i > self.count {
            return;
        }
        let last = self.count;
        self.slots.swap(i, last);
        self.slots[last] = HeapSlot::vacant();
        self.count -= 1;
        if i <= self.count {
            relink(self.slots[i].table_index, i);
            // The replacement came from a leaf elsewhere in the tree; it may
            // belong above its new parent or below its new children.
            if self.sift_up(i, relink) == i {
                self.sift_down(i, relink);
            }
        }
    }

    /// Move the slot at `i` toward the root while it orders strictly below
    /// its parent. Returns the final index. The index-0 sentinel always
    /// loses, terminating the climb at the root.
    pub(crate) fn sift_up<F>(&mut self, mut i: usize, relink: &mut F) -> usize
    where
        F: FnMut(usize, usize),
    {
        loop {
            let parent = i >> 1;
            if self.slots[i].key >= self.slots[parent].key {
                break;
            }
            self.slots.swap(i, parent);
            relink(self.slots[i].table_index, i);
            relink(self.slots[parent].table_index, parent);
            i = parent;
        }
        i
    }

    /// Move the slot at `i` toward the leaves while the lesser of its
    /// children orders strictly below it. Vacant children hold `PosInf` and
    /// always lose.
    pub(crate) fn sift_down<F>(&mut self, mut i: usize, relink: &mut F)
    where
        F: FnMut(usize, usize),
    {
        loop {
            let left = i << 1;
            if left >= self.slots.len() {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < self.slots.len() && self.slots[right].key < self.slots[left].key {
                child = right;
            }
            if self.slots[i].key <= self.slots[child].key {
                break;
            }
            self.slots.swap(i, child);
            relink(self.slots[i].table_index, i);
            relink(self.slots[child].table_index, child);
            i = child;
        }
    }

    /// Increment the multiplicity at `i`, returning the new value.
    pub(crate) fn bump(&mut self, i: usize) -> usize {
        self.slots[i].multiplicity += 1;
        self.slots[i].multiplicity
    }

    /// Decrement the multiplicity at `i`, returning the new value. The
    /// caller removes the slot outright instead of decrementing to zero.
    pub(crate) fn decrement(&mut self, i: usize) -> usize {
        debug_assert!(self.slots[i].multiplicity > 1);
        self.slots[i].multiplicity -= 1;
        self.slots[i].multiplicity
    }

    pub(crate) fn multiplicity(&self, i: usize) -> usize {
        self.slots[i].multiplicity
    }

    pub(crate) fn set_multiplicity(&mut self, i: usize, multiplicity: usize) {
        debug_assert!(multiplicity >= 1);
        self.slots[i].multiplicity = multiplicity;
    }

    pub(crate) fn table_index(&self, i: usize) -> usize {
        self.slots[i].table_index
    }

    pub(crate) fn record(&self, i: usize) -> &Record {
        match &self.slots[i].key {
            Key::Finite(rec) => rec,
            _ => unreachable!("occupied heap slot holds a finite record"),
        }
    }

    /// Records in heap array order (root-minimal, not globally sorted).
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Record> {
        self.slots[1..=self.count].iter().map(|slot| match &slot.key {
            Key::Finite(rec) => rec,
            _ => unreachable!("occupied heap slot holds a finite record"),
        })
    }

    /// Records with their multiplicities, in heap array order.
    pub(crate) fn iter_counted(&self) -> impl Iterator<Item = (&Record, usize)> {
        self.slots[1..=self.count]
            .iter()
            .map(|slot| match &slot.key {
                Key::Finite(rec) => (rec, slot.multiplicity),
                _ => unreachable!("occupied heap slot holds a finite record"),
            })
    }

    /// Consume the heap, yielding each live record with its multiplicity in
    /// heap-traversal order. Used by the composite's rebuild.
    pub(crate) fn into_entries(self) -> impl Iterator<Item = (Record, usize)> {
        let count = self.count;
        self.slots
            .into_iter()
            .skip(1)
            .take(count)
            .map(|slot| match slot.key {
                Key::Finite(rec) => (rec, slot.multiplicity),
                _ => unreachable!("occupied heap slot holds a finite record"),
            })
    }
}

impl Default for MinHeap {
    fn default() -> Self {
        Self::new()
    }
}
