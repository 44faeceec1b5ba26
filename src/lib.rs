//! quash: an open-addressed hash table and a binary min-heap cross-linked
//! into one multiset structure over decimal-numeral records.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep two independently moving structures — a probing hash table
//!   and an array-backed min-heap — permanently agreed on where each record
//!   lives in the other, so membership is O(1) amortized and the minimum is
//!   always at the heap root.
//! - Layers:
//!   - Record + checksum: an immutable byte-sequence value ordered as a
//!     signed decimal numeral, keyed by an Adler-style rolling checksum.
//!   - MinHeap: 1-indexed heap with sentinel bounds, per-slot multiplicity,
//!     and a table back-reference per slot; every move reports through a
//!     relink callback.
//!   - OpenTable: double hashing over prime size classes with lazy deletion
//!     (tombstones) and sticky probed-slot markers; each occupied slot
//!     carries a heap back-reference.
//!   - Quash: public API that owns one table and one heap and mediates
//!     every mutation so the two back-reference maps never diverge; also
//!     owns the resize policy (grow at 50% load, shrink under a
//!     hysteresis-raised floor) as whole-structure rebuilds.
//!   - shell: the line-oriented command loop (`insert`, `delete`, `lookup`,
//!     `deleteMin`, `print`, `exit`) over generic reader/writer.
//!
//! Constraints
//! - Single-threaded, synchronous; no suspension points, no background work.
//! - Values are opaque byte-string records compared as signed decimal
//!   numerals; no generic key/value typing.
//! - Duplicate insertions collapse onto one slot pair with a multiplicity
//!   counter; equal-valued records never coexist as separate heap entries.
//! - All storage is exclusively owned by the `Quash` instance; back-
//!   references are array indices, never addresses.
//!
//! Why this split?
//! - Localize invariants: the heap restores order, the table maintains probe
//!   chains, and only the composite knows both index maps exist.
//! - Every cross-reference update happens inside the same routine as the
//!   move that caused it (the relink callback), so no caller can observe a
//!   half-updated pair.
//! - Rebuilds are a pure function from the old heap to a fresh table+heap
//!   pair, making resize correctness independently testable.
//!
//! Failure semantics
//! - Absent records, empty-heap extraction, and decrement-only paths are
//!   ordinary outcomes (`Option` / outcome enums), never faults.
//! - Allocation failure for either backing array is fatal, matching the
//!   standard library's abort-on-OOM behavior.

pub mod checksum;
mod heap;
pub mod quash;
mod quash_proptest;
pub mod record;
pub mod shell;
mod table;

// Public surface
pub use quash::{DeleteOutcome, ExtractOutcome, Quash};
pub use record::Record;
