//! Record: an immutable byte-sequence value ordered as a signed decimal numeral.
//!
//! Equality is exact byte-wise comparison. Ordering is NOT byte-lexicographic:
//! records are read as signed decimal numerals, so `"10" > "9"` and
//! `"-10" < "-9"`. The order assumes canonical numerals (no leading zeros,
//! no `-0`); the command shell only ever produces canonical input.

use core::cmp::Ordering;
use core::fmt;

/// An immutable byte sequence. Copied on insertion into either half of the
/// quash, so the table and the heap each own an independent copy.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Record {
    bytes: Box<[u8]>,
}

impl Record {
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
        Record {
            bytes: bytes.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<&str> for Record {
    fn from(s: &str) -> Self {
        Record::new(s.as_bytes().to_vec())
    }
}

impl From<i64> for Record {
    fn from(n: i64) -> Self {
        Record::new(n.to_string().into_bytes())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.bytes))
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record({})", self)
    }
}

/// Magnitude order for unsigned numerals: a shorter numeral is smaller, and
/// equal-length numerals compare byte-wise (digits sort correctly as bytes).
fn magnitude_cmp(a: &[u8], b: &[u8]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        let a = self.bytes();
        let b = other.bytes();
        match (a.first() == Some(&b'-'), b.first() == Some(&b'-')) {
            // For negatives the magnitude order is reversed: a lexicographically
            // larger digit string denotes a smaller value.
            (true, true) => magnitude_cmp(&a[1..], &b[1..]).reverse(),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => magnitude_cmp(a, b),
        }
    }
}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
