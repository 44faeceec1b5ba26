//! Adler-style rolling checksum used to key records in the hash table.
//!
//! Deterministic and cheap, not cryptographic. Collisions are expected and
//! resolved by the table's probing, never avoided here.

/// Modulus for both running sums; the largest prime below 2^16.
const MOD_ADLER: u32 = 65521;

/// Compute the 32-bit key for a byte sequence: two running sums, each reduced
/// modulo [`MOD_ADLER`] per byte, packed as `(b << 16) | a`.
pub fn adler32(data: &[u8]) -> u32 {
    let mut a: u32 = 1;
    let mut b: u32 = 0;
    for &byte in data {
        a = (a + u32::from(byte)) % MOD_ADLER;
        b = (b + a) % MOD_ADLER;
    }
    (b << 16) | a
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: the empty sequence checksums to the initial state packed
    /// together, `(0 << 16) | 1`.
    #[test]
    fn empty_input() {
        assert_eq!(adler32(b""), 1);
    }

    /// Invariant: single-byte inputs produce `a = 1 + byte` in both halves.
    #[test]
    fn single_byte() {
        // '1' is 0x31 = 49, so a = 50 and b = 50.
        assert_eq!(adler32(b"1"), (50 << 16) | 50);
        // '5' is 0x35 = 53, so a = 54 and b = 54.
        assert_eq!(adler32(b"5"), (54 << 16) | 54);
    }

    /// Invariant: the checksum is order-sensitive, unlike a plain byte sum.
    #[test]
    fn order_sensitive() {
        assert_ne!(adler32(b"12"), adler32(b"21"));
    }

    /// Invariant: both sums stay reduced modulo 65521 on long inputs, so the
    /// low half never reaches the modulus.
    #[test]
    fn long_input_stays_reduced() {
        let data = vec![0xffu8; 10_000];
        let sum = adler32(&data);
        assert!(sum & 0xffff < MOD_ADLER);
        assert!(sum >> 16 < MOD_ADLER);
    }
}
