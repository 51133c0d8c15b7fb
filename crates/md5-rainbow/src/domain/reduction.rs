//! Reduction function family
//!
//! `reduce(d, step)` reads the digest as one big-endian unsigned integer, adds
//! `step`, and renders the sum in base A. Short renderings are left-padded with
//! the zero symbol; long ones keep only the L least-significant digits.
//!
//! Adding the chain position makes the same digest reduce differently at
//! different columns, so chains that meet at different positions do not merge.

use crate::domain::alphabet::PlaintextSpace;
use crate::domain::digest::Digest;
use crate::domain::plaintext::Plaintext;
use num_bigint::BigUint;

/// Map a digest back into the plaintext space at chain position `step`
pub fn reduce(digest: &Digest, step: u32, space: &PlaintextSpace) -> Plaintext {
    let alphabet = space.alphabet();
    let value = BigUint::from_bytes_be(digest.as_bytes()) + step;

    // Least-significant digit first; the radix is 2..=94, within to_radix_le's range.
    let digits = value.to_radix_le(alphabet.len() as u32);

    let mut symbols = vec![alphabet.zero(); space.length()];
    for (slot, &digit) in symbols.iter_mut().rev().zip(digits.iter()) {
        *slot = alphabet.symbol(digit as usize);
    }

    Plaintext::from_symbols(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DIGEST_SIZE;
    use crate::domain::alphabet::Alphabet;

    fn digest(hex: &str) -> Digest {
        Digest::from_hex(hex).unwrap()
    }

    #[test]
    fn test_reduce_golden_first_chain() {
        let space = PlaintextSpace::default();
        assert_eq!(
            reduce(&digest("29c3eea3f305d6b823f562ac4be35217"), 0, &space),
            "87inwgn"
        );
        assert_eq!(
            reduce(&digest("12e2feb5a0feccf82a8d4172a3bd51c3"), 1, &space),
            "frrkiis"
        );
        assert_eq!(
            reduce(&digest("437988e45a53c01e54d21e5dc4ae658a"), 2, &space),
            "dues6fg"
        );
    }

    #[test]
    fn test_reduce_is_position_dependent() {
        let space = PlaintextSpace::default();
        let d = digest("29c3eea3f305d6b823f562ac4be35217");
        assert_eq!(reduce(&d, 1, &space), "87inwgo");
        assert_eq!(reduce(&d, 35, &space), "87inwhm");
        assert_ne!(reduce(&d, 0, &space), reduce(&d, 1, &space));
    }

    #[test]
    fn test_reduce_pads_small_values() {
        let space = PlaintextSpace::default();
        let zero = Digest::from_bytes([0; DIGEST_SIZE]);
        assert_eq!(reduce(&zero, 0, &space), "0000000");
        assert_eq!(reduce(&zero, 37, &space), "0000011");
    }

    #[test]
    fn test_reduce_truncates_high_digits() {
        let space = PlaintextSpace::default();
        let max = Digest::from_bytes([0xff; DIGEST_SIZE]);
        assert_eq!(reduce(&max, 0, &space), "hzmsp33");
        // 2^128 - 1 + 1 does not fit 128 bits; no overflow with big integers
        let _ = reduce(&max, u32::MAX, &space);
    }

    #[test]
    fn test_reduce_output_in_space() {
        let space = PlaintextSpace::default();
        let binary = PlaintextSpace::new(Alphabet::new("01").unwrap(), 20).unwrap();
        let mut d = Digest::from_bytes([0x5a; DIGEST_SIZE]);
        for step in 0..200 {
            let p = reduce(&d, step, &space);
            assert_eq!(p.len(), 7);
            assert!(space.contains(&p), "{} escaped the space", p);

            let b = reduce(&d, step, &binary);
            assert_eq!(b.len(), 20);
            assert!(binary.contains(&b));

            let mut bytes = *d.as_bytes();
            bytes[(step as usize) % DIGEST_SIZE] ^= step as u8 | 1;
            d = Digest::from_bytes(bytes);
        }
    }

    #[test]
    fn test_reduce_deterministic() {
        let space = PlaintextSpace::default();
        let d = digest("437988e45a53c01e54d21e5dc4ae658a");
        for step in 0..50 {
            assert_eq!(reduce(&d, step, &space), reduce(&d, step, &space));
        }
    }
}
