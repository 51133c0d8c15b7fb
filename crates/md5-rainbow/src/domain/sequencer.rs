//! Password sequencer
//!
//! Enumerates a plaintext space in a fixed total order by treating each
//! plaintext as a fixed-width base-A numeral (leftmost symbol most significant).
//! The order is periodic: the successor of the maximum plaintext is the
//! all-zero plaintext.

use crate::domain::alphabet::PlaintextSpace;
use crate::domain::plaintext::Plaintext;

/// Successor of `plaintext` in sequencer order
///
/// Increments the rightmost symbol, carrying left on overflow. The maximum
/// plaintext wraps around to all zeros.
pub fn next_plaintext(space: &PlaintextSpace, plaintext: &Plaintext) -> Plaintext {
    let alphabet = space.alphabet();
    let last = alphabet.len() - 1;
    let mut symbols = plaintext.as_bytes().to_vec();

    for symbol in symbols.iter_mut().rev() {
        // Symbols outside the alphabet cannot come out of a PlaintextSpace; treat as zero.
        let digit = alphabet.digit(*symbol).unwrap_or(0);
        if digit == last {
            *symbol = alphabet.zero();
        } else {
            *symbol = alphabet.symbol(digit + 1);
            break;
        }
    }

    Plaintext::from_symbols(symbols)
}

/// Plaintext at sequence number `index` (taken modulo the space size)
///
/// Equivalent to applying [`next_plaintext`] `index` times to the zero plaintext.
pub fn plaintext_at(space: &PlaintextSpace, index: u64) -> Plaintext {
    let alphabet = space.alphabet();
    let base = alphabet.len() as u64;
    let mut value = index % space.size();
    let mut symbols = vec![alphabet.zero(); space.length()];

    for symbol in symbols.iter_mut().rev() {
        *symbol = alphabet.symbol((value % base) as usize);
        value /= base;
    }

    Plaintext::from_symbols(symbols)
}

/// Sequence number of a plaintext (inverse of [`plaintext_at`])
pub fn sequence_number(space: &PlaintextSpace, plaintext: &Plaintext) -> u64 {
    let alphabet = space.alphabet();
    let base = alphabet.len() as u64;
    plaintext.as_bytes().iter().fold(0u64, |acc, &symbol| {
        acc * base + alphabet.digit(symbol).unwrap_or(0) as u64
    })
}

/// Endless iterator over the space in sequencer order
#[derive(Clone, Debug)]
pub struct PasswordSequencer<'a> {
    space: &'a PlaintextSpace,
    current: Plaintext,
}

impl<'a> PasswordSequencer<'a> {
    /// Start at the all-zero plaintext
    pub fn new(space: &'a PlaintextSpace) -> Self {
        Self::starting_at(space, space.zero())
    }

    pub fn starting_at(space: &'a PlaintextSpace, start: Plaintext) -> Self {
        Self {
            space,
            current: start,
        }
    }
}

impl Iterator for PasswordSequencer<'_> {
    type Item = Plaintext;

    fn next(&mut self) -> Option<Plaintext> {
        let following = next_plaintext(self.space, &self.current);
        Some(std::mem::replace(&mut self.current, following))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::alphabet::Alphabet;

    fn next_str(space: &PlaintextSpace, s: &str) -> String {
        next_plaintext(space, &space.parse(s).unwrap()).to_string()
    }

    #[test]
    fn test_next_simple_increment() {
        let space = PlaintextSpace::default();
        assert_eq!(next_str(&space, "0000000"), "0000001");
        assert_eq!(next_str(&space, "0000009"), "000000a");
    }

    #[test]
    fn test_next_carry() {
        let space = PlaintextSpace::default();
        assert_eq!(next_str(&space, "000000z"), "0000010");
        assert_eq!(next_str(&space, "00zzzzz"), "0100000");
    }

    #[test]
    fn test_next_wraps_at_maximum() {
        let space = PlaintextSpace::default();
        assert_eq!(next_str(&space, "zzzzzzz"), "0000000");
    }

    #[test]
    fn test_full_cycle_small_space() {
        let space = PlaintextSpace::new(Alphabet::new("abc").unwrap(), 4).unwrap();
        let zero = space.zero();
        let mut seen = std::collections::HashSet::new();
        let mut p = zero.clone();
        for _ in 0..space.size() {
            assert!(seen.insert(p.clone()), "duplicate {} within one cycle", p);
            p = next_plaintext(&space, &p);
        }
        assert_eq!(p, zero);
        assert_eq!(seen.len() as u64, space.size());
    }

    #[test]
    fn test_plaintext_at_matches_iteration() {
        let space = PlaintextSpace::new(Alphabet::new("012").unwrap(), 3).unwrap();
        for (i, p) in PasswordSequencer::new(&space).take(40).enumerate() {
            assert_eq!(plaintext_at(&space, i as u64), p, "index {}", i);
        }
    }

    #[test]
    fn test_plaintext_at_default_space() {
        let space = PlaintextSpace::default();
        assert_eq!(plaintext_at(&space, 0), "0000000");
        assert_eq!(plaintext_at(&space, 36), "0000010");
        assert_eq!(plaintext_at(&space, space.size() - 1), "zzzzzzz");
        assert_eq!(plaintext_at(&space, space.size()), "0000000");
    }

    #[test]
    fn test_sequence_number_roundtrip() {
        let space = PlaintextSpace::default();
        for index in [0u64, 1, 35, 36, 1_000_000, space.size() - 1] {
            let p = plaintext_at(&space, index);
            assert_eq!(sequence_number(&space, &p), index);
        }
    }

    #[test]
    fn test_sequencer_starts_at_zero() {
        let space = PlaintextSpace::default();
        let first: Vec<String> = PasswordSequencer::new(&space)
            .take(3)
            .map(|p| p.to_string())
            .collect();
        assert_eq!(first, ["0000000", "0000001", "0000002"]);
    }
}
