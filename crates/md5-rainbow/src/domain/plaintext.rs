//! Plaintext value type

use std::fmt;

/// A fixed-length password over a [`PlaintextSpace`](super::alphabet::PlaintextSpace) alphabet
///
/// Holds the ASCII symbols themselves, so the bytes are exactly what gets hashed.
/// Only `PlaintextSpace` constructs values, which keeps every symbol inside the alphabet.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Plaintext(Box<[u8]>);

impl Plaintext {
    pub(crate) fn from_symbols(symbols: Vec<u8>) -> Self {
        Self(symbols.into_boxed_slice())
    }

    /// Raw ASCII bytes (hash oracle input)
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Plaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &symbol in self.0.iter() {
            fmt::Write::write_char(f, symbol as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Plaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plaintext(\"{}\")", self)
    }
}

impl PartialEq<str> for Plaintext {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Plaintext {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}
