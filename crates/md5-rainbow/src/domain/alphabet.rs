//! Alphabet and plaintext space definitions
//!
//! A plaintext space is every string of a fixed length over an ordered alphabet.
//! The alphabet order defines the digit values used by the sequencer and by the
//! reduction function (first symbol = digit 0).

use crate::constants::{CHARSET, PASSWORD_LENGTH};
use crate::domain::plaintext::Plaintext;
use crate::error::{RainbowError, Result};

const NO_SYMBOL: u8 = u8::MAX;

/// Ordered set of printable ASCII symbols
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Box<[u8]>,
    /// symbol byte -> digit value, `NO_SYMBOL` when absent
    digits: [u8; 256],
}

impl Alphabet {
    /// Create an alphabet from its symbols in digit order
    ///
    /// # Errors
    ///
    /// Fails when fewer than 2 symbols are given, a symbol is not printable
    /// ASCII, or a symbol appears twice.
    pub fn new(symbols: &str) -> Result<Self> {
        let bytes = symbols.as_bytes();
        if bytes.len() < 2 {
            return Err(RainbowError::InvalidConfig(format!(
                "alphabet needs at least 2 symbols, got {}",
                bytes.len()
            )));
        }

        let mut digits = [NO_SYMBOL; 256];
        for (value, &symbol) in bytes.iter().enumerate() {
            if !symbol.is_ascii_graphic() {
                return Err(RainbowError::InvalidConfig(format!(
                    "alphabet symbol at position {} is not printable ASCII",
                    value
                )));
            }
            if digits[symbol as usize] != NO_SYMBOL {
                return Err(RainbowError::InvalidConfig(format!(
                    "alphabet symbol '{}' appears more than once",
                    symbol as char
                )));
            }
            digits[symbol as usize] = value as u8;
        }

        Ok(Self {
            symbols: bytes.into(),
            digits,
        })
    }

    /// Number of symbols (the numeral base A)
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol for a digit value. `digit` must be below `len()`.
    #[inline]
    pub fn symbol(&self, digit: usize) -> u8 {
        self.symbols[digit]
    }

    /// Digit value of a symbol, `None` if the symbol is not in the alphabet
    #[inline]
    pub fn digit(&self, symbol: u8) -> Option<usize> {
        match self.digits[symbol as usize] {
            NO_SYMBOL => None,
            d => Some(d as usize),
        }
    }

    /// Digit-0 symbol
    pub fn zero(&self) -> u8 {
        self.symbols[0]
    }

    /// Symbols in digit order
    pub fn as_bytes(&self) -> &[u8] {
        &self.symbols
    }

    pub fn as_str(&self) -> &str {
        // Every symbol was checked to be ASCII on construction.
        std::str::from_utf8(&self.symbols).unwrap_or_default()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        let mut digits = [NO_SYMBOL; 256];
        for (value, &symbol) in CHARSET.as_bytes().iter().enumerate() {
            digits[symbol as usize] = value as u8;
        }
        Self {
            symbols: CHARSET.as_bytes().into(),
            digits,
        }
    }
}

impl std::fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Alphabet(\"{}\")", self.as_str())
    }
}

/// All plaintexts of a fixed length over an alphabet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaintextSpace {
    alphabet: Alphabet,
    length: usize,
    size: u64,
}

impl PlaintextSpace {
    /// # Errors
    ///
    /// Fails for a zero length, or when A^L does not fit in a `u64`.
    pub fn new(alphabet: Alphabet, length: usize) -> Result<Self> {
        if length == 0 {
            return Err(RainbowError::InvalidConfig(
                "plaintext length must be at least 1".to_string(),
            ));
        }

        let size = u32::try_from(length)
            .ok()
            .and_then(|exp| (alphabet.len() as u64).checked_pow(exp))
            .ok_or_else(|| {
                RainbowError::InvalidConfig(format!(
                    "plaintext space {}^{} does not fit in 64 bits",
                    alphabet.len(),
                    length
                ))
            })?;

        Ok(Self {
            alphabet,
            length,
            size,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Plaintext length L
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of distinct plaintexts (A^L)
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The all-zero plaintext (first element of the sequencer order)
    pub fn zero(&self) -> Plaintext {
        Plaintext::from_symbols(vec![self.alphabet.zero(); self.length])
    }

    /// Parse a plaintext, checking length and alphabet membership
    pub fn parse(&self, text: &str) -> Result<Plaintext> {
        self.from_bytes(text.as_bytes())
    }

    /// Build a plaintext from raw symbols, checking length and alphabet membership
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<Plaintext> {
        if bytes.len() != self.length {
            return Err(RainbowError::InvalidPlaintext(format!(
                "expected {} symbols, got {}",
                self.length,
                bytes.len()
            )));
        }
        if let Some(pos) = bytes.iter().position(|&b| self.alphabet.digit(b).is_none()) {
            return Err(RainbowError::InvalidPlaintext(format!(
                "symbol {:?} at position {} is not in the alphabet",
                bytes[pos] as char, pos
            )));
        }
        Ok(Plaintext::from_symbols(bytes.to_vec()))
    }

    /// Whether a plaintext belongs to this space
    pub fn contains(&self, plaintext: &Plaintext) -> bool {
        plaintext.len() == self.length
            && plaintext
                .as_bytes()
                .iter()
                .all(|&b| self.alphabet.digit(b).is_some())
    }
}

impl Default for PlaintextSpace {
    fn default() -> Self {
        let alphabet = Alphabet::default();
        let size = (alphabet.len() as u64).pow(PASSWORD_LENGTH as u32);
        Self {
            alphabet,
            length: PASSWORD_LENGTH,
            size,
        }
    }
}
