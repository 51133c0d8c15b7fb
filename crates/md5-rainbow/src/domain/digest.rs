//! Digest type and hash oracle
//!
//! The oracle is a stateless, deterministic function from bytes to a 128-bit
//! digest. Each call computes its digest from scratch, so one oracle can be
//! shared freely across worker threads.

use crate::constants::{DIGEST_HEX_LEN, DIGEST_SIZE};
use crate::error::{RainbowError, Result};
use std::fmt;
use std::str::FromStr;

/// 128-bit digest, rendered as 32 lowercase hex characters
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    pub const fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    /// Big-endian digest bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Parse a hex digest (case-insensitive)
    ///
    /// Rejects wrong lengths and non-hex characters before anything else runs.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let bytes = hex.as_bytes();
        if bytes.len() != DIGEST_HEX_LEN {
            return Err(RainbowError::InvalidDigest(format!(
                "expected {} hex characters, got {}",
                DIGEST_HEX_LEN,
                bytes.len()
            )));
        }

        let mut out = [0u8; DIGEST_SIZE];
        for (i, pair) in bytes.chunks_exact(2).enumerate() {
            let hi = hex_value(pair[0]).ok_or_else(|| bad_char(hex, i * 2))?;
            let lo = hex_value(pair[1]).ok_or_else(|| bad_char(hex, i * 2 + 1))?;
            out[i] = (hi << 4) | lo;
        }
        Ok(Self(out))
    }

    /// Lowercase hex rendering
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn bad_char(hex: &str, pos: usize) -> RainbowError {
    RainbowError::InvalidDigest(format!(
        "non-hex character {:?} at position {}",
        hex.as_bytes()[pos] as char,
        pos
    ))
}

impl FromStr for Digest {
    type Err = RainbowError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self)
    }
}

/// One-way hash function the table inverts
pub trait HashOracle: Send + Sync {
    /// Hash `input`. Must be deterministic and keep no state between calls.
    fn hash(&self, input: &[u8]) -> Digest;

    /// Check that the oracle works before any table is built on top of it
    fn self_test(&self) -> Result<()> {
        Ok(())
    }
}

impl<H: HashOracle + ?Sized> HashOracle for &H {
    fn hash(&self, input: &[u8]) -> Digest {
        (**self).hash(input)
    }

    fn self_test(&self) -> Result<()> {
        (**self).self_test()
    }
}

/// MD5 oracle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Md5Oracle;

/// RFC 1321 test vector: MD5("")
const MD5_EMPTY: Digest = Digest::from_bytes([
    0xd4, 0x1d, 0x8c, 0xd9, 0x8f, 0x00, 0xb2, 0x04, 0xe9, 0x80, 0x09, 0x98, 0xec, 0xf8, 0x42, 0x7e,
]);

impl HashOracle for Md5Oracle {
    #[inline]
    fn hash(&self, input: &[u8]) -> Digest {
        Digest(md5::compute(input).0)
    }

    fn self_test(&self) -> Result<()> {
        let got = self.hash(b"");
        if got != MD5_EMPTY {
            return Err(RainbowError::OracleUnavailable(format!(
                "MD5(\"\") returned {}, expected {}",
                got, MD5_EMPTY
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_golden() {
        let digest = Md5Oracle.hash(b"0000000");
        assert_eq!(digest.to_hex(), "29c3eea3f305d6b823f562ac4be35217");
    }

    #[test]
    fn test_md5_self_test_passes() {
        assert!(Md5Oracle.self_test().is_ok());
    }

    #[test]
    fn test_md5_deterministic() {
        let a = Md5Oracle.hash(b"frrkiis");
        let b = Md5Oracle.hash(b"frrkiis");
        assert_eq!(a, b);
    }

    #[test]
    fn test_calls_do_not_contaminate_each_other() {
        let first = Md5Oracle.hash(b"0000000");
        let _ = Md5Oracle.hash(b"something else entirely");
        assert_eq!(Md5Oracle.hash(b"0000000"), first);
    }

    #[test]
    fn test_hex_parse_and_render() {
        let hex = "29c3eea3f305d6b823f562ac4be35217";
        let digest: Digest = hex.parse().unwrap();
        assert_eq!(digest.to_hex(), hex);
        assert_eq!(digest.as_bytes()[0], 0x29);
        assert_eq!(digest.as_bytes()[15], 0x17);
    }

    #[test]
    fn test_hex_parse_accepts_uppercase() {
        let digest = Digest::from_hex("29C3EEA3F305D6B823F562AC4BE35217").unwrap();
        assert_eq!(digest.to_hex(), "29c3eea3f305d6b823f562ac4be35217");
    }

    #[test]
    fn test_hex_parse_wrong_length() {
        assert!(matches!(
            Digest::from_hex("29c3"),
            Err(RainbowError::InvalidDigest(_))
        ));
        assert!(matches!(
            Digest::from_hex("29c3eea3f305d6b823f562ac4be352170"),
            Err(RainbowError::InvalidDigest(_))
        ));
        assert!(Digest::from_hex("").is_err());
    }

    #[test]
    fn test_hex_parse_non_hex() {
        let err = Digest::from_hex("29c3eea3f305d6b823f562ac4be3521g").unwrap_err();
        assert!(err.to_string().contains("position 31"), "{}", err);
    }

    #[test]
    fn test_hex_parse_multibyte_input() {
        // 32 bytes but not 32 hex characters
        let s = "é9c3eea3f305d6b823f562ac4be3521";
        assert_eq!(s.len(), 32);
        assert!(Digest::from_hex(s).is_err());
    }

    struct BrokenOracle;

    impl HashOracle for BrokenOracle {
        fn hash(&self, _input: &[u8]) -> Digest {
            Digest::from_bytes([0; DIGEST_SIZE])
        }

        fn self_test(&self) -> Result<()> {
            Err(RainbowError::OracleUnavailable("backend missing".into()))
        }
    }

    #[test]
    fn test_reference_forwards_self_test() {
        let oracle = &BrokenOracle;
        assert!(matches!(
            HashOracle::self_test(&oracle),
            Err(RainbowError::OracleUnavailable(_))
        ));
    }
}
