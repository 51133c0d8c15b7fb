//! Crate error type

use crate::domain::table_format::TableFormatError;
use thiserror::Error;

/// Errors surfaced by table generation, lookup and persistence
///
/// A lookup that finds nothing is not an error; it returns `Ok(None)`.
#[derive(Error, Debug)]
pub enum RainbowError {
    /// Target digest is not a well-formed lowercase/uppercase hex string of the right length
    #[error("Invalid digest: {0}")]
    InvalidDigest(String),

    /// Plaintext has the wrong length or contains a symbol outside the alphabet
    #[error("Invalid plaintext: {0}")]
    InvalidPlaintext(String),

    /// Table parameters are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Hash oracle failed its start-up self-test
    #[error("Hash oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error(transparent)]
    TableFormat(#[from] TableFormatError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RainbowError>;
