//! Rainbow table file format definitions
//!
//! A table file is a 64-byte header, the alphabet symbols, then the
//! (start, end) pairs, L bytes each, sorted by end plaintext.

use crate::config::TableConfig;
use crate::constants::{FILE_FORMAT_VERSION, FILE_HEADER_SIZE, TABLE_MAGIC};
use crate::domain::index::{CollisionPolicy, EndpointIndex};
use byteorder::{ByteOrder, LittleEndian};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Table file header metadata
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableHeader {
    /// File format version
    pub version: u16,
    /// Plaintext length L
    pub plaintext_length: u16,
    /// Alphabet size A (symbols follow the header)
    pub alphabet_len: u8,
    /// Chain length (steps per chain)
    pub chain_length: u32,
    /// Number of chains attempted at generation
    pub num_chains: u64,
    /// Number of stored entries
    pub entry_count: u64,
    /// Endpoint collisions seen at generation
    pub collisions: u64,
    /// Collision policy code
    pub policy: u8,
    /// Creation timestamp (Unix epoch seconds)
    pub created_at: u64,
}

impl TableHeader {
    /// Create a header describing `index` built with `config`
    pub fn new(config: &TableConfig, index: &EndpointIndex) -> Self {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            version: FILE_FORMAT_VERSION,
            plaintext_length: config.space.length() as u16,
            alphabet_len: config.space.alphabet().len() as u8,
            chain_length: config.chain_length,
            num_chains: config.num_chains,
            entry_count: index.len() as u64,
            collisions: index.collisions(),
            policy: index.policy().to_code(),
            created_at,
        }
    }

    /// Decoded collision policy
    pub fn collision_policy(&self) -> Result<CollisionPolicy, TableFormatError> {
        CollisionPolicy::from_code(self.policy).ok_or(TableFormatError::UnknownPolicy(self.policy))
    }

    /// Serialize header to bytes (64 bytes)
    pub fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE] {
        let mut buf = [0u8; FILE_HEADER_SIZE];

        buf[0..8].copy_from_slice(&TABLE_MAGIC);
        LittleEndian::write_u16(&mut buf[8..10], self.version);
        LittleEndian::write_u16(&mut buf[10..12], self.plaintext_length);
        LittleEndian::write_u32(&mut buf[12..16], self.chain_length);
        LittleEndian::write_u64(&mut buf[16..24], self.num_chains);
        LittleEndian::write_u64(&mut buf[24..32], self.entry_count);
        LittleEndian::write_u64(&mut buf[32..40], self.collisions);
        buf[40] = self.policy;
        buf[41] = self.alphabet_len;
        // 42..48 reserved
        LittleEndian::write_u64(&mut buf[48..56], self.created_at);
        // 56..64 reserved

        buf
    }

    /// Deserialize header from bytes
    pub fn from_bytes(buf: &[u8; FILE_HEADER_SIZE]) -> Result<Self, TableFormatError> {
        if buf[0..8] != TABLE_MAGIC {
            return Err(TableFormatError::InvalidMagic);
        }

        let version = LittleEndian::read_u16(&buf[8..10]);
        if version != FILE_FORMAT_VERSION {
            return Err(TableFormatError::UnsupportedVersion(version));
        }

        Ok(Self {
            version,
            plaintext_length: LittleEndian::read_u16(&buf[10..12]),
            chain_length: LittleEndian::read_u32(&buf[12..16]),
            num_chains: LittleEndian::read_u64(&buf[16..24]),
            entry_count: LittleEndian::read_u64(&buf[24..32]),
            collisions: LittleEndian::read_u64(&buf[32..40]),
            policy: buf[40],
            alphabet_len: buf[41],
            created_at: LittleEndian::read_u64(&buf[48..56]),
        })
    }

    /// Total file size implied by the header
    ///
    /// `None` when the entry count is too large for any file to hold.
    pub fn expected_file_size(&self) -> Option<u64> {
        let entry_size = 2 * self.plaintext_length as u64;
        self.entry_count
            .checked_mul(entry_size)?
            .checked_add(FILE_HEADER_SIZE as u64 + self.alphabet_len as u64)
    }
}

/// Validation options for table loading
#[derive(Clone, Debug, Default)]
pub struct ValidationOptions {
    /// Parameters the table must have been built with (None = accept any)
    pub expected: Option<TableConfig>,
}

impl ValidationOptions {
    /// Require the table to match `config` (space, chain length, policy)
    pub fn for_config(config: &TableConfig) -> Self {
        Self {
            expected: Some(config.clone()),
        }
    }
}

/// Table format errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableFormatError {
    #[error("Invalid file format: not a rainbow table file")]
    InvalidMagic,

    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(u16),

    #[error("Unknown collision policy code: {0}")]
    UnknownPolicy(u8),

    #[error("Invalid alphabet in table file: {0}")]
    InvalidAlphabet(String),

    #[error("Invalid entry #{index}: {reason}")]
    InvalidEntry { index: u64, reason: String },

    #[error("Plaintext length mismatch: expected {expected}, found {found}")]
    PlaintextLengthMismatch { expected: u16, found: u16 },

    #[error("Alphabet mismatch: expected {expected:?}, found {found:?}")]
    AlphabetMismatch { expected: String, found: String },

    #[error("Chain length mismatch: expected {expected}, found {found}")]
    ChainLengthMismatch { expected: u32, found: u32 },

    #[error("Collision policy mismatch: expected {expected:?}, found {found:?}")]
    PolicyMismatch {
        expected: CollisionPolicy,
        found: CollisionPolicy,
    },

    #[error("Entry count {0} overflows the file size")]
    EntryCountOverflow(u64),

    #[error("Invalid file size: expected {expected} bytes, found {found} bytes")]
    InvalidFileSize { expected: u64, found: u64 },
}

/// Validate a loaded table's parameters against options
pub fn validate_config(
    found: &TableConfig,
    options: &ValidationOptions,
) -> Result<(), TableFormatError> {
    let Some(expected) = &options.expected else {
        return Ok(());
    };

    if found.space.length() != expected.space.length() {
        return Err(TableFormatError::PlaintextLengthMismatch {
            expected: expected.space.length() as u16,
            found: found.space.length() as u16,
        });
    }
    if found.space.alphabet() != expected.space.alphabet() {
        return Err(TableFormatError::AlphabetMismatch {
            expected: expected.space.alphabet().as_str().to_string(),
            found: found.space.alphabet().as_str().to_string(),
        });
    }
    if found.chain_length != expected.chain_length {
        return Err(TableFormatError::ChainLengthMismatch {
            expected: expected.chain_length,
            found: found.chain_length,
        });
    }
    if found.collision_policy != expected.collision_policy {
        return Err(TableFormatError::PolicyMismatch {
            expected: expected.collision_policy,
            found: found.collision_policy,
        });
    }

    Ok(())
}
