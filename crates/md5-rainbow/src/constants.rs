//! Rainbow table related constants
//!
//! These are the canonical parameters. All of them can be overridden through
//! [`TableConfig`](crate::config::TableConfig).

// =============================================================================
// Plaintext space
// =============================================================================

/// Ordered password alphabet (A = 36): digits first, then lowercase letters
pub const CHARSET: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

/// Password length (L = 7)
pub const PASSWORD_LENGTH: usize = 7;

// =============================================================================
// Rainbow table parameters
// =============================================================================

/// Chain length (t = 2,000)
pub const CHAIN_LENGTH: u32 = 2000;

/// Number of chains generated per table (m = 2,000)
pub const NUM_CHAINS: u64 = 2000;

// =============================================================================
// Hash oracle
// =============================================================================

/// Digest size in bytes (MD5 = 128 bits)
pub const DIGEST_SIZE: usize = 16;

/// Length of the lowercase hex rendering of a digest
pub const DIGEST_HEX_LEN: usize = DIGEST_SIZE * 2;

// =============================================================================
// File format
// =============================================================================

/// Magic bytes at the start of a table file
pub const TABLE_MAGIC: [u8; 8] = *b"MD5RBOW\0";

/// Current table file format version
pub const FILE_FORMAT_VERSION: u16 = 1;

/// Fixed header size in bytes (the alphabet follows the header)
pub const FILE_HEADER_SIZE: usize = 64;
