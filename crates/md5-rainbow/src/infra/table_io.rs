//! Table file I/O operations
//!
//! This module provides functions for reading and writing rainbow table files.
//! See [`table_format`](crate::domain::table_format) for the layout.

use crate::app::table::RainbowTable;
use crate::config::TableConfig;
use crate::constants::FILE_HEADER_SIZE;
use crate::domain::alphabet::{Alphabet, PlaintextSpace};
use crate::domain::chain::ChainEntry;
use crate::domain::digest::HashOracle;
use crate::domain::index::{EndpointIndex, InsertOutcome, capacity_hint};
use crate::domain::table_format::{
    TableFormatError, TableHeader, ValidationOptions, validate_config,
};
use crate::error::Result;
use crate::infra::table_sort::sorted_entries;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// Save a table to file
///
/// # Arguments
/// * `path` - Destination file (created or truncated)
/// * `table` - The table whose parameters and index are written
pub fn save_table<H: HashOracle>(path: impl AsRef<Path>, table: &RainbowTable<H>) -> Result<()> {
    save_index(path, table.config(), table.index())
}

/// Save an endpoint index together with the parameters it was built with
pub fn save_index(
    path: impl AsRef<Path>,
    config: &TableConfig,
    index: &EndpointIndex,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let header = TableHeader::new(config, index);
    writer.write_all(&header.to_bytes())?;
    writer.write_all(config.space.alphabet().as_bytes())?;

    for entry in sorted_entries(index) {
        writer.write_all(entry.start.as_bytes())?;
        writer.write_all(entry.end.as_bytes())?;
    }

    writer.flush()?;
    debug!(path = %path.display(), entries = header.entry_count, "table saved");
    Ok(())
}

/// Load an endpoint index and the parameters stored with it
///
/// # Errors
///
/// Fails on I/O errors, on a malformed or truncated file, and when the stored
/// parameters do not satisfy `options`.
pub fn load_index(
    path: impl AsRef<Path>,
    options: &ValidationOptions,
) -> Result<(TableConfig, EndpointIndex)> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let file_size = file.metadata()?.len();
    let mut reader = BufReader::new(file);

    let mut header_bytes = [0u8; FILE_HEADER_SIZE];
    reader.read_exact(&mut header_bytes)?;
    let header = TableHeader::from_bytes(&header_bytes)?;

    let expected_size = header
        .expected_file_size()
        .ok_or(TableFormatError::EntryCountOverflow(header.entry_count))?;
    if file_size != expected_size {
        return Err(TableFormatError::InvalidFileSize {
            expected: expected_size,
            found: file_size,
        }
        .into());
    }

    let mut symbols = vec![0u8; header.alphabet_len as usize];
    reader.read_exact(&mut symbols)?;
    let alphabet = std::str::from_utf8(&symbols)
        .map_err(|e| TableFormatError::InvalidAlphabet(e.to_string()))
        .and_then(|s| {
            Alphabet::new(s).map_err(|e| TableFormatError::InvalidAlphabet(e.to_string()))
        })?;
    let space = PlaintextSpace::new(alphabet, header.plaintext_length as usize)?;

    let config = TableConfig {
        space,
        chain_length: header.chain_length,
        num_chains: header.num_chains,
        collision_policy: header.collision_policy()?,
    };
    config.validate()?;
    validate_config(&config, options)?;

    let length = config.space.length();
    let mut index =
        EndpointIndex::with_capacity(config.collision_policy, capacity_hint(header.entry_count));
    let mut buf = vec![0u8; 2 * length];

    for i in 0..header.entry_count {
        reader.read_exact(&mut buf)?;
        let invalid = |reason: String| TableFormatError::InvalidEntry { index: i, reason };

        let start = config
            .space
            .from_bytes(&buf[..length])
            .map_err(|e| invalid(e.to_string()))?;
        let end = config
            .space
            .from_bytes(&buf[length..])
            .map_err(|e| invalid(e.to_string()))?;

        if index.insert(ChainEntry::new(start, end)) != InsertOutcome::Inserted {
            return Err(invalid("duplicate endpoint".to_string()).into());
        }
    }

    index.set_collisions(header.collisions);
    debug!(path = %path.display(), entries = index.len(), "table loaded");
    Ok((config, index))
}

/// Load a table file and attach a hash oracle for lookups
///
/// # Arguments
/// * `path` - Table file written by [`save_table`]
/// * `oracle` - Hash function the table was built with
/// * `options` - Parameters the file must match
///
/// # Returns
/// The loaded table, or an error if the file is unreadable, malformed or
/// built with other parameters, or the oracle fails its self-test
pub fn load_table<H: HashOracle>(
    path: impl AsRef<Path>,
    oracle: H,
    options: &ValidationOptions,
) -> Result<RainbowTable<H>> {
    let (config, index) = load_index(path, options)?;
    RainbowTable::from_parts(config, oracle, index)
}
