//! Search workflow implementation
//!
//! For each candidate column, from the last one down to 0, the target digest is
//! assumed to sit at that column. Walking the hypothetical chain to its end
//! gives an endpoint; if the index knows it, the stored chain is recomputed
//! from its start to confirm the match. An unconfirmed hit is a false alarm and
//! the scan continues.
//!
//! Worst case is `chain_length` columns × O(`chain_length`) hashes each.

use crate::app::table::RainbowTable;
use crate::domain::chain::{chain_end_from, verify_chain};
use crate::domain::digest::{Digest, HashOracle};
use crate::domain::plaintext::Plaintext;
use crate::error::Result;
use rayon::prelude::*;
use tracing::debug;

/// Outcome of testing one column
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnOutcome {
    /// Endpoint not in the index
    Miss,
    /// Endpoint indexed but the recomputed chain never produced the target
    FalseAlarm,
    /// Plaintext recovered
    Found(Plaintext),
}

/// Lookup result with diagnostics
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LookupReport {
    /// Recovered plaintext
    pub plaintext: Option<Plaintext>,
    /// Column whose endpoint led to the plaintext
    pub column: Option<u32>,
    /// Columns tested before the scan stopped
    pub columns_searched: u32,
    /// Indexed endpoints reached (including the successful one)
    pub endpoint_hits: u32,
    /// Endpoint hits whose chain did not contain the target
    pub false_alarms: u32,
}

/// Search for the plaintext of a hex digest
///
/// Malformed digests are rejected before any hashing happens.
///
/// # Arguments
/// * `table` - The rainbow table to search
/// * `target_hex` - 32 hex characters (either case)
///
/// # Returns
/// The recovered plaintext, `Ok(None)` when the table does not cover the
/// digest, or `InvalidDigest` for a malformed `target_hex`
pub fn lookup<H: HashOracle>(
    table: &RainbowTable<H>,
    target_hex: &str,
) -> Result<Option<Plaintext>> {
    let target = Digest::from_hex(target_hex)?;
    Ok(lookup_digest(table, &target))
}

/// Search for the plaintext of a digest, scanning columns from last to first
///
/// # Arguments
/// * `table` - The rainbow table to search
/// * `target` - The digest to invert
///
/// # Returns
/// The first confirmed plaintext, or `None` if every column misses or false-alarms
pub fn lookup_digest<H: HashOracle>(table: &RainbowTable<H>, target: &Digest) -> Option<Plaintext> {
    (0..table.chain_length())
        .rev()
        .find_map(|column| match search_column(table, target, column) {
            ColumnOutcome::Found(plaintext) => Some(plaintext),
            _ => None,
        })
}

/// Search with rayon parallel processing across columns
///
/// Returns the same plaintext as [`lookup_digest`]: the match from the highest
/// column wins.
pub fn lookup_parallel<H: HashOracle>(
    table: &RainbowTable<H>,
    target: &Digest,
) -> Option<Plaintext> {
    (0..table.chain_length())
        .into_par_iter()
        .rev()
        .find_map_first(|column| match search_column(table, target, column) {
            ColumnOutcome::Found(plaintext) => Some(plaintext),
            _ => None,
        })
}

/// Sequential search that also counts endpoint hits and false alarms
pub fn lookup_with_report<H: HashOracle>(table: &RainbowTable<H>, target: &Digest) -> LookupReport {
    let mut report = LookupReport::default();

    for column in (0..table.chain_length()).rev() {
        report.columns_searched += 1;
        match search_column(table, target, column) {
            ColumnOutcome::Miss => {}
            ColumnOutcome::FalseAlarm => {
                report.endpoint_hits += 1;
                report.false_alarms += 1;
            }
            ColumnOutcome::Found(plaintext) => {
                report.endpoint_hits += 1;
                report.plaintext = Some(plaintext);
                report.column = Some(column);
                break;
            }
        }
    }

    report
}

/// Test a single column position
pub fn search_column<H: HashOracle>(
    table: &RainbowTable<H>,
    target: &Digest,
    column: u32,
) -> ColumnOutcome {
    let space = table.space();
    let chain_length = table.chain_length();
    let oracle = table.oracle();

    // Step 1: Walk from the assumed column to the chain end
    let end = chain_end_from(target, column, space, chain_length, oracle);

    // Step 2: O(1) endpoint lookup
    let Some(start) = table.index().lookup_endpoint(&end) else {
        return ColumnOutcome::Miss;
    };

    // Step 3: Recompute the candidate chain from its start
    match verify_chain(start, target, space, chain_length, oracle) {
        Some(plaintext) => {
            debug!(column, %start, %plaintext, "digest recovered");
            ColumnOutcome::Found(plaintext)
        }
        None => {
            debug!(column, %start, %end, "false alarm");
            ColumnOutcome::FalseAlarm
        }
    }
}
