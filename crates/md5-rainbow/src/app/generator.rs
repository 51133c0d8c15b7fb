//! Table generation workflow
//!
//! This module provides functions for generating rainbow tables.
//!
//! Start plaintexts are the sequencer's elements `0..num_chains`. Once the
//! sequence wraps, starts repeat and are skipped. Chains are always inserted in
//! start order, so sequential and parallel generation build the same index.

use crate::app::table::RainbowTable;
use crate::config::TableConfig;
use crate::domain::chain::{ChainEntry, compute_chain};
use crate::domain::digest::HashOracle;
use crate::domain::index::{EndpointIndex, capacity_hint};
use crate::domain::sequencer::{PasswordSequencer, plaintext_at};
use crate::error::Result;
use rayon::prelude::*;
use tracing::{debug, info};

/// Progress is reported every this many chains
const PROGRESS_INTERVAL: u64 = 1000;

/// Generation diagnostics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Chains requested (`num_chains`)
    pub attempted: u64,
    /// Requested starts skipped because the sequencer wrapped around
    pub skipped_starts: u64,
    /// Chains stored in the index
    pub stored: u64,
    /// Chains whose endpoint was already indexed
    pub collisions: u64,
}

impl GenerationStats {
    pub(crate) fn for_index(config: &TableConfig, index: &EndpointIndex) -> Self {
        Self {
            attempted: config.num_chains,
            skipped_starts: config.num_chains - config.distinct_starts(),
            stored: index.len() as u64,
            collisions: index.collisions(),
        }
    }
}

/// Generate a rainbow table
///
/// # Arguments
/// * `config` - Space, chain length, chain count and collision policy
/// * `oracle` - Hash function; its self-test runs before any chain is built
///
/// # Returns
/// The table with its generation stats, `InvalidConfig` for unusable
/// parameters, or `OracleUnavailable` when the self-test fails
pub fn generate_table<H: HashOracle>(config: TableConfig, oracle: H) -> Result<RainbowTable<H>> {
    generate_table_with_progress(config, oracle, |_, _| {})
}

/// Generate table with progress callback
pub fn generate_table_with_progress<H, F>(
    config: TableConfig,
    oracle: H,
    mut on_progress: F,
) -> Result<RainbowTable<H>>
where
    H: HashOracle,
    F: FnMut(u64, u64), // (current, total)
{
    prepare(&config, &oracle)?;

    let total = config.distinct_starts();
    let mut index = EndpointIndex::with_capacity(config.collision_policy, capacity_hint(total));

    for (i, start) in (0..total).zip(PasswordSequencer::new(&config.space)) {
        let entry = compute_chain(&start, &config.space, config.chain_length, &oracle);
        insert_entry(&mut index, entry);

        if i % PROGRESS_INTERVAL == 0 {
            on_progress(i, total);
        }
    }

    on_progress(total, total);
    Ok(finish(config, oracle, index))
}

/// Generate a rainbow table using rayon
///
/// Chains are computed in parallel and merged in start order, which keeps the
/// result identical to [`generate_table`].
pub fn generate_table_parallel<H: HashOracle>(
    config: TableConfig,
    oracle: H,
) -> Result<RainbowTable<H>> {
    prepare(&config, &oracle)?;

    let total = config.distinct_starts();
    let entries = generate_entries_range_parallel(&config, &oracle, 0, total);

    let mut index = EndpointIndex::with_capacity(config.collision_policy, entries.len());
    for entry in entries {
        insert_entry(&mut index, entry);
    }

    Ok(finish(config, oracle, index))
}

/// Compute the chains for sequence numbers `[start, end)` (no index)
///
/// # Arguments
/// * `config` - Table parameters (space and chain length are used)
/// * `oracle` - Hash function
/// * `start` - First sequence number (taken modulo the space size)
/// * `end` - One past the last sequence number
///
/// # Returns
/// One entry per sequence number, in sequence order
pub fn generate_entries_range<H: HashOracle + ?Sized>(
    config: &TableConfig,
    oracle: &H,
    start: u64,
    end: u64,
) -> Vec<ChainEntry> {
    if start >= end {
        return Vec::new();
    }

    let first = plaintext_at(&config.space, start);
    PasswordSequencer::starting_at(&config.space, first)
        .take(usize::try_from(end - start).unwrap_or(usize::MAX))
        .map(|p| compute_chain(&p, &config.space, config.chain_length, oracle))
        .collect()
}

/// Compute the chains for sequence numbers `[start, end)` in parallel
///
/// # Arguments
/// * `config` - Table parameters (space and chain length are used)
/// * `oracle` - Hash function, shared across rayon workers
/// * `start` - First sequence number (taken modulo the space size)
/// * `end` - One past the last sequence number
///
/// # Returns
/// The same entries as [`generate_entries_range`], in sequence order
pub fn generate_entries_range_parallel<H: HashOracle + ?Sized>(
    config: &TableConfig,
    oracle: &H,
    start: u64,
    end: u64,
) -> Vec<ChainEntry> {
    if start >= end {
        return Vec::new();
    }

    (start..end)
        .into_par_iter()
        .map(|i| {
            let p = plaintext_at(&config.space, i);
            compute_chain(&p, &config.space, config.chain_length, oracle)
        })
        .collect()
}

fn prepare<H: HashOracle>(config: &TableConfig, oracle: &H) -> Result<()> {
    config.validate()?;
    oracle.self_test()
}

fn insert_entry(index: &mut EndpointIndex, entry: ChainEntry) {
    if let Some(existing) = index.lookup_endpoint(&entry.end) {
        debug!(
            start = %entry.start,
            end = %entry.end,
            existing = %existing,
            policy = ?index.policy(),
            "endpoint collision"
        );
    }
    index.insert(entry);
}

fn finish<H: HashOracle>(config: TableConfig, oracle: H, index: EndpointIndex) -> RainbowTable<H> {
    let stats = GenerationStats::for_index(&config, &index);
    info!(
        attempted = stats.attempted,
        stored = stats.stored,
        collisions = stats.collisions,
        skipped_starts = stats.skipped_starts,
        chain_length = config.chain_length,
        "rainbow table generated"
    );
    RainbowTable::new(config, oracle, index, stats)
}
