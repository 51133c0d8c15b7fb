//! Rainbow table validation tests
//!
//! End-to-end checks of the generate → save → load → lookup pipeline.
//!
//! ## Test Categories
//!
//! - **Lightweight tests**: Run with `cargo test`, share one mini table in a TempDir
//! - **Heavyweight tests**: Run with `cargo test -- --ignored`, build a table with
//!   the canonical parameters (2000 chains × 2000 steps)
//!
//! ## Design
//!
//! Lightweight tests share a single mini table generated once via `OnceLock`.

use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Instant;

use md5_rainbow::app::generator::{generate_table, generate_table_parallel};
use md5_rainbow::domain::chain::{ChainEntry, enumerate_chain};
use md5_rainbow::domain::table_format::ValidationOptions;
use md5_rainbow::infra::table_io::{load_table, save_table};
use md5_rainbow::{HashOracle, Md5Oracle, RainbowTable, TableConfig};
use rand::Rng;
use tempfile::TempDir;

// =============================================================================
// Constants
// =============================================================================

/// Mini table parameters for lightweight tests
const MINI_NUM_CHAINS: u64 = 500;
const MINI_CHAIN_LENGTH: u32 = 200;

/// Number of random (chain, column) pairs looked up per test
const SAMPLE_COUNT: usize = 40;

// =============================================================================
// Shared Test Table (generated once, used by all lightweight tests)
// =============================================================================

struct SharedTestTable {
    /// TempDir is kept alive to prevent file deletion
    _temp_dir: TempDir,
    table: RainbowTable,
    path: PathBuf,
}

static SHARED_TABLE: OnceLock<SharedTestTable> = OnceLock::new();

fn mini_config() -> TableConfig {
    TableConfig::new(MINI_NUM_CHAINS, MINI_CHAIN_LENGTH)
}

/// Get or create the shared test table (thread-safe, runs only once)
fn get_shared_table() -> &'static SharedTestTable {
    SHARED_TABLE.get_or_init(|| {
        eprintln!(
            "[SharedTestTable] Generating mini table ({} chains × {})...",
            MINI_NUM_CHAINS, MINI_CHAIN_LENGTH
        );
        let start = Instant::now();

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let table = generate_table_parallel(mini_config(), Md5Oracle).expect("Failed to generate");

        let path = temp_dir.path().join("mini.bin");
        save_table(&path, &table).expect("Failed to save table");

        eprintln!(
            "[SharedTestTable] Generated and saved in {:.2}s",
            start.elapsed().as_secs_f64()
        );

        SharedTestTable {
            _temp_dir: temp_dir,
            table,
            path,
        }
    })
}

// =============================================================================
// Helper functions
// =============================================================================

/// Pick random nodes of retained chains and check each one is recovered
fn assert_sampled_round_trip(table: &RainbowTable, samples: usize) {
    let entries: Vec<ChainEntry> = table.index().entries().collect();
    let mut rng = rand::thread_rng();

    for _ in 0..samples {
        let entry = &entries[rng.gen_range(0..entries.len())];
        let links = enumerate_chain(&entry.start, table.space(), table.chain_length(), &Md5Oracle);
        let column = rng.gen_range(0..links.len());
        let link = &links[column];

        let found = table
            .lookup(&link.digest.to_hex())
            .expect("Digest should be well-formed");
        assert_eq!(
            found.as_ref(),
            Some(&link.plaintext),
            "chain {} column {} not recovered",
            entry.start,
            column
        );
    }
}

// =============================================================================
// Lightweight Tests (E2E with shared table)
// =============================================================================

#[test]
fn test_mini_table_pipeline() {
    let shared = get_shared_table();
    assert!(shared.path.exists(), "Table file should exist");

    let loaded = load_table(
        &shared.path,
        Md5Oracle,
        &ValidationOptions::for_config(&mini_config()),
    )
    .expect("Failed to load table");

    assert_eq!(loaded.index(), shared.table.index());
    assert_eq!(loaded.stats(), shared.table.stats());
    assert_eq!(loaded.stats().attempted, MINI_NUM_CHAINS);
    assert_eq!(
        loaded.stats().stored + loaded.stats().collisions,
        MINI_NUM_CHAINS
    );
}

#[test]
fn test_loaded_table_round_trip() {
    let shared = get_shared_table();
    let loaded = load_table(&shared.path, Md5Oracle, &ValidationOptions::default())
        .expect("Failed to load table");

    assert_sampled_round_trip(&loaded, SAMPLE_COUNT);
}

#[test]
fn test_start_nodes_are_recovered() {
    let shared = get_shared_table();

    for entry in shared.table.index().entries().take(50) {
        let digest = Md5Oracle.hash(entry.start.as_bytes());
        assert_eq!(shared.table.lookup_digest(&digest), Some(entry.start));
    }
}

#[test]
fn test_parallel_lookup_agrees_with_sequential() {
    let shared = get_shared_table();
    let table = &shared.table;
    let mut rng = rand::thread_rng();

    for _ in 0..10 {
        let entries: Vec<ChainEntry> = table.index().entries().collect();
        let entry = &entries[rng.gen_range(0..entries.len())];
        let links = enumerate_chain(&entry.start, table.space(), table.chain_length(), &Md5Oracle);
        let digest = links[rng.gen_range(0..links.len())].digest;

        assert_eq!(table.lookup_parallel(&digest), table.lookup_digest(&digest));
    }
}

#[test]
fn test_unknown_digest_reports_every_column() {
    let shared = get_shared_table();
    let target = Md5Oracle.hash(b"definitely not seven chars");

    let report = shared.table.lookup_with_report(&target);
    assert_eq!(report.plaintext, None);
    assert_eq!(report.column, None);
    assert_eq!(report.columns_searched, MINI_CHAIN_LENGTH);
    assert_eq!(report.endpoint_hits, report.false_alarms);
}

#[test]
fn test_generation_is_reproducible() {
    let config = TableConfig::new(150, 60);
    let first = generate_table(config.clone(), Md5Oracle).unwrap();
    let second = generate_table(config.clone(), Md5Oracle).unwrap();
    let parallel = generate_table_parallel(config, Md5Oracle).unwrap();

    assert_eq!(first.index(), second.index());
    assert_eq!(first.index(), parallel.index());
    assert_eq!(first.index().collisions(), parallel.index().collisions());
}

// =============================================================================
// Heavyweight Tests (canonical parameters)
// =============================================================================

#[test]
#[ignore]
fn test_canonical_table_round_trip() {
    let start = Instant::now();
    let table = generate_table_parallel(TableConfig::default(), Md5Oracle).unwrap();
    let stats = table.stats();
    eprintln!(
        "[Canonical] stored {} of {} chains ({} collisions) in {:.2}s",
        stats.stored,
        stats.attempted,
        stats.collisions,
        start.elapsed().as_secs_f64()
    );

    assert_eq!(
        table.lookup("29c3eea3f305d6b823f562ac4be35217").unwrap(),
        Some(table.space().zero())
    );
    assert_sampled_round_trip(&table, 5);
}
