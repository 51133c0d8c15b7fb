//! First chain walkthrough
//!
//! Prints the first few hash → reduce steps of the chain starting at
//! `0000000`, then builds a small table and cracks one digest taken from the
//! middle of that chain.
//!
//! ## Usage
//!
//! ```powershell
//! cargo run --example first_chain -p md5-rainbow --release
//! # with lookup diagnostics
//! $env:RUST_LOG="md5_rainbow=debug"; cargo run --example first_chain -p md5-rainbow --release
//! ```
//!
//! ## Sample output
//!
//! ```text
//! [First Chain]
//! step 0: 0000000 -> 29c3eea3f305d6b823f562ac4be35217 -> 87inwgn
//! step 1: 87inwgn -> 12e2feb5a0feccf82a8d4172a3bd51c3 -> frrkiis
//! ...
//! ```

use std::time::Instant;

use md5_rainbow::domain::chain::enumerate_chain;
use md5_rainbow::{Md5Oracle, TableConfig, generate_table_parallel, reduce};
use tracing_subscriber::EnvFilter;

const SHOWN_STEPS: usize = 5;
const NUM_CHAINS: u64 = 200;
const CHAIN_LENGTH: u32 = 100;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = TableConfig::new(NUM_CHAINS, CHAIN_LENGTH);
    let space = config.space.clone();
    let links = enumerate_chain(&space.zero(), &space, CHAIN_LENGTH, &Md5Oracle);

    println!("[First Chain]");
    for (step, link) in links.iter().take(SHOWN_STEPS).enumerate() {
        let reduced = reduce(&link.digest, step as u32, &space);
        println!(
            "step {}: {} -> {} -> {}",
            step, link.plaintext, link.digest, reduced
        );
    }

    let start = Instant::now();
    let table = match generate_table_parallel(config, Md5Oracle) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let stats = table.stats();
    println!();
    println!("[Table]");
    println!(
        "Chains: {} stored / {} attempted ({} collisions) in {:.2}s",
        stats.stored,
        stats.attempted,
        stats.collisions,
        start.elapsed().as_secs_f64()
    );

    let target = &links[links.len() / 2];
    let start = Instant::now();
    let report = table.lookup_with_report(&target.digest);
    println!();
    println!("[Lookup]");
    println!("Target: {}", target.digest);
    match report.plaintext {
        Some(plaintext) => println!("Found: {} (column {:?})", plaintext, report.column),
        None => println!("Not found"),
    }
    println!(
        "Columns searched: {}, false alarms: {}, time: {:.2}ms",
        report.columns_searched,
        report.false_alarms,
        start.elapsed().as_secs_f64() * 1000.0
    );
}
