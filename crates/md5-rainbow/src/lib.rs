//! md5-rainbow - Rainbow table for inverting MD5 over fixed-length passwords
//!
//! This crate provides functionality to:
//! - Generate rainbow tables over a bounded plaintext space (default: 7 symbols of `0-9a-z`)
//! - Recover a plaintext from its MD5 digest by walking candidate chain positions
//! - Save and load generated tables

pub mod app;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod infra;

// Re-export commonly used types
pub use app::generator::{GenerationStats, generate_table, generate_table_parallel};
pub use app::searcher::{LookupReport, lookup};
pub use app::table::RainbowTable;
pub use config::TableConfig;
pub use domain::alphabet::{Alphabet, PlaintextSpace};
pub use domain::chain::ChainEntry;
pub use domain::digest::{Digest, HashOracle, Md5Oracle};
pub use domain::index::{CollisionPolicy, EndpointIndex};
pub use domain::plaintext::Plaintext;
pub use domain::reduction::reduce;
pub use domain::sequencer::next_plaintext;
pub use domain::table_format::{TableFormatError, ValidationOptions};
pub use error::{RainbowError, Result};
