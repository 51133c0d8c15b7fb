//! Generated rainbow table
//!
//! Bundles the endpoint index with the parameters and oracle it was built
//! with, so lookups always run against matching settings.

use crate::app::generator::GenerationStats;
use crate::app::searcher::{
    LookupReport, lookup, lookup_digest, lookup_parallel, lookup_with_report,
};
use crate::config::TableConfig;
use crate::domain::alphabet::PlaintextSpace;
use crate::domain::digest::{Digest, HashOracle, Md5Oracle};
use crate::domain::index::EndpointIndex;
use crate::domain::plaintext::Plaintext;
use crate::error::Result;

/// An endpoint index plus everything needed to query it
///
/// Read-only once built; share it by reference across lookup threads.
#[derive(Clone, Debug)]
pub struct RainbowTable<H = Md5Oracle> {
    config: TableConfig,
    oracle: H,
    index: EndpointIndex,
    stats: GenerationStats,
}

impl<H: HashOracle> RainbowTable<H> {
    pub(crate) fn new(
        config: TableConfig,
        oracle: H,
        index: EndpointIndex,
        stats: GenerationStats,
    ) -> Self {
        Self {
            config,
            oracle,
            index,
            stats,
        }
    }

    /// Reassemble a table from a stored index (e.g. one loaded from disk)
    ///
    /// The index's collision policy wins over the one in `config`.
    pub fn from_parts(mut config: TableConfig, oracle: H, index: EndpointIndex) -> Result<Self> {
        config.validate()?;
        oracle.self_test()?;
        config.collision_policy = index.policy();
        let stats = GenerationStats::for_index(&config, &index);
        Ok(Self::new(config, oracle, index, stats))
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn space(&self) -> &PlaintextSpace {
        &self.config.space
    }

    pub fn chain_length(&self) -> u32 {
        self.config.chain_length
    }

    pub fn oracle(&self) -> &H {
        &self.oracle
    }

    pub fn index(&self) -> &EndpointIndex {
        &self.index
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Recover the plaintext of a hex digest; `Ok(None)` when not covered
    pub fn lookup(&self, target_hex: &str) -> Result<Option<Plaintext>> {
        lookup(self, target_hex)
    }

    pub fn lookup_digest(&self, target: &Digest) -> Option<Plaintext> {
        lookup_digest(self, target)
    }

    pub fn lookup_parallel(&self, target: &Digest) -> Option<Plaintext> {
        lookup_parallel(self, target)
    }

    pub fn lookup_with_report(&self, target: &Digest) -> LookupReport {
        lookup_with_report(self, target)
    }

    pub fn into_index(self) -> EndpointIndex {
        self.index
    }
}
