//! Table configuration

use crate::constants::{CHAIN_LENGTH, NUM_CHAINS};
use crate::domain::alphabet::{Alphabet, PlaintextSpace};
use crate::domain::index::CollisionPolicy;
use crate::error::{RainbowError, Result};

/// Parameters of one rainbow table
///
/// Generation and lookup must use the same space, chain length and reduction;
/// a table file records them so a mismatched load is rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableConfig {
    /// Alphabet and plaintext length
    pub space: PlaintextSpace,
    /// Hash → reduce steps per chain
    pub chain_length: u32,
    /// Number of chains to attempt (start plaintexts taken from the sequencer)
    pub num_chains: u64,
    /// Endpoint collision handling
    pub collision_policy: CollisionPolicy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            space: PlaintextSpace::default(),
            chain_length: CHAIN_LENGTH,
            num_chains: NUM_CHAINS,
            collision_policy: CollisionPolicy::default(),
        }
    }
}

impl TableConfig {
    /// Default parameters with the given table size
    pub fn new(num_chains: u64, chain_length: u32) -> Self {
        Self {
            num_chains,
            chain_length,
            ..Self::default()
        }
    }

    /// Replace alphabet and plaintext length
    pub fn with_space(mut self, alphabet: &str, length: usize) -> Result<Self> {
        self.space = PlaintextSpace::new(Alphabet::new(alphabet)?, length)?;
        Ok(self)
    }

    pub fn with_chain_length(mut self, chain_length: u32) -> Self {
        self.chain_length = chain_length;
        self
    }

    pub fn with_num_chains(mut self, num_chains: u64) -> Self {
        self.num_chains = num_chains;
        self
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Check the parameters that the space does not already enforce
    pub fn validate(&self) -> Result<()> {
        if self.chain_length == 0 {
            return Err(RainbowError::InvalidConfig(
                "chain length must be at least 1".to_string(),
            ));
        }
        if self.space.length() > u16::MAX as usize {
            return Err(RainbowError::InvalidConfig(format!(
                "plaintext length {} is too large",
                self.space.length()
            )));
        }
        Ok(())
    }

    /// Number of distinct start plaintexts generation will use
    pub fn distinct_starts(&self) -> u64 {
        self.num_chains.min(self.space.size())
    }
}
