//! Endpoint index
//!
//! Maps each chain's end plaintext to its start plaintext. At most one start is
//! kept per endpoint; which one is decided by a [`CollisionPolicy`] fixed when
//! the index is created. Keeping one start per endpoint means a chain hidden
//! behind a collision is never tried during lookup. That coverage loss is
//! accepted.

use crate::domain::chain::ChainEntry;
use crate::domain::plaintext::Plaintext;
use rustc_hash::FxHashMap;

/// Upper bound on index slots reserved up front
const MAX_PREALLOCATED_ENTRIES: usize = 1 << 22;

/// Slots to reserve for `count` expected entries
pub(crate) fn capacity_hint(count: u64) -> usize {
    usize::try_from(count)
        .unwrap_or(usize::MAX)
        .min(MAX_PREALLOCATED_ENTRIES)
}

/// What to do when a new chain ends on an endpoint that is already indexed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CollisionPolicy {
    /// Discard the new chain, keep the earlier entry
    #[default]
    KeepFirst,
    /// Replace the earlier entry with the new chain
    Overwrite,
}

impl CollisionPolicy {
    /// Stable on-disk code
    pub fn to_code(self) -> u8 {
        match self {
            Self::KeepFirst => 0,
            Self::Overwrite => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::KeepFirst),
            1 => Some(Self::Overwrite),
            _ => None,
        }
    }
}

/// Result of inserting one chain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Endpoint was new
    Inserted,
    /// Endpoint existed; the new chain was dropped
    Discarded,
    /// Endpoint existed; the earlier chain was replaced
    Overwritten,
}

/// end plaintext → start plaintext
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EndpointIndex {
    map: FxHashMap<Plaintext, Plaintext>,
    collisions: u64,
    policy: CollisionPolicy,
}

impl EndpointIndex {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self::with_capacity(policy, 0)
    }

    pub fn with_capacity(policy: CollisionPolicy, capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            collisions: 0,
            policy,
        }
    }

    /// Build an index by inserting `entries` in order
    pub fn from_entries<I>(policy: CollisionPolicy, entries: I) -> Self
    where
        I: IntoIterator<Item = ChainEntry>,
    {
        let entries = entries.into_iter();
        let mut index = Self::with_capacity(policy, entries.size_hint().0);
        for entry in entries {
            index.insert(entry);
        }
        index
    }

    /// Insert one chain, applying the collision policy
    ///
    /// Every insert that hits an existing endpoint bumps the collision counter,
    /// whichever policy is in force.
    pub fn insert(&mut self, entry: ChainEntry) -> InsertOutcome {
        use std::collections::hash_map::Entry;

        match self.map.entry(entry.end) {
            Entry::Vacant(slot) => {
                slot.insert(entry.start);
                InsertOutcome::Inserted
            }
            Entry::Occupied(mut slot) => {
                self.collisions += 1;
                match self.policy {
                    CollisionPolicy::KeepFirst => InsertOutcome::Discarded,
                    CollisionPolicy::Overwrite => {
                        slot.insert(entry.start);
                        InsertOutcome::Overwritten
                    }
                }
            }
        }
    }

    /// Start plaintext of the chain ending at `end`, if indexed
    #[inline]
    pub fn lookup_endpoint(&self, end: &Plaintext) -> Option<&Plaintext> {
        self.map.get(end)
    }

    /// Number of stored chains
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of inserts that hit an existing endpoint
    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    pub(crate) fn set_collisions(&mut self, collisions: u64) {
        self.collisions = collisions;
    }

    /// Stored chains in arbitrary order
    pub fn entries(&self) -> impl Iterator<Item = ChainEntry> + '_ {
        self.map
            .iter()
            .map(|(end, start)| ChainEntry::new(start.clone(), end.clone()))
    }
}
