//! Table sort operations
//!
//! This module puts index entries into a canonical order (ascending end
//! plaintext), so the same index always serializes to the same bytes.

use crate::domain::chain::ChainEntry;
use crate::domain::index::EndpointIndex;
use rayon::prelude::*;

/// Sort entries by end plaintext using parallel sort
///
/// Ties (only possible for entries that never went through an index) are
/// broken by start plaintext.
pub fn sort_entries_parallel(entries: &mut [ChainEntry]) {
    if entries.is_empty() {
        return;
    }

    entries.par_sort_unstable_by(|a, b| a.end.cmp(&b.end).then_with(|| a.start.cmp(&b.start)));
}

/// Index entries in canonical order
pub fn sorted_entries(index: &EndpointIndex) -> Vec<ChainEntry> {
    let mut entries: Vec<ChainEntry> = index.entries().collect();
    sort_entries_parallel(&mut entries);
    entries
}
