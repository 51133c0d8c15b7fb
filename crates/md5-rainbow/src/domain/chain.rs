//! Chain operations implementation
//!
//! This module provides the chain entry structure and the functions for
//! chain generation and verification in rainbow table operations.

use crate::domain::alphabet::PlaintextSpace;
use crate::domain::digest::{Digest, HashOracle};
use crate::domain::plaintext::Plaintext;
use crate::domain::reduction::reduce;

/// Chain entry structure
///
/// Only the two ends of a chain are kept; everything in between is
/// recomputed on demand.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChainEntry {
    /// Starting plaintext of the chain
    pub start: Plaintext,
    /// Ending plaintext of the chain
    pub end: Plaintext,
}

impl ChainEntry {
    pub fn new(start: Plaintext, end: Plaintext) -> Self {
        Self { start, end }
    }
}

/// One node of an expanded chain: a plaintext and the digest computed from it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainLink {
    pub plaintext: Plaintext,
    pub digest: Digest,
}

/// Compute a single chain
///
/// Starting from `start`, repeat hash → reduce `chain_length` times
/// and return the ending plaintext. The last digest is not kept.
pub fn compute_chain<H: HashOracle + ?Sized>(
    start: &Plaintext,
    space: &PlaintextSpace,
    chain_length: u32,
    oracle: &H,
) -> ChainEntry {
    let mut current = start.clone();

    for step in 0..chain_length {
        let digest = oracle.hash(current.as_bytes());
        current = reduce(&digest, step, space);
    }

    ChainEntry {
        start: start.clone(),
        end: current,
    }
}

/// Walk a hypothetical chain from `target` at `column` to its end
///
/// Assumes `target` is the digest produced at position `column`, reduces it
/// there, and continues hash → reduce through the last column.
pub fn chain_end_from<H: HashOracle + ?Sized>(
    target: &Digest,
    column: u32,
    space: &PlaintextSpace,
    chain_length: u32,
    oracle: &H,
) -> Plaintext {
    let mut current = reduce(target, column, space);

    for step in column + 1..chain_length {
        let digest = oracle.hash(current.as_bytes());
        current = reduce(&digest, step, space);
    }

    current
}

/// Recompute a chain from its start, looking for `target`
///
/// Hashes at every position from 0. Returns the plaintext whose digest equals
/// `target`, or `None` when the whole chain passes without a match (a false
/// alarm: another chain merged into this endpoint).
pub fn verify_chain<H: HashOracle + ?Sized>(
    start: &Plaintext,
    target: &Digest,
    space: &PlaintextSpace,
    chain_length: u32,
    oracle: &H,
) -> Option<Plaintext> {
    let mut current = start.clone();

    for step in 0..chain_length {
        let digest = oracle.hash(current.as_bytes());
        if digest == *target {
            return Some(current);
        }
        current = reduce(&digest, step, space);
    }

    None
}

/// Expand every node of a chain
///
/// Returns `chain_length` links; link `i` holds the plaintext at position `i`
/// and the digest computed from it.
pub fn enumerate_chain<H: HashOracle + ?Sized>(
    start: &Plaintext,
    space: &PlaintextSpace,
    chain_length: u32,
    oracle: &H,
) -> Vec<ChainLink> {
    let mut links = Vec::with_capacity(chain_length as usize);
    let mut current = start.clone();

    for step in 0..chain_length {
        let digest = oracle.hash(current.as_bytes());
        let next = reduce(&digest, step, space);
        links.push(ChainLink {
            plaintext: std::mem::replace(&mut current, next),
            digest,
        });
    }

    links
}
