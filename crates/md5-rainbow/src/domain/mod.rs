//! Domain layer - Pure computational logic
//!
//! This module contains pure functions and algorithms without I/O dependencies.

pub mod alphabet;
pub mod chain;
pub mod digest;
pub mod index;
pub mod plaintext;
pub mod reduction;
pub mod sequencer;
pub mod table_format;
