//! Top-level module for the word generation system.
//!
//! This module provides:
//! - Phoneme inventories (`Inventory`)
//! - Cartesian string combination (`fork`)
//! - The word generator and its lazy variant (`WordGenerator`, `Words`)
//! - Suffix conjugation (`conjugate`)
//! - Run parameters shared by front ends (`GenerationInput`)

/// Cartesian-product string concatenation, sequential and threaded.
pub mod combiner;

/// Fixed four-form suffix expansion of a word.
pub mod conjugator;

/// High-level interface enumerating words from an inventory.
///
/// Exposes eager generation, exact counting, lazy iteration and the
/// shuffle / truncate / conjugate output pipeline.
pub mod generator;

/// Phoneme inventories, their text format and binary cache.
pub mod inventory;

/// Generation parameters (syllables, sample size, randomness, conjugation).
pub mod request;
