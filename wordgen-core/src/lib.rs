//! Phonotactic word generation library.
//!
//! This crate enumerates every word allowed by a small syllable grammar:
//! - Phoneme inventories (consonants, finals, vowels, clusters)
//! - Combinatorial syllable expansion, eager or lazy
//! - Suffix conjugation of generated words
//! - A shared shuffle / truncate / conjugate output pipeline
//!
//! Words are generated in full before any shuffling or truncation, and
//! the generator refuses runs above a configurable word limit.

/// Error type shared by every fallible operation.
pub mod error;

/// Inventories, combination, generation and conjugation.
pub mod model;

/// I/O utilities (file loading, path helpers, folder listing).
pub mod io;

pub use error::GenError;
pub use model::conjugator::{conjugate, conjugation_line};
pub use model::generator::{WordGenerator, Words};
pub use model::inventory::Inventory;
pub use model::request::GenerationInput;
