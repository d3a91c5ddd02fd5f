// lib.rs - evodist library root

//! # evodist - Evolutionary distance estimation from pairwise alignment statistics
//!
//! This library turns an already-produced local alignment between two DNA
//! fragments into nucleotide substitution statistics, and derives
//! evolutionary-distance estimates from those statistics under three
//! classical substitution models: uncorrected (raw), Jukes-Cantor (JC69)
//! and Kimura two-parameter (K80). Multinomial resampling of the
//! statistics provides bootstrap replicates for confidence estimation.
//!
//! ## Features
//!
//! - **Sufficient statistics**: alignments reduce to a ten-category
//!   mutation matrix from which every estimate is computed
//! - **Anchor fast path**: exact-match regions are counted in O(1) for
//!   models that use identity counts only in aggregate
//! - **Explicit undefined results**: degenerate statistics yield `None`,
//!   never a silent wrong number
//! - **Injected randomness**: bootstrap consumes a caller-owned sampling
//!   capability; parallel batches provision one sampler per replicate
//!
//! ## Basic Usage
//!
//! ```rust
//! use evodist::prelude::*;
//!
//! let subject = b"AACGT";
//! let query = b"AACGA";
//!
//! let mut matrix = MutationMatrix::new(subject.len());
//! matrix.count(subject, query);
//!
//! assert_eq!(matrix.total(), 5);
//! assert_eq!(estimate_raw(&matrix), Some(0.2));
//! ```
//!
//! Alignment fragments are produced by an external aligner; sequence I/O,
//! distance-table aggregation and random-source seeding stay with the
//! caller.

pub mod core;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::core::{
        bootstrap, bootstrap_replicates, MultinomialSampler, RngMultinomialSampler,
    };
    pub use crate::core::{estimate_jc, estimate_kimura, estimate_raw, EvolutionaryModel};
    pub use crate::core::{MutationMatrix, Nucleotide, SubstitutionCategory, CATEGORY_COUNT};
}

// Re-export main types at the root level for convenience
pub use crate::core::{
    bootstrap, bootstrap_replicates, estimate_jc, estimate_kimura, estimate_raw,
    EvolutionaryModel, MultinomialSampler, MutationMatrix, Nucleotide, RngMultinomialSampler,
    SubstitutionCategory, CATEGORY_COUNT,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "evodist v{} - Evolutionary distance estimation from alignment statistics",
        VERSION
    )
}
