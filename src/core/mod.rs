// mod.rs - Core statistics and estimation module

pub mod bootstrap;
pub mod matrix;
pub mod model;
pub mod nucleotide;

// Re-export main types for convenience
pub use bootstrap::{bootstrap, bootstrap_replicates, MultinomialSampler, RngMultinomialSampler};
pub use matrix::MutationMatrix;
pub use model::{estimate_jc, estimate_kimura, estimate_raw, EvolutionaryModel};
pub use nucleotide::{Nucleotide, SubstitutionCategory, CATEGORY_COUNT};
