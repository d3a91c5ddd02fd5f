// model.rs - Evolutionary models and distance estimators

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::matrix::MutationMatrix;

/// Substitution model used to turn alignment statistics into an
/// evolutionary distance.
///
/// The model is passed explicitly wherever it changes behavior (anchor
/// counting, estimation); there is no ambient model configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolutionaryModel {
    /// Uncorrected substitution rate.
    Raw,
    /// Jukes-Cantor correction (JC69).
    JukesCantor,
    /// Kimura two-parameter correction (K80).
    Kimura,
}

impl EvolutionaryModel {
    pub fn description(&self) -> &str {
        match self {
            EvolutionaryModel::Raw => "Uncorrected substitution rate",
            EvolutionaryModel::JukesCantor => "Jukes-Cantor corrected distance (JC69)",
            EvolutionaryModel::Kimura => "Kimura two-parameter corrected distance (K80)",
        }
    }

    /// Whether this model reads identity counts only in aggregate.
    ///
    /// Anchor counting takes an O(1) shortcut for such models: the anchor
    /// length is spread evenly over the four identity categories without
    /// inspecting any character. A model whose formula depends on the true
    /// nucleotide composition of anchors must answer `false` here to get
    /// exact per-character classification; adding a variant to this enum
    /// forces that decision at compile time.
    pub fn aggregates_identities(&self) -> bool {
        match self {
            EvolutionaryModel::Raw | EvolutionaryModel::JukesCantor | EvolutionaryModel::Kimura => {
                true
            }
        }
    }

    /// Estimate the evolutionary distance under this model.
    pub fn estimate(&self, matrix: &MutationMatrix) -> Option<f64> {
        match self {
            EvolutionaryModel::Raw => estimate_raw(matrix),
            EvolutionaryModel::JukesCantor => estimate_jc(matrix),
            EvolutionaryModel::Kimura => estimate_kimura(matrix),
        }
    }
}

impl FromStr for EvolutionaryModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(EvolutionaryModel::Raw),
            "jc" | "jc69" | "jukes-cantor" => Ok(EvolutionaryModel::JukesCantor),
            "kimura" | "k80" | "k2p" => Ok(EvolutionaryModel::Kimura),
            _ => Err(format!(
                "Invalid evolutionary model: {}. Use: raw, jc, kimura",
                s
            )),
        }
    }
}

/// Uncorrected substitution rate of a pairwise alignment.
///
/// Returns `None` when three or fewer positions were classified; a sample
/// that small carries no meaningful signal. Defined results lie in [0, 1).
pub fn estimate_raw(matrix: &MutationMatrix) -> Option<f64> {
    let nucleotides = matrix.total();
    if nucleotides <= 3 {
        return None;
    }

    Some(matrix.substitutions() as f64 / nucleotides as f64)
}

/// Jukes-Cantor (JC69) corrected distance.
///
/// Returns `None` when the raw estimate is undefined, or at saturation
/// (raw divergence >= 0.75), where the correction's logarithm leaves its
/// domain.
pub fn estimate_jc(matrix: &MutationMatrix) -> Option<f64> {
    let raw = estimate_raw(matrix)?;

    let argument = 1.0 - (4.0 / 3.0) * raw;
    if argument <= 0.0 {
        return None;
    }

    let distance = -0.75 * argument.ln();
    // rounding can leave a tiny negative residue near zero
    Some(if distance <= 0.0 { 0.0 } else { distance })
}

/// Kimura two-parameter (K80) corrected distance.
///
/// Corrects transitions and transversions separately. Returns `None` when
/// the sample is too small or either logarithm factor is non-positive.
pub fn estimate_kimura(matrix: &MutationMatrix) -> Option<f64> {
    let nucleotides = matrix.total();
    if nucleotides <= 3 {
        return None;
    }

    let transitions = matrix.transitions() as f64 / nucleotides as f64;
    let transversions = matrix.transversions() as f64 / nucleotides as f64;

    let transversion_factor = 1.0 - 2.0 * transversions;
    let transition_factor = 1.0 - 2.0 * transitions - transversions;
    if transversion_factor <= 0.0 || transition_factor <= 0.0 {
        return None;
    }

    let distance = -0.25 * (transversion_factor * transition_factor * transition_factor).ln();
    // rounding can leave a tiny negative residue near zero
    Some(if distance <= 0.0 { 0.0 } else { distance })
}
