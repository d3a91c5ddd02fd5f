// matrix.rs - Mutation matrix: the sufficient statistic of a pairwise alignment

use serde::{Deserialize, Serialize};

use super::model::EvolutionaryModel;
use super::nucleotide::{Nucleotide, SubstitutionCategory, CATEGORY_COUNT};

/// Substitution counts of a pairwise nucleotide alignment.
///
/// Ten counters, one per unordered nucleotide pair, plus the length of the
/// reference region the counts summarize. Every distance estimator reads
/// the alignment only through these counts, which makes the matrix a
/// sufficient statistic: bootstrap replicates can be drawn from the counts
/// directly instead of from the aligned characters.
///
/// The sum of all counts never exceeds `reference_length`; positions whose
/// characters are non-informative occupy the alignment but are never
/// counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationMatrix {
    counts: [usize; CATEGORY_COUNT],
    reference_length: usize,
}

impl MutationMatrix {
    /// Create an empty matrix summarizing a region of the given length.
    pub fn new(reference_length: usize) -> Self {
        Self {
            counts: [0; CATEGORY_COUNT],
            reference_length,
        }
    }

    pub(crate) fn from_parts(counts: [usize; CATEGORY_COUNT], reference_length: usize) -> Self {
        Self {
            counts,
            reference_length,
        }
    }

    /// The count vector, indexed by [`SubstitutionCategory::to_index`].
    pub fn counts(&self) -> &[usize; CATEGORY_COUNT] {
        &self.counts
    }

    /// Count in a single category.
    pub fn count_of(&self, category: SubstitutionCategory) -> usize {
        self.counts[category.to_index()]
    }

    /// Length of the reference region this matrix summarizes.
    pub fn reference_length(&self) -> usize {
        self.reference_length
    }

    /// Classify the positions of an aligned fragment pair and accumulate
    /// the counts.
    ///
    /// A position where either character is non-informative is skipped
    /// entirely. The two fragments must have equal length and 1:1
    /// positional correspondence, as produced by the external aligner.
    pub fn count(&mut self, subject: &[u8], query: &[u8]) {
        debug_assert_eq!(
            subject.len(),
            query.len(),
            "aligned fragments must have equal length"
        );

        // Accumulate locally and merge once, so the hot loop writes a
        // stack buffer instead of aliasing the persistent counts.
        let mut local = [0usize; CATEGORY_COUNT];
        for (&subject_byte, &query_byte) in subject.iter().zip(query.iter()) {
            let subject_code = match Nucleotide::classify(subject_byte) {
                Some(code) => code,
                None => continue,
            };
            let query_code = match Nucleotide::classify(query_byte) {
                Some(code) => code,
                None => continue,
            };
            local[SubstitutionCategory::from_pair(subject_code, query_code).to_index()] += 1;
        }

        for (count, extra) in self.counts.iter_mut().zip(local) {
            *count += extra;
        }
    }

    /// Count an anchor: a region where subject and query are already known
    /// to be character-identical, so only the identity categories grow.
    ///
    /// For models that read identity counts only in aggregate (see
    /// [`EvolutionaryModel::aggregates_identities`]) the anchor length is
    /// split evenly over the four identity categories, with the remainder
    /// placed in T:T, and no character is inspected. Other models get the
    /// per-character classification, which skips non-informative bytes.
    pub fn count_equal(&mut self, fragment: &[u8], model: EvolutionaryModel) {
        if model.aggregates_identities() {
            let fourth = fragment.len() / 4;
            self.counts[SubstitutionCategory::AtoA.to_index()] += fourth;
            self.counts[SubstitutionCategory::CtoC.to_index()] += fourth;
            self.counts[SubstitutionCategory::GtoG.to_index()] += fourth;
            self.counts[SubstitutionCategory::TtoT.to_index()] += fourth + fragment.len() % 4;
            return;
        }

        self.count_equal_exact(fragment);
    }

    /// Per-character anchor counting for models that need the true
    /// nucleotide composition.
    fn count_equal_exact(&mut self, fragment: &[u8]) {
        let mut local = [0usize; 4];
        for &byte in fragment {
            if let Some(nucleotide) = Nucleotide::classify(byte) {
                local[nucleotide.to_index()] += 1;
            }
        }

        for (nucleotide, extra) in Nucleotide::ALL.into_iter().zip(local) {
            self.counts[SubstitutionCategory::identity(nucleotide).to_index()] += extra;
        }
    }

    /// Number of alignment positions actually classified.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Fraction of the reference region covered by classified positions.
    ///
    /// A `reference_length` of zero is a caller error.
    pub fn coverage(&self) -> f64 {
        self.total() as f64 / self.reference_length as f64
    }

    /// Pool the statistics of two alignments between the same sequence
    /// pair into one matrix before estimating a single distance.
    ///
    /// Despite the name this is an accumulation: counts and reference
    /// lengths add component-wise. Neither input is mutated.
    pub fn average(&self, other: &MutationMatrix) -> MutationMatrix {
        let mut pooled = self.clone();
        for (count, extra) in pooled.counts.iter_mut().zip(other.counts) {
            *count += extra;
        }
        pooled.reference_length += other.reference_length;
        pooled
    }

    /// Sum of the counts in the given categories.
    pub fn sum_of(&self, categories: &[SubstitutionCategory]) -> usize {
        categories
            .iter()
            .map(|category| self.counts[category.to_index()])
            .sum()
    }

    /// Positions counted in any of the six change categories.
    pub fn substitutions(&self) -> usize {
        self.sum_of(&SubstitutionCategory::SUBSTITUTIONS)
    }

    /// Positions counted as transitions (A↔G, C↔T).
    pub fn transitions(&self) -> usize {
        self.sum_of(&SubstitutionCategory::TRANSITIONS)
    }

    /// Positions counted as transversions.
    pub fn transversions(&self) -> usize {
        self.sum_of(&SubstitutionCategory::TRANSVERSIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_aligned_pair() {
        let mut matrix = MutationMatrix::new(5);
        matrix.count(b"AACGT", b"AACGA");

        assert_eq!(matrix.count_of(SubstitutionCategory::AtoA), 2);
        assert_eq!(matrix.count_of(SubstitutionCategory::CtoC), 1);
        assert_eq!(matrix.count_of(SubstitutionCategory::GtoG), 1);
        assert_eq!(matrix.count_of(SubstitutionCategory::AtoT), 1);
        assert_eq!(matrix.total(), 5);
        assert_eq!(matrix.substitutions(), 1);
        assert_eq!(matrix.transitions(), 0);
        assert_eq!(matrix.transversions(), 1);
    }

    #[test]
    fn test_count_skips_non_informative_positions() {
        let mut matrix = MutationMatrix::new(6);
        matrix.count(b"A-CGNT", b"AACGTT");

        // Positions 1 (gap) and 4 (ambiguity) contribute nothing.
        assert_eq!(matrix.total(), 4);
        assert_eq!(matrix.count_of(SubstitutionCategory::AtoA), 1);
        assert_eq!(matrix.count_of(SubstitutionCategory::CtoC), 1);
        assert_eq!(matrix.count_of(SubstitutionCategory::GtoG), 1);
        assert_eq!(matrix.count_of(SubstitutionCategory::TtoT), 1);
    }

    #[test]
    fn test_count_identical_characters_land_in_identity_category() {
        for nucleotide in Nucleotide::ALL {
            let byte = nucleotide.to_char() as u8;
            let mut matrix = MutationMatrix::new(1);
            matrix.count(&[byte], &[byte]);

            assert_eq!(matrix.count_of(SubstitutionCategory::identity(nucleotide)), 1);
            assert_eq!(matrix.total(), 1);
        }
    }

    #[test]
    fn test_count_equal_fast_path_splits_length() {
        let mut matrix = MutationMatrix::new(10);
        matrix.count_equal(b"ACGTACGTAC", EvolutionaryModel::JukesCantor);

        assert_eq!(matrix.count_of(SubstitutionCategory::AtoA), 2);
        assert_eq!(matrix.count_of(SubstitutionCategory::CtoC), 2);
        assert_eq!(matrix.count_of(SubstitutionCategory::GtoG), 2);
        // remainder of 10 % 4 lands in T:T
        assert_eq!(matrix.count_of(SubstitutionCategory::TtoT), 4);
        assert_eq!(matrix.total(), 10);
        assert_eq!(matrix.substitutions(), 0);
    }

    #[test]
    fn test_count_equal_fast_path_ignores_characters() {
        // The fast path must not inspect the fragment at all.
        let mut matrix = MutationMatrix::new(8);
        matrix.count_equal(b"NNNN----", EvolutionaryModel::Raw);
        assert_eq!(matrix.total(), 8);
    }

    #[test]
    fn test_count_equal_exact_path_classifies_characters() {
        let mut matrix = MutationMatrix::new(7);
        matrix.count_equal_exact(b"AAC-GTN");

        assert_eq!(matrix.count_of(SubstitutionCategory::AtoA), 2);
        assert_eq!(matrix.count_of(SubstitutionCategory::CtoC), 1);
        assert_eq!(matrix.count_of(SubstitutionCategory::GtoG), 1);
        assert_eq!(matrix.count_of(SubstitutionCategory::TtoT), 1);
        assert_eq!(matrix.total(), 5);
    }

    #[test]
    fn test_average_accumulates_counts_and_lengths() {
        let mut first = MutationMatrix::new(5);
        first.count(b"AACGT", b"AACGA");
        let mut second = MutationMatrix::new(4);
        second.count(b"ACGT", b"ACGT");

        let pooled = first.average(&second);
        assert_eq!(pooled.total(), first.total() + second.total());
        assert_eq!(pooled.reference_length(), 9);

        // Inputs are untouched.
        assert_eq!(first.total(), 5);
        assert_eq!(second.total(), 4);
    }

    #[test]
    fn test_average_is_commutative_and_associative() {
        let first = MutationMatrix::from_parts([1, 2, 3, 4, 5, 6, 7, 8, 9, 10], 100);
        let second = MutationMatrix::from_parts([10, 9, 8, 7, 6, 5, 4, 3, 2, 1], 60);
        let third = MutationMatrix::from_parts([0, 1, 0, 1, 0, 1, 0, 1, 0, 1], 5);

        assert_eq!(first.average(&second), second.average(&first));
        assert_eq!(
            first.average(&second).average(&third),
            first.average(&second.average(&third))
        );
    }

    #[test]
    fn test_coverage() {
        let mut matrix = MutationMatrix::new(10);
        matrix.count(b"ACGTN", b"ACGTA");
        assert!((matrix.coverage() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_category_sums_are_consistent() {
        let matrix = MutationMatrix::from_parts([4, 1, 3, 2, 1, 5, 2, 3, 1, 6], 40);

        assert_eq!(
            matrix.substitutions() + matrix.sum_of(&SubstitutionCategory::IDENTITIES),
            matrix.total()
        );
        assert_eq!(
            matrix.transitions() + matrix.transversions(),
            matrix.substitutions()
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let mut matrix = MutationMatrix::new(5);
        matrix.count(b"AACGT", b"AACGA");

        let encoded = serde_json::to_string(&matrix).unwrap();
        let decoded: MutationMatrix = serde_json::from_str(&encoded).unwrap();
        assert_eq!(matrix, decoded);
    }
}
