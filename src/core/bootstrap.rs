// bootstrap.rs - Multinomial resampling of mutation matrices

use rand::Rng;
use rand_distr::{Binomial, Distribution};
use rayon::prelude::*;

use super::matrix::MutationMatrix;
use super::nucleotide::CATEGORY_COUNT;

/// Random-sampling capability consumed by [`bootstrap`].
///
/// One call returns one multinomial draw: `total` trials distributed over
/// the categories according to `probabilities`, with the drawn counts
/// summing exactly to `total`. The drawing algorithm is up to the
/// implementation; ownership of the underlying randomness (seeding,
/// thread placement) stays with the caller.
pub trait MultinomialSampler {
    fn sample(
        &mut self,
        total: usize,
        probabilities: &[f64; CATEGORY_COUNT],
    ) -> [usize; CATEGORY_COUNT];
}

/// Multinomial sampler backed by any [`rand::Rng`].
///
/// Draws by sequential binomial decomposition: each category receives a
/// binomial share of the still-unassigned trials, conditioned on the
/// probability mass not yet consumed, and the final category absorbs the
/// remainder so the draw always sums to the requested total.
#[derive(Debug, Clone)]
pub struct RngMultinomialSampler<R: Rng> {
    rng: R,
}

impl<R: Rng> RngMultinomialSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MultinomialSampler for RngMultinomialSampler<R> {
    fn sample(
        &mut self,
        total: usize,
        probabilities: &[f64; CATEGORY_COUNT],
    ) -> [usize; CATEGORY_COUNT] {
        let mut drawn = [0usize; CATEGORY_COUNT];
        let mut remaining_trials = total as u64;
        let mut remaining_mass: f64 = probabilities.iter().sum();

        for (index, &probability) in probabilities.iter().enumerate() {
            if remaining_trials == 0 {
                break;
            }

            // The last category, or one holding all the mass that is
            // numerically left, takes every remaining trial.
            if index == CATEGORY_COUNT - 1 || remaining_mass <= probability {
                drawn[index] = remaining_trials as usize;
                break;
            }

            let conditional = (probability / remaining_mass).clamp(0.0, 1.0);
            let share = Binomial::new(remaining_trials, conditional)
                .expect("conditional probability is clamped to [0, 1]")
                .sample(&mut self.rng);

            drawn[index] = share as usize;
            remaining_trials -= share;
            remaining_mass -= probability;
        }

        drawn
    }
}

/// Draw one bootstrap replicate of a mutation matrix.
///
/// The ten counts are treated as a realized multinomial sample of size
/// `total()` with the empirical category probabilities, and the replicate
/// is a fresh draw of the same size from those probabilities, keeping the
/// input's reference length. Because the estimators read the alignment
/// only through the counts, resampling the counts is equivalent to
/// resampling every aligned position individually, at a fraction of the
/// cost.
///
/// The input is never mutated. It must have classified at least one
/// position; resampling an empty matrix is a caller error.
pub fn bootstrap<S: MultinomialSampler>(
    matrix: &MutationMatrix,
    sampler: &mut S,
) -> MutationMatrix {
    let nucleotides = matrix.total();
    debug_assert!(nucleotides > 0, "cannot resample an empty mutation matrix");

    let mut probabilities = [0.0f64; CATEGORY_COUNT];
    for (probability, &count) in probabilities.iter_mut().zip(matrix.counts()) {
        *probability = count as f64 / nucleotides as f64;
    }

    let drawn = sampler.sample(nucleotides, &probabilities);
    MutationMatrix::from_parts(drawn, matrix.reference_length())
}

/// Draw a batch of bootstrap replicates in parallel.
///
/// `make_sampler` builds one independent sampler per replicate index, so
/// no random source is ever shared between worker threads. Deterministic
/// replication is available by seeding per index in the closure.
pub fn bootstrap_replicates<S, F>(
    matrix: &MutationMatrix,
    replicates: usize,
    make_sampler: F,
) -> Vec<MutationMatrix>
where
    S: MultinomialSampler,
    F: Fn(usize) -> S + Send + Sync,
{
    (0..replicates)
        .into_par_iter()
        .map(|index| {
            let mut sampler = make_sampler(index);
            bootstrap(matrix, &mut sampler)
        })
        .collect()
}
