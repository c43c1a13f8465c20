//! Centroid seeding from existing samples.

use crate::error::{Error, Result};
use crate::kmeans::distance::CHANNELS;
use num_traits::Float;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// How initial centroids are drawn from the samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitStrategy {
    /// Every centroid slot draws an independent sample index. Two slots may
    /// land on the same sample, giving duplicate starting centroids.
    #[default]
    WithReplacement,
    /// Centroid slots draw pairwise distinct sample indices.
    WithoutReplacement,
}

/// Builds the generator used for seeding. Each call starts a fresh stream, so
/// equal seeds always produce equal centroids.
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Picks `num_centroids` samples with a generator seeded from `seed` and
/// returns their channels as a flat centroid buffer.
///
/// # Errors
///
/// - `DimensionMismatch` if `samples.len()` is not a multiple of 3.
/// - `InvalidArgument` if there are no samples, `num_centroids` is 0, or
///   `num_centroids` exceeds the number of samples.
///
/// # Example
///
/// ```
/// use colorquant::{initialize_centroids, InitStrategy};
///
/// let pixels = [0.0f32, 0.0, 0.0, 255.0, 255.0, 255.0];
/// let centroids = initialize_centroids(&pixels, 2, 7, InitStrategy::WithoutReplacement).unwrap();
/// assert_eq!(centroids.len(), 6);
/// ```
pub fn initialize_centroids<T: Float>(
    samples: &[T],
    num_centroids: usize,
    seed: u64,
    strategy: InitStrategy,
) -> Result<Vec<T>> {
    let mut centroids = vec![T::zero(); num_centroids * CHANNELS];
    let mut rng = seeded_rng(seed);
    initialize_centroids_with_rng(samples, &mut centroids, &mut rng, strategy)?;
    Ok(centroids)
}

/// Fills `centroids` with copies of samples chosen by `rng`.
///
/// The number of centroids is `centroids.len() / 3`. The whole buffer is
/// overwritten and the generator advances by one draw per centroid for
/// [`InitStrategy::WithReplacement`].
pub fn initialize_centroids_with_rng<T, R>(
    samples: &[T],
    centroids: &mut [T],
    rng: &mut R,
    strategy: InitStrategy,
) -> Result<()>
where
    T: Float,
    R: Rng + ?Sized,
{
    let num_samples = sample_count(samples)?;
    let num_centroids = centroid_count(centroids)?;
    check_counts(num_samples, num_centroids)?;

    match strategy {
        InitStrategy::WithReplacement => {
            for slot in centroids.chunks_exact_mut(CHANNELS) {
                let idx = rng.gen_range(0..num_samples);
                slot.copy_from_slice(&samples[idx * CHANNELS..(idx + 1) * CHANNELS]);
            }
        }
        InitStrategy::WithoutReplacement => {
            let picks = index::sample(rng, num_samples, num_centroids);
            for (slot, idx) in centroids.chunks_exact_mut(CHANNELS).zip(picks.iter()) {
                slot.copy_from_slice(&samples[idx * CHANNELS..(idx + 1) * CHANNELS]);
            }
        }
    }
    Ok(())
}

/// Number of samples in a flat buffer.
pub(crate) fn sample_count<T>(samples: &[T]) -> Result<usize> {
    if samples.len() % CHANNELS != 0 {
        return Err(Error::DimensionMismatch {
            what: "samples",
            expected: samples.len() / CHANNELS * CHANNELS,
            actual: samples.len(),
        });
    }
    Ok(samples.len() / CHANNELS)
}

pub(crate) fn centroid_count<T>(centroids: &[T]) -> Result<usize> {
    if centroids.len() % CHANNELS != 0 {
        return Err(Error::DimensionMismatch {
            what: "centroids",
            expected: centroids.len() / CHANNELS * CHANNELS,
            actual: centroids.len(),
        });
    }
    Ok(centroids.len() / CHANNELS)
}

/// Rejects empty inputs and more centroids than samples.
pub(crate) fn check_counts(num_samples: usize, num_centroids: usize) -> Result<()> {
    if num_samples == 0 {
        return Err(Error::InvalidArgument(
            "at least one sample is required".to_string(),
        ));
    }
    if num_centroids == 0 {
        return Err(Error::InvalidArgument(
            "num_centroids must be > 0".to_string(),
        ));
    }
    if num_centroids > num_samples {
        return Err(Error::InvalidArgument(format!(
            "num_centroids = {} exceeds num_samples = {}",
            num_centroids, num_samples
        )));
    }
    Ok(())
}
