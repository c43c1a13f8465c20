//! Lloyd iterations: assign every sample to its nearest centroid, then move
//! every centroid to the mean of its samples.

use crate::error::{Error, Result};
use crate::kmeans::config::{KMeansConfig, Stopping};
use crate::kmeans::distance::{nearest_centroid, squared_distance, CHANNELS};
use crate::kmeans::init::{
    centroid_count, check_counts, initialize_centroids_with_rng, sample_count, seeded_rng,
    InitStrategy,
};
use crate::kmeans::palette::inertia;
use log::{debug, trace};
use num_traits::Float;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// What a call to [`refine`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Number of assign/update rounds that ran.
    pub iterations: usize,
    /// True if [`Stopping::Converged`] ended the loop early.
    pub converged: bool,
}

/// Owned output of [`KMeans::fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering<T> {
    /// Flat, channel-interleaved palette of `k` colors.
    pub centroids: Vec<T>,
    /// Centroid index of every sample.
    pub labels: Vec<usize>,
    /// Number of assign/update rounds that ran.
    pub iterations: usize,
    /// True if the opt-in convergence rule ended the loop early.
    pub converged: bool,
    /// Sum of squared distances from every sample to its centroid.
    pub inertia: T,
}

impl<T: Float> Clustering<T> {
    /// Number of clusters.
    pub fn k(&self) -> usize {
        self.centroids.len() / CHANNELS
    }

    /// Channels of centroid `idx`.
    pub fn centroid(&self, idx: usize) -> &[T] {
        &self.centroids[idx * CHANNELS..(idx + 1) * CHANNELS]
    }
}

/// k-means color quantizer driven by a [`KMeansConfig`].
///
/// # Example
///
/// ```
/// use colorquant::{KMeans, KMeansConfig};
///
/// let pixels = [
///     0.0f32, 0.0, 0.0,
///     1.0, 1.0, 1.0,
///     10.0, 10.0, 10.0,
///     11.0, 11.0, 11.0,
/// ];
///
/// let clustering = KMeans::new(KMeansConfig::new(2).with_max_iterations(5))
///     .fit(&pixels)
///     .unwrap();
/// assert_eq!(clustering.labels.len(), 4);
/// assert_eq!(clustering.k(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct KMeans {
    config: KMeansConfig,
}

impl KMeans {
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    /// Clusters a flat, channel-interleaved sample buffer.
    ///
    /// Labels start at 0 and are only meaningful once at least one round ran.
    pub fn fit<T>(&self, samples: &[T]) -> Result<Clustering<T>>
    where
        T: Float + Send + Sync,
    {
        let num_samples = sample_count(samples)?;
        self.config.validate(num_samples)?;

        let mut centroids = vec![T::zero(); self.config.k * CHANNELS];
        let mut labels = vec![0; num_samples];
        let mut rng = seeded_rng(self.config.seed);
        initialize_centroids_with_rng(samples, &mut centroids, &mut rng, self.config.init)?;

        let stats = refine(
            samples,
            &mut centroids,
            &mut labels,
            self.config.max_iterations,
            self.config.stopping,
        )?;
        let inertia = inertia(samples, &centroids, &labels)?;

        Ok(Clustering {
            centroids,
            labels,
            iterations: stats.iterations,
            converged: stats.converged,
            inertia,
        })
    }
}

/// Clusters `samples` into `num_centroids` colors, writing the palette into
/// `centroids` and each sample's cluster into `labels`.
///
/// Centroids are seeded from `seed` by sampling with replacement, then exactly
/// `max_iters` assign/update rounds run. With `max_iters == 0` the labels are
/// left as supplied.
///
/// # Errors
///
/// Every argument is checked before either output buffer is written:
/// - `DimensionMismatch` if `samples.len()` is not a multiple of 3, if
///   `centroids.len() != 3 * num_centroids`, or if `labels` does not hold one
///   entry per sample.
/// - `InvalidArgument` if there are no samples, `num_centroids` is 0, or
///   `num_centroids` exceeds the number of samples.
pub fn kmeans_clustering<T>(
    samples: &[T],
    num_centroids: usize,
    max_iters: usize,
    seed: u64,
    centroids: &mut [T],
    labels: &mut [usize],
) -> Result<()>
where
    T: Float + Send + Sync,
{
    let num_samples = sample_count(samples)?;
    check_counts(num_samples, num_centroids)?;
    check_len("centroids", num_centroids * CHANNELS, centroids.len())?;
    check_len("labels", num_samples, labels.len())?;

    let mut rng = seeded_rng(seed);
    initialize_centroids_with_rng(samples, centroids, &mut rng, InitStrategy::WithReplacement)?;
    refine(samples, centroids, labels, max_iters, Stopping::FixedIterations)?;
    Ok(())
}

/// Runs Lloyd rounds starting from the centroids already in `centroids`.
///
/// A centroid that receives no samples in a round keeps its previous value.
/// Under [`Stopping::Converged`] the loop ends after a round in which no label
/// changed (from the second round on) or no centroid moved more than the
/// tolerance.
pub fn refine<T>(
    samples: &[T],
    centroids: &mut [T],
    labels: &mut [usize],
    max_iters: usize,
    stopping: Stopping,
) -> Result<RunStats>
where
    T: Float + Send + Sync,
{
    let num_samples = sample_count(samples)?;
    let k = centroid_count(centroids)?;
    check_counts(num_samples, k)?;
    check_len("labels", num_samples, labels.len())?;
    stopping.validate()?;

    debug!(
        "clustering {} samples into {} centroids, {} iterations, {:?}",
        num_samples, k, max_iters, stopping
    );

    let mut sums = vec![T::zero(); k * CHANNELS];
    let mut counts = vec![0_usize; k];
    let mut stats = RunStats {
        iterations: 0,
        converged: false,
    };

    for iter in 0..max_iters {
        sums.fill(T::zero());
        counts.fill(0);

        let changed = assign(samples, centroids, labels);
        accumulate(samples, labels, &mut sums, &mut counts);
        let (max_shift, empty) = update(centroids, &sums, &counts);
        stats.iterations = iter + 1;

        trace!(
            "iteration {}: {} labels changed, {} empty clusters",
            iter,
            changed,
            empty
        );

        if let Stopping::Converged { tolerance } = stopping {
            let shift = max_shift.to_f64().unwrap_or(f64::INFINITY);
            if (iter > 0 && changed == 0) || shift <= tolerance * tolerance {
                debug!("converged after {} iterations", iter + 1);
                stats.converged = true;
                break;
            }
        }
    }

    Ok(stats)
}

/// Writes the nearest centroid of every sample into `labels` and returns how
/// many labels changed.
#[cfg(not(feature = "parallel"))]
fn assign<T: Float>(samples: &[T], centroids: &[T], labels: &mut [usize]) -> usize {
    let mut changed = 0;
    for (sample, label) in samples.chunks_exact(CHANNELS).zip(labels.iter_mut()) {
        let (closest, _) = nearest_centroid(sample, centroids);
        if *label != closest {
            *label = closest;
            changed += 1;
        }
    }
    changed
}

#[cfg(feature = "parallel")]
fn assign<T>(samples: &[T], centroids: &[T], labels: &mut [usize]) -> usize
where
    T: Float + Send + Sync,
{
    samples
        .par_chunks_exact(CHANNELS)
        .zip(labels.par_iter_mut())
        .map(|(sample, label)| {
            let (closest, _) = nearest_centroid(sample, centroids);
            let changed = *label != closest;
            *label = closest;
            usize::from(changed)
        })
        .sum()
}

/// Adds every sample into its cluster's sums. Runs in sample order so the
/// floating point result does not depend on how assignment was scheduled.
fn accumulate<T: Float>(samples: &[T], labels: &[usize], sums: &mut [T], counts: &mut [usize]) {
    for (sample, &label) in samples.chunks_exact(CHANNELS).zip(labels) {
        counts[label] += 1;
        let sum = &mut sums[label * CHANNELS..(label + 1) * CHANNELS];
        for (s, &v) in sum.iter_mut().zip(sample) {
            *s = *s + v;
        }
    }
}

/// Moves each non-empty centroid to the mean of its samples. Returns the
/// largest squared centroid shift and the number of empty clusters.
fn update<T: Float>(centroids: &mut [T], sums: &[T], counts: &[usize]) -> (T, usize) {
    let mut max_shift = T::zero();
    let mut empty = 0;

    for ((centroid, sum), &count) in centroids
        .chunks_exact_mut(CHANNELS)
        .zip(sums.chunks_exact(CHANNELS))
        .zip(counts)
    {
        if count == 0 {
            // empty cluster: keep the previous position
            empty += 1;
            continue;
        }
        let n = count_as_float::<T>(count);
        let mean = [sum[0] / n, sum[1] / n, sum[2] / n];
        let shift = squared_distance(centroid, &mean);
        if shift > max_shift {
            max_shift = shift;
        }
        centroid.copy_from_slice(&mean);
    }
    (max_shift, empty)
}

fn count_as_float<T: Float>(count: usize) -> T {
    // usize -> float conversion only rounds, it never fails
    num_traits::cast::<usize, T>(count).unwrap_or_else(T::infinity)
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::DimensionMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}
