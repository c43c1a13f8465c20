//! Working with a finished clustering: posterized output, cluster sizes,
//! inertia, and pixel matrices from `ndarray`.

use crate::error::{Error, Result};
use crate::kmeans::config::KMeansConfig;
use crate::kmeans::distance::{squared_distance, CHANNELS};
use crate::kmeans::init::{centroid_count, sample_count};
use crate::kmeans::lloyd::{Clustering, KMeans};
use ndarray::ArrayView2;
use num_traits::Float;

/// Replaces every sample with the color of its centroid.
///
/// # Example
///
/// ```
/// use colorquant::remap;
///
/// let pixels = [0.0f32, 0.0, 0.0, 1.0, 1.0, 1.0];
/// let palette = [0.5f32, 0.5, 0.5];
/// let out = remap(&pixels, &palette, &[0, 0]).unwrap();
/// assert_eq!(out, vec![0.5; 6]);
/// ```
pub fn remap<T: Float>(samples: &[T], centroids: &[T], labels: &[usize]) -> Result<Vec<T>> {
    check_labels(samples, centroids, labels)?;

    let mut out = Vec::with_capacity(samples.len());
    for &label in labels {
        out.extend_from_slice(&centroids[label * CHANNELS..(label + 1) * CHANNELS]);
    }
    Ok(out)
}

/// Number of samples assigned to each of `num_centroids` clusters. Labels
/// outside `[0, num_centroids)` are not counted.
pub fn cluster_sizes(labels: &[usize], num_centroids: usize) -> Vec<usize> {
    let mut sizes = vec![0; num_centroids];
    for &label in labels {
        if label < num_centroids {
            sizes[label] += 1;
        }
    }
    sizes
}

/// Sum of squared distances from each sample to its assigned centroid.
pub fn inertia<T: Float>(samples: &[T], centroids: &[T], labels: &[usize]) -> Result<T> {
    check_labels(samples, centroids, labels)?;
    Ok(samples
        .chunks_exact(CHANNELS)
        .zip(labels)
        .fold(T::zero(), |acc, (sample, &label)| {
            acc + squared_distance(sample, &centroids[label * CHANNELS..(label + 1) * CHANNELS])
        }))
}

/// Clusters an `(n, 3)` pixel matrix, one row per pixel.
pub fn fit_pixels<T>(pixels: ArrayView2<'_, T>, config: &KMeansConfig) -> Result<Clustering<T>>
where
    T: Float + Send + Sync,
{
    if pixels.ncols() != CHANNELS {
        return Err(Error::DimensionMismatch {
            what: "pixel columns",
            expected: CHANNELS,
            actual: pixels.ncols(),
        });
    }

    let kmeans = KMeans::new(config.clone());
    match pixels.as_slice() {
        Some(flat) => kmeans.fit(flat),
        None => {
            let flat: Vec<T> = pixels.iter().copied().collect();
            kmeans.fit(&flat)
        }
    }
}

/// Checks buffer shapes and that every label names a centroid.
fn check_labels<T>(samples: &[T], centroids: &[T], labels: &[usize]) -> Result<()> {
    let num_samples = sample_count(samples)?;
    let k = centroid_count(centroids)?;
    if labels.len() != num_samples {
        return Err(Error::DimensionMismatch {
            what: "labels",
            expected: num_samples,
            actual: labels.len(),
        });
    }
    if let Some((index, &label)) = labels.iter().enumerate().find(|&(_, &l)| l >= k) {
        return Err(Error::LabelOutOfRange {
            index,
            label,
            num_centroids: k,
        });
    }
    Ok(())
}
