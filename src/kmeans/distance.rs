//! Dissimilarity between a sample and a centroid.

use num_traits::Float;

/// Number of channels in a sample or centroid.
pub const CHANNELS: usize = 3;

/// Squared Euclidean distance between two color triples.
///
/// The square root is skipped: the squared value orders candidates the same
/// way and this sits on the innermost loop of every assignment phase.
#[inline]
pub fn squared_distance<T: Float>(a: &[T], b: &[T]) -> T {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}

/// Returns the index of the centroid closest to `sample` and its squared distance.
///
/// `centroids` is a flat, channel-interleaved buffer. Only a strictly smaller
/// distance replaces the current best, so ties go to the lowest index. An
/// empty buffer yields `(0, T::infinity())`.
pub fn nearest_centroid<T: Float>(sample: &[T], centroids: &[T]) -> (usize, T) {
    let mut best_idx = 0;
    let mut best_dist = T::infinity();
    for (j, centroid) in centroids.chunks_exact(CHANNELS).enumerate() {
        let dist = squared_distance(sample, centroid);
        if dist < best_dist {
            best_dist = dist;
            best_idx = j;
        }
    }
    (best_idx, best_dist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_squared_distance() {
        let a = [1.0f32, 2.0, 3.0];
        let b = [4.0f32, 6.0, 3.0];
        assert_relative_eq!(squared_distance(&a, &b), 25.0);
        assert_relative_eq!(squared_distance(&b, &a), 25.0);
        assert_eq!(squared_distance(&a, &a), 0.0);
    }

    #[test]
    fn test_squared_distance_ignores_trailing_values() {
        let a = [0.0f64, 0.0, 0.0, 100.0];
        let b = [1.0f64, 1.0, 1.0, -100.0];
        assert_relative_eq!(squared_distance(&a, &b), 3.0);
    }

    #[test]
    fn test_nearest_centroid() {
        let centroids = [0.0f32, 0.0, 0.0, 10.0, 10.0, 10.0, 20.0, 20.0, 20.0];
        assert_eq!(nearest_centroid(&[9.0, 11.0, 10.0], &centroids).0, 1);
        assert_eq!(nearest_centroid(&[-3.0, 0.0, 1.0], &centroids).0, 0);

        let (idx, dist) = nearest_centroid(&[25.0, 20.0, 20.0], &centroids);
        assert_eq!(idx, 2);
        assert_relative_eq!(dist, 25.0);
    }

    #[test]
    fn test_nearest_centroid_tie_goes_to_lowest_index() {
        // (5,5,5) is equidistant from both centroids.
        let centroids = [0.0f64, 0.0, 0.0, 10.0, 10.0, 10.0];
        assert_eq!(nearest_centroid(&[5.0, 5.0, 5.0], &centroids).0, 0);

        let duplicated = [3.0f64, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0];
        assert_eq!(nearest_centroid(&[1.0, 2.0, 3.0], &duplicated).0, 0);
    }
}
