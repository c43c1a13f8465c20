//! k-means color quantization.
//!
//! Samples and centroids are flat, channel-interleaved buffers: sample `i`
//! occupies indices `3i`, `3i + 1` and `3i + 2`. Clustering runs Lloyd's
//! algorithm for a fixed number of rounds:
//!
//! 1. seed centroids by copying randomly chosen samples
//! 2. label every sample with its nearest centroid (squared Euclidean distance)
//! 3. move every centroid to the mean of its samples; a centroid with no
//!    samples stays where it was
//!
//! Steps 2 and 3 repeat `max_iters` times. Early stopping is available through
//! [`Stopping::Converged`] but never happens by default.
//!
//! # Examples
//!
//! ```rust
//! use colorquant::kmeans_clustering;
//!
//! let pixels = [
//!     0.0f32, 0.0, 0.0,
//!     1.0, 1.0, 1.0,
//!     10.0, 10.0, 10.0,
//!     11.0, 11.0, 11.0,
//! ];
//! let mut palette = [0.0f32; 6];
//! let mut labels = [0usize; 4];
//!
//! kmeans_clustering(&pixels, 2, 10, 42, &mut palette, &mut labels).unwrap();
//! assert!(labels.iter().all(|&l| l < 2));
//! ```

pub mod config;
pub mod distance;
pub mod init;
pub mod lloyd;
pub mod palette;

// Re-export public types and functions
pub use config::{KMeansConfig, Stopping};
pub use distance::{nearest_centroid, squared_distance, CHANNELS};
pub use init::{initialize_centroids, initialize_centroids_with_rng, seeded_rng, InitStrategy};
pub use lloyd::{kmeans_clustering, refine, Clustering, KMeans, RunStats};
pub use palette::{cluster_sizes, fit_pixels, inertia, remap};
