use crate::error::{Error, Result};
use crate::kmeans::init::{check_counts, InitStrategy};

/// Default number of assign/update rounds.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// When the clustering loop is allowed to stop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Stopping {
    /// Always run the full iteration budget.
    #[default]
    FixedIterations,
    /// Stop early once no label changes between rounds, or once no centroid
    /// moves farther than `tolerance` in a round.
    Converged { tolerance: f64 },
}

impl Stopping {
    pub(crate) fn validate(&self) -> Result<()> {
        if let Stopping::Converged { tolerance } = *self {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(Error::InvalidArgument(format!(
                    "tolerance must be finite and non-negative, got {}",
                    tolerance
                )));
            }
        }
        Ok(())
    }
}

/// Configuration options for a clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansConfig {
    /// Number of clusters (palette size).
    pub k: usize,
    /// Number of assign/update rounds.
    pub max_iterations: usize,
    /// Seed for centroid initialization.
    pub seed: u64,
    /// How initial centroids are drawn.
    pub init: InitStrategy,
    /// Whether the loop may stop before `max_iterations`.
    pub stopping: Stopping,
}

impl KMeansConfig {
    /// Create a new config with default values for max_iterations (10), seed (0),
    /// sampling with replacement and no early stopping.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: 0,
            init: InitStrategy::default(),
            stopping: Stopping::default(),
        }
    }

    /// Customize the number of iterations.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Customize the initialization seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Customize the initialization strategy.
    pub fn with_init(mut self, init: InitStrategy) -> Self {
        self.init = init;
        self
    }

    /// Customize the stopping rule.
    pub fn with_stopping(mut self, stopping: Stopping) -> Self {
        self.stopping = stopping;
        self
    }

    /// Shorthand for `with_stopping(Stopping::Converged { tolerance })`.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.stopping = Stopping::Converged { tolerance };
        self
    }

    /// Checks the configuration against a dataset of `num_samples` samples.
    pub fn validate(&self, num_samples: usize) -> Result<()> {
        check_counts(num_samples, self.k)?;
        self.stopping.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = KMeansConfig::new(8);
        assert_eq!(config.k, 8);
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(config.seed, 0);
        assert_eq!(config.init, InitStrategy::WithReplacement);
        assert_eq!(config.stopping, Stopping::FixedIterations);
    }

    #[test]
    fn test_builder() {
        let config = KMeansConfig::new(4)
            .with_max_iterations(25)
            .with_seed(1234)
            .with_init(InitStrategy::WithoutReplacement)
            .with_tolerance(1e-3);
        assert_eq!(config.max_iterations, 25);
        assert_eq!(config.seed, 1234);
        assert_eq!(config.init, InitStrategy::WithoutReplacement);
        assert_eq!(config.stopping, Stopping::Converged { tolerance: 1e-3 });
        assert!(config.validate(4).is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(KMeansConfig::new(0).validate(10).is_err());
        assert!(KMeansConfig::new(11).validate(10).is_err());
        assert!(KMeansConfig::new(1).validate(0).is_err());
        assert!(KMeansConfig::new(10).validate(10).is_ok());
        assert!(KMeansConfig::new(2).with_tolerance(-1.0).validate(10).is_err());
        assert!(KMeansConfig::new(2)
            .with_tolerance(f64::NAN)
            .validate(10)
            .is_err());
        assert!(KMeansConfig::new(2).with_tolerance(0.0).validate(10).is_ok());
    }
}
