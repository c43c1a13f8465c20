//! Error types shared by every clustering entry point.

use thiserror::Error;

/// Errors reported before any clustering work begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A scalar parameter is outside its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A buffer does not have the length implied by the other arguments.
    #[error("{what} has length {actual}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A label does not refer to an existing centroid.
    #[error("label {label} at sample {index} is out of range for {num_centroids} centroids")]
    LabelOutOfRange {
        index: usize,
        label: usize,
        num_centroids: usize,
    },
}

/// Result type for clustering operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::InvalidArgument("num_centroids must be > 0".to_string());
        assert_eq!(err.to_string(), "invalid argument: num_centroids must be > 0");

        let err = Error::DimensionMismatch {
            what: "labels",
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.to_string(), "labels has length 3, expected 4");
    }
}
