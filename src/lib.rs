pub mod error;
pub mod kmeans;

pub use error::{Error, Result};
pub use kmeans::*;
