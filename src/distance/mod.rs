//! Distance matrices.
//!
//! Provides the dense distance matrix both engines consume, plus Euclidean
//! and great-circle builders for callers that start from coordinates.

mod matrix;

pub use matrix::{DistanceMatrix, DEFAULT_SYMMETRY_TOLERANCE, EARTH_RADIUS_KM};
