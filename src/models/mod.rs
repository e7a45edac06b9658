//! Domain model types.
//!
//! Points are opaque matrix indices with an optional label; tours are the
//! terminal output of both engines.

mod point;
mod tour;

pub use point::Point;
pub use tour::Tour;
