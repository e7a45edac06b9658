//! Point identifiers.

use serde::{Deserialize, Serialize};

/// A location in a TSP instance.
///
/// The index addresses a row/column of the
/// [`DistanceMatrix`](crate::distance::DistanceMatrix); the label is for
/// callers only and carries no behavior.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
///
/// let p = Point::labeled(3, "Lyon");
/// assert_eq!(p.index(), 3);
/// assert_eq!(p.label(), Some("Lyon"));
/// assert_eq!(Point::new(0).label(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    index: usize,
    label: Option<String>,
}

impl Point {
    /// Creates an unlabeled point.
    pub fn new(index: usize) -> Self {
        Self { index, label: None }
    }

    /// Creates a point with a display label.
    pub fn labeled(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: Some(label.into()),
        }
    }

    /// Matrix index of this point.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Optional display label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
