//! Closed tour type returned by both engines.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;

/// A closed tour: every point index exactly once, with an implicit edge from
/// the last point back to the first.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::models::Tour;
///
/// let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// let tour = Tour::from_order(vec![0, 1, 2, 3], &dm);
/// assert!((tour.length() - 4.0).abs() < 1e-10);
/// assert_eq!(tour.closed_order(), vec![0, 1, 2, 3, 0]);
/// assert!(tour.is_permutation_of(4));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    order: Vec<usize>,
    length: f64,
}

impl Tour {
    /// Wraps a visiting order whose length is already known.
    pub fn new(order: Vec<usize>, length: f64) -> Self {
        Self { order, length }
    }

    /// Builds a tour and computes its closed length from the matrix.
    pub fn from_order(order: Vec<usize>, distances: &DistanceMatrix) -> Self {
        let length = distances.tour_length(&order);
        Self { order, length }
    }

    /// Visiting order, without the closing return.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Consumes the tour and returns the visiting order.
    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    /// Total closed length, including the return edge.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Number of points visited.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the tour visits no points.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Visiting order with the start point appended to close the cycle.
    pub fn closed_order(&self) -> Vec<usize> {
        let mut closed = self.order.clone();
        if let Some(&first) = self.order.first() {
            closed.push(first);
        }
        closed
    }

    /// Rotates the cycle so it begins at `start`. The length is unchanged.
    ///
    /// Leaves the tour untouched if `start` is not visited.
    pub fn rotated_to(mut self, start: usize) -> Self {
        if let Some(pos) = self.order.iter().position(|&c| c == start) {
            self.order.rotate_left(pos);
        }
        self
    }

    /// Returns `true` if the order is a permutation of `0..n`.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.order.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &city in &self.order {
            if city >= n || seen[city] {
                return false;
            }
            seen[city] = true;
        }
        true
    }
}
