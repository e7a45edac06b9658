//! Hamiltonian shortcutting of an Eulerian walk.

use crate::distance::DistanceMatrix;
use crate::error::{TspError, TspResult};
use crate::models::Tour;

/// Turns a closed walk into a tour by keeping only the first visit to each
/// vertex. Under the triangle inequality, skipping never lengthens the walk.
///
/// Fails with [`TspError::IncompleteTour`] if the walk misses a vertex of
/// `distances`.
///
/// # Examples
///
/// ```
/// use u_tsp::christofides::shortcut;
/// use u_tsp::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
/// let tour = shortcut(&[0, 1, 2, 1, 0], &dm).unwrap();
/// assert_eq!(tour.order(), &[0, 1, 2]);
/// assert!((tour.length() - 4.0).abs() < 1e-10);
/// ```
pub fn shortcut(walk: &[usize], distances: &DistanceMatrix) -> TspResult<Tour> {
    let n = distances.size();
    let mut seen = vec![false; n];
    let mut order = Vec::with_capacity(n);
    for &v in walk {
        if v >= n {
            return Err(TspError::invariant(format!(
                "walk vertex {v} out of range for {n} points"
            )));
        }
        if !seen[v] {
            seen[v] = true;
            order.push(v);
        }
    }
    if order.len() != n {
        return Err(TspError::IncompleteTour {
            visited: order.len(),
            expected: n,
        });
    }
    Ok(Tour::from_order(order, distances))
}
