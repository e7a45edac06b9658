//! Christofides 1.5-approximation for the metric TSP.
//!
//! # Algorithm
//!
//! 1. Build the complete weighted graph from the distance matrix.
//! 2. Compute a minimum spanning tree `T`.
//! 3. Pair the odd-degree vertices of `T` with a minimum-weight perfect
//!    matching `M`.
//! 4. Find an Eulerian circuit in the multigraph `T ∪ M`.
//! 5. Shortcut repeated vertices to obtain a Hamiltonian cycle.
//!
//! With [`MatchingStrategy::Exact`] the tour is at most 1.5× optimal when the
//! distances satisfy the triangle inequality.
//!
//! # Complexity
//!
//! O(n³), dominated by the blossom matching on up to n odd vertices.
//!
//! # Reference
//!
//! Christofides, N. (1976). "Worst-case analysis of a new heuristic for the
//! travelling salesman problem", Report 388, GSIA, Carnegie Mellon University.

mod blossom;
mod euler;
mod matching;
mod shortcut;

pub use euler::EulerianMultigraph;
pub use matching::{min_weight_perfect_matching, odd_degree_vertices, Matching, MatchingStrategy};
pub use shortcut::shortcut;

use serde::{Deserialize, Serialize};

use crate::cancel::CancelFlag;
use crate::distance::{DistanceMatrix, DEFAULT_SYMMETRY_TOLERANCE};
use crate::error::TspResult;
use crate::graph::{minimum_spanning_tree, WeightedGraph};
use crate::models::Tour;

/// Configuration for [`ChristofidesSolver`].
///
/// # Examples
///
/// ```
/// use u_tsp::christofides::{ChristofidesConfig, MatchingStrategy};
///
/// let config = ChristofidesConfig::default()
///     .with_symmetry_tolerance(1e-6)
///     .with_matching(MatchingStrategy::Greedy);
/// assert_eq!(config.matching, MatchingStrategy::Greedy);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChristofidesConfig {
    /// Largest tolerated `|d(i,j) - d(j,i)|` and diagonal value.
    pub symmetry_tolerance: f64,
    /// How odd-degree vertices are paired.
    pub matching: MatchingStrategy,
}

impl Default for ChristofidesConfig {
    fn default() -> Self {
        Self {
            symmetry_tolerance: DEFAULT_SYMMETRY_TOLERANCE,
            matching: MatchingStrategy::Exact,
        }
    }
}

impl ChristofidesConfig {
    /// Sets the symmetry tolerance.
    pub fn with_symmetry_tolerance(mut self, tol: f64) -> Self {
        self.symmetry_tolerance = tol;
        self
    }

    /// Sets the matching strategy.
    pub fn with_matching(mut self, strategy: MatchingStrategy) -> Self {
        self.matching = strategy;
        self
    }
}

/// Deterministic Christofides tour construction.
///
/// # Examples
///
/// ```
/// use u_tsp::christofides::{ChristofidesConfig, ChristofidesSolver};
/// use u_tsp::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// let tour = ChristofidesSolver::new(ChristofidesConfig::default()).solve(&dm).unwrap();
/// assert!(tour.is_permutation_of(4));
/// assert!((tour.length() - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChristofidesSolver {
    config: ChristofidesConfig,
    cancel: CancelFlag,
}

impl ChristofidesSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: ChristofidesConfig) -> Self {
        Self {
            config,
            cancel: CancelFlag::new(),
        }
    }

    /// Uses `cancel` to abort a running solve from another thread.
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ChristofidesConfig {
        &self.config
    }

    /// Builds a tour over every point of `distances`.
    ///
    /// The tour starts at point 0. Fails with
    /// [`TspError::InvalidInput`](crate::error::TspError::InvalidInput) on a
    /// malformed matrix and with
    /// [`TspError::Cancelled`](crate::error::TspError::Cancelled) if the
    /// flag is raised mid-run.
    pub fn solve(&self, distances: &DistanceMatrix) -> TspResult<Tour> {
        let n = distances.size();
        log::debug!("christofides: start n={n} matching={:?}", self.config.matching);

        let graph = WeightedGraph::from_matrix(distances, self.config.symmetry_tolerance)?;
        let tree = minimum_spanning_tree(&graph, &self.cancel)?;
        let odd = odd_degree_vertices(&tree)?;
        log::debug!(
            "christofides: mst weight={:.3} odd={}",
            tree.total_weight(),
            odd.len()
        );

        let matching =
            min_weight_perfect_matching(&graph, &odd, self.config.matching, &self.cancel)?;
        log::debug!(
            "christofides: matching pairs={} weight={:.3}",
            matching.len(),
            matching.total_weight(&graph)
        );

        let multigraph = EulerianMultigraph::new(&tree, &matching)?;
        let walk = multigraph.eulerian_circuit(0)?;
        let tour = shortcut(&walk, distances)?;

        log::info!(
            "christofides: done n={n} walk={} length={:.3}",
            walk.len(),
            tour.length()
        );
        Ok(tour)
    }
}

/// Runs [`ChristofidesSolver`] with the default configuration.
///
/// # Examples
///
/// ```
/// use u_tsp::christofides::christofides;
/// use u_tsp::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_data(2, vec![0.0, 3.0, 3.0, 0.0]).unwrap();
/// let tour = christofides(&dm).unwrap();
/// assert_eq!(tour.order(), &[0, 1]);
/// assert!((tour.length() - 6.0).abs() < 1e-10);
/// ```
pub fn christofides(distances: &DistanceMatrix) -> TspResult<Tour> {
    ChristofidesSolver::default().solve(distances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TspError;
    use rand::Rng;

    fn random_points(n: usize, seed: u64) -> Vec<(f64, f64)> {
        let mut rng = u_numflow::random::create_rng(seed);
        (0..n)
            .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect()
    }

    /// Optimal closed tour length by enumerating permutations with 0 fixed.
    fn brute_force_optimum(dm: &DistanceMatrix) -> f64 {
        fn permute(rest: &mut Vec<usize>, k: usize, dm: &DistanceMatrix, best: &mut f64) {
            if k == rest.len() {
                let mut order = vec![0];
                order.extend_from_slice(rest);
                *best = best.min(dm.tour_length(&order));
                return;
            }
            for i in k..rest.len() {
                rest.swap(k, i);
                permute(rest, k + 1, dm, best);
                rest.swap(k, i);
            }
        }
        let mut rest: Vec<usize> = (1..dm.size()).collect();
        let mut best = f64::INFINITY;
        permute(&mut rest, 0, dm, &mut best);
        best
    }

    #[test]
    fn test_unit_square() {
        let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let tour = christofides(&dm).expect("valid");
        assert_eq!(tour.order(), &[0, 1, 2, 3]);
        assert!((tour.length() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_two_points() {
        let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (3.0, 4.0)]);
        let tour = christofides(&dm).expect("valid");
        assert_eq!(tour.order(), &[0, 1]);
        assert!((tour.length() - 10.0).abs() < 1e-10);
        assert_eq!(tour.closed_order(), vec![0, 1, 0]);
    }

    #[test]
    fn test_three_points() {
        let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
        let tour = christofides(&dm).expect("valid");
        assert!(tour.is_permutation_of(3));
        assert!((tour.length() - 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_within_approximation_bound() {
        for n in 3..=8 {
            for seed in 0..4 {
                let dm = DistanceMatrix::from_euclidean(&random_points(n, seed * 17 + n as u64));
                let tour = christofides(&dm).expect("valid");
                assert!(tour.is_permutation_of(n));
                assert_eq!(tour.order()[0], 0);
                assert!((tour.length() - dm.tour_length(tour.order())).abs() < 1e-9);
                let opt = brute_force_optimum(&dm);
                assert!(
                    tour.length() <= 1.5 * opt + 1e-9,
                    "n={n} seed={seed}: {} > 1.5 * {opt}",
                    tour.length()
                );
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let dm = DistanceMatrix::from_euclidean(&random_points(30, 5));
        let a = christofides(&dm).expect("valid");
        let b = christofides(&dm).expect("valid");
        assert_eq!(a, b);
    }

    #[test]
    fn test_greedy_matching_still_valid() {
        let dm = DistanceMatrix::from_euclidean(&random_points(25, 9));
        let solver =
            ChristofidesSolver::new(ChristofidesConfig::default().with_matching(MatchingStrategy::Greedy));
        let tour = solver.solve(&dm).expect("valid");
        assert!(tour.is_permutation_of(25));
    }

    #[test]
    fn test_haversine_input() {
        // Paris, Lyon, Marseille, Bordeaux
        let dm = DistanceMatrix::from_haversine(&[
            (48.8566, 2.3522),
            (45.7640, 4.8357),
            (43.2965, 5.3698),
            (44.8378, -0.5792),
        ]);
        let tour = christofides(&dm).expect("valid");
        assert!(tour.is_permutation_of(4));
        assert!(tour.length() > 0.0);
    }

    #[test]
    fn test_rejects_invalid_matrix() {
        let single = DistanceMatrix::new(1);
        assert!(matches!(christofides(&single), Err(TspError::InvalidInput(_))));

        let asymmetric = DistanceMatrix::from_data(2, vec![0.0, 1.0, 2.0, 0.0]).expect("2x2");
        assert!(matches!(christofides(&asymmetric), Err(TspError::InvalidInput(_))));

        let negative = DistanceMatrix::from_data(2, vec![0.0, -1.0, -1.0, 0.0]).expect("2x2");
        assert!(matches!(christofides(&negative), Err(TspError::InvalidInput(_))));
    }

    #[test]
    fn test_tolerance_admits_rounding() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 1.0, 1.0 + 1e-7, 0.0]).expect("2x2");
        assert!(christofides(&dm).is_err());
        let solver =
            ChristofidesSolver::new(ChristofidesConfig::default().with_symmetry_tolerance(1e-6));
        assert!(solver.solve(&dm).is_ok());
    }

    #[test]
    fn test_cancelled() {
        let dm = DistanceMatrix::from_euclidean(&random_points(10, 1));
        let cancel = CancelFlag::new();
        cancel.cancel();
        let solver = ChristofidesSolver::default().with_cancel_flag(cancel);
        assert_eq!(
            solver.solve(&dm).unwrap_err(),
            TspError::Cancelled("spanning tree")
        );
    }

    #[test]
    fn test_config_from_json() {
        let config: ChristofidesConfig =
            serde_json::from_str(r#"{"matching":"greedy"}"#).expect("deserialize");
        assert_eq!(config.matching, MatchingStrategy::Greedy);
        assert_eq!(config.symmetry_tolerance, DEFAULT_SYMMETRY_TOLERANCE);
    }
}
