//! Side-by-side run of both engines on one matrix.

use serde::{Deserialize, Serialize};

use crate::christofides::{ChristofidesConfig, ChristofidesSolver};
use crate::distance::DistanceMatrix;
use crate::error::TspResult;
use crate::ga::{GaResult, GeneticConfig, GeneticSolver};
use crate::models::Tour;

/// Tours produced by both engines for the same matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Tour from the Christofides engine.
    pub christofides: Tour,
    /// Outcome of the genetic search.
    pub genetic: GaResult,
}

impl Comparison {
    /// The shorter of the two tours. Ties go to Christofides.
    pub fn best(&self) -> &Tour {
        if self.genetic.best.length() < self.christofides.length() {
            &self.genetic.best
        } else {
            &self.christofides
        }
    }

    /// Relative difference `(genetic - christofides) / christofides`.
    ///
    /// Negative when the genetic search found the shorter tour.
    pub fn gap(&self) -> f64 {
        let base = self.christofides.length();
        if base == 0.0 {
            return 0.0;
        }
        (self.genetic.best.length() - base) / base
    }
}

/// Runs both engines concurrently, sharing only `distances`.
///
/// The genetic configuration is checked before either engine starts.
///
/// # Examples
///
/// ```
/// use u_tsp::christofides::ChristofidesConfig;
/// use u_tsp::compare::compare;
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::ga::GeneticConfig;
///
/// let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// let ga = GeneticConfig::default().with_population_size(20).with_generations(30);
/// let cmp = compare(&dm, &ChristofidesConfig::default(), &ga).unwrap();
/// assert!((cmp.best().length() - 4.0).abs() < 1e-10);
/// ```
pub fn compare(
    distances: &DistanceMatrix,
    christofides: &ChristofidesConfig,
    genetic: &GeneticConfig,
) -> TspResult<Comparison> {
    genetic.validate()?;
    let christofides_solver = ChristofidesSolver::new(christofides.clone());
    let genetic_solver = GeneticSolver::new(genetic.clone());

    let (christofides, genetic) = rayon::join(
        || christofides_solver.solve(distances),
        || genetic_solver.solve(distances),
    );
    let comparison = Comparison {
        christofides: christofides?,
        genetic: genetic?,
    };
    log::info!(
        "compare: christofides={:.3} genetic={:.3} gap={:+.4}",
        comparison.christofides.length(),
        comparison.genetic.best_fitness,
        comparison.gap()
    );
    Ok(comparison)
}
