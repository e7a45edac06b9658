//! GA problem definition for the symmetric TSP.
//!
//! Implements the [`GaProblem`](u_metaheur::ga::GaProblem) trait over a
//! distance matrix, so the same operators drive both the truncation loop in
//! [`GeneticSolver`](super::GeneticSolver) and the generic
//! [`GaRunner`](u_metaheur::ga::GaRunner).
//!
//! # Operators
//!
//! - **Crossover**: order crossover (OX), one child per parent pair
//! - **Mutation**: swap of two distinct positions
//! - **Evaluation**: closed tour length

use rand::Rng;
use u_metaheur::ga::GaProblem;

use crate::distance::DistanceMatrix;

use super::chromosome::TourChromosome;
use super::operators::{order_crossover, random_permutation, swap_mutation};

/// GA problem for the symmetric TSP over every point of a distance matrix.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::ga::{TourChromosome, TspGaProblem};
/// use u_metaheur::ga::GaProblem;
///
/// let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// let problem = TspGaProblem::new(&dm);
/// let fitness = problem.evaluate(&TourChromosome::new(vec![0, 1, 2, 3]));
/// assert!((fitness - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TspGaProblem<'a> {
    distances: &'a DistanceMatrix,
}

impl<'a> TspGaProblem<'a> {
    /// Creates a problem that borrows `distances` for its lifetime.
    pub fn new(distances: &'a DistanceMatrix) -> Self {
        Self { distances }
    }

    /// Number of cities in every chromosome.
    pub fn num_cities(&self) -> usize {
        self.distances.size()
    }

    /// Returns the borrowed distance matrix.
    pub fn distances(&self) -> &'a DistanceMatrix {
        self.distances
    }
}

impl GaProblem for TspGaProblem<'_> {
    type Individual = TourChromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> TourChromosome {
        TourChromosome::new(random_permutation(self.num_cities(), rng))
    }

    fn evaluate(&self, individual: &TourChromosome) -> f64 {
        self.distances.tour_length(individual.cities())
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &TourChromosome,
        parent2: &TourChromosome,
        rng: &mut R,
    ) -> Vec<TourChromosome> {
        let child = order_crossover(parent1.cities(), parent2.cities(), rng);
        vec![TourChromosome::new(child)]
    }

    fn mutate<R: Rng>(&self, individual: &mut TourChromosome, rng: &mut R) {
        swap_mutation(individual.cities_mut(), rng);
    }
}
