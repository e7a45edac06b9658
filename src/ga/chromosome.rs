//! Permutation chromosome for the TSP genetic search.
//!
//! A chromosome is a visiting order over every point index. Its fitness is
//! the closed tour length, so lower is better.

use u_metaheur::ga::Individual;

/// A candidate tour: a permutation of `0..n` plus its cached fitness.
///
/// Freshly built chromosomes carry `f64::INFINITY` until evaluated.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::TourChromosome;
/// use u_metaheur::ga::Individual;
///
/// let c = TourChromosome::new(vec![2, 0, 1]);
/// assert_eq!(c.cities(), &[2, 0, 1]);
/// assert_eq!(c.fitness(), f64::INFINITY);
/// ```
#[derive(Debug, Clone)]
pub struct TourChromosome {
    cities: Vec<usize>,
    fitness: f64,
}

impl TourChromosome {
    /// Wraps a permutation as an unevaluated chromosome.
    pub fn new(cities: Vec<usize>) -> Self {
        Self {
            cities,
            fitness: f64::INFINITY,
        }
    }

    /// Visiting order.
    pub fn cities(&self) -> &[usize] {
        &self.cities
    }

    /// Mutable visiting order, for in-place mutation operators.
    pub fn cities_mut(&mut self) -> &mut [usize] {
        &mut self.cities
    }

    /// Returns the number of cities in this chromosome.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns true if the chromosome has no cities.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl Individual for TourChromosome {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}
