//! Genetic search configuration.

use serde::{Deserialize, Serialize};

use crate::error::{TspError, TspResult};

/// Smallest population whose surviving half still holds two parents.
pub const MIN_POPULATION: usize = 4;

/// Parameters of the genetic search.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::GeneticConfig;
///
/// let config = GeneticConfig::default()
///     .with_population_size(40)
///     .with_generations(200)
///     .with_mutation_rate(0.1)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert!(GeneticConfig::default().with_population_size(3).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    /// Individuals per generation. At least 4, so that the surviving half
    /// holds two parents.
    pub population_size: usize,
    /// Number of generations after the initial population.
    pub generations: usize,
    /// Probability in `[0, 1]` that an individual receives a swap mutation.
    pub mutation_rate: f64,
    /// Seed for the random generator used by [`GeneticSolver::solve`](super::GeneticSolver::solve).
    pub seed: u64,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 500,
            mutation_rate: 0.05,
            seed: 42,
        }
    }
}

impl GeneticConfig {
    /// Sets the number of individuals per generation.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the number of generations after the initial population.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the per-individual swap mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the seed used by [`GeneticSolver::solve`](super::GeneticSolver::solve).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Rejects parameters the search cannot run with.
    pub fn validate(&self) -> TspResult<()> {
        if self.population_size < MIN_POPULATION {
            return Err(TspError::invalid_config(format!(
                "population_size must be at least {MIN_POPULATION}, got {}",
                self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TspError::invalid_config(format!(
                "mutation_rate must lie in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}
