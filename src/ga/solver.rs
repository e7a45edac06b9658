//! Generational loop of the genetic search.
//!
//! Each [`Generation`] is an immutable, fitness-sorted snapshot. The next
//! one is built from it by:
//!
//! 1. **Selection**: keep the best `population_size / 2` (truncation).
//! 2. **Crossover**: refill with OX children of parents drawn uniformly,
//!    with replacement, from the survivors.
//! 3. **Mutation**: every individual except the elite swaps two cities with
//!    probability `mutation_rate`.
//! 4. **Evaluation**: fitness in parallel, then a stable sort.
//!
//! The elite is never mutated, so the best fitness never increases from one
//! generation to the next.

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use u_metaheur::ga::{GaProblem, Individual};

use crate::cancel::CancelFlag;
use crate::distance::{DistanceMatrix, DEFAULT_SYMMETRY_TOLERANCE};
use crate::error::{TspError, TspResult};
use crate::models::Tour;

use super::chromosome::TourChromosome;
use super::config::{GeneticConfig, MIN_POPULATION};
use super::problem::TspGaProblem;

/// One population snapshot, sorted by ascending fitness.
#[derive(Debug, Clone)]
pub struct Generation {
    index: usize,
    individuals: Vec<TourChromosome>,
}

impl Generation {
    /// Random initial population, evaluated and sorted.
    ///
    /// Fails with [`TspError::InvalidConfig`] if `size < 4`; the surviving
    /// half must hold at least two parents.
    pub fn initial<R: Rng>(problem: &TspGaProblem<'_>, size: usize, rng: &mut R) -> TspResult<Self> {
        if size < MIN_POPULATION {
            return Err(TspError::invalid_config(format!(
                "population size must be at least {MIN_POPULATION}, got {size}"
            )));
        }
        let mut individuals: Vec<TourChromosome> =
            (0..size).map(|_| problem.create_individual(rng)).collect();
        evaluate(problem, &mut individuals);
        Ok(Self {
            index: 0,
            individuals,
        })
    }

    /// Builds the following generation. `self` is left untouched.
    ///
    /// The population size is carried over from `self`, which
    /// [`initial`](Self::initial) guarantees is at least 4.
    pub fn next<R: Rng>(&self, problem: &TspGaProblem<'_>, mutation_rate: f64, rng: &mut R) -> Self {
        let size = self.individuals.len();
        let survivors = size / 2;

        let mut individuals: Vec<TourChromosome> = self.individuals[..survivors].to_vec();
        while individuals.len() < size {
            let p1 = &self.individuals[rng.random_range(0..survivors as u64) as usize];
            let p2 = &self.individuals[rng.random_range(0..survivors as u64) as usize];
            individuals.extend(problem.crossover(p1, p2, rng));
        }
        individuals.truncate(size);

        for ind in individuals.iter_mut().skip(1) {
            if rng.random_bool(mutation_rate) {
                problem.mutate(ind, rng);
            }
        }

        evaluate(problem, &mut individuals);
        Self {
            index: self.index + 1,
            individuals,
        }
    }

    /// 0 for the initial population.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Individuals, best first.
    pub fn individuals(&self) -> &[TourChromosome] {
        &self.individuals
    }

    /// Fittest individual, if the population is not empty.
    pub fn best(&self) -> Option<&TourChromosome> {
        self.individuals.first()
    }

    fn best_fitness(&self) -> f64 {
        self.best().map_or(f64::INFINITY, |b| b.fitness())
    }
}

fn evaluate(problem: &TspGaProblem<'_>, individuals: &mut [TourChromosome]) {
    individuals
        .par_iter_mut()
        .for_each(|ind| ind.set_fitness(problem.evaluate(ind)));
    individuals.sort_by(|a, b| a.fitness().total_cmp(&b.fitness()));
}

/// Outcome of a genetic search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaResult {
    /// Best tour found, rotated to start at point 0.
    pub best: Tour,
    /// Length of `best`.
    pub best_fitness: f64,
    /// Generations run after the initial population.
    pub generations: usize,
    /// Best fitness of each generation, starting with the initial population.
    pub history: Vec<f64>,
}

/// Genetic search over closed tours.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::ga::{GeneticConfig, GeneticSolver};
///
/// let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// let config = GeneticConfig::default().with_population_size(20).with_generations(50);
/// let result = GeneticSolver::new(config).solve(&dm).unwrap();
/// assert!((result.best_fitness - 4.0).abs() < 1e-10);
/// assert_eq!(result.history.len(), 51);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GeneticSolver {
    config: GeneticConfig,
    cancel: CancelFlag,
}

impl GeneticSolver {
    /// Creates a solver with the given configuration.
    ///
    /// The configuration is validated when a solve starts.
    pub fn new(config: GeneticConfig) -> Self {
        Self {
            config,
            cancel: CancelFlag::new(),
        }
    }

    /// Uses `cancel` to abort a running search from another thread.
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// Runs the search with a generator seeded from the configuration.
    pub fn solve(&self, distances: &DistanceMatrix) -> TspResult<GaResult> {
        let mut rng = u_numflow::random::create_rng(self.config.seed);
        self.solve_with_rng(distances, &mut rng)
    }

    /// Runs the search drawing all randomness from `rng`.
    ///
    /// Configuration problems, including fewer than two points, are reported
    /// as [`TspError::InvalidConfig`] before any generation runs.
    pub fn solve_with_rng<R: Rng>(&self, distances: &DistanceMatrix, rng: &mut R) -> TspResult<GaResult> {
        self.config.validate()?;
        let n = distances.size();
        if n < 2 {
            return Err(TspError::invalid_config(format!(
                "genetic search needs at least 2 points, got {n}"
            )));
        }
        distances.validate(DEFAULT_SYMMETRY_TOLERANCE)?;

        log::debug!(
            "genetic: start n={n} population={} generations={} mutation_rate={}",
            self.config.population_size,
            self.config.generations,
            self.config.mutation_rate
        );

        let problem = TspGaProblem::new(distances);
        let mut generation = Generation::initial(&problem, self.config.population_size, rng)?;
        let mut history = Vec::with_capacity(self.config.generations + 1);
        history.push(generation.best_fitness());

        for _ in 0..self.config.generations {
            self.cancel.check("generation")?;
            generation = generation.next(&problem, self.config.mutation_rate, rng);
            let best = generation.best_fitness();
            log::trace!("genetic: generation={} best={best:.3}", generation.index());
            history.push(best);
        }

        let best = generation
            .best()
            .ok_or_else(|| TspError::invariant("empty population"))?;
        let tour = Tour::new(best.cities().to_vec(), best.fitness()).rotated_to(0);

        log::info!(
            "genetic: done n={n} generations={} length={:.3}",
            generation.index(),
            tour.length()
        );
        Ok(GaResult {
            best_fitness: tour.length(),
            best: tour,
            generations: generation.index(),
            history,
        })
    }
}

/// Runs [`GeneticSolver`] with `config`.
pub fn genetic(distances: &DistanceMatrix, config: GeneticConfig) -> TspResult<GaResult> {
    GeneticSolver::new(config).solve(distances)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> DistanceMatrix {
        DistanceMatrix::from_euclidean(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    fn circle(n: usize) -> DistanceMatrix {
        let points: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let t = std::f64::consts::TAU * i as f64 / n as f64;
                (t.cos() * 10.0, t.sin() * 10.0)
            })
            .collect();
        DistanceMatrix::from_euclidean(&points)
    }

    fn small() -> GeneticConfig {
        GeneticConfig::default()
            .with_population_size(20)
            .with_generations(60)
    }

    #[test]
    fn test_unit_square() {
        let result = genetic(&square(), small()).expect("valid");
        assert!(result.best.is_permutation_of(4));
        assert!((result.best_fitness - 4.0).abs() < 1e-10);
        assert_eq!(result.best.order()[0], 0);
        assert_eq!(result.generations, 60);
    }

    #[test]
    fn test_triangle_converges() {
        let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
        let result = genetic(&dm, small()).expect("valid");
        assert!((result.best_fitness - 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_two_points() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 2.5, 2.5, 0.0]).expect("2x2");
        let result = genetic(&dm, small()).expect("valid");
        assert_eq!(result.best.order(), &[0, 1]);
        assert!((result.best_fitness - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_history_non_increasing() {
        let config = GeneticConfig::default()
            .with_population_size(30)
            .with_generations(100)
            .with_mutation_rate(0.3);
        let result = genetic(&circle(15), config).expect("valid");
        assert_eq!(result.history.len(), 101);
        for w in result.history.windows(2) {
            assert!(w[1] <= w[0], "best fitness rose: {} -> {}", w[0], w[1]);
        }
        assert_eq!(result.history.last().copied(), Some(result.best_fitness));
    }

    #[test]
    fn test_best_length_matches_matrix() {
        let dm = circle(12);
        let result = genetic(&dm, small()).expect("valid");
        assert!(result.best.is_permutation_of(12));
        assert!((dm.tour_length(result.best.order()) - result.best_fitness).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_same_result() {
        let dm = circle(10);
        let a = genetic(&dm, small().with_seed(7)).expect("valid");
        let b = genetic(&dm, small().with_seed(7)).expect("valid");
        assert_eq!(a, b);
    }

    #[test]
    fn test_explicit_rng() {
        let dm = circle(8);
        let solver = GeneticSolver::new(small());
        let mut r1 = u_numflow::random::create_rng(99);
        let mut r2 = u_numflow::random::create_rng(99);
        let a = solver.solve_with_rng(&dm, &mut r1).expect("valid");
        let b = solver.solve_with_rng(&dm, &mut r2).expect("valid");
        assert_eq!(a.best, b.best);
    }

    #[test]
    fn test_zero_generations() {
        let result = genetic(&circle(6), small().with_generations(0)).expect("valid");
        assert_eq!(result.generations, 0);
        assert_eq!(result.history.len(), 1);
        assert!(result.best.is_permutation_of(6));
    }

    #[test]
    fn test_generation_snapshot() {
        let dm = circle(9);
        let problem = TspGaProblem::new(&dm);
        let mut rng = u_numflow::random::create_rng(3);
        let g0 = Generation::initial(&problem, 10, &mut rng).expect("valid size");
        let before: Vec<Vec<usize>> = g0.individuals().iter().map(|i| i.cities().to_vec()).collect();
        let g1 = g0.next(&problem, 1.0, &mut rng);
        let after: Vec<Vec<usize>> = g0.individuals().iter().map(|i| i.cities().to_vec()).collect();
        assert_eq!(before, after);
        assert_eq!(g1.index(), 1);
        assert_eq!(g1.individuals().len(), 10);
        assert!(g1.best_fitness() <= g0.best_fitness());
        for w in g1.individuals().windows(2) {
            assert!(w[0].fitness() <= w[1].fitness());
        }
    }

    #[test]
    fn test_generation_rejects_small_population() {
        let dm = circle(5);
        let problem = TspGaProblem::new(&dm);
        let mut rng = u_numflow::random::create_rng(3);
        for size in 0..MIN_POPULATION {
            assert!(
                matches!(
                    Generation::initial(&problem, size, &mut rng),
                    Err(TspError::InvalidConfig(_))
                ),
                "size={size}"
            );
        }
        let g = Generation::initial(&problem, MIN_POPULATION, &mut rng).expect("valid size");
        assert_eq!(g.next(&problem, 0.5, &mut rng).individuals().len(), MIN_POPULATION);
    }

    #[test]
    fn test_odd_population_size() {
        let result = genetic(&circle(7), small().with_population_size(5)).expect("valid");
        assert!(result.best.is_permutation_of(7));
    }

    #[test]
    fn test_invalid_config_before_search() {
        let dm = square();
        for config in [
            GeneticConfig::default().with_population_size(3),
            GeneticConfig::default().with_mutation_rate(1.01),
        ] {
            assert!(matches!(genetic(&dm, config), Err(TspError::InvalidConfig(_))));
        }
        let one = DistanceMatrix::new(1);
        assert!(matches!(genetic(&one, small()), Err(TspError::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_matrix() {
        let dm = DistanceMatrix::from_data(2, vec![0.0, 1.0, 3.0, 0.0]).expect("2x2");
        assert!(matches!(genetic(&dm, small()), Err(TspError::InvalidInput(_))));
    }

    #[test]
    fn test_cancelled() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        let solver = GeneticSolver::new(small()).with_cancel_flag(cancel);
        assert_eq!(
            solver.solve(&square()).unwrap_err(),
            TspError::Cancelled("generation")
        );
    }

    #[test]
    fn test_result_serializes() {
        let result = genetic(&square(), small().with_generations(2)).expect("valid");
        let json = serde_json::to_string(&result).expect("serialize");
        let back: GaResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.best, result.best);
        assert_eq!(back.history.len(), 3);
    }
}
