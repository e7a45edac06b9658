//! Genetic search for the symmetric TSP.
//!
//! - [`TourChromosome`] — permutation chromosome, fitness = tour length
//! - [`operators`] — Fisher–Yates initialization, order crossover, swap mutation
//! - [`TspGaProblem`] — [`GaProblem`](u_metaheur::ga::GaProblem) implementation
//! - [`GeneticSolver`] — truncation-selection generational loop

mod chromosome;
mod config;
pub mod operators;
mod problem;
mod solver;

pub use chromosome::TourChromosome;
pub use config::{GeneticConfig, MIN_POPULATION};
pub use problem::TspGaProblem;
pub use solver::{genetic, GaResult, Generation, GeneticSolver};
