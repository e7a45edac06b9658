//! # u-tsp
//!
//! Metric travelling salesman approximation over a shared distance matrix,
//! with two independent engines:
//!
//! - a deterministic Christofides construction, at most 1.5× optimal;
//! - a seeded genetic search with truncation selection, order crossover and
//!   swap mutation.
//!
//! ## Modules
//!
//! - [`distance`] — Dense distance matrix, Euclidean and haversine builders
//! - [`models`] — Point and Tour
//! - [`graph`] — Complete weighted graph, union-find, Kruskal MST
//! - [`christofides`] — Odd-vertex matching, Eulerian circuit, shortcutting
//! - [`ga`] — Genetic search engine and its operators
//! - [`compare`] — Runs both engines side by side
//! - [`cancel`] — Cooperative cancellation flag
//! - [`error`] — Crate error type
//!
//! ## Example
//!
//! ```
//! use u_tsp::distance::DistanceMatrix;
//! use u_tsp::{christofides, genetic, GeneticConfig};
//!
//! let dm = DistanceMatrix::from_euclidean(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
//!
//! let tour = christofides(&dm).unwrap();
//! assert_eq!(tour.closed_order(), vec![0, 1, 2, 3, 0]);
//!
//! let result = genetic(&dm, GeneticConfig::default().with_generations(50)).unwrap();
//! assert!((result.best_fitness - 4.0).abs() < 1e-10);
//! ```

pub mod cancel;
pub mod christofides;
pub mod compare;
pub mod distance;
pub mod error;
pub mod ga;
pub mod graph;
pub mod models;

pub use christofides::{christofides, ChristofidesConfig, ChristofidesSolver, MatchingStrategy};
pub use compare::{compare, Comparison};
pub use error::{TspError, TspResult};
pub use ga::{genetic, GaResult, GeneticConfig, GeneticSolver};
