//! Genetic-algorithm heuristic for the Euclidean travelling-salesman path
//! problem.
//!
//! Given a set of points, the solver evolves a permutation of their
//! indices that approximately minimizes the length of the **open** path
//! visiting them in that order (no closing leg back to the start).
//!
//! - **Geometry**: [`geometry::Point`] and the precomputed
//!   [`geometry::DistanceMatrix`].
//! - **Genetic Algorithm**: [`ga::TspSolver`] runs tournament selection,
//!   segment-exchange crossover, reverse mutation and elitism under a
//!   generation budget with fitness-multiset convergence detection.
//! - **Towns**: named points, generated at random or loaded from a names
//!   source and a line-aligned `x,y` source.
//!
//! # Example
//!
//! ```
//! use u_tsp::ga::{TspConfig, TspSolver};
//! use u_tsp::random::create_rng;
//! use u_tsp::towns::random_towns;
//!
//! let towns = random_towns(12, &mut create_rng(7));
//! let config = TspConfig::scaled_to(towns.len()).with_seed(42);
//!
//! let result = TspSolver::solve(&towns.points(), &config)?;
//! assert_eq!(towns.route_names(result.best.path()).len(), 12);
//! # Ok::<(), u_tsp::TspError>(())
//! ```
//!
//! Runs are single-threaded and fully determined by the configured seed.

pub mod error;
pub mod ga;
pub mod geometry;
pub mod random;
pub mod towns;

pub use error::{Result, TspError};
