//! Genetic algorithm for the open-path travelling-salesman problem.
//!
//! A population of candidate paths evolves under tournament selection,
//! segment-exchange crossover, reverse mutation and elitism until either
//! the generation budget runs out or two consecutive generations have the
//! same fitness multiset.
//!
//! # Key Types
//!
//! - [`Genome`]: a permutation of town indices with its cached path length
//! - [`TspConfig`]: algorithm parameters (population, tournament, rates, seed)
//! - [`TspSolver`]: owns the population and drives the generational loop
//! - [`TspResult`]: the best genome plus run statistics
//!
//! # Submodules
//!
//! - [`operators`]: segment-exchange crossover and reverse mutation
//! - [`population`]: initialization, evaluation and convergence helpers
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Larrañaga et al. (1999), "Genetic Algorithms for the Travelling Salesman
//!   Problem: A Review of Representations and Operators"

mod config;
pub mod operators;
pub mod population;
mod runner;
mod selection;
mod types;

pub use config::TspConfig;
pub use runner::{Progress, ProgressObserver, Silent, StepOutcome, TspResult, TspSolver};
pub use selection::TournamentSelector;
pub use types::{is_permutation, path_length, Genome};
