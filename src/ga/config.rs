//! Solver configuration.
//!
//! [`TspConfig`] holds every parameter that controls the generational loop.

use crate::error::{Result, TspError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the TSP genetic algorithm.
///
/// # Defaults
///
/// ```
/// use u_tsp::ga::TspConfig;
///
/// let config = TspConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.tournament_size, 5);
/// assert_eq!(config.max_generations, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp::ga::TspConfig;
///
/// let config = TspConfig::default()
///     .with_population_size(200)
///     .with_tournament_size(8)
///     .with_elitism_rate(0.05)
///     .with_mutation_rate(0.2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TspConfig {
    /// Number of genomes per generation. Constant across the run.
    pub population_size: usize,

    /// Number of genomes sampled per tournament (2 ≤ k ≤ population).
    ///
    /// Larger tournaments push harder toward already-fit genomes.
    pub tournament_size: usize,

    /// Probability that a child is mutated (0.0–1.0).
    pub mutation_rate: f64,

    /// Fraction of the population carried forward unchanged (0.0–1.0).
    ///
    /// The elite count is `floor(elitism_rate * population_size)`.
    pub elitism_rate: f64,

    /// Hard cap on the number of generations.
    pub max_generations: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a fresh seed; the seed actually used is reported in
    /// the result.
    pub seed: Option<u64>,

    /// Emit a progress snapshot every this many generations.
    ///
    /// The initial and final generations are always reported. Set to 0 to
    /// report only those two.
    pub report_interval: usize,
}

impl Default for TspConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            tournament_size: 5,
            mutation_rate: 0.1,
            elitism_rate: 0.1,
            max_generations: 1000,
            seed: None,
            report_interval: 0,
        }
    }
}

impl TspConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the mutation rate, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the elitism rate, clamped to `[0, 1]`.
    pub fn with_elitism_rate(mut self, rate: f64) -> Self {
        self.elitism_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the progress reporting interval (0 = first and last only).
    pub fn with_report_interval(mut self, every: usize) -> Self {
        self.report_interval = every;
        self
    }

    /// Preset sized for `n_towns`.
    ///
    /// - Population: `n² / 2`, at least 10
    /// - Generations: 1000, progress three times per run
    pub fn scaled_to(n_towns: usize) -> Self {
        let max_generations = 1000;
        Self {
            population_size: (n_towns * n_towns / 2).max(10),
            max_generations,
            report_interval: max_generations / 3,
            ..Self::default()
        }
    }

    /// Number of genomes copied unchanged into each new generation.
    pub fn elite_count(&self) -> usize {
        (self.elitism_rate * self.population_size as f64).floor() as usize
    }

    /// Validates the configuration.
    ///
    /// Returns [`TspError::InvalidConfiguration`] describing the first
    /// violated rule.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(TspError::InvalidConfiguration(msg));

        if self.population_size < 2 {
            return invalid(format!(
                "population_size must be at least 2, got {}",
                self.population_size
            ));
        }
        if self.tournament_size < 2 {
            return invalid(format!(
                "tournament_size must be at least 2, got {}",
                self.tournament_size
            ));
        }
        if self.tournament_size > self.population_size {
            return invalid(format!(
                "tournament_size {} exceeds population_size {}",
                self.tournament_size, self.population_size
            ));
        }
        if self.max_generations == 0 {
            return invalid("max_generations must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return invalid(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            ));
        }
        if !(0.0..=1.0).contains(&self.elitism_rate) {
            return invalid(format!(
                "elitism_rate must be within [0, 1], got {}",
                self.elitism_rate
            ));
        }
        if self.elite_count() >= self.population_size {
            return invalid("elitism_rate too high: elites fill entire population".into());
        }
        Ok(())
    }
}
