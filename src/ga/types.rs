//! Candidate solutions.
//!
//! A [`Genome`] is a permutation of town indices together with the cached
//! length of the path it describes. Fitness is the length of the **open**
//! path: consecutive legs are summed, the leg from the last town back to
//! the first is not.

use crate::geometry::DistanceMatrix;
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Length of the open path that visits `path` in order.
///
/// Paths with fewer than two towns have length `0.0`.
pub fn path_length(path: &[usize], matrix: &DistanceMatrix) -> f64 {
    path.windows(2).map(|w| matrix.distance(w[0], w[1])).sum()
}

/// Returns `true` if `path` contains every index in `0..path.len()` exactly once.
pub fn is_permutation(path: &[usize]) -> bool {
    let n = path.len();
    let mut seen = vec![false; n];
    for &v in path {
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

/// A candidate path with its cached fitness.
///
/// Lower fitness is better. A genome that has not been evaluated yet has
/// fitness `f64::INFINITY`.
///
/// Genomes compare **only by fitness**: two genomes with different paths
/// but equal lengths are equal under `==` and `partial_cmp`. Compare
/// [`path`](Genome::path) directly when content matters.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Genome {
    path: Vec<usize>,
    fitness: f64,
}

impl Genome {
    /// Wraps a permutation as an unevaluated genome.
    pub fn new(path: Vec<usize>) -> Self {
        debug_assert!(is_permutation(&path), "genome path is not a permutation");
        Self {
            path,
            fitness: f64::INFINITY,
        }
    }

    /// Wraps a permutation and evaluates it against `matrix`.
    pub fn evaluated(path: Vec<usize>, matrix: &DistanceMatrix) -> Self {
        let mut genome = Self::new(path);
        genome.evaluate(matrix);
        genome
    }

    /// The visiting order.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Mutable access to the visiting order.
    ///
    /// The cached fitness is left untouched; call
    /// [`evaluate`](Genome::evaluate) after editing.
    pub fn path_mut(&mut self) -> &mut [usize] {
        &mut self.path
    }

    /// Consumes the genome and returns its path.
    pub fn into_path(self) -> Vec<usize> {
        self.path
    }

    /// Cached fitness (`f64::INFINITY` before the first evaluation).
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Returns `true` once the genome has been evaluated.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_finite()
    }

    /// Number of towns on the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Returns `true` for the empty path.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Recomputes and caches the path length. Returns the new fitness.
    pub fn evaluate(&mut self, matrix: &DistanceMatrix) -> f64 {
        self.fitness = path_length(&self.path, matrix);
        self.fitness
    }

    /// Total order on fitness, usable with `sort_by`.
    pub fn cmp_fitness(&self, other: &Genome) -> Ordering {
        self.fitness.total_cmp(&other.fitness)
    }
}

impl PartialEq for Genome {
    fn eq(&self, other: &Self) -> bool {
        self.fitness == other.fitness
    }
}

impl PartialOrd for Genome {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.fitness.partial_cmp(&other.fitness)
    }
}
