//! Population-level helpers: initialization, evaluation, best lookup and
//! the fitness-multiset comparison used for convergence detection.

use super::types::Genome;
use crate::geometry::DistanceMatrix;
use rand::seq::SliceRandom;
use rand::Rng;

/// Creates `population_size` independent, uniformly random permutations of
/// `0..n_points`.
///
/// All genomes draw from the same generator; duplicates are allowed.
/// The returned genomes are not evaluated.
pub fn initialize<R: Rng>(n_points: usize, population_size: usize, rng: &mut R) -> Vec<Genome> {
    (0..population_size)
        .map(|_| {
            let mut path: Vec<usize> = (0..n_points).collect();
            path.shuffle(rng);
            Genome::new(path)
        })
        .collect()
}

/// Evaluates every genome in place.
pub fn evaluate_population(population: &mut [Genome], matrix: &DistanceMatrix) {
    for genome in population.iter_mut() {
        genome.evaluate(matrix);
    }
}

/// Sorts ascending by fitness (best first). Stable.
pub fn sort_by_fitness(population: &mut [Genome]) {
    population.sort_by(|a, b| a.cmp_fitness(b));
}

/// The genome with the lowest fitness. The first one wins ties.
///
/// # Panics
/// Panics if `population` is empty.
pub fn find_best(population: &[Genome]) -> &Genome {
    population
        .iter()
        .reduce(|best, g| if g.fitness() < best.fitness() { g } else { best })
        .expect("population must not be empty")
}

/// Returns `true` if both populations hold the same multiset of fitness
/// values, regardless of order and of path content.
///
/// This is the convergence test: a generation that reproduces exactly the
/// fitness values of its predecessor, with the same multiplicities, has
/// stopped making progress.
pub fn fitness_multiset_eq(a: &[Genome], b: &[Genome]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut fa: Vec<f64> = a.iter().map(Genome::fitness).collect();
    let mut fb: Vec<f64> = b.iter().map(Genome::fitness).collect();
    fa.sort_by(f64::total_cmp);
    fb.sort_by(f64::total_cmp);
    fa == fb
}
