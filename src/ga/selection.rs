//! Tournament parent selection.
//!
//! A tournament samples `k` distinct members of the population, ranks the
//! sample by fitness and keeps the two best as parents. Larger `k` means
//! stronger selection pressure.
//!
//! # References
//!
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"

use super::types::Genome;
use rand::seq::SliceRandom;
use rand::Rng;

/// Picks two parents by tournament without replacement.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::TournamentSelector;
///
/// let selector = TournamentSelector::new(4);
/// assert_eq!(selector.size(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelector {
    size: usize,
}

impl TournamentSelector {
    /// Creates a selector that samples `size` genomes per tournament.
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Tournament size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the population indices of the two fittest members of a
    /// random sample.
    ///
    /// The sample is drawn by shuffling every index and keeping the first
    /// `size`, so the two returned indices are always distinct slots. They
    /// may still hold genomes of equal fitness or identical paths.
    ///
    /// # Panics
    /// Panics unless `population.len() >= size >= 2`.
    pub fn select_indices<R: Rng>(&self, population: &[Genome], rng: &mut R) -> (usize, usize) {
        assert!(self.size >= 2, "tournament size must be at least 2");
        assert!(
            population.len() >= self.size,
            "tournament size {} exceeds population size {}",
            self.size,
            population.len()
        );

        let mut slots: Vec<usize> = (0..population.len()).collect();
        slots.shuffle(rng);
        let sample = &mut slots[..self.size];
        sample.sort_by(|&a, &b| population[a].cmp_fitness(&population[b]));

        (sample[0], sample[1])
    }

    /// Returns the two fittest members of a random sample.
    ///
    /// See [`select_indices`](Self::select_indices).
    pub fn select_parents<'a, R: Rng>(
        &self,
        population: &'a [Genome],
        rng: &mut R,
    ) -> (&'a Genome, &'a Genome) {
        let (a, b) = self.select_indices(population, rng);
        (&population[a], &population[b])
    }
}
