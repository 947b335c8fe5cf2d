//! Generational loop execution.
//!
//! [`TspSolver`] owns the distance table, the random generator and the
//! current population, and advances them one generation at a time:
//! elites → tournament selection → segment-exchange crossover → reverse
//! mutation → evaluation → replacement → convergence check.

use super::config::TspConfig;
use super::operators::{reverse_mutation, segment_exchange_crossover};
use super::population::{
    evaluate_population, find_best, fitness_multiset_eq, initialize, sort_by_fitness,
};
use super::selection::TournamentSelector;
use super::types::{is_permutation, Genome};
use crate::error::{Result, TspError};
use crate::geometry::{DistanceMatrix, Point};
use crate::random::{create_rng, random_seed};
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

/// Snapshot of the best-ever genome, handed to a [`ProgressObserver`].
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// Generation index (0 = initial population).
    pub generation: usize,

    /// Visiting order of the best genome seen so far.
    pub best_path: &'a [usize],

    /// Fitness of the best genome seen so far.
    pub best_fitness: f64,
}

/// Receives progress snapshots while a solver runs.
///
/// Implemented for every `FnMut(&Progress<'_>)` closure.
pub trait ProgressObserver {
    /// Called for the initial generation, every
    /// [`report_interval`](TspConfig::report_interval) generations, and
    /// once when the run ends.
    fn on_progress(&mut self, progress: &Progress<'_>);
}

impl<F> ProgressObserver for F
where
    F: FnMut(&Progress<'_>),
{
    fn on_progress(&mut self, progress: &Progress<'_>) {
        self(progress)
    }
}

/// Observer that discards every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl ProgressObserver for Silent {
    fn on_progress(&mut self, _progress: &Progress<'_>) {}
}

/// What happened during one call to [`TspSolver::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A generation was produced and the budget is not exhausted.
    Continue,

    /// The new generation has the same fitness multiset as the previous one.
    Converged,

    /// `max_generations` generations have been produced.
    Exhausted,
}

impl StepOutcome {
    /// Returns `true` for outcomes that end the run.
    pub fn is_terminal(self) -> bool {
        !matches!(self, StepOutcome::Continue)
    }
}

/// Result of a solver run.
#[derive(Debug, Clone)]
pub struct TspResult {
    /// The best genome found during the entire run.
    pub best: Genome,

    /// Best fitness (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Number of generations produced after the initial population.
    pub generations: usize,

    /// Whether the run stopped on the convergence check rather than the
    /// generation budget.
    pub converged: bool,

    /// Seed the generator was created from.
    pub seed: u64,

    /// Best-ever fitness after each generation; index 0 is the initial
    /// population. Monotonically non-increasing.
    pub fitness_history: Vec<f64>,
}

/// Genetic-algorithm driver for the open-path TSP.
///
/// # Usage
///
/// ```
/// use u_tsp::ga::{TspConfig, TspSolver};
/// use u_tsp::geometry::Point;
///
/// let points = [
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
/// ];
/// let config = TspConfig::default()
///     .with_population_size(20)
///     .with_max_generations(50)
///     .with_seed(42);
///
/// let result = TspSolver::solve(&points, &config).unwrap();
/// assert_eq!(result.best.len(), 4);
/// assert!(result.best_fitness >= 3.0 - 1e-9);
/// ```
#[derive(Debug)]
pub struct TspSolver {
    matrix: DistanceMatrix,
    config: TspConfig,
    selector: TournamentSelector,
    rng: StdRng,
    seed: u64,
    population: Vec<Genome>,
    best: Genome,
    generation: usize,
    fitness_history: Vec<f64>,
    finished: Option<StepOutcome>,
}

impl TspSolver {
    /// Validates the inputs and builds generation 0.
    ///
    /// # Errors
    /// - [`TspError::InvalidConfiguration`] if `config` fails
    ///   [`TspConfig::validate`]
    /// - [`TspError::InsufficientTowns`] for fewer than two points
    /// - [`TspError::NonFiniteCoordinate`] for NaN or infinite coordinates
    pub fn new(points: &[Point], config: TspConfig) -> Result<Self> {
        config.validate()?;
        if points.len() < 2 {
            return Err(TspError::InsufficientTowns {
                found: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(TspError::NonFiniteCoordinate { index });
        }

        let seed = config.seed.unwrap_or_else(random_seed);
        let mut rng = create_rng(seed);
        let matrix = DistanceMatrix::new(points);

        let mut population = initialize(points.len(), config.population_size, &mut rng);
        evaluate_population(&mut population, &matrix);
        let best = find_best(&population).clone();

        info!(
            towns = points.len(),
            population = config.population_size,
            tournament = config.tournament_size,
            seed,
            initial_best = best.fitness(),
            "tsp solver initialized"
        );

        let mut fitness_history = Vec::with_capacity(config.max_generations.min(4096) + 1);
        fitness_history.push(best.fitness());

        Ok(Self {
            matrix,
            selector: TournamentSelector::new(config.tournament_size),
            config,
            rng,
            seed,
            population,
            best,
            generation: 0,
            fitness_history,
            finished: None,
        })
    }

    /// Builds a solver and runs it to completion without progress reports.
    pub fn solve(points: &[Point], config: &TspConfig) -> Result<TspResult> {
        Ok(Self::new(points, config.clone())?.run())
    }

    /// The best genome seen so far.
    pub fn best(&self) -> &Genome {
        &self.best
    }

    /// The current population.
    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    /// Number of generations produced so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Seed the generator was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The precomputed distances.
    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// The configuration in use.
    pub fn config(&self) -> &TspConfig {
        &self.config
    }

    /// Best-ever fitness per generation so far.
    pub fn fitness_history(&self) -> &[f64] {
        &self.fitness_history
    }

    /// Returns `true` once a terminal [`StepOutcome`] has been reached.
    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// Current best as a progress snapshot.
    pub fn progress(&self) -> Progress<'_> {
        Progress {
            generation: self.generation,
            best_path: self.best.path(),
            best_fitness: self.best.fitness(),
        }
    }

    /// Produces the next generation.
    ///
    /// Once a terminal outcome has been returned, further calls return it
    /// again without touching the population.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(outcome) = self.finished {
            return outcome;
        }
        if self.generation >= self.config.max_generations {
            self.finished = Some(StepOutcome::Exhausted);
            return StepOutcome::Exhausted;
        }

        let next = self.breed();
        let previous = std::mem::replace(&mut self.population, next);
        self.generation += 1;

        let gen_best = find_best(&self.population);
        if gen_best.fitness() < self.best.fitness() {
            debug!(
                generation = self.generation,
                from = self.best.fitness(),
                to = gen_best.fitness(),
                "best improved"
            );
            self.best = gen_best.clone();
        }
        self.fitness_history.push(self.best.fitness());

        let outcome = if fitness_multiset_eq(&previous, &self.population) {
            debug!(generation = self.generation, "population converged");
            StepOutcome::Converged
        } else if self.generation >= self.config.max_generations {
            StepOutcome::Exhausted
        } else {
            StepOutcome::Continue
        };

        if outcome.is_terminal() {
            self.finished = Some(outcome);
        }
        outcome
    }

    /// Runs to completion without progress reports.
    pub fn run(self) -> TspResult {
        self.run_with_observer(&mut Silent)
    }

    /// Runs to completion, reporting progress to `observer`.
    pub fn run_with_observer<O>(mut self, observer: &mut O) -> TspResult
    where
        O: ProgressObserver + ?Sized,
    {
        self.report(observer);

        while !self.step().is_terminal() {
            let every = self.config.report_interval;
            if every > 0 && self.generation % every == 0 {
                self.report(observer);
            }
        }
        self.report(observer);

        info!(
            generations = self.generation,
            converged = self.finished == Some(StepOutcome::Converged),
            best = self.best.fitness(),
            "tsp solver finished"
        );

        self.into_result()
    }

    /// Packages the current state as a result, whether or not the run is over.
    pub fn into_result(self) -> TspResult {
        TspResult {
            best_fitness: self.best.fitness(),
            best: self.best,
            generations: self.generation,
            converged: self.finished == Some(StepOutcome::Converged),
            seed: self.seed,
            fitness_history: self.fitness_history,
        }
    }

    fn report<O: ProgressObserver + ?Sized>(&self, observer: &mut O) {
        let progress = self.progress();
        info!(
            generation = progress.generation,
            best = progress.best_fitness,
            "progress"
        );
        observer.on_progress(&progress);
    }

    /// Builds a full replacement population from the current one.
    fn breed(&mut self) -> Vec<Genome> {
        let size = self.config.population_size;
        let elite_count = self.config.elite_count();

        sort_by_fitness(&mut self.population);
        let mut next: Vec<Genome> = Vec::with_capacity(size + 1);
        next.extend_from_slice(&self.population[..elite_count]);
        trace!(generation = self.generation + 1, elite_count, "elites carried");

        while next.len() < size {
            let (a, b) = self
                .selector
                .select_indices(&self.population, &mut self.rng);
            let (c1, c2) = segment_exchange_crossover(
                self.population[a].path(),
                self.population[b].path(),
                &mut self.rng,
            );

            for mut path in [c1, c2] {
                reverse_mutation(&mut path, self.config.mutation_rate, &mut self.rng);
                debug_assert!(is_permutation(&path), "child is not a permutation: {path:?}");
                next.push(Genome::evaluated(path, &self.matrix));
            }
        }
        next.truncate(size);

        next
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use rand::Rng;

    fn random_points(n: usize, seed: u64) -> Vec<Point> {
        let mut rng = create_rng(seed);
        (0..n)
            .map(|_| Point::new(rng.random_range(-100.0..100.0), rng.random_range(-100.0..100.0)))
            .collect()
    }

    fn small_config() -> TspConfig {
        TspConfig::default()
            .with_population_size(40)
            .with_tournament_size(4)
            .with_mutation_rate(0.3)
            .with_elitism_rate(0.1)
            .with_max_generations(100)
            .with_seed(42)
    }

    // ---- Construction ----

    #[test]
    fn test_rejects_too_few_towns() {
        for n in 0..2 {
            let points = random_points(n, 1);
            let err = TspSolver::new(&points, small_config()).unwrap_err();
            assert!(
                matches!(err, TspError::InsufficientTowns { found } if found == n),
                "unexpected error for {n} towns: {err}"
            );
        }
    }

    #[test]
    fn test_rejects_non_finite_point() {
        let mut points = random_points(5, 1);
        points[3] = Point::new(f64::NAN, 0.0);
        let err = TspSolver::new(&points, small_config()).unwrap_err();
        assert!(matches!(err, TspError::NonFiniteCoordinate { index: 3 }));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let points = random_points(5, 1);
        let config = small_config().with_tournament_size(41);
        let err = TspSolver::new(&points, config).unwrap_err();
        assert!(matches!(err, TspError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_initial_state() {
        let points = random_points(9, 3);
        let solver = TspSolver::new(&points, small_config()).unwrap();
        assert_eq!(solver.generation(), 0);
        assert_eq!(solver.population().len(), 40);
        assert_eq!(solver.seed(), 42);
        assert_eq!(solver.matrix().len(), 9);
        assert!(!solver.is_finished());
        assert_eq!(solver.fitness_history().len(), 1);

        let min = solver
            .population()
            .iter()
            .map(Genome::fitness)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(solver.best().fitness(), min);
    }

    #[test]
    fn test_unseeded_run_reports_seed() {
        let points = random_points(6, 3);
        let mut config = small_config().with_max_generations(5);
        config.seed = None;
        let solver = TspSolver::new(&points, config).unwrap();
        let seed = solver.seed();
        let result = solver.run();
        assert_eq!(result.seed, seed);
    }

    // ---- Generation invariants ----

    #[test]
    fn test_population_size_constant_with_odd_remainder() {
        // 10 genomes, 1 elite: 9 offspring slots, so the last pair is truncated.
        let points = random_points(8, 5);
        let config = small_config()
            .with_population_size(10)
            .with_tournament_size(3)
            .with_elitism_rate(0.1);
        let mut solver = TspSolver::new(&points, config).unwrap();
        for _ in 0..30 {
            let outcome = solver.step();
            assert_eq!(solver.population().len(), 10);
            if outcome.is_terminal() {
                break;
            }
        }
    }

    #[test]
    fn test_every_genome_is_evaluated_permutation() {
        let points = random_points(15, 8);
        let mut solver = TspSolver::new(&points, small_config()).unwrap();
        for _ in 0..20 {
            solver.step();
            for g in solver.population() {
                assert!(is_permutation(g.path()), "invalid path {:?}", g.path());
                let expected = crate::ga::path_length(g.path(), solver.matrix());
                assert_eq!(g.fitness(), expected);
            }
        }
    }

    #[test]
    fn test_elites_survive() {
        let points = random_points(12, 9);
        let config = small_config().with_elitism_rate(0.2).with_mutation_rate(1.0);
        let mut solver = TspSolver::new(&points, config).unwrap();
        for _ in 0..20 {
            let before = find_best(solver.population()).fitness();
            if solver.step().is_terminal() {
                break;
            }
            let after = find_best(solver.population()).fitness();
            assert!(after <= before, "elite lost: {after} > {before}");
        }
    }

    #[test]
    fn test_best_is_monotone() {
        let points = random_points(14, 11);
        let config = small_config()
            .with_elitism_rate(0.0)
            .with_max_generations(60);
        let result = TspSolver::solve(&points, &config).unwrap();

        assert_eq!(result.fitness_history.len(), result.generations + 1);
        for w in result.fitness_history.windows(2) {
            assert!(w[1] <= w[0], "best regressed: {} > {}", w[1], w[0]);
        }
        assert_eq!(result.best_fitness, *result.fitness_history.last().unwrap());
        assert_eq!(result.best.fitness(), result.best_fitness);
    }

    #[test]
    fn test_best_matches_its_path() {
        let points = random_points(10, 12);
        let result = TspSolver::solve(&points, &small_config()).unwrap();
        let m = DistanceMatrix::new(&points);
        assert!(is_permutation(result.best.path()));
        assert!((crate::ga::path_length(result.best.path(), &m) - result.best_fitness).abs() < 1e-9);
    }

    // ---- Termination ----

    #[test]
    fn test_two_towns_converge_immediately() {
        let points = [Point::new(0.0, 0.0), Point::new(3.0, 4.0)];
        let config = TspConfig::default()
            .with_population_size(10)
            .with_tournament_size(2)
            .with_max_generations(10_000)
            .with_seed(1);
        let result = TspSolver::solve(&points, &config).unwrap();

        assert!(result.converged);
        assert!(result.generations < 10_000);
        assert_eq!(result.generations, 1);
        assert_eq!(result.best_fitness, 5.0);
    }

    #[test]
    fn test_budget_exhausted() {
        let points = random_points(30, 13);
        let config = small_config().with_max_generations(5);
        let result = TspSolver::solve(&points, &config).unwrap();
        assert!(!result.converged);
        assert_eq!(result.generations, 5);
        assert_eq!(result.fitness_history.len(), 6);
    }

    #[test]
    fn test_step_after_finish_is_idempotent() {
        let points = [Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        let config = TspConfig::default()
            .with_population_size(4)
            .with_tournament_size(2)
            .with_seed(3);
        let mut solver = TspSolver::new(&points, config).unwrap();
        assert_eq!(solver.step(), StepOutcome::Converged);
        let generation = solver.generation();
        assert_eq!(solver.step(), StepOutcome::Converged);
        assert_eq!(solver.generation(), generation);
        assert!(solver.is_finished());
    }

    // ---- Determinism ----

    #[test]
    fn test_same_seed_same_run() {
        let points = random_points(16, 21);
        let mut a = TspSolver::new(&points, small_config()).unwrap();
        let mut b = TspSolver::new(&points, small_config()).unwrap();

        loop {
            let pa: Vec<&[usize]> = a.population().iter().map(Genome::path).collect();
            let pb: Vec<&[usize]> = b.population().iter().map(Genome::path).collect();
            assert_eq!(pa, pb, "populations diverged at generation {}", a.generation());

            let (oa, ob) = (a.step(), b.step());
            assert_eq!(oa, ob);
            if oa.is_terminal() {
                break;
            }
        }

        let (ra, rb) = (a.into_result(), b.into_result());
        assert_eq!(ra.best.path(), rb.best.path());
        assert_eq!(ra.best_fitness.to_bits(), rb.best_fitness.to_bits());
        assert_eq!(ra.generations, rb.generations);
    }

    #[test]
    fn test_different_seed_different_run() {
        let points = random_points(16, 21);
        let a = TspSolver::new(&points, small_config().with_seed(1)).unwrap();
        let b = TspSolver::new(&points, small_config().with_seed(2)).unwrap();
        let pa: Vec<&[usize]> = a.population().iter().map(Genome::path).collect();
        let pb: Vec<&[usize]> = b.population().iter().map(Genome::path).collect();
        assert_ne!(pa, pb);
    }

    // ---- Progress ----

    #[test]
    fn test_progress_reports_first_periodic_last() {
        let points = random_points(20, 30);
        let config = small_config()
            .with_max_generations(25)
            .with_report_interval(10);

        let mut seen: Vec<(usize, f64)> = Vec::new();
        let mut observer = |p: &Progress<'_>| {
            assert!(is_permutation(p.best_path));
            seen.push((p.generation, p.best_fitness));
        };
        let result = TspSolver::new(&points, config)
            .unwrap()
            .run_with_observer(&mut observer);

        let generations: Vec<usize> = seen.iter().map(|&(g, _)| g).collect();
        if result.converged {
            assert_eq!(generations.first(), Some(&0));
            assert_eq!(generations.last(), Some(&result.generations));
        } else {
            assert_eq!(generations, vec![0, 10, 20, 25]);
        }
        for w in seen.windows(2) {
            assert!(w[1].1 <= w[0].1);
        }
        assert_eq!(seen.last().map(|&(_, f)| f), Some(result.best_fitness));
    }

    #[test]
    fn test_progress_without_interval() {
        let points = random_points(10, 31);
        let config = small_config().with_max_generations(12);
        let mut count = 0;
        let mut observer = |_: &Progress<'_>| count += 1;
        TspSolver::new(&points, config)
            .unwrap()
            .run_with_observer(&mut observer);
        assert_eq!(count, 2);
    }

    // ---- Quality ----

    #[test]
    fn test_collinear_towns_near_optimal() {
        // Eight towns on a line in scrambled order; the optimal open path
        // walks them end to end for a length of 7.
        let xs = [3.0, 7.0, 0.0, 5.0, 1.0, 6.0, 2.0, 4.0];
        let points: Vec<Point> = xs.iter().map(|&x| Point::new(x, 0.0)).collect();
        let config = TspConfig::default()
            .with_population_size(100)
            .with_tournament_size(5)
            .with_mutation_rate(0.3)
            .with_elitism_rate(0.1)
            .with_max_generations(300)
            .with_seed(42);

        let result = TspSolver::solve(&points, &config).unwrap();
        assert!(
            result.best_fitness <= 10.5,
            "expected a path within 1.5x of optimal 7.0, got {}",
            result.best_fitness
        );
        assert!(result.best_fitness >= 7.0 - 1e-9);
    }

    #[test]
    fn test_improves_on_initial_population() {
        let points = random_points(25, 40);
        let config = small_config().with_max_generations(200);
        let result = TspSolver::solve(&points, &config).unwrap();
        assert!(
            result.best_fitness < result.fitness_history[0],
            "no improvement over generation 0: {}",
            result.best_fitness
        );
    }
}
