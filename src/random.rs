//! Seeded random number generation.
//!
//! The solver owns exactly one generator, created here and threaded by
//! `&mut` through initialization, selection, crossover and mutation.
//! Seeding it once makes a whole run reproducible.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from a 64-bit seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Draws a fresh seed from the operating system's entropy source.
pub fn random_seed() -> u64 {
    rand::random()
}
