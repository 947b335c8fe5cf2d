//! Random town generation.

use super::{Town, TownSet};
use crate::geometry::Point;
use rand::Rng;

/// Lower bound (inclusive) of generated coordinates.
pub const COORDINATE_MIN: f64 = -2000.0;

/// Upper bound (exclusive) of generated coordinates.
pub const COORDINATE_MAX: f64 = 2000.0;

/// Scatters `n` towns uniformly over `[COORDINATE_MIN, COORDINATE_MAX)²`.
///
/// Towns are named `T0`, `T1`, … by index.
pub fn random_towns<R: Rng>(n: usize, rng: &mut R) -> TownSet {
    (0..n)
        .map(|i| {
            let x = rng.random_range(COORDINATE_MIN..COORDINATE_MAX);
            let y = rng.random_range(COORDINATE_MIN..COORDINATE_MAX);
            Town::new(format!("T{i}"), Point::new(x, y))
        })
        .collect::<Vec<_>>()
        .into()
}
