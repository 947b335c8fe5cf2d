//! Permutation recombination and mutation.
//!
//! Both operators work on plain `&[usize]` paths and share one segment
//! draw, [`random_segment`].
//!
//! # Crossover
//!
//! - [`segment_exchange_crossover`]: swap a contiguous section between two
//!   parents, repair by removing the incoming elements and re-appending
//!   them shuffled, O(n)
//!
//! # Mutation
//!
//! - [`reverse_mutation`]: with a given probability, reverse a random
//!   segment (2-opt move), O(n)

use rand::seq::SliceRandom;
use rand::Rng;

// ============================================================================
// Segment draw
// ============================================================================

/// Draws an inclusive segment `[lo, hi]` within `0..n`.
///
/// `lo` is uniform in `[0, n - 2]`, then `hi` is uniform in `[lo, n - 1]`.
/// The segment can have length one. Returns `None` when `n < 2`.
pub fn random_segment<R: Rng>(n: usize, rng: &mut R) -> Option<(usize, usize)> {
    if n < 2 {
        return None;
    }
    let lo = rng.random_range(0..=n - 2);
    let hi = rng.random_range(lo..=n - 1);
    Some((lo, hi))
}

// ============================================================================
// Crossover
// ============================================================================

/// Segment-exchange crossover.
///
/// # Algorithm
///
/// 1. Draw `[lo, hi]` with [`random_segment`]
/// 2. `section1 = parent1[lo..=hi]`, `section2 = parent2[lo..=hi]`
/// 3. `child1` = `parent1` with every value of `section2` removed, relative
///    order kept; `child2` = `parent2` minus `section1`
/// 4. Shuffle `section2` and append it to `child1`; shuffle `section1` and
///    append it to `child2`
///
/// Each child receives back exactly the values it lost, so both remain
/// permutations. Parents shorter than two are returned as copies.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn segment_exchange_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    let Some((lo, hi)) = random_segment(n, rng) else {
        return (parent1.to_vec(), parent2.to_vec());
    };

    let mut section1 = parent1[lo..=hi].to_vec();
    let mut section2 = parent2[lo..=hi].to_vec();

    let mut child1 = without(parent1, &section2);
    let mut child2 = without(parent2, &section1);

    section2.shuffle(rng);
    section1.shuffle(rng);
    child1.extend_from_slice(&section2);
    child2.extend_from_slice(&section1);

    (child1, child2)
}

/// `source` minus every value in `removed`, order preserved.
fn without(source: &[usize], removed: &[usize]) -> Vec<usize> {
    let mut drop = vec![false; source.len()];
    for &v in removed {
        drop[v] = true;
    }
    source.iter().copied().filter(|&v| !drop[v]).collect()
}

// ============================================================================
// Mutation
// ============================================================================

/// Reverses `perm[lo..=hi]` in place.
///
/// # Panics
/// Panics if `lo > hi` or `hi >= perm.len()`.
pub fn reverse_segment(perm: &mut [usize], lo: usize, hi: usize) {
    assert!(
        lo <= hi && hi < perm.len(),
        "segment [{lo}, {hi}] out of bounds for length {}",
        perm.len()
    );
    perm[lo..=hi].reverse();
}

/// Reverse mutation.
///
/// With probability `rate`, reverses a segment drawn by [`random_segment`];
/// otherwise leaves `perm` untouched. Returns `true` if a segment was
/// reversed.
pub fn reverse_mutation<R: Rng>(perm: &mut [usize], rate: f64, rng: &mut R) -> bool {
    if rng.random_range(0.0..1.0) >= rate {
        return false;
    }
    match random_segment(perm.len(), rng) {
        Some((lo, hi)) => {
            reverse_segment(perm, lo, hi);
            true
        }
        None => false,
    }
}

// ============================================================================
// Tests
// ============================================================================
