//! Precomputed pairwise distances.

use super::point::Point;

/// Symmetric `N×N` table of Euclidean distances.
///
/// Built once from a point list; immutable afterwards. The table is
/// stored row-major in a single `Vec` so a lookup is one multiply-add.
///
/// # Examples
///
/// ```
/// use u_tsp::geometry::{DistanceMatrix, Point};
///
/// let m = DistanceMatrix::new(&[Point::new(0.0, 0.0), Point::new(3.0, 4.0)]);
/// assert_eq!(m.distance(0, 1), 5.0);
/// assert_eq!(m.distance(1, 0), 5.0);
/// assert_eq!(m.distance(1, 1), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds the table for `points`.
    ///
    /// Each unordered pair is computed once and mirrored, so
    /// `distance(i, j)` and `distance(j, i)` are bit-identical.
    ///
    /// # Complexity
    /// O(N²) time and space
    pub fn new(points: &[Point]) -> Self {
        let n = points.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..i {
                let d = points[i].distance_to(&points[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { n, data }
    }

    /// Number of points the table was built from.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns `true` if the table was built from no points.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between point `i` and point `j`.
    ///
    /// # Panics
    /// Panics if `i` or `j` is out of bounds.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        assert!(
            i < self.n && j < self.n,
            "index ({i}, {j}) out of bounds for {} points",
            self.n
        );
        self.data[i * self.n + j]
    }
}
