//! Planar geometry: points and the precomputed distance table.
//!
//! - [`Point`]: an immutable `(x, y)` coordinate pair
//! - [`DistanceMatrix`]: symmetric Euclidean distances between all points,
//!   built once in O(N²) and queried in O(1)

mod matrix;
mod point;

pub use matrix::DistanceMatrix;
pub use point::Point;
