//! Error types for the TSP solver and its town loaders.
//!
//! Every error is raised at construction time: loaders reject bad data,
//! [`TspConfig::validate`](crate::ga::TspConfig::validate) rejects bad
//! parameters, and [`TspSolver::new`](crate::ga::TspSolver::new) rejects
//! point sets that cannot be optimized. A solver that was built
//! successfully never fails while running.

use std::path::PathBuf;

/// Errors reported by the crate.
#[derive(Debug, thiserror::Error)]
pub enum TspError {
    /// Fewer than two towns were handed to the solver.
    #[error("at least 2 towns are required, got {found}")]
    InsufficientTowns { found: usize },

    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A coordinate line could not be parsed as `x,y`.
    #[error("malformed coordinates on line {line}: {content:?}")]
    MalformedInput { line: usize, content: String },

    /// The name and coordinate sources have a different number of lines.
    #[error("{names} town names but {coordinates} coordinate pairs")]
    TownCountMismatch { names: usize, coordinates: usize },

    /// A point with a NaN or infinite coordinate.
    #[error("town {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    /// A town data file could not be opened or read.
    #[error("cannot read town data file {path}")]
    MissingDataFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TspError>;
