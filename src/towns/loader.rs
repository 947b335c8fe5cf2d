//! Loading towns from a names source and a line-aligned coordinates source.
//!
//! Line `i` of the names source names the town whose coordinates are on
//! line `i` of the coordinates source, written as `x,y`. Trailing blank
//! lines are ignored in both. Anything else that does not parse is
//! rejected: a malformed or missing coordinate never becomes `(0, 0)`.

use super::{Town, TownSet};
use crate::error::{Result, TspError};
use crate::geometry::Point;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parses towns from the text of the two sources.
///
/// # Errors
/// - [`TspError::TownCountMismatch`] if the sources differ in line count
/// - [`TspError::MalformedInput`] for a coordinate line that is not two
///   finite comma-separated numbers (1-based line number)
///
/// # Examples
///
/// ```
/// use u_tsp::towns::parse_towns;
///
/// let towns = parse_towns("Bath\nBristol\n", "0.5,1\n-2, 3.25\n").unwrap();
/// assert_eq!(towns.names(), vec!["Bath", "Bristol"]);
/// assert_eq!(towns.points()[1].y, 3.25);
/// ```
pub fn parse_towns(names: &str, coords: &str) -> Result<TownSet> {
    let names = content_lines(names);
    let coords = content_lines(coords);

    if names.len() != coords.len() {
        return Err(TspError::TownCountMismatch {
            names: names.len(),
            coordinates: coords.len(),
        });
    }

    names
        .iter()
        .zip(&coords)
        .enumerate()
        .map(|(i, (name, line))| -> Result<Town> {
            Ok(Town::new(*name, parse_point(line, i + 1)?))
        })
        .collect::<Result<Vec<_>>>()
        .map(TownSet::new)
}

/// Reads and parses the two files.
///
/// # Errors
/// [`TspError::MissingDataFile`] if either file cannot be read, otherwise
/// as [`parse_towns`].
pub fn load_towns(names_path: impl AsRef<Path>, coords_path: impl AsRef<Path>) -> Result<TownSet> {
    let names = read(names_path.as_ref())?;
    let coords = read(coords_path.as_ref())?;
    let towns = parse_towns(&names, &coords)?;
    debug!(towns = towns.len(), "loaded towns");
    Ok(towns)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| TspError::MissingDataFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Lines with surrounding whitespace trimmed and trailing blanks dropped.
fn content_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.lines().map(str::trim).collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

fn parse_point(line: &str, line_no: usize) -> Result<Point> {
    let malformed = || TspError::MalformedInput {
        line: line_no,
        content: line.to_string(),
    };

    let (x, y) = line.split_once(',').ok_or_else(malformed)?;
    let x: f64 = x.trim().parse().map_err(|_| malformed())?;
    let y: f64 = y.trim().parse().map_err(|_| malformed())?;

    let point = Point::new(x, y);
    if point.is_finite() {
        Ok(point)
    } else {
        Err(malformed())
    }
}
