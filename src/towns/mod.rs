//! Named towns and the two ways of obtaining them.
//!
//! - [`random_towns`]: `n` towns scattered uniformly over a bounded square
//! - [`parse_towns`] / [`load_towns`]: towns read from a names source and a
//!   line-aligned `x,y` coordinates source
//!
//! A [`TownSet`] hands its [`points`](TownSet::points) to the solver and
//! maps the resulting path back to names with
//! [`route_names`](TownSet::route_names).

mod generator;
mod loader;

pub use generator::{random_towns, COORDINATE_MAX, COORDINATE_MIN};
pub use loader::{load_towns, parse_towns};

use crate::geometry::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named location.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Town {
    pub name: String,
    pub point: Point,
}

impl Town {
    pub fn new(name: impl Into<String>, point: Point) -> Self {
        Self {
            name: name.into(),
            point,
        }
    }
}

/// An ordered collection of towns; a town's index is its position.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TownSet {
    towns: Vec<Town>,
}

impl TownSet {
    pub fn new(towns: Vec<Town>) -> Self {
        Self { towns }
    }

    pub fn len(&self) -> usize {
        self.towns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.towns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Town> {
        self.towns.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Town> {
        self.towns.iter()
    }

    /// Coordinates in index order, ready for the solver.
    pub fn points(&self) -> Vec<Point> {
        self.towns.iter().map(|t| t.point).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.towns.iter().map(|t| t.name.as_str()).collect()
    }

    /// Names of the towns along `path`.
    ///
    /// # Panics
    /// Panics if `path` holds an index outside the set.
    pub fn route_names(&self, path: &[usize]) -> Vec<&str> {
        path.iter().map(|&i| self.towns[i].name.as_str()).collect()
    }
}

impl From<Vec<Town>> for TownSet {
    fn from(towns: Vec<Town>) -> Self {
        Self::new(towns)
    }
}

impl<'a> IntoIterator for &'a TownSet {
    type Item = &'a Town;
    type IntoIter = std::slice::Iter<'a, Town>;

    fn into_iter(self) -> Self::IntoIter {
        self.towns.iter()
    }
}
