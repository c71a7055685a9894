//! Path reconstruction from a predecessor map.

use std::collections::HashMap;

use gridpath_core::Point;

/// An ordered, start-to-goal sequence of 4-adjacent coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path(Vec<Point>);

impl Path {
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Number of coordinates, both endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of moves, i.e. `len() - 1`.
    #[inline]
    pub fn steps(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Point> {
        self.0.first().copied()
    }

    pub fn goal(&self) -> Option<Point> {
        self.0.last().copied()
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.0.iter()
    }

    /// Whether each consecutive pair differs by one unit along one axis.
    pub fn is_contiguous(&self) -> bool {
        self.0.windows(2).all(|w| w[0].is_adjacent_4(w[1]))
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Walk `predecessors` back from `goal` until a coordinate without a
/// predecessor (the start) is reached, and return the route start-first.
///
/// An empty map yields the single-element path `[goal]`.
pub fn reconstruct(predecessors: &HashMap<Point, Point>, goal: Point) -> Path {
    let mut points = vec![goal];
    let mut current = goal;
    while let Some(&prev) = predecessors.get(&current) {
        points.push(prev);
        current = prev;
    }
    points.reverse();
    Path(points)
}
