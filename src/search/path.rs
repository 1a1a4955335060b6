use crate::{
    graph::{EdgeId, VertexId},
    Cost, Point,
};

/// A Path through a [`Graph`](crate::graph::Graph), as returned by
/// [`a_star_search`](super::a_star_search).
///
/// Stores the Vertices from the start to the goal (both inclusive), their positions, the Edges
/// between them and the total cost. The positions are copied out of the Graph, so a Path stays
/// usable after the Graph is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    vertices: Vec<VertexId>,
    waypoints: Vec<Point>,
    edges: Vec<EdgeId>,
    cost: Cost,
}

impl Path {
    /// Creates a new Path.
    ///
    /// Panics unless there is one waypoint per Vertex and one Edge fewer than Vertices.
    #[track_caller]
    pub fn new(
        vertices: Vec<VertexId>,
        waypoints: Vec<Point>,
        edges: Vec<EdgeId>,
        cost: Cost,
    ) -> Path {
        assert_eq!(vertices.len(), waypoints.len(), "one waypoint per Vertex");
        assert_eq!(
            edges.len() + 1,
            vertices.len().max(1),
            "one Edge between each pair of Vertices"
        );
        Path {
            vertices,
            waypoints,
            edges,
            cost,
        }
    }

    /// the total cost of traversing the Path
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// the number of Vertices in the Path
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// `true` if the Path has no Vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// the ids of the Vertices, from start to goal
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// the positions of the Vertices, from start to goal
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// the ids of the Edges along the Path, e.g. to highlight them
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// the first Vertex
    pub fn start(&self) -> Option<VertexId> {
        self.vertices.first().copied()
    }

    /// the last Vertex
    pub fn goal(&self) -> Option<VertexId> {
        self.vertices.last().copied()
    }

    /// Returns an Iterator over the waypoints
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            iter: self.waypoints.iter(),
        }
    }
}

use std::ops::Index;

impl Index<usize> for Path {
    type Output = Point;
    fn index(&self, index: usize) -> &Point {
        &self.waypoints[index]
    }
}

/// An Iterator over the waypoints of a [`Path`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    iter: std::slice::Iter<'a, Point>,
}

impl Iterator for Iter<'_> {
    type Item = Point;
    fn next(&mut self) -> Option<Point> {
        self.iter.next().copied()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Point> {
        self.iter.next_back().copied()
    }
}
impl ExactSizeIterator for Iter<'_> {}
impl std::iter::FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Path {
    type Item = Point;
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

use std::fmt;
impl fmt::Display for Path {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Path[Cost = {:.2}]: ", self.cost)?;
        if self.vertices.is_empty() {
            write!(fmt, "<empty>")
        } else {
            write!(fmt, "{}", self.vertices[0])?;
            for v in self.vertices.iter().skip(1) {
                write!(fmt, " -> {}", v)?;
            }
            Ok(())
        }
    }
}
