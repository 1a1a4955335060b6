use super::VertexId;
use crate::Cost;

/// An undirected, weighted Edge of a [`Graph`](super::Graph)
///
/// The Edge is stored once in the Graph and referenced by index from both of its endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    a: VertexId,
    b: VertexId,
    cost: Cost,
}

impl Edge {
    pub(super) fn new(a: VertexId, b: VertexId, cost: Cost) -> Edge {
        Edge { a, b, cost }
    }

    /// both endpoints, in the order they were connected
    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.a, self.b)
    }

    /// the cost of traversing this Edge in either direction
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// `true` if `vertex` is one of the endpoints
    pub fn touches(&self, vertex: VertexId) -> bool {
        self.a == vertex || self.b == vertex
    }

    /// The endpoint that is not `vertex`, or `None` if `vertex` is not part of this Edge.
    pub fn other(&self, vertex: VertexId) -> Option<VertexId> {
        if vertex == self.a {
            Some(self.b)
        } else if vertex == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

#[test]
fn other_endpoint() {
    let edge = Edge::new(3, 8, 1.5);

    assert_eq!(edge.other(3), Some(8));
    assert_eq!(edge.other(8), Some(3));
    assert_eq!(edge.other(5), None);
    assert!(edge.touches(8));
    assert!(!edge.touches(4));
}
