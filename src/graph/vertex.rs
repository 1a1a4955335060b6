use super::EdgeId;
use crate::Point;

/// What a Vertex means for the search
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum VertexRole {
    /// an ordinary waypoint
    #[default]
    Waypoint,
    /// the Vertex the search starts from. There is at most one per Graph.
    Start,
    /// a Vertex the search is allowed to end on
    Goal,
}

/// A Vertex of a [`Graph`](super::Graph)
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    pub(super) position: Point,
    pub(super) role: VertexRole,
    pub(super) edges: Vec<EdgeId>,
}

impl Vertex {
    pub(super) fn new(position: Point, role: VertexRole) -> Vertex {
        Vertex {
            position,
            role,
            edges: Vec::new(),
        }
    }

    /// the location of this Vertex
    pub fn position(&self) -> Point {
        self.position
    }

    /// the role of this Vertex
    pub fn role(&self) -> VertexRole {
        self.role
    }

    /// `true` if the search starts here
    pub fn is_start(&self) -> bool {
        self.role == VertexRole::Start
    }

    /// `true` if the search may end here
    pub fn is_goal(&self) -> bool {
        self.role == VertexRole::Goal
    }

    /// the ids of all Edges touching this Vertex
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }
}
