//! The undirected visibility Graph that the search runs on.

use crate::{world::WorldQuery, Cost, Point};

mod vertex;
pub use self::vertex::{Vertex, VertexRole};

mod edge;
pub use self::edge::Edge;

mod builder;
pub use self::builder::build_graph;

/// The Type used to reference a Vertex in a [`Graph`]
pub type VertexId = usize;

/// The Type used to reference an Edge in a [`Graph`]
pub type EdgeId = usize;

/// An undirected, weighted Graph of Points on the Plane.
///
/// Vertices are never removed, so a Graph built with `n` Vertices uses the ids `0..n`.
/// Edges are owned by the Graph; Vertices only store the ids of their Edges.
///
/// ## Examples
/// ```
/// # use toroidal_planner::{graph::{Graph, VertexRole}, Point};
/// let mut graph = Graph::new();
/// let a = graph.add_vertex(Point::new(0.0, 0.0), VertexRole::Start);
/// let b = graph.add_vertex(Point::new(3.0, 4.0), VertexRole::Goal);
/// graph.add_edge(a, b, 5.0);
///
/// assert_eq!(graph.start(), Some(a));
/// assert_eq!(graph.goals(), &[b]);
/// assert!(graph.is_connected(a, b));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Graph {
    vertices: slab::Slab<Vertex>,
    edges: Vec<Edge>,
    goals: Vec<VertexId>,
    start: Option<VertexId>,
}

impl Graph {
    /// Creates an empty Graph
    pub fn new() -> Graph {
        Graph::default()
    }

    /// Creates an empty Graph with room for `vertices` Vertices
    pub fn with_capacity(vertices: usize) -> Graph {
        Graph {
            vertices: slab::Slab::with_capacity(vertices),
            ..Default::default()
        }
    }

    /// the number of Vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// `true` if the Graph has no Vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// the number of Edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Adds a Vertex and returns its id.
    ///
    /// Adding a second [`Start`](VertexRole::Start) turns the previous start into an ordinary
    /// waypoint.
    pub fn add_vertex(&mut self, position: Point, role: VertexRole) -> VertexId {
        let id = self.vertices.insert(Vertex::new(position, role));
        match role {
            VertexRole::Start => {
                if let Some(previous) = self.start.replace(id) {
                    log::warn!("Vertex {} replaces {} as the start", id, previous);
                    self.vertices[previous].role = VertexRole::Waypoint;
                }
            }
            VertexRole::Goal => self.goals.push(id),
            VertexRole::Waypoint => {}
        }
        id
    }

    /// Connects two Vertices and returns the id of the new Edge.
    ///
    /// Panics if either Vertex does not exist or `cost` is negative or not finite.
    #[track_caller]
    pub fn add_edge(&mut self, a: VertexId, b: VertexId, cost: Cost) -> EdgeId {
        assert!(
            cost.is_finite() && cost >= 0.0,
            "Invalid Edge cost: {}",
            cost
        );
        assert!(
            self.vertices.contains(a) && self.vertices.contains(b),
            "Invalid VertexId in Edge {} - {}",
            a,
            b
        );

        let id = self.edges.len();
        self.edges.push(Edge::new(a, b, cost));
        self.vertices[a].edges.push(id);
        if a != b {
            self.vertices[b].edges.push(id);
        }
        id
    }

    /// Connects two Vertices with an Edge costing the shortest distance between them in `world`.
    #[track_caller]
    pub fn connect<W: WorldQuery>(&mut self, world: &W, a: VertexId, b: VertexId) -> EdgeId {
        let cost = world.shortest_distance(self[a].position, self[b].position);
        self.add_edge(a, b, cost)
    }

    /// the Vertex with the given id, if any
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    /// the Edge with the given id, if any
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// An Iterator over all Vertices and their ids, in insertion order
    pub fn vertices(&self) -> slab::Iter<'_, Vertex> {
        self.vertices.iter()
    }

    /// All Edges, indexed by [`EdgeId`]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// the start Vertex, if one was added
    pub fn start(&self) -> Option<VertexId> {
        self.start
    }

    /// all goal Vertices
    pub fn goals(&self) -> &[VertexId] {
        &self.goals
    }

    /// The neighbors of a Vertex, together with the connecting Edge and its cost.
    #[track_caller]
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = (VertexId, EdgeId, Cost)> + '_ {
        self[id].edges.iter().filter_map(move |&edge_id| {
            let edge = &self.edges[edge_id];
            edge.other(id)
                .filter(|&other| other != id)
                .map(|other| (other, edge_id, edge.cost()))
        })
    }

    /// `true` if an Edge connects `a` and `b`
    pub fn is_connected(&self, a: VertexId, b: VertexId) -> bool {
        self.vertex(a)
            .map(|vertex| vertex.edges.iter().any(|&edge| self.edges[edge].other(a) == Some(b)))
            .unwrap_or(false)
    }
}

use std::ops::Index;
impl Index<VertexId> for Graph {
    type Output = Vertex;
    #[track_caller]
    fn index(&self, index: VertexId) -> &Vertex {
        &self.vertices[index]
    }
}
