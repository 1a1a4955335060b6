use super::{FrontierEntry, Path};
use crate::{
    graph::{EdgeId, Graph, VertexId},
    world::WorldQuery,
    Cost,
};

use ordered_float::OrderedFloat;
use std::collections::BinaryHeap;

#[derive(Clone, Copy, Debug)]
struct SearchNode {
    vertex: VertexId,
    parent: Option<usize>,
    edge: Option<EdgeId>,
    cost: Cost,
}

struct Search<'a> {
    graph: &'a Graph,
    heuristic: Vec<Cost>,
    expanded: Vec<bool>,
    nodes: Vec<SearchNode>,
    frontier: BinaryHeap<FrontierEntry>,
    sequence: u64,
}

impl Search<'_> {
    fn push_successors(&mut self, parent: usize) {
        let graph = self.graph;
        let SearchNode { vertex, cost, .. } = self.nodes[parent];

        for (other, edge, edge_cost) in graph.neighbors(vertex) {
            if self.expanded[other] {
                continue;
            }
            let other_cost = cost + edge_cost;

            let node = self.nodes.len();
            self.nodes.push(SearchNode {
                vertex: other,
                parent: Some(parent),
                edge: Some(edge),
                cost: other_cost,
            });
            self.frontier.push(FrontierEntry {
                estimate: OrderedFloat(other_cost + self.heuristic[other]),
                sequence: self.sequence,
                node,
            });
            self.sequence += 1;
        }
    }

    /// Pops entries until one refers to a Vertex that was not expanded yet.
    fn pop_unexpanded(&mut self) -> Option<usize> {
        while let Some(FrontierEntry { node, .. }) = self.frontier.pop() {
            if !self.expanded[self.nodes[node].vertex] {
                return Some(node);
            }
        }
        None
    }

    fn reconstruct(&self, goal: usize) -> Path {
        let mut vertices = vec![];
        let mut edges = vec![];
        let mut current = Some(goal);

        while let Some(id) = current {
            let node = &self.nodes[id];
            vertices.push(node.vertex);
            edges.extend(node.edge);
            current = node.parent;
        }
        vertices.reverse();
        edges.reverse();

        let waypoints = vertices.iter().map(|&v| self.graph[v].position()).collect();
        Path::new(vertices, waypoints, edges, self.nodes[goal].cost)
    }
}

/// Searches a [`Graph`] using the [A* Algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// from its start Vertex to the closest of its goal Vertices.
///
/// The Heuristic of every Vertex is the shortest distance in `world` to the nearest goal. Since
/// Edges cost the same shortest distance, it never overestimates and the returned Path is the
/// cheapest one in the Graph.
///
/// Vertices are not updated in place when a cheaper way to them is found. Instead, a new
/// frontier entry is pushed, and entries of Vertices that were already expanded are skipped when
/// popped. Entries with the same estimate are popped in the order they were pushed.
///
/// ## Arguments
/// - `graph` - the Graph to search. Its [`start`](Graph::start) and [`goals`](Graph::goals) define the search.
/// - `world` - the world the Graph was built in, used for the Heuristic
/// - `max_expansions` - the search gives up after expanding this many Vertices
///
/// ## Returns
/// the Path, if one was found, or `None` if the Graph has no start or goal, the goals are
/// unreachable or the search ran out of expansions.
/// The first Vertex in the Path is always the start and the last one a goal.
///
/// If the start coincides with a goal, the Path consists of only the start Vertex and costs `0`.
///
/// ## Examples
/// ```
/// # use toroidal_planner::{graph::{Graph, VertexRole}, search::a_star_search, world::ToroidalWorld, Point};
/// let world = ToroidalWorld::new(100.0, 100.0).unwrap();
///
/// // S--10--A--10--G
/// //  \           /
/// //   -----30----
/// let mut graph = Graph::new();
/// let s = graph.add_vertex(Point::new(10.0, 10.0), VertexRole::Start);
/// let a = graph.add_vertex(Point::new(20.0, 10.0), VertexRole::Waypoint);
/// let g = graph.add_vertex(Point::new(30.0, 10.0), VertexRole::Goal);
/// graph.add_edge(s, g, 30.0);
/// graph.add_edge(s, a, 10.0);
/// graph.add_edge(a, g, 10.0);
///
/// let path = a_star_search(&graph, &world, 100).unwrap();
/// assert_eq!(path.vertices(), &[s, a, g]);
/// assert_eq!(path.cost(), 20.0);
/// ```
pub fn a_star_search<W: WorldQuery>(
    graph: &Graph,
    world: &W,
    max_expansions: usize,
) -> Option<Path> {
    let Some(start) = graph.start() else {
        log::debug!("search aborted: the Graph has no start");
        return None;
    };
    if graph.goals().is_empty() {
        log::debug!("search aborted: the Graph has no goal");
        return None;
    }

    let mut heuristic = vec![Cost::INFINITY; graph.len()];
    for (id, vertex) in graph.vertices() {
        heuristic[id] = graph
            .goals()
            .iter()
            .map(|&goal| world.shortest_distance(vertex.position(), graph[goal].position()))
            .fold(Cost::INFINITY, Cost::min);
    }

    if heuristic[start] == 0.0 {
        log::debug!("search finished: the start already is on a goal");
        let position = graph[start].position();
        return Some(Path::new(vec![start], vec![position], vec![], 0.0));
    }

    let mut search = Search {
        graph,
        heuristic,
        expanded: vec![false; graph.len()],
        nodes: Vec::with_capacity(graph.edge_count()),
        frontier: BinaryHeap::with_capacity(graph.edge_count()),
        sequence: 0,
    };

    search.nodes.push(SearchNode {
        vertex: start,
        parent: None,
        edge: None,
        cost: 0.0,
    });
    search.expanded[start] = true;
    search.push_successors(0);

    let mut expansions = 0;
    let goal_node = loop {
        if expansions >= max_expansions {
            log::debug!(
                "search gave up after {} expansions ({} entries left)",
                expansions,
                search.frontier.len()
            );
            return None;
        }

        let Some(current) = search.pop_unexpanded() else {
            log::debug!("search exhausted the frontier after {} expansions", expansions);
            return None;
        };

        let vertex = search.nodes[current].vertex;
        if graph[vertex].is_goal() {
            break current;
        }

        search.expanded[vertex] = true;
        expansions += 1;
        search.push_successors(current);
    };

    let path = search.reconstruct(goal_node);
    log::debug!(
        "search found a Path of {} Vertices costing {:.2} after {} expansions",
        path.len(),
        path.cost(),
        expansions
    );
    Some(path)
}
