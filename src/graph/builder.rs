use super::{Graph, VertexId, VertexRole};
use crate::{
    world::{Obstacle, ObstacleIdSet, WorldQuery},
    Cost, Point, PlannerConfig,
};

use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Builds a random visibility Graph from `start` to `goal`.
///
/// The Graph contains, in this order:
/// 1. the start Vertex
/// 2. one Vertex per [bonus waypoint](WorldQuery::bonus_waypoints)
/// 3. the goal Vertex (even if it coincides with a bonus waypoint)
/// 4. up to [`sample_count`](PlannerConfig::sample_count) random Points that keep
///    [`safety_margin`](PlannerConfig::safety_margin) to every Obstacle
///
/// Every pair of Vertices closer than
/// [`max_connection_distance`](PlannerConfig::max_connection_distance) is connected if the line
/// between them [is clear](WorldQuery::is_path_clear) of all Obstacles that are not in
/// `excluded`. Excluding the object that is the goal (or friendly objects the agent may pass
/// through) allows Paths to end at or run through them.
///
/// The resulting Graph may well be disconnected; that just means there is no Path.
///
/// The random source is only used for sampling, so the same `rng` state always produces the
/// same Graph.
pub fn build_graph<W, R>(
    world: &W,
    start: Point,
    goal: Point,
    excluded: &ObstacleIdSet,
    config: &PlannerConfig,
    rng: &mut R,
) -> Graph
where
    W: WorldQuery + Sync,
    R: Rng + ?Sized,
{
    let bonus_waypoints = world.bonus_waypoints();
    let mut graph = Graph::with_capacity(2 + bonus_waypoints.len() + config.sample_count);

    graph.add_vertex(start, VertexRole::Start);
    for &waypoint in bonus_waypoints {
        graph.add_vertex(waypoint, VertexRole::Waypoint);
    }
    graph.add_vertex(goal, VertexRole::Goal);

    let mut rejected = 0;
    for _ in 0..config.sample_count {
        let candidate = Point::new(
            rng.gen::<f64>() * world.width(),
            rng.gen::<f64>() * world.height(),
        );
        if world.is_in_free_space(candidate, config.safety_margin) {
            graph.add_vertex(candidate, VertexRole::Waypoint);
        } else {
            rejected += 1;
        }
    }

    let obstacles: Vec<Obstacle> = world
        .obstacles()
        .iter()
        .filter(|obstacle| !excluded.contains(&obstacle.id))
        .copied()
        .collect();

    let positions: Vec<(VertexId, Point)> = graph
        .vertices()
        .map(|(id, vertex)| (id, vertex.position()))
        .collect();

    let links_from = |index: usize| -> Vec<(VertexId, VertexId, Cost)> {
        let (a, from) = positions[index];
        positions[index + 1..]
            .iter()
            .filter_map(|&(b, to)| {
                let distance = world.shortest_distance(from, to);
                let linked = distance > 0.0
                    && distance < config.max_connection_distance
                    && world.is_path_clear(from, to, &obstacles, config.safety_margin);
                linked.then_some((a, b, distance))
            })
            .collect()
    };

    // merged in index order, so the Edge ids do not depend on the thread count
    #[cfg(feature = "parallel")]
    let links: Vec<Vec<_>> = (0..positions.len()).into_par_iter().map(links_from).collect();
    #[cfg(not(feature = "parallel"))]
    let links: Vec<Vec<_>> = (0..positions.len()).map(links_from).collect();

    for (a, b, cost) in links.into_iter().flatten() {
        graph.add_edge(a, b, cost);
    }

    log::debug!(
        "built Graph with {} Vertices ({} samples rejected) and {} Edges around {} Obstacles",
        graph.len(),
        rejected,
        graph.edge_count(),
        obstacles.len(),
    );

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{ObstacleId, ToroidalWorld};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn crowded_world() -> ToroidalWorld {
        let mut world = ToroidalWorld::new(1000.0, 1000.0).unwrap();
        for i in 0..5 {
            for j in 0..5 {
                let position = Point::new(100.0 + 200.0 * i as f64, 100.0 + 200.0 * j as f64);
                world.add_obstacle(position, 20.0 + 5.0 * ((i + j) % 3) as f64);
            }
        }
        world
    }

    fn build(world: &ToroidalWorld, excluded: &ObstacleIdSet, seed: u64) -> Graph {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        build_graph(
            world,
            Point::new(0.0, 0.0),
            Point::new(500.0, 300.0),
            excluded,
            &PlannerConfig::default(),
            &mut rng,
        )
    }

    #[test]
    fn fixed_vertices_come_first() {
        let world = ToroidalWorld::new(1000.0, 1000.0)
            .unwrap()
            .with_bonus_waypoint(Point::new(250.0, 250.0))
            .with_bonus_waypoint(Point::new(500.0, 300.0));
        let graph = build(&world, &ObstacleIdSet::default(), 1);

        assert_eq!(graph.start(), Some(0));
        assert_eq!(graph[1].position(), Point::new(250.0, 250.0));
        // the goal coincides with a bonus waypoint, but both are added
        assert_eq!(graph[2].position(), Point::new(500.0, 300.0));
        assert_eq!(graph.goals(), &[3]);
        assert_eq!(graph[3].position(), Point::new(500.0, 300.0));
        // nothing blocks sampling on an empty board
        assert_eq!(graph.len(), 4 + PlannerConfig::default().sample_count);
        // coinciding Vertices are never connected
        assert!(!graph.is_connected(2, 3));
    }

    #[test]
    fn samples_keep_clearance() {
        let world = crowded_world();
        let config = PlannerConfig::default();
        let graph = build(&world, &ObstacleIdSet::default(), 2);

        for (_, vertex) in graph.vertices().skip(2) {
            for obstacle in world.obstacles() {
                let distance = world.shortest_distance(vertex.position(), obstacle.position);
                assert!(distance >= obstacle.radius + config.safety_margin);
            }
        }
    }

    #[test]
    fn edges_keep_clearance() {
        let world = crowded_world();
        let config = PlannerConfig::default();
        let graph = build(&world, &ObstacleIdSet::default(), 3);
        assert!(graph.edge_count() > 0);

        for edge in graph.edges() {
            let (a, b) = edge.endpoints();
            let from = graph[a].position();
            let line = world.shortest_vector(from, graph[b].position());

            assert!(edge.cost() > 0.0);
            assert!(edge.cost() < config.max_connection_distance);
            assert!((edge.cost() - line.length()).abs() < 1e-9);

            for obstacle in world.obstacles() {
                let offset = world.shortest_vector(from, obstacle.position);
                let t = (offset.dot(line) / line.length_squared()).clamp(0.0, 1.0);
                let closest = from + line * t;
                let distance = world.shortest_distance(closest, obstacle.position);
                assert!(distance >= obstacle.radius + config.safety_margin - 1e-9);
            }
        }
    }

    #[test]
    fn same_seed_same_graph() {
        let world = crowded_world();
        let first = build(&world, &ObstacleIdSet::default(), 42);
        let second = build(&world, &ObstacleIdSet::default(), 42);

        let positions = |graph: &Graph| -> Vec<Point> {
            graph.vertices().map(|(_, vertex)| vertex.position()).collect()
        };
        assert_eq!(positions(&first), positions(&second));
        assert_eq!(first.edges(), second.edges());

        let other = build(&world, &ObstacleIdSet::default(), 43);
        assert_ne!(positions(&first), positions(&other));
    }

    #[test]
    fn excluded_obstacles_do_not_block() {
        // the goal sits right next to an Obstacle
        let world = ToroidalWorld::new(1000.0, 1000.0)
            .unwrap()
            .with_obstacle(Point::new(500.0, 320.0), 15.0);
        let config = PlannerConfig {
            sample_count: 0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let start = Point::new(500.0, 400.0);
        let goal = Point::new(500.0, 300.0);

        let blocked = build_graph(&world, start, goal, &ObstacleIdSet::default(), &config, &mut rng);
        assert_eq!(blocked.edge_count(), 0);

        let excluded: ObstacleIdSet = [ObstacleId(0)].into_iter().collect();
        let clear = build_graph(&world, start, goal, &excluded, &config, &mut rng);
        assert_eq!(clear.edge_count(), 1);
        assert!(clear.is_connected(0, 1));
    }

    #[test]
    fn no_samples_in_a_full_world() {
        let world = ToroidalWorld::new(100.0, 100.0)
            .unwrap()
            .with_obstacle(Point::new(50.0, 50.0), 100.0);
        let graph = build(&world, &ObstacleIdSet::default(), 5);

        assert_eq!(graph.len(), 2);
    }
}
