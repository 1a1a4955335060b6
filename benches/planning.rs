use env_logger::Env;

use criterion::{criterion_group, criterion_main, Criterion};

use nanorand::{Rng, WyRand};
use toroidal_planner::prelude::*;

fn random_field(width: f64, height: f64, count: usize) -> ToroidalWorld {
    let mut world = ToroidalWorld::new(width, height).unwrap();
    let mut rng = WyRand::new_seed(4);
    for _ in 0..count {
        let x = rng.generate_range(0_u32..width as u32) as f64;
        let y = rng.generate_range(0_u32..height as u32) as f64;
        let radius = rng.generate_range(10_u32..50) as f64;
        world.add_obstacle(Point::new(x, y), radius);
    }
    world
}

#[allow(unused)]
// Setup logging output
fn init() {
    let env = Env::default()
        .filter_or("MY_LOG_LEVEL", "debug") // Change this from debug to trace to enable the timings.
        .write_style_or("MY_LOG_STYLE", "always");

    let _ = env_logger::Builder::from_env(env).is_test(true).try_init();
}

fn bench_build_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("Build Graph");
    group.sample_size(20);

    let world = random_field(1000.0, 1000.0, 30);
    let start = Point::new(100.0, 100.0);
    let goal = Point::new(800.0, 600.0);

    for (name, config) in [
        ("Default", PlannerConfig::default()),
        ("Dense", PlannerConfig::DENSE),
        ("Fast", PlannerConfig::FAST),
    ] {
        let planner = Planner::new(config).unwrap();

        #[cfg(feature = "parallel")]
        let id = format!("Build Graph, {} Config, Parallel", name);
        #[cfg(not(feature = "parallel"))]
        let id = format!("Build Graph, {} Config, Single Threaded", name);

        group.bench_function(&id, |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                planner.build_graph(&world, start, goal, &ObstacleIdSet::default(), seed)
            })
        });
    }
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Search");

    let world = random_field(1000.0, 1000.0, 30);
    let start = Point::new(100.0, 100.0);
    let goal = Point::new(800.0, 600.0);

    for (name, config) in [
        ("Default", PlannerConfig::default()),
        ("Dense", PlannerConfig::DENSE),
    ] {
        let planner = Planner::new(config).unwrap();
        let graph = planner.build_graph(&world, start, goal, &ObstacleIdSet::default(), 1);

        let id = format!("Search, {} Config, {} Vertices", name, graph.len());
        group.bench_function(&id, |b| b.iter(|| planner.search(&graph, &world)));
    }
}

fn bench_navigator(c: &mut Criterion) {
    let mut group = c.benchmark_group("Navigator");
    init();

    let world = random_field(2000.0, 2000.0, 100);
    let goal = Point::new(1500.0, 1500.0);
    let excluded = ObstacleIdSet::default();

    group.bench_function("Navigator, 25 Ticks, one replan", |b| {
        b.iter(|| {
            let mut navigator = Navigator::new(PlannerConfig::default(), 7).unwrap();
            let mut position = Point::new(100.0, 100.0);
            for tick in 1..=25 {
                let command = navigator.tick(&world, tick, position, goal, &excluded);
                if let Some(target) = command.target() {
                    position = target;
                }
            }
            position
        })
    });
}

criterion_group!(benches, bench_build_graph, bench_search, bench_navigator);
criterion_main!(benches);
