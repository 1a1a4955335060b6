use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Instant;
use toroidal_planner::prelude::*;

const SIZE: f64 = 2000.0;
const FIELDS: u64 = 16;
const REQUESTS: usize = 20;

fn random_field(rng: &mut StdRng) -> ToroidalWorld {
    let mut world = ToroidalWorld::new(SIZE, SIZE).unwrap();
    for _ in 0..rng.gen_range(20..120) {
        let position = Point::new(rng.gen_range(0.0..SIZE), rng.gen_range(0.0..SIZE));
        world.add_obstacle(position, rng.gen_range(10.0..80.0));
    }
    for _ in 0..4 {
        world.add_bonus_waypoint(Point::new(rng.gen_range(0.0..SIZE), rng.gen_range(0.0..SIZE)));
    }
    world
}

fn free_point(world: &ToroidalWorld, rng: &mut StdRng) -> Point {
    loop {
        let point = Point::new(rng.gen_range(0.0..SIZE), rng.gen_range(0.0..SIZE));
        if world.is_in_free_space(point, 20.0) {
            return point;
        }
    }
}

/// time taken and the ratio of direct distance to Path cost, if a Path was found
type Sample = (u128, Option<f64>);

fn main() {
    let configs: HashMap<&str, PlannerConfig> = [
        ("default", PlannerConfig::default()),
        ("dense", PlannerConfig::DENSE),
        ("fast", PlannerConfig::FAST),
        (
            "exhaustive",
            PlannerConfig {
                max_expansions: usize::MAX,
                ..PlannerConfig::DENSE
            },
        ),
    ]
    .into_iter()
    .collect();

    let planners: Vec<(&str, Planner)> = configs
        .iter()
        .map(|(&name, &config)| (name, Planner::new(config).unwrap()))
        .collect();

    let samples: Vec<Vec<(&str, Sample)>> = (0..FIELDS)
        .into_par_iter()
        .map(|field| {
            let mut rng = StdRng::seed_from_u64(field);
            let world = random_field(&mut rng);
            let mut samples = vec![];

            for request in 0..REQUESTS {
                let start = free_point(&world, &mut rng);
                let goal = free_point(&world, &mut rng);
                let direct = world.shortest_distance(start, goal);
                let seed = field * REQUESTS as u64 + request as u64;

                for (name, planner) in &planners {
                    let start_time = Instant::now();
                    let plan = planner.plan(&world, start, goal, &ObstacleIdSet::default(), seed);
                    let dt = start_time.elapsed().as_nanos();
                    let quality = plan.path.map(|path| direct / path.cost().max(f64::EPSILON));
                    samples.push((*name, (dt, quality)));
                }
            }
            println!("finished field {}", field);
            samples
        })
        .collect();

    let mut results: HashMap<&str, Vec<Sample>> =
        configs.keys().map(|name| (*name, vec![])).collect();
    for (name, sample) in samples.into_iter().flatten() {
        if let Some(results) = results.get_mut(name) {
            results.push(sample);
        }
    }

    let mut names: Vec<&str> = results.keys().copied().collect();
    names.sort_unstable();
    for name in names {
        let results = &results[name];
        let times = results.iter().map(|r| r.0);
        let min_time = times.clone().min().unwrap_or(0) as f64 / 1_000_000.0;
        let max_time = times.clone().max().unwrap_or(0) as f64 / 1_000_000.0;
        let avg_time = times.sum::<u128>() as f64 / results.len() as f64 / 1_000_000.0;

        let qualities = results.iter().filter_map(|r| r.1);
        let found = qualities.clone().count();
        let min_quality = qualities.clone().fold(f64::INFINITY, f64::min) * 100.0;
        let avg_quality = qualities.sum::<f64>() / found.max(1) as f64 * 100.0;

        println!(
            "{:>10} | {:.3}ms - {:.3}ms; {:.3}ms | found {}/{} | {:.2}% min; {:.2}% avg",
            name,
            min_time,
            max_time,
            avg_time,
            found,
            results.len(),
            min_quality,
            avg_quality,
        );
    }
}
