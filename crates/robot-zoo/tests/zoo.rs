//! Tests for robots simulated together.

use float_cmp::approx_eq;
use robot_zoo::{Individual, Mass, PhysicsConfig, PhysicsEngine, Zoo, ZooError};
use test_case::test_case;

mod common;

fn seeds(n: usize, config: &PhysicsConfig) -> Result<Vec<Individual>, ZooError> {
    (0..n).map(|_| Individual::two_cube_seed(config)).collect()
}

#[test_case(5.0 ; "default spacing")]
#[test_case(2.5 ; "tight spacing")]
fn grid_places_robots_row_by_row(spacing: f64) -> Result<(), ZooError> {
    let config = PhysicsConfig::default();
    let zoo = Zoo::grid(seeds(9, &config)?, spacing);
    assert_eq!(zoo.len(), 9);

    let expected = [
        [-1.0, 1.0],
        [0.0, 1.0],
        [1.0, 1.0],
        [-1.0, 0.0],
        [0.0, 0.0],
        [1.0, 0.0],
        [-1.0, -1.0],
        [0.0, -1.0],
        [1.0, -1.0],
    ];
    for (robot, [x, y]) in zoo.individuals().iter().zip(expected) {
        let [cx, cy, _] = robot.center_of_mass().ok_or(ZooError::EmptyIndividual)?;
        // The seed's centre of mass sits half an edge along +y.
        assert!(approx_eq!(f64, cx, x * spacing, epsilon = 1e-12), "{cx} vs {}", x * spacing);
        assert!(approx_eq!(f64, cy, y * spacing + 0.5, epsilon = 1e-12), "{cy} vs {}", y * spacing);
    }
    Ok(())
}

#[test]
fn extra_robots_stay_where_they_are() -> Result<(), ZooError> {
    let config = PhysicsConfig::default();
    let zoo = Zoo::grid(seeds(10, &config)?, Zoo::DEFAULT_SPACING);
    let [x, y, _] = zoo.individuals()[9].center_of_mass().ok_or(ZooError::EmptyIndividual)?;
    assert!(approx_eq!(f64, x, 0.0, epsilon = 1e-12));
    assert!(approx_eq!(f64, y, 0.5, epsilon = 1e-12));
    Ok(())
}

#[test]
fn shared_clock_ticks_once_per_step() -> Result<(), ZooError> {
    let config = PhysicsConfig::default();
    let engine = PhysicsEngine::new(config)?;
    let mut zoo = Zoo::grid(seeds(4, &config)?, Zoo::DEFAULT_SPACING);

    zoo.run(&engine, 10, false);
    zoo.run(&engine, 10, true);

    let expected = (0..20).fold(0.0, |t, _| t + config.dt());
    assert_eq!(zoo.clock().time(), expected);
    Ok(())
}

#[test]
fn parallel_and_sequential_zoos_agree() -> Result<(), ZooError> {
    let config = PhysicsConfig::default().with_drop_height(0.3);
    let engine = PhysicsEngine::new(config)?;

    let mut robots = seeds(9, &config)?;
    for (i, robot) in robots.iter_mut().enumerate() {
        common::randomize_actuation(robot, i as u64)?;
    }
    let mut sequential = Zoo::grid(robots.clone(), Zoo::DEFAULT_SPACING);
    let mut parallel = Zoo::grid(robots, Zoo::DEFAULT_SPACING);

    sequential.run(&engine, 300, false);
    parallel.run(&engine, 300, true);

    assert_eq!(sequential.frames(), parallel.frames());
    assert_eq!(sequential.displacements(), parallel.displacements());
    Ok(())
}

#[test]
fn robots_in_a_zoo_do_not_interact() -> Result<(), ZooError> {
    let config = PhysicsConfig::default().with_drop_height(0.3);
    let engine = PhysicsEngine::new(config)?;

    let mut robot = Individual::two_cube_seed(&config)?;
    common::randomize_actuation(&mut robot, 1)?;
    let mut neighbour = Individual::two_cube_seed(&config)?;
    common::randomize_actuation(&mut neighbour, 2)?;

    let mut zoo = Zoo::new(vec![robot.clone(), neighbour]);
    let mut alone = Zoo::new(vec![robot]);
    zoo.run(&engine, 200, false);
    alone.run(&engine, 200, false);

    assert_eq!(zoo.frames()[0], alone.frames()[0]);
    Ok(())
}

#[test]
fn displacements_track_horizontal_travel() -> Result<(), ZooError> {
    let config = PhysicsConfig::default().with_gravity([0.0; 3]);
    let engine = PhysicsEngine::new(config)?;

    let mut drifting = Individual::new();
    drifting.add_mass(Mass::new(0.1, [0.0, 0.0, 1.0], [3.0, 4.0, 1.0])?);
    let mut resting = Individual::new();
    resting.add_mass(Mass::at_rest(0.1, [0.0, 0.0, 1.0])?);

    let mut zoo = Zoo::grid(vec![drifting, resting], Zoo::DEFAULT_SPACING);
    assert_eq!(zoo.displacements(), vec![0.0, 0.0]);

    // 1000 steps of 1e-4 at a horizontal speed of 5.
    zoo.run(&engine, 1_000, false);
    let displacements = zoo.displacements();
    assert!(approx_eq!(f64, displacements[0], 0.5, epsilon = 1e-9), "{displacements:?}");
    assert_eq!(displacements[1], 0.0);

    let empty = Zoo::new(vec![Individual::new()]);
    assert_eq!(empty.displacements(), vec![0.0]);
    assert!(Zoo::new(Vec::new()).is_empty());
    Ok(())
}
