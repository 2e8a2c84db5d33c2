//! Tests for the morphology mutation operators.

use rand::{rngs::StdRng, SeedableRng};
use robot_zoo::{physics::vector, Individual, Mass, MorphologyMutator, MutationConfig, PhysicsConfig, ZooError};
use test_case::test_case;

mod common;

fn mutator(config: MutationConfig) -> Result<MorphologyMutator, ZooError> {
    MorphologyMutator::new(&PhysicsConfig::default(), config)
}

#[test_case(1 ; "one spring")]
#[test_case(5 ; "five springs")]
#[test_case(12 ; "every mass")]
fn add_random_mass_grows_the_robot(n: usize) -> Result<(), ZooError> {
    let physics = PhysicsConfig::default();
    let mutator = mutator(MutationConfig::default().with_new_mass_spring_num(n))?;
    let mut robot = Individual::two_cube_seed(&physics)?;
    let mut rng = StdRng::seed_from_u64(42);

    let new_mass = mutator.add_random_mass(&mut robot, &mut rng)?;
    assert_eq!(robot.mass_count(), 13);
    assert_eq!(robot.spring_count(), 50 + n);

    let mass = common::mass_of(&robot, new_mass);
    assert_eq!(mass.m(), physics.default_mass());
    assert!(mass.position().iter().all(|x| (0.0..1.0).contains(x)), "{mass:?}");
    assert!(mass.velocity().iter().all(|x| (0.0..1.0).contains(x)), "{mass:?}");

    for id in robot.springs_of(new_mass) {
        let spring = robot.spring(id).ok_or(ZooError::EmptyIndividual)?;
        let [p1, p2] = robot.spring_endpoints(id).ok_or(ZooError::EmptyIndividual)?;
        assert_eq!(spring.l0(), vector::distance(p1, p2), "new springs start without tension");
        assert_eq!(spring.k(), physics.spring_constant());
    }
    robot.validate()
}

#[test]
fn add_random_mass_needs_enough_masses() -> Result<(), ZooError> {
    let mutator = mutator(MutationConfig::default())?;
    let mut rng = StdRng::seed_from_u64(0);

    let mut robot = Individual::new();
    assert_eq!(
        mutator.add_random_mass(&mut robot, &mut rng),
        Err(ZooError::InsufficientMasses {
            required: 5,
            available: 0
        })
    );
    assert!(robot.is_empty());

    for i in 0..5 {
        robot.add_mass(Mass::at_rest(0.1, [f64::from(i), 0.0, 0.0])?);
    }
    mutator.add_random_mass(&mut robot, &mut rng)?;
    assert_eq!(robot.mass_count(), 6);
    assert_eq!(robot.spring_count(), 5);
    Ok(())
}

#[test]
fn remove_random_mass_until_empty() -> Result<(), ZooError> {
    let mutator = mutator(MutationConfig::default())?;
    let mut robot = Individual::two_cube_seed(&PhysicsConfig::default())?;
    let mut rng = StdRng::seed_from_u64(7);

    for left in (0..12).rev() {
        let victim = mutator.remove_random_mass(&mut robot, &mut rng)?;
        assert!(!robot.contains_mass(victim));
        assert!(robot.springs().all(|(_, s)| !s.connects(victim)));
        assert_eq!(robot.mass_count(), left);
        robot.validate()?;
    }

    assert_eq!(robot.spring_count(), 0);
    assert_eq!(
        mutator.remove_random_mass(&mut robot, &mut rng),
        Err(ZooError::EmptyIndividual)
    );
    Ok(())
}

#[test]
fn perturb_actuation_draws_from_ranges() -> Result<(), ZooError> {
    let config = MutationConfig::default()
        .with_stiffness_range([900.0, 950.0])
        .with_offset_range([0.1, 0.15])
        .with_phase_range([1.0, 2.0])
        .with_springs_to_mutate(10);
    let mutator = mutator(config)?;
    let mut robot = Individual::two_cube_seed(&PhysicsConfig::default())?;
    let mut rng = StdRng::seed_from_u64(11);

    let mut changed = mutator.perturb_actuation(&mut robot, &mut rng)?;
    assert_eq!(changed.len(), 10);

    for &id in &changed {
        let spring = robot.spring(id).ok_or(ZooError::EmptyIndividual)?;
        let actuation = spring.actuation();
        assert!((900.0..=950.0).contains(&spring.k()), "{spring:?}");
        assert!((0.1..=0.15).contains(&actuation.offset), "{spring:?}");
        assert!((1.0..=2.0).contains(&actuation.phase), "{spring:?}");
        assert_eq!(actuation.amplitude, spring.l0());
    }

    changed.sort_unstable();
    changed.dedup();
    assert_eq!(changed.len(), 10, "perturbed springs should be distinct");

    let untouched = robot.springs().filter(|(id, _)| !changed.contains(id));
    for (_, spring) in untouched {
        assert_eq!(spring.actuation().offset, 0.0);
        assert_eq!(spring.k(), 1000.0);
    }
    Ok(())
}

#[test]
fn perturb_actuation_on_small_robots() -> Result<(), ZooError> {
    let mutator = mutator(MutationConfig::default())?;
    let mut rng = StdRng::seed_from_u64(5);

    let mut robot = Individual::new();
    let a = robot.add_mass(Mass::at_rest(0.1, [0.0, 0.0, 0.0])?);
    assert_eq!(mutator.perturb_actuation(&mut robot, &mut rng), Err(ZooError::EmptyIndividual));

    let b = robot.add_mass(Mass::at_rest(0.1, [1.0, 0.0, 0.0])?);
    let only = robot.connect(a, b, 1000.0)?;
    assert_eq!(mutator.perturb_actuation(&mut robot, &mut rng)?, vec![only]);
    Ok(())
}

#[test]
fn seeded_mutation_is_reproducible() -> Result<(), ZooError> {
    let physics = PhysicsConfig::default();
    let mutator = mutator(MutationConfig::default())?;

    let evolve = |seed: u64| -> Result<Individual, ZooError> {
        let mut robot = Individual::two_cube_seed(&physics)?;
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..4 {
            mutator.add_random_mass(&mut robot, &mut rng)?;
            mutator.perturb_actuation(&mut robot, &mut rng)?;
        }
        mutator.remove_random_mass(&mut robot, &mut rng)?;
        Ok(robot)
    };

    let first = evolve(2024)?;
    let second = evolve(2024)?;
    assert_eq!(first.to_record(), second.to_record());

    let other = evolve(2025)?;
    assert_ne!(first.to_record(), other.to_record());
    Ok(())
}

#[test]
fn rejects_invalid_configuration() {
    let bad = [
        MutationConfig::default().with_stiffness_range([1200.0, 1000.0]),
        MutationConfig::default().with_offset_range([f64::NAN, 0.3]),
        MutationConfig::default().with_probabilities(1.5, 0.2),
    ];
    for config in bad {
        assert!(
            matches!(mutator(config), Err(ZooError::InvalidConfig(_))),
            "accepted {config:?}"
        );
    }
}
