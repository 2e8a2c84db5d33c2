//! Helpers shared by the integration tests.

#![allow(dead_code)]

use rand::{rngs::StdRng, SeedableRng};
use robot_zoo::{Individual, Mass, MassId, MorphologyMutator, MutationConfig, PhysicsConfig, Vec3, ZooError};

pub fn mass_of(individual: &Individual, id: MassId) -> &Mass {
    individual
        .mass(id)
        .unwrap_or_else(|| panic!("{id:?} is not in the individual"))
}

pub fn force_of(individual: &Individual, id: MassId) -> Vec3 {
    *mass_of(individual, id).force()
}

/// Gives every spring of the individual a random actuation drawn from the default ranges.
pub fn randomize_actuation(individual: &mut Individual, seed: u64) -> Result<(), ZooError> {
    let config = MutationConfig::default().with_springs_to_mutate(individual.spring_count());
    let mutator = MorphologyMutator::new(&PhysicsConfig::default(), config)?;
    let mut rng = StdRng::seed_from_u64(seed);
    mutator.perturb_actuation(individual, &mut rng)?;
    Ok(())
}
