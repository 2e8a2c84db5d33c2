//! Random mutation of a saved robot.

use std::path::Path;

use rand::Rng;
use robot_zoo::{Individual, MorphologyMutator, MutationConfig, PhysicsConfig, ZooError};

/// Reads a robot, applies `rounds` rounds of mutation, and writes the result.
///
/// In each round a random mass is added with probability `mass_mutation_probability` and a
/// random mass is removed otherwise. Then, with probability `spring_mutation_probability`, the
/// actuation of some springs is redrawn. A structural operator whose precondition does not hold
/// is skipped for that round.
///
/// # Arguments
///
/// * `inp_path` - The robot to mutate.
/// * `out_path` - Where to write the mutated robot.
/// * `rounds` - The number of mutation rounds.
/// * `physics` - Supplies the stiffness and mass of new springs and masses.
/// * `config` - The mutation parameters.
/// * `rng` - The source of randomness.
///
/// # Errors
///
/// - If either configuration is invalid.
/// - If the robot could not be read or written.
pub fn mutate<P: AsRef<Path>, R: Rng>(
    inp_path: P,
    out_path: P,
    rounds: usize,
    physics: &PhysicsConfig,
    config: MutationConfig,
    rng: &mut R,
) -> Result<(), String> {
    let mutator = MorphologyMutator::new(physics, config).map_err(|e| e.to_string())?;
    let mut robot = Individual::load(&inp_path).map_err(|e| e.to_string())?;
    ftlog::info!(
        "Read robot with {} masses and {} springs from {:?}",
        robot.mass_count(),
        robot.spring_count(),
        inp_path.as_ref()
    );

    for round in 0..rounds {
        let structural = if rng.random_bool(config.mass_mutation_probability()) {
            mutator.add_random_mass(&mut robot, rng).map(|_| "added a mass")
        } else {
            mutator.remove_random_mass(&mut robot, rng).map(|_| "removed a mass")
        };
        log_outcome(round, structural)?;

        if rng.random_bool(config.spring_mutation_probability()) {
            let perturbed = mutator.perturb_actuation(&mut robot, rng).map(|_| "perturbed actuation");
            log_outcome(round, perturbed)?;
        }
    }

    robot.save(&out_path).map_err(|e| e.to_string())?;
    ftlog::info!(
        "Wrote robot with {} masses and {} springs to {:?}",
        robot.mass_count(),
        robot.spring_count(),
        out_path.as_ref()
    );
    Ok(())
}

/// Logs the outcome of one operator. Unmet preconditions are logged and skipped.
fn log_outcome(round: usize, outcome: Result<&str, ZooError>) -> Result<(), String> {
    match outcome {
        Ok(action) => {
            ftlog::info!("Round {round}: {action}");
            Ok(())
        }
        Err(e @ (ZooError::InsufficientMasses { .. } | ZooError::EmptyIndividual)) => {
            ftlog::info!("Round {round}: skipped, {e}");
            Ok(())
        }
        Err(e) => Err(e.to_string()),
    }
}
