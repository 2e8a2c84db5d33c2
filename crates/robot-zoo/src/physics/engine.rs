//! The stepping pipeline.

use rayon::prelude::*;

use super::SimulationClock;
use crate::{Individual, PhysicsConfig, ZooError};

/// Advances soft robots by fixed time-steps.
///
/// Each step runs, in order:
///
/// 1. force reset, with every mass starting from its weight,
/// 2. actuated spring forces,
/// 3. static or kinetic ground friction for masses touching the ground,
/// 4. semi-implicit Euler integration,
/// 5. inelastic collision with the ground plane at `z = 0`.
///
/// Forces for all masses are computed from the positions at the start of the step before any
/// mass moves. Stepping is deterministic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsEngine {
    /// The physical constants.
    config: PhysicsConfig,
}

impl PhysicsEngine {
    /// Creates a new engine.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if the configuration does not validate.
    pub fn new(config: PhysicsConfig) -> Result<Self, ZooError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the physical constants of the engine.
    #[must_use]
    pub const fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Advances the clock by one time-step and then steps the `Individual` at the new time.
    pub fn simulation_step(&self, individual: &mut Individual, clock: &mut SimulationClock) {
        let t = clock.advance(self.config.dt());
        self.step_at(individual, t);
    }

    /// As [`PhysicsEngine::simulation_step`], then checks that the state is still finite.
    ///
    /// # Errors
    ///
    /// - `DegenerateGeometry` naming the first mass whose position, velocity, or force is not
    ///   finite. The step has already been applied.
    pub fn try_simulation_step(
        &self,
        individual: &mut Individual,
        clock: &mut SimulationClock,
    ) -> Result<(), ZooError> {
        self.simulation_step(individual, clock);
        match individual.masses().find(|(_, m)| !m.is_finite()) {
            Some((id, m)) => {
                ftlog::warn!("Non-finite state at t = {}: {id:?} {m:?}", clock.time());
                Err(ZooError::DegenerateGeometry(format!(
                    "mass {id:?} has non-finite state at t = {}",
                    clock.time()
                )))
            }
            None => Ok(()),
        }
    }

    /// Steps the `Individual` `steps` times.
    pub fn simulate(&self, individual: &mut Individual, clock: &mut SimulationClock, steps: usize) {
        for _ in 0..steps {
            self.simulation_step(individual, clock);
        }
    }

    /// Advances a shared clock once and steps every `Individual` at the new time.
    ///
    /// This is the same as stepping the union of all their masses and springs.
    pub fn step_many(&self, individuals: &mut [Individual], clock: &mut SimulationClock) {
        let t = clock.advance(self.config.dt());
        for individual in individuals {
            self.step_at(individual, t);
        }
    }

    /// Parallel version of [`PhysicsEngine::step_many`].
    ///
    /// Individuals share no masses, so each one is stepped on its own task. The result is the
    /// same as the sequential version.
    pub fn par_step_many(&self, individuals: &mut [Individual], clock: &mut SimulationClock) {
        let t = clock.advance(self.config.dt());
        individuals.par_iter_mut().for_each(|individual| self.step_at(individual, t));
    }

    /// Runs the whole pipeline once at time `t` without touching any clock.
    pub fn step_at(&self, individual: &mut Individual, t: f64) {
        self.accumulate_forces(individual, t);
        self.integrate(individual);
    }

    /// Computes the force on every `Mass` at time `t`: weight, then springs, then friction.
    ///
    /// Positions and velocities are not changed.
    pub fn accumulate_forces(&self, individual: &mut Individual, t: f64) {
        let gravity = self.config.gravity();
        individual.masses.values_mut().for_each(|m| m.reset_force(gravity));

        self.apply_spring_forces(individual, t);
        self.apply_ground_friction(individual);
    }

    /// Adds the force of every `Spring` to its endpoints.
    fn apply_spring_forces(&self, individual: &mut Individual, t: f64) {
        let omega = self.config.omega();

        // Calculate the forces exerted by the springs
        let forces = individual
            .springs
            .values()
            .filter_map(|s| {
                let (m1, m2) = s.endpoints();
                let p1 = individual.masses.get(m1)?.position;
                let p2 = individual.masses.get(m2)?.position;
                Some((m1, m2, s.force(p1, p2, t, omega)))
            })
            .collect::<Vec<_>>();

        // Accumulate the forces for each mass
        for (m1, m2, force) in forces {
            if let Some(m) = individual.masses.get_mut(m1) {
                m.sub_force(force);
            }
            if let Some(m) = individual.masses.get_mut(m2) {
                m.add_force(force);
            }
        }
    }

    /// Applies ground friction to the horizontal force of every `Mass` touching the ground.
    ///
    /// If the horizontal force is within the static limit `μ_s·|F_n|` it is cancelled. Otherwise
    /// a force of magnitude `μ_k·|F_n|` is subtracted along its direction, which may overshoot.
    fn apply_ground_friction(&self, individual: &mut Individual) {
        let gz = self.config.gravity()[2];
        let (mu_s, mu_k) = (self.config.static_friction(), self.config.kinetic_friction());

        for mass in individual.masses.values_mut().filter(|m| m.in_ground_contact()) {
            let normal = mass.m * gz;
            if normal >= 0.0 {
                // Not pressed into the ground.
                continue;
            }

            let [fx, fy, _] = mass.force;
            let horizontal = fx.hypot(fy);
            if horizontal <= mu_s * normal.abs() {
                mass.force[0] = 0.0;
                mass.force[1] = 0.0;
            } else if horizontal > 0.0 {
                let friction = (mu_k * normal).abs();
                mass.force[0] -= friction * fx / horizontal;
                mass.force[1] -= friction * fy / horizontal;
            }
        }
    }

    /// Moves every `Mass` with its accumulated force and resolves ground penetration.
    pub fn integrate(&self, individual: &mut Individual) {
        let (dt, damping) = (self.config.dt(), self.config.collision_damping());
        for mass in individual.masses.values_mut() {
            mass.integrate(dt);
            mass.collide_with_ground(damping);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Mass, Spring};

    #[test]
    fn kinetic_friction_reduces_horizontal_force() -> Result<(), ZooError> {
        let config = PhysicsConfig::default();
        let engine = PhysicsEngine::new(config)?;

        // Two masses on the ground, pulled apart along x by a stretched spring.
        let mut individual = Individual::new();
        let a = individual.add_mass(Mass::at_rest(0.1, [0.0, 0.0, 0.0])?);
        let b = individual.add_mass(Mass::at_rest(0.1, [2.0, 0.0, 0.0])?);
        individual.add_spring(Spring::new(a, b, 1.0, 1000.0))?;

        engine.accumulate_forces(&mut individual, 0.0);

        // |F_n| = 0.981, spring pull = 1000, so the kinetic branch applies.
        let normal = 0.1 * 9.81;
        let fa = individual.mass(a).map(|m| *m.force()).unwrap_or_default();
        let fb = individual.mass(b).map(|m| *m.force()).unwrap_or_default();
        assert!(float_cmp::approx_eq!(f64, fa[0], 1000.0 - 0.8 * normal, epsilon = 1e-9));
        assert!(float_cmp::approx_eq!(f64, fb[0], -1000.0 + 0.8 * normal, epsilon = 1e-9));
        assert_eq!(fa[1], 0.0);
        assert_eq!(fb[1], 0.0);
        Ok(())
    }

    #[test]
    fn static_friction_holds_small_pull() -> Result<(), ZooError> {
        let engine = PhysicsEngine::new(PhysicsConfig::default())?;

        // A slightly stretched spring pulls with 0.5 N, below μ_s·|F_n| = 0.981 N.
        let mut individual = Individual::new();
        let a = individual.add_mass(Mass::at_rest(0.1, [0.0, 0.0, 0.0])?);
        let b = individual.add_mass(Mass::at_rest(0.1, [1.0005, 0.0, 0.0])?);
        individual.add_spring(Spring::new(a, b, 1.0, 1000.0))?;

        engine.accumulate_forces(&mut individual, 0.0);
        for (_, m) in individual.masses() {
            assert_eq!(m.force()[0], 0.0);
            assert_eq!(m.force()[1], 0.0);
        }
        Ok(())
    }

    #[test]
    fn airborne_masses_feel_no_friction() -> Result<(), ZooError> {
        let engine = PhysicsEngine::new(PhysicsConfig::default())?;

        let mut individual = Individual::new();
        let a = individual.add_mass(Mass::at_rest(0.1, [0.0, 0.0, 1.0])?);
        let b = individual.add_mass(Mass::at_rest(0.1, [1.0005, 0.0, 1.0])?);
        individual.add_spring(Spring::new(a, b, 1.0, 1000.0))?;

        engine.accumulate_forces(&mut individual, 0.0);
        let fa = individual.mass(a).map(|m| *m.force()).unwrap_or_default();
        assert!(float_cmp::approx_eq!(f64, fa[0], 0.5, epsilon = 1e-9));
        Ok(())
    }
}
