//! Configuration for the physics engine and the mutation operators.
//!
//! Both configurations are plain values. They are built once, validated, and then handed to a
//! `PhysicsEngine` or a `MorphologyMutator`, so several simulation setups can live side by side.
//!
//! ```
//! use robot_zoo::PhysicsConfig;
//!
//! let config = PhysicsConfig::default()
//!     .with_dt(0.001)
//!     .with_gravity([0.0, 0.0, -1.62])
//!     .with_collision_damping(0.5);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::ZooError;

/// Physical constants used by the stepping pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[must_use]
pub struct PhysicsConfig {
    /// Gravitational acceleration.
    gravity: [f64; 3],
    /// The fixed time-step.
    dt: f64,
    /// The stiffness given to new springs.
    spring_constant: f64,
    /// The edge length of the seed morphology.
    rest_length: f64,
    /// The fraction of vertical speed kept, with reversed sign, when a mass hits the ground.
    collision_damping: f64,
    /// The static friction coefficient `μ_s`.
    static_friction: f64,
    /// The kinetic friction coefficient `μ_k`.
    kinetic_friction: f64,
    /// The angular frequency `ω` of spring actuation.
    omega: f64,
    /// The mass given to new point masses.
    default_mass: f64,
    /// Height at which the seed morphology is placed.
    drop_height: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, 0.0, -9.81],
            dt: 0.0001,
            spring_constant: 1000.0,
            rest_length: 1.0,
            collision_damping: 0.75,
            static_friction: 1.0,
            kinetic_friction: 0.8,
            omega: 2.0 * core::f64::consts::PI * 2.0,
            default_mass: 0.1,
            drop_height: 0.0,
        }
    }
}

impl PhysicsConfig {
    /// Returns the gravitational acceleration.
    #[must_use]
    pub const fn gravity(&self) -> [f64; 3] {
        self.gravity
    }

    /// Returns the fixed time-step.
    #[must_use]
    pub const fn dt(&self) -> f64 {
        self.dt
    }

    /// Returns the stiffness given to new springs.
    #[must_use]
    pub const fn spring_constant(&self) -> f64 {
        self.spring_constant
    }

    /// Returns the edge length of the seed morphology.
    #[must_use]
    pub const fn rest_length(&self) -> f64 {
        self.rest_length
    }

    /// Returns the collision damping coefficient.
    #[must_use]
    pub const fn collision_damping(&self) -> f64 {
        self.collision_damping
    }

    /// Returns the static friction coefficient.
    #[must_use]
    pub const fn static_friction(&self) -> f64 {
        self.static_friction
    }

    /// Returns the kinetic friction coefficient.
    #[must_use]
    pub const fn kinetic_friction(&self) -> f64 {
        self.kinetic_friction
    }

    /// Returns the angular frequency of spring actuation.
    #[must_use]
    pub const fn omega(&self) -> f64 {
        self.omega
    }

    /// Returns the mass given to new point masses.
    #[must_use]
    pub const fn default_mass(&self) -> f64 {
        self.default_mass
    }

    /// Returns the height at which the seed morphology is placed.
    #[must_use]
    pub const fn drop_height(&self) -> f64 {
        self.drop_height
    }

    /// Sets the gravitational acceleration.
    pub const fn with_gravity(mut self, gravity: [f64; 3]) -> Self {
        self.gravity = gravity;
        self
    }

    /// Sets the time-step.
    pub const fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Sets the stiffness given to new springs.
    pub const fn with_spring_constant(mut self, k: f64) -> Self {
        self.spring_constant = k;
        self
    }

    /// Sets the edge length of the seed morphology.
    pub const fn with_rest_length(mut self, rest_length: f64) -> Self {
        self.rest_length = rest_length;
        self
    }

    /// Sets the collision damping coefficient.
    pub const fn with_collision_damping(mut self, damping: f64) -> Self {
        self.collision_damping = damping;
        self
    }

    /// Sets the static and kinetic friction coefficients.
    pub const fn with_friction(mut self, static_friction: f64, kinetic_friction: f64) -> Self {
        self.static_friction = static_friction;
        self.kinetic_friction = kinetic_friction;
        self
    }

    /// Sets the angular frequency of spring actuation.
    pub const fn with_omega(mut self, omega: f64) -> Self {
        self.omega = omega;
        self
    }

    /// Sets the mass given to new point masses.
    pub const fn with_default_mass(mut self, m: f64) -> Self {
        self.default_mass = m;
        self
    }

    /// Sets the height at which the seed morphology is placed.
    pub const fn with_drop_height(mut self, drop_height: f64) -> Self {
        self.drop_height = drop_height;
        self
    }

    /// Checks that every value is usable by the engine.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if any value is non-finite, or if `dt`, the spring constant, or the
    ///   default mass is not positive, or if the rest length or a friction coefficient is negative.
    pub fn validate(&self) -> Result<(), ZooError> {
        let scalars = [
            ("dt", self.dt),
            ("spring_constant", self.spring_constant),
            ("rest_length", self.rest_length),
            ("collision_damping", self.collision_damping),
            ("static_friction", self.static_friction),
            ("kinetic_friction", self.kinetic_friction),
            ("omega", self.omega),
            ("default_mass", self.default_mass),
            ("drop_height", self.drop_height),
        ];
        if let Some((name, value)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ZooError::InvalidConfig(format!("{name} must be finite, got {value}")));
        }
        if self.gravity.iter().any(|g| !g.is_finite()) {
            return Err(ZooError::InvalidConfig(format!("gravity must be finite, got {:?}", self.gravity)));
        }

        for (name, value) in [
            ("dt", self.dt),
            ("spring_constant", self.spring_constant),
            ("default_mass", self.default_mass),
        ] {
            if value <= 0.0 {
                return Err(ZooError::InvalidConfig(format!("{name} must be positive, got {value}")));
            }
        }
        for (name, value) in [
            ("rest_length", self.rest_length),
            ("static_friction", self.static_friction),
            ("kinetic_friction", self.kinetic_friction),
        ] {
            if value < 0.0 {
                return Err(ZooError::InvalidConfig(format!("{name} must be non-negative, got {value}")));
            }
        }

        Ok(())
    }
}

/// Parameters for the mutation operators and for the evolutionary loop that calls them.
///
/// Only `new_mass_spring_num`, the three ranges, and `springs_to_mutate` are read by
/// `MorphologyMutator`. The probabilities are carried for the caller that schedules mutations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[must_use]
pub struct MutationConfig {
    /// How many existing masses a new mass is connected to.
    new_mass_spring_num: usize,
    /// Range for redrawn spring stiffness.
    stiffness_range: [f64; 2],
    /// Range for the redrawn actuation offset `b`.
    offset_range: [f64; 2],
    /// Range for the redrawn actuation phase `c`.
    phase_range: [f64; 2],
    /// Probability that a round of mutation changes the mass set.
    mass_mutation_probability: f64,
    /// Probability that a round of mutation perturbs spring actuation.
    spring_mutation_probability: f64,
    /// How many springs a single actuation perturbation touches.
    springs_to_mutate: usize,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            new_mass_spring_num: 5,
            stiffness_range: [1000.0, 1200.0],
            offset_range: [0.2, 0.3],
            phase_range: [0.0, 2.0 * core::f64::consts::PI * 0.1],
            mass_mutation_probability: 0.5,
            spring_mutation_probability: 0.2,
            springs_to_mutate: 3,
        }
    }
}

impl MutationConfig {
    /// Returns how many existing masses a new mass is connected to.
    #[must_use]
    pub const fn new_mass_spring_num(&self) -> usize {
        self.new_mass_spring_num
    }

    /// Returns the range for redrawn spring stiffness.
    #[must_use]
    pub const fn stiffness_range(&self) -> [f64; 2] {
        self.stiffness_range
    }

    /// Returns the range for the redrawn actuation offset.
    #[must_use]
    pub const fn offset_range(&self) -> [f64; 2] {
        self.offset_range
    }

    /// Returns the range for the redrawn actuation phase.
    #[must_use]
    pub const fn phase_range(&self) -> [f64; 2] {
        self.phase_range
    }

    /// Returns the probability that a round of mutation changes the mass set.
    #[must_use]
    pub const fn mass_mutation_probability(&self) -> f64 {
        self.mass_mutation_probability
    }

    /// Returns the probability that a round of mutation perturbs spring actuation.
    #[must_use]
    pub const fn spring_mutation_probability(&self) -> f64 {
        self.spring_mutation_probability
    }

    /// Returns how many springs a single actuation perturbation touches.
    #[must_use]
    pub const fn springs_to_mutate(&self) -> usize {
        self.springs_to_mutate
    }

    /// Sets how many existing masses a new mass is connected to.
    pub const fn with_new_mass_spring_num(mut self, n: usize) -> Self {
        self.new_mass_spring_num = n;
        self
    }

    /// Sets the range for redrawn spring stiffness.
    pub const fn with_stiffness_range(mut self, range: [f64; 2]) -> Self {
        self.stiffness_range = range;
        self
    }

    /// Sets the range for the redrawn actuation offset.
    pub const fn with_offset_range(mut self, range: [f64; 2]) -> Self {
        self.offset_range = range;
        self
    }

    /// Sets the range for the redrawn actuation phase.
    pub const fn with_phase_range(mut self, range: [f64; 2]) -> Self {
        self.phase_range = range;
        self
    }

    /// Sets the mass and spring mutation probabilities.
    pub const fn with_probabilities(mut self, mass: f64, spring: f64) -> Self {
        self.mass_mutation_probability = mass;
        self.spring_mutation_probability = spring;
        self
    }

    /// Sets how many springs a single actuation perturbation touches.
    pub const fn with_springs_to_mutate(mut self, n: usize) -> Self {
        self.springs_to_mutate = n;
        self
    }

    /// Checks that ranges are ordered and finite and that probabilities lie in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` describing the first offending value.
    pub fn validate(&self) -> Result<(), ZooError> {
        for (name, [lo, hi]) in [
            ("stiffness_range", self.stiffness_range),
            ("offset_range", self.offset_range),
            ("phase_range", self.phase_range),
        ] {
            if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
                return Err(ZooError::InvalidConfig(format!("{name} must be a finite, ordered pair, got [{lo}, {hi}]")));
            }
        }
        if self.stiffness_range[0] <= 0.0 {
            return Err(ZooError::InvalidConfig("stiffness_range must be positive".to_string()));
        }
        for (name, p) in [
            ("mass_mutation_probability", self.mass_mutation_probability),
            ("spring_mutation_probability", self.spring_mutation_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ZooError::InvalidConfig(format!("{name} must be in [0, 1], got {p}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(PhysicsConfig::default().validate().is_ok());
        assert!(MutationConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_physics() {
        let bad = [
            PhysicsConfig::default().with_dt(0.0),
            PhysicsConfig::default().with_dt(f64::NAN),
            PhysicsConfig::default().with_spring_constant(-1.0),
            PhysicsConfig::default().with_default_mass(0.0),
            PhysicsConfig::default().with_friction(-0.1, 0.8),
            PhysicsConfig::default().with_gravity([0.0, f64::INFINITY, 0.0]),
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(ZooError::InvalidConfig(_))),
                "accepted {config:?}"
            );
        }
    }

    #[test]
    fn rejects_bad_mutation() {
        let bad = [
            MutationConfig::default().with_offset_range([0.3, 0.2]),
            MutationConfig::default().with_stiffness_range([0.0, 10.0]),
            MutationConfig::default().with_probabilities(1.5, 0.2),
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(ZooError::InvalidConfig(_))));
        }
    }

    #[test]
    fn partial_json_uses_defaults() -> Result<(), String> {
        let config: PhysicsConfig = serde_json::from_str(r#"{ "dt": 0.001 }"#).map_err(|e| e.to_string())?;
        assert_eq!(config, PhysicsConfig::default().with_dt(0.001));
        Ok(())
    }
}
