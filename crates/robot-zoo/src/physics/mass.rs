//! Point masses of a soft robot.

use serde::{Deserialize, Serialize};

use super::vector::{self, Vec3, ZERO};
use crate::ZooError;

/// A point `Mass` in the mass-spring lattice.
///
/// A `Mass` is defined by its:
///
/// - `position`: where it is, with the ground plane at `z = 0`.
/// - `velocity`: how fast it is moving.
/// - `m`: its (positive) mass.
///
/// It also carries the `force` accumulated during the current step and the `acceleration`
/// derived from that force. Both are recomputed every step by the `PhysicsEngine`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mass {
    /// The position of the `Mass`.
    pub(crate) position: Vec3,
    /// The velocity of the `Mass`.
    pub(crate) velocity: Vec3,
    /// The acceleration of the `Mass` during the last step.
    pub(crate) acceleration: Vec3,
    /// The force being applied to the `Mass`.
    pub(crate) force: Vec3,
    /// The mass of the `Mass`.
    pub(crate) m: f64,
}

impl Mass {
    /// Creates a new `Mass`.
    ///
    /// # Errors
    ///
    /// - `InvalidMass` if `m` is not positive and finite.
    pub fn new(m: f64, position: Vec3, velocity: Vec3) -> Result<Self, ZooError> {
        if !(m.is_finite() && m > 0.0) {
            return Err(ZooError::InvalidMass(m));
        }
        Ok(Self {
            position,
            velocity,
            acceleration: ZERO,
            force: ZERO,
            m,
        })
    }

    /// Creates a new `Mass` with zero velocity.
    ///
    /// # Errors
    ///
    /// See [`Mass::new`].
    pub fn at_rest(m: f64, position: Vec3) -> Result<Self, ZooError> {
        Self::new(m, position, ZERO)
    }

    /// Returns the position of the `Mass`.
    #[must_use]
    pub const fn position(&self) -> &Vec3 {
        &self.position
    }

    /// Returns the velocity of the `Mass`.
    #[must_use]
    pub const fn velocity(&self) -> &Vec3 {
        &self.velocity
    }

    /// Returns the acceleration of the `Mass` from the last step.
    #[must_use]
    pub const fn acceleration(&self) -> &Vec3 {
        &self.acceleration
    }

    /// Returns the force accumulated on the `Mass`.
    #[must_use]
    pub const fn force(&self) -> &Vec3 {
        &self.force
    }

    /// Returns the mass of the `Mass`.
    #[must_use]
    pub const fn m(&self) -> f64 {
        self.m
    }

    /// Sets the position of the `Mass`.
    ///
    /// It is the user's responsibility to ensure that the `position` has no
    /// `NaN` or `Infinite` values.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Sets the velocity of the `Mass`.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Shifts the position of the `Mass` by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        self.position = vector::add(self.position, offset);
    }

    /// Whether the `Mass` touches or is below the ground plane.
    #[must_use]
    pub fn in_ground_contact(&self) -> bool {
        self.position[2] <= 0.0
    }

    /// Replaces the accumulated force with the weight of the `Mass` under `gravity`.
    pub(crate) fn reset_force(&mut self, gravity: Vec3) {
        self.force = vector::scale(gravity, self.m);
    }

    /// Adds the given force to the force being applied to the `Mass`.
    pub(crate) fn add_force(&mut self, force: Vec3) {
        self.force = vector::add(self.force, force);
    }

    /// Subtracts the given force from the force being applied to the `Mass`.
    pub(crate) fn sub_force(&mut self, force: Vec3) {
        self.force = vector::sub(self.force, force);
    }

    /// Applies the accumulated force for one time-step with semi-implicit Euler.
    ///
    /// The acceleration is updated first, then the velocity, and the position
    /// moves with the new velocity.
    pub(crate) fn integrate(&mut self, dt: f64) {
        for (((p, v), a), &f) in self
            .position
            .iter_mut()
            .zip(self.velocity.iter_mut())
            .zip(self.acceleration.iter_mut())
            .zip(self.force.iter())
        {
            *a = f / self.m;
            *v += *a * dt;
            *p += *v * dt;
        }
    }

    /// Pushes the `Mass` back onto the ground plane if it went below it.
    ///
    /// The vertical velocity is reversed and scaled by `damping` every time this happens.
    pub(crate) fn collide_with_ground(&mut self, damping: f64) {
        if self.position[2] < 0.0 {
            self.position[2] = 0.0;
            self.velocity[2] = -damping * self.velocity[2];
        }
    }

    /// Whether position, velocity, and force are all finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        vector::is_finite(self.position) && vector::is_finite(self.velocity) && vector::is_finite(self.force)
    }

    /// Get the kinetic energy of the `Mass`.
    #[must_use]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.velocity.iter().map(|v| v * v).sum::<f64>()
    }
}
