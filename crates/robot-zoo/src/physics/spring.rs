//! Actuated springs between two masses.

use serde::{Deserialize, Serialize};

use super::vector::{self, Vec3, ZERO};
use super::MassId;
use crate::ZooError;

/// Sinusoidal modulation of a spring's rest length.
///
/// The effective rest length at time `t` is `a + b·sin(ω·t + c)` where `a` is the
/// `amplitude`, `b` the `offset`, and `c` the `phase`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actuation {
    /// The constant term `a`.
    pub amplitude: f64,
    /// The coefficient `b` of the sine term.
    pub offset: f64,
    /// The phase `c` of the sine term.
    pub phase: f64,
}

impl Actuation {
    /// No actuation: the rest length stays at `rest_length`.
    #[must_use]
    pub const fn still(rest_length: f64) -> Self {
        Self {
            amplitude: rest_length,
            offset: 0.0,
            phase: 0.0,
        }
    }

    /// The rest length at time `t` for angular frequency `omega`.
    #[must_use]
    pub fn rest_length(&self, t: f64, omega: f64) -> f64 {
        self.amplitude + self.offset * omega.mul_add(t, self.phase).sin()
    }
}

/// Returns `k` if it is a usable spring constant.
fn check_stiffness(k: f64) -> Result<f64, ZooError> {
    if k.is_finite() && k > 0.0 {
        Ok(k)
    } else {
        Err(ZooError::InvalidStiffness(k))
    }
}

/// A spring in the mass-spring lattice.
///
/// The spring is defined by its:
///
/// - endpoints `m1` and `m2`, keys of `Mass`es in the same `Individual`,
/// - base rest length `l0`, i.e. its length when not actuated,
/// - spring constant `k`, i.e. the stiffness of the `Spring`,
/// - `actuation`, the time-varying modulation of its rest length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    /// The key of the first `Mass`.
    m1: MassId,
    /// The key of the second `Mass`.
    m2: MassId,
    /// The base rest length.
    l0: f64,
    /// The spring constant.
    k: f64,
    /// The rest-length modulation.
    actuation: Actuation,
}

impl Spring {
    /// Creates a new `Spring` without actuation.
    #[must_use]
    pub const fn new(m1: MassId, m2: MassId, l0: f64, k: f64) -> Self {
        Self {
            m1,
            m2,
            l0,
            k,
            actuation: Actuation::still(l0),
        }
    }

    /// Replaces the actuation of the `Spring`.
    #[must_use]
    pub const fn with_actuation(mut self, actuation: Actuation) -> Self {
        self.actuation = actuation;
        self
    }

    /// Returns the keys of the two masses joined by the `Spring`.
    #[must_use]
    pub const fn endpoints(&self) -> (MassId, MassId) {
        (self.m1, self.m2)
    }

    /// Whether the `Spring` is attached to `mass`.
    #[must_use]
    pub fn connects(&self, mass: MassId) -> bool {
        self.m1 == mass || self.m2 == mass
    }

    /// Get the base rest length of the `Spring`.
    #[must_use]
    pub const fn l0(&self) -> f64 {
        self.l0
    }

    /// Get the spring constant of the `Spring`.
    #[must_use]
    pub const fn k(&self) -> f64 {
        self.k
    }

    /// Get the actuation of the `Spring`.
    #[must_use]
    pub const fn actuation(&self) -> &Actuation {
        &self.actuation
    }

    /// Set the spring constant of the `Spring`.
    ///
    /// # Errors
    ///
    /// - `InvalidStiffness` if `k` is not positive and finite. The `Spring` is unchanged.
    pub fn set_k(&mut self, k: f64) -> Result<(), ZooError> {
        self.k = check_stiffness(k)?;
        Ok(())
    }

    /// Checks that the spring constant is positive and the base rest length is non-negative,
    /// both finite.
    ///
    /// # Errors
    ///
    /// - `InvalidStiffness` or `InvalidRestLength` for the first value out of range.
    pub fn validate(&self) -> Result<(), ZooError> {
        check_stiffness(self.k)?;
        if !(self.l0.is_finite() && self.l0 >= 0.0) {
            return Err(ZooError::InvalidRestLength(self.l0));
        }
        Ok(())
    }

    /// Set the actuation of the `Spring`.
    pub fn set_actuation(&mut self, actuation: Actuation) {
        self.actuation = actuation;
    }

    /// The force exerted on `m2` when the endpoints are at `p1` and `p2`.
    ///
    /// `m1` receives exactly the negation of this force. When the endpoints coincide the
    /// direction is undefined and the force is zero.
    #[must_use]
    pub fn force(&self, p1: Vec3, p2: Vec3, t: f64, omega: f64) -> Vec3 {
        let delta = vector::sub(p1, p2);
        let length = vector::norm(delta);
        if length == 0.0 {
            return ZERO;
        }
        let direction = vector::scale(delta, 1.0 / length);
        let magnitude = self.k * (length - self.actuation.rest_length(t, omega));
        vector::scale(direction, magnitude)
    }

    /// Get the potential energy of the `Spring` with its endpoints at `p1` and `p2`.
    #[must_use]
    pub fn potential_energy(&self, p1: Vec3, p2: Vec3, t: f64, omega: f64) -> f64 {
        let dx = vector::distance(p1, p2) - self.actuation.rest_length(t, omega);
        0.5 * self.k * dx * dx
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn actuation_peaks_at_quarter_period() {
        let actuation = Actuation {
            amplitude: 1.0,
            offset: 0.1,
            phase: 0.0,
        };
        let omega = 2.0 * core::f64::consts::PI;
        assert!(approx_eq!(f64, actuation.rest_length(0.25, omega), 1.1, epsilon = 1e-12));
        assert!(approx_eq!(f64, actuation.rest_length(0.75, omega), 0.9, epsilon = 1e-12));
        assert!(approx_eq!(f64, actuation.rest_length(0.0, omega), 1.0, epsilon = 1e-12));
    }

    #[test]
    fn still_actuation_is_constant() {
        let actuation = Actuation::still(1.5);
        for t in [0.0, 0.1, 0.37, 12.0] {
            assert_eq!(actuation.rest_length(t, 4.0 * core::f64::consts::PI), 1.5);
        }
    }

    #[test]
    fn stretched_spring_pulls_endpoints_together() {
        let mut keys = slotmap::SlotMap::<MassId, ()>::with_key();
        let (a, b) = (keys.insert(()), keys.insert(()));
        let spring = Spring::new(a, b, 1.0, 100.0);

        // m1 at x = 2, m2 at origin, stretched by 1: m2 is pulled towards +x.
        let f = spring.force([2.0, 0.0, 0.0], [0.0; 3], 0.0, 1.0);
        assert_eq!(f, [100.0, 0.0, 0.0]);

        // Compressed by 0.5: m2 is pushed towards -x.
        let f = spring.force([0.5, 0.0, 0.0], [0.0; 3], 0.0, 1.0);
        assert_eq!(f, [-50.0, 0.0, 0.0]);
    }

    #[test]
    fn coincident_endpoints_exert_no_force() {
        let mut keys = slotmap::SlotMap::<MassId, ()>::with_key();
        let (a, b) = (keys.insert(()), keys.insert(()));
        let spring = Spring::new(a, b, 1.0, 100.0);
        let p = [0.3, -0.2, 0.7];
        assert_eq!(spring.force(p, p, 0.0, 1.0), ZERO);
    }

    #[test]
    fn rejects_unphysical_parameters() {
        let mut keys = slotmap::SlotMap::<MassId, ()>::with_key();
        let (a, b) = (keys.insert(()), keys.insert(()));

        for k in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let spring = Spring::new(a, b, 1.0, k);
            assert!(matches!(spring.validate(), Err(ZooError::InvalidStiffness(_))), "accepted k = {k}");
        }
        for l0 in [-1.0, f64::NAN, f64::INFINITY] {
            let spring = Spring::new(a, b, l0, 100.0);
            assert!(matches!(spring.validate(), Err(ZooError::InvalidRestLength(_))), "accepted l0 = {l0}");
        }
        assert_eq!(Spring::new(a, b, 0.0, 100.0).validate(), Ok(()));

        let mut spring = Spring::new(a, b, 1.0, 100.0);
        assert_eq!(spring.set_k(-1.0), Err(ZooError::InvalidStiffness(-1.0)));
        assert_eq!(spring.k(), 100.0);
    }
}
