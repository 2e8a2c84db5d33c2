//! An `Individual` is one soft robot: a set of `Mass`es and the `Spring`s between them.

mod frame;
mod record;
mod seed;

use slotmap::SlotMap;

use crate::{
    error::Entity,
    physics::{vector, Actuation, Mass, MassId, Spring, SpringId, Vec3},
    ZooError,
};

pub use frame::Frame;
pub use record::{IndividualRecord, MassRecord, SpringRecord, RECORD_VERSION};

/// The masses and springs of a single soft robot.
///
/// An `Individual` exclusively owns its `Mass`es and `Spring`s. Every `Spring` joins two `Mass`es
/// of the same `Individual`; removing a `Mass` removes every `Spring` attached to it. Actuation
/// parameters live on the `Spring`s, so removing a `Spring` removes its parameters with it.
///
/// Iteration over masses and springs follows slot order, which only depends on the sequence
/// of insertions and removals.
#[derive(Debug, Clone, Default)]
pub struct Individual {
    /// The point masses.
    pub(crate) masses: SlotMap<MassId, Mass>,
    /// The springs between the point masses.
    pub(crate) springs: SlotMap<SpringId, Spring>,
}

impl Individual {
    /// Creates an empty `Individual`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `Mass`. This does not add any `Spring`s.
    pub fn add_mass(&mut self, mass: Mass) -> MassId {
        self.masses.insert(mass)
    }

    /// Adds a `Spring` between two `Mass`es that are already in the `Individual`.
    ///
    /// The `Spring` keeps whatever actuation it carries. A `Spring` from [`Spring::new`] is
    /// unactuated, with `a = l0, b = 0, c = 0`; one built with [`Spring::with_actuation`], as when
    /// loading a record, keeps its own parameters.
    ///
    /// # Errors
    ///
    /// - `InvalidTopology` if either endpoint is not a `Mass` of this `Individual`.
    /// - `InvalidStiffness` or `InvalidRestLength` if the `Spring`'s parameters are out of range.
    pub fn add_spring(&mut self, spring: Spring) -> Result<SpringId, ZooError> {
        spring.validate()?;
        let (m1, m2) = spring.endpoints();
        for m in [m1, m2] {
            if !self.masses.contains_key(m) {
                return Err(ZooError::InvalidTopology(format!(
                    "spring endpoint {m:?} is not a mass of this individual"
                )));
            }
        }
        Ok(self.springs.insert(spring))
    }

    /// Adds an unactuated `Spring` whose rest length is the current distance between `m1` and
    /// `m2`, so that it starts without tension.
    ///
    /// # Errors
    ///
    /// - `InvalidTopology` if either endpoint is not a `Mass` of this `Individual`.
    /// - `InvalidStiffness` if `k` is not positive and finite.
    pub fn connect(&mut self, m1: MassId, m2: MassId, k: f64) -> Result<SpringId, ZooError> {
        let (p1, p2) = match (self.masses.get(m1), self.masses.get(m2)) {
            (Some(a), Some(b)) => (a.position, b.position),
            _ => {
                return Err(ZooError::InvalidTopology(format!(
                    "cannot connect {m1:?} and {m2:?}: not both masses of this individual"
                )))
            }
        };
        self.add_spring(Spring::new(m1, m2, vector::distance(p1, p2), k))
    }

    /// Removes a `Spring`, along with its actuation.
    ///
    /// # Errors
    ///
    /// - `EntityNotFound` if the `Spring` is not in the `Individual`.
    pub fn remove_spring(&mut self, id: SpringId) -> Result<Spring, ZooError> {
        self.springs
            .remove(id)
            .ok_or(ZooError::EntityNotFound(Entity::Spring(id)))
    }

    /// Removes a `Mass` and every `Spring` connected to it.
    ///
    /// Nothing is changed if the `Mass` is absent.
    ///
    /// # Returns
    ///
    /// The removed `Mass` and the removed `Spring`s.
    ///
    /// # Errors
    ///
    /// - `EntityNotFound` if the `Mass` is not in the `Individual`.
    pub fn remove_mass(&mut self, id: MassId) -> Result<(Mass, Vec<Spring>), ZooError> {
        let mass = self
            .masses
            .remove(id)
            .ok_or(ZooError::EntityNotFound(Entity::Mass(id)))?;

        let springs = self
            .springs_of(id)
            .into_iter()
            .filter_map(|s| self.springs.remove(s))
            .collect();

        Ok((mass, springs))
    }

    /// Returns the `Mass` with the given key.
    #[must_use]
    pub fn mass(&self, id: MassId) -> Option<&Mass> {
        self.masses.get(id)
    }

    /// Returns the `Mass` with the given key as mutable.
    #[must_use]
    pub fn mass_mut(&mut self, id: MassId) -> Option<&mut Mass> {
        self.masses.get_mut(id)
    }

    /// Returns the `Spring` with the given key.
    #[must_use]
    pub fn spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    /// Iterates over the `Mass`es and their keys.
    pub fn masses(&self) -> impl Iterator<Item = (MassId, &Mass)> + '_ {
        self.masses.iter()
    }

    /// Iterates over the `Spring`s and their keys.
    pub fn springs(&self) -> impl Iterator<Item = (SpringId, &Spring)> + '_ {
        self.springs.iter()
    }

    /// Returns the keys of all `Mass`es in iteration order.
    #[must_use]
    pub fn mass_ids(&self) -> Vec<MassId> {
        self.masses.keys().collect()
    }

    /// Returns the keys of all `Spring`s in iteration order.
    #[must_use]
    pub fn spring_ids(&self) -> Vec<SpringId> {
        self.springs.keys().collect()
    }

    /// Returns the number of `Mass`es.
    #[must_use]
    pub fn mass_count(&self) -> usize {
        self.masses.len()
    }

    /// Returns the number of `Spring`s.
    #[must_use]
    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    /// Whether the `Individual` has no `Mass`es.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Whether the `Mass` is part of the `Individual`.
    #[must_use]
    pub fn contains_mass(&self, id: MassId) -> bool {
        self.masses.contains_key(id)
    }

    /// Whether the `Spring` is part of the `Individual`.
    #[must_use]
    pub fn contains_spring(&self, id: SpringId) -> bool {
        self.springs.contains_key(id)
    }

    /// Returns the keys of the `Spring`s attached to a `Mass`.
    #[must_use]
    pub fn springs_of(&self, mass: MassId) -> Vec<SpringId> {
        self.springs
            .iter()
            .filter(|(_, s)| s.connects(mass))
            .map(|(id, _)| id)
            .collect()
    }

    /// Replaces the actuation of a `Spring`.
    ///
    /// # Errors
    ///
    /// - `EntityNotFound` if the `Spring` is not in the `Individual`.
    pub fn set_actuation(&mut self, id: SpringId, actuation: Actuation) -> Result<(), ZooError> {
        self.springs
            .get_mut(id)
            .map(|s| s.set_actuation(actuation))
            .ok_or(ZooError::EntityNotFound(Entity::Spring(id)))
    }

    /// Replaces the spring constant of a `Spring`.
    ///
    /// # Errors
    ///
    /// - `EntityNotFound` if the `Spring` is not in the `Individual`.
    /// - `InvalidStiffness` if `k` is not positive and finite. The `Spring` is unchanged.
    pub fn set_stiffness(&mut self, id: SpringId, k: f64) -> Result<(), ZooError> {
        self.springs
            .get_mut(id)
            .ok_or(ZooError::EntityNotFound(Entity::Spring(id)))?
            .set_k(k)
    }

    /// Shifts every `Mass` by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        self.masses.values_mut().for_each(|m| m.translate(offset));
    }

    /// Returns the positions of the two endpoints of a `Spring`.
    #[must_use]
    pub fn spring_endpoints(&self, id: SpringId) -> Option<[Vec3; 2]> {
        let (m1, m2) = self.springs.get(id)?.endpoints();
        Some([self.masses.get(m1)?.position, self.masses.get(m2)?.position])
    }

    /// Returns the mass-weighted mean position, or `None` if there are no `Mass`es.
    #[must_use]
    pub fn center_of_mass(&self) -> Option<Vec3> {
        if self.masses.is_empty() {
            return None;
        }
        let (weighted, total) = self
            .masses
            .values()
            .fold((vector::ZERO, 0.0), |(acc, total), m| {
                (vector::add(acc, vector::scale(m.position, m.m)), total + m.m)
            });
        Some(vector::scale(weighted, 1.0 / total))
    }

    /// Get the total kinetic energy of the `Mass`es.
    #[must_use]
    pub fn kinetic_energy(&self) -> f64 {
        self.masses.values().map(Mass::kinetic_energy).sum()
    }

    /// Get the total elastic energy of the `Spring`s at time `t`.
    #[must_use]
    pub fn potential_energy(&self, t: f64, omega: f64) -> f64 {
        self.springs
            .values()
            .filter_map(|s| {
                let (m1, m2) = s.endpoints();
                let (a, b) = (self.masses.get(m1)?, self.masses.get(m2)?);
                Some(s.potential_energy(a.position, b.position, t, omega))
            })
            .sum()
    }

    /// Takes a read-only snapshot for rendering.
    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame::of(self)
    }

    /// Checks that every `Spring` joins two `Mass`es of this `Individual` and has usable
    /// parameters.
    ///
    /// # Errors
    ///
    /// - `InvalidTopology` naming the first offending `Spring`.
    /// - `InvalidStiffness` or `InvalidRestLength` for the first `Spring` out of range.
    pub fn validate(&self) -> Result<(), ZooError> {
        for (id, s) in &self.springs {
            s.validate()?;
            let (m1, m2) = s.endpoints();
            if !(self.masses.contains_key(m1) && self.masses.contains_key(m2)) {
                return Err(ZooError::InvalidTopology(format!(
                    "spring {id:?} refers to a mass outside the individual"
                )));
            }
        }
        Ok(())
    }
}
