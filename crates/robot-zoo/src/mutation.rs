//! Variation operators for the morphology and actuation of an `Individual`.
//!
//! The operators here are the primitives of an evolutionary search. Choosing when to apply them,
//! selection, and crossover are left to the caller.

use rand::{seq::index, Rng};

use crate::{
    physics::{Actuation, Mass, MassId, SpringId},
    Individual, MutationConfig, PhysicsConfig, ZooError,
};

/// Applies random structural and actuation changes to `Individual`s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphologyMutator {
    /// The mutation parameters.
    config: MutationConfig,
    /// The stiffness of springs added by the mutator.
    spring_constant: f64,
    /// The mass of masses added by the mutator.
    default_mass: f64,
}

impl MorphologyMutator {
    /// Creates a new mutator. New springs and masses take their stiffness and mass from
    /// `physics`.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if either configuration does not validate.
    pub fn new(physics: &PhysicsConfig, config: MutationConfig) -> Result<Self, ZooError> {
        physics.validate()?;
        config.validate()?;
        Ok(Self {
            config,
            spring_constant: physics.spring_constant(),
            default_mass: physics.default_mass(),
        })
    }

    /// Returns the mutation parameters.
    #[must_use]
    pub const fn config(&self) -> &MutationConfig {
        &self.config
    }

    /// Adds a `Mass` at a random position in the unit cube and connects it to
    /// `new_mass_spring_num` distinct existing masses chosen uniformly at random.
    ///
    /// The new mass also gets a random velocity in the unit cube. Each new spring has its rest
    /// length set to the current distance, so it starts without tension, and has no actuation.
    ///
    /// # Errors
    ///
    /// - `InsufficientMasses` if the `Individual` has fewer than `new_mass_spring_num` masses.
    ///   The `Individual` is left unchanged.
    pub fn add_random_mass<R: Rng>(&self, individual: &mut Individual, rng: &mut R) -> Result<MassId, ZooError> {
        let n = self.config.new_mass_spring_num();
        let existing = individual.mass_ids();
        if existing.len() < n {
            return Err(ZooError::InsufficientMasses {
                required: n,
                available: existing.len(),
            });
        }

        let position = [rng.random::<f64>(), rng.random::<f64>(), rng.random::<f64>()];
        let velocity = [rng.random::<f64>(), rng.random::<f64>(), rng.random::<f64>()];
        let new_mass = individual.add_mass(Mass::new(self.default_mass, position, velocity)?);

        for i in index::sample(rng, existing.len(), n) {
            individual.connect(new_mass, existing[i], self.spring_constant)?;
        }

        ftlog::debug!(
            "Added {new_mass:?} at {position:?} with {n} springs; now {} masses and {} springs",
            individual.mass_count(),
            individual.spring_count()
        );
        Ok(new_mass)
    }

    /// Removes a `Mass` chosen uniformly at random, along with its `Spring`s.
    ///
    /// # Errors
    ///
    /// - `EmptyIndividual` if the `Individual` has no masses.
    pub fn remove_random_mass<R: Rng>(&self, individual: &mut Individual, rng: &mut R) -> Result<MassId, ZooError> {
        let ids = individual.mass_ids();
        if ids.is_empty() {
            return Err(ZooError::EmptyIndividual);
        }

        let victim = ids[rng.random_range(0..ids.len())];
        let (_, springs) = individual.remove_mass(victim)?;

        ftlog::debug!(
            "Removed {victim:?} and {} springs; now {} masses and {} springs",
            springs.len(),
            individual.mass_count(),
            individual.spring_count()
        );
        Ok(victim)
    }

    /// Redraws the stiffness and actuation of `springs_to_mutate` distinct springs chosen
    /// uniformly at random, or of every spring if there are fewer.
    ///
    /// The stiffness is drawn from `stiffness_range`, the offset `b` from `offset_range`, and the
    /// phase `c` from `phase_range`. The amplitude `a` is reset to the spring's base rest length.
    ///
    /// # Returns
    ///
    /// The keys of the perturbed springs.
    ///
    /// # Errors
    ///
    /// - `EmptyIndividual` if the `Individual` has no springs.
    pub fn perturb_actuation<R: Rng>(
        &self,
        individual: &mut Individual,
        rng: &mut R,
    ) -> Result<Vec<SpringId>, ZooError> {
        let ids = individual.spring_ids();
        if ids.is_empty() {
            return Err(ZooError::EmptyIndividual);
        }

        let [k_lo, k_hi] = self.config.stiffness_range();
        let [b_lo, b_hi] = self.config.offset_range();
        let [c_lo, c_hi] = self.config.phase_range();

        let amount = self.config.springs_to_mutate().min(ids.len());
        let chosen = index::sample(rng, ids.len(), amount)
            .into_iter()
            .map(|i| ids[i])
            .collect::<Vec<_>>();

        for &id in &chosen {
            let l0 = individual.spring(id).map_or(0.0, crate::Spring::l0);
            let actuation = Actuation {
                amplitude: l0,
                offset: rng.random_range(b_lo..=b_hi),
                phase: rng.random_range(c_lo..=c_hi),
            };
            individual.set_stiffness(id, rng.random_range(k_lo..=k_hi))?;
            individual.set_actuation(id, actuation)?;
        }

        ftlog::debug!("Perturbed actuation of {} springs", chosen.len());
        Ok(chosen)
    }
}
