//! Several robots simulated side by side on one ground plane.

use crate::{
    individual::Frame,
    physics::{vector, SimulationClock, Vec3},
    Individual, PhysicsEngine,
};

/// Offsets of the 3×3 grid in units of the spacing, row-major from `(-1, +1)` to `(+1, -1)`.
const GRID: [[f64; 2]; 9] = [
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

/// A group of `Individual`s sharing one `SimulationClock`.
///
/// Because the clock is shared, every robot's springs breathe in phase. Robots never interact:
/// each is stepped on its own, only the ground plane is common.
#[derive(Debug, Clone)]
pub struct Zoo {
    /// The robots.
    individuals: Vec<Individual>,
    /// The shared clock.
    clock: SimulationClock,
    /// Horizontal centre of mass of each robot when it joined the zoo.
    origins: Vec<Option<Vec3>>,
}

impl Zoo {
    /// The default distance between neighbouring robots on the grid.
    pub const DEFAULT_SPACING: f64 = 5.0;

    /// Creates a zoo from robots that are already placed.
    #[must_use]
    pub fn new(individuals: Vec<Individual>) -> Self {
        let origins = individuals.iter().map(Individual::center_of_mass).collect();
        Self {
            individuals,
            clock: SimulationClock::new(),
            origins,
        }
    }

    /// Places up to nine robots on a 3×3 grid with the given spacing and creates a zoo.
    ///
    /// The grid is filled row by row, starting at `(-spacing, +spacing)`. Robots beyond the
    /// ninth keep their positions.
    #[must_use]
    pub fn grid(mut individuals: Vec<Individual>, spacing: f64) -> Self {
        for (individual, [x, y]) in individuals.iter_mut().zip(GRID) {
            individual.translate([x * spacing, y * spacing, 0.0]);
        }
        Self::new(individuals)
    }

    /// Returns the robots.
    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Returns the shared clock.
    #[must_use]
    pub const fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Returns the number of robots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the zoo has no robots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Advances every robot by one time-step.
    pub fn step(&mut self, engine: &PhysicsEngine) {
        engine.step_many(&mut self.individuals, &mut self.clock);
    }

    /// Parallel version of [`Zoo::step`].
    pub fn par_step(&mut self, engine: &PhysicsEngine) {
        engine.par_step_many(&mut self.individuals, &mut self.clock);
    }

    /// Advances every robot by `steps` time-steps.
    pub fn run(&mut self, engine: &PhysicsEngine, steps: usize, parallel: bool) {
        for _ in 0..steps {
            if parallel {
                self.par_step(engine);
            } else {
                self.step(engine);
            }
        }
    }

    /// Takes a rendering snapshot of every robot.
    #[must_use]
    pub fn frames(&self) -> Vec<Frame> {
        self.individuals.iter().map(Individual::frame).collect()
    }

    /// The horizontal distance each robot's centre of mass has travelled since it joined the
    /// zoo. Empty robots report zero.
    #[must_use]
    pub fn displacements(&self) -> Vec<f64> {
        self.individuals
            .iter()
            .zip(&self.origins)
            .map(|(individual, origin)| match (individual.center_of_mass(), origin) {
                (Some([x, y, _]), Some([x0, y0, _])) => vector::norm([x - x0, y - y0, 0.0]),
                _ => 0.0,
            })
            .collect()
    }

    /// Consumes the zoo and returns its robots.
    #[must_use]
    pub fn into_individuals(self) -> Vec<Individual> {
        self.individuals
    }
}
