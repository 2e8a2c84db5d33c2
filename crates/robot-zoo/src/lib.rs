//! Soft robots as actuated mass-spring lattices.
//!
//! A robot is an [`Individual`]: point [`Mass`]es joined by [`Spring`]s whose rest lengths
//! oscillate over time. The [`PhysicsEngine`] advances robots by fixed time-steps under gravity,
//! spring forces, and static/kinetic friction against a flat ground plane at `z = 0`. The
//! [`MorphologyMutator`] adds and removes masses and perturbs actuation, which is what an
//! evolutionary search needs to vary robots between simulation runs.
//!
//! ## Modules
//!
//! - [`physics`]: masses, springs, the simulation clock, and the stepping pipeline.
//! - [`individual`]: the robot aggregate, its seed morphology, rendering snapshots, and its
//!   persisted form.
//! - [`mutation`]: structural and actuation variation operators.
//! - [`zoo`]: several robots stepped together with a shared clock.
//!
//! ## Example
//!
//! ```
//! use robot_zoo::{Individual, PhysicsConfig, PhysicsEngine, SimulationClock};
//!
//! let config = PhysicsConfig::default();
//! let engine = PhysicsEngine::new(config)?;
//! let mut robot = Individual::two_cube_seed(&config)?;
//! let mut clock = SimulationClock::new();
//!
//! engine.simulate(&mut robot, &mut clock, 1_000);
//! assert!(robot.masses().all(|(_, m)| m.position()[2] >= 0.0));
//! # Ok::<(), robot_zoo::ZooError>(())
//! ```

mod config;
pub mod error;
pub mod individual;
pub mod mutation;
pub mod physics;
pub mod zoo;

pub use config::{MutationConfig, PhysicsConfig};
pub use error::ZooError;
pub use individual::{Frame, Individual, IndividualRecord};
pub use mutation::MorphologyMutator;
pub use physics::{Actuation, Mass, MassId, PhysicsEngine, SimulationClock, Spring, SpringId, Vec3};
pub use zoo::Zoo;
