//! The physics for the mass-spring robots.

mod clock;
mod engine;
mod mass;
mod spring;
pub mod vector;

pub use clock::SimulationClock;
pub use engine::PhysicsEngine;
pub use mass::Mass;
pub use spring::{Actuation, Spring};
pub use vector::Vec3;

slotmap::new_key_type! {
    /// Stable handle for a `Mass` within its `Individual`.
    pub struct MassId;

    /// Stable handle for a `Spring` within its `Individual`.
    pub struct SpringId;
}
