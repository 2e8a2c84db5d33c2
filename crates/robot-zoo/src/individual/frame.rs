//! Read-only snapshots for renderers.

use serde::{Deserialize, Serialize};

use super::Individual;
use crate::physics::Vec3;

/// The positions of an `Individual`'s masses and the endpoints of its springs at one instant.
///
/// A renderer draws one point per entry of `positions` and one segment per entry of `segments`.
/// Both follow the iteration order of the `Individual`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Mass positions.
    pub positions: Vec<Vec3>,
    /// Spring endpoint positions.
    pub segments: Vec<[Vec3; 2]>,
}

impl Frame {
    /// Takes a snapshot of `individual`.
    pub(crate) fn of(individual: &Individual) -> Self {
        let positions = individual.masses.values().map(|m| m.position).collect();
        let segments = individual
            .springs
            .keys()
            .filter_map(|id| individual.spring_endpoints(id))
            .collect();
        Self { positions, segments }
    }

    /// The segments projected onto the ground plane.
    #[must_use]
    pub fn shadows(&self) -> Vec<[Vec3; 2]> {
        self.segments
            .iter()
            .map(|[a, b]| [[a[0], a[1], 0.0], [b[0], b[1], 0.0]])
            .collect()
    }
}
