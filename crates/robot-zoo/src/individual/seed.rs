//! The two-cube seed morphology.

use super::Individual;
use crate::{
    physics::{Mass, Spring},
    PhysicsConfig, ZooError,
};

/// Corner offsets of the seed, in units of half the edge length.
///
/// Masses 0..8 form the lower cube, centred at the origin. Masses 8..12 extend it along `+y`
/// into a second cube that shares the face `4, 5, 6, 7`.
const CORNERS: [[f64; 3]; 12] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 3.0, -1.0],
    [1.0, 3.0, -1.0],
    [-1.0, 3.0, 1.0],
    [1.0, 3.0, 1.0],
];

/// The rest length of a seed spring relative to the edge length.
#[derive(Clone, Copy)]
enum Span {
    /// A cube edge.
    Edge,
    /// A face diagonal.
    Face,
    /// A space diagonal.
    Body,
}

impl Span {
    /// The rest length for cubes with the given edge length.
    fn length(self, edge: f64) -> f64 {
        match self {
            Self::Edge => edge,
            Self::Face => (2.0 * edge * edge).sqrt(),
            Self::Body => (3.0 * edge * edge).sqrt(),
        }
    }
}

/// Springs of the seed as `(corner, corner, span)`.
#[rustfmt::skip]
const SPRINGS: [(usize, usize, Span); 50] = [
    // First cube: edges.
    (0, 1, Span::Edge), (1, 3, Span::Edge), (3, 2, Span::Edge), (2, 0, Span::Edge),
    (4, 5, Span::Edge), (5, 7, Span::Edge), (7, 6, Span::Edge), (6, 4, Span::Edge),
    (0, 4, Span::Edge), (1, 5, Span::Edge), (2, 6, Span::Edge), (3, 7, Span::Edge),
    // First cube: face diagonals.
    (0, 3, Span::Face), (1, 2, Span::Face), (4, 7, Span::Face), (5, 6, Span::Face),
    (0, 5, Span::Face), (1, 4, Span::Face), (2, 7, Span::Face), (3, 6, Span::Face),
    (1, 7, Span::Face), (0, 6, Span::Face), (3, 5, Span::Face), (2, 4, Span::Face),
    // First cube: space diagonals.
    (0, 7, Span::Body), (1, 6, Span::Body), (2, 5, Span::Body), (3, 4, Span::Body),
    // Second cube: edges.
    (8, 9, Span::Edge), (9, 11, Span::Edge), (11, 10, Span::Edge), (10, 8, Span::Edge),
    (6, 10, Span::Edge), (7, 11, Span::Edge), (4, 8, Span::Edge), (5, 9, Span::Edge),
    // Second cube: face diagonals.
    (6, 11, Span::Face), (7, 10, Span::Face), (4, 9, Span::Face), (5, 8, Span::Face),
    (4, 10, Span::Face), (5, 11, Span::Face), (6, 8, Span::Face), (7, 9, Span::Face),
    (9, 10, Span::Face), (8, 11, Span::Face),
    // Second cube: space diagonals.
    (6, 9, Span::Body), (7, 8, Span::Body), (4, 11, Span::Body), (5, 10, Span::Body),
];

impl Individual {
    /// Builds the reference morphology: two unit cubes stacked along `y` and braced with edge,
    /// face-diagonal, and space-diagonal springs.
    ///
    /// The cubes have edge `config.rest_length()`, every mass is `config.default_mass()`, every
    /// spring has stiffness `config.spring_constant()` and no actuation. The lower cube is
    /// centred at height `config.drop_height()`, so with the default of zero its bottom face
    /// starts below the ground and is pushed up on the first step.
    ///
    /// # Errors
    ///
    /// - `InvalidMass` if the default mass of `config` is not positive.
    pub fn two_cube_seed(config: &PhysicsConfig) -> Result<Self, ZooError> {
        let edge = config.rest_length();
        let half = edge / 2.0;
        let k = config.spring_constant();

        let mut individual = Self::new();
        let ids = CORNERS
            .iter()
            .map(|&[x, y, z]| {
                let position = [x * half, y * half, z * half + config.drop_height()];
                Mass::at_rest(config.default_mass(), position).map(|m| individual.add_mass(m))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for &(i, j, span) in &SPRINGS {
            individual.add_spring(Spring::new(ids[i], ids[j], span.length(edge), k))?;
        }

        Ok(individual)
    }
}
