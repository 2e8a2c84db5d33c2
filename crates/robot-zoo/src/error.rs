//! Errors raised by the robot zoo.

use thiserror::Error;

use crate::{MassId, SpringId};

/// An entity that an operation referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// A `Mass` in an `Individual`.
    Mass(MassId),
    /// A `Spring` in an `Individual`.
    Spring(SpringId),
}

/// Errors from structural edits, mutation operators, checked stepping, and persistence.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ZooError {
    /// A removal or lookup named an entity that is not in the individual.
    #[error("{0:?} is not part of this individual")]
    EntityNotFound(Entity),
    /// A spring refers to masses outside the individual.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),
    /// A mutation operator needs more masses than the individual has.
    #[error("need at least {required} masses, found {available}")]
    InsufficientMasses {
        /// The number of masses the operator needs.
        required: usize,
        /// The number of masses in the individual.
        available: usize,
    },
    /// A mutation operator was given an individual with nothing to operate on.
    #[error("the individual is empty")]
    EmptyIndividual,
    /// The simulated state stopped being finite.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),
    /// Masses must be positive and finite.
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f64),
    /// Spring constants must be positive and finite.
    #[error("spring constant must be positive and finite, got {0}")]
    InvalidStiffness(f64),
    /// Base rest lengths must be non-negative and finite.
    #[error("rest length must be non-negative and finite, got {0}")]
    InvalidRestLength(f64),
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A persisted individual was written with an unknown schema version.
    #[error("unsupported record version {found}, expected {expected}")]
    UnsupportedVersion {
        /// The version found in the record.
        found: u16,
        /// The version this build reads.
        expected: u16,
    },
    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(String),
    /// Encoding or decoding a record failed.
    #[error("codec error: {0}")]
    Codec(String),
}

impl From<std::io::Error> for ZooError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
