//! The persisted form of an `Individual`.
//!
//! Springs refer to masses by their index in `masses`, so a record can be written, read, and
//! diffed without any notion of live object identity.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::Individual;
use crate::{
    physics::{Actuation, Mass, MassId, Spring, Vec3},
    ZooError,
};

/// The schema version written by this build.
pub const RECORD_VERSION: u16 = 1;

/// A persisted `Mass`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct MassRecord {
    /// The mass.
    pub mass: f64,
    /// The position.
    pub position: Vec3,
    /// The velocity.
    pub velocity: Vec3,
}

/// A persisted `Spring`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct SpringRecord {
    /// The base rest length.
    pub base_rest_length: f64,
    /// The spring constant.
    pub stiffness: f64,
    /// Index of the first endpoint in the mass list.
    pub endpoint_index_1: u32,
    /// Index of the second endpoint in the mass list.
    pub endpoint_index_2: u32,
    /// The actuation amplitude `a`.
    pub amplitude: f64,
    /// The actuation offset `b`.
    pub offset: f64,
    /// The actuation phase `c`.
    pub phase: f64,
}

/// A persisted `Individual`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode)]
pub struct IndividualRecord {
    /// The schema version.
    pub version: u16,
    /// The masses, in order.
    pub masses: Vec<MassRecord>,
    /// The springs, referring to `masses` by index.
    pub springs: Vec<SpringRecord>,
}

impl IndividualRecord {
    /// Saves the record, choosing the format from the file extension: `.json` or `.bin`.
    ///
    /// # Errors
    ///
    /// - `Codec` if the extension is not supported or encoding fails.
    /// - `Io` if the file cannot be written.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ZooError> {
        let path = path.as_ref();
        let contents = match extension(path)?.as_str() {
            "json" => serde_json::to_vec_pretty(self).map_err(|e| ZooError::Codec(e.to_string()))?,
            "bin" => bitcode::encode(self).map_err(|e| ZooError::Codec(e.to_string()))?,
            other => return Err(ZooError::Codec(format!("unsupported extension {other:?} for {path:?}"))),
        };
        std::fs::write(path, contents).map_err(ZooError::from)
    }

    /// Reads a record written by [`IndividualRecord::write_to`].
    ///
    /// # Errors
    ///
    /// - `Io` if the file cannot be read.
    /// - `Codec` if the extension is not supported or decoding fails.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, ZooError> {
        let path = path.as_ref();
        let ext = extension(path)?;
        let contents = std::fs::read(path)?;
        match ext.as_str() {
            "json" => serde_json::from_slice(&contents).map_err(|e| ZooError::Codec(e.to_string())),
            "bin" => bitcode::decode(&contents).map_err(|e| ZooError::Codec(e.to_string())),
            other => Err(ZooError::Codec(format!("unsupported extension {other:?} for {path:?}"))),
        }
    }
}

/// The lower-cased extension of `path`.
fn extension(path: &Path) -> Result<String, ZooError> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
        .ok_or_else(|| ZooError::Codec(format!("{path:?} has no file extension")))
}

impl Individual {
    /// Converts the `Individual` into its persisted form.
    ///
    /// Masses are numbered in iteration order.
    #[must_use]
    pub fn to_record(&self) -> IndividualRecord {
        let index_of = self
            .masses
            .keys()
            .enumerate()
            .filter_map(|(i, k)| u32::try_from(i).ok().map(|i| (k, i)))
            .collect::<slotmap::SecondaryMap<MassId, u32>>();

        let masses = self
            .masses
            .values()
            .map(|m| MassRecord {
                mass: m.m,
                position: m.position,
                velocity: m.velocity,
            })
            .collect();

        let springs = self
            .springs
            .values()
            .filter_map(|s| {
                let (m1, m2) = s.endpoints();
                let actuation = s.actuation();
                Some(SpringRecord {
                    base_rest_length: s.l0(),
                    stiffness: s.k(),
                    endpoint_index_1: *index_of.get(m1)?,
                    endpoint_index_2: *index_of.get(m2)?,
                    amplitude: actuation.amplitude,
                    offset: actuation.offset,
                    phase: actuation.phase,
                })
            })
            .collect();

        IndividualRecord {
            version: RECORD_VERSION,
            masses,
            springs,
        }
    }

    /// Rebuilds an `Individual` from its persisted form.
    ///
    /// # Errors
    ///
    /// - `UnsupportedVersion` if the record has a different schema version.
    /// - `InvalidMass` if a mass is not positive and finite.
    /// - `InvalidTopology` if a spring refers to a mass index out of range.
    /// - `InvalidStiffness` or `InvalidRestLength` if a spring has an unusable stiffness or base
    ///   rest length.
    pub fn from_record(record: &IndividualRecord) -> Result<Self, ZooError> {
        if record.version != RECORD_VERSION {
            return Err(ZooError::UnsupportedVersion {
                found: record.version,
                expected: RECORD_VERSION,
            });
        }

        let mut individual = Self::new();
        let ids = record
            .masses
            .iter()
            .map(|m| Mass::new(m.mass, m.position, m.velocity).map(|m| individual.add_mass(m)))
            .collect::<Result<Vec<_>, _>>()?;

        for (n, s) in record.springs.iter().enumerate() {
            let endpoint = |i: u32| {
                usize::try_from(i).ok().and_then(|i| ids.get(i)).copied().ok_or_else(|| {
                    ZooError::InvalidTopology(format!(
                        "spring {n} refers to mass {i} but there are only {} masses",
                        ids.len()
                    ))
                })
            };
            let spring = Spring::new(
                endpoint(s.endpoint_index_1)?,
                endpoint(s.endpoint_index_2)?,
                s.base_rest_length,
                s.stiffness,
            )
            .with_actuation(Actuation {
                amplitude: s.amplitude,
                offset: s.offset,
                phase: s.phase,
            });
            individual.add_spring(spring)?;
        }

        Ok(individual)
    }

    /// Saves the `Individual` to a `.json` or `.bin` file.
    ///
    /// # Errors
    ///
    /// See [`IndividualRecord::write_to`].
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ZooError> {
        self.to_record().write_to(path)
    }

    /// Loads an `Individual` from a `.json` or `.bin` file.
    ///
    /// # Errors
    ///
    /// See [`IndividualRecord::read_from`] and [`Individual::from_record`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ZooError> {
        Self::from_record(&IndividualRecord::read_from(path)?)
    }
}
