//! Writing the seed robot.

use std::path::Path;

use robot_zoo::{Individual, PhysicsConfig};

/// Builds the two-cube seed robot and saves it to `out_path`.
///
/// # Errors
///
/// - If `physics` does not describe a valid seed.
/// - If the robot could not be written.
pub fn write_seed<P: AsRef<Path>>(physics: &PhysicsConfig, out_path: P) -> Result<(), String> {
    let out_path = out_path.as_ref();
    let robot = Individual::two_cube_seed(physics).map_err(|e| e.to_string())?;
    robot.save(out_path).map_err(|e| e.to_string())?;

    ftlog::info!(
        "Wrote seed with {} masses and {} springs to {out_path:?}",
        robot.mass_count(),
        robot.spring_count()
    );
    Ok(())
}
