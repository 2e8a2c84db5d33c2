//! Simulating a zoo of robots and recording their trajectories.

use std::path::{Path, PathBuf};

use serde::Serialize;

use robot_zoo::{Individual, PhysicsConfig, PhysicsEngine, Zoo};

/// One row of the trajectory file: the position of one mass at one instant.
#[derive(Debug, Serialize)]
struct TrajectoryRow {
    /// The number of steps taken so far.
    step: usize,
    /// The simulated time.
    time: f64,
    /// The index of the robot in the zoo.
    robot: usize,
    /// The index of the mass in the robot.
    mass: usize,
    /// The x-coordinate.
    x: f64,
    /// The y-coordinate.
    y: f64,
    /// The z-coordinate.
    z: f64,
}

/// Places the robots on a grid, simulates them with a shared clock, and writes their
/// trajectories to a CSV file.
///
/// # Arguments
///
/// * `inp_paths` - The robot files to read. The seed robot is simulated if this is empty.
/// * `out_path` - The CSV file to write.
/// * `steps` - The number of time-steps to simulate.
/// * `save_every` - The positions of all masses are written every this many steps.
/// * `spacing` - The distance between neighbouring robots on the grid.
/// * `parallel` - Whether to step the robots in parallel.
/// * `physics` - The physical constants.
///
/// # Errors
///
/// - If `physics` is invalid or `save_every` is zero.
/// - If a robot could not be read.
/// - If the CSV file could not be written.
pub fn simulate<P: AsRef<Path>>(
    inp_paths: &[PathBuf],
    out_path: P,
    steps: usize,
    save_every: usize,
    spacing: f64,
    parallel: bool,
    physics: PhysicsConfig,
) -> Result<(), String> {
    if save_every == 0 {
        return Err("save-every must be positive".to_string());
    }
    let engine = PhysicsEngine::new(physics).map_err(|e| e.to_string())?;

    let robots = if inp_paths.is_empty() {
        ftlog::info!("No robots given, simulating the seed");
        vec![Individual::two_cube_seed(&physics).map_err(|e| e.to_string())?]
    } else {
        inp_paths
            .iter()
            .map(|path| Individual::load(path).map_err(|e| format!("{path:?}: {e}")))
            .collect::<Result<Vec<_>, _>>()?
    };
    if robots.len() > 9 {
        ftlog::warn!("Only the first nine of {} robots are placed on the grid", robots.len());
    }

    let mut zoo = Zoo::grid(robots, spacing);
    let mut writer = csv::Writer::from_path(&out_path).map_err(|e| e.to_string())?;

    let start = std::time::Instant::now();
    write_frames(&mut writer, &zoo, 0)?;
    for step in 1..=steps {
        if parallel {
            zoo.par_step(&engine);
        } else {
            zoo.step(&engine);
        }
        if step % save_every == 0 {
            write_frames(&mut writer, &zoo, step)?;
            ftlog::info!("Step {step}/{steps} at t = {:.4}", zoo.clock().time());
        }
    }
    writer.flush().map_err(|e| e.to_string())?;
    ftlog::info!(
        "Simulated {steps} steps of {} robots in {:.3} seconds",
        zoo.len(),
        start.elapsed().as_secs_f64()
    );

    for (i, (d, robot)) in zoo.displacements().into_iter().zip(zoo.individuals()).enumerate() {
        let finite = robot.masses().all(|(_, m)| m.is_finite());
        ftlog::info!("Robot {i} travelled {d:.6} (finite state: {finite})");
    }
    ftlog::info!("Wrote trajectories to {:?}", out_path.as_ref());

    Ok(())
}

/// Writes the position of every mass of every robot in the zoo.
fn write_frames<W: std::io::Write>(writer: &mut csv::Writer<W>, zoo: &Zoo, step: usize) -> Result<(), String> {
    let time = zoo.clock().time();
    for (robot, frame) in zoo.frames().into_iter().enumerate() {
        for (mass, [x, y, z]) in frame.positions.into_iter().enumerate() {
            let row = TrajectoryRow {
                step,
                time,
                robot,
                mass,
                x,
                y,
                z,
            };
            writer.serialize(row).map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}
