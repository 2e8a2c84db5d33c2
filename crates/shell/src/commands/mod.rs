//! The commands under the `zoo-shell` CLI.

pub mod mutate;
pub mod seed;
pub mod simulate;

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the two-cube seed robot. `out_path` must have a '.json' or '.bin' extension.
    Seed {
        /// The path of the robot file to write.
        #[arg(short('o'), long)]
        out_path: PathBuf,
    },
    /// Apply rounds of random mutation to a robot.
    Mutate {
        /// The path of the robot file to read.
        #[arg(short('i'), long)]
        inp_path: PathBuf,

        /// The path of the robot file to write.
        #[arg(short('o'), long)]
        out_path: PathBuf,

        /// The number of mutation rounds.
        #[arg(short('r'), long, default_value_t = 1)]
        rounds: usize,
    },
    /// Simulate up to nine robots on a shared ground and write their trajectories to a CSV file.
    Simulate {
        /// The robot files to read. The seed robot is used if none are given.
        #[arg(short('i'), long, num_args = 0..)]
        inp_paths: Vec<PathBuf>,

        /// The path of the CSV file to write.
        #[arg(short('o'), long)]
        out_path: PathBuf,

        /// The number of time-steps to simulate.
        #[arg(short('n'), long, default_value_t = 10_000)]
        steps: usize,

        /// Write the positions of all masses every this many steps.
        #[arg(short('e'), long, default_value_t = 100)]
        save_every: usize,

        /// The distance between neighbouring robots on the grid.
        #[arg(short('d'), long, default_value_t = robot_zoo::Zoo::DEFAULT_SPACING)]
        spacing: f64,

        /// Step the robots in parallel.
        #[arg(long)]
        parallel: bool,
    },
}
