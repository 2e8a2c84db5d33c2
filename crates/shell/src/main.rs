//! CLI for the robot zoo: seed, mutate, and simulate soft robots.

mod commands;
pub mod utils;

use std::path::PathBuf;

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

use robot_zoo::{MutationConfig, PhysicsConfig};

use commands::Commands;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The name of the log-file to use.
    #[arg(short('l'), long, default_value = "zoo-shell.log")]
    log_name: String,

    /// The random seed to use.
    #[arg(short('s'), long)]
    seed: Option<u64>,

    /// Optional `.json` or `.yaml` file with the physical constants.
    #[arg(short('p'), long)]
    physics_config: Option<PathBuf>,

    /// Optional `.json` or `.yaml` file with the mutation parameters.
    #[arg(short('m'), long)]
    mutation_config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let (_guard, log_path) = utils::configure_logger(&args.log_name)?;
    ftlog::info!("Log file: {log_path:?}");

    let physics = utils::read_config::<PhysicsConfig, _>(args.physics_config.as_ref())?;
    let mutation = utils::read_config::<MutationConfig, _>(args.mutation_config.as_ref())?;
    ftlog::info!("Physics: {physics:?}");
    ftlog::info!("Mutation: {mutation:?}");

    let mut rng = args.seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    match args.command {
        Commands::Seed { out_path } => commands::seed::write_seed(&physics, &out_path),
        Commands::Mutate {
            inp_path,
            out_path,
            rounds,
        } => commands::mutate::mutate(&inp_path, &out_path, rounds, &physics, mutation, &mut rng),
        Commands::Simulate {
            inp_paths,
            out_path,
            steps,
            save_every,
            spacing,
            parallel,
        } => commands::simulate::simulate(&inp_paths, &out_path, steps, save_every, spacing, parallel, physics),
    }
}
