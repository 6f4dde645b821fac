use std::error::Error;

use clap::{Parser, Subcommand};
use kcol_sim::commands::{
    color::{self, ColorArgs},
    generate::{self, GenerateArgs},
    sweep::{self, SweepArgs},
};

#[derive(Parser, Debug)]
#[command(name = "kcol-sim", about = "Planted k-coloring generator and greedy coloring benchmark")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one graph and print its structural summary.
    Generate(GenerateArgs),
    /// Generate one graph and color it with each requested policy.
    Color(ColorArgs),
    /// Run a parameter sweep and write the CSV report.
    Sweep(SweepArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let env = env_logger::Env::new()
        .filter_or("KCOL_LOG", "info")
        .write_style("KCOL_LOG_STYLE");
    env_logger::init_from_env(env);

    let cli = Cli::parse();
    log::debug!("command: {:?}", cli.command);
    match cli.command {
        Command::Generate(args) => generate::run(&args),
        Command::Color(args) => color::run(&args),
        Command::Sweep(args) => sweep::run(&args),
    }
}
