use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    generate::{self, GenerateArgs},
    table::{self, TableArgs},
    version::{self, VersionArgs},
};

mod commands;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "wx-sim", about = "Synthetic weather sequences from a Markov chain")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate weather sequences and print them.
    Generate(GenerateArgs),
    /// Print the validated transition table with its probabilities.
    Table(TableArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match cli.command {
        Some(Command::Generate(args)) => generate::run(&args),
        Some(Command::Table(args)) => table::run(&args),
        Some(Command::Version(args)) => version::run(&args),
        None => generate::run(&GenerateArgs::default()),
    }
}
