//! framebench CLI — runs the piston benchmark and validates run configs.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "framebench")]
#[command(version, about = "framebench — micro-benchmarks for frame-stepped physics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the piston benchmark (both variants unless one is selected).
    Piston(commands::PistonArgs),

    /// Validate a benchmark config file (TOML).
    Validate {
        /// Path to the config file.
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Piston(args) => commands::piston(&args),
        Commands::Validate { path } => commands::validate(&path),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
