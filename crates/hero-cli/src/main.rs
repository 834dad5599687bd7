//! CLI frontend for the HERO System dice engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "herodice",
    about = "Roll HERO System dice formulas",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log roll and reduction details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a formula and print the result
    Roll(RollArgs),

    /// Print the hit location table
    Locations,
}

/// Options for `herodice roll`.
#[derive(Args)]
pub struct RollArgs {
    /// Formula terms, e.g. `3d6 + 1`, `2(½d6)`, `11 - 3d6`
    #[arg(required = true, allow_hyphen_values = true)]
    pub terms: Vec<String>,

    /// How to read the roll: basic, success, normal, killing, adjustment, entangle, flash
    #[arg(short, long, default_value = "basic")]
    pub mode: String,

    /// Auto-success threshold for success rolls
    #[arg(long)]
    pub target: Option<i32>,

    /// Killing attack adds STR damage
    #[arg(long)]
    pub adds_str: bool,

    /// Add to the killing STUN multiplier (may be negative)
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub stun_mult: i32,

    /// Use standard effect instead of rolling
    #[arg(long)]
    pub standard_effect: bool,

    /// Roll a hit location for damage
    #[arg(long)]
    pub hit_location: bool,

    /// Force the hit location (implies --hit-location; `none` rolls it)
    #[arg(long)]
    pub location: Option<String>,

    /// Remove the N highest units after rolling (explosion)
    #[arg(long, default_value = "0")]
    pub explode: u32,

    /// Remove the first N units after rolling (damage negation)
    #[arg(long, default_value = "0")]
    pub negate: u32,

    /// Remove N damage classes after rolling (damage reduction)
    #[arg(long, default_value = "0")]
    pub reduce_dc: u32,

    /// RNG seed for a reproducible roll
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// JSON file with house-rule settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Roll(args) => commands::roll::run(&args),
        Commands::Locations => commands::locations::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
