//! transys CLI — build transition systems from the command line and reduce them.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::ArcSpec;
use config::TransysConfig;

#[derive(Parser)]
#[command(name = "transys", version, about = "Transition system reduction")]
struct Cli {
    /// Log arc mutations and reduction passes
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove every arc implied by a longer path
    Reduce {
        /// Arc as NAME:FROM:TO (repeatable)
        #[arg(long = "arc", value_name = "NAME:FROM:TO")]
        arcs: Vec<ArcSpec>,
        /// Config file (default: nearest transys.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Report size, incidence consistency, and acyclicity
    Check {
        /// Arc as NAME:FROM:TO (repeatable)
        #[arg(long = "arc", value_name = "NAME:FROM:TO")]
        arcs: Vec<ArcSpec>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Reduce { arcs, config } => {
            let cwd = std::env::current_dir()?;
            let config = TransysConfig::resolve(config.as_deref(), &cwd)?;
            commands::reduce::run(&arcs, &config.reduction, &mut std::io::stdout().lock())
        }
        Commands::Check { arcs } => commands::check::run(&arcs, &mut std::io::stdout().lock()),
    }
}
