use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use ringwalk::check::check_dir;
use ringwalk::io::solve_file;
use ringwalk::SimulationConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ringwalk", about = "Cyclic sequence simulator on an order-statistics tree")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one problem file and print the sequence from the pointer.
    Run {
        /// Problem file (`k` on the first line, sequence on the second).
        input: PathBuf,
        /// Verify tree invariants after every step.
        #[arg(long)]
        verify: bool,
    },
    /// Run every `input*` file in a directory against its `out*` counterpart.
    Check {
        /// Directory of problem files.
        inputs: PathBuf,
        /// Directory of expected outputs.
        outputs: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run { input, verify } => {
            let config = SimulationConfig {
                verify_invariants: verify,
                ..SimulationConfig::default()
            };
            println!("{}", solve_file(&input, config)?);
        }
        Commands::Check { inputs, outputs } => run_check(&inputs, &outputs)?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_check(inputs: &Path, outputs: &Path) -> Result<()> {
    let report = check_dir(inputs, outputs, &SimulationConfig::default())?;
    report.write_to(&mut std::io::stdout().lock())?;
    info!(passed = report.passed(), total = report.total(), "check complete");

    if !report.all_passed() {
        anyhow::bail!(
            "{} of {} tests failed",
            report.total() - report.passed(),
            report.total()
        );
    }
    Ok(())
}
