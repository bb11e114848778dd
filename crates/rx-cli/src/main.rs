//! # rx CLI Entry Point
//!
//! Parses arguments, sets up logging and the validation context, and
//! dispatches to the subcommand handlers.
//!
//! Exit codes: 0 when everything passed, 1 when a document or schema was
//! rejected, 2 when a file could not be loaded or the schema is invalid.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Rx schema toolchain.
///
/// Checks JSON and YAML documents against Rx schemas.
#[derive(Parser, Debug)]
#[command(name = "rx", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Context config (JSON or YAML) with prefixes and learned types.
    /// Defaults to a context with only the core types.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Check documents against a schema.
    Check(rx_cli::check::CheckArgs),
    /// Compile schema files and report errors.
    Compile(rx_cli::compile::CompileArgs),
    /// List registered prefixes and types.
    Types,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let rx = rx_cli::load::build_context(cli.config.as_deref())?;
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Check(args) => rx_cli::check::run_check(&args, &rx, &mut out),
        Commands::Compile(args) => rx_cli::compile::run_compile(&args, &rx, &mut out),
        Commands::Types => rx_cli::types::run_types(&rx, &mut out).map(|()| true),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
