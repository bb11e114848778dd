//! # Compile Subcommand
//!
//! Compiles schema files without checking anything, reporting each one as
//! `OK <file>` or `ERROR <file>: <reason>`.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use rx_schema::Rx;

use crate::load::load_value;

/// Arguments for the compile subcommand.
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Schema definition files (JSON or YAML).
    #[arg(required = true)]
    pub schemas: Vec<PathBuf>,
}

/// Run the compile subcommand. Returns true if every schema compiled.
///
/// # Errors
///
/// Fails if a file cannot be loaded. Compilation errors are reported in
/// the output, not returned.
pub fn run_compile(args: &CompileArgs, rx: &Rx, out: &mut impl Write) -> anyhow::Result<bool> {
    let mut all_ok = true;
    for path in &args.schemas {
        let definition = load_value(path)?;
        match rx.make_schema(&definition) {
            Ok(schema) => writeln!(out, "OK {} ({})", path.display(), schema.uri())?,
            Err(e) => {
                all_ok = false;
                tracing::debug!(schema = %path.display(), error = %e, "schema failed to compile");
                writeln!(out, "ERROR {}: {e}", path.display())?;
            }
        }
    }
    Ok(all_ok)
}
