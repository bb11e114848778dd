//! # Check Subcommand
//!
//! Compiles one schema and checks each document against it.
//!
//! ```text
//! rx check --schema person.yaml alice.json bob.yaml
//! PASS alice.json
//! FAIL bob.yaml
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use rx_schema::{Rx, Schema, TraceEntry};
use serde::Serialize;

use crate::load::load_value;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema definition file (JSON or YAML).
    #[arg(long, short)]
    pub schema: PathBuf,

    /// Print the failing nodes for every rejected document.
    #[arg(long)]
    pub explain: bool,

    /// Print one JSON report per document instead of PASS/FAIL lines.
    #[arg(long)]
    pub json: bool,

    /// Documents to check.
    #[arg(required = true)]
    pub documents: Vec<PathBuf>,
}

/// Machine-readable result for one document.
#[derive(Debug, Serialize)]
pub struct DocumentReport<'a> {
    pub document: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FailureReport<'a>>,
}

/// One failed node in a [`DocumentReport`].
#[derive(Debug, Serialize)]
pub struct FailureReport<'a> {
    pub instance_path: &'a str,
    pub schema_path: &'a str,
    pub uri: &'a str,
}

impl<'a> From<&'a TraceEntry> for FailureReport<'a> {
    fn from(entry: &'a TraceEntry) -> Self {
        Self {
            instance_path: &entry.instance_path,
            schema_path: &entry.schema_path,
            uri: &entry.uri,
        }
    }
}

/// Compile the schema file named by `path`.
pub fn compile_file(rx: &Rx, path: &Path) -> anyhow::Result<Schema> {
    let definition = load_value(path)?;
    rx.make_schema(&definition)
        .with_context(|| format!("failed to compile schema {}", path.display()))
}

/// Run the check subcommand. Returns true if every document passed.
///
/// # Errors
///
/// Fails if the schema cannot be loaded or compiled, or if a document
/// cannot be loaded.
pub fn run_check(args: &CheckArgs, rx: &Rx, out: &mut impl Write) -> anyhow::Result<bool> {
    let schema = compile_file(rx, &args.schema)?;
    let mut all_passed = true;

    for path in &args.documents {
        let document = load_value(path)?;
        let (valid, trace) = schema.check_with_trace(&document);
        tracing::debug!(document = %path.display(), valid, nodes = trace.len(), "checked document");
        all_passed &= valid;

        if args.json {
            let report = DocumentReport {
                document: path.display().to_string(),
                valid,
                failures: trace.failures().map(FailureReport::from).collect(),
            };
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
            continue;
        }

        let verdict = if valid { "PASS" } else { "FAIL" };
        writeln!(out, "{verdict} {}", path.display())?;
        if args.explain && !valid {
            writeln!(out, "{trace}")?;
        }
    }

    Ok(all_passed)
}
