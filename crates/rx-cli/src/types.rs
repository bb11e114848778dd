//! # Types Subcommand
//!
//! Lists the prefixes and type URIs a context knows.

use std::io::Write;

use rx_schema::{Rx, TypeEntry};

/// Print prefixes as `/name/ -> base`, then one line per registered type,
/// marking learned types.
pub fn run_types(rx: &Rx, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "prefixes:")?;
    for name in rx.prefixes().names() {
        let base = rx.prefixes().base(name).unwrap_or_default();
        writeln!(out, "  /{name}/ -> {base}")?;
    }

    writeln!(out, "types:")?;
    for uri in rx.types().uris() {
        match rx.types().get(uri) {
            Some(TypeEntry::Alias(_)) => writeln!(out, "  {uri} (learned)")?,
            _ => writeln!(out, "  {uri}")?,
        }
    }
    Ok(())
}
